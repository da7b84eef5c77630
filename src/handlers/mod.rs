//! Use-case handlers
//!
//! One handler per mutating use case. Each handler loads (or creates) the
//! aggregate, invokes its operations, persists it, then drains the
//! accumulated domain events into the log. Reads go straight from the API
//! layer to the repository.

mod cancel_item_handler;
mod cancel_sale_handler;
mod commands;
mod create_sale_handler;
mod update_sale_handler;


pub use cancel_item_handler::CancelItemHandler;
pub use cancel_sale_handler::CancelSaleHandler;
pub use commands::*;
pub use create_sale_handler::CreateSaleHandler;
pub use update_sale_handler::UpdateSaleHandler;

use crate::aggregate::Sale;

/// Drain the sale's accumulated domain events into the log and clear them.
///
/// Publishing is best-effort: events only exist in memory, so they are
/// forwarded to the tracing pipeline after the aggregate has been
/// persisted and then discarded.
pub(crate) fn publish_events(sale: &mut Sale) {
    for event in sale.domain_events() {
        let payload = serde_json::to_string(event).unwrap_or_default();
        tracing::info!(
            event_type = event.event_type(),
            sale_id = %event.sale_id(),
            payload = %payload,
            "domain event"
        );
    }
    sale.clear_domain_events();
}
