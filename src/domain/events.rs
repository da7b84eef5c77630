//! Domain Events
//!
//! Notification records describing what changed inside a sale during a unit
//! of work. They accumulate on the aggregate, are drained by the caller
//! after persistence, and are never stored themselves. Only these four
//! kinds are ever produced, so the list is a closed tagged enum rather than
//! an open-ended dynamic collection.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sale-related domain events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SaleEvent {
    /// A new sale was created
    SaleCreated {
        sale_id: Uuid,
        sale_number: String,
        customer: String,
        branch: String,
        total_amount: Decimal,
        occurred_at: DateTime<Utc>,
    },

    /// The sale's item collection changed (add, remove, quantity update,
    /// or the total shift caused by an item cancellation)
    SaleModified {
        sale_id: Uuid,
        sale_number: String,
        total_amount: Decimal,
        occurred_at: DateTime<Utc>,
    },

    /// The whole sale was cancelled
    SaleCancelled {
        sale_id: Uuid,
        sale_number: String,
        occurred_at: DateTime<Utc>,
    },

    /// A single item was cancelled; quantity is the historical quantity the
    /// item keeps after cancellation
    ItemCancelled {
        sale_id: Uuid,
        sale_item_id: Uuid,
        product_name: String,
        quantity: i32,
        occurred_at: DateTime<Utc>,
    },
}

impl SaleEvent {
    /// Get the event type as a string
    pub fn event_type(&self) -> &'static str {
        match self {
            SaleEvent::SaleCreated { .. } => "SaleCreated",
            SaleEvent::SaleModified { .. } => "SaleModified",
            SaleEvent::SaleCancelled { .. } => "SaleCancelled",
            SaleEvent::ItemCancelled { .. } => "ItemCancelled",
        }
    }

    /// Get the sale ID this event relates to
    pub fn sale_id(&self) -> Uuid {
        match self {
            SaleEvent::SaleCreated { sale_id, .. } => *sale_id,
            SaleEvent::SaleModified { sale_id, .. } => *sale_id,
            SaleEvent::SaleCancelled { sale_id, .. } => *sale_id,
            SaleEvent::ItemCancelled { sale_id, .. } => *sale_id,
        }
    }
}
