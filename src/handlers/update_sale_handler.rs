//! Update Sale Handler
//!
//! Applies a requested item list to an existing sale by diffing it against
//! the sale's current active items.

use std::collections::HashSet;

use sqlx::PgPool;
use uuid::Uuid;

use crate::aggregate::Sale;
use crate::error::AppError;
use crate::repository::SaleRepository;

use super::{publish_events, UpdateSaleCommand};

/// Handler for updating a sale's items
pub struct UpdateSaleHandler {
    repository: SaleRepository,
}

impl UpdateSaleHandler {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: SaleRepository::new(pool),
        }
    }

    /// Execute the update command.
    ///
    /// Existing active items whose product is no longer requested are
    /// physically removed (not cancelled); requested products that match
    /// an active item get the requested quantity; the rest are added as
    /// new items. Any domain-rule failure aborts the whole update before
    /// anything is persisted.
    pub async fn execute(&self, command: UpdateSaleCommand) -> Result<Sale, AppError> {
        let mut sale = self
            .repository
            .find_by_id(command.sale_id)
            .await?
            .ok_or_else(|| AppError::SaleNotFound(command.sale_id.to_string()))?;

        let requested_products: HashSet<Uuid> =
            command.items.iter().map(|i| i.product_id).collect();

        // drop active items for products the request no longer carries
        let to_remove: Vec<Uuid> = sale
            .items()
            .iter()
            .filter(|i| !i.is_cancelled() && !requested_products.contains(&i.product_id()))
            .map(|i| i.id())
            .collect();
        for item_id in to_remove {
            sale.remove_item(item_id)?;
        }

        for requested in command.items {
            let existing = sale
                .items()
                .iter()
                .find(|i| !i.is_cancelled() && i.product_id() == requested.product_id)
                .map(|i| i.id());

            match existing {
                Some(item_id) => {
                    sale.update_item_quantity(item_id, requested.quantity)?;
                }
                None => {
                    sale.add_item(
                        requested.product_id,
                        requested.product_name,
                        requested.quantity,
                        requested.unit_price,
                    )?;
                }
            }
        }

        sale.validate().into_result()?;

        self.repository.save(&mut sale).await?;
        publish_events(&mut sale);

        tracing::info!(
            sale_id = %sale.id(),
            sale_number = sale.sale_number(),
            total = %sale.total_amount(),
            "sale updated"
        );

        Ok(sale)
    }
}
