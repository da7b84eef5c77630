//! Cancel Item Handler

use sqlx::PgPool;
use uuid::Uuid;

use crate::aggregate::Sale;
use crate::error::AppError;
use crate::repository::SaleRepository;

use super::publish_events;

/// Handler for cancelling a single item on a sale
pub struct CancelItemHandler {
    repository: SaleRepository,
}

impl CancelItemHandler {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: SaleRepository::new(pool),
        }
    }

    /// Cancel one item. The item keeps its quantity and discount as a
    /// historical record but stops contributing to the sale total.
    pub async fn execute(&self, sale_id: Uuid, item_id: Uuid) -> Result<Sale, AppError> {
        let mut sale = self
            .repository
            .find_by_id(sale_id)
            .await?
            .ok_or_else(|| AppError::SaleNotFound(sale_id.to_string()))?;

        sale.cancel_item(item_id)?;

        self.repository.save(&mut sale).await?;
        publish_events(&mut sale);

        tracing::info!(
            sale_id = %sale.id(),
            item_id = %item_id,
            total = %sale.total_amount(),
            "sale item cancelled"
        );

        Ok(sale)
    }
}
