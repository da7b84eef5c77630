//! Cancel Sale Handler

use sqlx::PgPool;
use uuid::Uuid;

use crate::aggregate::Sale;
use crate::error::AppError;
use crate::repository::SaleRepository;

use super::publish_events;

/// Handler for cancelling a whole sale
pub struct CancelSaleHandler {
    repository: SaleRepository,
}

impl CancelSaleHandler {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: SaleRepository::new(pool),
        }
    }

    /// Cancel the sale. Re-cancelling reports a conflict error response
    /// rather than faulting; the sale itself is untouched.
    pub async fn execute(&self, sale_id: Uuid) -> Result<Sale, AppError> {
        let mut sale = self
            .repository
            .find_by_id(sale_id)
            .await?
            .ok_or_else(|| AppError::SaleNotFound(sale_id.to_string()))?;

        sale.cancel()?;

        self.repository.save(&mut sale).await?;
        publish_events(&mut sale);

        tracing::info!(
            sale_id = %sale.id(),
            sale_number = sale.sale_number(),
            "sale cancelled"
        );

        Ok(sale)
    }
}
