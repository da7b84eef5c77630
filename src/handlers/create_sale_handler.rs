//! Create Sale Handler
//!
//! Records a new sale with its initial items.

use sqlx::PgPool;

use crate::aggregate::Sale;
use crate::error::AppError;
use crate::repository::SaleRepository;

use super::{publish_events, CreateSaleCommand};

/// Handler for recording a new sale
pub struct CreateSaleHandler {
    repository: SaleRepository,
}

impl CreateSaleHandler {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: SaleRepository::new(pool),
        }
    }

    /// Execute the create command.
    ///
    /// The business number must be unique; a duplicate is rejected before
    /// the aggregate is even constructed. Items flow through the
    /// aggregate's `add_item` so merge and discount rules apply to the
    /// initial lines exactly as they do later.
    pub async fn execute(&self, command: CreateSaleCommand) -> Result<Sale, AppError> {
        if self
            .repository
            .sale_number_exists(&command.sale_number)
            .await?
        {
            return Err(AppError::DuplicateSaleNumber(command.sale_number));
        }

        let mut sale = Sale::create(command.sale_number, command.customer, command.branch);

        for item in command.items {
            sale.add_item(
                item.product_id,
                item.product_name,
                item.quantity,
                item.unit_price,
            )?;
        }

        sale.validate().into_result()?;

        self.repository.save(&mut sale).await?;
        publish_events(&mut sale);

        tracing::info!(
            sale_id = %sale.id(),
            sale_number = sale.sale_number(),
            total = %sale.total_amount(),
            "sale recorded"
        );

        Ok(sale)
    }
}
