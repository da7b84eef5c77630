//! SaleItem entity
//!
//! A line item owned by a [`Sale`](super::Sale). Items are only ever
//! mutated through the owning aggregate, which keeps the quantity cap and
//! the discount tier consistent across the whole collection.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{discount_for_quantity, DomainError, MAX_QUANTITY_PER_PRODUCT};

/// A product line on a sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItem {
    id: Uuid,
    sale_id: Uuid,
    product_id: Uuid,
    product_name: String,
    quantity: i32,
    unit_price: Decimal,
    discount_percentage: Decimal,
    is_cancelled: bool,
}

impl SaleItem {
    /// Create a new item with no discount applied yet.
    ///
    /// The owning sale validates the item and computes its discount before
    /// accepting it into the collection.
    pub(crate) fn new(
        sale_id: Uuid,
        product_id: Uuid,
        product_name: String,
        quantity: i32,
        unit_price: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            sale_id,
            product_id,
            product_name,
            quantity,
            unit_price,
            discount_percentage: Decimal::ZERO,
            is_cancelled: false,
        }
    }

    /// Rehydrate an item from database state
    #[allow(clippy::too_many_arguments)]
    pub fn from_storage(
        id: Uuid,
        sale_id: Uuid,
        product_id: Uuid,
        product_name: String,
        quantity: i32,
        unit_price: Decimal,
        discount_percentage: Decimal,
        is_cancelled: bool,
    ) -> Self {
        Self {
            id,
            sale_id,
            product_id,
            product_name,
            quantity,
            unit_price,
            discount_percentage,
            is_cancelled,
        }
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn sale_id(&self) -> Uuid {
        self.sale_id
    }

    pub fn product_id(&self) -> Uuid {
        self.product_id
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn discount_percentage(&self) -> Decimal {
        self.discount_percentage
    }

    pub fn is_cancelled(&self) -> bool {
        self.is_cancelled
    }

    /// Line total: `quantity * unit_price * (1 - discount/100)`.
    /// Always derived, never stored.
    pub fn total_amount(&self) -> Decimal {
        let gross = Decimal::from(self.quantity) * self.unit_price;
        let factor = Decimal::ONE - self.discount_percentage / Decimal::ONE_HUNDRED;
        gross * factor
    }

    // =========================================================================
    // Mutations (aggregate-internal)
    // =========================================================================

    /// Set the quantity without touching the discount. The caller applies
    /// the discount afterwards so the two never drift apart.
    pub(crate) fn set_quantity(&mut self, quantity: i32) {
        self.quantity = quantity;
    }

    /// Recompute the discount from the current quantity
    pub(crate) fn apply_discount(&mut self) {
        self.discount_percentage = discount_for_quantity(self.quantity);
    }

    /// Flag the item as cancelled. Quantity and discount are retained as a
    /// historical record.
    pub(crate) fn cancel(&mut self) {
        self.is_cancelled = true;
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Item-level validation, first failure wins.
    ///
    /// Checked in priority order: quantity must be positive, quantity must
    /// not exceed the cap, unit price must be positive, and a low-quantity
    /// item must not carry a stale nonzero discount.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.quantity <= 0 {
            return Err(DomainError::QuantityNotPositive);
        }
        if self.quantity > MAX_QUANTITY_PER_PRODUCT {
            return Err(DomainError::QuantityAboveLimit);
        }
        if self.unit_price <= Decimal::ZERO {
            return Err(DomainError::UnitPriceNotPositive);
        }
        if self.quantity < 4 && self.discount_percentage > Decimal::ZERO {
            return Err(DomainError::DiscountNotAllowed);
        }
        Ok(())
    }
}
