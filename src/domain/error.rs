//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use thiserror::Error;
use uuid::Uuid;

/// Domain-specific errors
///
/// These errors represent business rule violations and domain invariant
/// failures. They are independent of the web/infrastructure layer. Every
/// rule breach aborts the triggering operation before any state mutation or
/// notification is recorded, so a rejected operation leaves no partial
/// state behind.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// A cancelled sale accepts no further item mutations
    #[error("Sale is cancelled and can no longer be modified")]
    SaleCancelled,

    /// Cancelling an already cancelled sale
    #[error("Sale is already cancelled")]
    SaleAlreadyCancelled,

    /// Referenced item does not exist on this sale
    #[error("Sale item not found: {0}")]
    ItemNotFound(Uuid),

    /// Referenced item was already cancelled
    #[error("Sale item is already cancelled: {0}")]
    ItemAlreadyCancelled(Uuid),

    /// Item quantity must be at least 1 while active
    #[error("Item quantity must be greater than zero")]
    QuantityNotPositive,

    /// Item quantity (or merged quantity) above the per-product cap
    #[error("Cannot sell more than 20 identical items")]
    QuantityAboveLimit,

    /// Unit price must be strictly positive
    #[error("Unit price must be greater than zero")]
    UnitPriceNotPositive,

    /// A low-quantity item must not carry a stale nonzero discount
    #[error("Items with less than 4 units cannot have a discount")]
    DiscountNotAllowed,

    /// Aggregate-level validation failure with all accumulated violations
    #[error("Sale validation failed: {}", .errors.join("; "))]
    ValidationFailed { errors: Vec<String> },
}

impl DomainError {
    /// Check if this error maps to a missing resource
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ItemNotFound(_))
    }

    /// Check if this error is a state conflict (the request raced or
    /// repeated a terminal transition)
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::SaleCancelled | Self::SaleAlreadyCancelled | Self::ItemAlreadyCancelled(_)
        )
    }
}
