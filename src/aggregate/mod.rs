//! Aggregate module
//!
//! The Sale aggregate root and its owned SaleItem entity. All mutations go
//! through the root, which is the unit of consistency for persistence.

pub mod item;
pub mod sale;

pub use item::SaleItem;
pub use sale::{Sale, SaleStatus};
