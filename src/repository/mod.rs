//! Repository module
//!
//! Load/save contract for the Sale aggregate over Postgres. The aggregate
//! is always loaded in full (header plus all items), since its invariants
//! span the whole item collection.

pub mod sale;

pub use sale::{SaleFilter, SaleRepository};

use uuid::Uuid;

/// Errors from the persistence layer
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The row version changed between load and save; the caller must
    /// reload and retry the whole load-mutate-save cycle
    #[error("Version conflict on sale {sale_id}: expected version {expected}")]
    VersionConflict { sale_id: Uuid, expected: i64 },

    /// Unique constraint on the business number fired during save (a
    /// concurrent create slipped past the handler's pre-check)
    #[error("Sale number already exists: {0}")]
    DuplicateSaleNumber(String),

    /// Stored status column holds a value the domain doesn't know
    #[error("Unknown sale status in storage: {0}")]
    UnknownStatus(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
