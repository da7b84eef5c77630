//! retail_sales Library
//!
//! Re-exports modules for integration testing and the server binary.

pub mod aggregate;
pub mod api;
pub mod domain;
pub mod handlers;
pub mod repository;

pub mod config;
pub mod db;
mod error;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use aggregate::{Sale, SaleItem, SaleStatus};
pub use domain::{DomainError, SaleEvent};
