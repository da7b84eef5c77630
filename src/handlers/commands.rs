//! Command definitions
//!
//! Commands represent intentions to change the system state. They carry
//! request data into the handlers, decoupled from the HTTP DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One requested product line, shared by create and update commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItemInput {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Command to record a new sale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSaleCommand {
    pub sale_number: String,
    pub customer: String,
    pub branch: String,
    pub items: Vec<SaleItemInput>,
}

impl CreateSaleCommand {
    pub fn new(sale_number: String, customer: String, branch: String) -> Self {
        Self {
            sale_number,
            customer,
            branch,
            items: Vec::new(),
        }
    }

    pub fn with_items(mut self, items: Vec<SaleItemInput>) -> Self {
        self.items = items;
        self
    }
}

/// Command to replace a sale's requested items.
///
/// The handler diffs the requested lines against the existing active items:
/// items for products no longer requested are removed, matching products
/// get the requested quantity, and new products are added.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSaleCommand {
    pub sale_id: Uuid,
    pub items: Vec<SaleItemInput>,
}

impl UpdateSaleCommand {
    pub fn new(sale_id: Uuid, items: Vec<SaleItemInput>) -> Self {
        Self { sale_id, items }
    }
}
