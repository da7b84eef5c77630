//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::aggregate::{Sale, SaleItem};
use crate::error::AppError;
use crate::handlers::{
    CancelItemHandler, CancelSaleHandler, CreateSaleCommand, CreateSaleHandler, SaleItemInput,
    UpdateSaleCommand, UpdateSaleHandler,
};
use crate::repository::{SaleFilter, SaleRepository};

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct SaleItemRequest {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl From<SaleItemRequest> for SaleItemInput {
    fn from(request: SaleItemRequest) -> Self {
        Self {
            product_id: request.product_id,
            product_name: request.product_name,
            quantity: request.quantity,
            unit_price: request.unit_price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSaleRequest {
    pub sale_number: String,
    pub customer: String,
    pub branch: String,
    #[serde(default)]
    pub items: Vec<SaleItemRequest>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateSaleRequest {
    pub items: Vec<SaleItemRequest>,
}

#[derive(Debug, Serialize)]
pub struct SaleItemResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub discount_percentage: Decimal,
    pub total_amount: Decimal,
    pub is_cancelled: bool,
}

impl From<&SaleItem> for SaleItemResponse {
    fn from(item: &SaleItem) -> Self {
        Self {
            id: item.id(),
            product_id: item.product_id(),
            product_name: item.product_name().to_string(),
            quantity: item.quantity(),
            unit_price: item.unit_price(),
            discount_percentage: item.discount_percentage(),
            total_amount: item.total_amount(),
            is_cancelled: item.is_cancelled(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SaleResponse {
    pub id: Uuid,
    pub sale_number: String,
    pub sale_date: DateTime<Utc>,
    pub customer: String,
    pub branch: String,
    pub status: String,
    pub total_amount: Decimal,
    pub items: Vec<SaleItemResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Sale> for SaleResponse {
    fn from(sale: &Sale) -> Self {
        Self {
            id: sale.id(),
            sale_number: sale.sale_number().to_string(),
            sale_date: sale.sale_date(),
            customer: sale.customer().to_string(),
            branch: sale.branch().to_string(),
            status: sale.status().to_string(),
            total_amount: sale.total_amount(),
            items: sale.items().iter().map(SaleItemResponse::from).collect(),
            created_at: sale.created_at(),
            updated_at: sale.updated_at(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListSalesQuery {
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub date_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_to: Option<DateTime<Utc>>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    20
}

#[derive(Debug, Serialize)]
pub struct ListSalesResponse {
    pub sales: Vec<SaleResponse>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<PgPool> {
    Router::new()
        .route("/sales", post(create_sale).get(list_sales))
        .route(
            "/sales/:sale_id",
            get(get_sale).put(update_sale).delete(delete_sale),
        )
        .route("/sales/:sale_id/cancel", post(cancel_sale))
        .route("/sales/:sale_id/items/:item_id/cancel", post(cancel_item))
}

// =========================================================================
// POST /sales
// =========================================================================

/// Record a new sale
async fn create_sale(
    State(pool): State<PgPool>,
    Json(request): Json<CreateSaleRequest>,
) -> Result<(StatusCode, Json<SaleResponse>), AppError> {
    let handler = CreateSaleHandler::new(pool);

    let command = CreateSaleCommand::new(request.sale_number, request.customer, request.branch)
        .with_items(request.items.into_iter().map(SaleItemInput::from).collect());

    let sale = handler.execute(command).await?;

    Ok((StatusCode::CREATED, Json(SaleResponse::from(&sale))))
}

// =========================================================================
// GET /sales/:sale_id
// =========================================================================

/// Get sale by ID
async fn get_sale(
    State(pool): State<PgPool>,
    Path(sale_id): Path<Uuid>,
) -> Result<Json<SaleResponse>, AppError> {
    let repository = SaleRepository::new(pool);

    let sale = repository
        .find_by_id(sale_id)
        .await?
        .ok_or_else(|| AppError::SaleNotFound(sale_id.to_string()))?;

    Ok(Json(SaleResponse::from(&sale)))
}

// =========================================================================
// GET /sales
// =========================================================================

/// List sales with optional filters and pagination
async fn list_sales(
    State(pool): State<PgPool>,
    Query(query): Query<ListSalesQuery>,
) -> Result<Json<ListSalesResponse>, AppError> {
    let repository = SaleRepository::new(pool);

    let filter = SaleFilter {
        customer: query.customer,
        branch: query.branch,
        date_from: query.date_from,
        date_to: query.date_to,
        page: query.page,
        page_size: query.page_size,
    };

    let (sales, total) = repository.list(&filter).await?;

    Ok(Json(ListSalesResponse {
        sales: sales.iter().map(SaleResponse::from).collect(),
        total,
        page: query.page,
        page_size: query.page_size,
    }))
}

// =========================================================================
// PUT /sales/:sale_id
// =========================================================================

/// Update a sale's items by diffing the requested lines against the
/// existing active items
async fn update_sale(
    State(pool): State<PgPool>,
    Path(sale_id): Path<Uuid>,
    Json(request): Json<UpdateSaleRequest>,
) -> Result<Json<SaleResponse>, AppError> {
    let handler = UpdateSaleHandler::new(pool);

    let command = UpdateSaleCommand::new(
        sale_id,
        request.items.into_iter().map(SaleItemInput::from).collect(),
    );

    let sale = handler.execute(command).await?;

    Ok(Json(SaleResponse::from(&sale)))
}

// =========================================================================
// POST /sales/:sale_id/cancel
// =========================================================================

/// Cancel a sale. Cancelling an already cancelled sale reports a conflict.
async fn cancel_sale(
    State(pool): State<PgPool>,
    Path(sale_id): Path<Uuid>,
) -> Result<Json<SaleResponse>, AppError> {
    let handler = CancelSaleHandler::new(pool);
    let sale = handler.execute(sale_id).await?;

    Ok(Json(SaleResponse::from(&sale)))
}

// =========================================================================
// POST /sales/:sale_id/items/:item_id/cancel
// =========================================================================

/// Cancel a single item on a sale
async fn cancel_item(
    State(pool): State<PgPool>,
    Path((sale_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<SaleResponse>, AppError> {
    let handler = CancelItemHandler::new(pool);
    let sale = handler.execute(sale_id, item_id).await?;

    Ok(Json(SaleResponse::from(&sale)))
}

// =========================================================================
// DELETE /sales/:sale_id
// =========================================================================

/// Physically delete a sale and its items
async fn delete_sale(
    State(pool): State<PgPool>,
    Path(sale_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let repository = SaleRepository::new(pool);

    let deleted = repository.delete(sale_id).await?;
    if !deleted {
        return Err(AppError::SaleNotFound(sale_id.to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
