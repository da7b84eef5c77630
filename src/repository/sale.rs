//! Sale Repository
//!
//! Persistence for the Sale aggregate. Saves run in a single transaction
//! with an optimistic version check on the header row, so two callers that
//! loaded the same sale cannot silently overwrite each other's changes.
//! Items are rewritten wholesale on every save: removed items leave no row
//! behind, while item ids stay stable across saves.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::collections::HashMap;
use uuid::Uuid;

use crate::aggregate::{Sale, SaleItem, SaleStatus};

use super::RepositoryError;

/// Upper bound on page size for listings
pub const MAX_PAGE_SIZE: i64 = 100;

type SaleRow = (
    Uuid,
    String,
    DateTime<Utc>,
    String,
    String,
    String,
    i64,
    DateTime<Utc>,
    Option<DateTime<Utc>>,
);

type ItemRow = (Uuid, Uuid, Uuid, String, i32, Decimal, Decimal, bool);

const SALE_COLUMNS: &str =
    "id, sale_number, sale_date, customer, branch, status, version, created_at, updated_at";

const ITEM_COLUMNS: &str =
    "id, sale_id, product_id, product_name, quantity, unit_price, discount_percentage, is_cancelled";

/// Filter and pagination for sale listings
#[derive(Debug, Clone, Default)]
pub struct SaleFilter {
    pub customer: Option<String>,
    pub branch: Option<String>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    /// 1-based page number
    pub page: i64,
    pub page_size: i64,
}

impl SaleFilter {
    fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit()
    }

    fn apply_conditions(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        if let Some(ref customer) = self.customer {
            builder.push(" AND customer = ").push_bind(customer.clone());
        }
        if let Some(ref branch) = self.branch {
            builder.push(" AND branch = ").push_bind(branch.clone());
        }
        if let Some(date_from) = self.date_from {
            builder.push(" AND sale_date >= ").push_bind(date_from);
        }
        if let Some(date_to) = self.date_to {
            builder.push(" AND sale_date <= ").push_bind(date_to);
        }
    }
}

/// Repository for Sale aggregates
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: PgPool,
}

impl SaleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // Loads
    // =========================================================================

    /// Load a sale with all of its items
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Sale>, RepositoryError> {
        let row: Option<SaleRow> = sqlx::query_as(&format!(
            "SELECT {SALE_COLUMNS} FROM sales WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let items = self.load_items(row.0).await?;
                Ok(Some(hydrate(row, items)?))
            }
            None => Ok(None),
        }
    }

    /// Load a sale by its business number
    pub async fn find_by_sale_number(
        &self,
        sale_number: &str,
    ) -> Result<Option<Sale>, RepositoryError> {
        let row: Option<SaleRow> = sqlx::query_as(&format!(
            "SELECT {SALE_COLUMNS} FROM sales WHERE sale_number = $1"
        ))
        .bind(sale_number)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let items = self.load_items(row.0).await?;
                Ok(Some(hydrate(row, items)?))
            }
            None => Ok(None),
        }
    }

    /// Duplicate pre-check for create
    pub async fn sale_number_exists(&self, sale_number: &str) -> Result<bool, RepositoryError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM sales WHERE sale_number = $1)")
                .bind(sale_number)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Filtered, paginated listing, newest first. Returns the page of fully
    /// loaded sales and the total match count.
    pub async fn list(&self, filter: &SaleFilter) -> Result<(Vec<Sale>, i64), RepositoryError> {
        let mut count_query: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM sales WHERE 1 = 1");
        filter.apply_conditions(&mut count_query);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut page_query: QueryBuilder<'_, Postgres> = QueryBuilder::new(format!(
            "SELECT {SALE_COLUMNS} FROM sales WHERE 1 = 1"
        ));
        filter.apply_conditions(&mut page_query);
        page_query
            .push(" ORDER BY sale_date DESC, sale_number DESC LIMIT ")
            .push_bind(filter.limit())
            .push(" OFFSET ")
            .push_bind(filter.offset());

        let rows: Vec<SaleRow> = page_query.build_query_as().fetch_all(&self.pool).await?;

        if rows.is_empty() {
            return Ok((Vec::new(), total));
        }

        // batch-load items for the whole page
        let sale_ids: Vec<Uuid> = rows.iter().map(|r| r.0).collect();
        let item_rows: Vec<ItemRow> = sqlx::query_as(&format!(
            "SELECT {ITEM_COLUMNS} FROM sale_items WHERE sale_id = ANY($1) ORDER BY sale_id, position"
        ))
        .bind(&sale_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut items_by_sale: HashMap<Uuid, Vec<SaleItem>> = HashMap::new();
        for row in item_rows {
            items_by_sale
                .entry(row.1)
                .or_default()
                .push(item_from_row(row));
        }

        let mut sales = Vec::with_capacity(rows.len());
        for row in rows {
            let items = items_by_sale.remove(&row.0).unwrap_or_default();
            sales.push(hydrate(row, items)?);
        }

        Ok((sales, total))
    }

    async fn load_items(&self, sale_id: Uuid) -> Result<Vec<SaleItem>, RepositoryError> {
        let rows: Vec<ItemRow> = sqlx::query_as(&format!(
            "SELECT {ITEM_COLUMNS} FROM sale_items WHERE sale_id = $1 ORDER BY position"
        ))
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(item_from_row).collect())
    }

    // =========================================================================
    // Save
    // =========================================================================

    /// Persist the aggregate in one transaction.
    ///
    /// A fresh aggregate (version 0) inserts its header at version 1; a
    /// loaded aggregate updates it guarded by the expected version. Zero
    /// affected rows means another writer got there first. Items are
    /// deleted and re-inserted with their positions, which keeps the stored
    /// order equal to the in-memory order and leaves no row behind for
    /// physically removed items.
    pub async fn save(&self, sale: &mut Sale) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let new_version = if sale.version() == 0 {
            let inserted = sqlx::query(
                r#"
                INSERT INTO sales (id, sale_number, sale_date, customer, branch, status, version, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, 1, $7, $8)
                "#,
            )
            .bind(sale.id())
            .bind(sale.sale_number())
            .bind(sale.sale_date())
            .bind(sale.customer())
            .bind(sale.branch())
            .bind(sale.status().as_str())
            .bind(sale.created_at())
            .bind(sale.updated_at())
            .execute(&mut *tx)
            .await;

            match inserted {
                Ok(_) => {}
                Err(e) if is_unique_violation(&e) => {
                    return Err(RepositoryError::DuplicateSaleNumber(
                        sale.sale_number().to_string(),
                    ));
                }
                Err(e) => return Err(e.into()),
            }
            1
        } else {
            let expected = sale.version();
            let result = sqlx::query(
                r#"
                UPDATE sales
                SET sale_date = $2, customer = $3, branch = $4, status = $5,
                    version = $6, updated_at = $7
                WHERE id = $1 AND version = $8
                "#,
            )
            .bind(sale.id())
            .bind(sale.sale_date())
            .bind(sale.customer())
            .bind(sale.branch())
            .bind(sale.status().as_str())
            .bind(expected + 1)
            .bind(sale.updated_at())
            .bind(expected)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(RepositoryError::VersionConflict {
                    sale_id: sale.id(),
                    expected,
                });
            }
            expected + 1
        };

        sqlx::query("DELETE FROM sale_items WHERE sale_id = $1")
            .bind(sale.id())
            .execute(&mut *tx)
            .await?;

        for (position, item) in sale.items().iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO sale_items (id, sale_id, position, product_id, product_name, quantity, unit_price, discount_percentage, is_cancelled)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(item.id())
            .bind(sale.id())
            .bind(position as i32)
            .bind(item.product_id())
            .bind(item.product_name())
            .bind(item.quantity())
            .bind(item.unit_price())
            .bind(item.discount_percentage())
            .bind(item.is_cancelled())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        sale.set_version(new_version);
        Ok(())
    }

    // =========================================================================
    // Delete
    // =========================================================================

    /// Physically delete a sale; items go with it via cascade. Returns
    /// whether a row was deleted.
    pub async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM sales WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn hydrate(row: SaleRow, items: Vec<SaleItem>) -> Result<Sale, RepositoryError> {
    let (id, sale_number, sale_date, customer, branch, status, version, created_at, updated_at) =
        row;

    let status = SaleStatus::parse(&status).ok_or(RepositoryError::UnknownStatus(status))?;

    Ok(Sale::from_storage(
        id,
        sale_number,
        sale_date,
        customer,
        branch,
        status,
        items,
        created_at,
        updated_at,
        version,
    ))
}

fn item_from_row(row: ItemRow) -> SaleItem {
    let (id, sale_id, product_id, product_name, quantity, unit_price, discount, is_cancelled) = row;
    SaleItem::from_storage(
        id,
        sale_id,
        product_id,
        product_name,
        quantity,
        unit_price,
        discount,
        is_cancelled,
    )
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_limit_is_clamped() {
        let mut filter = SaleFilter {
            page: 1,
            page_size: 500,
            ..Default::default()
        };
        assert_eq!(filter.limit(), MAX_PAGE_SIZE);

        filter.page_size = 0;
        assert_eq!(filter.limit(), 1);

        filter.page_size = 25;
        assert_eq!(filter.limit(), 25);
    }

    #[test]
    fn test_filter_offset_from_page() {
        let filter = SaleFilter {
            page: 3,
            page_size: 20,
            ..Default::default()
        };
        assert_eq!(filter.offset(), 40);

        // page numbers below 1 behave like the first page
        let filter = SaleFilter {
            page: 0,
            page_size: 20,
            ..Default::default()
        };
        assert_eq!(filter.offset(), 0);
    }
}
