//! Sale Aggregate
//!
//! Sale is the single consistency boundary for a sale transaction: the only
//! path through which items may be added, changed, or cancelled. It owns the
//! sale header and the ordered item collection, enforces every
//! quantity/discount/cancellation invariant, and accumulates domain events
//! describing what changed. Events are transient; the caller drains and
//! clears them after persisting the aggregate.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{DomainError, SaleEvent, ValidationResult, MAX_QUANTITY_PER_PRODUCT};

use super::SaleItem;

/// Sale lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleStatus {
    Active,
    Cancelled,
}

impl SaleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaleStatus::Active => "active",
            SaleStatus::Cancelled => "cancelled",
        }
    }

    /// Parse from the stored representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(SaleStatus::Active),
            "cancelled" => Some(SaleStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sale Aggregate
///
/// State is mutated directly through the operations below; every mutation
/// stamps `updated_at` and records a notification. A rejected operation
/// leaves no partial state behind.
#[derive(Debug, Clone)]
pub struct Sale {
    id: Uuid,
    sale_number: String,
    sale_date: DateTime<Utc>,
    customer: String,
    branch: String,
    status: SaleStatus,
    items: Vec<SaleItem>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    /// Storage row version for optimistic concurrency. Maintained by the
    /// repository; the aggregate never inspects it.
    version: i64,
    /// Transient notification buffer, never persisted
    domain_events: Vec<SaleEvent>,
}

impl Sale {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Create a new sale and record the creation event.
    ///
    /// Field content is not validated here; callers run [`Sale::validate`]
    /// before persisting.
    pub fn create(sale_number: String, customer: String, branch: String) -> Self {
        let now = Utc::now();
        let id = Uuid::new_v4();

        let mut sale = Self {
            id,
            sale_number,
            sale_date: now,
            customer,
            branch,
            status: SaleStatus::Active,
            items: Vec::new(),
            created_at: now,
            updated_at: None,
            version: 0,
            domain_events: Vec::new(),
        };

        sale.domain_events.push(SaleEvent::SaleCreated {
            sale_id: sale.id,
            sale_number: sale.sale_number.clone(),
            customer: sale.customer.clone(),
            branch: sale.branch.clone(),
            total_amount: Decimal::ZERO,
            occurred_at: now,
        });

        sale
    }

    /// Rehydrate a sale from database state. No events are recorded.
    #[allow(clippy::too_many_arguments)]
    pub fn from_storage(
        id: Uuid,
        sale_number: String,
        sale_date: DateTime<Utc>,
        customer: String,
        branch: String,
        status: SaleStatus,
        items: Vec<SaleItem>,
        created_at: DateTime<Utc>,
        updated_at: Option<DateTime<Utc>>,
        version: i64,
    ) -> Self {
        Self {
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
            domain_events: Vec::new(),
        }
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Add a product to the sale.
    ///
    /// Adding a product that already has an active item merges the
    /// quantities into that item and recomputes its discount. A merge that
    /// would push the quantity past the cap is rejected with the existing
    /// item left untouched.
    pub fn add_item(
        &mut self,
        product_id: Uuid,
        product_name: String,
        quantity: i32,
        unit_price: Decimal,
    ) -> Result<(), DomainError> {
        self.ensure_active()?;

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| !i.is_cancelled() && i.product_id() == product_id)
        {
            let merged = existing.quantity().saturating_add(quantity);
            if merged > MAX_QUANTITY_PER_PRODUCT {
                return Err(DomainError::QuantityAboveLimit);
            }
            existing.set_quantity(merged);
            existing.apply_discount();
        } else {
            let mut item = SaleItem::new(self.id, product_id, product_name, quantity, unit_price);
            item.validate()?;
            item.apply_discount();
            self.items.push(item);
        }

        self.touch();
        self.record_modified();
        Ok(())
    }

    /// Physically remove an item from the sale. Unlike cancellation, no
    /// trace of the item remains.
    pub fn remove_item(&mut self, item_id: Uuid) -> Result<(), DomainError> {
        self.ensure_active()?;

        let position = self
            .items
            .iter()
            .position(|i| i.id() == item_id)
            .ok_or(DomainError::ItemNotFound(item_id))?;

        self.items.remove(position);
        self.touch();
        self.record_modified();
        Ok(())
    }

    /// Change the quantity of an active item.
    ///
    /// A quantity of zero or less cancels the item instead of leaving a
    /// zero-quantity line behind.
    pub fn update_item_quantity(
        &mut self,
        item_id: Uuid,
        new_quantity: i32,
    ) -> Result<(), DomainError> {
        self.ensure_active()?;

        if new_quantity <= 0 {
            return self.cancel_item(item_id);
        }
        if new_quantity > MAX_QUANTITY_PER_PRODUCT {
            return Err(DomainError::QuantityAboveLimit);
        }

        let item = self
            .items
            .iter_mut()
            .find(|i| i.id() == item_id)
            .ok_or(DomainError::ItemNotFound(item_id))?;
        if item.is_cancelled() {
            return Err(DomainError::ItemAlreadyCancelled(item_id));
        }

        item.set_quantity(new_quantity);
        item.apply_discount();
        self.touch();
        self.record_modified();
        Ok(())
    }

    /// Cancel an item, keeping its quantity and discount as a historical
    /// record. The item no longer contributes to the sale total.
    pub fn cancel_item(&mut self, item_id: Uuid) -> Result<(), DomainError> {
        self.ensure_active()?;

        let item = self
            .items
            .iter_mut()
            .find(|i| i.id() == item_id)
            .ok_or(DomainError::ItemNotFound(item_id))?;
        if item.is_cancelled() {
            return Err(DomainError::ItemAlreadyCancelled(item_id));
        }

        item.cancel();
        let product_name = item.product_name().to_string();
        let quantity = item.quantity();

        self.touch();
        self.domain_events.push(SaleEvent::ItemCancelled {
            sale_id: self.id,
            sale_item_id: item_id,
            product_name,
            quantity,
            occurred_at: Utc::now(),
        });
        self.record_modified();
        Ok(())
    }

    /// Cancel the whole sale. One-way transition; items are left as they
    /// are.
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        if self.status == SaleStatus::Cancelled {
            return Err(DomainError::SaleAlreadyCancelled);
        }

        self.status = SaleStatus::Cancelled;
        self.touch();
        self.domain_events.push(SaleEvent::SaleCancelled {
            sale_id: self.id,
            sale_number: self.sale_number.clone(),
            occurred_at: Utc::now(),
        });
        Ok(())
    }

    /// Aggregate-level validation, collecting every violation.
    ///
    /// A sale is valid for persistence when the required header fields are
    /// present (and fit their columns), at least one item is active, and
    /// every active item independently validates.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::new();

        if self.sale_number.trim().is_empty() {
            result.add_error("Sale number is required");
        } else if self.sale_number.len() > 50 {
            result.add_error("Sale number must not exceed 50 characters");
        }

        if self.customer.trim().is_empty() {
            result.add_error("Customer is required");
        } else if self.customer.len() > 200 {
            result.add_error("Customer must not exceed 200 characters");
        }

        if self.branch.trim().is_empty() {
            result.add_error("Branch is required");
        } else if self.branch.len() > 200 {
            result.add_error("Branch must not exceed 200 characters");
        }

        if !self.items.iter().any(|i| !i.is_cancelled()) {
            result.add_error("Sale must have at least one active item");
        }

        for item in self.items.iter().filter(|i| !i.is_cancelled()) {
            if let Err(e) = item.validate() {
                result.add_error(format!("{}: {}", item.product_name(), e));
            }
        }

        result
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn sale_number(&self) -> &str {
        &self.sale_number
    }

    pub fn sale_date(&self) -> DateTime<Utc> {
        self.sale_date
    }

    pub fn customer(&self) -> &str {
        &self.customer
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn status(&self) -> SaleStatus {
        self.status
    }

    pub fn items(&self) -> &[SaleItem] {
        &self.items
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    pub(crate) fn set_version(&mut self, version: i64) {
        self.version = version;
    }

    /// Sale total: sum over active items. Cancelled items never contribute.
    /// Always recomputed on demand, never cached.
    pub fn total_amount(&self) -> Decimal {
        self.items
            .iter()
            .filter(|i| !i.is_cancelled())
            .map(SaleItem::total_amount)
            .sum()
    }

    // =========================================================================
    // Domain events
    // =========================================================================

    /// Accumulated notifications, in emission order
    pub fn domain_events(&self) -> &[SaleEvent] {
        &self.domain_events
    }

    /// Discard all accumulated notifications. Called by the owner of the
    /// unit of work after it has read and forwarded them.
    pub fn clear_domain_events(&mut self) {
        self.domain_events.clear();
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn ensure_active(&self) -> Result<(), DomainError> {
        if self.status == SaleStatus::Cancelled {
            return Err(DomainError::SaleCancelled);
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }

    fn record_modified(&mut self) {
        self.domain_events.push(SaleEvent::SaleModified {
            sale_id: self.id,
            sale_number: self.sale_number.clone(),
            total_amount: self.total_amount(),
            occurred_at: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn test_sale() -> Sale {
        Sale::create(
            "S-1".to_string(),
            "Customer".to_string(),
            "Branch".to_string(),
        )
    }

    #[test]
    fn test_create_emits_sale_created() {
        let sale = test_sale();

        assert_eq!(sale.status(), SaleStatus::Active);
        assert!(sale.items().is_empty());
        assert!(sale.updated_at().is_none());
        assert_eq!(sale.total_amount(), Decimal::ZERO);

        assert_eq!(sale.domain_events().len(), 1);
        match &sale.domain_events()[0] {
            SaleEvent::SaleCreated {
                sale_id,
                sale_number,
                total_amount,
                ..
            } => {
                assert_eq!(*sale_id, sale.id());
                assert_eq!(sale_number, "S-1");
                assert_eq!(*total_amount, Decimal::ZERO);
            }
            other => panic!("expected SaleCreated, got {:?}", other),
        }
    }

    #[test]
    fn test_add_item_applies_tier_discount() {
        let mut sale = test_sale();
        sale.add_item(Uuid::new_v4(), "Widget".to_string(), 5, dec!(100.00))
            .unwrap();

        let item = &sale.items()[0];
        assert_eq!(item.discount_percentage(), dec!(10));
        assert_eq!(item.total_amount(), dec!(450.0000));
        assert_eq!(sale.total_amount(), dec!(450.0000));
        assert!(sale.updated_at().is_some());
    }

    #[test]
    fn test_discount_tiers_across_full_range() {
        for quantity in 1..=20 {
            let mut sale = test_sale();
            sale.add_item(Uuid::new_v4(), "Widget".to_string(), quantity, dec!(10))
                .unwrap();

            let expected = if quantity >= 10 {
                dec!(20)
            } else if quantity >= 4 {
                dec!(10)
            } else {
                Decimal::ZERO
            };
            assert_eq!(
                sale.items()[0].discount_percentage(),
                expected,
                "quantity {}",
                quantity
            );
        }
    }

    #[test]
    fn test_add_item_rejects_more_than_twenty() {
        let mut sale = test_sale();
        let err = sale
            .add_item(Uuid::new_v4(), "X".to_string(), 25, dec!(10.00))
            .unwrap_err();

        assert_eq!(err, DomainError::QuantityAboveLimit);
        assert!(sale.items().is_empty());
        // only the creation event, nothing from the rejected operation
        assert_eq!(sale.domain_events().len(), 1);
    }

    #[test]
    fn test_add_item_rejects_invalid_price() {
        let mut sale = test_sale();
        let err = sale
            .add_item(Uuid::new_v4(), "X".to_string(), 5, Decimal::ZERO)
            .unwrap_err();

        assert_eq!(err, DomainError::UnitPriceNotPositive);
        assert!(sale.items().is_empty());
    }

    #[test]
    fn test_add_same_product_merges_quantities() {
        let mut sale = test_sale();
        let product = Uuid::new_v4();

        sale.add_item(product, "Widget".to_string(), 5, dec!(100.00))
            .unwrap();
        sale.add_item(product, "Widget".to_string(), 7, dec!(100.00))
            .unwrap();

        assert_eq!(sale.items().len(), 1);
        let item = &sale.items()[0];
        assert_eq!(item.quantity(), 12);
        assert_eq!(item.discount_percentage(), dec!(20));
        assert_eq!(item.total_amount(), dec!(960.0000));
    }

    #[test]
    fn test_merge_above_cap_leaves_existing_item_untouched() {
        let mut sale = test_sale();
        let product = Uuid::new_v4();

        sale.add_item(product, "Widget".to_string(), 15, dec!(100.00))
            .unwrap();
        let err = sale
            .add_item(product, "Widget".to_string(), 10, dec!(100.00))
            .unwrap_err();

        assert_eq!(err, DomainError::QuantityAboveLimit);
        assert_eq!(sale.items().len(), 1);
        assert_eq!(sale.items()[0].quantity(), 15);
        assert_eq!(sale.items()[0].discount_percentage(), dec!(20));
    }

    #[test]
    fn test_cancelled_item_does_not_block_new_item_for_same_product() {
        let mut sale = test_sale();
        let product = Uuid::new_v4();

        sale.add_item(product, "Widget".to_string(), 5, dec!(100.00))
            .unwrap();
        let item_id = sale.items()[0].id();
        sale.cancel_item(item_id).unwrap();

        // a fresh active item is created rather than merging into the
        // cancelled one
        sale.add_item(product, "Widget".to_string(), 3, dec!(100.00))
            .unwrap();

        assert_eq!(sale.items().len(), 2);
        let active: Vec<_> = sale.items().iter().filter(|i| !i.is_cancelled()).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].quantity(), 3);
    }

    #[test]
    fn test_remove_item_leaves_no_trace() {
        let mut sale = test_sale();
        sale.add_item(Uuid::new_v4(), "Widget".to_string(), 5, dec!(100.00))
            .unwrap();
        let item_id = sale.items()[0].id();

        sale.remove_item(item_id).unwrap();
        assert!(sale.items().is_empty());
        assert_eq!(sale.total_amount(), Decimal::ZERO);
    }

    #[test]
    fn test_remove_unknown_item_fails() {
        let mut sale = test_sale();
        let missing = Uuid::new_v4();
        assert_eq!(
            sale.remove_item(missing),
            Err(DomainError::ItemNotFound(missing))
        );
    }

    #[test]
    fn test_update_quantity_recomputes_discount() {
        let mut sale = test_sale();
        sale.add_item(Uuid::new_v4(), "Widget".to_string(), 5, dec!(100.00))
            .unwrap();
        let item_id = sale.items()[0].id();

        sale.update_item_quantity(item_id, 15).unwrap();
        assert_eq!(sale.items()[0].quantity(), 15);
        assert_eq!(sale.items()[0].discount_percentage(), dec!(20));

        sale.update_item_quantity(item_id, 2).unwrap();
        assert_eq!(sale.items()[0].quantity(), 2);
        assert_eq!(sale.items()[0].discount_percentage(), Decimal::ZERO);
    }

    #[test]
    fn test_update_quantity_above_cap_fails() {
        let mut sale = test_sale();
        sale.add_item(Uuid::new_v4(), "Widget".to_string(), 5, dec!(100.00))
            .unwrap();
        let item_id = sale.items()[0].id();

        assert_eq!(
            sale.update_item_quantity(item_id, 21),
            Err(DomainError::QuantityAboveLimit)
        );
        assert_eq!(sale.items()[0].quantity(), 5);
    }

    #[test]
    fn test_update_quantity_to_zero_cancels_item() {
        let mut sale = test_sale();
        sale.add_item(Uuid::new_v4(), "Widget".to_string(), 5, dec!(100.00))
            .unwrap();
        let item_id = sale.items()[0].id();

        sale.update_item_quantity(item_id, 0).unwrap();

        let item = &sale.items()[0];
        assert!(item.is_cancelled());
        // historical quantity and discount are retained, not zeroed
        assert_eq!(item.quantity(), 5);
        assert_eq!(item.discount_percentage(), dec!(10));
        assert_eq!(sale.total_amount(), Decimal::ZERO);
    }

    #[test]
    fn test_update_quantity_on_cancelled_item_fails() {
        let mut sale = test_sale();
        sale.add_item(Uuid::new_v4(), "Widget".to_string(), 5, dec!(100.00))
            .unwrap();
        let item_id = sale.items()[0].id();
        sale.cancel_item(item_id).unwrap();

        assert_eq!(
            sale.update_item_quantity(item_id, 3),
            Err(DomainError::ItemAlreadyCancelled(item_id))
        );
    }

    #[test]
    fn test_cancel_item_excludes_it_from_total() {
        let mut sale = test_sale();
        sale.add_item(Uuid::new_v4(), "Widget".to_string(), 15, dec!(100.00))
            .unwrap();
        let item_id = sale.items()[0].id();
        assert_eq!(sale.total_amount(), dec!(1200.0000));

        sale.cancel_item(item_id).unwrap();

        assert_eq!(sale.total_amount(), Decimal::ZERO);
        let item = &sale.items()[0];
        assert!(item.is_cancelled());
        assert_eq!(item.quantity(), 15);
        assert_eq!(item.discount_percentage(), dec!(20));
    }

    #[test]
    fn test_cancel_item_event_order() {
        let mut sale = test_sale();
        sale.add_item(Uuid::new_v4(), "Widget".to_string(), 5, dec!(100.00))
            .unwrap();
        let item_id = sale.items()[0].id();
        sale.clear_domain_events();

        sale.cancel_item(item_id).unwrap();

        let events = sale.domain_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type(), "ItemCancelled");
        assert_eq!(events[1].event_type(), "SaleModified");

        match &events[1] {
            SaleEvent::SaleModified { total_amount, .. } => {
                assert_eq!(*total_amount, Decimal::ZERO);
            }
            other => panic!("expected SaleModified, got {:?}", other),
        }
    }

    #[test]
    fn test_cancel_item_twice_fails() {
        let mut sale = test_sale();
        sale.add_item(Uuid::new_v4(), "Widget".to_string(), 5, dec!(100.00))
            .unwrap();
        let item_id = sale.items()[0].id();

        sale.cancel_item(item_id).unwrap();
        assert_eq!(
            sale.cancel_item(item_id),
            Err(DomainError::ItemAlreadyCancelled(item_id))
        );
    }

    #[test]
    fn test_cancel_is_terminal() {
        let mut sale = test_sale();
        sale.add_item(Uuid::new_v4(), "Widget".to_string(), 5, dec!(100.00))
            .unwrap();
        let item_id = sale.items()[0].id();

        sale.cancel().unwrap();
        assert_eq!(sale.status(), SaleStatus::Cancelled);
        sale.clear_domain_events();

        assert_eq!(
            sale.add_item(Uuid::new_v4(), "Gadget".to_string(), 1, dec!(10.00)),
            Err(DomainError::SaleCancelled)
        );
        assert_eq!(sale.remove_item(item_id), Err(DomainError::SaleCancelled));
        assert_eq!(
            sale.update_item_quantity(item_id, 3),
            Err(DomainError::SaleCancelled)
        );
        assert_eq!(sale.cancel_item(item_id), Err(DomainError::SaleCancelled));
        assert_eq!(sale.cancel(), Err(DomainError::SaleAlreadyCancelled));

        // no notifications beyond the original SaleCancelled
        assert!(sale.domain_events().is_empty());
    }

    #[test]
    fn test_cancel_emits_sale_cancelled() {
        let mut sale = test_sale();
        sale.clear_domain_events();

        sale.cancel().unwrap();

        assert_eq!(sale.domain_events().len(), 1);
        assert_eq!(sale.domain_events()[0].event_type(), "SaleCancelled");
        assert!(sale.updated_at().is_some());
    }

    #[test]
    fn test_validate_accumulates_all_violations() {
        let sale = Sale::create(String::new(), String::new(), String::new());
        let result = sale.validate();

        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 4);
        assert!(result.errors()[0].contains("Sale number"));
        assert!(result.errors()[1].contains("Customer"));
        assert!(result.errors()[2].contains("Branch"));
        assert!(result.errors()[3].contains("at least one active item"));
    }

    #[test]
    fn test_validate_requires_one_active_item() {
        let mut sale = test_sale();
        sale.add_item(Uuid::new_v4(), "Widget".to_string(), 5, dec!(100.00))
            .unwrap();
        let item_id = sale.items()[0].id();
        sale.cancel_item(item_id).unwrap();

        let result = sale.validate();
        assert!(!result.is_valid());
        assert!(result
            .errors()
            .iter()
            .any(|e| e.contains("at least one active item")));
    }

    #[test]
    fn test_validate_rejects_oversized_fields() {
        let sale = Sale::create("x".repeat(51), "c".repeat(201), "b".repeat(201));
        let result = sale.validate();

        assert!(result.errors()[0].contains("50 characters"));
        assert!(result.errors()[1].contains("200 characters"));
        assert!(result.errors()[2].contains("200 characters"));
    }

    #[test]
    fn test_validate_prefixes_item_errors_with_product_name() {
        let mut sale = test_sale();
        sale.add_item(Uuid::new_v4(), "Widget".to_string(), 5, dec!(100.00))
            .unwrap();
        // corrupt the item through storage rehydration to simulate bad data
        let bad_item = SaleItem::from_storage(
            Uuid::new_v4(),
            sale.id(),
            Uuid::new_v4(),
            "Gadget".to_string(),
            2,
            dec!(10.00),
            dec!(10),
            false,
        );
        let mut sale = Sale::from_storage(
            sale.id(),
            sale.sale_number().to_string(),
            sale.sale_date(),
            sale.customer().to_string(),
            sale.branch().to_string(),
            sale.status(),
            vec![sale.items()[0].clone(), bad_item],
            sale.created_at(),
            sale.updated_at(),
            1,
        );

        let result = sale.validate();
        assert!(!result.is_valid());
        assert!(result.errors()[0].starts_with("Gadget:"));
        assert!(result.errors()[0].contains("discount"));

        // rehydration records no events
        assert!(sale.domain_events().is_empty());
        sale.clear_domain_events();
    }

    #[test]
    fn test_valid_sale_passes_validation() {
        let mut sale = test_sale();
        sale.add_item(Uuid::new_v4(), "Widget".to_string(), 5, dec!(100.00))
            .unwrap();

        let result = sale.validate();
        assert!(result.is_valid());
        assert!(result.into_result().is_ok());
    }

    #[test]
    fn test_clear_domain_events() {
        let mut sale = test_sale();
        sale.add_item(Uuid::new_v4(), "Widget".to_string(), 5, dec!(100.00))
            .unwrap();
        assert_eq!(sale.domain_events().len(), 2);

        sale.clear_domain_events();
        assert!(sale.domain_events().is_empty());
    }

    #[test]
    fn test_fresh_sale_scenario_three_units_no_discount() {
        let mut sale = test_sale();
        sale.add_item(Uuid::new_v4(), "Gadget".to_string(), 3, dec!(50.00))
            .unwrap();

        let item = &sale.items()[0];
        assert_eq!(item.discount_percentage(), Decimal::ZERO);
        assert_eq!(sale.total_amount(), dec!(150.00));
    }

    #[test]
    fn test_total_spans_multiple_items() {
        let mut sale = test_sale();
        sale.add_item(Uuid::new_v4(), "Widget".to_string(), 5, dec!(100.00))
            .unwrap();
        sale.add_item(Uuid::new_v4(), "Gadget".to_string(), 3, dec!(50.00))
            .unwrap();
        sale.add_item(Uuid::new_v4(), "Doohickey".to_string(), 10, dec!(1.00))
            .unwrap();

        // 450 + 150 + 8
        assert_eq!(sale.total_amount(), dec!(608.0000));
    }
}
