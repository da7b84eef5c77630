//! Discount tiers
//!
//! Quantity-based discount rules for sale items.
//! The discount is a function of the quantity alone; it is recomputed every
//! time a quantity changes and stored on the item so it survives persistence.

use rust_decimal::Decimal;

/// Hard cap on identical items per sale
pub const MAX_QUANTITY_PER_PRODUCT: i32 = 20;

/// Minimum quantity for the 10% tier
const TEN_PERCENT_THRESHOLD: i32 = 4;

/// Minimum quantity for the 20% tier
const TWENTY_PERCENT_THRESHOLD: i32 = 10;

/// Discount percentage for a given quantity.
///
/// Tiers:
/// - below 4 items: no discount
/// - 4 to 9 items: 10%
/// - 10 to 20 items: 20%
///
/// Quantities above [`MAX_QUANTITY_PER_PRODUCT`] are rejected by the
/// aggregate before this function is consulted.
pub fn discount_for_quantity(quantity: i32) -> Decimal {
    if quantity >= TWENTY_PERCENT_THRESHOLD {
        Decimal::new(20, 0)
    } else if quantity >= TEN_PERCENT_THRESHOLD {
        Decimal::new(10, 0)
    } else {
        Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn no_discount_below_four() {
        for quantity in 1..4 {
            assert_eq!(discount_for_quantity(quantity), Decimal::ZERO);
        }
    }

    #[test]
    fn ten_percent_from_four_to_nine() {
        for quantity in 4..10 {
            assert_eq!(discount_for_quantity(quantity), dec!(10));
        }
    }

    #[test]
    fn twenty_percent_from_ten_to_twenty() {
        for quantity in 10..=20 {
            assert_eq!(discount_for_quantity(quantity), dec!(20));
        }
    }

    #[test]
    fn tier_boundaries() {
        // 4 belongs to the 10% tier, 10 belongs to the 20% tier
        assert_eq!(discount_for_quantity(3), Decimal::ZERO);
        assert_eq!(discount_for_quantity(4), dec!(10));
        assert_eq!(discount_for_quantity(9), dec!(10));
        assert_eq!(discount_for_quantity(10), dec!(20));
    }
}
