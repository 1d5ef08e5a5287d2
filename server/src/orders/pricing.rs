//! Pricing
//!
//! Pure decimal arithmetic for order totals. Prices come exclusively
//! from catalog snapshots; nothing here ever touches a float. All
//! arithmetic is checked: an amount outside the representable decimal
//! range is a validation error, never a panic.

use rust_decimal::{Decimal, RoundingStrategy};
use shared::models::ChosenOption;

use crate::utils::{AppError, AppResult};

/// Monetary values are rounded to 2 decimal places, half-up
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed quantity per line
pub const MAX_QUANTITY: i64 = 9999;

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

fn amount_overflow() -> AppError {
    AppError::validation("Order amount exceeds the representable range")
}

/// `(base_price + Σ option additional_price) × quantity`
pub fn line_subtotal(
    base_price: Decimal,
    options: &[ChosenOption],
    quantity: i64,
) -> AppResult<Decimal> {
    let mut unit_price = base_price;
    for opt in options {
        unit_price = unit_price
            .checked_add(opt.additional_price)
            .ok_or_else(amount_overflow)?;
    }
    let subtotal = unit_price
        .checked_mul(Decimal::from(quantity))
        .ok_or_else(amount_overflow)?;
    Ok(round_money(subtotal))
}

/// Sum of line subtotals
pub fn order_total<'a>(subtotals: impl IntoIterator<Item = &'a Decimal>) -> AppResult<Decimal> {
    let mut total = Decimal::ZERO;
    for subtotal in subtotals {
        total = total.checked_add(*subtotal).ok_or_else(amount_overflow)?;
    }
    Ok(round_money(total))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn option(price: &str) -> ChosenOption {
        ChosenOption {
            option_id: 10,
            group_name: "Size".to_string(),
            name: "Large".to_string(),
            additional_price: dec(price),
        }
    }

    #[test]
    fn base_price_times_quantity() {
        assert_eq!(line_subtotal(dec("8.00"), &[], 3).unwrap(), dec("24.00"));
    }

    #[test]
    fn options_are_added_before_multiplying() {
        // (8.00 + 1.50) × 2 = 19.00
        let subtotal = line_subtotal(dec("8.00"), &[option("1.50")], 2).unwrap();
        assert_eq!(subtotal, dec("19.00"));
    }

    #[test]
    fn several_options_accumulate() {
        let opts = [option("1.50"), option("0.25"), option("0.00")];
        assert_eq!(line_subtotal(dec("4.10"), &opts, 1).unwrap(), dec("5.85"));
    }

    #[test]
    fn no_drift_across_repeated_computation() {
        // 0.10 famously drifts in binary floating point; decimals must not
        let subtotal = line_subtotal(dec("0.10"), &[], 3).unwrap();
        assert_eq!(subtotal, dec("0.30"));
        let total = order_total(std::iter::repeat_n(&subtotal, 100)).unwrap();
        assert_eq!(total, dec("30.00"));
    }

    #[test]
    fn order_total_sums_lines() {
        let lines = [dec("19.00"), dec("5.85"), dec("0.30")];
        assert_eq!(order_total(lines.iter()).unwrap(), dec("25.15"));
        assert_eq!(order_total([].iter()).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn overflowing_amount_is_an_error_not_a_panic() {
        // representable on its own, but × MAX_QUANTITY is not
        let huge = dec("1000000000000000000000000000");
        let err = line_subtotal(huge, &[], MAX_QUANTITY).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let near_max = dec("79000000000000000000000000000");
        let err = order_total([near_max, near_max].iter()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
