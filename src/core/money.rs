use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal scale used for all monetary values at display and persistence
/// boundaries. Intermediate arithmetic keeps full precision.
pub const MONEY_SCALE: u32 = 2;

/// Rounds a monetary value to [`MONEY_SCALE`] using half-up rounding,
/// so 10.005 becomes 10.01.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Validates that a decimal value is a well-formed monetary amount:
/// non-negative with at most [`MONEY_SCALE`] decimal places.
pub fn validate_amount(amount: Decimal) -> Result<(), String> {
    if amount.scale() > MONEY_SCALE {
        return Err(format!(
            "amounts must have at most {} decimal places, got {}",
            MONEY_SCALE,
            amount.scale()
        ));
    }

    if amount < Decimal::ZERO {
        return Err("amount cannot be negative".to_string());
    }

    Ok(())
}

/// Formats an amount for display with exactly [`MONEY_SCALE`] decimal places.
pub fn format_money(amount: Decimal) -> String {
    format!("{:.width$}", round_money(amount), width = MONEY_SCALE as usize)
}
