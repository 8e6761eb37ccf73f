use rust_decimal::Decimal;

use crate::modules::items::models::LineItem;

/// Calculator for line item derived totals
///
/// All derivations are pure: the same inputs always produce the same outputs,
/// nothing outside the arguments is read or written, and no input can make
/// them fail. Missing inputs count as zero, the discount percentage is
/// clamped into [0, 100], and a negative result clamps to zero.
pub struct ItemTotalsCalculator;

impl ItemTotalsCalculator {
    /// Derive `(discount value, total value)` from the three numeric inputs.
    ///
    /// Formula:
    ///   gross    = quantity × unit price
    ///   discount = gross × percentage / 100
    ///   total    = max(0, gross − discount)
    ///
    /// Intermediates keep full precision; rounding happens only at display
    /// and persistence boundaries.
    pub fn derive(
        quantity: Option<Decimal>,
        unit_price: Option<Decimal>,
        discount_percentage: Option<Decimal>,
    ) -> (Decimal, Decimal) {
        let quantity = quantity.unwrap_or(Decimal::ZERO);
        let unit_price = unit_price.unwrap_or(Decimal::ZERO);
        let pct = discount_percentage
            .unwrap_or(Decimal::ZERO)
            .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);

        let gross = quantity * unit_price;
        let discount_value = gross * pct / Decimal::ONE_HUNDRED;
        let total_value = (gross - discount_value).max(Decimal::ZERO);

        (discount_value, total_value)
    }

    /// Return a copy of `item` with both derived fields recomputed.
    pub fn recompute(item: &LineItem) -> LineItem {
        let mut next = item.clone();
        next.recompute();
        next
    }
}
