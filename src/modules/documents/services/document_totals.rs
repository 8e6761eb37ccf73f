use rust_decimal::Decimal;

use crate::core::money;
use crate::modules::documents::models::{DocumentFinancial, DocumentTotals};
use crate::modules::items::models::{ItemCategory, LineItem};

/// Calculator for document-level derived totals
///
/// Pure over its inputs: a single pass over the item collection, no item
/// mutation, and no way to fail. Items referencing neither a product nor a
/// service contribute to no bucket.
pub struct DocumentTotalsCalculator;

impl DocumentTotalsCalculator {
    /// Sum item totals into the three document buckets.
    ///
    /// Formula:
    ///   total_products = Σ total_value over items referencing a product
    ///   total_services = Σ total_value over items referencing a service
    ///   total_document = total_products + total_services
    ///
    /// An empty collection yields all zeroes.
    pub fn aggregate(items: &[LineItem]) -> DocumentTotals {
        let mut totals = DocumentTotals::zero();

        for item in items {
            match item.category() {
                Some(ItemCategory::Product) => totals.total_products += item.total_value,
                Some(ItemCategory::Service) => totals.total_services += item.total_value,
                None => {}
            }
        }

        totals.total_document = totals.total_products + totals.total_services;
        totals
    }

    /// Derive the document-level discount value from the item total and the
    /// configured percentage, rounded to money scale.
    pub fn derive_discount_value(items_total: Decimal, discount_percentage: Option<Decimal>) -> Decimal {
        let pct = discount_percentage
            .unwrap_or(Decimal::ZERO)
            .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);

        money::round_money(items_total * pct / Decimal::ONE_HUNDRED)
    }

    /// Final document total once freight and document discount are applied,
    /// clamped at zero.
    pub fn apply_financial(totals: &DocumentTotals, financial: &DocumentFinancial) -> Decimal {
        let freight = financial.freight_value.unwrap_or(Decimal::ZERO);

        (totals.total_document + freight - financial.discount_value).max(Decimal::ZERO)
    }
}
