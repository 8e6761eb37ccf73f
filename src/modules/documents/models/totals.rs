use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The three derived document totals, partitioned by item category.
///
/// Also serves as the partial-update body for the totals write-back: it
/// serializes to exactly the three fields the backend patches on the parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTotals {
    pub total_products: Decimal,
    pub total_services: Decimal,
    pub total_document: Decimal,
}

impl DocumentTotals {
    pub fn zero() -> Self {
        Self {
            total_products: Decimal::ZERO,
            total_services: Decimal::ZERO,
            total_document: Decimal::ZERO,
        }
    }
}

impl Default for DocumentTotals {
    fn default() -> Self {
        Self::zero()
    }
}
