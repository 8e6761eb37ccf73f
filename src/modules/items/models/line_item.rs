// A line item is one purchasable or sellable unit inside a commercial
// document (sale, purchase or order). The backend owns persistence; this
// model mirrors its wire DTO and carries the two derived money fields that
// the recompute service maintains. Derived fields are never edited directly:
// any change to quantity, unit price or discount goes through recompute().

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::unit_type::UnitType;
use crate::core::{AppError, Identified, Result};
use crate::modules::items::services::item_totals::ItemTotalsCalculator;

/// Category a line item contributes its total to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemCategory {
    Product,
    Service,
}

/// Represents a single line item in a commercial document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Server-assigned identifier; absent until the backend accepts the item
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    /// Parent document reference
    pub document_id: Uuid,

    /// 1-based position within the document
    #[serde(default)]
    pub item_seq: u32,

    /// Product catalog reference; mutually exclusive with `service_id`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<Uuid>,

    /// Service catalog reference; mutually exclusive with `product_id`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<Uuid>,

    /// Backend discriminator kept in sync with the reference fields
    #[serde(default)]
    pub is_product: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_type: Option<UnitType>,

    /// Quantity input; a missing value computes as zero
    pub quantity: Option<Decimal>,

    /// Unit price input; a missing value computes as zero
    pub unit_price: Option<Decimal>,

    /// Percentage discount input, expected in [0, 100]
    pub discount_percentage: Option<Decimal>,

    /// Derived: gross × discount percentage / 100
    #[serde(default)]
    pub discount_value: Decimal,

    /// Derived: gross − discount, clamped at zero
    #[serde(default)]
    pub total_value: Decimal,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl LineItem {
    /// Create a blank draft item for a document, positioned at `item_seq`.
    pub fn new(document_id: Uuid, item_seq: u32) -> Self {
        Self {
            id: None,
            document_id,
            item_seq,
            product_id: None,
            service_id: None,
            is_product: false,
            description: None,
            unit_type: None,
            quantity: None,
            unit_price: None,
            discount_percentage: None,
            discount_value: Decimal::ZERO,
            total_value: Decimal::ZERO,
            observation: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Which total bucket this item contributes to, if any.
    ///
    /// An item referencing neither a product nor a service belongs to no
    /// bucket; it is a degenerate row, not an error.
    pub fn category(&self) -> Option<ItemCategory> {
        if self.product_id.is_some() {
            Some(ItemCategory::Product)
        } else if self.service_id.is_some() {
            Some(ItemCategory::Service)
        } else {
            None
        }
    }

    /// Point this item at a product, clearing any service reference.
    pub fn set_product(&mut self, product_id: Option<Uuid>) {
        self.product_id = product_id;
        if product_id.is_some() {
            self.service_id = None;
        }
        self.is_product = self.product_id.is_some();
    }

    /// Point this item at a service, clearing any product reference.
    pub fn set_service(&mut self, service_id: Option<Uuid>) {
        self.service_id = service_id;
        if service_id.is_some() {
            self.product_id = None;
        }
        self.is_product = self.product_id.is_some();
    }

    /// Recompute both derived fields from the current inputs.
    ///
    /// Infallible and idempotent; missing inputs count as zero and a
    /// negative result clamps to zero.
    pub fn recompute(&mut self) {
        let (discount_value, total_value) = ItemTotalsCalculator::derive(
            self.quantity,
            self.unit_price,
            self.discount_percentage,
        );
        self.discount_value = discount_value;
        self.total_value = total_value;
    }

    /// Validate the item before it is sent to the backend
    ///
    /// # Returns
    /// * `Result<()>` - Ok when the item is acceptable, validation error otherwise
    pub fn validate(&self) -> Result<()> {
        Self::validate_reference(self.product_id, self.service_id)?;
        Self::validate_quantity(self.quantity)?;
        Self::validate_unit_price(self.unit_price)?;
        Self::validate_discount_percentage(self.discount_percentage)?;
        Ok(())
    }

    /// Validate that the item references a product or a service
    fn validate_reference(product_id: Option<Uuid>, service_id: Option<Uuid>) -> Result<()> {
        if product_id.is_none() && service_id.is_none() {
            return Err(AppError::validation(
                "Line item must reference a product or a service",
            ));
        }

        Ok(())
    }

    /// Validate quantity (must be non-negative when present)
    fn validate_quantity(quantity: Option<Decimal>) -> Result<()> {
        if let Some(quantity) = quantity {
            if quantity < Decimal::ZERO {
                return Err(AppError::validation(format!(
                    "Quantity must be non-negative, got: {}",
                    quantity
                )));
            }
        }

        Ok(())
    }

    /// Validate unit price (must be non-negative when present)
    fn validate_unit_price(unit_price: Option<Decimal>) -> Result<()> {
        if let Some(unit_price) = unit_price {
            if unit_price < Decimal::ZERO {
                return Err(AppError::validation(format!(
                    "Unit price must be non-negative, got: {}",
                    unit_price
                )));
            }
        }

        Ok(())
    }

    /// Validate discount percentage (must be within [0, 100] when present)
    fn validate_discount_percentage(discount_percentage: Option<Decimal>) -> Result<()> {
        if let Some(pct) = discount_percentage {
            if pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED {
                return Err(AppError::validation(format!(
                    "Discount percentage must be between 0 and 100, got: {}",
                    pct
                )));
            }
        }

        Ok(())
    }
}

impl Identified for LineItem {
    fn id(&self) -> Option<Uuid> {
        self.id
    }
}
