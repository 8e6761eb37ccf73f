// A document is the parent aggregate of a set of line items: a sale, a
// purchase or an order. Its three totals are derived from the items and the
// backend holds the authoritative copy, guarded by an optimistic-lock
// version token that this client carries around but never interprets.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::totals::DocumentTotals;
use crate::core::{AppError, Identified, Result};

/// Which commercial collection a document belongs to.
///
/// The kind is not a wire field; it selects the backend collection the
/// document lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Sale,
    Purchase,
    Order,
}

impl DocumentKind {
    /// Backend collection segment for URL construction.
    pub fn collection(&self) -> &'static str {
        match self {
            DocumentKind::Sale => "sales",
            DocumentKind::Purchase => "purchases",
            DocumentKind::Order => "orders",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentKind::Sale => write!(f, "sale"),
            DocumentKind::Purchase => write!(f, "purchase"),
            DocumentKind::Order => write!(f, "order"),
        }
    }
}

/// Document status lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    /// Freshly created, still being edited
    Draft,

    /// Accepted by the business, still editable
    Confirmed,

    /// Terminal; no further edits accepted
    Cancelled,
}

impl Default for DocumentStatus {
    fn default() -> Self {
        DocumentStatus::Draft
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentStatus::Draft => write!(f, "DRAFT"),
            DocumentStatus::Confirmed => write!(f, "CONFIRMED"),
            DocumentStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

impl std::str::FromStr for DocumentStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DRAFT" => Ok(DocumentStatus::Draft),
            "CONFIRMED" => Ok(DocumentStatus::Confirmed),
            "CANCELLED" => Ok(DocumentStatus::Cancelled),
            _ => Err(format!("Invalid document status: {}", s)),
        }
    }
}

/// Document-level financial adjustments, flattened into the document on the
/// wire. The discount value is derived from the percentage and the item
/// total; freight is a plain input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFinancial {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freight_value: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<Decimal>,

    /// Derived: item total × percentage / 100, rounded to money scale
    #[serde(default)]
    pub discount_value: Decimal,
}

/// Represents a commercial document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Server-assigned identifier; absent until the backend accepts it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<Uuid>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<Uuid>,

    #[serde(default)]
    pub status: DocumentStatus,

    /// Derived: sum of item totals whose item references a product
    #[serde(default)]
    pub total_products: Decimal,

    /// Derived: sum of item totals whose item references a service
    #[serde(default)]
    pub total_services: Decimal,

    /// Derived: product and service totals plus document-level adjustments
    #[serde(default)]
    pub total_document: Decimal,

    #[serde(flatten)]
    pub financial: DocumentFinancial,

    /// Opaque optimistic-lock token; echoed back on update, never inspected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Document {
    /// Create an empty draft document with all totals at zero.
    pub fn new() -> Self {
        Self {
            id: None,
            customer_id: None,
            company_id: None,
            status: DocumentStatus::Draft,
            total_products: Decimal::ZERO,
            total_services: Decimal::ZERO,
            total_document: Decimal::ZERO,
            financial: DocumentFinancial::default(),
            version: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Copy a freshly derived set of totals onto the document.
    pub fn apply_totals(&mut self, totals: &DocumentTotals) {
        self.total_products = totals.total_products;
        self.total_services = totals.total_services;
        self.total_document = totals.total_document;
    }

    /// Whether the document still accepts edits.
    pub fn is_editable(&self) -> bool {
        self.status != DocumentStatus::Cancelled
    }

    /// Validate the document before it is sent to the backend
    pub fn validate(&self) -> Result<()> {
        if let Some(freight) = self.financial.freight_value {
            if freight < Decimal::ZERO {
                return Err(AppError::validation(format!(
                    "Freight value must be non-negative, got: {}",
                    freight
                )));
            }
        }

        if let Some(pct) = self.financial.discount_percentage {
            if pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED {
                return Err(AppError::validation(format!(
                    "Document discount percentage must be between 0 and 100, got: {}",
                    pct
                )));
            }
        }

        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Identified for Document {
    fn id(&self) -> Option<Uuid> {
        self.id
    }
}
