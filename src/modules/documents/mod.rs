// Documents module

pub mod models;
pub mod services;

pub use models::{Document, DocumentFinancial, DocumentKind, DocumentStatus, DocumentTotals};
pub use services::DocumentTotalsCalculator;
