mod document;
mod totals;

pub use document::{Document, DocumentFinancial, DocumentKind, DocumentStatus};
pub use totals::DocumentTotals;
