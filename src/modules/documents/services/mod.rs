pub mod document_totals;

pub use document_totals::DocumentTotalsCalculator;
