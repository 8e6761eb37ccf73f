pub mod item_totals;
pub mod sequence;

pub use item_totals::ItemTotalsCalculator;
