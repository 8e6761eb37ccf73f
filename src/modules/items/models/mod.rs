mod line_item;
mod unit_type;

pub use line_item::{ItemCategory, LineItem};
pub use unit_type::UnitType;
