// Items module

pub mod models;
pub mod services;

pub use models::{ItemCategory, LineItem, UnitType};
pub use services::ItemTotalsCalculator;
