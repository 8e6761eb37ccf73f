//! Salebook Commercial Documents Library
//!
//! Client-side engine for commercial back-office documents: line item and
//! document total derivation, and the save/reconcile protocol against the
//! ERP backend that owns all persistent state.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use modules::backend;
pub use modules::documents;
pub use modules::editing;
pub use modules::items;
