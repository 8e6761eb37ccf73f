// Backend module

pub mod models;
pub mod services;

pub use models::{ApiErrorBody, ListEnvelope, Page};
pub use services::{CommercialBackend, RestBackend};
