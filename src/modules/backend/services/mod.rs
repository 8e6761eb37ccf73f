pub mod backend_api;
pub mod rest_client;

pub use backend_api::CommercialBackend;
pub use rest_client::RestBackend;
