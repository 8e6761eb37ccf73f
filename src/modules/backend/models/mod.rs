mod api_error;
mod page;

pub use api_error::ApiErrorBody;
pub use page::{ListEnvelope, Page};
