use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Page envelope returned by the backend's list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}

/// A list endpoint answers either a bare JSON array or a page envelope,
/// depending on backend version. Both shapes unwrap to the same item list.
///
/// The shape is sniffed from the raw value rather than left to an untagged
/// enum: untagged deserialization buffers through `deserialize_any`, which
/// cannot represent plain numbers once `serde_json`'s `arbitrary_precision`
/// feature is enabled.
#[derive(Debug, Clone)]
pub enum ListEnvelope<T> {
    Plain(Vec<T>),
    Paged(Page<T>),
}

impl<T: DeserializeOwned> ListEnvelope<T> {
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        if value.is_array() {
            Ok(ListEnvelope::Plain(serde_json::from_value(value)?))
        } else {
            Ok(ListEnvelope::Paged(serde_json::from_value(value)?))
        }
    }
}

impl<T> ListEnvelope<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListEnvelope::Plain(items) => items,
            ListEnvelope::Paged(page) => page.content,
        }
    }
}
