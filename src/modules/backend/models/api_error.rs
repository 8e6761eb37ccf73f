use serde::Deserialize;

/// Error body shape produced by the backend: a `message` field, sometimes an
/// `error` field, plus extra fields this client ignores.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    /// Best-effort extraction of a human-readable message from a raw error
    /// body. Falls back to the trimmed body itself when it is not the
    /// expected JSON shape.
    pub fn extract_message(raw: &str) -> String {
        match serde_json::from_str::<ApiErrorBody>(raw) {
            Ok(body) => body
                .message
                .or(body.error)
                .unwrap_or_else(|| raw.trim().to_string()),
            Err(_) => raw.trim().to_string(),
        }
    }
}
