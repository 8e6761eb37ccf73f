/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Backend message fragments that signal an optimistic-lock failure.
///
/// The ERP backend does not always answer a plain 409: depending on which
/// layer trips the lock, the marker may only appear in the error message.
/// Matching is case-insensitive.
const CONFLICT_MARKERS: &[&str] = &[
    "updated or deleted by another transaction",
    "version conflict",
    "stale object state",
    "objectoptimisticlockingfailureexception",
];

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Validation errors for business rules, local or backend-reported
    #[error("Validation error: {0}")]
    Validation(String),

    /// Optimistic concurrency conflict reported by the backend
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Transport-level failures (connection, timeout, TLS)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend rejected the request for a non-validation, non-conflict reason
    #[error("Backend error: {0}")]
    Backend(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

// Helper functions for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound(resource.into())
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        AppError::Backend(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }

    /// Whether this error represents an optimistic concurrency conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, AppError::Conflict(_))
    }
}

/// Classifies a backend error message as an optimistic-lock conflict.
///
/// A 404 is never a conflict and is handled before this check; here only the
/// message text matters.
pub fn is_conflict_message(message: &str) -> bool {
    let lowered = message.to_lowercase();
    CONFLICT_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}
