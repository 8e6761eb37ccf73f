use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;

/// Connection settings for the ERP backend that owns all persistent state.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend API, without a trailing slash.
    pub base_url: String,
    /// Bearer token attached to every request when set.
    pub bearer_token: Option<String>,
    pub timeout_secs: u64,
}

impl BackendConfig {
    pub fn from_env() -> Result<Self> {
        Ok(BackendConfig {
            base_url: env::var("BACKEND_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .map_err(|_| AppError::Configuration("BACKEND_BASE_URL not set".to_string()))?,
            bearer_token: env::var("BACKEND_BEARER_TOKEN").ok(),
            timeout_secs: env::var("BACKEND_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| {
                    AppError::Configuration("Invalid BACKEND_TIMEOUT_SECS".to_string())
                })?,
        })
    }
}
