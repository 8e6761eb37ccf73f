use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;

pub mod backend;

pub use backend::BackendConfig;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub backend: BackendConfig,
    pub editing: EditingConfig,
}

/// Tuning for the editing workflow: how long to wait before reloading after
/// an optimistic-lock conflict, and how reads back off when retried.
#[derive(Debug, Clone, Deserialize)]
pub struct EditingConfig {
    pub conflict_reload_delay_ms: u64,
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
}

impl Default for EditingConfig {
    fn default() -> Self {
        EditingConfig {
            conflict_reload_delay_ms: 2000,
            max_retries: 3,
            base_delay_ms: 300,
            max_delay_ms: 2000,
            backoff_multiplier: 1.5,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let defaults = EditingConfig::default();
        let config = Config {
            backend: BackendConfig::from_env()?,
            editing: EditingConfig {
                conflict_reload_delay_ms: env::var("CONFLICT_RELOAD_DELAY_MS")
                    .unwrap_or_else(|_| defaults.conflict_reload_delay_ms.to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid CONFLICT_RELOAD_DELAY_MS".to_string())
                    })?,
                max_retries: env::var("CONFLICT_MAX_RETRIES")
                    .unwrap_or_else(|_| defaults.max_retries.to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid CONFLICT_MAX_RETRIES".to_string())
                    })?,
                base_delay_ms: env::var("CONFLICT_BASE_DELAY_MS")
                    .unwrap_or_else(|_| defaults.base_delay_ms.to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid CONFLICT_BASE_DELAY_MS".to_string())
                    })?,
                max_delay_ms: env::var("CONFLICT_MAX_DELAY_MS")
                    .unwrap_or_else(|_| defaults.max_delay_ms.to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid CONFLICT_MAX_DELAY_MS".to_string())
                    })?,
                backoff_multiplier: env::var("CONFLICT_BACKOFF_MULTIPLIER")
                    .unwrap_or_else(|_| defaults.backoff_multiplier.to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid CONFLICT_BACKOFF_MULTIPLIER".to_string())
                    })?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.backend.base_url.is_empty() {
            return Err(AppError::Configuration(
                "Backend base URL must not be empty".to_string(),
            ));
        }

        if !self.backend.base_url.starts_with("http://")
            && !self.backend.base_url.starts_with("https://")
        {
            return Err(AppError::Configuration(
                "Backend base URL must be an http(s) URL".to_string(),
            ));
        }

        if self.backend.timeout_secs == 0 {
            return Err(AppError::Configuration(
                "Backend timeout must be greater than 0".to_string(),
            ));
        }

        if self.editing.backoff_multiplier < 1.0 {
            return Err(AppError::Configuration(
                "Backoff multiplier must be at least 1.0".to_string(),
            ));
        }

        if self.editing.max_delay_ms < self.editing.base_delay_ms {
            return Err(AppError::Configuration(
                "Max retry delay must not be below the base delay".to_string(),
            ));
        }

        Ok(())
    }
}
