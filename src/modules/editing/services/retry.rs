use std::future::Future;
use std::time::Duration;
use tracing::warn;

use crate::config::EditingConfig;
use crate::core::Result;

/// Backoff tuning for conflict-prone reads.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the initial attempt.
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(300),
            max_delay: Duration::from_millis(2000),
            backoff_multiplier: 1.5,
        }
    }
}

impl From<&EditingConfig> for RetryPolicy {
    fn from(config: &EditingConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay: Duration::from_millis(config.base_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
            backoff_multiplier: config.backoff_multiplier,
        }
    }
}

impl RetryPolicy {
    /// Delay before retry `attempt` (0-based): base × multiplier^attempt,
    /// capped at `max_delay`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = self.backoff_multiplier.powi(attempt as i32);
        let millis = (self.base_delay.as_millis() as f64 * factor) as u64;
        Duration::from_millis(millis).min(self.max_delay)
    }
}

/// Run an idempotent operation, retrying conflict-classified failures with
/// exponential backoff. Any other error, and any conflict past the retry
/// budget, is returned unchanged.
///
/// Write submissions must not go through here: a conflicting create or
/// update is surfaced immediately so the caller can reload authoritative
/// state before deciding anything.
pub async fn run_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    operation_name: &str,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if error.is_conflict() && attempt < policy.max_retries => {
                let delay = policy.delay_for(attempt);
                warn!(
                    "{} hit a conflict (attempt {} of {}), retrying in {:?}",
                    operation_name,
                    attempt + 1,
                    policy.max_retries,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}
