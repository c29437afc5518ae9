use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use crate::kernel::ActivityQueueConfig;

/// Ledger configuration loaded from environment variables. Every knob has a
/// default, so an empty environment is valid.
#[derive(Debug, Clone)]
pub struct Config {
    pub queue_capacity: usize,
    pub queue_max_attempts: u32,
    pub queue_retry_backoff_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            queue_capacity: env::var("ACTIVITY_QUEUE_CAPACITY")
                .unwrap_or_else(|_| "1024".to_string())
                .parse()
                .context("ACTIVITY_QUEUE_CAPACITY must be a valid number")?,
            queue_max_attempts: env::var("ACTIVITY_QUEUE_MAX_ATTEMPTS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .context("ACTIVITY_QUEUE_MAX_ATTEMPTS must be a valid number")?,
            queue_retry_backoff_ms: env::var("ACTIVITY_QUEUE_RETRY_BACKOFF_MS")
                .unwrap_or_else(|_| "250".to_string())
                .parse()
                .context("ACTIVITY_QUEUE_RETRY_BACKOFF_MS must be a valid number")?,
        })
    }

    pub fn queue_config(&self) -> ActivityQueueConfig {
        ActivityQueueConfig {
            capacity: self.queue_capacity,
            max_attempts: self.queue_max_attempts,
            retry_backoff: Duration::from_millis(self.queue_retry_backoff_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_env_unset() {
        // Not touching the process env here; rely on these vars being unset
        // in the test environment.
        let config = Config::from_env().unwrap();
        assert_eq!(config.queue_capacity, 1024);
        assert_eq!(config.queue_max_attempts, 3);

        let queue = config.queue_config();
        assert_eq!(queue.retry_backoff, Duration::from_millis(250));
    }
}
