//! Review polling settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Smallest accepted poll interval.
const MIN_POLL_INTERVAL_MS: u64 = 100;

const fn default_poll_interval_ms() -> u64 {
    3000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReviewConfig {
    /// Fixed delay between status fetches while a review is in flight.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl ReviewConfig {
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms < MIN_POLL_INTERVAL_MS {
            return Err(ConfigError::InvalidValue {
                field: "review.poll_interval_ms".into(),
                reason: format!("must be at least {MIN_POLL_INTERVAL_MS}"),
            });
        }
        Ok(())
    }
}
