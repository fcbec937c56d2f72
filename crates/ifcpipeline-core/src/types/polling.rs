//! Per-invocation polling budget.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// How often and how long a submitted job is observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PollingPolicy {
    /// Seconds to sleep before each status check.
    #[validate(range(min = 1))]
    pub interval_seconds: u64,
    /// Seconds after submission at which observation stops.
    #[validate(range(min = 1))]
    pub timeout_seconds: u64,
}

impl PollingPolicy {
    /// Create a policy from interval and timeout seconds.
    pub fn new(interval_seconds: u64, timeout_seconds: u64) -> Self {
        Self {
            interval_seconds,
            timeout_seconds,
        }
    }

    /// Sleep between status checks.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    /// Total observation budget.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for PollingPolicy {
    fn default() -> Self {
        Self::new(2, 300)
    }
}
