//! Default job polling configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::polling::PollingPolicy;

/// Defaults applied to job-producing operations unless overridden per call.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PollingConfig {
    /// Seconds to sleep between status checks.
    #[serde(default = "default_interval")]
    #[validate(range(min = 1))]
    pub interval_seconds: u64,
    /// Seconds after submission before the client stops observing a job.
    #[serde(default = "default_timeout")]
    #[validate(range(min = 1))]
    pub timeout_seconds: u64,
    /// Whether operations wait for submitted jobs to finish.
    #[serde(default = "default_true")]
    pub wait_for_completion: bool,
}

impl PollingConfig {
    /// The polling policy described by this section.
    pub fn policy(&self) -> PollingPolicy {
        PollingPolicy {
            interval_seconds: self.interval_seconds,
            timeout_seconds: self.timeout_seconds,
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_interval(),
            timeout_seconds: default_timeout(),
            wait_for_completion: true,
        }
    }
}

fn default_interval() -> u64 {
    2
}

fn default_timeout() -> u64 {
    300
}

fn default_true() -> bool {
    true
}
