//! Sequential batch processing with a continue-on-fail policy.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};

use ifcpipeline_core::result::AppResult;

/// Collects per-item results of a sequential batch.
///
/// Items are recorded in order. With `continue_on_fail`, a failed item is
/// stored as `{"error": message}` and the batch goes on; otherwise the
/// first failure is returned to the caller.
#[derive(Debug)]
pub struct BatchRunner {
    continue_on_fail: bool,
    started_at: DateTime<Utc>,
    results: Vec<Value>,
    failed: usize,
}

/// Outcome of a finished batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub succeeded: usize,
    pub failed: usize,
    /// One entry per item, in input order.
    pub results: Vec<Value>,
}

impl BatchRunner {
    /// Start a batch.
    pub fn new(continue_on_fail: bool) -> Self {
        Self {
            continue_on_fail,
            started_at: Utc::now(),
            results: Vec::new(),
            failed: 0,
        }
    }

    /// Record the result of the next item.
    pub fn record(&mut self, result: AppResult<Value>) -> AppResult<()> {
        let index = self.results.len();
        match result {
            Ok(value) => {
                self.results.push(value);
                Ok(())
            }
            Err(e) if self.continue_on_fail => {
                tracing::warn!(item = index, error = %e, "Batch item failed; continuing");
                self.failed += 1;
                self.results.push(json!({"error": e.message}));
                Ok(())
            }
            Err(e) => {
                tracing::error!(item = index, error = %e, "Batch item failed; aborting");
                Err(e)
            }
        }
    }

    /// Finish the batch.
    pub fn finish(self) -> BatchReport {
        let report = BatchReport {
            started_at: self.started_at,
            finished_at: Utc::now(),
            succeeded: self.results.len() - self.failed,
            failed: self.failed,
            results: self.results,
        };
        tracing::info!(
            succeeded = report.succeeded,
            failed = report.failed,
            "Batch finished"
        );
        report
    }
}
