//! Remote job observation model.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::result::AppResult;

/// Status of a remote job as observed by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Accepted but not yet started.
    Pending,
    /// Currently executing.
    Running,
    /// Finished successfully.
    Succeeded,
    /// Finished with an error.
    Failed,
}

impl JobStatus {
    /// Map a status string reported by the service.
    ///
    /// The gateway is backed by a task queue whose vocabulary differs from
    /// ours (`queued`, `started`, `finished`, ...), so common synonyms are
    /// accepted. Returns `None` for anything unrecognised.
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" | "queued" | "deferred" | "scheduled" | "created" => Some(Self::Pending),
            "running" | "started" | "in_progress" | "processing" => Some(Self::Running),
            "succeeded" | "success" | "finished" | "completed" | "complete" | "done" => {
                Some(Self::Succeeded)
            }
            "failed" | "failure" | "error" | "stopped" | "canceled" | "cancelled" => {
                Some(Self::Failed)
            }
            _ => None,
        }
    }

    /// Check if the job is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A snapshot of a remote job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Opaque job identifier.
    pub id: String,
    /// Observed status.
    pub status: JobStatus,
    /// Result payload (present once succeeded).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error reported by the service (present once failed).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Job {
    /// Interpret a job status response `{status, result?, error?}`.
    pub fn from_status_response(id: &str, response: &Value) -> AppResult<Self> {
        let raw = response
            .get("status")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                AppError::unexpected_response(format!(
                    "Status response for job {id} has no 'status' field"
                ))
            })?;

        let status = JobStatus::from_wire(raw).ok_or_else(|| {
            AppError::unexpected_response(format!("Job {id} reported unknown status '{raw}'"))
        })?;

        let result = response.get("result").filter(|v| !v.is_null()).cloned();
        let error = response
            .get("error")
            .filter(|v| !v.is_null())
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            });

        Ok(Self {
            id: id.to_string(),
            status,
            result,
            error,
        })
    }
}

/// Extract the job identifier from a submission response, if any.
///
/// Operations that complete inline answer without one.
pub fn job_id_of(response: &Value) -> Option<String> {
    match response.get("job_id")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
