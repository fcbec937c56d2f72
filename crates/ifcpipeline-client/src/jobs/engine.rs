//! Polling engine: `Submitted → Polling → {Succeeded, Failed, TimedOut}`.

use serde::Serialize;
use serde_json::{Value, json};
use tokio::time::{self, Instant};
use validator::Validate;

use ifcpipeline_core::error::AppError;
use ifcpipeline_core::result::AppResult;
use ifcpipeline_core::types::job::job_id_of;
use ifcpipeline_core::types::{JobStatus, PollingPolicy};

use super::backend::JobBackend;
use crate::http::ApiRequest;

/// How a job-producing call ended from the client's point of view.
///
/// A remote job failure is not an outcome: it is returned as an
/// [`AppError`] of kind `JobFailed`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum JobOutcome {
    /// The service answered inline without a job id.
    Completed {
        /// The submission response.
        response: Value,
    },
    /// A job was submitted and the caller chose not to wait.
    Submitted {
        /// Job identifier for an out-of-band status check.
        job_id: String,
        /// The submission response.
        response: Value,
    },
    /// The job reached `succeeded`.
    Succeeded {
        /// Job identifier.
        job_id: String,
        /// Result payload reported by the job.
        result: Value,
        /// Seconds from submission to the successful status check.
        elapsed_seconds: f64,
    },
    /// The polling budget ran out. The job may still be running remotely.
    TimedOut {
        /// Job identifier.
        job_id: String,
        /// Last non-terminal status seen, if any check happened.
        last_status: Option<JobStatus>,
        /// Seconds from submission until observation stopped.
        elapsed_seconds: f64,
    },
}

impl JobOutcome {
    /// Job identifier, when the call produced one.
    pub fn job_id(&self) -> Option<&str> {
        match self {
            Self::Completed { .. } => None,
            Self::Submitted { job_id, .. }
            | Self::Succeeded { job_id, .. }
            | Self::TimedOut { job_id, .. } => Some(job_id),
        }
    }

    /// The payload to hand back to the caller.
    ///
    /// Inline and detached submissions yield the submission response, a
    /// successful job yields its result. A timeout is surfaced as an error.
    pub fn into_value(self) -> AppResult<Value> {
        match self {
            Self::Completed { response } | Self::Submitted { response, .. } => Ok(response),
            Self::Succeeded { result, .. } => Ok(result),
            Self::TimedOut {
                job_id,
                last_status,
                elapsed_seconds,
            } => Err(AppError::timeout(format!(
                "Job {job_id} did not finish within {elapsed_seconds:.0}s (last status: {}); it may still be running",
                last_status.map(|s| s.as_str()).unwrap_or("unknown")
            ))),
        }
    }
}

/// Submits work and observes the resulting job under a [`PollingPolicy`].
#[derive(Debug)]
pub struct JobEngine<'a, B: JobBackend + ?Sized> {
    /// Submission and status transport.
    backend: &'a B,
    /// Polling budget for this invocation.
    policy: PollingPolicy,
    /// Whether to poll after submission.
    wait: bool,
}

impl<'a, B: JobBackend + ?Sized> JobEngine<'a, B> {
    /// Create an engine that waits for completion.
    pub fn new(backend: &'a B, policy: PollingPolicy) -> Self {
        Self {
            backend,
            policy,
            wait: true,
        }
    }

    /// Set whether to wait for submitted jobs.
    pub fn wait_for_completion(mut self, wait: bool) -> Self {
        self.wait = wait;
        self
    }

    /// Submit a request and, if it produced a job, observe it.
    pub async fn run(&self, request: &ApiRequest) -> AppResult<JobOutcome> {
        self.policy.validate()?;

        let submitted_at = Instant::now();
        let response = self.backend.submit(request).await?;

        let Some(job_id) = job_id_of(&response) else {
            tracing::debug!(path = %request.path(), "Operation completed inline");
            return Ok(JobOutcome::Completed { response });
        };

        tracing::info!(job_id = %job_id, path = %request.path(), "Job submitted");

        if !self.wait {
            return Ok(JobOutcome::Submitted { job_id, response });
        }

        self.observe(job_id, submitted_at).await
    }

    /// Poll a job until it reaches a terminal state or the budget runs out.
    ///
    /// Each status check happens after a full interval of sleep. A check is
    /// skipped once the time since `submitted_at` reaches the timeout.
    pub async fn observe(&self, job_id: String, submitted_at: Instant) -> AppResult<JobOutcome> {
        let mut last_status = None;

        loop {
            time::sleep(self.policy.interval()).await;

            let elapsed = submitted_at.elapsed();
            if elapsed >= self.policy.timeout() {
                tracing::warn!(
                    job_id = %job_id,
                    timeout_seconds = self.policy.timeout_seconds,
                    "Stopped waiting for job; it may still be running"
                );
                return Ok(JobOutcome::TimedOut {
                    job_id,
                    last_status,
                    elapsed_seconds: elapsed.as_secs_f64(),
                });
            }

            let job = self.backend.job_status(&job_id).await?;
            tracing::debug!(
                job_id = %job_id,
                status = %job.status,
                elapsed_seconds = elapsed.as_secs_f64(),
                "Polled job status"
            );

            match job.status {
                JobStatus::Succeeded => {
                    tracing::info!(job_id = %job_id, "Job succeeded");
                    let result = job
                        .result
                        .unwrap_or_else(|| json!({"job_id": job.id, "status": job.status}));
                    return Ok(JobOutcome::Succeeded {
                        job_id,
                        result,
                        elapsed_seconds: elapsed.as_secs_f64(),
                    });
                }
                JobStatus::Failed => {
                    let reason = job
                        .error
                        .unwrap_or_else(|| "no error message reported".to_string());
                    tracing::info!(job_id = %job_id, reason = %reason, "Job failed");
                    return Err(AppError::job_failed(&job_id, reason));
                }
                JobStatus::Pending | JobStatus::Running => last_status = Some(job.status),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use ifcpipeline_core::error::ErrorKind;
    use ifcpipeline_core::types::Job;

    use super::*;

    /// Reports `running` until `finish_at`, then the terminal status.
    struct ScriptedBackend {
        origin: Instant,
        finish_at: Duration,
        terminal: JobStatus,
        submit_response: Value,
        checks: Mutex<Vec<Duration>>,
    }

    impl ScriptedBackend {
        fn new(finish_at_secs: u64, terminal: JobStatus) -> Self {
            Self {
                origin: Instant::now(),
                finish_at: Duration::from_secs(finish_at_secs),
                terminal,
                submit_response: json!({"job_id": "job-1"}),
                checks: Mutex::new(Vec::new()),
            }
        }

        fn checks(&self) -> Vec<u64> {
            self.checks
                .lock()
                .expect("lock")
                .iter()
                .map(|d| d.as_secs())
                .collect()
        }
    }

    #[async_trait]
    impl JobBackend for ScriptedBackend {
        async fn submit(&self, _request: &ApiRequest) -> AppResult<Value> {
            Ok(self.submit_response.clone())
        }

        async fn job_status(&self, job_id: &str) -> AppResult<Job> {
            let now = self.origin.elapsed();
            self.checks.lock().expect("lock").push(now);
            let done = now >= self.finish_at;
            Ok(Job {
                id: job_id.to_string(),
                status: if done { self.terminal } else { JobStatus::Running },
                result: (done && self.terminal == JobStatus::Succeeded)
                    .then(|| json!({"output": "/output/model.glb"})),
                error: (done && self.terminal == JobStatus::Failed)
                    .then(|| "geometry kernel crashed".to_string()),
            })
        }
    }

    fn request() -> ApiRequest {
        ApiRequest::post("/ifcconvert").with_body(json!({"input_filename": "a.ifc"}))
    }

    #[tokio::test(start_paused = true)]
    async fn test_terminal_status_after_budget_times_out() {
        let backend = ScriptedBackend::new(6, JobStatus::Succeeded);
        let outcome = JobEngine::new(&backend, PollingPolicy::new(2, 5))
            .run(&request())
            .await
            .expect("outcome");

        match &outcome {
            JobOutcome::TimedOut {
                job_id,
                last_status,
                ..
            } => {
                assert_eq!(job_id, "job-1");
                assert_eq!(*last_status, Some(JobStatus::Running));
            }
            other => panic!("expected timeout, got {other:?}"),
        }
        assert_eq!(backend.checks(), vec![2, 4]);

        let err = outcome.into_value().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Timeout);
    }

    #[tokio::test(start_paused = true)]
    async fn test_terminal_status_within_budget_succeeds() {
        let backend = ScriptedBackend::new(6, JobStatus::Succeeded);
        let outcome = JobEngine::new(&backend, PollingPolicy::new(2, 10))
            .run(&request())
            .await
            .expect("outcome");

        assert_eq!(
            outcome,
            JobOutcome::Succeeded {
                job_id: "job-1".to_string(),
                result: json!({"output": "/output/model.glb"}),
                elapsed_seconds: 6.0,
            }
        );
        assert_eq!(backend.checks(), vec![2, 4, 6]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_job_surfaces_error() {
        let backend = ScriptedBackend::new(4, JobStatus::Failed);
        let err = JobEngine::new(&backend, PollingPolicy::new(2, 30))
            .run(&request())
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::JobFailed);
        assert!(err.message.contains("geometry kernel crashed"));
        assert_eq!(backend.checks(), vec![2, 4]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_inline_result_skips_polling() {
        let mut backend = ScriptedBackend::new(0, JobStatus::Succeeded);
        backend.submit_response = json!({"success": true, "message": "done"});

        let outcome = JobEngine::new(&backend, PollingPolicy::new(2, 10))
            .run(&request())
            .await
            .expect("outcome");

        assert_eq!(
            outcome,
            JobOutcome::Completed {
                response: json!({"success": true, "message": "done"})
            }
        );
        assert!(backend.checks().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_wait_returns_submission() {
        let backend = ScriptedBackend::new(0, JobStatus::Succeeded);
        let outcome = JobEngine::new(&backend, PollingPolicy::default())
            .wait_for_completion(false)
            .run(&request())
            .await
            .expect("outcome");

        assert_eq!(outcome.job_id(), Some("job-1"));
        assert_eq!(
            outcome.into_value().expect("value"),
            json!({"job_id": "job-1"})
        );
        assert!(backend.checks().is_empty());
    }

    #[tokio::test]
    async fn test_zero_interval_rejected_before_submission() {
        let backend = ScriptedBackend::new(0, JobStatus::Succeeded);
        let err = JobEngine::new(&backend, PollingPolicy::new(0, 10))
            .run(&request())
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
