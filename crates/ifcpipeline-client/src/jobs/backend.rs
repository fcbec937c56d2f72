//! Transport seam between the polling engine and the gateway.

use async_trait::async_trait;
use serde_json::Value;

use ifcpipeline_core::result::AppResult;
use ifcpipeline_core::types::Job;

use crate::http::{ApiClient, ApiRequest, encoded_path};

/// Operations the polling engine needs from the remote service.
#[async_trait]
pub trait JobBackend: Send + Sync {
    /// Submit a unit of work and return the raw submission response.
    async fn submit(&self, request: &ApiRequest) -> AppResult<Value>;

    /// Fetch the current status of a job.
    async fn job_status(&self, job_id: &str) -> AppResult<Job>;
}

/// Path of the status endpoint for a job.
pub fn job_status_path(job_id: &str) -> AppResult<String> {
    encoded_path(&["jobs", job_id, "status"])
}

#[async_trait]
impl JobBackend for ApiClient {
    async fn submit(&self, request: &ApiRequest) -> AppResult<Value> {
        self.send(request).await
    }

    async fn job_status(&self, job_id: &str) -> AppResult<Job> {
        let response = self.send(&ApiRequest::get(job_status_path(job_id)?)).await?;
        Job::from_status_response(job_id, &response)
    }
}
