//! High-level client tying requests, discovery, and the job engine together.

use std::path::Path;

use serde_json::Value;
use validator::Validate;

use ifcpipeline_core::config::{AppConfig, PollingConfig};
use ifcpipeline_core::error::AppError;
use ifcpipeline_core::result::AppResult;
use ifcpipeline_core::types::{Job, PollingPolicy};

use crate::discovery::{self, Discovery};
use crate::http::{ApiClient, ApiRequest, UploadFile, encoded_path};
use crate::jobs::{JobBackend, JobEngine, JobOutcome};
use crate::mime;
use crate::operations::Operation;
use crate::operations::files::{DownloadLinkRequest, DownloadedFile, FileType};
use crate::operations::patch::PatchRequest;
use crate::recipes::RecipeCatalog;

/// Polling policy and wait flag for one job-producing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub policy: PollingPolicy,
    pub wait: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::from(&PollingConfig::default())
    }
}

impl From<&PollingConfig> for RunOptions {
    fn from(config: &PollingConfig) -> Self {
        Self {
            policy: config.policy(),
            wait: config.wait_for_completion,
        }
    }
}

/// Client for the IFC Pipeline API gateway.
#[derive(Debug, Clone)]
pub struct IfcPipelineClient {
    api: ApiClient,
}

impl IfcPipelineClient {
    /// Wrap an existing request client.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Build a client from loaded configuration.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        Ok(Self::new(ApiClient::from_config(&config.api)?))
    }

    /// The underlying request client.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// File and recipe discovery.
    pub fn discovery(&self) -> Discovery<'_> {
        Discovery::new(&self.api)
    }

    /// Check connectivity and credentials.
    pub async fn health(&self) -> AppResult<Value> {
        self.api.send(&ApiRequest::get("/health")).await
    }

    /// Raw directory listing.
    pub async fn list_directories(&self) -> AppResult<Value> {
        self.api
            .send(&ApiRequest::get(discovery::LIST_DIRECTORIES_PATH))
            .await
    }

    /// Upload a local file under the given category.
    pub async fn upload(&self, path: &Path, file_type: FileType) -> AppResult<Value> {
        let file = UploadFile::from_path(path).await?;
        self.upload_file(file, file_type).await
    }

    /// Upload an in-memory file under the given category.
    pub async fn upload_file(&self, file: UploadFile, file_type: FileType) -> AppResult<Value> {
        let response = self.api.upload(&file_type.upload_path(), file).await?;
        tracing::info!(file_type = %file_type, "Uploaded file");
        Ok(response)
    }

    /// Download a remote file through a one-time token.
    pub async fn download_file(&self, file_path: &str) -> AppResult<DownloadedFile> {
        let link = Operation::CreateDownloadLink(DownloadLinkRequest {
            file_path: file_path.to_string(),
        });
        let response = self.api.send(&link.to_request()?).await?;
        let token = response
            .get("token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                AppError::unexpected_response("Download link response has no 'token' field")
            })?;

        let bytes = self
            .api
            .download(&ApiRequest::get(encoded_path(&["download", token])?))
            .await?;

        let file_name = mime::file_name_of(file_path).to_string();
        tracing::info!(file_name = %file_name, size = bytes.len(), "Downloaded file");

        Ok(DownloadedFile {
            mime_type: mime::mime_for_filename(&file_name),
            file_name,
            bytes,
        })
    }

    /// Fetch a stored JSON conversion result.
    pub async fn get_json(&self, filename: &str) -> AppResult<Value> {
        let filename = filename.trim_start_matches('/');
        if filename.is_empty() {
            return Err(AppError::validation("filename is required"));
        }
        self.api
            .send(&ApiRequest::get(format!("/ifc2json/{filename}")))
            .await
    }

    /// Current status of a job.
    pub async fn job_status(&self, job_id: &str) -> AppResult<Job> {
        self.api.job_status(job_id).await
    }

    /// Submit an operation and observe the resulting job.
    pub async fn run(&self, operation: &Operation, options: RunOptions) -> AppResult<JobOutcome> {
        let request = operation.to_request()?;
        tracing::debug!(operation = %operation, "Running operation");
        JobEngine::new(&self.api, options.policy)
            .wait_for_completion(options.wait)
            .run(&request)
            .await
    }

    /// Execute a patch recipe.
    ///
    /// When the request does not say whether the recipe is custom, the
    /// catalog decides.
    pub async fn execute_patch(
        &self,
        catalog: &mut RecipeCatalog,
        mut request: PatchRequest,
        options: RunOptions,
    ) -> AppResult<JobOutcome> {
        request.validate()?;
        if request.use_custom.is_none() {
            let is_custom = catalog.resolve_is_custom(&self.api, &request.recipe).await;
            request.use_custom = Some(is_custom);
        }
        self.run(&Operation::PatchExecute(request), options).await
    }
}
