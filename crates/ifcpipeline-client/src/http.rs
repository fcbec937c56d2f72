//! Authenticated request layer.
//!
//! Every call goes to `base_url + path` with the `X-API-Key` header. Any
//! transport failure or non-success status becomes an [`AppError`]; nothing
//! is retried here.

use std::path::Path;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, Response, StatusCode};
use serde_json::Value;
use url::Url;

use ifcpipeline_core::config::ApiConfig;
use ifcpipeline_core::error::{AppError, ErrorKind};
use ifcpipeline_core::result::AppResult;
use ifcpipeline_core::types::Credential;

use crate::mime;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Longest slice of a non-JSON error body kept in an error message.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// A single request against the gateway. Built per call, never retried.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    path: String,
    body: Option<Value>,
    query: Vec<(String, String)>,
}

impl ApiRequest {
    /// Create a request with an explicit method.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: Vec::new(),
        }
    }

    /// Create a `GET` request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Create a `POST` request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Attach a JSON body. `null` and `{}` are dropped so that no payload is sent.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = if is_empty_body(&body) { None } else { Some(body) };
        self
    }

    /// Append a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Endpoint path relative to the base URL.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// JSON body, if one will be sent.
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Query parameters in insertion order.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }
}

fn is_empty_body(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Build a request path from raw segments, percent-encoding each one.
///
/// A segment containing `/`, `?` or `#` stays a single path segment.
pub fn encoded_path(segments: &[&str]) -> AppResult<String> {
    let mut url = Url::parse("http://localhost/")
        .map_err(|e| AppError::internal(format!("Invalid path base: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| AppError::internal("Path base cannot hold segments"))?
        .clear()
        .extend(segments);
    Ok(url.path().to_string())
}

/// A file to send as the single part of a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Multipart field name.
    pub field_name: String,
    /// Declared file name.
    pub file_name: String,
    /// Declared content type.
    pub content_type: String,
    /// File contents.
    pub data: Bytes,
}

impl UploadFile {
    /// Create an upload under the `file` field.
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            field_name: "file".to_string(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Read a local file, classifying its content type by extension.
    pub async fn from_path(path: &Path) -> AppResult<Self> {
        let data = tokio::fs::read(path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Io,
                format!("Failed to read '{}': {e}", path.display()),
                e,
            )
        })?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();
        let content_type = mime::mime_for_filename(&file_name);
        Ok(Self::new(file_name, content_type, data))
    }
}

/// HTTP client bound to one credential.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Underlying reqwest client (connection pool is reqwest's own).
    http: reqwest::Client,
    /// Base URL and API key.
    credential: Credential,
}

impl ApiClient {
    /// Create a client for the given credential.
    pub fn new(credential: Credential, config: &ApiConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build HTTP client",
                    e.without_url(),
                )
            })?;

        Ok(Self { http, credential })
    }

    /// Create a client from the `[api]` configuration section.
    pub fn from_config(config: &ApiConfig) -> AppResult<Self> {
        Self::new(config.credential(), config)
    }

    /// The credential this client authenticates with.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Full URL for a request, with the query string only when non-empty.
    pub fn request_url(&self, request: &ApiRequest) -> AppResult<Url> {
        let mut url = self.credential.endpoint(&request.path)?;
        if !request.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }

    fn prepare(&self, request: &ApiRequest) -> AppResult<reqwest::RequestBuilder> {
        let url = self.request_url(request)?;
        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .header(API_KEY_HEADER, self.credential.api_key());
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        Ok(builder)
    }

    /// Send a request and decode the JSON response.
    ///
    /// An empty response body decodes to `null`; a non-JSON body is
    /// returned as a JSON string.
    pub async fn send(&self, request: &ApiRequest) -> AppResult<Value> {
        tracing::debug!(
            method = %request.method,
            path = %request.path,
            has_body = request.body.is_some(),
            "Sending API request"
        );

        let response = self
            .prepare(request)?
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport_error)?;
        let response = check_status(response).await?;
        let bytes = response.bytes().await.map_err(transport_error)?;

        Ok(decode_body(&bytes))
    }

    /// Send a request and return the response body byte-exact.
    pub async fn download(&self, request: &ApiRequest) -> AppResult<Bytes> {
        tracing::debug!(method = %request.method, path = %request.path, "Downloading");

        let response = self
            .prepare(request)?
            .send()
            .await
            .map_err(transport_error)?;
        let response = check_status(response).await?;

        response.bytes().await.map_err(transport_error)
    }

    /// `POST` a multipart body with a single file part.
    pub async fn upload(&self, path: &str, file: UploadFile) -> AppResult<Value> {
        tracing::debug!(
            path = %path,
            file_name = %file.file_name,
            size = file.data.len(),
            "Uploading file"
        );

        let part = Part::bytes(file.data.to_vec())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| {
                AppError::validation(format!(
                    "Invalid content type '{}': {}",
                    file.content_type,
                    e.without_url()
                ))
            })?;
        let form = Form::new().part(file.field_name.clone(), part);

        let request = ApiRequest::post(path);
        let response = self
            .prepare(&request)?
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;
        let response = check_status(response).await?;
        let bytes = response.bytes().await.map_err(transport_error)?;

        Ok(decode_body(&bytes))
    }
}

/// Map a reqwest failure to a transport error without the request URL.
fn transport_error(err: reqwest::Error) -> AppError {
    let err = err.without_url();
    let message = if err.is_timeout() {
        "Request to IFC Pipeline timed out".to_string()
    } else if err.is_connect() {
        "Could not connect to IFC Pipeline".to_string()
    } else if err.is_decode() {
        format!("Failed to read response body: {err}")
    } else {
        format!("Request to IFC Pipeline failed: {err}")
    };
    AppError::with_source(ErrorKind::Transport, message, err)
}

async fn check_status(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = remote_message(status, &body);
    tracing::debug!(status = status.as_u16(), "Remote service returned an error");

    Err(AppError::remote(status.as_u16(), message))
}

/// Human-readable message for a non-success response.
///
/// Prefers the `detail`/`message`/`error` field of a JSON body, falling
/// back to a truncated copy of the raw body.
fn remote_message(status: StatusCode, body: &str) -> String {
    let reason = status.canonical_reason().unwrap_or("Unknown Status");
    let head = format!("{} {}", status.as_u16(), reason);

    let detail = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        ["detail", "message", "error"]
            .iter()
            .find_map(|key| v.get(*key).filter(|d| !d.is_null()).cloned())
    });

    match detail {
        Some(Value::String(s)) => format!("{head}: {s}"),
        Some(other) => format!("{head}: {other}"),
        None if !body.trim().is_empty() => {
            let snippet: String = body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect();
            format!("{head}: {snippet}")
        }
        None => head,
    }
}

fn decode_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
