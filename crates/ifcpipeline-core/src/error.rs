//! Unified application error types for the IFC Pipeline client.
//!
//! Transport failures and non-success responses from the remote service
//! are both reported through [`AppError`] so callers see one uniform API
//! error. The kind tells them apart when diagnostics need it.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The remote service could not be reached (DNS, connect, TLS, read).
    Transport,
    /// The remote service answered with a non-success status.
    Remote,
    /// A remote job reported failure.
    JobFailed,
    /// The polling budget was exhausted before the job reached a terminal state.
    Timeout,
    /// A required parameter was missing or invalid; no request was sent.
    Validation,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// A local I/O error occurred.
    Io,
    /// An internal error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport => write!(f, "TRANSPORT"),
            Self::Remote => write!(f, "REMOTE"),
            Self::JobFailed => write!(f, "JOB_FAILED"),
            Self::Timeout => write!(f, "TIMEOUT"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Io => write!(f, "IO"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error.
///
/// `status_code` is set when the remote service answered with a
/// non-success HTTP status. Messages never carry the API key.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// HTTP status returned by the remote service, if any.
    pub status_code: Option<u16>,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: None,
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Create a remote error carrying the HTTP status returned by the service.
    pub fn remote(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code: Some(status_code),
            ..Self::new(ErrorKind::Remote, message)
        }
    }

    /// Create an error for a remote response that could not be interpreted.
    pub fn unexpected_response(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Remote, message)
    }

    /// Create a job failure error.
    pub fn job_failed(job_id: &str, reason: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::JobFailed,
            format!("Job {job_id} failed: {}", reason.into()),
        )
    }

    /// Create a polling timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Whether this error came from the HTTP boundary (transport or remote status).
    pub fn is_api_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Transport | ErrorKind::Remote)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            status_code: self.status_code,
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Io, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::with_source(
            ErrorKind::Validation,
            format!("Invalid parameters: {err}"),
            err,
        )
    }
}
