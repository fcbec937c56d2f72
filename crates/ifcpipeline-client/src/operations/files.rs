//! File transfer requests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use ifcpipeline_core::error::AppError;

/// Upload category, the last segment of `/upload/{file_type}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    #[default]
    Ifc,
    Ids,
    Csv,
    Other,
}

impl FileType {
    /// Path segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ifc => "ifc",
            Self::Ids => "ids",
            Self::Csv => "csv",
            Self::Other => "other",
        }
    }

    /// Upload endpoint for this category.
    pub fn upload_path(&self) -> String {
        format!("/upload/{}", self.as_str())
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ifc" => Ok(Self::Ifc),
            "ids" => Ok(Self::Ids),
            "csv" => Ok(Self::Csv),
            "other" => Ok(Self::Other),
            other => Err(AppError::validation(format!("Invalid file type '{other}'"))),
        }
    }
}

/// Ask the service to fetch a remote URL (`POST /download-from-url`).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DownloadFromUrlRequest {
    #[validate(url(message = "a valid URL is required"))]
    pub url: String,
}

/// Request a one-time download token (`POST /create_download_link`).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DownloadLinkRequest {
    #[validate(length(min = 1, message = "file path is required"))]
    pub file_path: String,
}

/// A file fetched through the token flow.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadedFile {
    /// Last segment of the requested path.
    pub file_name: String,
    /// Content type derived from the file name.
    pub mime_type: &'static str,
    /// Body as received.
    pub bytes: bytes::Bytes,
}
