//! IDS validation request.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use ifcpipeline_core::error::AppError;

/// Report format produced by the validator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    #[default]
    Json,
    Html,
    Xlsx,
}

impl ReportType {
    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Html => "html",
            Self::Xlsx => "xlsx",
        }
    }
}

impl FromStr for ReportType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "html" => Ok(Self::Html),
            "xlsx" => Ok(Self::Xlsx),
            other => Err(AppError::validation(format!("Invalid report type '{other}'"))),
        }
    }
}

/// Validate a model against an IDS file (`POST /ifctester`).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ValidationRequest {
    #[validate(length(min = 1, message = "IFC filename is required"))]
    pub ifc_filename: String,
    #[validate(length(min = 1, message = "IDS filename is required"))]
    pub ids_filename: String,
    #[validate(length(min = 1, message = "output filename is required"))]
    pub output_filename: String,
    #[serde(default)]
    pub report_type: ReportType,
}
