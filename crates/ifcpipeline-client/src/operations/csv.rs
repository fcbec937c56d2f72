//! Tabular export and import requests.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use ifcpipeline_core::error::AppError;

/// Spreadsheet format for exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvFormat {
    Csv,
    Xlsx,
    Ods,
}

impl CsvFormat {
    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
            Self::Ods => "ods",
        }
    }
}

impl FromStr for CsvFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" => Ok(Self::Xlsx),
            "ods" => Ok(Self::Ods),
            other => Err(AppError::validation(format!("Invalid export format '{other}'"))),
        }
    }
}

/// Export model data to a spreadsheet (`POST /ifccsv`).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CsvExportRequest {
    #[validate(length(min = 1, message = "filename is required"))]
    pub filename: String,
    #[validate(length(min = 1, message = "output filename is required"))]
    pub output_filename: String,
    #[serde(default)]
    pub format: Option<CsvFormat>,
    #[serde(default)]
    pub delimiter: Option<String>,
    /// Placeholder written for missing values (wire field `null`).
    #[serde(default)]
    pub null_value: Option<String>,
    /// Element selector query.
    #[serde(default)]
    pub query: Option<String>,
    /// Comma-separated attribute list.
    #[serde(default)]
    pub attributes: Option<String>,
}

/// Apply spreadsheet edits back to a model (`POST /ifccsv/import`).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CsvImportRequest {
    #[validate(length(min = 1, message = "IFC filename is required"))]
    pub ifc_filename: String,
    #[validate(length(min = 1, message = "CSV filename is required"))]
    pub csv_filename: String,
    #[serde(default)]
    pub output_filename: Option<String>,
}
