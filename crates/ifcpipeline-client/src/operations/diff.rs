//! Model comparison request.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use ifcpipeline_core::error::AppError;

/// Relationship category compared by the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffRelationship {
    Aggregate,
    Attributes,
    Classification,
    Container,
    Geometry,
    Property,
    Type,
}

impl DiffRelationship {
    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aggregate => "aggregate",
            Self::Attributes => "attributes",
            Self::Classification => "classification",
            Self::Container => "container",
            Self::Geometry => "geometry",
            Self::Property => "property",
            Self::Type => "type",
        }
    }
}

impl FromStr for DiffRelationship {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aggregate" => Ok(Self::Aggregate),
            "attributes" => Ok(Self::Attributes),
            "classification" => Ok(Self::Classification),
            "container" => Ok(Self::Container),
            "geometry" => Ok(Self::Geometry),
            "property" => Ok(Self::Property),
            "type" => Ok(Self::Type),
            other => Err(AppError::validation(format!(
                "Invalid diff relationship '{other}'"
            ))),
        }
    }
}

/// Compare two model versions (`POST /ifcdiff`).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DiffRequest {
    #[validate(length(min = 1, message = "old file is required"))]
    pub old_file: String,
    #[validate(length(min = 1, message = "new file is required"))]
    pub new_file: String,
    #[serde(default = "default_output_file")]
    #[validate(length(min = 1, message = "output file is required"))]
    pub output_file: String,
    #[serde(default)]
    pub relationships: Vec<DiffRelationship>,
    #[serde(default = "default_is_shallow")]
    pub is_shallow: bool,
    #[serde(default)]
    pub filter_elements: Option<String>,
}

impl DiffRequest {
    /// A shallow diff written to `diff.json`.
    pub fn new(old_file: impl Into<String>, new_file: impl Into<String>) -> Self {
        Self {
            old_file: old_file.into(),
            new_file: new_file.into(),
            output_file: default_output_file(),
            relationships: Vec::new(),
            is_shallow: default_is_shallow(),
            filter_elements: None,
        }
    }
}

fn default_output_file() -> String {
    "diff.json".to_string()
}

fn default_is_shallow() -> bool {
    true
}
