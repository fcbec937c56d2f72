//! Clash detection request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use ifcpipeline_core::error::AppError;

/// How a selector narrows a file's elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectorMode {
    /// Exclude matching elements.
    #[serde(rename = "e")]
    Exclude,
    /// Include only matching elements.
    #[serde(rename = "i")]
    Include,
}

impl SelectorMode {
    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exclude => "e",
            Self::Include => "i",
        }
    }
}

impl FromStr for SelectorMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "e" | "exclude" => Ok(Self::Exclude),
            "i" | "include" => Ok(Self::Include),
            other => Err(AppError::validation(format!(
                "Invalid selector mode '{other}' (expected e or i)"
            ))),
        }
    }
}

/// Clash detection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClashMode {
    Intersection,
    Collision,
    Clearance,
}

impl ClashMode {
    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Intersection => "intersection",
            Self::Collision => "collision",
            Self::Clearance => "clearance",
        }
    }
}

impl fmt::Display for ClashMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClashMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "intersection" => Ok(Self::Intersection),
            "collision" => Ok(Self::Collision),
            "clearance" => Ok(Self::Clearance),
            other => Err(AppError::validation(format!("Invalid clash mode '{other}'"))),
        }
    }
}

/// One file in a clash group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ClashFile {
    #[validate(length(min = 1, message = "clash file path is required"))]
    pub file: String,
    #[serde(default)]
    pub selector: Option<String>,
    #[serde(default)]
    pub mode: Option<SelectorMode>,
}

impl ClashFile {
    /// A whole-file entry without a selector.
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            selector: None,
            mode: None,
        }
    }
}

/// Parses `file[|selector[|mode]]`.
impl FromStr for ClashFile {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '|').map(str::trim);
        let file = parts.next().unwrap_or_default();
        if file.is_empty() {
            return Err(AppError::validation(format!("Invalid clash file '{s}'")));
        }
        let selector = parts.next().filter(|p| !p.is_empty()).map(str::to_string);
        let mode = match parts.next().filter(|p| !p.is_empty()) {
            Some(mode) => Some(mode.parse()?),
            None => None,
        };
        Ok(Self {
            file: file.to_string(),
            selector,
            mode,
        })
    }
}

/// Run clash detection between two groups of files (`POST /ifcclash`).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClashRequest {
    #[validate(length(min = 1, message = "clash set name is required"))]
    pub clash_set_name: String,
    #[validate(length(min = 1, message = "output filename is required"))]
    pub output_filename: String,
    #[validate(length(min = 1, message = "group A needs at least one file"), nested)]
    pub group_a: Vec<ClashFile>,
    #[serde(default)]
    #[validate(nested)]
    pub group_b: Vec<ClashFile>,
    #[serde(default)]
    pub options: ClashOptions,
}

/// Optional clash settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClashOptions {
    pub tolerance: Option<f64>,
    pub smart_grouping: Option<bool>,
    pub max_cluster_distance: Option<f64>,
    pub mode: Option<ClashMode>,
    pub clearance: Option<f64>,
    pub check_all: Option<bool>,
    pub allow_touching: Option<bool>,
}
