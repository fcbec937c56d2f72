//! Patch recipe requests and positional argument mapping.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use validator::Validate;

use ifcpipeline_core::error::AppError;
use ifcpipeline_core::result::AppResult;

/// Recipe with a selector query and a uniqueness flag.
pub const EXTRACT_ELEMENTS: &str = "ExtractElements";
/// Recipe with a single target unit.
pub const CONVERT_LENGTH_UNIT: &str = "ConvertLengthUnit";

/// Recipe arguments as supplied by a caller, before recipe-specific mapping.
///
/// Named fields cover the recipes with a fixed signature; `values` holds
/// free-form positional strings for everything else and acts as a fallback
/// for the named ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRecipeArguments {
    /// Element selector for `ExtractElements`.
    pub query: Option<String>,
    /// Uniqueness flag for `ExtractElements`.
    pub assume_unique_by_name: Option<bool>,
    /// Target unit for `ConvertLengthUnit`.
    pub unit: Option<String>,
    /// Positional values.
    #[serde(alias = "arguments")]
    pub values: Vec<String>,
}

/// Positional arguments in the shape a recipe expects.
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeArguments {
    /// `[query, assume_asset_uniqueness_by_name]`
    ExtractElements {
        query: String,
        assume_asset_uniqueness_by_name: bool,
    },
    /// `[unit]`
    ConvertLengthUnit { unit: String },
    /// Caller strings in order, blanks removed.
    Positional(Vec<String>),
}

impl RecipeArguments {
    /// Map raw arguments onto the signature of `recipe`.
    pub fn resolve(recipe: &str, raw: &RawRecipeArguments) -> AppResult<Self> {
        let positional = |idx: usize| {
            raw.values
                .get(idx)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        match recipe {
            EXTRACT_ELEMENTS => {
                let query = raw
                    .query
                    .clone()
                    .filter(|q| !q.trim().is_empty())
                    .or_else(|| positional(0))
                    .ok_or_else(|| {
                        AppError::validation("ExtractElements requires a selector query")
                    })?;
                let assume_asset_uniqueness_by_name = match raw.assume_unique_by_name {
                    Some(flag) => flag,
                    None => match positional(1) {
                        Some(flag) => parse_flag(&flag)?,
                        None => true,
                    },
                };
                Ok(Self::ExtractElements {
                    query,
                    assume_asset_uniqueness_by_name,
                })
            }
            CONVERT_LENGTH_UNIT => {
                let unit = raw
                    .unit
                    .clone()
                    .filter(|u| !u.trim().is_empty())
                    .or_else(|| positional(0))
                    .ok_or_else(|| AppError::validation("ConvertLengthUnit requires a unit"))?;
                Ok(Self::ConvertLengthUnit { unit })
            }
            _ => Ok(Self::Positional(
                raw.values
                    .iter()
                    .map(|v| v.trim())
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
                    .collect(),
            )),
        }
    }

    /// The `arguments` array sent to the service.
    pub fn to_wire(&self) -> Value {
        match self {
            Self::ExtractElements {
                query,
                assume_asset_uniqueness_by_name,
            } => json!([query, assume_asset_uniqueness_by_name]),
            Self::ConvertLengthUnit { unit } => json!([unit]),
            Self::Positional(values) => json!(values),
        }
    }
}

fn parse_flag(raw: &str) -> AppResult<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(AppError::validation(format!(
            "Expected a boolean flag, got '{other}'"
        ))),
    }
}

/// Execute a patch recipe (`POST /patch/execute`).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PatchRequest {
    #[validate(length(min = 1, message = "input file is required"))]
    pub input_file: String,
    #[validate(length(min = 1, message = "output file is required"))]
    pub output_file: String,
    #[validate(length(min = 1, message = "recipe is required"))]
    pub recipe: String,
    #[serde(flatten)]
    pub arguments: RawRecipeArguments,
    /// Explicit custom flag. When unset, the recipe catalog decides.
    #[serde(default)]
    pub use_custom: Option<bool>,
}

/// List available recipes (`POST /patch/recipes/list`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeListRequest {
    #[serde(default = "default_true")]
    pub include_builtin: bool,
    #[serde(default = "default_true")]
    pub include_custom: bool,
}

impl Default for RecipeListRequest {
    fn default() -> Self {
        Self {
            include_builtin: true,
            include_custom: true,
        }
    }
}

fn default_true() -> bool {
    true
}
