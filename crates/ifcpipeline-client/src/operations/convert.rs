//! Geometry conversion request.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Convert an IFC model to another format (`POST /ifcconvert`).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConvertRequest {
    /// Source model path on the service.
    #[validate(length(min = 1, message = "input filename is required"))]
    pub input_filename: String,
    /// Target path; the extension selects the output format.
    #[validate(length(min = 1, message = "output filename is required"))]
    pub output_filename: String,
    /// Converter switches. Unset values keep the converter defaults.
    #[serde(default)]
    pub options: ConvertOptions,
}

/// Optional converter switches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    pub verbose: Option<bool>,
    pub plan: Option<bool>,
    pub model: Option<bool>,
    pub weld_vertices: Option<bool>,
    pub use_world_coords: Option<bool>,
    pub convert_back_units: Option<bool>,
    pub sew_shells: Option<bool>,
    pub merge_boolean_operands: Option<bool>,
    pub disable_opening_subtractions: Option<bool>,
    /// SVG bounds such as `1024x768`.
    pub bounds: Option<String>,
    /// Comma-separated entity types to include.
    pub include: Option<String>,
    /// Comma-separated entity types to exclude.
    pub exclude: Option<String>,
    pub log_file: Option<String>,
}
