//! IFC to JSON conversion request.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Convert a model to JSON (`POST /ifc2json`).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IfcToJsonRequest {
    #[validate(length(min = 1, message = "filename is required"))]
    pub filename: String,
    #[validate(length(min = 1, message = "output filename is required"))]
    pub output_filename: String,
}
