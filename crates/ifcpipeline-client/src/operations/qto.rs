//! Quantity takeoff request.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Compute base quantities (`POST /calculate-qtos`).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuantityTakeoffRequest {
    #[validate(length(min = 1, message = "input file is required"))]
    pub input_file: String,
    /// Defaults to overwriting the input on the service side.
    #[serde(default)]
    pub output_file: Option<String>,
}
