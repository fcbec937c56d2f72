//! Patch recipe metadata.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named transformation routine hosted by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDescriptor {
    /// Recipe name, used as the `recipe` field on execution.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Whether the recipe is a user-supplied script rather than a built-in.
    #[serde(default, alias = "isCustom", alias = "custom")]
    pub is_custom: bool,
    /// Ordered positional parameters, when the service reports them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<RecipeParameter>>,
}

impl RecipeDescriptor {
    /// Number of declared parameters, if known.
    pub fn parameter_count(&self) -> Option<usize> {
        self.parameters.as_ref().map(Vec::len)
    }
}

/// A positional recipe parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeParameter {
    /// Parameter name.
    pub name: String,
    /// Declared type (e.g. `"str"`, `"bool"`).
    #[serde(rename = "type", default)]
    pub param_type: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Whether a value must be supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Default value applied by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}
