//! Selection options produced by resource discovery.

use serde::{Deserialize, Serialize};

/// A `{value, label, description}` entry for a selection control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Value submitted when the option is chosen.
    pub value: String,
    /// Display label.
    pub label: String,
    /// Optional longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SelectOption {
    /// Option whose label equals its value.
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
            description: None,
        }
    }

    /// Placeholder returned when a listing could not be loaded.
    ///
    /// The value is empty so that selecting it submits nothing meaningful.
    pub fn load_failed(what: &str, reason: &str) -> Self {
        Self {
            value: String::new(),
            label: format!("Failed to load {what}"),
            description: Some(reason.to_string()),
        }
    }

    /// Whether this option is a load-failure placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }
}
