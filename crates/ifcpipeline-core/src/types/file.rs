//! Remote file descriptors and extension filters.

use serde::{Deserialize, Serialize};

/// A file path reported by the directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// Path as reported by the service.
    pub path: String,
    /// Lowercase extension including the leading dot, or empty.
    pub extension: String,
}

impl FileDescriptor {
    /// Build a descriptor from a path.
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or(&path);
        let extension = match name.rfind('.') {
            Some(idx) if idx > 0 => name[idx..].to_ascii_lowercase(),
            _ => String::new(),
        };
        Self { path, extension }
    }

    /// File name (last path segment).
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Set of accepted file extensions. Empty accepts everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionFilter {
    extensions: Vec<String>,
}

impl ExtensionFilter {
    /// Filter that accepts every file.
    pub fn any() -> Self {
        Self::default()
    }

    /// Build a filter from extensions with or without a leading dot.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim().to_ascii_lowercase())
            .filter(|e| !e.is_empty() && e != ".")
            .map(|e| if e.starts_with('.') { e } else { format!(".{e}") })
            .collect();
        Self { extensions }
    }

    /// Parse a comma-separated list such as `".ifc, ids"`.
    pub fn parse(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    /// Whether the filter accepts everything.
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Case-insensitive suffix match against the accepted extensions.
    pub fn accepts(&self, path: &str) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        let lower = path.to_ascii_lowercase();
        self.extensions.iter().any(|ext| lower.ends_with(ext))
    }
}
