//! Error types for the fallible edges of the widget layer.
//!
//! Styling and class compilation never fail: a widget with unusable data simply
//! gets no extra styling. Errors only come from loading configuration or
//! storage snapshots and from rendering the settings form.

use std::path::PathBuf;

/// Result type alias for widget layer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading data or rendering markup.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configuration or snapshot file could not be read.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML input could not be parsed.
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON input could not be parsed.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A file extension that is neither YAML nor JSON.
    #[error("Unsupported file format for '{path}' (expected .yaml, .yml or .json)")]
    UnsupportedFormat { path: PathBuf },

    /// The settings form template failed to render.
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

impl Error {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
