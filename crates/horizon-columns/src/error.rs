//! Error types for the column widget.

use std::path::PathBuf;

/// Result type alias for column operations.
pub type Result<T> = std::result::Result<T, ColumnError>;

/// Errors that can occur while configuring or rendering a column view.
#[derive(Debug, thiserror::Error)]
pub enum ColumnError {
    /// An item's type has no registered renderer.
    ///
    /// Recoverable: the view renders a placeholder for the slot instead.
    #[error("No renderer registered for item type '{type_name}'")]
    UnregisteredItem { type_name: &'static str },

    /// Reading a configuration file failed.
    #[error("Failed to read column config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A TOML configuration could not be parsed.
    #[error("Invalid TOML column config: {0}")]
    Toml(#[from] toml::de::Error),

    /// A JSON configuration could not be parsed.
    #[error("Invalid JSON column config: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file extension is not one we can parse.
    #[error("Unsupported column config format '{extension}' (expected toml or json)")]
    UnsupportedFormat { extension: String },
}

impl ColumnError {
    /// Create an unregistered-item error.
    pub fn unregistered(type_name: &'static str) -> Self {
        Self::UnregisteredItem { type_name }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` when the view can keep rendering after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::UnregisteredItem { .. })
    }
}
