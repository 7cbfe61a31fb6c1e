//! Error types for findme.
//!
//! Only catalog loading, configuration and client setup can fail. Per-probe
//! failures never surface here; they are folded into `Verdict::Error`.

use std::path::PathBuf;

/// The main error type for findme operations.
#[derive(Debug, thiserror::Error)]
pub enum FindmeError {
    /// I/O error (catalog read, report write, prompt)
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog file could not be located
    #[error("Cannot find catalog file {0:?}")]
    CatalogNotFound(PathBuf),

    /// A catalog entry failed validation
    #[error("Invalid catalog entry '{platform}': {reason}")]
    InvalidCatalog { platform: String, reason: String },

    /// HTTP client construction error
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Invalid runtime configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// No username was given
    #[error("Username must not be empty")]
    EmptyUsername,
}

/// Result type alias using FindmeError
pub type FindmeResult<T> = Result<T, FindmeError>;

impl FindmeError {
    /// Create an I/O error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<PathBuf>>) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a catalog validation error for one platform
    pub fn catalog(platform: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCatalog {
            platform: platform.into(),
            reason: reason.into(),
        }
    }
}

/// Convert from raw I/O errors (without path context)
impl From<std::io::Error> for FindmeError {
    fn from(source: std::io::Error) -> Self {
        Self::Io { path: None, source }
    }
}
