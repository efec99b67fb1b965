//! Error types for qescope
//!
//! All modules use `QescopeResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for qescope operations
pub type QescopeResult<T> = Result<T, QescopeError>;

/// All errors that can occur in qescope
#[derive(Error, Debug)]
pub enum QescopeError {
    // Artifact reference errors
    #[error("unable to parse '{0}' as a URL or as a local path")]
    InvalidReference(String),

    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("connection error, and no cached copy of {url} was found")]
    ConnectionUnavailable { url: String },

    #[error("offline mode requested and no cached copy of {url} was found")]
    OfflineUnavailable { url: String },

    #[error("archive format of {0} could not be identified")]
    UnsupportedArchive(PathBuf),

    // Remote fetch errors
    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("HTTP request to {url} failed: {reason}")]
    Http { url: String, reason: String },

    // Configuration errors
    #[error("invalid registry at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("registry file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("model not registered: {0}")]
    ModelNotRegistered(String),

    #[error("dataset not registered: {0}")]
    DatasetNotRegistered(String),

    // Dataset errors
    #[error("invalid dataset {name}: {reason}")]
    DatasetInvalid { name: String, reason: String },

    #[error("tag count mismatch: {tags} tags for {tokens} tokens")]
    TagMismatch { tags: usize, tokens: usize },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl QescopeError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an HTTP transport error
    pub fn http(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Http {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ConnectionUnavailable { .. } => {
                Some("Check your internet connection and try again")
            }
            Self::OfflineUnavailable { .. } => {
                Some("Re-run without --offline, or pre-populate the cache while online")
            }
            Self::ConfigNotFound(_) => {
                Some("Run: qescope config to see where registries are expected")
            }
            Self::ModelNotRegistered(_) => Some("Run: qescope models to list registered models"),
            Self::DatasetNotRegistered(_) => {
                Some("Run: qescope datasets to list registered datasets")
            }
            _ => None,
        }
    }
}
