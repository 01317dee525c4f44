//! Error types for index and publish configuration operations

use chartpub_core::{CoreError, ErrorKind};
use thiserror::Error;

/// Repository operation errors
#[derive(Debug, Error)]
pub enum RepoError {
    // ============ Input Errors ============
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Invalid publish configuration: {message}")]
    InvalidConfig { message: String },

    // ============ IO Errors ============
    #[error("Failed to read archive {path}: {source}")]
    Archive {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    // ============ Manifest Errors ============
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl RepoError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        RepoError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    /// Failure category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            RepoError::InvalidInput { .. } => ErrorKind::InvalidInput,
            RepoError::InvalidConfig { .. } | RepoError::Serialization(_) => ErrorKind::Parse,
            RepoError::Archive { .. } | RepoError::Io { .. } => ErrorKind::File,
            RepoError::Core(e) => e.kind(),
        }
    }
}

/// Result type for repository operations
pub type Result<T> = std::result::Result<T, RepoError>;

impl From<serde_yaml::Error> for RepoError {
    fn from(e: serde_yaml::Error) -> Self {
        RepoError::Serialization(e.to_string())
    }
}
