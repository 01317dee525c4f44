//! Core error types

use thiserror::Error;

/// Coarse failure category shared by every chartpub error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A file exists but does not parse, or lacks required fields
    Parse,
    /// Reading or writing the filesystem failed
    File,
    /// The caller supplied an empty name or version
    InvalidInput,
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Failed to serialize YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CoreError {
    /// Build an I/O error tagged with the path that failed
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        CoreError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    /// Failure category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::Io { .. } => ErrorKind::File,
            CoreError::Parse { .. } | CoreError::MissingField { .. } | CoreError::Yaml(_) => {
                ErrorKind::Parse
            }
            CoreError::InvalidInput { .. } => ErrorKind::InvalidInput,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
