//! CLI error types with exit code handling
//!
//! Library errors are folded into one diagnostic type whose variant is
//! chosen by the library's error category.

use chartpub_core::{CoreError, ErrorKind};
use chartpub_repo::RepoError;
use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// The user supplied unusable input
    #[error("Invalid input: {message}")]
    #[diagnostic(code(chartpub::cli::input))]
    Input {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// A manifest or config file could not be parsed
    #[error("Parse error: {message}")]
    #[diagnostic(code(chartpub::cli::parse))]
    Parse { message: String },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(chartpub::cli::io))]
    Io { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Input { .. } => exit_codes::INPUT_ERROR,
            CliError::Parse { .. } => exit_codes::PARSE_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
        }
    }

    /// Create an input error (user provided invalid input)
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
            help: None,
        }
    }

    /// Create an input error with help text
    pub fn input_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    fn from_kind(kind: ErrorKind, message: String) -> Self {
        match kind {
            ErrorKind::InvalidInput => Self::Input {
                message,
                help: None,
            },
            ErrorKind::Parse => Self::Parse { message },
            ErrorKind::File => Self::Io { message },
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        Self::from_kind(err.kind(), err.to_string())
    }
}

impl From<RepoError> for CliError {
    fn from(err: RepoError) -> Self {
        Self::from_kind(err.kind(), err.to_string())
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
