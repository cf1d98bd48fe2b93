//! Station configuration error types.
//!
//! Errors fall into a small taxonomy:
//!
//! - precondition violations, such as creating a file that already exists or
//!   registering a station without a usable URL;
//! - invalid values supplied as explicit arguments (interactive answers are
//!   re-asked instead and never surface here);
//! - a driver that cannot be resolved;
//! - failures of the underlying document, the terminal or the filesystem.
//!
//! All of them are fatal. A reconciliation pass that fails leaves the
//! in-memory document partially updated and must not be saved.

use config_tree::TreeError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

#[derive(Error, Debug)]
pub enum StationError {
    #[error("Precondition violated: {0}")]
    PreconditionViolated(String),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Unable to load driver '{driver}'")]
    DriverNotFound { driver: String },

    /// A driver editor returned text that does not contain its stanza.
    #[error("Driver '{driver}' produced an unusable stanza: {reason}")]
    InvalidStanza { driver: String, reason: String },

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("File system operation '{operation}' failed: {reason}")]
    FileSystem { operation: String, reason: String },

    #[error("Configuration document error: {0}")]
    Document(#[from] TreeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StationError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        StationError::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for station configuration operations.
pub type StationResult<T> = Result<T, StationError>;
