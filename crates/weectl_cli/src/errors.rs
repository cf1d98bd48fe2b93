use station_config::StationError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the weectl CLI application.
#[derive(Error, Debug)]
pub enum Error {
    /// Creating or reconfiguring the station failed.
    ///
    /// The configuration file is left as it was when this is returned.
    #[error("{0}")]
    Station(#[from] StationError),

    /// Invalid command-line arguments were provided.
    ///
    /// This error is returned when the user provides arguments that parse but
    /// cannot be used together.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

impl Error {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArguments(_) => 2,
            Error::Station(_) => 1,
        }
    }
}
