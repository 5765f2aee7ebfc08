//! CLI-level errors (wraps domain and storage errors)

use thiserror::Error;

use crate::config::SettingsError;
use crate::domain::DomainError;
use crate::storage::StorageError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Config(#[from] SettingsError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::Config(_) => crate::exitcode::CONFIG,
            CliError::Domain(_) => crate::exitcode::DATAERR,
            CliError::Storage(e) => match e {
                StorageError::Io(_) => crate::exitcode::IOERR,
                StorageError::InvalidDocument(_) => crate::exitcode::DATAERR,
                StorageError::Serialize(_) => crate::exitcode::SOFTWARE,
            },
        }
    }
}
