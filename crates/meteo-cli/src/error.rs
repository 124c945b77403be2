//! CLI error types

use thiserror::Error;

/// CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// No table given on the command line or in settings
    #[error("No decision table given: pass --table or set METEO_TABLE")]
    MissingTable,

    /// Decision engine error
    #[error("Engine error: {0}")]
    EngineError(#[from] meteo_sdk::SdkError),
}

pub type Result<T> = std::result::Result<T, CliError>;
