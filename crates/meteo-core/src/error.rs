//! Error types for Meteo Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Unknown feature: {0}")]
    UnknownFeature(String),

    #[error("Missing bins for feature: {0}")]
    MissingFeature(String),

    #[error("Invalid bins for feature '{feature}': {message}")]
    InvalidBins { feature: String, message: String },

    #[error("Invalid bound: {0}")]
    InvalidBound(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
