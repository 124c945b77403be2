//! Meteo Decision Engine SDK
//!
//! High-level API for loading decision tables and deciding on weather
//! observations.

pub mod builder;
pub mod config;
pub mod decision_engine;
pub mod error;
pub mod source;

// Re-export main types
pub use builder::DecisionEngineBuilder;
pub use config::{CompilerOptions, EngineConfig, DEFAULT_LABEL};
pub use decision_engine::{DecisionEngine, DecisionOutcome, EngineMode};
pub use error::{Result, SdkError};
pub use source::{ObservationSource, StaticSource, WeatherResponseSource};

// Re-export commonly used types from dependencies
pub use meteo_core::types::{BinPolicy, BinTable, DecisionTable, DiscreteKey, Feature, Observation};
pub use meteo_core::Value;
pub use meteo_parser::DocumentFormat;
