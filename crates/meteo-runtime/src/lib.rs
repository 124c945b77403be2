//! Meteo Runtime - Execution engine for Meteo decisions
//!
//! This crate provides the key encoder, the IR executor used for rule
//! evaluation, decision table lookup and rule-to-table expansion.

pub mod encoder;
pub mod engine;
pub mod error;
pub mod executor;
pub mod table;

// Re-export main types
pub use encoder::{EncodedObservation, KeyEncoder};
pub use error::{Result, RuntimeError};
pub use executor::{index_bindings, observation_bindings, Bindings, Executor};
pub use table::{Resolution, RuleExpander, TableLookup};
