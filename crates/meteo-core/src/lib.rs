//! Meteo Core - Core types and definitions for the Meteo decision engine
//!
//! This crate provides the fundamental types used across the Meteo workspace:
//! - Value types for decisions and rule evaluation
//! - Weather features, bin tables, observations and discrete keys
//! - AST (Abstract Syntax Tree) definitions for decision rules
//! - IR (Intermediate Representation) definitions
//! - Error types

pub mod ast;
pub mod error;
pub mod ir;
pub mod types;

// Re-export commonly used types
pub use error::CoreError;
pub use types::{
    Bin, BinTable, DecisionTable, DiscreteKey, Feature, Observation, Value, WindVector,
};
