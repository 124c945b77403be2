//! DecisionEngine - Main API for weather decisions
//!
//! # Architecture
//!
//! The module is organized into:
//! - `types`: outcome and mode types (DecisionOutcome, EngineMode)
//! - `strategy`: one evaluation strategy per mode
//! - `compiler_helper`: document loading and rule compilation
//! - `export`: table export with whole-file writes
//! - `engine`: Core DecisionEngine implementation

mod compiler_helper;
mod engine;
mod export;
mod strategy;
mod types;

// Re-export public types
pub use engine::DecisionEngine;
pub use types::{DecisionOutcome, EngineMode};
