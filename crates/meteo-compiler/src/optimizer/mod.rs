//! Optimization module
//!
//! This module provides optimizations for Meteo rule expressions.

pub mod constant_folding;

// Re-export for convenience
pub use constant_folding::ConstantFolder;
