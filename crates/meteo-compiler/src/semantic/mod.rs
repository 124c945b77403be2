//! Semantic analysis module
//!
//! This module checks rule expressions against their input scope.

pub mod analyzer;

// Re-export for convenience
pub use analyzer::{SemanticAnalyzer, BUILTIN_FUNCTIONS, INDEX_VARIABLES};
