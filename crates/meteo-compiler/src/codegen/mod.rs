//! Code generation module
//!
//! This module contains the code generator that transforms rule
//! expressions into IR.

pub mod expression_codegen;

// Re-export for convenience
pub use expression_codegen::ExpressionCompiler;
