//! Meteo Compiler - rule expression to IR compiler
//!
//! This crate compiles parsed Meteo rule expressions into executable IR
//! (Intermediate Representation) programs.

pub mod codegen;
pub mod compiler;
pub mod error;
pub mod optimizer;
pub mod semantic;

// Re-export main types
pub use compiler::{Compiler, CompilerOptions};
pub use error::{CompileError, Result};

pub use codegen::ExpressionCompiler;
pub use optimizer::ConstantFolder;
pub use semantic::SemanticAnalyzer;
