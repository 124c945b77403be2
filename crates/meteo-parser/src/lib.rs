//! Meteo Parser - text to AST parser for the Meteo decision engine
//!
//! This crate converts decision table documents (JSON or YAML) and rule
//! expressions into Meteo AST structures.

pub mod bins_parser;
pub mod document_parser;
pub mod error;
pub mod expression_parser;
pub mod lexer;

// Re-export main parser types
pub use bins_parser::BinsParser;
pub use document_parser::{DecisionSource, DocumentFormat, DocumentParser, ParsedDocument};
pub use error::{ParseError, Result};
pub use expression_parser::{ExpressionParser, MAX_NESTING_DEPTH};
pub use lexer::{Lexer, Token};
