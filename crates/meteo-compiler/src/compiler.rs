//! Main compiler
//!
//! Provides a unified interface for compiling rule expressions into IR
//! programs: semantic analysis, constant folding, then code generation.

use crate::codegen::ExpressionCompiler;
use crate::error::{CompileError, Result};
use crate::optimizer::ConstantFolder;
use crate::semantic::SemanticAnalyzer;
use meteo_core::ast::Expression;
use meteo_core::ir::{Instruction, Program, ProgramMetadata, RuleScope};
use meteo_parser::ExpressionParser;

/// Compiler options
#[derive(Debug, Clone)]
pub struct CompilerOptions {
    /// Enable semantic analysis
    pub enable_semantic_analysis: bool,
    /// Enable constant folding optimization
    pub enable_constant_folding: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            enable_semantic_analysis: true,
            enable_constant_folding: true,
        }
    }
}

/// The main Meteo rule compiler
pub struct Compiler {
    /// Compiler options
    options: CompilerOptions,
    /// Constant folder
    constant_folder: ConstantFolder,
}

impl Compiler {
    /// Create a new compiler instance with default options
    pub fn new() -> Self {
        Self::with_options(CompilerOptions::default())
    }

    /// Create a new compiler instance with custom options
    pub fn with_options(options: CompilerOptions) -> Self {
        Self {
            options,
            constant_folder: ConstantFolder::new(),
        }
    }

    /// Compile a parsed rule into an IR program
    pub fn compile_rule(
        &self,
        expr: &Expression,
        source: &str,
        scope: RuleScope,
    ) -> Result<Program> {
        // Semantic analysis
        if self.options.enable_semantic_analysis {
            SemanticAnalyzer::for_scope(scope).analyze_expression(expr)?;
        }

        // Optimization
        let folded;
        let expr = if self.options.enable_constant_folding {
            folded = self.constant_folder.fold(expr);
            &folded
        } else {
            expr
        };

        // Code generation
        let mut instructions = ExpressionCompiler::compile(expr)?;
        instructions.push(Instruction::Return);

        let metadata = ProgramMetadata::for_rule(source, scope).with_variables(expr.variables());

        tracing::debug!(
            "Compiled rule '{}' into {} instructions (scope {:?})",
            source,
            instructions.len(),
            scope
        );

        Ok(Program::new(instructions, metadata))
    }

    /// Parse and compile rule text
    pub fn compile_source(&self, source: &str, scope: RuleScope) -> Result<Program> {
        let expr = ExpressionParser::parse(source)
            .map_err(|e| CompileError::InvalidExpression(e.to_string()))?;
        self.compile_rule(&expr, source, scope)
    }

    /// Get the compiler options
    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}
