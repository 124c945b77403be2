//! Table document loading and rule compilation

use super::strategy::{CompiledRuleStrategy, DirectStrategy, EvaluationMode, TableStrategy};
use crate::config::{EngineConfig, DEFAULT_LABEL};
use crate::error::{Result, SdkError};
use meteo_compiler::Compiler;
use meteo_core::ast::EvaluationKind;
use meteo_core::ir::RuleScope;
use meteo_core::types::BinTable;
use meteo_core::Value;
use meteo_parser::{DecisionSource, DocumentFormat, DocumentParser, ParsedDocument};
use meteo_runtime::{RuleExpander, TableLookup};

/// Everything an engine needs, loaded from one document
pub(super) struct LoadedTable {
    pub(super) bins: BinTable,
    pub(super) strategy: EvaluationMode,
    pub(super) default: Value,
}

pub(super) struct CompilerHelper;

impl CompilerHelper {
    /// Read the configured document and build the evaluation strategy
    pub(super) fn load(config: &EngineConfig) -> Result<LoadedTable> {
        let (content, format, origin) = match (&config.table_file, &config.table_content) {
            (Some(_), Some(_)) => {
                return Err(SdkError::ConfigError(
                    "set either a table file or table content, not both".to_string(),
                ))
            }
            (None, None) => {
                return Err(SdkError::ConfigError(
                    "no decision table source configured".to_string(),
                ))
            }
            (Some(path), None) => {
                tracing::debug!("Loading decision table: {}", path.display());
                let content = std::fs::read_to_string(path)?;
                (content, DocumentFormat::from_path(path), path.display().to_string())
            }
            (None, Some((content, format))) => (content.clone(), *format, "<content>".to_string()),
        };

        let parsed = DocumentParser::parse_and_interpret(&content, format, config.bin_policy)?;
        let loaded = Self::build(parsed, config)?;

        tracing::info!(
            "Loaded decision table '{}': mode={}, key space={}",
            origin,
            loaded.strategy.mode(),
            loaded.bins.key_space_size()
        );

        Ok(loaded)
    }

    fn build(parsed: ParsedDocument, config: &EngineConfig) -> Result<LoadedTable> {
        let ParsedDocument {
            bins,
            source,
            default,
        } = parsed;

        let default = config
            .default_label
            .clone()
            .or(default)
            .unwrap_or_else(|| Value::label(DEFAULT_LABEL));

        let compiler = Compiler::with_options((&config.compiler_options).into());

        let strategy = match source {
            DecisionSource::Mapping(mapping) => {
                tracing::debug!("Using explicit mapping with {} entries", mapping.len());
                EvaluationMode::Table(TableStrategy {
                    lookup: TableLookup::new(mapping, default.clone()),
                })
            }
            DecisionSource::Rule {
                text,
                expression,
                evaluation: EvaluationKind::Table,
            } => {
                let program = compiler.compile_rule(&expression, &text, RuleScope::Indices)?;
                let table = RuleExpander::expand(&program, &bins)?;
                EvaluationMode::Compiled(CompiledRuleStrategy {
                    program,
                    lookup: TableLookup::new(table, default.clone()),
                })
            }
            DecisionSource::Rule {
                text,
                expression,
                evaluation: EvaluationKind::Direct,
            } => {
                let program = compiler.compile_rule(&expression, &text, RuleScope::Readings)?;
                if program.reads_only_indices() {
                    // Index-only rules have a finite key space, so check every key now
                    // instead of failing open at decision time
                    RuleExpander::expand(&program, &bins)?;
                }
                EvaluationMode::Direct(DirectStrategy {
                    program,
                    default: default.clone(),
                })
            }
        };

        Ok(LoadedTable {
            bins,
            strategy,
            default,
        })
    }
}
