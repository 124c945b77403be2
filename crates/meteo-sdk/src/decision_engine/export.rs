//! Table export
//!
//! Serializes the active decision table in the `mapping` document shape.
//! Files are replaced whole: content goes to a sibling temp file which is
//! then renamed over the destination.

use super::strategy::EvaluationMode;
use crate::error::{Result, SdkError};
use meteo_core::ast::TableDocument;
use meteo_core::types::{BinTable, DecisionTable};
use meteo_core::Value;
use meteo_parser::DocumentFormat;
use meteo_runtime::RuleExpander;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

pub(super) struct Exporter;

impl Exporter {
    /// Export document for the engine state
    pub(super) fn document(
        bins: &BinTable,
        mode: &EvaluationMode,
        default: &Value,
    ) -> Result<TableDocument> {
        let table = Self::materialize(bins, mode)?;
        Ok(TableDocument::for_export(bins, table.into_owned(), default.clone()))
    }

    /// The table to export; direct-mode rules are expanded on demand
    fn materialize<'a>(bins: &BinTable, mode: &'a EvaluationMode) -> Result<Cow<'a, DecisionTable>> {
        if let Some(table) = mode.table() {
            return Ok(Cow::Borrowed(table));
        }

        match mode {
            EvaluationMode::Direct(direct) if direct.program.reads_only_indices() => {
                tracing::debug!(
                    "Expanding direct rule '{}' for export",
                    direct.program.metadata.source
                );
                Ok(Cow::Owned(RuleExpander::expand(&direct.program, bins)?))
            }
            EvaluationMode::Direct(direct) => Err(SdkError::ExportError(format!(
                "rule '{}' reads raw readings and has no table form",
                direct.program.metadata.source
            ))),
            _ => Err(SdkError::ExportError("engine has no table".to_string())),
        }
    }

    /// Serialize a document in the given format
    pub(super) fn serialize(doc: &TableDocument, format: DocumentFormat) -> Result<String> {
        let content = match format {
            DocumentFormat::Json => serde_json::to_string_pretty(doc)?,
            DocumentFormat::Yaml => serde_yaml::to_string(doc)?,
        };
        Ok(content)
    }

    /// Write `doc` to `dest`, format chosen by extension
    pub(super) fn write(doc: &TableDocument, dest: &Path) -> Result<()> {
        let content = Self::serialize(doc, DocumentFormat::from_path(dest))?;

        let tmp = temp_path(dest);
        std::fs::write(&tmp, content)?;
        if let Err(e) = std::fs::rename(&tmp, dest) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }

        tracing::info!("Exported decision table to {}", dest.display());
        Ok(())
    }
}

/// `table.json` -> `table.json.tmp`, in the same directory
fn temp_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    dest.with_file_name(name)
}
