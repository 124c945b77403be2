//! Subcommand implementations

use crate::error::Result;
use meteo_sdk::{
    DecisionEngine, DecisionOutcome, EngineConfig, EngineMode, ObservationSource, StaticSource,
    Value, WeatherResponseSource,
};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Load the engine, decide for one observation file and optionally export
/// the active table
pub fn decide(
    config: EngineConfig,
    observation: &Path,
    normalized: bool,
    export: Option<&Path>,
) -> Result<DecisionOutcome> {
    let engine = DecisionEngine::new(config)?;

    let obs = if normalized {
        StaticSource::from_path(observation)?.observe()?
    } else {
        WeatherResponseSource::from_path(observation)?.observe()?
    };

    if let Some(dest) = export {
        engine.export(dest)?;
    }

    let outcome = engine.evaluate(&obs);
    tracing::info!(
        "key={} indices={:?} fallback={}",
        outcome.key,
        outcome.indices,
        outcome.fallback
    );
    Ok(outcome)
}

/// Load the engine and write its table to `out`
pub fn export(config: EngineConfig, out: &Path) -> Result<()> {
    let engine = DecisionEngine::new(config)?;
    engine.export(out)?;
    Ok(())
}

/// Summary of a loaded engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inspection {
    pub mode: EngineMode,
    pub cardinalities: [usize; 4],
    pub key_space: usize,
    /// `None` in direct mode
    pub entries: Option<usize>,
    pub default: Value,
    pub rule: Option<String>,
}

impl fmt::Display for Inspection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "mode = {}", self.mode)?;
        writeln!(f, "bins = {:?}", self.cardinalities)?;
        writeln!(f, "key space = {}", self.key_space)?;
        match self.entries {
            Some(n) => writeln!(f, "entries = {}", n)?,
            None => writeln!(f, "entries = n/a")?,
        }
        write!(f, "default = {}", self.default)?;
        if let Some(rule) = &self.rule {
            write!(f, "\nrule = {}", rule)?;
        }
        Ok(())
    }
}

/// Load the engine and describe it
pub fn inspect(config: EngineConfig) -> Result<Inspection> {
    let engine = DecisionEngine::new(config)?;
    Ok(Inspection {
        mode: engine.mode(),
        cardinalities: engine.bins().cardinalities(),
        key_space: engine.bins().key_space_size(),
        entries: engine.table().map(|t| t.len()),
        default: engine.default_value().clone(),
        rule: engine.rule_source().map(str::to_string),
    })
}
