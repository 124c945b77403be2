//! CLI configuration
//!
//! Settings are layered: `config/meteo.{toml,yaml,json}` (optional), then
//! `METEO_*` environment variables (a `.env` file is loaded first). Command
//! line flags are applied on top by the caller.

use meteo_sdk::{BinPolicy, EngineConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default tracing filter when neither `RUST_LOG` nor `log_filter` is set
pub const DEFAULT_LOG_FILTER: &str = "meteo_cli=info,meteo_sdk=info,meteo_runtime=warn";

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Decision table used when `--table` is not given
    #[serde(default)]
    pub table: Option<PathBuf>,

    /// Bin validation policy
    #[serde(default)]
    pub bin_policy: BinPolicy,

    /// Fail-open label overriding the document's `default`
    #[serde(default)]
    pub default_label: Option<String>,

    /// Tracing filter directives
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            table: None,
            bin_policy: BinPolicy::default(),
            default_label: None,
            log_filter: default_log_filter(),
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let config_result = config::Config::builder()
            .add_source(config::File::with_name("config/meteo").required(false))
            .add_source(config::Environment::with_prefix("METEO"))
            .build();

        match config_result {
            Ok(cfg) => cfg
                .try_deserialize()
                .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e)),
            Err(e) => {
                tracing::debug!("No usable config sources ({}), using defaults", e);
                Ok(Self::default())
            }
        }
    }

    /// Engine configuration for a table, flags taking precedence over settings
    pub fn engine_config(
        &self,
        table: Option<PathBuf>,
        bin_policy: Option<BinPolicy>,
    ) -> crate::error::Result<EngineConfig> {
        let table = table
            .or_else(|| self.table.clone())
            .ok_or(crate::error::CliError::MissingTable)?;

        let mut config = EngineConfig::new()
            .with_table_file(table)
            .with_bin_policy(bin_policy.unwrap_or(self.bin_policy));
        if let Some(label) = &self.default_label {
            config = config.with_default_label(label.as_str());
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_config_default() {
        let config = CliConfig::default();
        assert!(config.table.is_none());
        assert_eq!(config.bin_policy, BinPolicy::Strict);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_deserialize_partial_settings() {
        let config: CliConfig =
            serde_json::from_str(r#"{"table": "tables/severity.yaml", "bin_policy": "lenient"}"#).unwrap();
        assert_eq!(config.table, Some(PathBuf::from("tables/severity.yaml")));
        assert_eq!(config.bin_policy, BinPolicy::Lenient);
        assert!(config.default_label.is_none());
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_flags_take_precedence() {
        let config = CliConfig {
            table: Some(PathBuf::from("settings.json")),
            bin_policy: BinPolicy::Lenient,
            default_label: Some("C".to_string()),
            ..CliConfig::default()
        };

        let engine = config
            .engine_config(Some(PathBuf::from("flag.json")), Some(BinPolicy::Strict))
            .unwrap();
        assert_eq!(engine.table_file, Some(PathBuf::from("flag.json")));
        assert_eq!(engine.bin_policy, BinPolicy::Strict);
        assert_eq!(engine.default_label, Some(meteo_sdk::Value::label("C")));

        let engine = config.engine_config(None, None).unwrap();
        assert_eq!(engine.table_file, Some(PathBuf::from("settings.json")));
        assert_eq!(engine.bin_policy, BinPolicy::Lenient);
    }

    #[test]
    fn test_missing_table() {
        let result = CliConfig::default().engine_config(None, None);
        assert!(matches!(result, Err(crate::error::CliError::MissingTable)));
    }
}
