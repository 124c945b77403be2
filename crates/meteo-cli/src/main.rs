//! Meteo decision engine CLI
//!
//! Usage:
//! ```bash
//! # Decide for a weather provider response
//! meteo decide --table tables/severity.yaml --observation response.json
//!
//! # Decide for a normalized observation and keep the expanded table
//! meteo decide --table rule.json --observation obs.json --normalized --export table.json
//!
//! # Export the active table
//! meteo export --table rule.json --out table.yaml
//!
//! # Describe a table
//! meteo inspect --table table.json
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use meteo_cli::commands;
use meteo_cli::config::CliConfig;
use meteo_sdk::BinPolicy;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "meteo",
    about = "Weather observation decision engine",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Bin validation policy (strict or lenient)
    #[arg(long, global = true)]
    bin_policy: Option<BinPolicy>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Decide for one observation
    Decide {
        /// Decision table document (JSON or YAML)
        #[arg(long)]
        table: Option<PathBuf>,

        /// Observation file
        #[arg(long)]
        observation: PathBuf,

        /// Observation file is a normalized record rather than a provider response
        #[arg(long)]
        normalized: bool,

        /// Also write the active table here
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Write the active decision table
    Export {
        /// Decision table document (JSON or YAML)
        #[arg(long)]
        table: Option<PathBuf>,

        /// Destination; `.yaml`/`.yml` selects YAML, anything else JSON
        #[arg(long)]
        out: PathBuf,
    },

    /// Describe a decision table
    Inspect {
        /// Decision table document (JSON or YAML)
        #[arg(long)]
        table: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = CliConfig::load()?;

    init_tracing(&settings, cli.verbose)?;
    tracing::debug!("Loaded configuration: {:?}", settings);

    match cli.command {
        Command::Decide {
            table,
            observation,
            normalized,
            export,
        } => {
            let config = settings.engine_config(table, cli.bin_policy)?;
            let outcome = commands::decide(config, &observation, normalized, export.as_deref())?;
            println!("decision = {}", outcome.decision);
        }
        Command::Export { table, out } => {
            let config = settings.engine_config(table, cli.bin_policy)?;
            commands::export(config, &out)?;
            println!("exported {}", out.display());
        }
        Command::Inspect { table } => {
            let config = settings.engine_config(table, cli.bin_policy)?;
            println!("{}", commands::inspect(config)?);
        }
    }

    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing(settings: &CliConfig, verbose: bool) -> Result<()> {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| settings.log_filter.as_str().into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
