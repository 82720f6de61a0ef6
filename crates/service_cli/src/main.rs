//! Arrears CLI - Command Line Operations for Backward-Looking Caplets
//!
//! This is the operational entry point for the arrears workspace.
//!
//! # Commands
//!
//! - `arrears calibrate` - Bootstrap the EUR curve and calibrate Hull-White
//! - `arrears ladder` - Compare backward and classical caplet volatilities
//! - `arrears value --maturity <years>` - Value a single caplet or floorlet
//! - `arrears check` - Validate the configuration and built-in market data
//!
//! # Architecture
//!
//! As the **S**ervice layer on top of the core, models, pricing and
//! optimiser crates, this binary owns configuration, tracing setup and
//! report formatting. Library crates only return records.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod report;

use commands::value::ValueArgs;
use config::{ArrearsConfig, LogLevel};
use report::OutputFormat;

/// Configuration file read when `--config` is not given, if present.
const DEFAULT_CONFIG_PATH: &str = "arrears.toml";

/// Backward-looking caplet valuation and consistency checks
#[derive(Parser)]
#[command(name = "arrears")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path [default: arrears.toml if present]
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calibrate Hull-White to the EUR swaption grid
    Calibrate {
        /// Output format (table, csv, json)
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Output file for calibrated parameters (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run the consistency ladder on calibrated and uncalibrated models
    Ladder {
        /// Output format (table, csv, json)
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Also print average backward and classical rates
        #[arg(short, long)]
        diagnostics: bool,
    },

    /// Value a single caplet or floorlet
    Value {
        /// Output format (table, csv, json)
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        #[command(flatten)]
        args: ValueArgs,
    },

    /// Check configuration and built-in market data
    Check,
}

fn init_tracing(level: LogLevel, verbose: bool) {
    let fallback = if verbose {
        LogLevel::Debug.as_filter_str()
    } else {
        level.as_filter_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // Reports go to stdout, logs to stderr
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config =
        ArrearsConfig::load_or_default(cli.config.as_deref(), Path::new(DEFAULT_CONFIG_PATH))
            .and_then(ArrearsConfig::with_env_override)
            .context("failed to load configuration")?;

    init_tracing(config.log_level, cli.verbose);
    debug!(?config, "Configuration loaded");
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    if !matches!(cli.command, Commands::Check) {
        config.validate().context("invalid configuration")?;
    }

    match cli.command {
        Commands::Calibrate { format, output } => {
            commands::calibrate::run(&config, format, output.as_deref())
        }
        Commands::Ladder {
            format,
            diagnostics,
        } => commands::ladder::run(&config, format, diagnostics),
        Commands::Value { format, args } => commands::value::run(&config, format, &args),
        Commands::Check => commands::check::run(&config, &mut std::io::stdout().lock()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_value_command() {
        let cli = Cli::try_parse_from([
            "arrears",
            "--verbose",
            "value",
            "--maturity",
            "2",
            "--strike",
            "-0.005",
            "--unit",
            "VALUE",
            "--convention",
            "classical",
            "--floorlet",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert!(cli.config.is_none());
        match cli.command {
            Commands::Value { format, args } => {
                assert_eq!(format, OutputFormat::Table);
                assert_eq!(args.maturity, 2.0);
                assert_eq!(args.strike, Some(-0.005));
                assert!(args.floorlet);
                assert_eq!(args.convention, commands::value::ConventionArg::Classical);
            }
            _ => panic!("expected the value command"),
        }
    }

    #[test]
    fn test_parse_ladder_command() {
        let cli = Cli::try_parse_from([
            "arrears",
            "ladder",
            "--format",
            "csv",
            "--diagnostics",
            "--config",
            "custom.toml",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(
            cli.command,
            Commands::Ladder {
                format: OutputFormat::Csv,
                diagnostics: true
            }
        ));
    }

    #[test]
    fn test_value_requires_maturity() {
        assert!(Cli::try_parse_from(["arrears", "value"]).is_err());
    }
}
