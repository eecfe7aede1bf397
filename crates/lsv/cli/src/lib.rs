//! lsv-tune - Command-line interface for the LSV controller tuning engine
//!
//! This CLI lets technicians and riders:
//! - Validate a vehicle profile before tuning
//! - Compute safe controller settings from a profile and priorities
//! - Browse the preset catalog
//! - Audit an existing settings map against the hardware safety rules

use clap::{Parser, Subcommand};
use colored::Colorize;
use lsv_tuner_engine::{PresetCatalog, TuningEngine};
use std::ffi::OsString;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod input;
mod output;

use commands::{check, defaults, optimize, presets, validate};
pub use config::CliConfig;
pub use error::{CliError, CliResult};

/// lsv-tune application
#[derive(Parser)]
#[command(name = "lsv-tune")]
#[command(about = "LSV motor controller tuning", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "LSV_TUNE_CONFIG")]
    config: Option<String>,

    /// Output format (table, json, yaml)
    #[arg(short, long, default_value = "table")]
    output: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Validate a profile input file
    Validate {
        /// Profile input JSON file, or `-` for stdin
        input: String,
    },

    /// Compute controller settings from a profile
    Optimize(optimize::OptimizeArgs),

    /// Browse tuning presets
    Presets {
        #[command(subcommand)]
        command: presets::PresetCommands,
    },

    /// Show factory defaults and hardware bounds
    Defaults,

    /// Audit a settings map against the safety rules
    Check {
        /// Settings JSON file keyed by function number, or `-` for stdin
        settings: String,

        /// Motor condition (good, worn, sparking)
        #[arg(short, long, default_value = "good")]
        motor_condition: String,
    },

    /// Show the effective configuration
    Config,
}

/// Run using the current process arguments.
pub fn run() -> CliResult<()> {
    run_with_args(std::env::args_os())
}

/// Run using the provided argument iterator.
pub fn run_with_args<I, T>(args: I) -> CliResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    // Logs go to stderr so stdout stays machine-readable
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let config = CliConfig::load(cli.config.as_deref())?;
    let engine = TuningEngine::new(PresetCatalog::builtin(), &config.engine)?;

    match cli.command {
        Commands::Validate { input } => validate::execute(&engine, &input, cli.output),
        Commands::Optimize(args) => optimize::execute(
            &engine,
            args,
            config.default_preset.as_deref(),
            cli.output,
        ),
        Commands::Presets { command } => presets::execute(&engine, command, cli.output),
        Commands::Defaults => defaults::execute(cli.output),
        Commands::Check {
            settings,
            motor_condition,
        } => check::execute(&settings, &motor_condition, cli.output),
        Commands::Config => show_config(&config, cli.config.as_deref(), cli.output),
    }
}

fn show_config(config: &CliConfig, path: Option<&str>, format: output::OutputFormat) -> CliResult<()> {
    match format {
        output::OutputFormat::Table => {
            output::print_header("lsv-tune Configuration");
            println!("{}: {}", "Source".bold(), path.unwrap_or("default location"));
            println!();
            print!("{}", config.to_toml()?);
            Ok(())
        }
        _ => output::print_single(config, format),
    }
}

/// Report a failed run on stderr.
pub fn report_error(err: &CliError) {
    output::print_error(&err.to_string());
}
