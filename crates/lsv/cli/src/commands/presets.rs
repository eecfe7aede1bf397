//! Preset catalog commands

use crate::error::{CliError, CliResult};
use crate::output::{self, OutputFormat};
use clap::Subcommand;
use colored::Colorize;
use lsv_tuner_engine::{Preset, TuningEngine};
use lsv_tuner_types::FunctionValueMap;
use serde::Serialize;
use tabled::Tabled;

/// Preset subcommands
#[derive(Subcommand)]
pub enum PresetCommands {
    /// List available presets
    List,

    /// Show a preset and its enforced settings
    Show {
        /// Preset name
        name: String,
    },
}

#[derive(Serialize, Tabled)]
struct PresetRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Overrides")]
    overrides: usize,
}

#[derive(Serialize)]
struct PresetDetail<'a> {
    #[serde(flatten)]
    preset: &'a Preset,
    settings: FunctionValueMap,
}

/// Execute preset command
pub fn execute(engine: &TuningEngine, command: PresetCommands, format: OutputFormat) -> CliResult<()> {
    match command {
        PresetCommands::List => list_presets(engine, format),
        PresetCommands::Show { name } => show_preset(engine, &name, format),
    }
}

fn list_presets(engine: &TuningEngine, format: OutputFormat) -> CliResult<()> {
    let rows: Vec<PresetRow> = engine
        .catalog()
        .iter()
        .map(|preset| PresetRow {
            name: preset.name.clone(),
            description: preset.description.clone(),
            overrides: preset.overrides.len(),
        })
        .collect();

    if let OutputFormat::Table = format {
        output::print_header("Tuning Presets");
    }
    output::print_output(rows, format)
}

fn show_preset(engine: &TuningEngine, name: &str, format: OutputFormat) -> CliResult<()> {
    let preset = engine
        .get_preset(name)
        .ok_or_else(|| CliError::NotFound(format!("preset '{}'", name)))?;
    let settings = engine
        .get_preset_settings(name, &engine.factory_defaults())
        .ok_or_else(|| CliError::NotFound(format!("preset '{}'", name)))?;

    match format {
        OutputFormat::Table => {
            output::print_header(&format!("Preset: {}", preset.name));
            println!("{}", preset.description);
            println!();
            for feature in &preset.features {
                println!("  {} {}", "•".green(), feature);
            }
            println!();
            output::print_output(output::setting_rows(&settings), format)?;
        }
        _ => output::print_single(&PresetDetail { preset, settings }, format)?,
    }

    Ok(())
}
