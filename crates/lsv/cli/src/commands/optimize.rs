//! Settings optimization command

use crate::error::{CliError, CliResult};
use crate::input::read_profile;
use crate::output::{self, OutputFormat};
use clap::Args;
use colored::Colorize;
use lsv_tuner_engine::TuningEngine;
use lsv_tuner_types::{FunctionValueMap, ValidationWarning};
use serde::Serialize;
use tracing::debug;

/// Arguments for `optimize`
#[derive(Args, Debug)]
pub struct OptimizeArgs {
    /// Profile input JSON file, or `-` for stdin
    pub input: String,

    /// Base preset to start from
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Merge the preset's profile and priority hints into the input first
    #[arg(long)]
    pub apply_hints: bool,

    /// Optimize even when validation reports errors
    #[arg(long)]
    pub skip_validation: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OptimizeReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    preset: Option<&'a str>,
    settings: &'a FunctionValueMap,
    warnings: &'a [ValidationWarning],
}

/// Validate, then optimize and print the resulting settings
pub fn execute(
    engine: &TuningEngine,
    args: OptimizeArgs,
    default_preset: Option<&str>,
    format: OutputFormat,
) -> CliResult<()> {
    let mut profile = read_profile(&args.input)?;
    let preset = args.preset.as_deref().or(default_preset);

    if args.apply_hints {
        let name = preset.ok_or_else(|| {
            CliError::InvalidArgument("--apply-hints needs a preset (use --preset)".into())
        })?;
        profile = engine
            .merge_input_data(name, &profile)
            .ok_or_else(|| CliError::NotFound(format!("preset '{}'", name)))?;
        debug!(preset = name, "Applied preset hints");
    }

    let validation = engine.validate(&profile);
    if !validation.is_valid && !args.skip_validation {
        match format {
            OutputFormat::Table => output::print_validation(&validation),
            _ => output::print_single(&validation, format)?,
        }
        return Err(CliError::ValidationFailed(validation.errors.len()));
    }

    let settings = engine.optimize(&profile, preset)?;

    match format {
        OutputFormat::Table => {
            output::print_header("Optimized Controller Settings");
            if let Some(name) = preset {
                println!("{}: {}", "Base preset".bold(), name);
            }
            if args.apply_hints {
                output::print_info("Preset hints merged into the profile");
            }
            if !validation.is_valid {
                output::print_warning("Validation errors were skipped");
            }
            println!();
            output::print_output(output::setting_rows(&settings), format)?;
            if !validation.warnings.is_empty() {
                println!();
                output::print_warnings(&validation.warnings);
            }
        }
        _ => output::print_single(
            &OptimizeReport {
                preset,
                settings: &settings,
                warnings: &validation.warnings,
            },
            format,
        )?,
    }

    Ok(())
}
