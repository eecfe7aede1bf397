//! Input validation command

use crate::error::{CliError, CliResult};
use crate::input::read_profile;
use crate::output::{self, OutputFormat};
use lsv_tuner_engine::TuningEngine;

/// Validate a profile and fail when it carries errors
pub fn execute(engine: &TuningEngine, input: &str, format: OutputFormat) -> CliResult<()> {
    let profile = read_profile(input)?;
    let result = engine.validate(&profile);

    match format {
        OutputFormat::Table => {
            output::print_header("Profile Validation");
            println!(
                "Sections: {}",
                profile
                    .sections_present()
                    .iter()
                    .map(|s| s.key())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            println!();
            output::print_validation(&result);
        }
        _ => output::print_single(&result, format)?,
    }

    if result.is_valid {
        Ok(())
    } else {
        Err(CliError::ValidationFailed(result.errors.len()))
    }
}
