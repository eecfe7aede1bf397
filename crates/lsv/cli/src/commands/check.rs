//! Safety audit of an existing settings map

use crate::error::{CliError, CliResult};
use crate::input::read_settings;
use crate::output::{self, OutputFormat};
use lsv_tuner_engine::{BoundViolation, EnforcementContext, SafetyEnforcer};
use lsv_tuner_types::{Choice, FunctionValueMap, MotorCondition};
use serde::Serialize;
use tabled::Tabled;

#[derive(Serialize, Tabled)]
struct CorrectionRow {
    #[tabled(rename = "F")]
    id: u8,
    #[tabled(rename = "Function")]
    function: &'static str,
    #[tabled(rename = "Given")]
    given: String,
    #[tabled(rename = "Safe value")]
    corrected: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckReport {
    safe: bool,
    motor_condition: MotorCondition,
    corrections: Vec<BoundViolation>,
    enforced: FunctionValueMap,
}

/// Audit a settings file against the enforcer. Fails when corrections are needed.
pub fn execute(settings: &str, motor_condition: &str, format: OutputFormat) -> CliResult<()> {
    let condition = MotorCondition::parse(motor_condition).ok_or_else(|| {
        CliError::InvalidArgument(format!(
            "Unknown motor condition '{}'. Use: {}",
            motor_condition,
            MotorCondition::allowed()
        ))
    })?;
    let context = EnforcementContext::new(condition);
    let candidate = read_settings(settings)?;
    let corrections = SafetyEnforcer::audit(&candidate, &context);

    match format {
        OutputFormat::Table => {
            output::print_header("Safety Check");
            if corrections.is_empty() {
                output::print_success("All settings are within safe bounds");
            } else {
                let rows: Vec<CorrectionRow> = corrections
                    .iter()
                    .map(|c| CorrectionRow {
                        id: c.function.number(),
                        function: c.function.name(),
                        given: c
                            .original
                            .map(|v| v.to_string())
                            .unwrap_or_else(|| "unset".into()),
                        corrected: c.corrected,
                    })
                    .collect();
                output::print_output(rows, format)?;
            }
        }
        _ => output::print_single(
            &CheckReport {
                safe: corrections.is_empty(),
                motor_condition: condition,
                corrections: corrections.clone(),
                enforced: SafetyEnforcer::enforce(&candidate, &context),
            },
            format,
        )?,
    }

    if corrections.is_empty() {
        Ok(())
    } else {
        Err(CliError::UnsafeSettings(corrections.len()))
    }
}
