//! Factory defaults and hardware bounds

use crate::error::CliResult;
use crate::output::{self, OutputFormat};
use lsv_tuner_types::{SafetyDirection, FUNCTION_TABLE};
use serde::Serialize;
use tabled::Tabled;

#[derive(Serialize, Tabled)]
struct FunctionRow {
    #[tabled(rename = "F")]
    id: u8,
    #[tabled(rename = "Function")]
    name: &'static str,
    #[tabled(rename = "Unit")]
    unit: &'static str,
    #[tabled(rename = "Default")]
    default: i32,
    #[tabled(rename = "Min")]
    min: i32,
    #[tabled(rename = "Max")]
    max: i32,
    #[tabled(rename = "Raising it is")]
    direction: &'static str,
}

/// Print the factory baseline with per-function bounds
pub fn execute(format: OutputFormat) -> CliResult<()> {
    let rows: Vec<FunctionRow> = FUNCTION_TABLE
        .iter()
        .map(|spec| FunctionRow {
            id: spec.id.number(),
            name: spec.name,
            unit: spec.unit,
            default: spec.default,
            min: spec.min,
            max: spec.max,
            direction: match spec.direction {
                SafetyDirection::Aggressive => "aggressive",
                SafetyDirection::Protective => "protective",
            },
        })
        .collect();

    if let OutputFormat::Table = format {
        output::print_header("Factory Defaults");
    }
    output::print_output(rows, format)
}
