//! Output formatting for CLI

use crate::error::CliResult;
use clap::ValueEnum;
use colored::*;
use lsv_tuner_types::{
    FunctionId, FunctionValueMap, ValidationResult, ValidationWarning, WarningLevel,
};
use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// One controller function in a settings table
#[derive(Debug, Serialize, Tabled)]
pub struct SettingRow {
    #[tabled(rename = "F")]
    pub id: u8,
    #[tabled(rename = "Function")]
    pub function: &'static str,
    #[tabled(rename = "Value")]
    pub value: i32,
    #[tabled(rename = "Default")]
    pub default: i32,
    #[tabled(rename = "Change")]
    pub change: String,
    #[tabled(rename = "Range")]
    pub range: String,
}

/// Rows for every recognized function, compared against factory defaults.
pub fn setting_rows(settings: &FunctionValueMap) -> Vec<SettingRow> {
    FunctionId::ALL
        .iter()
        .map(|id| {
            let spec = id.spec();
            let value = settings.value(*id);
            let delta = value - spec.default;
            SettingRow {
                id: id.number(),
                function: spec.name,
                value,
                default: spec.default,
                change: match delta {
                    0 => String::new(),
                    d if d > 0 => format!("+{}", d),
                    d => d.to_string(),
                },
                range: format!("{}-{} {}", spec.min, spec.max, spec.unit),
            }
        })
        .collect()
}

/// Print a vector of items in the specified format
pub fn print_output<T: Serialize + Tabled>(data: Vec<T>, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Table => {
            if data.is_empty() {
                println!("{}", "No results".dimmed());
            } else {
                println!("{}", Table::new(data));
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&data)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&data)?),
    }
    Ok(())
}

/// Print a single structured item as JSON or YAML
pub fn print_single<T: Serialize>(data: &T, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Table | OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?)
        }
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(data)?),
    }
    Ok(())
}

/// Bold section header with an underline
pub fn print_header(title: &str) {
    println!("{}", title.bold().cyan());
    println!("{}", "=".repeat(60));
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

fn level_label(level: Option<WarningLevel>) -> ColoredString {
    match level {
        Some(WarningLevel::High) => "high".red().bold(),
        Some(WarningLevel::Medium) => "medium".yellow(),
        Some(WarningLevel::Low) => "low".normal(),
        None => "note".dimmed(),
    }
}

pub fn print_warnings(warnings: &[ValidationWarning]) {
    for warning in warnings {
        let field = warning.field.as_deref().unwrap_or("-");
        print_warning(&format!(
            "[{}] {}: {}",
            level_label(warning.level),
            field,
            warning.message
        ));
        if let Some(suggestion) = &warning.suggestion {
            println!("    {} {}", "→".dimmed(), suggestion);
        }
    }
}

/// Table rendering of a validation report
pub fn print_validation(result: &ValidationResult) {
    if result.is_valid {
        print_success("Input is valid");
    } else {
        for error in &result.errors {
            println!("{} {}: {}", "✗".red(), error.field.bold(), error.message);
        }
    }
    print_warnings(&result.warnings);
}
