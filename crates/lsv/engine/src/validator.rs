//! Rule engine over raw profile input.
//!
//! Rules run in a fixed order (required fields, per-section field checks,
//! cross-field heuristics) so identical input always yields an identical
//! report. Only present sections are inspected, which lets a form be
//! validated one step at a time.

use lsv_tuner_types::{
    BatteryAge, BatteryChemistry, Choice, Completeness, EnvironmentSection, MotorCondition,
    ProfileInput, RawField, Section, TemperatureRange, Terrain, TuningProfile, ValidationError,
    ValidationResult, ValidationWarning, VehicleLoad, VehicleModel, WarningLevel,
};
use tracing::debug;

use crate::config::{NumericRange, ValidationRanges};

/// Gear ratio at or above which oversized tires are considered compensated.
pub const COMPENSATING_GEAR_RATIO: f64 = 14.0;
/// Speed weight from which a degraded motor draws a warning.
pub const HIGH_SPEED_PRIORITY: f64 = 8.0;
/// Hill grade (%) that contradicts a "flat" terrain answer.
pub const FLAT_TERRAIN_MAX_GRADE: f64 = 10.0;

#[derive(Default)]
struct Report {
    errors: Vec<ValidationError>,
    warnings: Vec<ValidationWarning>,
}

impl Report {
    fn error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    fn warn(
        &mut self,
        field: &str,
        level: WarningLevel,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) {
        self.warnings.push(ValidationWarning {
            field: Some(field.to_string()),
            level: Some(level),
            message: message.into(),
            suggestion: Some(suggestion.into()),
        });
    }

    fn finish(self) -> ValidationResult {
        ValidationResult::new(self.errors, self.warnings)
    }
}

fn provided(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn provided_field(value: &Option<RawField>) -> Option<&RawField> {
    value.as_ref().filter(|f| !f.is_blank())
}

/// Stateless profile validator. Holds only its range table, so one instance
/// can serve any number of concurrent calls.
#[derive(Clone, Debug, Default)]
pub struct Validator {
    ranges: ValidationRanges,
}

impl Validator {
    pub fn new(ranges: ValidationRanges) -> Self {
        Self { ranges }
    }

    pub fn validate(&self, input: &ProfileInput) -> ValidationResult {
        let mut report = Report::default();

        self.check_required(input, &mut report);
        self.check_vehicle(input, &mut report);
        self.check_battery(input, &mut report);
        self.check_wheel(input, &mut report);
        self.check_environment(input, &mut report);
        self.check_priorities(input, &mut report);
        self.check_compatibility(input, &mut report);

        let result = report.finish();
        debug!(
            sections = input.sections_present().len(),
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "Validated profile input"
        );
        result
    }

    fn check_required(&self, input: &ProfileInput, report: &mut Report) {
        let complete = input.completeness() == Completeness::Complete;

        for section in input.sections_present() {
            if complete && input.is_section_empty(section) {
                report.error(section.key(), format!("{} is required", section.title()));
                continue;
            }
            for (field, label, present) in required_fields(input, section) {
                if !present {
                    report.error(
                        format!("{}.{}", section.key(), field),
                        format!("{} is required", label),
                    );
                }
            }
        }
    }

    fn check_vehicle(&self, input: &ProfileInput, report: &mut Report) {
        let Some(vehicle) = &input.vehicle else {
            return;
        };
        check_choice::<VehicleModel>(report, "vehicle.model", "vehicle model", &vehicle.model);
        check_choice::<MotorCondition>(
            report,
            "vehicle.motorCondition",
            "motor condition",
            &vehicle.motor_condition,
        );
        if let Some(speed) = check_number(report, "vehicle.topSpeed", "Top speed", &vehicle.top_speed)
        {
            check_range(
                report,
                "vehicle.topSpeed",
                speed,
                &self.ranges.top_speed,
                RangeText {
                    label: "Top speed",
                    unit: " mph",
                    suggestion: "Confirm the advertised top speed for this model",
                },
            );
        }
    }

    fn check_battery(&self, input: &ProfileInput, report: &mut Report) {
        let Some(battery) = &input.battery else {
            return;
        };
        check_choice::<BatteryChemistry>(
            report,
            "battery.type",
            "battery type",
            &battery.battery_type,
        );
        if let Some(voltage) =
            check_number(report, "battery.voltage", "Battery voltage", &battery.voltage)
        {
            check_range(
                report,
                "battery.voltage",
                voltage,
                &self.ranges.battery_voltage,
                RangeText {
                    label: "Battery voltage",
                    unit: " V",
                    suggestion: "Check the nominal pack voltage on the battery label",
                },
            );
        }
        if let Some(capacity) =
            check_number(report, "battery.capacity", "Battery capacity", &battery.capacity)
        {
            check_range(
                report,
                "battery.capacity",
                capacity,
                &self.ranges.battery_capacity,
                RangeText {
                    label: "Battery capacity",
                    unit: " Ah",
                    suggestion: "Enter the rated pack capacity in amp-hours",
                },
            );
        }
        check_choice::<BatteryAge>(report, "battery.age", "battery age", &battery.age);
    }

    fn check_wheel(&self, input: &ProfileInput, report: &mut Report) {
        let Some(wheel) = &input.wheel else {
            return;
        };
        if let Some(tire) =
            check_number(report, "wheel.tireDiameter", "Tire diameter", &wheel.tire_diameter)
        {
            check_range(
                report,
                "wheel.tireDiameter",
                tire,
                &self.ranges.tire_diameter,
                RangeText {
                    label: "Tire diameter",
                    unit: " in",
                    suggestion: "Measure the overall tire height, not the rim size",
                },
            );
        }
        if let Some(gear) = check_number(report, "wheel.gearRatio", "Gear ratio", &wheel.gear_ratio) {
            check_range(
                report,
                "wheel.gearRatio",
                gear,
                &self.ranges.gear_ratio,
                RangeText {
                    label: "Gear ratio",
                    unit: ":1",
                    suggestion: "Stock differentials are around 12.44:1",
                },
            );
        }
    }

    fn check_environment(&self, input: &ProfileInput, report: &mut Report) {
        let Some(environment) = &input.environment else {
            return;
        };
        let EnvironmentSection {
            terrain,
            vehicle_load,
            temperature_range,
            hill_grade,
        } = environment;

        check_choice::<Terrain>(report, "environment.terrain", "terrain", terrain);
        check_choice::<VehicleLoad>(report, "environment.vehicleLoad", "vehicle load", vehicle_load);
        check_choice::<TemperatureRange>(
            report,
            "environment.temperatureRange",
            "temperature range",
            temperature_range,
        );
        if let Some(grade) = check_number(report, "environment.hillGrade", "Hill grade", hill_grade) {
            check_range(
                report,
                "environment.hillGrade",
                grade,
                &self.ranges.hill_grade,
                RangeText {
                    label: "Hill grade",
                    unit: "%",
                    suggestion: "Use the steepest grade you regularly climb, in percent",
                },
            );
        }
    }

    fn check_priorities(&self, input: &ProfileInput, report: &mut Report) {
        let Some(priorities) = &input.priorities else {
            return;
        };
        for (name, value) in priorities.fields() {
            let field = format!("priorities.{}", name);
            let label = format!("Priority '{}'", name);
            if let Some(weight) = check_number(report, &field, &label, value) {
                check_range(
                    report,
                    &field,
                    weight,
                    &self.ranges.priority_weight,
                    RangeText {
                        label: &label,
                        unit: "",
                        suggestion: "Priority weights are clamped to the 0-10 scale",
                    },
                );
            }
        }
    }

    fn check_compatibility(&self, input: &ProfileInput, report: &mut Report) {
        let profile = TuningProfile::from_input(input);
        let motor = profile.vehicle.as_ref().and_then(|v| v.motor_condition);
        let degraded = motor.is_some_and(MotorCondition::is_degraded);
        let battery = profile.battery.as_ref();
        let wheel = profile.wheel.as_ref();
        let environment = profile.environment.as_ref();
        let terrain = environment.and_then(|e| e.terrain);

        if profile.chemistry() == Some(BatteryChemistry::Lithium)
            && motor == Some(MotorCondition::Sparking)
        {
            report.warn(
                "battery.type",
                WarningLevel::High,
                "Lithium packs sustain high current into a sparking motor; armature current will be limited to protect the commutator",
                "Service the motor brushes and commutator before running a lithium pack at full current",
            );
        }

        if let Some(tire) = wheel.and_then(|w| w.tire_diameter) {
            let compensated = wheel
                .and_then(|w| w.gear_ratio)
                .is_some_and(|g| g >= COMPENSATING_GEAR_RATIO);
            if tire > self.ranges.tire_diameter.max && !compensated {
                report.warn(
                    "wheel.tireDiameter",
                    WarningLevel::Medium,
                    format!(
                        "{} in tires without a compensating gear ratio raise motor load and road speed",
                        tire
                    ),
                    format!(
                        "Fit a gear ratio of {}:1 or higher, or return to stock tires",
                        COMPENSATING_GEAR_RATIO
                    ),
                );
            }
        }

        if terrain == Some(Terrain::Steep)
            && battery.and_then(|b| b.age) == Some(BatteryAge::Old)
        {
            report.warn(
                "environment.terrain",
                WarningLevel::Medium,
                "An old battery will sag under sustained climbing current on steep terrain",
                "Expect reduced range on grades and consider a battery load test",
            );
        }

        if terrain == Some(Terrain::Steep)
            && environment.and_then(|e| e.vehicle_load) == Some(VehicleLoad::Heavy)
            && degraded
        {
            report.warn(
                "environment.vehicleLoad",
                WarningLevel::High,
                "Heavy loads on steep terrain with a worn or sparking motor risk overheating the armature",
                "Reduce the load or repair the motor before climbing grades",
            );
        }

        if profile.priorities.speed >= HIGH_SPEED_PRIORITY && degraded {
            report.warn(
                "priorities.speed",
                WarningLevel::Medium,
                "A high speed priority conflicts with the motor's condition; field weakening will be limited",
                "Lower the speed priority or service the motor first",
            );
        }

        if terrain == Some(Terrain::Flat)
            && environment
                .and_then(|e| e.hill_grade)
                .is_some_and(|g| g > FLAT_TERRAIN_MAX_GRADE)
        {
            report.warn(
                "environment.hillGrade",
                WarningLevel::Low,
                "Terrain is marked flat but the hill grade suggests otherwise",
                "Choose mixed or moderate terrain to match the hill grade",
            );
        }
    }
}

/// `(field key, label, provided)` for each required field of a section.
fn required_fields(input: &ProfileInput, section: Section) -> Vec<(&'static str, &'static str, bool)> {
    match section {
        Section::Vehicle => input
            .vehicle
            .as_ref()
            .map(|v| {
                vec![
                    ("model", "Vehicle model", provided(&v.model).is_some()),
                    (
                        "motorCondition",
                        "Motor condition",
                        provided(&v.motor_condition).is_some(),
                    ),
                ]
            })
            .unwrap_or_default(),
        Section::Battery => input
            .battery
            .as_ref()
            .map(|b| {
                vec![
                    ("type", "Battery type", provided(&b.battery_type).is_some()),
                    ("voltage", "Battery voltage", provided_field(&b.voltage).is_some()),
                ]
            })
            .unwrap_or_default(),
        Section::Wheel => input
            .wheel
            .as_ref()
            .map(|w| {
                vec![(
                    "tireDiameter",
                    "Tire diameter",
                    provided_field(&w.tire_diameter).is_some(),
                )]
            })
            .unwrap_or_default(),
        Section::Environment => input
            .environment
            .as_ref()
            .map(|e| vec![("terrain", "Terrain", provided(&e.terrain).is_some())])
            .unwrap_or_default(),
        Section::Priorities => Vec::new(),
    }
}

fn check_choice<T: Choice>(report: &mut Report, field: &str, label: &str, value: &Option<String>) {
    if let Some(raw) = provided(value) {
        if T::parse(raw).is_none() {
            report.error(
                field,
                format!("Invalid {} '{}'. Allowed values: {}", label, raw, T::allowed()),
            );
        }
    }
}

/// Parse a provided numeric field, recording an error if it is not a number.
fn check_number(report: &mut Report, field: &str, label: &str, value: &Option<RawField>) -> Option<f64> {
    let raw = provided_field(value)?;
    match raw.as_number() {
        Some(number) => Some(number),
        None => {
            report.error(field, format!("{} must be a number", label));
            None
        }
    }
}

struct RangeText<'a> {
    label: &'a str,
    unit: &'a str,
    suggestion: &'a str,
}

fn check_range(report: &mut Report, field: &str, value: f64, range: &NumericRange, text: RangeText<'_>) {
    if range.contains(value) {
        return;
    }
    report.warn(
        field,
        WarningLevel::Medium,
        format!(
            "{} of {}{} is outside the typical range of {}-{}{}",
            text.label, value, text.unit, range.min, range.max, text.unit
        ),
        text.suggestion,
    );
}
