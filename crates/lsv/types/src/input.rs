//! Raw operator input, as submitted step by step from a form or API.
//!
//! Sections are optional so that a partially completed profile can be
//! validated incrementally. Numeric fields accept free text because the
//! validator must distinguish "not a number" from "out of range".

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A numeric field as submitted: a JSON number, free text, or any other
/// JSON value, which the validator reports as not a number.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    Number(f64),
    Text(String),
    Other(Value),
}

impl RawField {
    /// Parse to a finite number. Text is trimmed before parsing.
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            RawField::Number(n) => *n,
            RawField::Text(s) => s.trim().parse::<f64>().ok()?,
            RawField::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Blank text counts as "not provided".
    pub fn is_blank(&self) -> bool {
        matches!(self, RawField::Text(s) if s.trim().is_empty())
    }
}

impl From<f64> for RawField {
    fn from(value: f64) -> Self {
        RawField::Number(value)
    }
}

impl From<&str> for RawField {
    fn from(value: &str) -> Self {
        RawField::Text(value.to_string())
    }
}

impl fmt::Display for RawField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawField::Number(n) => write!(f, "{}", n),
            RawField::Text(s) => write!(f, "{}", s),
            RawField::Other(v) => write!(f, "{}", v),
        }
    }
}

/// Choice fields keep whatever JSON they were given as text, so a number or
/// boolean fails choice validation instead of rejecting the whole document.
fn choice_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

fn provided_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}

fn provided_field(value: &Option<RawField>) -> bool {
    value.as_ref().is_some_and(|f| !f.is_blank())
}

fn overlay<T: Clone>(base: &mut Option<T>, top: &Option<T>) {
    if top.is_some() {
        base.clone_from(top);
    }
}

/// Vehicle step of the profile.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleSection {
    #[serde(default, deserialize_with = "choice_text", skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "choice_text", skip_serializing_if = "Option::is_none")]
    pub motor_condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_speed: Option<RawField>,
}

impl VehicleSection {
    pub fn is_empty(&self) -> bool {
        !provided_text(&self.model)
            && !provided_text(&self.motor_condition)
            && !provided_field(&self.top_speed)
    }

    /// Overlay every field `top` sets.
    pub fn merge_from(&mut self, top: &Self) {
        overlay(&mut self.model, &top.model);
        overlay(&mut self.motor_condition, &top.motor_condition);
        overlay(&mut self.top_speed, &top.top_speed);
    }
}

/// Battery step of the profile.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatterySection {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "choice_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub battery_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voltage: Option<RawField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<RawField>,
    #[serde(default, deserialize_with = "choice_text", skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
}

impl BatterySection {
    pub fn is_empty(&self) -> bool {
        !provided_text(&self.battery_type)
            && !provided_field(&self.voltage)
            && !provided_field(&self.capacity)
            && !provided_text(&self.age)
    }

    pub fn merge_from(&mut self, top: &Self) {
        overlay(&mut self.battery_type, &top.battery_type);
        overlay(&mut self.voltage, &top.voltage);
        overlay(&mut self.capacity, &top.capacity);
        overlay(&mut self.age, &top.age);
    }
}

/// Wheel and gearing step of the profile.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WheelSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tire_diameter: Option<RawField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gear_ratio: Option<RawField>,
}

impl WheelSection {
    pub fn is_empty(&self) -> bool {
        !provided_field(&self.tire_diameter) && !provided_field(&self.gear_ratio)
    }

    pub fn merge_from(&mut self, top: &Self) {
        overlay(&mut self.tire_diameter, &top.tire_diameter);
        overlay(&mut self.gear_ratio, &top.gear_ratio);
    }
}

/// Operating environment step of the profile.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnvironmentSection {
    #[serde(default, deserialize_with = "choice_text", skip_serializing_if = "Option::is_none")]
    pub terrain: Option<String>,
    #[serde(default, deserialize_with = "choice_text", skip_serializing_if = "Option::is_none")]
    pub vehicle_load: Option<String>,
    #[serde(default, deserialize_with = "choice_text", skip_serializing_if = "Option::is_none")]
    pub temperature_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hill_grade: Option<RawField>,
}

impl EnvironmentSection {
    pub fn is_empty(&self) -> bool {
        !provided_text(&self.terrain)
            && !provided_text(&self.vehicle_load)
            && !provided_text(&self.temperature_range)
            && !provided_field(&self.hill_grade)
    }

    pub fn merge_from(&mut self, top: &Self) {
        overlay(&mut self.terrain, &top.terrain);
        overlay(&mut self.vehicle_load, &top.vehicle_load);
        overlay(&mut self.temperature_range, &top.temperature_range);
        overlay(&mut self.hill_grade, &top.hill_grade);
    }
}

/// Rider priorities, each nominally in [0, 10].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrioritySection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<RawField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acceleration: Option<RawField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<RawField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hill_climbing: Option<RawField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regen: Option<RawField>,
}

impl PrioritySection {
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, value)| !provided_field(value))
    }

    /// `(field name, value)` pairs in declaration order.
    pub fn fields(&self) -> [(&'static str, &Option<RawField>); 5] {
        [
            ("speed", &self.speed),
            ("acceleration", &self.acceleration),
            ("range", &self.range),
            ("hillClimbing", &self.hill_climbing),
            ("regen", &self.regen),
        ]
    }

    pub fn merge_from(&mut self, top: &Self) {
        overlay(&mut self.speed, &top.speed);
        overlay(&mut self.acceleration, &top.acceleration);
        overlay(&mut self.range, &top.range);
        overlay(&mut self.hill_climbing, &top.hill_climbing);
        overlay(&mut self.regen, &top.regen);
    }
}

/// Recognized top-level sections, in validation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Vehicle,
    Battery,
    Wheel,
    Environment,
    Priorities,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Vehicle,
        Section::Battery,
        Section::Wheel,
        Section::Environment,
        Section::Priorities,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Section::Vehicle => "vehicle",
            Section::Battery => "battery",
            Section::Wheel => "wheel",
            Section::Environment => "environment",
            Section::Priorities => "priorities",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Vehicle => "Vehicle information",
            Section::Battery => "Battery information",
            Section::Wheel => "Wheel and gearing information",
            Section::Environment => "Environment information",
            Section::Priorities => "Priorities",
        }
    }
}

/// Whether an input carries every recognized section or only some.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completeness {
    Partial,
    Complete,
}

/// A (possibly partial) profile submission.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<VehicleSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery: Option<BatterySection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wheel: Option<WheelSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<EnvironmentSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priorities: Option<PrioritySection>,
}

impl ProfileInput {
    pub fn is_present(&self, section: Section) -> bool {
        match section {
            Section::Vehicle => self.vehicle.is_some(),
            Section::Battery => self.battery.is_some(),
            Section::Wheel => self.wheel.is_some(),
            Section::Environment => self.environment.is_some(),
            Section::Priorities => self.priorities.is_some(),
        }
    }

    /// A present section with no provided fields. Absent sections are not
    /// considered empty.
    pub fn is_section_empty(&self, section: Section) -> bool {
        match section {
            Section::Vehicle => self.vehicle.as_ref().is_some_and(VehicleSection::is_empty),
            Section::Battery => self.battery.as_ref().is_some_and(BatterySection::is_empty),
            Section::Wheel => self.wheel.as_ref().is_some_and(WheelSection::is_empty),
            Section::Environment => self
                .environment
                .as_ref()
                .is_some_and(EnvironmentSection::is_empty),
            Section::Priorities => self
                .priorities
                .as_ref()
                .is_some_and(PrioritySection::is_empty),
        }
    }

    pub fn sections_present(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|section| self.is_present(*section))
            .collect()
    }

    pub fn completeness(&self) -> Completeness {
        if Section::ALL.iter().all(|section| self.is_present(*section)) {
            Completeness::Complete
        } else {
            Completeness::Partial
        }
    }

    /// Overlay `top` onto `self` one section at a time. Sections `top` does
    /// not carry are left untouched; within a carried section, fields `top`
    /// sets win.
    pub fn merge_from(&mut self, top: &ProfileInput) {
        if let Some(section) = &top.vehicle {
            self.vehicle.get_or_insert_with(Default::default).merge_from(section);
        }
        if let Some(section) = &top.battery {
            self.battery.get_or_insert_with(Default::default).merge_from(section);
        }
        if let Some(section) = &top.wheel {
            self.wheel.get_or_insert_with(Default::default).merge_from(section);
        }
        if let Some(section) = &top.environment {
            self.environment
                .get_or_insert_with(Default::default)
                .merge_from(section);
        }
        if let Some(section) = &top.priorities {
            self.priorities
                .get_or_insert_with(Default::default)
                .merge_from(section);
        }
    }
}
