//! Typed view of a profile, as consumed by the optimizer.
//!
//! Conversion from [`ProfileInput`] is lenient: values that do not parse are
//! dropped rather than rejected. Rejecting bad input is the validator's job.

use serde::{Deserialize, Serialize};

use crate::input::{ProfileInput, RawField};

/// A closed set of textual choices accepted from operator input.
pub trait Choice: Sized + Copy + 'static {
    /// Canonical spelling of each variant.
    const VARIANTS: &'static [(&'static str, Self)];

    /// Case-insensitive parse; surrounding whitespace is ignored.
    fn parse(raw: &str) -> Option<Self> {
        let needle = raw.trim();
        Self::VARIANTS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(needle))
            .map(|(_, value)| *value)
    }

    fn allowed() -> String {
        Self::VARIANTS
            .iter()
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Chassis variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleModel {
    E2,
    E4,
    E6,
    Elxd,
}

impl Choice for VehicleModel {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("e2", VehicleModel::E2),
        ("e4", VehicleModel::E4),
        ("e6", VehicleModel::E6),
        ("elxd", VehicleModel::Elxd),
    ];
}

/// Observed condition of the traction motor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotorCondition {
    #[default]
    Good,
    Worn,
    Sparking,
}

impl MotorCondition {
    pub fn is_degraded(self) -> bool {
        !matches!(self, MotorCondition::Good)
    }
}

impl Choice for MotorCondition {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("good", MotorCondition::Good),
        ("worn", MotorCondition::Worn),
        ("sparking", MotorCondition::Sparking),
    ];
}

/// Battery chemistry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatteryChemistry {
    Lead,
    Agm,
    Lithium,
}

impl Choice for BatteryChemistry {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("lead", BatteryChemistry::Lead),
        ("agm", BatteryChemistry::Agm),
        ("lithium", BatteryChemistry::Lithium),
    ];
}

/// Qualitative battery age.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatteryAge {
    New,
    Moderate,
    Old,
}

impl Choice for BatteryAge {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("new", BatteryAge::New),
        ("moderate", BatteryAge::Moderate),
        ("old", BatteryAge::Old),
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    Flat,
    Mixed,
    Moderate,
    Steep,
}

impl Choice for Terrain {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("flat", Terrain::Flat),
        ("mixed", Terrain::Mixed),
        ("moderate", Terrain::Moderate),
        ("steep", Terrain::Steep),
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleLoad {
    Light,
    Medium,
    Heavy,
}

impl Choice for VehicleLoad {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("light", VehicleLoad::Light),
        ("medium", VehicleLoad::Medium),
        ("heavy", VehicleLoad::Heavy),
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureRange {
    Cold,
    Mild,
    Hot,
}

impl Choice for TemperatureRange {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("cold", TemperatureRange::Cold),
        ("mild", TemperatureRange::Mild),
        ("hot", TemperatureRange::Hot),
    ];
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleProfile {
    pub model: Option<VehicleModel>,
    pub motor_condition: Option<MotorCondition>,
    pub top_speed: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BatteryProfile {
    pub chemistry: Option<BatteryChemistry>,
    pub voltage: Option<f64>,
    pub capacity: Option<f64>,
    pub age: Option<BatteryAge>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelProfile {
    pub tire_diameter: Option<f64>,
    pub gear_ratio: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentProfile {
    pub terrain: Option<Terrain>,
    pub vehicle_load: Option<VehicleLoad>,
    pub temperature_range: Option<TemperatureRange>,
    pub hill_grade: Option<f64>,
}

/// Objective categories a rider can weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Objective {
    Speed,
    Acceleration,
    Range,
    HillClimbing,
    Regen,
}

impl Objective {
    pub const ALL: [Objective; 5] = [
        Objective::Speed,
        Objective::Acceleration,
        Objective::Range,
        Objective::HillClimbing,
        Objective::Regen,
    ];
}

/// Rider priority weights. Absent weights sit at [`PriorityWeights::NEUTRAL`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriorityWeights {
    pub speed: f64,
    pub acceleration: f64,
    pub range: f64,
    pub hill_climbing: f64,
    pub regen: f64,
}

impl PriorityWeights {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 10.0;
    pub const NEUTRAL: f64 = 5.0;

    pub fn get(&self, objective: Objective) -> f64 {
        match objective {
            Objective::Speed => self.speed,
            Objective::Acceleration => self.acceleration,
            Objective::Range => self.range,
            Objective::HillClimbing => self.hill_climbing,
            Objective::Regen => self.regen,
        }
    }

    /// Weight mapped onto [-1, 1], zero at neutral.
    pub fn deviation(&self, objective: Objective) -> f64 {
        let weight = self.get(objective).clamp(Self::MIN, Self::MAX);
        (weight - Self::NEUTRAL) / (Self::MAX - Self::NEUTRAL)
    }
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            speed: Self::NEUTRAL,
            acceleration: Self::NEUTRAL,
            range: Self::NEUTRAL,
            hill_climbing: Self::NEUTRAL,
            regen: Self::NEUTRAL,
        }
    }
}

/// Parsed profile. Sections absent from the input stay `None`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TuningProfile {
    pub vehicle: Option<VehicleProfile>,
    pub battery: Option<BatteryProfile>,
    pub wheel: Option<WheelProfile>,
    pub environment: Option<EnvironmentProfile>,
    pub priorities: PriorityWeights,
}

fn choice<T: Choice>(raw: &Option<String>) -> Option<T> {
    raw.as_deref().and_then(T::parse)
}

fn number(raw: &Option<RawField>) -> Option<f64> {
    raw.as_ref().and_then(RawField::as_number)
}

impl TuningProfile {
    pub fn from_input(input: &ProfileInput) -> Self {
        let vehicle = input.vehicle.as_ref().map(|v| VehicleProfile {
            model: choice(&v.model),
            motor_condition: choice(&v.motor_condition),
            top_speed: number(&v.top_speed),
        });
        let battery = input.battery.as_ref().map(|b| BatteryProfile {
            chemistry: choice(&b.battery_type),
            voltage: number(&b.voltage),
            capacity: number(&b.capacity),
            age: choice(&b.age),
        });
        let wheel = input.wheel.as_ref().map(|w| WheelProfile {
            tire_diameter: number(&w.tire_diameter),
            gear_ratio: number(&w.gear_ratio),
        });
        let environment = input.environment.as_ref().map(|e| EnvironmentProfile {
            terrain: choice(&e.terrain),
            vehicle_load: choice(&e.vehicle_load),
            temperature_range: choice(&e.temperature_range),
            hill_grade: number(&e.hill_grade),
        });

        let mut priorities = PriorityWeights::default();
        if let Some(p) = &input.priorities {
            let weight = |raw: &Option<RawField>| {
                number(raw)
                    .map(|w| w.clamp(PriorityWeights::MIN, PriorityWeights::MAX))
                    .unwrap_or(PriorityWeights::NEUTRAL)
            };
            priorities = PriorityWeights {
                speed: weight(&p.speed),
                acceleration: weight(&p.acceleration),
                range: weight(&p.range),
                hill_climbing: weight(&p.hill_climbing),
                regen: weight(&p.regen),
            };
        }

        Self {
            vehicle,
            battery,
            wheel,
            environment,
            priorities,
        }
    }

    pub fn motor_condition(&self) -> MotorCondition {
        self.vehicle
            .as_ref()
            .and_then(|v| v.motor_condition)
            .unwrap_or_default()
    }

    pub fn chemistry(&self) -> Option<BatteryChemistry> {
        self.battery.as_ref().and_then(|b| b.chemistry)
    }
}
