use lsv_tuner_types::{TunerError, TunerResult};
use serde::{Deserialize, Serialize};

/// Inclusive plausibility range for a numeric input field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Canonical plausibility ranges used by the validator.
///
/// Values outside these ranges produce warnings, never errors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRanges {
    /// Advertised top speed (mph)
    pub top_speed: NumericRange,
    /// Pack voltage (V)
    pub battery_voltage: NumericRange,
    /// Pack capacity (Ah)
    pub battery_capacity: NumericRange,
    /// Tire diameter (in)
    pub tire_diameter: NumericRange,
    pub gear_ratio: NumericRange,
    /// Hill grade (%)
    pub hill_grade: NumericRange,
    pub priority_weight: NumericRange,
}

impl Default for ValidationRanges {
    fn default() -> Self {
        Self {
            top_speed: NumericRange::new(15.0, 35.0),
            battery_voltage: NumericRange::new(48.0, 100.0),
            battery_capacity: NumericRange::new(40.0, 300.0),
            tire_diameter: NumericRange::new(20.0, 24.0),
            gear_ratio: NumericRange::new(8.0, 16.0),
            hill_grade: NumericRange::new(0.0, 30.0),
            priority_weight: NumericRange::new(0.0, 10.0),
        }
    }
}

impl ValidationRanges {
    fn named(&self) -> [(&'static str, &NumericRange); 7] {
        [
            ("top_speed", &self.top_speed),
            ("battery_voltage", &self.battery_voltage),
            ("battery_capacity", &self.battery_capacity),
            ("tire_diameter", &self.tire_diameter),
            ("gear_ratio", &self.gear_ratio),
            ("hill_grade", &self.hill_grade),
            ("priority_weight", &self.priority_weight),
        ]
    }
}

/// Engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub validation: ValidationRanges,
}

impl EngineConfig {
    /// Reject ranges whose bounds are inverted or not finite.
    pub fn validate(&self) -> TunerResult<()> {
        for (field, range) in self.validation.named() {
            if !(range.min.is_finite() && range.max.is_finite()) || range.min > range.max {
                return Err(TunerError::InvalidRange {
                    field: field.to_string(),
                    min: range.min,
                    max: range.max,
                });
            }
        }
        Ok(())
    }
}
