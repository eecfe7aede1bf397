//! # lsv-tuner-types
//!
//! Shared vocabulary for the low-speed-vehicle controller tuning engine.
//!
//! ## Contents
//!
//! - **FunctionId / FUNCTION_TABLE**: the closed set of recognized controller
//!   functions with their hardware bounds, units, safety direction and
//!   factory defaults
//! - **FunctionValueMap**: integer-keyed settings map; `factory_defaults()`
//!   always returns a fresh copy of the immutable baseline
//! - **ProfileInput**: raw, possibly partial operator input with optional
//!   sections and free-form numeric fields
//! - **TuningProfile**: leniently parsed, typed view consumed by the optimizer
//! - **ValidationResult**: errors (blocking) and warnings (advisory)
//! - **TunerError**: engine contract violations

pub mod error;
pub mod function;
pub mod input;
pub mod profile;
pub mod validation;

pub use error::{TunerError, TunerResult};
pub use function::{FunctionId, FunctionSpec, FunctionValueMap, SafetyDirection, FUNCTION_TABLE};
pub use input::{
    BatterySection, Completeness, EnvironmentSection, PrioritySection, ProfileInput, RawField,
    Section, VehicleSection, WheelSection,
};
pub use profile::{
    BatteryAge, BatteryChemistry, BatteryProfile, Choice, EnvironmentProfile, MotorCondition,
    Objective, PriorityWeights, TemperatureRange, Terrain, TuningProfile, VehicleLoad,
    VehicleModel, VehicleProfile, WheelProfile,
};
pub use validation::{ValidationError, ValidationResult, ValidationWarning, WarningLevel};
