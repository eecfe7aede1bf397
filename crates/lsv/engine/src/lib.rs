//! # lsv-tuner-engine
//!
//! Converts a low-speed-vehicle profile and rider priorities into motor
//! controller settings that are safe to program into the hardware.
//!
//! ## Components
//!
//! - **SafetyEnforcer**: clamps any candidate map into hardware bounds and
//!   the inter-function dependency bands. Every output path ends here.
//! - **PresetCatalog**: curated starting configurations
//! - **Optimizer**: weighted objective blending plus battery, gearing and
//!   motor-condition overrides
//! - **Validator**: required-field, per-field and cross-field checks over raw
//!   input
//! - **TuningEngine**: facade tying the above together
//!
//! All operations are synchronous and side-effect free.

pub mod catalog;
pub mod config;
pub mod enforcer;
pub mod engine;
pub mod optimizer;
pub mod presets;
pub mod validator;

pub use config::{EngineConfig, NumericRange, ValidationRanges};
pub use enforcer::{BoundViolation, EnforcementContext, SafetyEnforcer};
pub use engine::TuningEngine;
pub use optimizer::{MotorDerating, Optimizer, STOCK_GEAR_RATIO, STOCK_TIRE_DIAMETER};
pub use presets::{Preset, PresetCatalog};
pub use validator::Validator;

use lsv_tuner_types::FunctionValueMap;

/// Fresh copy of the factory baseline.
pub fn factory_defaults() -> FunctionValueMap {
    FunctionValueMap::factory_defaults()
}

/// Clamp `map` into the safe region for `context`.
pub fn enforce(map: &FunctionValueMap, context: &EnforcementContext) -> FunctionValueMap {
    SafetyEnforcer::enforce(map, context)
}
