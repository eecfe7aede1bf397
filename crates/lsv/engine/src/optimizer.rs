use std::collections::BTreeMap;

use lsv_tuner_types::{
    BatteryChemistry, FunctionId, FunctionValueMap, MotorCondition, Objective, ProfileInput,
    TemperatureRange, Terrain, TunerError, TunerResult, TuningProfile, VehicleLoad,
};
use tracing::{debug, info, warn};

use crate::enforcer::{EnforcementContext, SafetyEnforcer};
use crate::presets::PresetCatalog;

/// Stock tire diameter (in) the controller's speed functions are calibrated for.
pub const STOCK_TIRE_DIAMETER: f64 = 22.0;
/// Stock reduction gear ratio.
pub const STOCK_GEAR_RATIO: f64 = 12.44;

/// How strongly each objective pushes each function, per unit of weight
/// deviation from neutral.
const OBJECTIVE_EFFECTS: &[(Objective, FunctionId, f64)] = &[
    (Objective::Speed, FunctionId::TopSpeed, 0.8),
    (Objective::Speed, FunctionId::FieldWeakeningDepth, 0.7),
    (Objective::Speed, FunctionId::FieldWeakeningOnset, -0.6),
    (Objective::Speed, FunctionId::MaxArmatureCurrent, 0.2),
    (Objective::Acceleration, FunctionId::AccelerationRate, 0.8),
    (Objective::Acceleration, FunctionId::MaxArmatureCurrent, 0.5),
    (Objective::Acceleration, FunctionId::MaxFieldCurrent, 0.3),
    (Objective::Range, FunctionId::RegenEngagement, 0.5),
    (Objective::Range, FunctionId::RegenFieldCurrent, 0.4),
    (Objective::Range, FunctionId::AccelerationRate, -0.4),
    (Objective::Range, FunctionId::MaxArmatureCurrent, -0.3),
    (Objective::Range, FunctionId::TopSpeed, -0.2),
    (Objective::HillClimbing, FunctionId::MaxArmatureCurrent, 0.7),
    (Objective::HillClimbing, FunctionId::MaxFieldCurrent, 0.6),
    (Objective::HillClimbing, FunctionId::RegenFieldCurrent, 0.5),
    (Objective::HillClimbing, FunctionId::RegenArmatureCurrent, 0.3),
    (Objective::HillClimbing, FunctionId::PlugBrakingCurrent, 0.3),
    (Objective::Regen, FunctionId::RegenEngagement, 0.8),
    (Objective::Regen, FunctionId::RegenFieldCurrent, 0.6),
    (Objective::Regen, FunctionId::RegenArmatureCurrent, 0.5),
];

/// Caps applied to a degraded motor regardless of rider priorities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MotorDerating {
    pub max_armature_current: i32,
    pub max_field_current: i32,
    pub max_regen_field_current: i32,
    pub max_regen_engagement: i32,
    pub max_field_weakening_depth: i32,
    /// Field weakening may not start more than this many mph below top speed.
    pub onset_window_mph: i32,
}

impl MotorDerating {
    pub fn for_condition(condition: MotorCondition) -> Option<Self> {
        match condition {
            MotorCondition::Good => None,
            MotorCondition::Worn => Some(Self {
                max_armature_current: 215,
                max_field_current: 240,
                max_regen_field_current: 120,
                max_regen_engagement: 50,
                max_field_weakening_depth: 2,
                onset_window_mph: 5,
            }),
            MotorCondition::Sparking => Some(Self {
                max_armature_current: 200,
                max_field_current: 230,
                max_regen_field_current: 110,
                max_regen_engagement: 30,
                max_field_weakening_depth: 1,
                onset_window_mph: 4,
            }),
        }
    }
}

/// Regen voltage limit as a multiple of nominal pack voltage.
fn regen_voltage_ratio(chemistry: BatteryChemistry) -> f64 {
    match chemistry {
        BatteryChemistry::Lead => 1.20,
        BatteryChemistry::Agm => 1.18,
        // BMS charge ceiling sits close to nominal.
        BatteryChemistry::Lithium => 1.14,
    }
}

/// Low-voltage cutback as a fraction of nominal pack voltage.
fn cutback_ratio(chemistry: BatteryChemistry) -> f64 {
    match chemistry {
        BatteryChemistry::Lead => 0.80,
        BatteryChemistry::Agm => 0.81,
        // Flat discharge curve: voltage collapses late, cut back early.
        BatteryChemistry::Lithium => 0.84,
    }
}

/// Computes a full function-value map from a profile and priorities.
pub struct Optimizer<'a> {
    catalog: &'a PresetCatalog,
}

impl<'a> Optimizer<'a> {
    pub fn new(catalog: &'a PresetCatalog) -> Self {
        Self { catalog }
    }

    /// Run one optimization.
    ///
    /// Partial input is fine: absent sections skip their adjustments.
    /// Only an unknown preset name fails.
    pub fn optimize(
        &self,
        input: &ProfileInput,
        base_preset: Option<&str>,
    ) -> TunerResult<FunctionValueMap> {
        let profile = TuningProfile::from_input(input);
        let context = EnforcementContext::new(profile.motor_condition());

        let mut map = FunctionValueMap::factory_defaults();
        if let Some(name) = base_preset {
            let preset = self
                .catalog
                .get(name)
                .ok_or_else(|| TunerError::UnknownPreset(name.to_string()))?;
            map = SafetyEnforcer::enforce(&preset.apply_to(&map), &context);
            debug!(preset = name, "Applied base preset");
        }

        let pressures = Self::pressures(&profile);
        Self::apply_pressures(&mut map, &pressures);
        Self::apply_battery(&mut map, &profile);
        Self::apply_gearing(&mut map, &profile);
        // Last, so that safety overrides stated preference.
        Self::apply_motor_derating(&mut map, profile.motor_condition());

        let result = SafetyEnforcer::enforce(&map, &context);
        info!(
            preset = base_preset.unwrap_or("none"),
            motor = ?context.motor_condition,
            "Optimization complete"
        );
        Ok(result)
    }

    /// Hill-climbing pressure implied by the environment alone.
    fn environment_bias(profile: &TuningProfile) -> f64 {
        let Some(environment) = &profile.environment else {
            return 0.0;
        };
        let terrain: f64 = match environment.terrain {
            Some(Terrain::Flat) | None => 0.0,
            Some(Terrain::Mixed) => 0.1,
            Some(Terrain::Moderate) => 0.25,
            Some(Terrain::Steep) => 0.5,
        };
        let grade = environment
            .hill_grade
            .map(|g| g.clamp(0.0, 30.0) / 30.0 * 0.5)
            .unwrap_or(0.0);
        let load = match environment.vehicle_load {
            Some(VehicleLoad::Heavy) => 0.2,
            _ => 0.0,
        };
        terrain.max(grade) + load
    }

    /// Summed, unsaturated pressure per function.
    fn pressures(profile: &TuningProfile) -> BTreeMap<FunctionId, f64> {
        let mut pressures = BTreeMap::new();
        let bias = Self::environment_bias(profile);

        for objective in Objective::ALL {
            let mut deviation = profile.priorities.deviation(objective);
            if objective == Objective::HillClimbing {
                deviation += bias;
            }
            if deviation == 0.0 {
                continue;
            }
            for (_, function, coefficient) in OBJECTIVE_EFFECTS
                .iter()
                .filter(|(o, _, _)| *o == objective)
            {
                *pressures.entry(*function).or_insert(0.0) += coefficient * deviation;
            }
        }

        match profile
            .environment
            .as_ref()
            .and_then(|e| e.temperature_range)
        {
            Some(TemperatureRange::Hot) => {
                *pressures.entry(FunctionId::MaxArmatureCurrent).or_insert(0.0) -= 0.3;
            }
            Some(TemperatureRange::Cold) => {
                *pressures.entry(FunctionId::RegenEngagement).or_insert(0.0) -= 0.2;
            }
            _ => {}
        }

        pressures
    }

    /// Move each function toward its upper or lower bound by a saturated
    /// share of the remaining headroom. The result never leaves the bounds.
    fn apply_pressures(map: &mut FunctionValueMap, pressures: &BTreeMap<FunctionId, f64>) {
        for (id, pressure) in pressures {
            let spec = id.spec();
            let base = spec.clamp(map.value(*id));
            let share = pressure.tanh();
            let headroom = if share >= 0.0 {
                spec.max - base
            } else {
                base - spec.min
            };
            let target = base as f64 + headroom as f64 * share;
            let value = spec.clamp(spec.direction.round(target));
            if value != base {
                debug!(function = %id, from = base, to = value, pressure, "Priority adjustment");
            }
            map.set(*id, value);
        }
    }

    fn apply_battery(map: &mut FunctionValueMap, profile: &TuningProfile) {
        let Some(battery) = &profile.battery else {
            return;
        };

        if let Some(voltage) = battery.voltage {
            let spec = FunctionId::BatteryVoltage.spec();
            map.set(spec.id, spec.clamp(spec.direction.round(voltage)));
        }

        if let Some(chemistry) = battery.chemistry {
            let nominal = map.value(FunctionId::BatteryVoltage) as f64;
            for (id, ratio) in [
                (FunctionId::RegenVoltageLimit, regen_voltage_ratio(chemistry)),
                (FunctionId::LowVoltageCutback, cutback_ratio(chemistry)),
            ] {
                let spec = id.spec();
                map.set(id, spec.clamp(spec.direction.round(nominal * ratio)));
            }
            debug!(?chemistry, nominal, "Applied chemistry voltage ratios");
        }
    }

    /// Rescale top speed for non-stock tires or gearing. The controller
    /// counts motor revolutions, so larger tires or taller gearing make the
    /// same setting faster on the road.
    fn apply_gearing(map: &mut FunctionValueMap, profile: &TuningProfile) {
        let Some(wheel) = &profile.wheel else {
            return;
        };
        if wheel.tire_diameter.is_none() && wheel.gear_ratio.is_none() {
            return;
        }

        let tire = wheel
            .tire_diameter
            .filter(|t| *t > 0.0)
            .unwrap_or(STOCK_TIRE_DIAMETER);
        let gear = wheel
            .gear_ratio
            .filter(|g| *g > 0.0)
            .unwrap_or(STOCK_GEAR_RATIO);
        let factor = (tire / STOCK_TIRE_DIAMETER) * (STOCK_GEAR_RATIO / gear);
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }

        let spec = FunctionId::TopSpeed.spec();
        let scaled = map.value(spec.id) as f64 / factor;
        let value = spec.clamp(spec.direction.round(scaled));
        debug!(tire, gear, factor, top_speed = value, "Rescaled top speed for gearing");
        map.set(spec.id, value);
    }

    fn apply_motor_derating(map: &mut FunctionValueMap, condition: MotorCondition) {
        let Some(derating) = MotorDerating::for_condition(condition) else {
            return;
        };
        warn!(?condition, "Derating controller settings for degraded motor");

        for (id, cap) in [
            (FunctionId::MaxArmatureCurrent, derating.max_armature_current),
            (FunctionId::MaxFieldCurrent, derating.max_field_current),
            (FunctionId::RegenFieldCurrent, derating.max_regen_field_current),
            (FunctionId::RegenEngagement, derating.max_regen_engagement),
            (FunctionId::FieldWeakeningDepth, derating.max_field_weakening_depth),
        ] {
            let value = map.value(id);
            if value > cap {
                map.set(id, cap);
            }
        }

        let earliest_onset = map.value(FunctionId::TopSpeed) - derating.onset_window_mph;
        if map.value(FunctionId::FieldWeakeningOnset) < earliest_onset {
            map.set(FunctionId::FieldWeakeningOnset, earliest_onset);
        }
    }
}
