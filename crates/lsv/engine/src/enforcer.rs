use lsv_tuner_types::{FunctionId, FunctionValueMap, MotorCondition};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Maximum regen field current per volt of regen voltage limit, as a ratio.
const REGEN_FIELD_PER_VOLT: (i32, i32) = (3, 2);
/// Regen voltage limit ceiling relative to battery voltage.
const REGEN_VOLTAGE_CEILING: (i32, i32) = (6, 5);
/// Low-voltage cutback band relative to battery voltage.
const CUTBACK_FLOOR: (i32, i32) = (1, 2);
const CUTBACK_CEILING: (i32, i32) = (17, 20);
/// Field weakening onset band relative to top speed.
const ONSET_FLOOR: (i32, i32) = (3, 5);
const ONSET_MARGIN_MPH: i32 = 2;

/// Facts about the vehicle that hardware rules depend on but the map itself
/// does not carry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnforcementContext {
    pub motor_condition: MotorCondition,
}

impl EnforcementContext {
    pub fn new(motor_condition: MotorCondition) -> Self {
        Self { motor_condition }
    }

    /// Floor for the minimum field current. Worn brushes and commutators
    /// need a stronger field to keep arcing down.
    pub fn min_field_floor(&self) -> i32 {
        match self.motor_condition {
            MotorCondition::Good => FunctionId::MinFieldCurrent.spec().min,
            MotorCondition::Worn => 65,
            MotorCondition::Sparking => 75,
        }
    }
}

/// A value `enforce` would change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundViolation {
    pub function: FunctionId,
    /// `None` when the candidate did not set the function at all.
    pub original: Option<i32>,
    pub corrected: i32,
}

/// Safety constraint enforcer.
///
/// The single choke point every output path goes through. It never fails:
/// any candidate map comes back complete, within hardware bounds and
/// consistent with the inter-function dependency rules. Corrections are not
/// reported to the caller; use [`SafetyEnforcer::audit`] to inspect them.
pub struct SafetyEnforcer;

fn ratio_floor(value: i32, (num, den): (i32, i32)) -> i32 {
    (value * num).div_euclid(den)
}

fn ratio_ceil(value: i32, (num, den): (i32, i32)) -> i32 {
    -(-value * num).div_euclid(den)
}

impl SafetyEnforcer {
    /// Clamp a candidate map into the safe region.
    ///
    /// Rules run in a fixed order. Each relational rule only adjusts a
    /// function that no later rule reads, so one pass reaches a fixed point
    /// and `enforce(enforce(x)) == enforce(x)`.
    pub fn enforce(candidate: &FunctionValueMap, context: &EnforcementContext) -> FunctionValueMap {
        let mut map = FunctionValueMap::factory_defaults();
        for (id, value) in candidate.iter() {
            map.set(id, value);
        }

        for id in FunctionId::ALL {
            let value = map.value(id);
            let clamped = id.spec().clamp(value);
            if clamped != value {
                debug!(function = %id, value, clamped, "Clamped to hardware bounds");
                map.set(id, clamped);
            }
        }

        let battery = map.value(FunctionId::BatteryVoltage);
        Self::band(
            &mut map,
            FunctionId::RegenVoltageLimit,
            battery,
            ratio_floor(battery, REGEN_VOLTAGE_CEILING),
        );
        Self::band(
            &mut map,
            FunctionId::LowVoltageCutback,
            ratio_ceil(battery, CUTBACK_FLOOR),
            ratio_floor(battery, CUTBACK_CEILING),
        );

        let regen_voltage = map.value(FunctionId::RegenVoltageLimit);
        Self::band(
            &mut map,
            FunctionId::RegenFieldCurrent,
            i32::MIN,
            ratio_floor(regen_voltage, REGEN_FIELD_PER_VOLT),
        );

        let armature = map.value(FunctionId::MaxArmatureCurrent);
        Self::band(&mut map, FunctionId::RegenArmatureCurrent, i32::MIN, armature);

        let top_speed = map.value(FunctionId::TopSpeed);
        Self::band(
            &mut map,
            FunctionId::FieldWeakeningOnset,
            ratio_ceil(top_speed, ONSET_FLOOR),
            top_speed - ONSET_MARGIN_MPH,
        );

        Self::band(
            &mut map,
            FunctionId::MinFieldCurrent,
            context.min_field_floor(),
            i32::MAX,
        );

        map
    }

    /// List the values `enforce` would change, without changing anything.
    pub fn audit(candidate: &FunctionValueMap, context: &EnforcementContext) -> Vec<BoundViolation> {
        let enforced = Self::enforce(candidate, context);
        FunctionId::ALL
            .iter()
            .filter_map(|id| {
                let original = candidate.get(*id);
                let corrected = enforced.value(*id);
                (original != Some(corrected)).then_some(BoundViolation {
                    function: *id,
                    original,
                    corrected,
                })
            })
            .collect()
    }

    /// True when the map is already a fixed point of `enforce`.
    pub fn is_safe(map: &FunctionValueMap, context: &EnforcementContext) -> bool {
        map.is_complete() && Self::audit(map, context).is_empty()
    }

    /// Keep `id` within `[lo, hi]` intersected with its hardware bounds.
    ///
    /// An empty intersection means the function table is defective. Debug
    /// builds panic on it; release builds fall back to the hardware bounds.
    fn band(map: &mut FunctionValueMap, id: FunctionId, lo: i32, hi: i32) {
        let spec = id.spec();
        let lo = lo.max(spec.min);
        let hi = hi.min(spec.max);
        debug_assert!(lo <= hi, "empty dependency band for {}: {}..={}", id, lo, hi);
        let value = map.value(id);
        let corrected = if lo <= hi {
            value.clamp(lo, hi)
        } else {
            spec.clamp(value)
        };
        if corrected != value {
            debug!(function = %id, value, corrected, lo, hi, "Dependency rule correction");
            map.set(id, corrected);
        }
    }
}
