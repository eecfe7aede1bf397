//! Property tests: the enforcer maps any candidate into the safe region.
//!
//! Safe means complete, within every hardware bound, consistent with every
//! dependency band, and a fixed point of `enforce`.

use lsv_tuner_engine::{EnforcementContext, SafetyEnforcer};
use lsv_tuner_types::FunctionId;
use proptest::prelude::*;

use crate::strategies::{arb_candidate_map, arb_motor_condition};

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn enforce_is_idempotent(
        candidate in arb_candidate_map(),
        motor in arb_motor_condition(),
    ) {
        let context = EnforcementContext::new(motor);
        let once = SafetyEnforcer::enforce(&candidate, &context);
        let twice = SafetyEnforcer::enforce(&once, &context);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn enforced_values_are_within_hardware_bounds(
        candidate in arb_candidate_map(),
        motor in arb_motor_condition(),
    ) {
        let enforced = SafetyEnforcer::enforce(&candidate, &EnforcementContext::new(motor));
        prop_assert!(enforced.is_complete());
        for (id, value) in enforced.iter() {
            let spec = id.spec();
            prop_assert!(spec.contains(value), "{} = {} outside {}..={}", id, value, spec.min, spec.max);
        }
    }

    #[test]
    fn enforced_values_respect_dependency_bands(
        candidate in arb_candidate_map(),
        motor in arb_motor_condition(),
    ) {
        let context = EnforcementContext::new(motor);
        let map = SafetyEnforcer::enforce(&candidate, &context);
        let f = |id| map.value(id);

        let battery = f(FunctionId::BatteryVoltage);
        prop_assert!(f(FunctionId::RegenVoltageLimit) >= battery);
        prop_assert!(f(FunctionId::RegenVoltageLimit) <= battery * 6 / 5);
        prop_assert!(f(FunctionId::LowVoltageCutback) * 2 >= battery);
        prop_assert!(f(FunctionId::LowVoltageCutback) <= battery * 17 / 20);
        prop_assert!(f(FunctionId::RegenFieldCurrent) <= f(FunctionId::RegenVoltageLimit) * 3 / 2);
        prop_assert!(f(FunctionId::RegenArmatureCurrent) <= f(FunctionId::MaxArmatureCurrent));

        let top = f(FunctionId::TopSpeed);
        prop_assert!(f(FunctionId::FieldWeakeningOnset) * 5 >= top * 3);
        prop_assert!(f(FunctionId::FieldWeakeningOnset) <= top - 2);
        prop_assert!(f(FunctionId::MinFieldCurrent) >= context.min_field_floor());
    }

    #[test]
    fn in_bounds_safe_values_are_left_alone(
        candidate in arb_candidate_map(),
        motor in arb_motor_condition(),
    ) {
        let context = EnforcementContext::new(motor);
        let enforced = SafetyEnforcer::enforce(&candidate, &context);
        prop_assert!(SafetyEnforcer::audit(&enforced, &context).is_empty());
    }
}
