//! Property tests: the optimizer never fails on input and never emits unsafe settings.

use lsv_tuner_engine::{EnforcementContext, SafetyEnforcer, TuningEngine};
use lsv_tuner_tests::priorities;
use lsv_tuner_types::{FunctionId, ProfileInput, TuningProfile};
use proptest::prelude::*;

use crate::strategies::{arb_profile_input, arb_weight};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn preset_names() -> Vec<Option<String>> {
    let engine = TuningEngine::default();
    let mut names: Vec<Option<String>> = engine
        .list_preset_names()
        .into_iter()
        .map(|n| Some(n.to_string()))
        .collect();
    names.push(None);
    names
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn any_input_yields_safe_settings(
        input in arb_profile_input(),
        preset in proptest::sample::select(preset_names()),
    ) {
        let engine = TuningEngine::default();
        let settings = engine.optimize(&input, preset.as_deref()).unwrap();
        let motor = TuningProfile::from_input(&input).motor_condition();

        prop_assert!(settings.is_complete());
        prop_assert!(SafetyEnforcer::is_safe(&settings, &EnforcementContext::new(motor)));
    }

    #[test]
    fn raising_hill_weight_never_lowers_armature_current(
        low in arb_weight(),
        high in arb_weight(),
    ) {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        let engine = TuningEngine::default();
        let run = |weight: f64| {
            let input = ProfileInput {
                priorities: Some(priorities([5.0, 5.0, 5.0, weight, 5.0])),
                ..Default::default()
            };
            engine.optimize(&input, None).unwrap()
        };

        let a = run(low);
        let b = run(high);
        for id in [FunctionId::MaxArmatureCurrent, FunctionId::MaxFieldCurrent] {
            prop_assert!(a.value(id) <= b.value(id), "{} fell from {} to {}", id, a.value(id), b.value(id));
        }
    }

    #[test]
    fn optimize_is_deterministic(input in arb_profile_input()) {
        let engine = TuningEngine::default();
        let first = engine.optimize(&input, None).unwrap();
        let second = engine.optimize(&input, None).unwrap();
        prop_assert_eq!(first, second);
    }
}
