//! Property tests: merging preset hints is idempotent and preset-preferring.

use lsv_tuner_engine::TuningEngine;
use proptest::prelude::*;

use crate::strategies::arb_profile_input;

fn preset_names() -> Vec<String> {
    TuningEngine::default()
        .list_preset_names()
        .into_iter()
        .map(str::to_string)
        .collect()
}

proptest! {
    #[test]
    fn merge_is_idempotent(
        base in arb_profile_input(),
        name in proptest::sample::select(preset_names()),
    ) {
        let engine = TuningEngine::default();
        let once = engine.merge_input_data(&name, &base).unwrap();
        let twice = engine.merge_input_data(&name, &once).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn hinted_priorities_win(
        base in arb_profile_input(),
        name in proptest::sample::select(preset_names()),
    ) {
        let engine = TuningEngine::default();
        let preset = engine.get_preset(&name).unwrap();
        let merged = engine.merge_input_data(&name, &base).unwrap();

        if let Some(hinted) = &preset.hints.priorities {
            let merged = merged.priorities.as_ref().unwrap();
            for ((field, hint), (_, value)) in hinted.fields().iter().zip(merged.fields().iter()) {
                if hint.is_some() {
                    prop_assert_eq!(*hint, *value, "{} not taken from preset", field);
                }
            }
        }
    }

    #[test]
    fn unhinted_sections_are_kept(
        base in arb_profile_input(),
        name in proptest::sample::select(preset_names()),
    ) {
        let engine = TuningEngine::default();
        let preset = engine.get_preset(&name).unwrap();
        let merged = engine.merge_input_data(&name, &base).unwrap();

        if preset.hints.battery.is_none() {
            prop_assert_eq!(merged.battery, base.battery.clone());
        }
        if preset.hints.wheel.is_none() {
            prop_assert_eq!(merged.wheel, base.wheel.clone());
        }
    }
}
