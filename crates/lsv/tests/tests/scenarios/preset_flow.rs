//! Scenario tests: presets as starting points for a tune.

use lsv_tuner_engine::{enforce, factory_defaults, EnforcementContext, SafetyEnforcer, TuningEngine};
use lsv_tuner_tests::complete_input;
use lsv_tuner_types::{FunctionId, ProfileInput, RawField};

#[test]
fn hill_climber_raises_climbing_functions_within_hardware_limits() {
    let engine = TuningEngine::default();
    let defaults = factory_defaults();

    let settings = engine
        .get_preset_settings("hill-climber", &defaults)
        .expect("hill-climber is built in");
    let settings = enforce(&settings, &EnforcementContext::default());

    for id in [
        FunctionId::MaxArmatureCurrent,
        FunctionId::MaxFieldCurrent,
        FunctionId::RegenFieldCurrent,
    ] {
        assert!(settings.value(id) > defaults.value(id), "{} not raised", id);
        assert!(settings.value(id) <= id.spec().max, "{} above hardware max", id);
    }
}

#[test]
fn preset_settings_are_a_fixed_point_of_the_enforcer() {
    let engine = TuningEngine::default();
    for name in engine.list_preset_names() {
        let preset = engine.get_preset(name).unwrap();
        let settings = engine.get_preset_settings(name, &factory_defaults()).unwrap();
        assert_eq!(enforce(&settings, &preset.context()), settings, "{}", name);
    }
}

#[test]
fn unknown_preset_is_none_everywhere() {
    let engine = TuningEngine::default();
    assert!(engine.get_preset("ludicrous").is_none());
    assert!(engine
        .get_preset_settings("ludicrous", &factory_defaults())
        .is_none());
    assert!(engine
        .merge_input_data("ludicrous", &ProfileInput::default())
        .is_none());
}

#[test]
fn merged_hints_override_leaves_and_keep_the_rest() {
    let engine = TuningEngine::default();
    let base = complete_input();

    let merged = engine.merge_input_data("max-range", &base).unwrap();
    let environment = merged.environment.as_ref().unwrap();
    assert_eq!(environment.terrain.as_deref(), Some("flat"));
    // Not hinted by the preset, so kept from the caller.
    assert_eq!(environment.vehicle_load.as_deref(), Some("medium"));
    assert_eq!(merged.battery, base.battery);

    let priorities = merged.priorities.as_ref().unwrap();
    assert_eq!(priorities.range, Some(RawField::Number(9.0)));
    assert_eq!(priorities.hill_climbing, Some(RawField::Number(4.0)));

    assert_eq!(engine.merge_input_data("max-range", &merged).unwrap(), merged);
}

#[test]
fn merged_then_optimized_preset_stays_safe() {
    let engine = TuningEngine::default();
    for name in engine.list_preset_names() {
        let merged = engine.merge_input_data(name, &complete_input()).unwrap();
        let settings = engine.optimize(&merged, Some(name)).unwrap();
        let motor = lsv_tuner_types::TuningProfile::from_input(&merged).motor_condition();
        assert!(
            SafetyEnforcer::is_safe(&settings, &EnforcementContext::new(motor)),
            "{} produced unsafe settings",
            name
        );
    }
}
