//! Scenario tests: the validate -> optimize -> enforce pipeline.

use lsv_tuner_engine::{factory_defaults, EnforcementContext, SafetyEnforcer, TuningEngine};
use lsv_tuner_tests::{complete_input, hauling_input, input_from_json, lithium_sparking_input};
use lsv_tuner_types::{FunctionId, MotorCondition, ProfileInput, TunerError, WarningLevel};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn assert_safe(settings: &lsv_tuner_types::FunctionValueMap, motor: MotorCondition) {
    assert!(settings.is_complete());
    assert!(SafetyEnforcer::is_safe(settings, &EnforcementContext::new(motor)));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn validated_profile_optimizes_to_safe_settings() {
    let engine = TuningEngine::default();
    let input = complete_input();

    assert!(engine.validate(&input).is_valid);
    let settings = engine.optimize(&input, None).unwrap();
    assert_safe(&settings, MotorCondition::Good);
}

#[test]
fn empty_input_is_factory_defaults() {
    let engine = TuningEngine::default();
    let settings = engine.optimize(&ProfileInput::default(), None).unwrap();
    assert_eq!(settings, factory_defaults());
}

#[test]
fn hauling_profile_is_flagged_and_derated() {
    let engine = TuningEngine::default();
    let input = hauling_input();

    let report = engine.validate(&input);
    assert!(report.is_valid);
    assert_eq!(report.highest_warning_level(), Some(WarningLevel::High));

    let settings = engine.optimize(&input, Some("heavy-hauler")).unwrap();
    assert_safe(&settings, MotorCondition::Worn);
    assert!(settings.value(FunctionId::MaxArmatureCurrent) <= 215);
    assert!(settings.value(FunctionId::MinFieldCurrent) >= 65);
}

#[test]
fn lithium_on_sparking_motor_is_heavily_derated() {
    let engine = TuningEngine::default();
    let settings = engine.optimize(&lithium_sparking_input(), None).unwrap();

    assert_safe(&settings, MotorCondition::Sparking);
    assert_eq!(settings.value(FunctionId::BatteryVoltage), 82);
    assert!(settings.value(FunctionId::MaxArmatureCurrent) <= 200);
    assert!(settings.value(FunctionId::FieldWeakeningDepth) <= 1);
}

#[test]
fn higher_voltage_pack_moves_voltage_functions_together() {
    let engine = TuningEngine::default();
    let settings = engine
        .optimize(
            &input_from_json(r#"{"battery": {"type": "agm", "voltage": 96}}"#),
            None,
        )
        .unwrap();

    let battery = settings.value(FunctionId::BatteryVoltage);
    assert_eq!(battery, 96);
    assert!(settings.value(FunctionId::RegenVoltageLimit) >= battery);
    assert!(settings.value(FunctionId::LowVoltageCutback) >= battery / 2);
}

#[test]
fn unknown_base_preset_is_a_structured_failure() {
    let engine = TuningEngine::default();
    let err = engine
        .optimize(&complete_input(), Some("plaid"))
        .unwrap_err();
    assert_eq!(err, TunerError::UnknownPreset("plaid".into()));
}

#[test]
fn optimization_is_deterministic() {
    let engine = TuningEngine::default();
    let input = hauling_input();
    let first = engine.optimize(&input, Some("hill-climber")).unwrap();
    for _ in 0..5 {
        assert_eq!(engine.optimize(&input, Some("hill-climber")).unwrap(), first);
    }
}

#[test]
fn one_engine_serves_concurrent_callers() {
    let engine = TuningEngine::default();
    let expected = engine.optimize(&complete_input(), None).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| engine.optimize(&complete_input(), None).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });

    // The shared baseline is untouched.
    assert_eq!(engine.factory_defaults(), factory_defaults());
}
