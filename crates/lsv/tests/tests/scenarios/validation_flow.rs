//! Scenario tests: validating raw input as a form is filled in step by step.

use lsv_tuner_engine::TuningEngine;
use lsv_tuner_tests::{complete_input, input_from_json, lithium_sparking_input};
use lsv_tuner_types::{ProfileInput, Section, WarningLevel, WheelSection};

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn lithium_pack_on_sparking_motor_warns_high() {
    let engine = TuningEngine::default();
    let result = engine.validate(&lithium_sparking_input());

    let warning = result
        .warnings
        .iter()
        .find(|w| w.level == Some(WarningLevel::High))
        .expect("expected a high-level warning");
    let message = warning.message.to_lowercase();
    assert!(message.contains("lithium"));
    assert!(message.contains("sparking"));
    assert!(warning.suggestion.is_some());
}

#[test]
fn oversized_tire_is_a_warning_not_an_error() {
    let engine = TuningEngine::default();
    let result = engine.validate(&input_from_json(r#"{"wheel": {"tireDiameter": 26}}"#));

    assert!(result.is_valid);
    assert!(result.errors.is_empty());
    assert!(result.warnings_for("wheel.tireDiameter").count() >= 1);
}

#[test]
fn complete_in_range_profile_has_no_errors() {
    let engine = TuningEngine::default();
    let result = engine.validate(&complete_input());
    assert!(result.is_valid);
    assert!(result.errors.is_empty());
}

#[test]
fn each_step_of_a_form_validates_on_its_own() {
    let engine = TuningEngine::default();
    let full = complete_input();
    let mut partial = ProfileInput::default();

    // Sections arrive one at a time; none of the missing ones may complain.
    for section in Section::ALL {
        match section {
            Section::Vehicle => partial.vehicle = full.vehicle.clone(),
            Section::Battery => partial.battery = full.battery.clone(),
            Section::Wheel => partial.wheel = full.wheel.clone(),
            Section::Environment => partial.environment = full.environment.clone(),
            Section::Priorities => partial.priorities = full.priorities.clone(),
        }
        let result = engine.validate(&partial);
        assert!(result.is_valid, "step {:?}: {:?}", section, result.errors);
    }
}

#[test]
fn section_rule_fires_only_on_a_full_submission() {
    let engine = TuningEngine::default();

    let partial = ProfileInput {
        wheel: Some(WheelSection::default()),
        ..Default::default()
    };
    let result = engine.validate(&partial);
    assert!(result.errors.iter().all(|e| e.field != "wheel"));

    let mut full = complete_input();
    full.wheel = Some(WheelSection::default());
    let result = engine.validate(&full);
    assert_eq!(result.errors_for("wheel").count(), 1);
}

#[test]
fn warnings_never_block_submission() {
    let engine = TuningEngine::default();
    let mut input = complete_input();
    if let Some(environment) = input.environment.as_mut() {
        environment.terrain = Some("flat".into());
        environment.hill_grade = Some(lsv_tuner_types::RawField::Number(25.0));
    }
    if let Some(battery) = input.battery.as_mut() {
        battery.voltage = Some(lsv_tuner_types::RawField::Number(110.0));
    }

    let result = engine.validate(&input);
    assert!(!result.warnings.is_empty());
    assert!(result.is_valid);
}
