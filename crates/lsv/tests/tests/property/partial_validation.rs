//! Property tests: validation only judges the sections it was given.
//!
//! A section absent from the input never produces an error for its own
//! fields, and validity is decided by errors alone.

use lsv_tuner_engine::TuningEngine;
use lsv_tuner_types::{Completeness, Section};
use proptest::prelude::*;

use crate::strategies::arb_profile_input;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn section_of(field: &str) -> &str {
    field.split('.').next().unwrap_or(field)
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn absent_sections_raise_no_errors(input in arb_profile_input()) {
        let result = TuningEngine::default().validate(&input);
        for error in &result.errors {
            let key = section_of(&error.field);
            let section = Section::ALL.into_iter().find(|s| s.key() == key);
            prop_assert!(section.is_some(), "unknown field path {}", error.field);
            prop_assert!(
                section.is_some_and(|s| input.is_present(s)),
                "error for absent section: {}",
                error.field
            );
        }
    }

    #[test]
    fn validity_follows_errors_only(input in arb_profile_input()) {
        let result = TuningEngine::default().validate(&input);
        prop_assert_eq!(result.is_valid, result.errors.is_empty());
    }

    #[test]
    fn section_level_errors_need_a_complete_input(input in arb_profile_input()) {
        let result = TuningEngine::default().validate(&input);
        let section_errors = result.errors.iter().filter(|e| !e.field.contains('.')).count();
        if input.completeness() == Completeness::Partial {
            prop_assert_eq!(section_errors, 0);
        }
    }

    #[test]
    fn validation_is_deterministic(input in arb_profile_input()) {
        let engine = TuningEngine::default();
        prop_assert_eq!(engine.validate(&input), engine.validate(&input));
    }
}
