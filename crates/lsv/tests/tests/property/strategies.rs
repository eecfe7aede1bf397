//! Shared proptest strategies for profile input and settings maps.

use lsv_tuner_types::{
    BatterySection, EnvironmentSection, FunctionId, FunctionValueMap, MotorCondition,
    PrioritySection, ProfileInput, RawField, VehicleSection, WheelSection,
};
use proptest::option;
use proptest::prelude::*;

/// A controller function id.
pub fn arb_function_id() -> impl Strategy<Value = FunctionId> {
    proptest::sample::select(FunctionId::ALL.to_vec())
}

/// A sparse candidate map with values well outside hardware bounds.
pub fn arb_candidate_map() -> impl Strategy<Value = FunctionValueMap> {
    proptest::collection::vec((arb_function_id(), -500i32..500), 0..20)
        .prop_map(|pairs| pairs.into_iter().collect())
}

pub fn arb_motor_condition() -> impl Strategy<Value = MotorCondition> {
    prop_oneof![
        Just(MotorCondition::Good),
        Just(MotorCondition::Worn),
        Just(MotorCondition::Sparking),
    ]
}

/// A text field: usually one of the allowed choices, sometimes junk or blank.
fn arb_choice(allowed: &'static [&'static str]) -> impl Strategy<Value = Option<String>> {
    option::of(prop_oneof![
        4 => proptest::sample::select(allowed).prop_map(str::to_string),
        1 => "[a-z]{1,8}",
        1 => Just("  ".to_string()),
    ])
}

/// A numeric field as a number, numeric text or garbage.
fn arb_raw_field(lo: f64, hi: f64) -> impl Strategy<Value = Option<RawField>> {
    option::of(prop_oneof![
        4 => (lo..hi).prop_map(RawField::Number),
        1 => (lo..hi).prop_map(|n| RawField::Text(format!("{:.1}", n))),
        1 => "[a-z]{1,6}".prop_map(RawField::Text),
    ])
}

pub fn arb_vehicle() -> impl Strategy<Value = VehicleSection> {
    (
        arb_choice(&["e2", "e4", "e6", "elxd"]),
        arb_choice(&["good", "worn", "sparking"]),
        arb_raw_field(5.0, 45.0),
    )
        .prop_map(|(model, motor_condition, top_speed)| VehicleSection {
            model,
            motor_condition,
            top_speed,
        })
}

pub fn arb_battery() -> impl Strategy<Value = BatterySection> {
    (
        arb_choice(&["lead", "agm", "lithium"]),
        arb_raw_field(24.0, 130.0),
        arb_raw_field(10.0, 400.0),
        arb_choice(&["new", "moderate", "old"]),
    )
        .prop_map(|(battery_type, voltage, capacity, age)| BatterySection {
            battery_type,
            voltage,
            capacity,
            age,
        })
}

pub fn arb_wheel() -> impl Strategy<Value = WheelSection> {
    (arb_raw_field(-5.0, 32.0), arb_raw_field(-2.0, 20.0)).prop_map(
        |(tire_diameter, gear_ratio)| WheelSection {
            tire_diameter,
            gear_ratio,
        },
    )
}

pub fn arb_environment() -> impl Strategy<Value = EnvironmentSection> {
    (
        arb_choice(&["flat", "mixed", "moderate", "steep"]),
        arb_choice(&["light", "medium", "heavy"]),
        arb_choice(&["cold", "mild", "hot"]),
        arb_raw_field(-5.0, 45.0),
    )
        .prop_map(
            |(terrain, vehicle_load, temperature_range, hill_grade)| EnvironmentSection {
                terrain,
                vehicle_load,
                temperature_range,
                hill_grade,
            },
        )
}

pub fn arb_priorities() -> impl Strategy<Value = PrioritySection> {
    (
        arb_raw_field(-2.0, 12.0),
        arb_raw_field(-2.0, 12.0),
        arb_raw_field(-2.0, 12.0),
        arb_raw_field(-2.0, 12.0),
        arb_raw_field(-2.0, 12.0),
    )
        .prop_map(
            |(speed, acceleration, range, hill_climbing, regen)| PrioritySection {
                speed,
                acceleration,
                range,
                hill_climbing,
                regen,
            },
        )
}

/// Any combination of present and absent sections with arbitrary content.
pub fn arb_profile_input() -> impl Strategy<Value = ProfileInput> {
    (
        option::of(arb_vehicle()),
        option::of(arb_battery()),
        option::of(arb_wheel()),
        option::of(arb_environment()),
        option::of(arb_priorities()),
    )
        .prop_map(
            |(vehicle, battery, wheel, environment, priorities)| ProfileInput {
                vehicle,
                battery,
                wheel,
                environment,
                priorities,
            },
        )
}

/// A weight anywhere on the 0-10 scale.
pub fn arb_weight() -> impl Strategy<Value = f64> {
    0.0f64..=10.0
}
