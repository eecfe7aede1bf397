//! Shared fixtures for the LSV tuner scenario and property tests.

use lsv_tuner_types::{
    BatterySection, EnvironmentSection, PrioritySection, ProfileInput, RawField, VehicleSection,
    WheelSection,
};

/// A fully populated, in-range profile for a stock E4.
pub fn complete_input() -> ProfileInput {
    ProfileInput {
        vehicle: Some(VehicleSection {
            model: Some("e4".into()),
            motor_condition: Some("good".into()),
            top_speed: Some(RawField::Number(25.0)),
        }),
        battery: Some(BatterySection {
            battery_type: Some("lead".into()),
            voltage: Some(RawField::Number(72.0)),
            capacity: Some(RawField::Number(150.0)),
            age: Some("new".into()),
        }),
        wheel: Some(WheelSection {
            tire_diameter: Some(RawField::Number(22.0)),
            gear_ratio: Some(RawField::Number(12.44)),
        }),
        environment: Some(EnvironmentSection {
            terrain: Some("mixed".into()),
            vehicle_load: Some("medium".into()),
            temperature_range: Some("mild".into()),
            hill_grade: Some(RawField::Number(6.0)),
        }),
        priorities: Some(priorities([6.0, 5.0, 7.0, 4.0, 5.0])),
    }
}

/// Priority section from `[speed, acceleration, range, hillClimbing, regen]`.
pub fn priorities(weights: [f64; 5]) -> PrioritySection {
    let [speed, acceleration, range, hill_climbing, regen] = weights.map(|w| Some(RawField::Number(w)));
    PrioritySection {
        speed,
        acceleration,
        range,
        hill_climbing,
        regen,
    }
}

/// Parse a JSON literal into a profile input.
pub fn input_from_json(json: &str) -> ProfileInput {
    serde_json::from_str(json).expect("fixture JSON must parse")
}

/// The lithium pack on a sparking motor combination.
pub fn lithium_sparking_input() -> ProfileInput {
    input_from_json(
        r#"{"battery": {"type": "lithium", "voltage": 82}, "vehicle": {"motorCondition": "sparking"}}"#,
    )
}

/// Hilly terrain with a heavy load and a worn motor.
pub fn hauling_input() -> ProfileInput {
    let mut input = complete_input();
    if let Some(vehicle) = input.vehicle.as_mut() {
        vehicle.motor_condition = Some("worn".into());
    }
    if let Some(environment) = input.environment.as_mut() {
        environment.terrain = Some("steep".into());
        environment.vehicle_load = Some("heavy".into());
        environment.hill_grade = Some(RawField::Number(18.0));
    }
    input.priorities = Some(priorities([3.0, 5.0, 5.0, 9.0, 6.0]));
    input
}
