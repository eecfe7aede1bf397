//! Built-in preset definitions.

use std::collections::BTreeMap;

use lsv_tuner_types::{
    EnvironmentSection, FunctionId, PrioritySection, ProfileInput, RawField, VehicleSection,
};

use crate::presets::Preset;

fn overrides(pairs: &[(FunctionId, i32)]) -> BTreeMap<FunctionId, i32> {
    pairs.iter().copied().collect()
}

fn weight(value: f64) -> Option<RawField> {
    Some(RawField::Number(value))
}

fn features(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Near-factory behavior with slightly stronger pedal-up regen.
pub fn balanced() -> Preset {
    Preset {
        name: "balanced".into(),
        description: "Everyday driving with a mild regen bump over factory".into(),
        features: features(&[
            "Factory acceleration and top speed",
            "Slightly stronger pedal-up regen",
            "Neutral starting point for custom tuning",
        ]),
        overrides: overrides(&[(FunctionId::RegenEngagement, 45)]),
        hints: ProfileInput {
            priorities: Some(PrioritySection {
                speed: weight(5.0),
                acceleration: weight(5.0),
                range: weight(5.0),
                hill_climbing: weight(5.0),
                regen: weight(5.0),
            }),
            ..Default::default()
        },
    }
}

/// Torque for grades.
///
/// The regen field override deliberately sits above the hardware ceiling;
/// the enforcer pulls it back to what the regen voltage limit allows.
pub fn hill_climber() -> Preset {
    Preset {
        name: "hill-climber".into(),
        description: "Maximum torque and strong downhill regen for steep terrain".into(),
        features: features(&[
            "Raised armature and field current for climbing torque",
            "Stronger regen field for controlled descents",
            "Softer acceleration ramp to protect the drivetrain under load",
        ]),
        overrides: overrides(&[
            (FunctionId::AccelerationRate, 12),
            (FunctionId::MaxArmatureCurrent, 250),
            (FunctionId::PlugBrakingCurrent, 75),
            (FunctionId::MaxFieldCurrent, 262),
            (FunctionId::RegenArmatureCurrent, 230),
            (FunctionId::RegenFieldCurrent, 180),
        ]),
        hints: ProfileInput {
            environment: Some(EnvironmentSection {
                terrain: Some("steep".into()),
                ..Default::default()
            }),
            priorities: Some(PrioritySection {
                acceleration: weight(6.0),
                hill_climbing: weight(9.0),
                regen: weight(7.0),
                ..Default::default()
            }),
            ..Default::default()
        },
    }
}

pub fn max_range() -> Preset {
    Preset {
        name: "max-range".into(),
        description: "Gentle acceleration and aggressive regen to stretch each charge".into(),
        features: features(&[
            "Reduced armature current draw",
            "Gentle acceleration ramp",
            "High pedal-up regen engagement",
        ]),
        overrides: overrides(&[
            (FunctionId::TopSpeed, 20),
            (FunctionId::AccelerationRate, 10),
            (FunctionId::MaxArmatureCurrent, 200),
            (FunctionId::RegenEngagement, 70),
        ]),
        hints: ProfileInput {
            environment: Some(EnvironmentSection {
                terrain: Some("flat".into()),
                ..Default::default()
            }),
            priorities: Some(PrioritySection {
                speed: weight(3.0),
                acceleration: weight(3.0),
                range: weight(9.0),
                regen: weight(8.0),
                ..Default::default()
            }),
            ..Default::default()
        },
    }
}

pub fn performance() -> Preset {
    Preset {
        name: "performance".into(),
        description: "Quicker launches and higher top end for a healthy motor".into(),
        features: features(&[
            "Faster acceleration ramp",
            "Deeper, earlier field weakening for top speed",
            "Higher armature and field current limits",
        ]),
        overrides: overrides(&[
            (FunctionId::TopSpeed, 28),
            (FunctionId::AccelerationRate, 24),
            (FunctionId::MaxArmatureCurrent, 255),
            (FunctionId::MaxFieldCurrent, 265),
            (FunctionId::FieldWeakeningOnset, 16),
            (FunctionId::FieldWeakeningDepth, 5),
        ]),
        hints: ProfileInput {
            vehicle: Some(VehicleSection {
                motor_condition: Some("good".into()),
                ..Default::default()
            }),
            priorities: Some(PrioritySection {
                speed: weight(9.0),
                acceleration: weight(9.0),
                range: weight(3.0),
                ..Default::default()
            }),
            ..Default::default()
        },
    }
}

pub fn heavy_hauler() -> Preset {
    Preset {
        name: "heavy-hauler".into(),
        description: "Sustained current for loaded utility work".into(),
        features: features(&[
            "Higher sustained armature current",
            "Stronger plug braking for heavy loads",
            "Moderate acceleration to limit current spikes",
        ]),
        overrides: overrides(&[
            (FunctionId::AccelerationRate, 12),
            (FunctionId::MaxArmatureCurrent, 245),
            (FunctionId::PlugBrakingCurrent, 80),
            (FunctionId::MaxFieldCurrent, 260),
        ]),
        hints: ProfileInput {
            environment: Some(EnvironmentSection {
                vehicle_load: Some("heavy".into()),
                ..Default::default()
            }),
            priorities: Some(PrioritySection {
                hill_climbing: weight(8.0),
                ..Default::default()
            }),
            ..Default::default()
        },
    }
}

/// Conservative settings that keep a degraded motor running.
pub fn motor_saver() -> Preset {
    Preset {
        name: "motor-saver".into(),
        description: "Reduced current and field weakening for worn or sparking motors".into(),
        features: features(&[
            "Lower armature and field current limits",
            "Raised minimum field current to reduce arcing",
            "Minimal field weakening",
            "Light regen to spare brushes",
        ]),
        overrides: overrides(&[
            (FunctionId::MaxArmatureCurrent, 195),
            (FunctionId::MinFieldCurrent, 80),
            (FunctionId::MaxFieldCurrent, 225),
            (FunctionId::RegenEngagement, 25),
            (FunctionId::FieldWeakeningDepth, 1),
        ]),
        hints: ProfileInput {
            vehicle: Some(VehicleSection {
                motor_condition: Some("worn".into()),
                ..Default::default()
            }),
            priorities: Some(PrioritySection {
                speed: weight(3.0),
                range: weight(6.0),
                regen: weight(3.0),
                ..Default::default()
            }),
            ..Default::default()
        },
    }
}

/// All built-in presets, in catalog order.
pub fn builtin_presets() -> Vec<Preset> {
    vec![
        balanced(),
        hill_climber(),
        max_range(),
        performance(),
        heavy_hauler(),
        motor_saver(),
    ]
}
