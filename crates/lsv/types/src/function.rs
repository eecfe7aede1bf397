use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TunerError;

/// A numbered, vendor-defined tunable parameter on the motor controller.
///
/// The vendor id domain is sparse (1–26 with gaps); only the ids listed here
/// are recognized. Converting any other number fails with
/// [`TunerError::UnknownFunction`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum FunctionId {
    TopSpeed = 1,
    AccelerationRate = 3,
    MaxArmatureCurrent = 4,
    PlugBrakingCurrent = 6,
    MinFieldCurrent = 7,
    MaxFieldCurrent = 8,
    RegenArmatureCurrent = 9,
    RegenFieldCurrent = 10,
    RegenEngagement = 11,
    ReverseSpeed = 12,
    RegenVoltageLimit = 14,
    BatteryVoltage = 15,
    LowVoltageCutback = 19,
    FieldWeakeningOnset = 24,
    FieldWeakeningDepth = 26,
}

impl FunctionId {
    /// Every recognized function, in ascending id order.
    pub const ALL: [FunctionId; 15] = [
        FunctionId::TopSpeed,
        FunctionId::AccelerationRate,
        FunctionId::MaxArmatureCurrent,
        FunctionId::PlugBrakingCurrent,
        FunctionId::MinFieldCurrent,
        FunctionId::MaxFieldCurrent,
        FunctionId::RegenArmatureCurrent,
        FunctionId::RegenFieldCurrent,
        FunctionId::RegenEngagement,
        FunctionId::ReverseSpeed,
        FunctionId::RegenVoltageLimit,
        FunctionId::BatteryVoltage,
        FunctionId::LowVoltageCutback,
        FunctionId::FieldWeakeningOnset,
        FunctionId::FieldWeakeningDepth,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    /// Static table entry (bounds, default, direction) for this function.
    pub fn spec(self) -> &'static FunctionSpec {
        &FUNCTION_TABLE[self.index()]
    }

    // Position in ALL and FUNCTION_TABLE.
    const fn index(self) -> usize {
        match self {
            FunctionId::TopSpeed => 0,
            FunctionId::AccelerationRate => 1,
            FunctionId::MaxArmatureCurrent => 2,
            FunctionId::PlugBrakingCurrent => 3,
            FunctionId::MinFieldCurrent => 4,
            FunctionId::MaxFieldCurrent => 5,
            FunctionId::RegenArmatureCurrent => 6,
            FunctionId::RegenFieldCurrent => 7,
            FunctionId::RegenEngagement => 8,
            FunctionId::ReverseSpeed => 9,
            FunctionId::RegenVoltageLimit => 10,
            FunctionId::BatteryVoltage => 11,
            FunctionId::LowVoltageCutback => 12,
            FunctionId::FieldWeakeningOnset => 13,
            FunctionId::FieldWeakeningDepth => 14,
        }
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }
}

impl From<FunctionId> for u8 {
    fn from(id: FunctionId) -> Self {
        id.number()
    }
}

impl TryFrom<u8> for FunctionId {
    type Error = TunerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        FunctionId::ALL
            .iter()
            .copied()
            .find(|id| id.number() == value)
            .ok_or(TunerError::UnknownFunction(value))
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.number())
    }
}

/// Which way a function moves the controller's risk posture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyDirection {
    /// Higher values are less conservative (more current, more speed).
    Aggressive,
    /// Higher values are more conservative (larger protective margin).
    Protective,
}

impl SafetyDirection {
    /// Round a fractional value toward the conservative side.
    pub fn round(self, value: f64) -> i32 {
        match self {
            SafetyDirection::Aggressive => value.floor() as i32,
            SafetyDirection::Protective => value.ceil() as i32,
        }
    }
}

/// Static hardware description of one controller function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FunctionSpec {
    pub id: FunctionId,
    pub name: &'static str,
    pub unit: &'static str,
    /// Manufacturer out-of-box value
    pub default: i32,
    /// Hardware-safe minimum
    pub min: i32,
    /// Hardware-safe maximum
    pub max: i32,
    pub direction: SafetyDirection,
}

impl FunctionSpec {
    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

const fn spec(
    id: FunctionId,
    name: &'static str,
    unit: &'static str,
    default: i32,
    min: i32,
    max: i32,
    direction: SafetyDirection,
) -> FunctionSpec {
    FunctionSpec {
        id,
        name,
        unit,
        default,
        min,
        max,
        direction,
    }
}

use SafetyDirection::{Aggressive, Protective};

/// Canonical hardware bound table. Also the source of factory defaults.
pub static FUNCTION_TABLE: [FunctionSpec; 15] = [
    spec(FunctionId::TopSpeed, "Top speed", "mph", 22, 12, 30, Aggressive),
    spec(FunctionId::AccelerationRate, "Acceleration rate", "step", 15, 5, 30, Aggressive),
    spec(FunctionId::MaxArmatureCurrent, "Max armature current", "A", 221, 150, 260, Aggressive),
    spec(FunctionId::PlugBrakingCurrent, "Plug braking current", "A", 60, 40, 100, Aggressive),
    spec(FunctionId::MinFieldCurrent, "Minimum field current", "dA", 70, 50, 90, Protective),
    spec(FunctionId::MaxFieldCurrent, "Maximum field current", "dA", 245, 200, 270, Aggressive),
    spec(FunctionId::RegenArmatureCurrent, "Regen armature current", "A", 200, 100, 250, Aggressive),
    spec(FunctionId::RegenFieldCurrent, "Regen field current", "dA", 100, 60, 150, Aggressive),
    spec(FunctionId::RegenEngagement, "Regen engagement", "%", 40, 0, 100, Aggressive),
    spec(FunctionId::ReverseSpeed, "Reverse speed", "%", 60, 30, 80, Aggressive),
    spec(FunctionId::RegenVoltageLimit, "Regen voltage limit", "V", 86, 50, 120, Aggressive),
    spec(FunctionId::BatteryVoltage, "Battery voltage", "V", 72, 48, 96, Aggressive),
    spec(FunctionId::LowVoltageCutback, "Low-voltage cutback", "V", 58, 36, 84, Protective),
    spec(FunctionId::FieldWeakeningOnset, "Field weakening onset", "mph", 17, 8, 28, Protective),
    spec(FunctionId::FieldWeakeningDepth, "Field weakening depth", "step", 3, 0, 6, Aggressive),
];

/// A mapping from controller function to integer value.
///
/// Serializes as a JSON object keyed by the numeric function id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FunctionValueMap(BTreeMap<FunctionId, i32>);

impl FunctionValueMap {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// A fresh copy of the manufacturer's out-of-box settings.
    pub fn factory_defaults() -> Self {
        Self(
            FUNCTION_TABLE
                .iter()
                .map(|spec| (spec.id, spec.default))
                .collect(),
        )
    }

    pub fn get(&self, id: FunctionId) -> Option<i32> {
        self.0.get(&id).copied()
    }

    /// Value for `id`, falling back to the factory default.
    pub fn value(&self, id: FunctionId) -> i32 {
        self.get(id).unwrap_or(id.spec().default)
    }

    pub fn set(&mut self, id: FunctionId, value: i32) -> Option<i32> {
        self.0.insert(id, value)
    }

    pub fn contains(&self, id: FunctionId) -> bool {
        self.0.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every recognized function has a value.
    pub fn is_complete(&self) -> bool {
        FunctionId::ALL.iter().all(|id| self.contains(*id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (FunctionId, i32)> + '_ {
        self.0.iter().map(|(id, value)| (*id, *value))
    }

    /// Build a map from raw `(id, value)` pairs, rejecting unknown ids.
    pub fn from_raw<I>(pairs: I) -> Result<Self, TunerError>
    where
        I: IntoIterator<Item = (u8, i32)>,
    {
        pairs
            .into_iter()
            .map(|(raw, value)| FunctionId::try_from(raw).map(|id| (id, value)))
            .collect::<Result<BTreeMap<_, _>, _>>()
            .map(Self)
    }
}

impl FromIterator<(FunctionId, i32)> for FunctionValueMap {
    fn from_iter<T: IntoIterator<Item = (FunctionId, i32)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
