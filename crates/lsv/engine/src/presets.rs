use std::collections::{BTreeMap, HashSet};

use lsv_tuner_types::{
    Choice, FunctionId, FunctionValueMap, MotorCondition, ProfileInput, TunerError, TunerResult,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog;
use crate::enforcer::{EnforcementContext, SafetyEnforcer};

/// A named, curated starting configuration.
///
/// `overrides` are raw values pinned over factory defaults. They are never
/// trusted as safe; every path that turns them into settings goes through
/// the enforcer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub description: String,
    pub features: Vec<String>,
    pub overrides: BTreeMap<FunctionId, i32>,
    /// Profile and priority hints merged into a caller's input on request
    #[serde(default)]
    pub hints: ProfileInput,
}

impl Preset {
    /// Factory defaults with this preset's overrides applied, not yet enforced.
    pub fn apply_to(&self, base: &FunctionValueMap) -> FunctionValueMap {
        let mut map = base.clone();
        for (id, value) in &self.overrides {
            map.set(*id, *value);
        }
        map
    }

    /// Enforcement context implied by the preset's own vehicle hint.
    pub fn context(&self) -> EnforcementContext {
        let condition = self
            .hints
            .vehicle
            .as_ref()
            .and_then(|v| v.motor_condition.as_deref())
            .and_then(MotorCondition::parse)
            .unwrap_or_default();
        EnforcementContext::new(condition)
    }
}

/// Read-only, ordered preset table.
///
/// Constructed explicitly and handed to whoever needs it; there is no
/// process-wide catalog.
#[derive(Clone, Debug)]
pub struct PresetCatalog {
    presets: Vec<Preset>,
}

impl PresetCatalog {
    /// Build a catalog, rejecting blank or duplicate names.
    pub fn new(presets: Vec<Preset>) -> TunerResult<Self> {
        let mut seen = HashSet::new();
        for preset in &presets {
            if preset.name.trim().is_empty() {
                return Err(TunerError::InvalidPreset {
                    reason: "preset name must not be blank".into(),
                });
            }
            if !seen.insert(preset.name.as_str()) {
                return Err(TunerError::DuplicatePreset(preset.name.clone()));
            }
        }
        Ok(Self { presets })
    }

    /// The shipped catalog.
    pub fn builtin() -> Self {
        Self {
            presets: catalog::builtin_presets(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }

    /// Preset names in declaration order.
    pub fn names(&self) -> Vec<&str> {
        self.presets.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Safe settings for a preset: defaults, then overrides, then enforcement.
    pub fn settings(
        &self,
        name: &str,
        factory_defaults: &FunctionValueMap,
    ) -> Option<FunctionValueMap> {
        let preset = self.get(name)?;
        let candidate = preset.apply_to(factory_defaults);
        Some(SafetyEnforcer::enforce(&candidate, &preset.context()))
    }

    /// Overlay the preset's hints onto `base`. Hinted fields win; sections
    /// the preset does not hint are kept as they are.
    pub fn merge_input(&self, name: &str, base: &ProfileInput) -> Option<ProfileInput> {
        let preset = self.get(name)?;
        let mut merged = base.clone();
        merged.merge_from(&preset.hints);
        debug!(preset = name, "Merged preset hints into input");
        Some(merged)
    }
}

impl Default for PresetCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
