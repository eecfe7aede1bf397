use lsv_tuner_types::{FunctionValueMap, ProfileInput, TunerResult, ValidationResult};
use tracing::info;

use crate::config::EngineConfig;
use crate::optimizer::Optimizer;
use crate::presets::{Preset, PresetCatalog};
use crate::validator::Validator;

/// Facade over the preset catalog, validator and optimizer.
///
/// Holds only immutable state; share it by reference across threads.
#[derive(Clone, Debug)]
pub struct TuningEngine {
    catalog: PresetCatalog,
    validator: Validator,
}

impl TuningEngine {
    pub fn new(catalog: PresetCatalog, config: &EngineConfig) -> TunerResult<Self> {
        config.validate()?;
        info!(presets = catalog.len(), "Tuning engine ready");
        Ok(Self {
            catalog,
            validator: Validator::new(config.validation.clone()),
        })
    }

    /// Built-in presets with default validation ranges.
    pub fn with_builtin_presets() -> Self {
        Self {
            catalog: PresetCatalog::builtin(),
            validator: Validator::default(),
        }
    }

    pub fn catalog(&self) -> &PresetCatalog {
        &self.catalog
    }

    pub fn validate(&self, input: &ProfileInput) -> ValidationResult {
        self.validator.validate(input)
    }

    /// Fails only for an unknown `base_preset`.
    pub fn optimize(
        &self,
        input: &ProfileInput,
        base_preset: Option<&str>,
    ) -> TunerResult<FunctionValueMap> {
        Optimizer::new(&self.catalog).optimize(input, base_preset)
    }

    pub fn get_preset(&self, name: &str) -> Option<&Preset> {
        self.catalog.get(name)
    }

    pub fn list_preset_names(&self) -> Vec<&str> {
        self.catalog.names()
    }

    pub fn get_preset_settings(
        &self,
        name: &str,
        factory_defaults: &FunctionValueMap,
    ) -> Option<FunctionValueMap> {
        self.catalog.settings(name, factory_defaults)
    }

    pub fn merge_input_data(&self, name: &str, base: &ProfileInput) -> Option<ProfileInput> {
        self.catalog.merge_input(name, base)
    }

    pub fn factory_defaults(&self) -> FunctionValueMap {
        FunctionValueMap::factory_defaults()
    }
}

impl Default for TuningEngine {
    fn default() -> Self {
        Self::with_builtin_presets()
    }
}
