use thiserror::Error;

/// Errors from the tuning engine.
///
/// These signal contract violations (bad static data, an unknown preset
/// requested by name, malformed configuration). Problems with operator input
/// are reported through [`crate::ValidationResult`] instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TunerError {
    #[error("unknown controller function id: {0}")]
    UnknownFunction(u8),

    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    #[error("duplicate preset name in catalog: {0}")]
    DuplicatePreset(String),

    #[error("invalid preset: {reason}")]
    InvalidPreset { reason: String },

    #[error("invalid range for {field}: min {min} exceeds max {max}")]
    InvalidRange { field: String, min: f64, max: f64 },
}

/// Result alias for engine operations.
pub type TunerResult<T> = Result<T, TunerError>;
