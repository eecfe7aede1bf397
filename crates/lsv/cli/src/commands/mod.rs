//! CLI command implementations

pub mod check;
pub mod defaults;
pub mod optimize;
pub mod presets;
pub mod validate;
