#[path = "property/strategies.rs"]
mod strategies;

#[path = "property/enforcer_bounds.rs"]
mod enforcer_bounds;

#[path = "property/optimizer_safety.rs"]
mod optimizer_safety;

#[path = "property/partial_validation.rs"]
mod partial_validation;

#[path = "property/preset_merge.rs"]
mod preset_merge;
