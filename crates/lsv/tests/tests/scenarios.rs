#[path = "scenarios/validation_flow.rs"]
mod validation_flow;

#[path = "scenarios/preset_flow.rs"]
mod preset_flow;

#[path = "scenarios/optimization_flow.rs"]
mod optimization_flow;
