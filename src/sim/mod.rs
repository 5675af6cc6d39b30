/// Fixed 24-hour curve type and hour/index conversion.
pub mod curve;
pub mod energy;
pub mod engine;
/// Wrap-around hour ranges and their complements.
pub mod interval;
pub mod kpi;
pub mod policy;
pub mod types;
/// Discharge-window validation.
pub mod validator;
