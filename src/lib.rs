//! Single-day battery storage and discharge simulator over a 24-hour net load curve.

pub mod cli;
pub mod config;
/// Synthetic baseload and solar profile generators.
pub mod devices;
pub mod io;
pub mod reporting;
pub mod runner;
/// Curve, interval, energy accounting, validation, and discharge engine.
pub mod sim;
pub mod telemetry;
