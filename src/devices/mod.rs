//! Synthetic hourly profile generators used to build net load curves.

/// Residential base-load profile generator.
pub mod baseload;
/// Solar photovoltaic generation model.
pub mod solar;
pub mod types;

// Re-export the main types for convenience
pub use baseload::BaseLoad;
pub use solar::SolarPv;
pub use types::Device;

use crate::sim::curve::{Curve, HOURS};
use crate::sim::types::SimError;

/// Sums the devices hour by hour into a net load curve.
///
/// Consumption and generation are already in the curve sign convention, so
/// this performs pure summation with no sign flipping.
///
/// # Errors
///
/// Returns `SimError::NonFiniteSample` if a device produced NaN or infinity.
pub fn synthesize_net_load(devices: &mut [&mut dyn Device]) -> Result<Curve, SimError> {
    let mut samples = [0.0_f64; HOURS];
    for (hour_idx, sample) in samples.iter_mut().enumerate() {
        *sample = devices.iter_mut().map(|d| d.power_kw(hour_idx)).sum();
    }
    Curve::new(samples)
}
