//! Common types and traits for hourly profile generators.

use rand::{Rng, rngs::StdRng};

/// A source or sink of power sampled once per hour of the day.
///
/// Positive values indicate consumption (load), negative values generation.
pub trait Device {
    /// Returns the power at the given 0-based hour index (kW).
    fn power_kw(&mut self, hour_idx: usize) -> f64;

    /// Returns a human-readable type name for the device.
    fn device_type(&self) -> &'static str;
}

/// Utility function to generate Gaussian noise using Box-Muller transform.
///
/// # Arguments
///
/// * `rng` - Random number generator
/// * `std_dev` - Standard deviation of the noise
///
/// # Returns
///
/// Random value from a Gaussian distribution with mean 0 and specified standard deviation
pub fn gaussian_noise(rng: &mut StdRng, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return 0.0;
    }

    let u1: f64 = rng.random::<f64>().clamp(1e-9, 1.0);
    let u2: f64 = rng.random::<f64>();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    z0 * std_dev
}

/// Fraction of peak solar output at `hour_idx`, shaped as a half sine.
///
/// Zero outside `[sunrise_idx, sunset_idx)`. Samples are taken at the middle
/// of each hour, so every daylight hour is strictly positive.
pub fn daylight_frac(hour_idx: usize, sunrise_idx: usize, sunset_idx: usize) -> f64 {
    if hour_idx < sunrise_idx || hour_idx >= sunset_idx {
        return 0.0;
    }
    let span = (sunset_idx - sunrise_idx) as f64;
    let pos = (hour_idx - sunrise_idx) as f64 + 0.5;
    (std::f64::consts::PI * pos / span).sin()
}
