use rand::{SeedableRng, rngs::StdRng};

use crate::devices::types::{Device, daylight_frac, gaussian_noise};
use crate::sim::curve::HOURS;

/// A solar PV generator that models power generation based on daylight hours.
///
/// `SolarPv` creates a half-sine generation profile between sunrise and sunset
/// with configurable peak power output and multiplicative noise to simulate
/// variations due to weather conditions.
///
/// # Sign Convention
/// Returns **negative** values during daylight (generation offsets load).
#[derive(Debug, Clone)]
pub struct SolarPv {
    /// Maximum power output in kilowatts under ideal conditions.
    pub kw_peak: f64,

    /// Hour index when sunrise occurs (inclusive).
    pub sunrise_idx: usize,

    /// Hour index when sunset occurs (exclusive).
    pub sunset_idx: usize,

    /// Standard deviation of the Gaussian noise as a fraction of output.
    pub noise_std: f64,

    /// Random number generator for noise generation.
    rng: StdRng,
}

impl SolarPv {
    /// Creates a new solar PV generator with the specified parameters.
    ///
    /// # Arguments
    ///
    /// * `kw_peak` - Maximum power output in kilowatts under ideal conditions
    /// * `sunrise_idx` - Hour index when sunrise occurs (inclusive)
    /// * `sunset_idx` - Hour index when sunset occurs (exclusive)
    /// * `noise_std` - Standard deviation of noise (e.g., 0.05 for +/-5% variation)
    /// * `seed` - Random seed for reproducible noise generation
    ///
    /// # Panics
    ///
    /// Panics if `sunrise_idx >= sunset_idx` or `sunset_idx > 24`.
    pub fn new(
        kw_peak: f64,
        sunrise_idx: usize,
        sunset_idx: usize,
        noise_std: f64,
        seed: u64,
    ) -> Self {
        assert!(sunrise_idx < sunset_idx && sunset_idx <= HOURS);
        Self {
            kw_peak: kw_peak.max(0.0),
            sunrise_idx,
            sunset_idx,
            noise_std: noise_std.max(0.0),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Device for SolarPv {
    /// Returns **negative** values during daylight and 0.0 at night.
    fn power_kw(&mut self, hour_idx: usize) -> f64 {
        let frac = daylight_frac(hour_idx % HOURS, self.sunrise_idx, self.sunset_idx);
        if frac <= 0.0 {
            return 0.0;
        }

        let noise_mult = 1.0 + gaussian_noise(&mut self.rng, self.noise_std);
        let kw = self.kw_peak * frac * noise_mult;

        -(kw.max(0.0))
    }

    fn device_type(&self) -> &'static str {
        "SolarPV"
    }
}
