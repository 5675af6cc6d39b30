use rand::{SeedableRng, rngs::StdRng};

use crate::devices::types::{Device, gaussian_noise};
use crate::sim::curve::HOURS;

/// A baseload generator that models daily electricity consumption patterns.
///
/// `BaseLoad` creates a sinusoidal power demand pattern with configurable baseline,
/// amplitude, phase, and random noise to simulate typical daily load patterns.
///
/// # Examples
///
/// ```
/// use bess_sim::devices::{BaseLoad, Device};
///
/// // Create a baseload with typical parameters
/// let mut load = BaseLoad::new(
///     1.0,  // base_kw - average consumption
///     0.5,  // amp_kw - daily variation
///     0.0,  // phase_rad - no phase shift
///     0.05, // noise_std - small random variation
///     42,   // seed - for reproducible randomness
/// );
///
/// // Demand at noon is never negative
/// assert!(load.power_kw(12) >= 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct BaseLoad {
    /// Baseline power consumption in kilowatts
    pub base_kw: f64,

    /// Amplitude of the sinusoidal variation in kilowatts
    pub amp_kw: f64,

    /// Phase offset of the sinusoidal pattern in radians
    pub phase_rad: f64,

    /// Standard deviation of the Gaussian noise in kilowatts
    pub noise_std: f64,

    /// Random number generator for noise generation
    rng: StdRng,
}

impl BaseLoad {
    /// Creates a new baseload generator with the specified parameters.
    ///
    /// # Arguments
    ///
    /// * `base_kw` - The baseline power consumption in kilowatts
    /// * `amp_kw` - The amplitude of sinusoidal daily variation in kilowatts
    /// * `phase_rad` - The phase offset in radians
    /// * `noise_std` - The standard deviation of Gaussian noise in kilowatts
    /// * `seed` - Random seed for reproducible noise generation
    pub fn new(base_kw: f64, amp_kw: f64, phase_rad: f64, noise_std: f64, seed: u64) -> Self {
        Self {
            base_kw,
            amp_kw,
            phase_rad,
            noise_std: noise_std.max(0.0),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Device for BaseLoad {
    /// Baseline plus a daily sinusoid plus Gaussian noise, clamped at zero.
    fn power_kw(&mut self, hour_idx: usize) -> f64 {
        let day_pos = (hour_idx % HOURS) as f64 / HOURS as f64; // [0,1)
        let angle = 2.0 * std::f64::consts::PI * day_pos + self.phase_rad;
        let noise = gaussian_noise(&mut self.rng, self.noise_std);

        let kw = self.base_kw + self.amp_kw * angle.sin() + noise;
        kw.max(0.0) // no negative demand
    }

    fn device_type(&self) -> &'static str {
        "BaseLoad"
    }
}
