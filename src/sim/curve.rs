//! Fixed 24-sample hourly net load curve.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use super::types::SimError;

/// Number of hourly samples in one simulated day.
pub const HOURS: usize = 24;

/// Hourly net load for one day.
///
/// Index `0..24` is the hour-of-day; hour `h` (1-based) lives at index `h - 1`.
///
/// # Sign Convention
/// - Positive: consumption (kW)
/// - Negative: on-site generation (kW)
///
/// # Examples
///
/// ```
/// use bess_sim::sim::curve::Curve;
///
/// let curve = Curve::filled(2.0).unwrap();
/// assert_eq!(curve.at_hour(24).unwrap(), 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Curve([f64; HOURS]);

impl Curve {
    /// Creates a curve from exactly 24 samples.
    ///
    /// # Errors
    ///
    /// Returns `SimError::NonFiniteSample` if any sample is NaN or infinite.
    pub fn new(samples: [f64; HOURS]) -> Result<Self, SimError> {
        if let Some(idx) = samples.iter().position(|v| !v.is_finite()) {
            return Err(SimError::NonFiniteSample { hour: idx + 1 });
        }
        Ok(Self(samples))
    }

    /// Creates a curve where every hour holds `value`.
    ///
    /// # Errors
    ///
    /// Returns `SimError::NonFiniteSample` if `value` is not finite.
    pub fn filled(value: f64) -> Result<Self, SimError> {
        Self::new([value; HOURS])
    }

    /// Creates a curve from a slice that must hold exactly 24 samples.
    ///
    /// # Errors
    ///
    /// Returns `SimError::CurveLength` for any other length, or
    /// `SimError::NonFiniteSample` for NaN/infinite samples.
    pub fn from_slice(samples: &[f64]) -> Result<Self, SimError> {
        let array: [f64; HOURS] = samples
            .try_into()
            .map_err(|_| SimError::CurveLength { len: samples.len() })?;
        Self::new(array)
    }

    /// All-zero curve.
    pub fn zeros() -> Self {
        Self([0.0; HOURS])
    }

    /// Returns the sample at a 1-based hour.
    ///
    /// # Errors
    ///
    /// Returns `SimError::OutOfRange` if `hour` is outside `1..=24`.
    pub fn at_hour(&self, hour: usize) -> Result<f64, SimError> {
        hour_to_index(hour).map(|idx| self.0[idx])
    }

    /// Iterates samples in index order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    /// Returns a copy of the raw samples.
    pub fn to_array(&self) -> [f64; HOURS] {
        self.0
    }

    /// Returns `true` if any sample is generation (< 0).
    pub fn has_generation(&self) -> bool {
        self.0.iter().any(|&v| v < 0.0)
    }

    pub(crate) fn set(&mut self, idx: usize, value: f64) {
        self.0[idx] = value;
    }
}

impl Default for Curve {
    fn default() -> Self {
        Self::zeros()
    }
}

impl Index<usize> for Curve {
    type Output = f64;

    fn index(&self, idx: usize) -> &f64 {
        &self.0[idx]
    }
}

impl TryFrom<Vec<f64>> for Curve {
    type Error = SimError;

    fn try_from(samples: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_slice(&samples)
    }
}

impl From<Curve> for Vec<f64> {
    fn from(curve: Curve) -> Self {
        curve.0.to_vec()
    }
}

/// Converts a 1-based hour (`1..=24`) into a 0-based curve index.
///
/// # Errors
///
/// Returns `SimError::OutOfRange` for hours outside `1..=24`.
pub fn hour_to_index(hour: usize) -> Result<usize, SimError> {
    if (1..=HOURS).contains(&hour) {
        Ok(hour - 1)
    } else {
        Err(SimError::OutOfRange { hour })
    }
}
