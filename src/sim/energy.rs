//! Energy accounting over a raw hourly curve.
//!
//! With hourly samples, one kW held for one hour is one kWh, so sums of
//! samples are energies.

use super::curve::Curve;

/// Days used to project a daily figure onto a month.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Total magnitude of generation over the day (kWh).
///
/// `Σ max(0, -sample)`. Never negative; zero iff the curve has no generation.
pub fn stored_energy(curve: &Curve) -> f64 {
    curve.iter().map(|v| (-v).max(0.0)).sum()
}

/// Stored energy projected over a 30-day month (kWh).
pub fn monthly_stored_energy(curve: &Curve) -> f64 {
    stored_energy(curve) * DAYS_PER_MONTH
}

/// Total consumption over the day (kWh), ignoring generation hours.
pub fn daily_consumption(curve: &Curve) -> f64 {
    curve.iter().map(|v| v.max(0.0)).sum()
}
