//! Shared curve fixtures for integration tests.

use bess_sim::sim::curve::{Curve, HOURS};
use bess_sim::sim::engine::DischargeSimulator;

/// Builds a curve from `fill` with `(hour, kw)` overrides (1-based hours).
pub fn curve_with(fill: f64, overrides: &[(usize, f64)]) -> Curve {
    let mut samples = [fill; HOURS];
    for &(hour, kw) in overrides {
        samples[hour - 1] = kw;
    }
    Curve::new(samples).expect("fixture samples are finite")
}

/// 24 × 10 kW with generation of 10 and 5 kW in hours 1 and 2.
pub fn two_generation_hours() -> Curve {
    curve_with(10.0, &[(1, -10.0), (2, -5.0)])
}

/// Zeros except 20 kW generation at hour 1 and 10 kW loads at hours 11..=13.
pub fn exact_fit_curve() -> Curve {
    curve_with(0.0, &[(1, -20.0), (11, 10.0), (12, 10.0), (13, 10.0)])
}

/// 24 × 10 kW with a single generation hour.
pub fn single_generation_at(hour: usize, kw: f64) -> Curve {
    curve_with(10.0, &[(hour, -kw)])
}

/// Engine over `curve` with a committed window and a generated result.
pub fn generated(curve: Curve, start_hour: usize, end_hour: usize) -> DischargeSimulator {
    let mut sim = DischargeSimulator::new(curve);
    sim.set_discharge_interval(start_hour, end_hour)
        .expect("fixture window is valid");
    sim.generate_resulting_curve();
    sim
}
