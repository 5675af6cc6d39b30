//! Property tests over arbitrary 24-hour curves and windows.

use proptest::prelude::*;

use bess_sim::sim::curve::{Curve, HOURS};
use bess_sim::sim::energy::{monthly_stored_energy, stored_energy};
use bess_sim::sim::engine::DischargeSimulator;
use bess_sim::sim::policy::ComplementPolicy;
use bess_sim::sim::types::SimError;

fn samples() -> impl Strategy<Value = [f64; HOURS]> {
    proptest::array::uniform24(-20.0f64..20.0)
}

fn hour() -> impl Strategy<Value = usize> {
    1usize..=HOURS
}

fn policy() -> impl Strategy<Value = ComplementPolicy> {
    prop::sample::select(ComplementPolicy::ALL.to_vec())
}

fn window_hours(start: usize, end: usize) -> Vec<usize> {
    let len = (end + HOURS - start) % HOURS + 1;
    (0..len).map(|k| (start - 1 + k) % HOURS).collect()
}

proptest! {
    #[test]
    fn stored_energy_is_nonnegative_and_zero_without_generation(samples in samples()) {
        let curve = Curve::new(samples).expect("finite");
        let stored = stored_energy(&curve);
        prop_assert!(stored >= 0.0);
        prop_assert_eq!(stored == 0.0, !samples.iter().any(|&v| v < 0.0));
    }

    #[test]
    fn monthly_is_thirty_days(samples in samples()) {
        let curve = Curve::new(samples).expect("finite");
        prop_assert_eq!(monthly_stored_energy(&curve), 30.0 * stored_energy(&curve));
    }

    #[test]
    fn validation_matches_modular_walk(samples in samples(), start in hour(), end in hour()) {
        let curve = Curve::new(samples).expect("finite");
        let conflict = window_hours(start, end).into_iter().any(|idx| samples[idx] < 0.0);

        let mut sim = DischargeSimulator::new(curve);
        match sim.set_discharge_interval(start, end) {
            Ok(iv) => {
                prop_assert!(!conflict);
                prop_assert_eq!(iv.len(), window_hours(start, end).len());
            }
            Err(SimError::GenerationConflict { .. }) => prop_assert!(conflict),
            Err(other) => prop_assert!(false, "unexpected error {other}"),
        }
    }

    #[test]
    fn window_hours_stay_between_zero_and_raw_load(
        mut samples in samples(),
        start in hour(),
        end in hour(),
        policy in policy(),
    ) {
        let window = window_hours(start, end);
        for &idx in &window {
            samples[idx] = samples[idx].abs();
        }
        let curve = Curve::new(samples).expect("finite");

        let mut sim = DischargeSimulator::new(curve).with_policy(policy);
        sim.set_discharge_interval(start, end).expect("window holds no generation");
        sim.generate_resulting_curve();
        let resulting = sim.resulting_curve().expect("generated");

        for &idx in &window {
            prop_assert!(resulting[idx] >= 0.0);
            prop_assert!(resulting[idx] <= curve[idx]);
        }
    }

    #[test]
    fn generation_is_idempotent(
        samples in samples(),
        start in hour(),
        end in hour(),
        policy in policy(),
    ) {
        let curve = Curve::new(samples).expect("finite");
        let mut sim = DischargeSimulator::new(curve).with_policy(policy);
        // Rejected windows still generate the unmodified curve.
        let _ = sim.set_discharge_interval(start, end);

        sim.generate_resulting_curve();
        let first = sim.resulting_curve().expect("generated");
        sim.generate_resulting_curve();
        let second = sim.resulting_curve().expect("generated");

        for idx in 0..HOURS {
            prop_assert_eq!(first[idx].to_bits(), second[idx].to_bits());
        }
    }
}
