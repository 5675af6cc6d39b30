//! Config-driven engine construction and a single generation pass.

use tracing::info;

use crate::config::ScenarioConfig;
use crate::sim::curve::Curve;
use crate::sim::engine::DischargeSimulator;
use crate::sim::kpi::CurveKpi;
use crate::sim::types::{DischargeSummary, HourRecord, SimError};

/// Everything produced by one scenario run.
#[derive(Debug, Clone)]
pub struct ScenarioRun {
    /// Engine holding the curve, window, and generated result.
    pub simulator: DischargeSimulator,
    /// Intermediate quantities of the generation pass.
    pub summary: DischargeSummary,
    /// Per-hour raw and resulting load.
    pub records: Vec<HourRecord>,
    /// Aggregate indicators over `records`.
    pub kpi: CurveKpi,
}

/// Builds the engine for `curve`, commits the configured window, and
/// generates the resulting curve.
///
/// # Errors
///
/// Returns the `SimError` from window validation (`OutOfRange` or
/// `GenerationConflict`).
pub fn run_scenario(cfg: &ScenarioConfig, curve: Curve) -> Result<ScenarioRun, SimError> {
    let mut simulator = DischargeSimulator::new(curve)
        .with_policy(cfg.simulation.policy)
        .with_absorb_generation(cfg.simulation.absorb_generation);

    let d = &cfg.discharge;
    simulator.set_discharge_interval(d.start_hour, d.end_hour)?;
    let summary = simulator.generate_resulting_curve();
    let records = simulator.hour_records()?;
    let kpi = CurveKpi::from_records(&records);

    info!(
        stored_kwh = summary.stored_energy_kwh,
        offset_kwh = kpi.energy_offset_kwh,
        "scenario run complete"
    );

    Ok(ScenarioRun {
        simulator,
        summary,
        records,
        kpi,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_runs_end_to_end() {
        let cfg = ScenarioConfig::baseline();
        let curve = cfg.build_curve().expect("finite profile");
        let run = run_scenario(&cfg, curve).expect("evening window has no generation");

        assert_eq!(run.records.len(), 24);
        assert_eq!(run.kpi.window_hours, 5);
        assert!(run.summary.stored_energy_kwh > 0.0);
        assert!(run.kpi.energy_offset_kwh > 0.0);
    }

    #[test]
    fn conflicting_window_is_reported() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.discharge.start_hour = 12;
        cfg.discharge.end_hour = 14;
        let curve = cfg.build_curve().expect("finite profile");
        let err = run_scenario(&cfg, curve);
        assert!(matches!(err, Err(SimError::GenerationConflict { .. })));
    }
}
