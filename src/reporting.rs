//! Human-readable and JSON reports of a scenario run.

use serde::Serialize;

use crate::runner::ScenarioRun;
use crate::sim::interval::CircularInterval;
use crate::sim::kpi::CurveKpi;
use crate::sim::types::{DischargeSummary, HourRecord};

/// Serializable snapshot of a run.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub daily_stored_energy_kwh: f64,
    pub monthly_stored_energy_kwh: f64,
    pub discharge_interval: Option<CircularInterval>,
    pub summary: &'a DischargeSummary,
    pub kpi: &'a CurveKpi,
    pub hours: &'a [HourRecord],
}

impl<'a> From<&'a ScenarioRun> for Report<'a> {
    fn from(run: &'a ScenarioRun) -> Self {
        Self {
            daily_stored_energy_kwh: run.simulator.daily_stored_energy(),
            monthly_stored_energy_kwh: run.simulator.monthly_stored_energy(),
            discharge_interval: run.simulator.discharge_interval(),
            summary: &run.summary,
            kpi: &run.kpi,
            hours: &run.records,
        }
    }
}

/// Renders the run as pretty-printed JSON.
///
/// # Errors
///
/// Returns a `serde_json::Error` if serialization fails.
pub fn render_json(run: &ScenarioRun) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Report::from(run))
}

pub fn print_report(run: &ScenarioRun) {
    println!("--- Stored Energy ---");
    println!(
        "Daily stored energy: {:.3} kWh",
        run.simulator.daily_stored_energy()
    );
    println!(
        "Monthly stored energy: {:.3} kWh",
        run.simulator.monthly_stored_energy()
    );
    println!("\n{}\n", run.summary);

    for r in &run.records {
        println!("{r}");
    }

    println!("\n{}", run.kpi);
}
