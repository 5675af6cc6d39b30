//! Post-hoc KPI computation from per-hour records.

use std::fmt;

use serde::Serialize;

use super::types::HourRecord;

/// Aggregate indicators comparing the raw and resulting curves.
///
/// Computed post-hoc from `&[HourRecord]` so that reported figures always
/// match the exported rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveKpi {
    /// Consumption before discharge (kWh, generation hours excluded).
    pub consumption_before_kwh: f64,
    /// Consumption after discharge (kWh, generation hours excluded).
    pub consumption_after_kwh: f64,
    /// Consumption removed by the discharge (kWh).
    pub energy_offset_kwh: f64,
    /// Peak import before discharge (kW, 0 if the day never imports).
    pub peak_import_before_kw: f64,
    /// Peak import after discharge (kW).
    pub peak_import_after_kw: f64,
    /// Relative peak reduction (%), 0 when there was no import peak.
    pub peak_reduction_pct: f64,
    /// Number of hours inside the discharge window.
    pub window_hours: usize,
}

impl CurveKpi {
    /// Computes all KPIs from the per-hour records.
    ///
    /// # Arguments
    ///
    /// * `records` - Hour records from [`crate::sim::engine::DischargeSimulator::hour_records`]
    ///
    /// # Returns
    ///
    /// A `CurveKpi` with all fields populated (all zero for empty input).
    pub fn from_records(records: &[HourRecord]) -> Self {
        let mut before = 0.0_f64;
        let mut after = 0.0_f64;
        let mut peak_before = 0.0_f64;
        let mut peak_after = 0.0_f64;
        let mut window_hours = 0_usize;

        for r in records {
            before += r.consumer_kw.max(0.0);
            after += r.resulting_kw.max(0.0);
            peak_before = peak_before.max(r.consumer_kw);
            peak_after = peak_after.max(r.resulting_kw);
            if r.in_window {
                window_hours += 1;
            }
        }

        let peak_reduction_pct = if peak_before > 0.0 {
            (peak_before - peak_after) / peak_before * 100.0
        } else {
            0.0
        };

        Self {
            consumption_before_kwh: before,
            consumption_after_kwh: after,
            energy_offset_kwh: before - after,
            peak_import_before_kw: peak_before,
            peak_import_after_kw: peak_after,
            peak_reduction_pct,
            window_hours,
        }
    }
}

impl fmt::Display for CurveKpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- KPI Report ---")?;
        writeln!(
            f,
            "Consumption:     {:.3} kWh -> {:.3} kWh (offset {:.3} kWh)",
            self.consumption_before_kwh, self.consumption_after_kwh, self.energy_offset_kwh
        )?;
        writeln!(
            f,
            "Peak import:     {:.3} kW -> {:.3} kW ({:.1}% reduction)",
            self.peak_import_before_kw, self.peak_import_after_kw, self.peak_reduction_pct
        )?;
        write!(f, "Discharge hours: {}", self.window_hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(hour: usize, consumer_kw: f64, resulting_kw: f64, in_window: bool) -> HourRecord {
        HourRecord {
            hour,
            consumer_kw,
            resulting_kw,
            in_window,
        }
    }

    #[test]
    fn empty_records_give_zero_kpis() {
        let kpi = CurveKpi::from_records(&[]);
        assert_eq!(kpi.consumption_before_kwh, 0.0);
        assert_eq!(kpi.peak_reduction_pct, 0.0);
        assert_eq!(kpi.window_hours, 0);
    }

    #[test]
    fn offset_and_peak_reduction() {
        let records = vec![
            record(1, -4.0, -4.0, false),
            record(2, 2.0, 2.0, false),
            record(3, 6.0, 2.0, true),
            record(4, 4.0, 4.0, false),
        ];
        let kpi = CurveKpi::from_records(&records);
        assert_eq!(kpi.consumption_before_kwh, 12.0);
        assert_eq!(kpi.consumption_after_kwh, 8.0);
        assert_eq!(kpi.energy_offset_kwh, 4.0);
        assert_eq!(kpi.peak_import_before_kw, 6.0);
        assert_eq!(kpi.peak_import_after_kw, 4.0);
        assert!((kpi.peak_reduction_pct - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(kpi.window_hours, 1);
    }

    #[test]
    fn generation_only_day_has_no_peak() {
        let records = vec![record(1, -1.0, 0.0, false), record(2, -2.0, 0.0, false)];
        let kpi = CurveKpi::from_records(&records);
        assert_eq!(kpi.peak_import_before_kw, 0.0);
        assert_eq!(kpi.peak_reduction_pct, 0.0);
    }

    #[test]
    fn display_does_not_panic() {
        let kpi = CurveKpi::from_records(&[record(1, 1.0, 0.5, true)]);
        assert!(kpi.to_string().contains("KPI Report"));
    }
}
