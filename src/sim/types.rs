//! Core simulation types: errors, per-hour records, and generation summaries.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::interval::CircularInterval;
use super::policy::ComplementPolicy;

/// Errors reported synchronously by the engine and its validators.
///
/// None of these leave the engine partially mutated; every one is corrected
/// by supplying different input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// An hour argument fell outside `1..=24`.
    #[error("hour {hour} is out of range, expected 1..=24")]
    OutOfRange { hour: usize },
    /// A candidate discharge window contains a generation sample.
    #[error(
        "discharge window {start_hour}-{end_hour} includes generation at hour {hour} ({kw:.3} kW)"
    )]
    GenerationConflict {
        start_hour: usize,
        end_hour: usize,
        /// First offending hour in circular order (1-based).
        hour: usize,
        kw: f64,
    },
    /// The resulting curve was read before being generated, or after a mutation.
    #[error("resulting curve has not been generated since the last change")]
    NotGenerated,
    /// A curve was built from the wrong number of samples.
    #[error("curve must have exactly 24 samples, got {len}")]
    CurveLength { len: usize },
    /// A curve sample was NaN or infinite.
    #[error("curve sample at hour {hour} is not a finite number")]
    NonFiniteSample { hour: usize },
}

/// Consumer and resulting load for one hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourRecord {
    /// Hour of day (1-based).
    pub hour: usize,
    /// Raw net load (kW; positive=consumption, negative=generation).
    pub consumer_kw: f64,
    /// Net load after simulated discharge (kW).
    pub resulting_kw: f64,
    /// Whether this hour lies inside the discharge window.
    pub in_window: bool,
}

impl HourRecord {
    /// Change in load caused by the discharge (`resulting - consumer`).
    pub fn delta_kw(&self) -> f64 {
        self.resulting_kw - self.consumer_kw
    }
}

impl fmt::Display for HourRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "h={:>2} | consumer={:>8.3} kW  resulting={:>8.3} kW  delta={:>8.3} kW{}",
            self.hour,
            self.consumer_kw,
            self.resulting_kw,
            self.delta_kw(),
            if self.in_window { "  [discharge]" } else { "" },
        )
    }
}

/// Intermediate quantities of one resulting-curve generation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DischargeSummary {
    /// Discharge window used, if one was set.
    pub interval: Option<CircularInterval>,
    /// Daily stored energy from generation (kWh).
    pub stored_energy_kwh: f64,
    /// Total consumption inside the window (kWh).
    pub window_consumption_kwh: f64,
    /// Fraction of each in-window hour's load that remains after discharge.
    pub discharge_ratio: f64,
    /// Stored energy left once the window is fully offset (kWh).
    pub remaining_energy_kwh: f64,
    /// `remaining_energy_kwh / stored_energy_kwh`, or 0 with no stored energy.
    pub remaining_ratio: f64,
    /// Multiplier applied to hours outside the window.
    pub complement_factor: f64,
    /// Policy that produced `complement_factor`.
    pub policy: ComplementPolicy,
}

impl fmt::Display for DischargeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let window = self
            .interval
            .map_or_else(|| "none".to_string(), |iv| iv.to_string());
        write!(
            f,
            "window={window} | stored={:.3} kWh  window_load={:.3} kWh  \
             ratio={:.3} | remaining={:.3} kWh ({:.1}%) | {} x{:.3}",
            self.stored_energy_kwh,
            self.window_consumption_kwh,
            self.discharge_ratio,
            self.remaining_energy_kwh,
            self.remaining_ratio * 100.0,
            self.policy,
            self.complement_factor,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hour_record_delta_and_display() {
        let r = HourRecord {
            hour: 19,
            consumer_kw: 2.0,
            resulting_kw: 0.5,
            in_window: true,
        };
        assert_eq!(r.delta_kw(), -1.5);
        let s = r.to_string();
        assert!(s.contains("[discharge]"));
        assert!(s.starts_with("h=19"));
    }

    #[test]
    fn summary_display_does_not_panic() {
        let s = DischargeSummary {
            interval: CircularInterval::from_hours(23, 2).ok(),
            stored_energy_kwh: 50.0,
            window_consumption_kwh: 40.0,
            discharge_ratio: 0.0,
            remaining_energy_kwh: 10.0,
            remaining_ratio: 0.2,
            complement_factor: 0.8,
            policy: ComplementPolicy::Attenuate,
        };
        let text = format!("{s}");
        assert!(text.contains("23-2 (4h)"));
        assert!(text.contains("attenuate"));
    }

    #[test]
    fn error_messages_name_the_hour() {
        let e = SimError::GenerationConflict {
            start_hour: 5,
            end_hour: 7,
            hour: 6,
            kw: -10.0,
        };
        assert!(e.to_string().contains("hour 6"));
        assert!(SimError::OutOfRange { hour: 25 }.to_string().contains("25"));
    }
}
