//! Discharge simulator that owns the curve, the validated window, and the result.

use tracing::{debug, info, warn};

use super::curve::{Curve, HOURS, hour_to_index};
use super::energy;
use super::interval::CircularInterval;
use super::policy::ComplementPolicy;
use super::types::{DischargeSummary, HourRecord, SimError};
use super::validator::validate_discharge_window;

/// Single-day storage and discharge engine.
///
/// Stored energy is computed eagerly whenever the curve is set. The resulting
/// curve exists only after [`DischargeSimulator::generate_resulting_curve`] and
/// is dropped by any later mutation, so reads never observe stale data.
///
/// # Examples
///
/// ```
/// use bess_sim::sim::curve::Curve;
/// use bess_sim::sim::engine::DischargeSimulator;
///
/// let mut samples = [0.0; 24];
/// samples[0] = -20.0;
/// samples[10] = 10.0;
/// samples[11] = 10.0;
///
/// let mut sim = DischargeSimulator::new(Curve::new(samples).unwrap());
/// sim.set_discharge_interval(11, 12).unwrap();
/// sim.generate_resulting_curve();
/// assert_eq!(sim.power_at_hour(11).unwrap(), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct DischargeSimulator {
    curve: Curve,
    stored_energy: f64,
    interval: Option<CircularInterval>,
    policy: ComplementPolicy,
    absorb_generation: bool,
    resulting: Option<Curve>,
    summary: Option<DischargeSummary>,
}

impl DischargeSimulator {
    /// Creates an engine for `curve` with the default complement policy.
    pub fn new(curve: Curve) -> Self {
        Self {
            stored_energy: energy::stored_energy(&curve),
            curve,
            interval: None,
            policy: ComplementPolicy::default(),
            absorb_generation: false,
            resulting: None,
            summary: None,
        }
    }

    /// Sets the complement policy (builder form).
    pub fn with_policy(mut self, policy: ComplementPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Reports generation hours as zero in the resulting curve (builder form).
    pub fn with_absorb_generation(mut self, absorb: bool) -> Self {
        self.absorb_generation = absorb;
        self
    }

    /// Replaces the raw curve.
    ///
    /// Recomputes stored energy and clears both the discharge window and the
    /// resulting curve; the caller must re-validate and regenerate.
    pub fn set_curve(&mut self, curve: Curve) {
        self.curve = curve;
        self.stored_energy = energy::stored_energy(&curve);
        self.interval = None;
        self.invalidate();
        info!(stored_kwh = self.stored_energy, "curve replaced");
    }

    /// Returns a copy of the raw curve.
    pub fn consumer_curve(&self) -> Curve {
        self.curve
    }

    /// Daily stored energy from generation (kWh).
    pub fn daily_stored_energy(&self) -> f64 {
        self.stored_energy
    }

    /// Daily stored energy projected over a 30-day month (kWh).
    pub fn monthly_stored_energy(&self) -> f64 {
        self.stored_energy * energy::DAYS_PER_MONTH
    }

    /// Validates and commits a discharge window given as 1-based inclusive hours.
    ///
    /// On failure the previous window (or none) is kept and the resulting
    /// curve is left as it was. On success the resulting curve is cleared.
    ///
    /// # Errors
    ///
    /// - `SimError::OutOfRange` if either hour is outside `1..=24`
    /// - `SimError::GenerationConflict` if the window contains generation
    pub fn set_discharge_interval(
        &mut self,
        start_hour: usize,
        end_hour: usize,
    ) -> Result<CircularInterval, SimError> {
        let interval = validate_discharge_window(&self.curve, start_hour, end_hour)
            .inspect_err(|e| warn!(start_hour, end_hour, "discharge window rejected: {e}"))?;

        self.interval = Some(interval);
        self.invalidate();
        info!(%interval, "discharge window set");
        Ok(interval)
    }

    /// Currently committed discharge window, if any.
    pub fn discharge_interval(&self) -> Option<CircularInterval> {
        self.interval
    }

    /// Removes the discharge window and clears the resulting curve.
    pub fn clear_discharge_interval(&mut self) {
        self.interval = None;
        self.invalidate();
    }

    pub fn policy(&self) -> ComplementPolicy {
        self.policy
    }

    /// Changes the complement policy and clears the resulting curve.
    pub fn set_policy(&mut self, policy: ComplementPolicy) {
        self.policy = policy;
        self.invalidate();
    }

    /// Recomputes the resulting curve from the raw curve and discharge window.
    ///
    /// Inside the window each hour keeps `discharge_ratio` of its load, which
    /// spreads the stored energy across hours in proportion to their share of
    /// window consumption. Hours outside the window are scaled by the factor
    /// the [`ComplementPolicy`] derives from the energy the window could not
    /// absorb. With no window set the resulting curve equals the raw curve.
    ///
    /// Calling this twice without mutation gives bit-identical results.
    ///
    /// # Returns
    ///
    /// The intermediate quantities of this pass.
    pub fn generate_resulting_curve(&mut self) -> DischargeSummary {
        let stored = self.stored_energy;

        // 1. Start from the raw curve
        let mut resulting = self.curve;

        // 2. Window consumption (every term >= 0 after validation)
        let window_consumption = self.interval.map_or(0.0, |iv| iv.sum(&self.curve));

        // 3. Remaining fraction of each in-window hour
        let discharge_ratio = if window_consumption > 0.0 {
            (1.0 - stored / window_consumption).max(0.0)
        } else {
            1.0
        };

        // 4. Energy the window could not absorb
        let remaining_energy = (stored - window_consumption).max(0.0);
        let remaining_ratio = if stored > 0.0 {
            remaining_energy / stored
        } else {
            0.0
        };
        let complement_factor = match self.interval {
            Some(_) => self.policy.factor(remaining_ratio),
            None => 1.0,
        };

        // 5. Apply window and complement scaling
        if let Some(iv) = self.interval {
            iv.map_into(&self.curve, &mut resulting, |kw| kw * discharge_ratio);
            iv.complement()
                .map_into(&self.curve, &mut resulting, |kw| kw * complement_factor);
        }

        // 6. Surplus hours feed storage
        if self.absorb_generation {
            for idx in 0..HOURS {
                if self.curve[idx] < 0.0 {
                    resulting.set(idx, 0.0);
                }
            }
        }

        let summary = DischargeSummary {
            interval: self.interval,
            stored_energy_kwh: stored,
            window_consumption_kwh: window_consumption,
            discharge_ratio,
            remaining_energy_kwh: remaining_energy,
            remaining_ratio,
            complement_factor,
            policy: self.policy,
        };
        debug!(%summary, "resulting curve generated");

        self.resulting = Some(resulting);
        self.summary = Some(summary);
        summary
    }

    /// Summary of the last generation pass, if the result is current.
    pub fn summary(&self) -> Option<DischargeSummary> {
        self.summary
    }

    /// Resulting load at a 1-based hour.
    ///
    /// # Errors
    ///
    /// - `SimError::OutOfRange` if `hour` is outside `1..=24`
    /// - `SimError::NotGenerated` if no current resulting curve exists
    pub fn power_at_hour(&self, hour: usize) -> Result<f64, SimError> {
        let idx = hour_to_index(hour)?;
        self.resulting
            .as_ref()
            .map(|curve| curve[idx])
            .ok_or(SimError::NotGenerated)
    }

    /// Returns a copy of the resulting curve.
    ///
    /// # Errors
    ///
    /// Returns `SimError::NotGenerated` if no current resulting curve exists.
    pub fn resulting_curve(&self) -> Result<Curve, SimError> {
        self.resulting.ok_or(SimError::NotGenerated)
    }

    /// Pairs raw and resulting load for every hour of the day.
    ///
    /// # Errors
    ///
    /// Returns `SimError::NotGenerated` if no current resulting curve exists.
    pub fn hour_records(&self) -> Result<Vec<HourRecord>, SimError> {
        let resulting = self.resulting_curve()?;
        Ok((0..HOURS)
            .map(|idx| HourRecord {
                hour: idx + 1,
                consumer_kw: self.curve[idx],
                resulting_kw: resulting[idx],
                in_window: self.interval.is_some_and(|iv| iv.contains(idx)),
            })
            .collect())
    }

    fn invalidate(&mut self) {
        self.resulting = None;
        self.summary = None;
    }
}
