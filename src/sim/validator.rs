//! Discharge-window validation against the raw curve.

use tracing::debug;

use super::curve::Curve;
use super::interval::CircularInterval;
use super::types::SimError;

/// Validates a candidate discharge window given as 1-based inclusive hours.
///
/// The window is iterated circularly over the raw curve; any generation sample
/// inside it rejects the window. `start_hour > end_hour` crosses midnight and
/// `start_hour == end_hour` denotes a single hour. No state is touched: the
/// caller commits the returned interval only on success.
///
/// # Arguments
///
/// * `curve` - Raw net load curve
/// * `start_hour` - First hour of the window (`1..=24`)
/// * `end_hour` - Last hour of the window (`1..=24`)
///
/// # Errors
///
/// - `SimError::OutOfRange` if either hour is outside `1..=24`
/// - `SimError::GenerationConflict` if the window contains a sample `< 0`
pub fn validate_discharge_window(
    curve: &Curve,
    start_hour: usize,
    end_hour: usize,
) -> Result<CircularInterval, SimError> {
    let interval = CircularInterval::from_hours(start_hour, end_hour)?;

    if let Some(idx) = interval.iter().find(|&idx| curve[idx] < 0.0) {
        debug!(start_hour, end_hour, hour = idx + 1, "window overlaps generation");
        return Err(SimError::GenerationConflict {
            start_hour,
            end_hour,
            hour: idx + 1,
            kw: curve[idx],
        });
    }

    Ok(interval)
}
