//! Inclusive, wrap-around hour ranges over the 24-slot daily ring.

use std::fmt;

use serde::Serialize;

use super::curve::{Curve, HOURS, hour_to_index};
use super::types::SimError;

/// An inclusive range on the 24-hour ring that may cross midnight.
///
/// Stored as a start index plus a length so that both a full day (24 slots)
/// and an empty range (0 slots, only produced by [`CircularInterval::complement`])
/// are representable.
///
/// # Examples
///
/// ```
/// use bess_sim::sim::interval::CircularInterval;
///
/// // 23:00 through 02:00 crosses midnight
/// let window = CircularInterval::from_hours(23, 2).unwrap();
/// assert_eq!(window.iter().collect::<Vec<_>>(), vec![22, 23, 0, 1]);
/// assert_eq!(window.complement().len(), 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CircularInterval {
    start: usize,
    len: usize,
}

impl CircularInterval {
    /// Creates an interval from 0-based inclusive bounds.
    ///
    /// `start > end` wraps past index 23 back to 0. `start == end` is a single slot.
    ///
    /// # Panics
    ///
    /// Panics if either index is `>= 24`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(start < HOURS && end < HOURS, "interval bounds must be < {HOURS}");
        Self {
            start,
            len: (end + HOURS - start) % HOURS + 1,
        }
    }

    /// Creates an interval from 1-based inclusive hours.
    ///
    /// # Errors
    ///
    /// Returns `SimError::OutOfRange` if either hour is outside `1..=24`.
    pub fn from_hours(start_hour: usize, end_hour: usize) -> Result<Self, SimError> {
        let start = hour_to_index(start_hour)?;
        let end = hour_to_index(end_hour)?;
        Ok(Self::new(start, end))
    }

    /// First index of the interval.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Last index of the interval, or `None` for an empty interval.
    pub fn end(&self) -> Option<usize> {
        (self.len > 0).then(|| (self.start + self.len - 1) % HOURS)
    }

    /// First hour (1-based).
    pub fn start_hour(&self) -> usize {
        self.start + 1
    }

    /// Last hour (1-based), or `None` for an empty interval.
    pub fn end_hour(&self) -> Option<usize> {
        self.end().map(|idx| idx + 1)
    }

    /// Number of slots covered.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` when the interval covers every hour of the day.
    pub fn is_full_day(&self) -> bool {
        self.len == HOURS
    }

    /// Returns `true` when the interval crosses midnight.
    pub fn wraps(&self) -> bool {
        self.start + self.len > HOURS
    }

    /// Returns `true` if `idx` lies inside the interval.
    pub fn contains(&self, idx: usize) -> bool {
        idx < HOURS && (idx + HOURS - self.start) % HOURS < self.len
    }

    /// Iterates the covered indices in circular order starting at `start`.
    pub fn iter(&self) -> impl Iterator<Item = usize> + use<> {
        let start = self.start;
        (0..self.len).map(move |offset| (start + offset) % HOURS)
    }

    /// Calls `visit` with every sample inside the interval, in circular order.
    pub fn visit(&self, curve: &Curve, mut visit: impl FnMut(f64)) {
        for idx in self.iter() {
            visit(curve[idx]);
        }
    }

    /// Sums the samples inside the interval. An empty interval sums to `0.0`.
    pub fn sum(&self, curve: &Curve) -> f64 {
        let mut total = 0.0;
        self.visit(curve, |v| total += v);
        total
    }

    /// Writes `f(input[i])` into `output[i]` for every index inside the interval.
    ///
    /// Indices outside the interval are left untouched.
    pub fn map_into(&self, input: &Curve, output: &mut Curve, f: impl Fn(f64) -> f64) {
        for idx in self.iter() {
            output.set(idx, f(input[idx]));
        }
    }

    /// Returns the range covering every index not in `self`.
    ///
    /// Bounds are `(end + 1) mod 24` through `(start - 1) mod 24`. The complement
    /// of a full-day interval is empty and visits no samples.
    pub fn complement(&self) -> Self {
        Self {
            start: (self.start + self.len) % HOURS,
            len: HOURS - self.len,
        }
    }
}

impl fmt::Display for CircularInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end_hour() {
            Some(end_hour) => write!(f, "{}-{} ({}h)", self.start_hour(), end_hour, self.len),
            None => write!(f, "empty"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Curve {
        let mut samples = [0.0; HOURS];
        for (i, s) in samples.iter_mut().enumerate() {
            *s = i as f64;
        }
        Curve::new(samples).expect("finite ramp")
    }

    #[test]
    fn forward_interval_iterates_in_order() {
        let iv = CircularInterval::new(3, 6);
        assert_eq!(iv.iter().collect::<Vec<_>>(), vec![3, 4, 5, 6]);
        assert_eq!(iv.len(), 4);
        assert!(!iv.wraps());
    }

    #[test]
    fn wrapping_interval_visits_tail_then_head() {
        let iv = CircularInterval::new(22, 1);
        assert_eq!(iv.iter().collect::<Vec<_>>(), vec![22, 23, 0, 1]);
        assert!(iv.wraps());
        assert_eq!(iv.end(), Some(1));
    }

    #[test]
    fn single_slot_interval() {
        let iv = CircularInterval::new(7, 7);
        assert_eq!(iv.len(), 1);
        assert!(iv.contains(7));
        assert!(!iv.contains(8));
    }

    #[test]
    fn contains_matches_iteration() {
        let iv = CircularInterval::new(20, 3);
        for idx in 0..HOURS {
            assert_eq!(iv.contains(idx), iv.iter().any(|i| i == idx), "index {idx}");
        }
        assert!(!iv.contains(HOURS));
    }

    #[test]
    fn complement_bounds_follow_modular_rule() {
        let iv = CircularInterval::new(10, 12);
        let c = iv.complement();
        assert_eq!(c.start(), 13);
        assert_eq!(c.end(), Some(9));
        assert_eq!(c.len(), 21);

        let wrap = CircularInterval::new(22, 1).complement();
        assert_eq!(wrap.start(), 2);
        assert_eq!(wrap.end(), Some(21));

        let from_zero = CircularInterval::new(0, 0).complement();
        assert_eq!(from_zero.start(), 1);
        assert_eq!(from_zero.end(), Some(23));
    }

    #[test]
    fn interval_and_complement_partition_the_day() {
        for start in 0..HOURS {
            for end in 0..HOURS {
                let iv = CircularInterval::new(start, end);
                let c = iv.complement();
                for idx in 0..HOURS {
                    assert_ne!(iv.contains(idx), c.contains(idx), "{start}..{end} @ {idx}");
                }
                assert_eq!(iv.len() + c.len(), HOURS);
            }
        }
    }

    #[test]
    fn full_day_complement_is_empty() {
        let full = CircularInterval::new(5, 4);
        assert!(full.is_full_day());
        let c = full.complement();
        assert!(c.is_empty());
        assert_eq!(c.iter().count(), 0);
        assert_eq!(c.sum(&ramp()), 0.0);
        assert_eq!(c.end(), None);
        assert_eq!(c.to_string(), "empty");
        assert_eq!(c.complement().len(), HOURS);
    }

    #[test]
    fn sum_and_visit_read_only_interval_samples() {
        let curve = ramp();
        let iv = CircularInterval::new(23, 1);
        assert_eq!(iv.sum(&curve), 23.0 + 0.0 + 1.0);

        let mut seen = Vec::new();
        iv.visit(&curve, |v| seen.push(v));
        assert_eq!(seen, vec![23.0, 0.0, 1.0]);
    }

    #[test]
    fn map_into_only_overwrites_interval() {
        let input = ramp();
        let mut output = Curve::filled(-1.0).expect("finite");
        CircularInterval::new(22, 0).map_into(&input, &mut output, |v| v * 2.0);
        assert_eq!(output[22], 44.0);
        assert_eq!(output[23], 46.0);
        assert_eq!(output[0], 0.0);
        assert_eq!(output[1], -1.0);
        assert_eq!(output[21], -1.0);
    }

    #[test]
    fn from_hours_rejects_out_of_range() {
        assert!(CircularInterval::from_hours(0, 3).is_err());
        assert!(CircularInterval::from_hours(3, 25).is_err());
        let iv = CircularInterval::from_hours(24, 1).expect("valid hours");
        assert_eq!(iv.iter().collect::<Vec<_>>(), vec![23, 0]);
    }

    #[test]
    fn display_uses_one_based_hours() {
        let iv = CircularInterval::from_hours(23, 2).expect("valid hours");
        assert_eq!(iv.to_string(), "23-2 (4h)");
    }
}
