//! Rules for how leftover stored energy affects hours outside the discharge window.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Complement-interval policy applied after the in-window discharge.
///
/// Every variant receives the *remaining ratio*: the share of stored energy the
/// window could not absorb (`0.0` when the window absorbed all of it).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplementPolicy {
    /// Scale the rest of the day by `1 - remaining_ratio`.
    ///
    /// A window that absorbs all stored energy leaves the other hours as they
    /// were; leftover energy lowers them proportionally.
    #[default]
    Attenuate,
    /// Scale the rest of the day by `remaining_ratio`.
    ///
    /// A window that absorbs all stored energy zeroes every other hour.
    Collapse,
    /// Leave the rest of the day at its raw values.
    Untouched,
}

impl ComplementPolicy {
    /// All policies, in declaration order.
    pub const ALL: [Self; 3] = [Self::Attenuate, Self::Collapse, Self::Untouched];

    /// Multiplier applied to every complement sample.
    pub fn factor(self, remaining_ratio: f64) -> f64 {
        match self {
            Self::Attenuate => 1.0 - remaining_ratio,
            Self::Collapse => remaining_ratio,
            Self::Untouched => 1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Attenuate => "attenuate",
            Self::Collapse => "collapse",
            Self::Untouched => "untouched",
        }
    }
}

impl fmt::Display for ComplementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplementPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "attenuate" => Ok(Self::Attenuate),
            "collapse" => Ok(Self::Collapse),
            "untouched" => Ok(Self::Untouched),
            _ => Err(format!(
                "unknown complement policy \"{s}\", expected attenuate, collapse, or untouched"
            )),
        }
    }
}
