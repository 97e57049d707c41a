use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::StatsError;

/// Number of decimal places used when rounding presented values.
///
/// Rounding is half away from zero, so `2.345` at two places becomes `2.35`
/// and `-0.5` at zero places becomes `-1`.
///
/// # Examples
///
/// ```
/// use varseries_stats::precision::Precision;
///
/// let precision: Precision = "1".parse().unwrap();
/// assert_eq!(precision.round(1.25), 1.3);
/// assert_eq!(precision.unit(), 0.1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Precision(u32);

impl Precision {
    /// The largest supported number of decimal places.
    ///
    /// `f64` carries 15-17 significant digits, so finer rounding stops being meaningful
    /// for values above one.
    pub const MAX: u32 = 12;

    /// Creates a precision of `digits` decimal places.
    pub fn new(digits: u32) -> Result<Self, StatsError> {
        if digits > Self::MAX {
            return Err(StatsError::InvalidConfig {
                name: "rounding precision",
                value: digits.to_string(),
                reason: "too many decimal places",
            });
        }
        Ok(Self(digits))
    }

    #[must_use]
    pub const fn digits(self) -> u32 {
        self.0
    }

    #[expect(clippy::cast_possible_wrap)]
    fn scale(self) -> f64 {
        10f64.powi(self.digits() as i32)
    }

    /// The smallest positive step representable at this precision (`10^-digits`).
    #[must_use]
    pub fn unit(self) -> f64 {
        self.scale().recip()
    }

    /// Rounds `value` to this many decimal places, half away from zero.
    ///
    /// Values too large to scale carry no fractional digits and are returned
    /// unchanged.
    #[must_use]
    pub fn round(self, value: f64) -> f64 {
        self.apply(value, f64::round)
    }

    /// Rounds `value` toward negative infinity at this many decimal places.
    #[must_use]
    pub fn floor(self, value: f64) -> f64 {
        self.apply(value, f64::floor)
    }

    fn apply(self, value: f64, op: fn(f64) -> f64) -> f64 {
        let scale = self.scale();
        let scaled = value * scale;
        if scaled.is_finite() {
            op(scaled) / scale
        } else {
            value
        }
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self(2)
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Precision {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .trim()
            .parse::<u32>()
            .map_err(|_| StatsError::InvalidConfig {
                name: "rounding precision",
                value: s.to_owned(),
                reason: "expected a non-negative integer",
            })?;
        Self::new(digits)
    }
}

impl TryFrom<u32> for Precision {
    type Error = StatsError;

    fn try_from(digits: u32) -> Result<Self, Self::Error> {
        Self::new(digits)
    }
}

impl From<Precision> for u32 {
    fn from(precision: Precision) -> Self {
        precision.0
    }
}
