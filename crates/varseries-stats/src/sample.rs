//! Sample construction and parsing.
//!
//! A [`Sample`] is a non-empty sequence of finite observations. It is built
//! either from values directly or by parsing free-form text in which a comma
//! may stand in for the decimal point (`"4,6"` reads as `4.6`).

use serde::Serialize;

use crate::{InputError, StatsError};

/// A non-empty, finite sample of observations.
///
/// The minimum and maximum are computed once on construction.
///
/// # Examples
///
/// ```
/// use varseries_stats::sample::Sample;
///
/// let sample = Sample::parse("4,6 4 4.1").unwrap();
/// assert_eq!(sample.values(), &[4.6, 4.0, 4.1]);
/// assert_eq!(sample.min(), 4.0);
/// assert_eq!(sample.max(), 4.6);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    values: Vec<f64>,
    #[serde(skip)]
    min: f64,
    #[serde(skip)]
    max: f64,
}

impl Sample {
    /// Creates a sample, rejecting empty input and non-finite values.
    pub fn new(values: Vec<f64>) -> Result<Self, StatsError> {
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(InputError::NonFinite { index, value }.into());
        }
        let (min, max) = min_max(&values).ok_or(InputError::Empty)?;
        Ok(Self { values, min, max })
    }

    /// Parses a sample from text.
    ///
    /// Values are separated by whitespace or `;`. Each value may use either a
    /// dot or a comma as its decimal separator.
    pub fn parse(text: &str) -> Result<Self, StatsError> {
        let values = text
            .split(|c: char| c.is_whitespace() || c == ';')
            .filter(|token| !token.is_empty())
            .map(parse_value)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(values)
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; kept for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }
}

impl TryFrom<Vec<f64>> for Sample {
    type Error = StatsError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

fn parse_value(token: &str) -> Result<f64, InputError> {
    let normalized = token.replace(',', ".");
    normalized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| InputError::NotANumber {
            token: token.to_owned(),
        })
}

pub(crate) fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(min, max), &v| (min.min(v), max.max(v))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_separators() {
        let sample = Sample::parse("4,6 4 4.1\n27;28,3").unwrap();
        assert_eq!(sample.values(), &[4.6, 4.0, 4.1, 27.0, 28.3]);
        assert_eq!(sample.len(), 5);
        assert_eq!(sample.min(), 4.0);
        assert_eq!(sample.max(), 28.3);
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(
            Sample::parse("  \n ").unwrap_err(),
            StatsError::InvalidInput(InputError::Empty)
        );
    }

    #[test]
    fn test_parse_not_a_number() {
        let err = Sample::parse("1 2 abc 4").unwrap_err();
        assert_eq!(
            err,
            StatsError::InvalidInput(InputError::NotANumber {
                token: "abc".to_owned()
            })
        );
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_parse_rejects_infinity_and_nan() {
        assert!(Sample::parse("1 inf").is_err());
        assert!(Sample::parse("NaN").is_err());
    }

    #[test]
    fn test_new_rejects_non_finite() {
        let err = Sample::new(vec![1.0, f64::NAN]).unwrap_err();
        assert!(matches!(
            err,
            StatsError::InvalidInput(InputError::NonFinite { index: 1, .. })
        ));
    }

    #[test]
    fn test_single_value() {
        let sample = Sample::new(vec![7.0]).unwrap();
        assert_eq!(sample.min(), 7.0);
        assert_eq!(sample.max(), 7.0);
        assert!(!sample.is_empty());
    }
}
