//! Basic parameters of an interval grouping.
//!
//! The number of intervals is chosen with Sturges' rule,
//! `m = 1 + 3.322 · lg(n)`, and the interval width is the sample range divided
//! by `m`. Rounding the width to a coarser precision leaves an excess or a
//! shortfall (the *rounding correction*); half of it is subtracted from the
//! sample minimum so that the intervals stay centered on the data.
//!
//! The last interval must start at or below the sample maximum. When the
//! nearest rounded width would push it past the maximum, the width is rounded
//! down instead; if even one precision unit is too wide, the intervals are
//! shifted left so that the maximum sits in the middle of the last one.

use serde::{Deserialize, Serialize};

use crate::{
    InputError, StatsError,
    binning::Bins,
    sample::{self, Sample},
    series::SeriesConfig,
};

/// Coefficient of `lg(n)` in Sturges' rule.
pub const STURGES_COEFFICIENT: f64 = 3.322;

/// How the fractional Sturges estimate is turned into a whole number of bins.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "lowercase")]
pub enum BinCountRule {
    /// Smallest integer not below the estimate.
    #[default]
    #[display("ceil")]
    Ceil,
    /// Nearest integer, halves rounded away from zero.
    #[display("round")]
    Round,
}

impl BinCountRule {
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn apply(self, exact_bin_count: f64) -> usize {
        let count = match self {
            Self::Ceil => exact_bin_count.ceil(),
            Self::Round => exact_bin_count.round(),
        };
        (count as usize).max(1)
    }
}

/// Fractional number of bins suggested by Sturges' rule for `n` observations.
///
/// ```
/// use varseries_stats::parameters::sturges;
///
/// assert_eq!(sturges(1), 1.0);
/// assert!((sturges(30) - 5.907).abs() < 1e-3);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn sturges(n: usize) -> f64 {
    1.0 + STURGES_COEFFICIENT * (n as f64).log10()
}

/// Parameters describing how a sample is split into intervals.
///
/// Computed once per sample and configuration; every field is fully
/// determined by them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicParameters {
    /// Sample size.
    pub n: usize,
    /// Largest observation.
    pub max: f64,
    /// Smallest observation.
    pub min: f64,
    /// Sturges' estimate of the number of bins.
    pub exact_bin_count: f64,
    /// Whole number of bins actually produced.
    pub bin_count: usize,
    /// `(max - min) / exact_bin_count`.
    pub exact_bin_width: f64,
    /// Width used for binning, rounded when the configuration asks for it.
    pub bin_width: f64,
    /// `|bin_width - exact_bin_width|`.
    pub rounding_correction: f64,
    /// Lower bound of the first bin, `min - rounding_correction / 2`.
    pub first_lower_bound: f64,
}

impl BasicParameters {
    /// Computes the parameters for a sample.
    ///
    /// A sample whose values are all equal has no range to split and fails
    /// with [`StatsError::DegenerateRange`], unless it holds a single value:
    /// that one gets a single bin of nominal width so its grouping stays
    /// computable.
    ///
    /// # Examples
    ///
    /// ```
    /// use varseries_stats::{parameters::BasicParameters, sample::Sample, series::SeriesConfig};
    ///
    /// let sample = Sample::new(vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    /// let params = BasicParameters::new(&sample, &SeriesConfig::default()).unwrap();
    /// assert_eq!(params.n, 5);
    /// assert_eq!(params.bin_count, 4);
    /// assert_eq!(params.bin_width, 1.2);
    /// ```
    pub fn new(sample: &Sample, config: &SeriesConfig) -> Result<Self, StatsError> {
        Self::compute(sample.len(), sample.min(), sample.max(), config)
    }

    /// Computes the parameters for raw values that have not been validated
    /// into a [`Sample`].
    pub fn from_values(values: &[f64], config: &SeriesConfig) -> Result<Self, StatsError> {
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(InputError::NonFinite { index, value }.into());
        }
        let (min, max) = sample::min_max(values).ok_or(InputError::Empty)?;
        Self::compute(values.len(), min, max, config)
    }

    #[expect(clippy::float_cmp, clippy::cast_precision_loss)]
    fn compute(n: usize, min: f64, max: f64, config: &SeriesConfig) -> Result<Self, StatsError> {
        if n == 0 {
            return Err(InputError::Empty.into());
        }
        if n > 1 && max == min {
            return Err(StatsError::DegenerateRange { n, value: max });
        }

        let exact_bin_count = sturges(n);
        let bin_count = config.bin_count_rule.apply(exact_bin_count);
        let exact_bin_width = (max - min) / exact_bin_count;
        if !exact_bin_width.is_finite() {
            return Err(InputError::RangeOverflow { min, max }.into());
        }

        let mut params = Self {
            n,
            max,
            min,
            exact_bin_count,
            bin_count,
            exact_bin_width,
            bin_width: exact_bin_width,
            rounding_correction: 0.0,
            first_lower_bound: min,
        };
        if config.round_bin_width {
            let precision = config.precision;
            params.set_width(precision.round(exact_bin_width).max(precision.unit()));
            if !params.last_bin_reaches_max() {
                let floored = precision.floor(exact_bin_width);
                if floored >= precision.unit() {
                    params.set_width(floored);
                }
            }
        }
        if !params.last_bin_reaches_max() {
            // width was raised to one precision unit; center the maximum in the last bin
            params.first_lower_bound = max - (bin_count as f64 - 0.5) * params.bin_width;
        }
        if !params.first_lower_bound.is_finite() || !params.bound(bin_count).is_finite() {
            return Err(InputError::RangeOverflow { min, max }.into());
        }

        tracing::debug!(
            n,
            bin_count,
            bin_width = params.bin_width,
            rounding_correction = params.rounding_correction,
            first_lower_bound = params.first_lower_bound,
            "computed basic parameters"
        );
        Ok(params)
    }

    fn set_width(&mut self, bin_width: f64) {
        self.bin_width = bin_width;
        self.rounding_correction = (bin_width - self.exact_bin_width).abs();
        self.first_lower_bound = self.min - self.rounding_correction / 2.0;
    }

    fn last_bin_reaches_max(&self) -> bool {
        self.bound(self.bin_count - 1) <= self.max
    }

    /// Whether the first bin starts half the rounding correction below the
    /// minimum, as opposed to being shifted left to fit the maximum.
    #[must_use]
    pub fn is_centered(&self) -> bool {
        let centered = self.min - self.rounding_correction / 2.0;
        (self.first_lower_bound - centered).abs() <= f64::EPSILON * centered.abs().max(1.0)
    }

    /// `max - min`.
    #[must_use]
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Lower bound of the bin at the 0-based position `offset`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn bound(&self, offset: usize) -> f64 {
        self.first_lower_bound + offset as f64 * self.bin_width
    }

    /// Upper bound of the last bin.
    ///
    /// Never below the sample maximum, so the maximum is always covered even
    /// when rounding narrowed the bin width or the bin count was rounded down.
    /// The lower bound of the last bin never exceeds the maximum either, so the
    /// maximum is always counted there and nowhere else.
    #[must_use]
    pub fn last_upper_bound(&self) -> f64 {
        self.bound(self.bin_count).max(self.max)
    }

    /// Starts a fresh pass over the bins of `sample`.
    ///
    /// Fails with [`StatsError::SampleMismatch`] unless `sample` has the size
    /// and range these parameters were computed from.
    #[expect(clippy::float_cmp)]
    pub fn bins<'a>(
        &'a self,
        sample: &'a Sample,
        config: &SeriesConfig,
    ) -> Result<Bins<'a>, StatsError> {
        if sample.len() != self.n || sample.min() != self.min || sample.max() != self.max {
            return Err(StatsError::SampleMismatch);
        }
        Ok(Bins::new(self, sample.values(), config.precision))
    }
}
