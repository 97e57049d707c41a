//! Interval bins of a variation series.
//!
//! [`Bins`] walks exactly `bin_count` contiguous windows of width `bin_width`
//! starting at the first lower bound. Every window is half-open,
//! `[lower, upper)`, except the last one, which is closed so that the sample
//! maximum is always counted.
//!
//! Cumulative counts and frequencies are accumulated while iterating, so the
//! bins must be consumed in order. Asking [`BasicParameters::bins`] again
//! starts a new pass.
//!
//! # Examples
//!
//! ```
//! use varseries_stats::{parameters::BasicParameters, sample::Sample, series::SeriesConfig};
//!
//! let sample = Sample::parse("1 2 3 4 5").unwrap();
//! let config = SeriesConfig::default();
//! let params = BasicParameters::new(&sample, &config).unwrap();
//!
//! let bins = params.bins(&sample, &config).unwrap();
//! let counts: Vec<_> = bins.map(|bin| bin.count).collect();
//! assert_eq!(counts, [2, 1, 1, 1]);
//! ```

use std::iter::FusedIterator;

use serde::Serialize;

use crate::{parameters::BasicParameters, precision::Precision};

/// A single interval of a variation series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bin {
    /// 1-based position of the interval.
    pub index: usize,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub midpoint: f64,
    /// Number of observations inside the interval.
    pub count: usize,
    /// `count / n`, rounded to the configured precision.
    pub frequency: f64,
    /// Observations in this and all preceding intervals.
    pub cumulative_count: usize,
    /// `cumulative_count / n`, rounded to the configured precision.
    pub cumulative_frequency: f64,
    /// `midpoint * count`.
    pub mean_contribution: f64,
    /// `midpoint² * count`.
    pub square_contribution: f64,
    /// Whether this is the final interval, closed on its upper end.
    pub is_last: bool,
}

impl Bin {
    /// Returns `true` if `value` falls inside this interval.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        contains(self.lower_bound, self.upper_bound, self.is_last, value)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }
}

fn contains(lower: f64, upper: f64, closed: bool, value: f64) -> bool {
    lower <= value && (value < upper || (closed && value <= upper))
}

/// Iterator over the bins of a sample.
///
/// Yields exactly [`BasicParameters::bin_count`] bins in ascending order.
/// Termination depends only on that count, never on comparing accumulated
/// bounds against the sample maximum.
#[derive(Debug, Clone)]
pub struct Bins<'a> {
    params: &'a BasicParameters,
    values: &'a [f64],
    precision: Precision,
    offset: usize,
    cumulative_count: usize,
}

impl<'a> Bins<'a> {
    pub(crate) fn new(params: &'a BasicParameters, values: &'a [f64], precision: Precision) -> Self {
        Self {
            params,
            values,
            precision,
            offset: 0,
            cumulative_count: 0,
        }
    }

    #[expect(clippy::cast_precision_loss)]
    fn relative(&self, count: usize) -> f64 {
        self.precision.round(count as f64 / self.params.n as f64)
    }
}

impl Iterator for Bins<'_> {
    type Item = Bin;

    #[expect(clippy::cast_precision_loss)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.params.bin_count {
            return None;
        }
        let offset = self.offset;
        self.offset += 1;

        let is_last = self.offset == self.params.bin_count;
        let lower_bound = self.params.bound(offset);
        let upper_bound = if is_last {
            self.params.last_upper_bound()
        } else {
            self.params.bound(offset + 1)
        };
        let midpoint = (lower_bound + upper_bound) / 2.0;

        let count = self
            .values
            .iter()
            .filter(|&&v| contains(lower_bound, upper_bound, is_last, v))
            .count();
        self.cumulative_count += count;

        Some(Bin {
            index: offset + 1,
            lower_bound,
            upper_bound,
            midpoint,
            count,
            frequency: self.relative(count),
            cumulative_count: self.cumulative_count,
            cumulative_frequency: self.relative(self.cumulative_count),
            mean_contribution: midpoint * count as f64,
            square_contribution: midpoint * midpoint * count as f64,
            is_last,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.params.bin_count - self.offset;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Bins<'_> {}

impl FusedIterator for Bins<'_> {}
