//! Grouped frequency distributions ("variation series") for numeric samples.
//!
//! This crate turns a flat sample of observations into an interval frequency
//! table and derives summary statistics from the grouped data:
//!
//! - **Sample**: validated, finite observations parsed from text or built from values
//! - **Parameters**: sample size, range, Sturges' bin count, bin width and the
//!   rounding correction used to re-center the first bin
//! - **Binning**: a lazy, restartable sequence of contiguous bins with
//!   per-bin and cumulative counts and frequencies
//! - **Summary**: mean, population variance, corrected variance and standard deviations
//! - **Series**: all of the above computed in one pass
//!
//! # Modules
//!
//! - [`sample`]: Sample construction and text parsing
//! - [`precision`]: Decimal precision used for rounding presented values
//! - [`parameters`]: Basic parameters of the grouping (Sturges' rule)
//! - [`binning`]: Interval bins and the iterator producing them
//! - [`summary`]: Count-weighted moments of the grouped data
//! - [`series`]: The complete variation series of a sample
//!
//! # Examples
//!
//! ```
//! use varseries_stats::{sample::Sample, series::{SeriesConfig, VariationSeries}};
//!
//! let sample = Sample::parse("1 2 3 4 5").unwrap();
//! let series = VariationSeries::compute(&sample, &SeriesConfig::default()).unwrap();
//!
//! assert_eq!(series.parameters.bin_count, 4);
//! assert_eq!(series.summary.total_count, 5);
//! ```

pub mod binning;
pub mod parameters;
pub mod precision;
pub mod sample;
pub mod series;
pub mod summary;

/// Errors raised while building a variation series.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum StatsError {
    #[display("invalid input: {_0}")]
    InvalidInput(InputError),
    #[display("all {n} values are equal to {value}; bin width would be zero")]
    DegenerateRange { n: usize, value: f64 },
    #[display("corrected variance is undefined for a sample of size {n}")]
    InsufficientSample { n: usize },
    #[display("invalid {name} '{value}': {reason}")]
    InvalidConfig {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
    #[display("bins hold {actual} values but the sample has {expected}")]
    CountMismatch { expected: usize, actual: usize },
    #[display("parameters were computed for a different sample")]
    SampleMismatch,
}

/// Reasons a sample is rejected.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum InputError {
    #[display("sample is empty")]
    Empty,
    #[display("'{token}' is not a number")]
    NotANumber {
        #[error(not(source))]
        token: String,
    },
    #[display("value at position {index} is not finite ({value})")]
    NonFinite { index: usize, value: f64 },
    #[display("range from {min:e} to {max:e} is too wide to split into bins")]
    RangeOverflow { min: f64, max: f64 },
}

impl From<InputError> for StatsError {
    fn from(err: InputError) -> Self {
        Self::InvalidInput(err)
    }
}
