use std::borrow::Borrow;

use serde::Serialize;

use crate::{InputError, StatsError, binning::Bin};

/// Summary statistics of grouped data.
///
/// Every observation is represented by the midpoint of its bin, so these are
/// the grouped-data estimates of a textbook variation series rather than the
/// raw-sample moments.
///
/// The corrected (Bessel) variance is undefined for a single observation, so
/// it is exposed through fallible accessors instead of a field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Sample size.
    pub n: usize,
    /// Sum of bin counts; always equal to `n`.
    pub total_count: usize,
    /// Sum of the rounded bin frequencies; `1` up to rounding.
    pub total_frequency: f64,
    /// `Σ midpoint·count`.
    pub sum_mean_contribution: f64,
    /// `Σ midpoint²·count`.
    pub sum_square_contribution: f64,
    pub mean: f64,
    /// Population (biased) variance, never negative.
    pub population_variance: f64,
    pub population_std_dev: f64,
}

impl Summary {
    /// Aggregates a bin sequence in one pass.
    ///
    /// Fails with [`StatsError::CountMismatch`] if the bins do not account for
    /// exactly `n` observations.
    ///
    /// # Examples
    ///
    /// ```
    /// use varseries_stats::{
    ///     parameters::BasicParameters, sample::Sample, series::SeriesConfig, summary::Summary,
    /// };
    ///
    /// let sample = Sample::parse("2 4 4 4 5 5 7 9").unwrap();
    /// let config = SeriesConfig::default();
    /// let params = BasicParameters::new(&sample, &config).unwrap();
    ///
    /// let bins = params.bins(&sample, &config).unwrap();
    /// let summary = Summary::from_bins(bins, sample.len()).unwrap();
    /// assert_eq!(summary.total_count, 8);
    /// assert!(summary.corrected_variance().unwrap() >= summary.population_variance);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn from_bins<I, B>(bins: I, n: usize) -> Result<Self, StatsError>
    where
        I: IntoIterator<Item = B>,
        B: Borrow<Bin>,
    {
        if n == 0 {
            return Err(InputError::Empty.into());
        }

        let mut total_count = 0;
        let mut total_frequency = 0.0;
        let mut sum_mean_contribution = 0.0;
        let mut sum_square_contribution = 0.0;
        for bin in bins {
            let bin = bin.borrow();
            total_count += bin.count;
            total_frequency += bin.frequency;
            sum_mean_contribution += bin.mean_contribution;
            sum_square_contribution += bin.square_contribution;
        }
        if total_count != n {
            return Err(StatsError::CountMismatch {
                expected: n,
                actual: total_count,
            });
        }

        let n_f = n as f64;
        let mean = sum_mean_contribution / n_f;
        // Cancellation can leave a tiny negative residue when all midpoints coincide.
        let population_variance = (sum_square_contribution / n_f - mean * mean).max(0.0);
        let population_std_dev = population_variance.sqrt();

        tracing::debug!(
            n,
            mean,
            population_variance,
            total_frequency,
            "aggregated bins"
        );

        Ok(Self {
            n,
            total_count,
            total_frequency,
            sum_mean_contribution,
            sum_square_contribution,
            mean,
            population_variance,
            population_std_dev,
        })
    }

    /// Bessel-corrected variance, `population_variance · n / (n - 1)`.
    #[expect(clippy::cast_precision_loss)]
    pub fn corrected_variance(&self) -> Result<f64, StatsError> {
        if self.n < 2 {
            return Err(StatsError::InsufficientSample { n: self.n });
        }
        let n = self.n as f64;
        Ok(self.population_variance * n / (n - 1.0))
    }

    pub fn corrected_std_dev(&self) -> Result<f64, StatsError> {
        self.corrected_variance().map(f64::sqrt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bin(index: usize, midpoint: f64, count: usize, n: usize) -> Bin {
        #[expect(clippy::cast_precision_loss)]
        let (count_f, n_f) = (count as f64, n as f64);
        Bin {
            index,
            lower_bound: midpoint - 0.5,
            upper_bound: midpoint + 0.5,
            midpoint,
            count,
            frequency: count_f / n_f,
            cumulative_count: 0,
            cumulative_frequency: 0.0,
            mean_contribution: midpoint * count_f,
            square_contribution: midpoint * midpoint * count_f,
            is_last: false,
        }
    }

    #[test]
    fn test_known_moments() {
        // midpoints 1, 2, 3 with counts 1, 2, 1
        let bins = [bin(1, 1.0, 1, 4), bin(2, 2.0, 2, 4), bin(3, 3.0, 1, 4)];
        let summary = Summary::from_bins(&bins, 4).unwrap();
        assert_eq!(summary.total_count, 4);
        assert!((summary.total_frequency - 1.0).abs() < 1e-12);
        assert!((summary.mean - 2.0).abs() < 1e-12);
        assert!((summary.population_variance - 0.5).abs() < 1e-12);
        assert!((summary.corrected_variance().unwrap() - 2.0 / 3.0).abs() < 1e-12);
        assert!((summary.population_std_dev - 0.5f64.sqrt()).abs() < 1e-12);
        assert!((summary.corrected_std_dev().unwrap() - (2.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_single_observation() {
        let summary = Summary::from_bins([bin(1, 7.0, 1, 1)], 1).unwrap();
        assert!((summary.mean - 7.0).abs() < 1e-12);
        assert_eq!(summary.population_variance, 0.0);
        assert_eq!(
            summary.corrected_variance().unwrap_err(),
            StatsError::InsufficientSample { n: 1 }
        );
        assert!(summary.corrected_std_dev().is_err());
    }

    #[test]
    fn test_variance_clamped_to_zero() {
        // 0.1 squared does not cancel exactly against the mean squared
        let bins = [bin(1, 0.1, 3, 3)];
        let summary = Summary::from_bins(&bins, 3).unwrap();
        assert!(summary.population_variance >= 0.0);
        assert!(summary.population_std_dev.is_finite());
    }

    #[test]
    fn test_count_mismatch() {
        let bins = [bin(1, 1.0, 2, 5), bin(2, 2.0, 2, 5)];
        assert_eq!(
            Summary::from_bins(&bins, 5).unwrap_err(),
            StatsError::CountMismatch {
                expected: 5,
                actual: 4
            }
        );
    }

    #[test]
    fn test_zero_observations() {
        assert_eq!(
            Summary::from_bins(Vec::<Bin>::new(), 0).unwrap_err(),
            StatsError::InvalidInput(InputError::Empty)
        );
    }
}
