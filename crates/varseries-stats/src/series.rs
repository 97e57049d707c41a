use serde::{Deserialize, Serialize};

use crate::{
    StatsError,
    binning::Bin,
    parameters::{BasicParameters, BinCountRule},
    precision::Precision,
    sample::Sample,
    summary::Summary,
};

/// Configuration of a single variation series computation.
///
/// Passed explicitly to every computation; nothing is kept between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesConfig {
    /// Decimal places for the bin width and the presented frequencies.
    pub precision: Precision,
    /// Round the bin width to `precision` and re-center the first bin by
    /// half of the resulting correction.
    pub round_bin_width: bool,
    /// How Sturges' estimate becomes a whole number of bins.
    pub bin_count_rule: BinCountRule,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            precision: Precision::default(),
            round_bin_width: true,
            bin_count_rule: BinCountRule::default(),
        }
    }
}

/// The complete variation series of a sample.
///
/// # Examples
///
/// ```
/// use varseries_stats::{sample::Sample, series::{SeriesConfig, VariationSeries}};
///
/// let sample = Sample::parse("27,3 27,7 26,4 28 26,2 27,9 28,3 28,7").unwrap();
/// let series = VariationSeries::compute(&sample, &SeriesConfig::default()).unwrap();
///
/// assert_eq!(series.bins.len(), series.parameters.bin_count);
/// assert_eq!(series.summary.total_count, sample.len());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariationSeries {
    pub config: SeriesConfig,
    pub parameters: BasicParameters,
    pub bins: Vec<Bin>,
    pub summary: Summary,
}

impl VariationSeries {
    /// Computes parameters, bins and summary for `sample`.
    pub fn compute(sample: &Sample, config: &SeriesConfig) -> Result<Self, StatsError> {
        let parameters = BasicParameters::new(sample, config)?;
        let bins = parameters.bins(sample, config)?.collect::<Vec<_>>();
        let summary = Summary::from_bins(&bins, parameters.n)?;
        Ok(Self {
            config: *config,
            parameters,
            bins,
            summary,
        })
    }

    #[must_use]
    pub fn precision(&self) -> Precision {
        self.config.precision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(precision: u32) -> SeriesConfig {
        SeriesConfig {
            precision: Precision::new(precision).unwrap(),
            ..SeriesConfig::default()
        }
    }

    #[test]
    fn test_five_values() {
        let sample = Sample::new(vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let series = VariationSeries::compute(&sample, &config(2)).unwrap();
        let params = &series.parameters;
        assert_eq!((params.n, params.min, params.max), (5, 1.0, 5.0));
        assert!((params.exact_bin_count - 3.32).abs() < 0.01);
        assert_eq!(params.bin_count, 4);
        assert_eq!(series.bins.len(), 4);
        assert!(series.bins[0].lower_bound <= 1.0);
        assert!(series.bins[3].upper_bound >= 5.0);
        assert_eq!(series.summary.total_count, 5);
    }

    #[test]
    fn test_degenerate_range() {
        let sample = Sample::new(vec![5.0; 4]).unwrap();
        assert!(matches!(
            VariationSeries::compute(&sample, &config(2)),
            Err(StatsError::DegenerateRange { .. })
        ));
    }

    #[test]
    fn test_single_value() {
        let sample = Sample::new(vec![7.0]).unwrap();
        let series = VariationSeries::compute(&sample, &config(2)).unwrap();
        assert_eq!(series.parameters.bin_count, 1);
        assert!((series.summary.mean - 7.0).abs() < 1e-9);
        assert_eq!(series.summary.population_variance, 0.0);
        assert_eq!(
            series.summary.corrected_variance().unwrap_err(),
            StatsError::InsufficientSample { n: 1 }
        );
    }

    #[test]
    fn test_precision_change_keeps_counts() {
        let sample = Sample::new(vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let fine = VariationSeries::compute(&sample, &config(2)).unwrap();
        let coarse = VariationSeries::compute(&sample, &config(0)).unwrap();
        assert_ne!(fine.parameters.bin_width, coarse.parameters.bin_width);
        assert_ne!(
            fine.parameters.rounding_correction,
            coarse.parameters.rounding_correction
        );
        assert_eq!(fine.summary.total_count, 5);
        assert_eq!(coarse.summary.total_count, 5);
    }

    #[test]
    fn test_total_frequency_exact_for_even_split() {
        // 20 observations: every frequency is a multiple of 0.05
        let values = (0..20).map(f64::from).collect::<Vec<_>>();
        let sample = Sample::new(values).unwrap();
        let series = VariationSeries::compute(&sample, &config(2)).unwrap();
        assert!((series.summary.total_frequency - 1.0).abs() <= 0.01);
        assert_eq!(series.bins.last().unwrap().cumulative_frequency, 1.0);
    }

    #[test]
    fn test_deterministic() {
        let sample = Sample::parse("3,1 4,1 5,9 2,6 5,3 5,8 9,7 9,3 2,3 8,4").unwrap();
        let a = VariationSeries::compute(&sample, &config(1)).unwrap();
        let b = VariationSeries::compute(&sample, &config(1)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_serializes_to_json() {
        let sample = Sample::new(vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let series = VariationSeries::compute(&sample, &config(2)).unwrap();
        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(json["parameters"]["bin_count"], 4);
        assert_eq!(json["bins"].as_array().unwrap().len(), 4);
        assert_eq!(json["config"]["bin_count_rule"], "ceil");
        assert_eq!(json["config"]["precision"], 2);
    }
}
