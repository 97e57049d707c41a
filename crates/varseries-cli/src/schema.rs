use serde::Serialize;
use varseries_stats::{
    binning::Bin,
    parameters::BasicParameters,
    series::{SeriesConfig, VariationSeries},
};

/// JSON document written by `analyze --format json`
///
/// Corrected variance and standard deviation are `null` when they are
/// undefined (a single observation).
#[derive(Debug, Clone, Serialize)]
pub struct SeriesReport<'a> {
    pub config: &'a SeriesConfig,
    pub parameters: &'a BasicParameters,
    pub bins: &'a [Bin],
    pub summary: SummaryReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub n: usize,
    pub total_count: usize,
    pub total_frequency: f64,
    pub mean: f64,
    pub population_variance: f64,
    pub population_std_dev: f64,
    pub corrected_variance: Option<f64>,
    pub corrected_std_dev: Option<f64>,
}

impl<'a> From<&'a VariationSeries> for SeriesReport<'a> {
    fn from(series: &'a VariationSeries) -> Self {
        let summary = &series.summary;
        Self {
            config: &series.config,
            parameters: &series.parameters,
            bins: &series.bins,
            summary: SummaryReport {
                n: summary.n,
                total_count: summary.total_count,
                total_frequency: summary.total_frequency,
                mean: summary.mean,
                population_variance: summary.population_variance,
                population_std_dev: summary.population_std_dev,
                corrected_variance: summary.corrected_variance().ok(),
                corrected_std_dev: summary.corrected_std_dev().ok(),
            },
        }
    }
}
