//! Text rendering of a variation series
//!
//! Each view wraps a computed [`VariationSeries`] and implements
//! [`fmt::Display`], so it can be printed, written to a file or embedded in
//! a longer walk-through.

use std::fmt;

use varseries_stats::{binning::Bin, precision::Precision, series::VariationSeries};

/// Extra decimal places for values that the bin-width rounding shifts by less
/// than one unit of the configured precision (bounds, midpoints, correction).
const DETAIL_DIGITS: u32 = 2;

pub(crate) fn detail(precision: Precision) -> Precision {
    Precision::new((precision.digits() + DETAIL_DIGITS).min(Precision::MAX)).unwrap_or(precision)
}

/// The basic parameters block, one derivation per line
#[derive(Debug, Clone, Copy)]
pub struct ParametersView<'a>(pub &'a VariationSeries);

impl fmt::Display for ParametersView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let series = self.0;
        let p = series.precision();
        let d = detail(p);
        let params = &series.parameters;
        let m = d.round(params.exact_bin_count);

        writeln!(f, "n = {}", params.n)?;
        writeln!(f, "max = {}", params.max)?;
        writeln!(f, "min = {}", params.min)?;
        writeln!(f, "m = 1 + 3.322 * lg({}) = {m}", params.n)?;
        writeln!(f, "~m = {} ({})", params.bin_count, series.config.bin_count_rule)?;
        if series.config.round_bin_width {
            let correction = d.round(params.rounding_correction);
            writeln!(
                f,
                "k = ({} - {}) / {m} = {} ≈ {}",
                params.max,
                params.min,
                d.round(params.exact_bin_width),
                p.round(params.bin_width),
            )?;
            writeln!(
                f,
                "overkill = |{} - {}| ≈ {correction}",
                p.round(params.bin_width),
                d.round(params.exact_bin_width),
            )?;
            if params.is_centered() {
                write!(
                    f,
                    "x1 = {} - ({correction} / 2) = {}",
                    params.min,
                    d.round(params.first_lower_bound),
                )
            } else {
                write_shifted_start(f, series, d)
            }
        } else {
            writeln!(
                f,
                "k = ({} - {}) / {m} = {}",
                params.max,
                params.min,
                d.round(params.bin_width),
            )?;
            if params.is_centered() {
                write!(f, "x1 = min = {}", params.min)
            } else {
                write_shifted_start(f, series, d)
            }
        }
    }
}

fn write_shifted_start(
    f: &mut fmt::Formatter<'_>,
    series: &VariationSeries,
    detail: Precision,
) -> fmt::Result {
    let params = &series.parameters;
    write!(
        f,
        "x1 = {} - ({} - 0.5) * {} = {}",
        params.max,
        params.bin_count,
        series.precision().round(params.bin_width),
        detail.round(params.first_lower_bound),
    )
}

/// The interval frequency table with a closing `Σ` row
#[derive(Debug, Clone, Copy)]
pub struct BinTable<'a>(pub &'a VariationSeries);

impl BinTable<'_> {
    fn separator(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // I(4) + interval(26) + x(12) + n(6) + xn(14) + x2n(16) + w(8) + ncum(9) + wcum(9) + spaces(8)
        writeln!(f, "  {}", "-".repeat(112))
    }
}

fn interval_label(bin: &Bin, d: Precision) -> String {
    let close = if bin.is_last { ']' } else { ')' };
    format!(
        "[{}; {}{close}",
        d.round(bin.lower_bound),
        d.round(bin.upper_bound)
    )
}

impl fmt::Display for BinTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let series = self.0;
        let p = series.precision();
        let d = detail(p);
        let summary = &series.summary;

        writeln!(
            f,
            "  {:>4} {:<26} {:>12} {:>6} {:>14} {:>16} {:>8} {:>9} {:>9}",
            "I", "Interval", "x_i", "n_i", "x_i*n_i", "x_i^2*n_i", "w_i", "n_i(cum)", "w_i(cum)",
        )?;
        Self::separator(f)?;
        for bin in &series.bins {
            writeln!(
                f,
                "  {:>4} {:<26} {:>12} {:>6} {:>14} {:>16} {:>8} {:>9} {:>9}",
                bin.index,
                interval_label(bin, d),
                d.round(bin.midpoint),
                bin.count,
                d.round(bin.mean_contribution),
                d.round(bin.square_contribution),
                bin.frequency,
                bin.cumulative_count,
                bin.cumulative_frequency,
            )?;
        }
        Self::separator(f)?;
        write!(
            f,
            "  {:>4} {:<26} {:>12} {:>6} {:>14} {:>16} {:>8} {:>9} {:>9}",
            "",
            "Σ",
            "",
            summary.total_count,
            d.round(summary.sum_mean_contribution),
            d.round(summary.sum_square_contribution),
            p.round(summary.total_frequency),
            "-",
            "-",
        )
    }
}

/// Mean, variances and standard deviations
#[derive(Debug, Clone, Copy)]
pub struct SummaryView<'a>(pub &'a VariationSeries);

impl fmt::Display for SummaryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let series = self.0;
        let d = detail(series.precision());
        let summary = &series.summary;

        writeln!(
            f,
            "mean = Σ x_i*n_i / n = {} / {} = {}",
            d.round(summary.sum_mean_contribution),
            summary.n,
            d.round(summary.mean),
        )?;
        writeln!(
            f,
            "D = Σ x_i^2*n_i / n - mean^2 = {}",
            d.round(summary.population_variance),
        )?;
        writeln!(f, "σ = sqrt(D) = {}", d.round(summary.population_std_dev))?;
        match (summary.corrected_variance(), summary.corrected_std_dev()) {
            (Ok(variance), Ok(std_dev)) => {
                writeln!(f, "S^2 = D * n / (n - 1) = {}", d.round(variance))?;
                write!(f, "S = sqrt(S^2) = {}", d.round(std_dev))
            }
            (Err(err), _) | (_, Err(err)) => write!(f, "S^2, S: {err}"),
        }
    }
}

/// Horizontal bar chart of bin counts
#[derive(Debug, Clone, Copy)]
pub struct FrequencyChart<'a>(pub &'a VariationSeries);

impl FrequencyChart<'_> {
    const MAX_BAR_WIDTH: usize = 50;
}

impl fmt::Display for FrequencyChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let series = self.0;
        let max_count = series
            .bins
            .iter()
            .map(|bin| bin.count)
            .max()
            .unwrap_or(1)
            .max(1);
        for (i, bin) in series.bins.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let bar_width = (bin.count * Self::MAX_BAR_WIDTH) / max_count;
            write!(
                f,
                "{:>4} | {:<8} {}",
                bin.index,
                bin.frequency,
                "#".repeat(bar_width)
            )?;
        }
        Ok(())
    }
}

/// Full text report: parameters, table, summary and optionally the chart
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub series: &'a VariationSeries,
    pub chart: bool,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", ParametersView(self.series))?;
        writeln!(f)?;
        writeln!(f, "{}", BinTable(self.series))?;
        writeln!(f)?;
        write!(f, "{}", SummaryView(self.series))?;
        if self.chart {
            writeln!(f)?;
            writeln!(f)?;
            writeln!(f, "Frequency by interval:")?;
            write!(f, "{}", FrequencyChart(self.series))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use varseries_stats::{
        precision::Precision,
        sample::Sample,
        series::{SeriesConfig, VariationSeries},
    };

    use super::*;

    fn series(text: &str, config: &SeriesConfig) -> VariationSeries {
        VariationSeries::compute(&Sample::parse(text).unwrap(), config).unwrap()
    }

    #[test]
    fn test_parameters_view() {
        let series = series("1 2 3 4 5", &SeriesConfig::default());
        let text = ParametersView(&series).to_string();
        assert!(text.contains("n = 5"));
        assert!(text.contains("m = 1 + 3.322 * lg(5) = 3.322"));
        assert!(text.contains("~m = 4 (ceil)"));
        assert!(text.contains("≈ 1.2"));
        assert!(text.contains("overkill"));
        assert!(text.starts_with("n = 5\nmax = 5\nmin = 1\n"));
    }

    #[test]
    fn test_parameters_view_shifted_start() {
        let config = SeriesConfig {
            precision: "0".parse().unwrap(),
            ..SeriesConfig::default()
        };
        let series = series("0 0,1 0,2 0,3", &config);
        let text = ParametersView(&series).to_string();
        assert!(text.ends_with("x1 = 0.3 - (4 - 0.5) * 1 = -3.2"), "{text}");
    }

    #[test]
    fn test_parameters_view_exact_width() {
        let config = SeriesConfig {
            round_bin_width: false,
            ..SeriesConfig::default()
        };
        let series = series("1 2 3 4 5", &config);
        let text = ParametersView(&series).to_string();
        assert!(!text.contains("overkill"));
        assert!(text.contains("x1 = min = 1"));
    }

    #[test]
    fn test_bin_table_rows() {
        let series = series("1 2 3 4 5", &SeriesConfig::default());
        let text = BinTable(&series).to_string();
        let lines = text.lines().collect::<Vec<_>>();
        // header, separator, 4 bins, separator, total
        assert_eq!(lines.len(), 8);
        assert!(lines[2].contains("[0.9979; 2.1979)"));
        assert!(lines[5].contains("[4.5979; 5.7979]"));
        assert!(lines[7].contains('Σ'));
    }

    #[test]
    fn test_summary_view_single_value() {
        let series = series("7", &SeriesConfig::default());
        let text = SummaryView(&series).to_string();
        assert!(text.contains("σ = sqrt(D) = 0"));
        assert!(text.contains("undefined for a sample of size 1"));
    }

    #[test]
    fn test_summary_view_corrected() {
        let series = series("1 2 3 4 5", &SeriesConfig::default());
        let text = SummaryView(&series).to_string();
        assert!(text.contains("S^2 = D * n / (n - 1) = "));
        assert!(text.contains("S = sqrt(S^2) = "));
    }

    #[test]
    fn test_frequency_chart() {
        let series = series("1 2 3 4 5", &SeriesConfig::default());
        let text = FrequencyChart(&series).to_string();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].ends_with(&"#".repeat(50)));
        assert!(lines[1].ends_with(&"#".repeat(25)));
    }

    #[test]
    fn test_report_with_chart() {
        let series = series("1 2 3 4 5", &SeriesConfig::default());
        let plain = Report {
            series: &series,
            chart: false,
        }
        .to_string();
        let charted = Report {
            series: &series,
            chart: true,
        }
        .to_string();
        assert!(!plain.contains("Frequency by interval"));
        assert!(charted.contains("Frequency by interval"));
        assert!(charted.starts_with(&plain));
    }

    #[test]
    fn test_detail_precision_capped() {
        let max = Precision::new(Precision::MAX).unwrap();
        assert_eq!(detail(max), max);
        assert_eq!(detail(Precision::default()).digits(), 4);
    }
}
