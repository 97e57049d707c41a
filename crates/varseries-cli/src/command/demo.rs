//! Worked example of a variation series
//!
//! Groups a fixed sample of 30 measurements and explains each step of the
//! derivation next to the computed values.

use std::io::Write;

use anyhow::Context as _;
use clap::Args;
use varseries_stats::{sample::Sample, series::SeriesConfig};

use super::analyze::{self, SeriesArg};
use crate::{
    report::{self, BinTable, FrequencyChart, SummaryView},
    util::Output,
};

const DEMO_VALUES: [f64; 30] = [
    27.3, 27.7, 26.4, 28.0, //
    26.2, 27.9, 28.3, 28.7, //
    26.4, 28.0, 28.4, 27.1, //
    26.1, 28.8, 27.0, 28.3, //
    27.1, 28.2, 26.4, 26.3, //
    27.5, 27.7, 28.4, 28.7, //
    28.8, 26.1, 26.6, 27.8, //
    28.1, 28.4,
];

#[derive(Debug, Clone, Args)]
pub(crate) struct DemoArg {
    #[clap(flatten)]
    series: SeriesArg,
    /// Append a bar chart of frequencies
    #[arg(long)]
    chart: bool,
}

pub(crate) fn run(arg: &DemoArg) -> anyhow::Result<()> {
    let mut output = Output::stdout();
    write_walkthrough(&mut output, &arg.series.config(), arg.chart)?;
    output.flush().context("Failed to flush stdout")?;
    Ok(())
}

pub(crate) fn demo_sample() -> anyhow::Result<Sample> {
    Sample::new(DEMO_VALUES.to_vec()).context("Failed to build the demo sample")
}

/// Write the worked example, explaining every parameter of the grouping
pub(crate) fn write_walkthrough<W>(
    out: &mut W,
    config: &SeriesConfig,
    chart: bool,
) -> anyhow::Result<()>
where
    W: Write,
{
    let sample = demo_sample()?;
    let series = analyze::compute(&sample, config)?;
    let params = &series.parameters;
    let p = series.precision();
    let d = report::detail(p);

    writeln!(out, "sample =")?;
    for row in sample.values().chunks(4) {
        let row = row.iter().map(f64::to_string).collect::<Vec<_>>();
        writeln!(out, "    {}", row.join(", "))?;
    }
    writeln!(out)?;
    writeln!(out, "n = {}", params.n)?;
    writeln!(out, "max = {}", params.max)?;
    writeln!(out, "min = {}", params.min)?;
    writeln!(out)?;
    writeln!(
        out,
        "The number of intervals is not given in advance, so it is estimated with Sturges' rule:"
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "    m = 1 + 3.322 * lg({}) = {}",
        params.n,
        d.round(params.exact_bin_count)
    )?;
    writeln!(out, "    ~m = {}", params.bin_count)?;
    writeln!(out)?;
    writeln!(
        out,
        "Partial intervals may differ in length, but equal-width grouping is the usual choice:"
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "    k = ({} - {}) / {} = {} ≈ {}",
        params.max,
        params.min,
        d.round(params.exact_bin_count),
        d.round(params.exact_bin_width),
        p.round(params.bin_width)
    )?;
    writeln!(out)?;
    if config.round_bin_width {
        if params.bin_width < p.round(params.exact_bin_width).max(p.unit()) {
            writeln!(
                out,
                "Rounding to the nearest value would start the last interval above the maximum, so k is rounded down."
            )?;
            writeln!(out)?;
        }
        writeln!(
            out,
            "Since {} was rounded to {}, the {} intervals together overshoot (or fall short of) the range by:",
            d.round(params.exact_bin_width),
            p.round(params.bin_width),
            params.bin_count
        )?;
        writeln!(out)?;
        writeln!(
            out,
            "    overkill = |{} - {}| ≈ {}",
            p.round(params.bin_width),
            d.round(params.exact_bin_width),
            d.round(params.rounding_correction)
        )?;
        writeln!(out)?;
        if params.is_centered() {
            writeln!(
                out,
                "So half of the overkill is subtracted from the smallest value {}:",
                params.min
            )?;
            writeln!(out)?;
            writeln!(
                out,
                "    x1 = {} - ({} / 2) = {}",
                params.min,
                d.round(params.rounding_correction),
                d.round(params.first_lower_bound)
            )?;
        } else {
            writeln!(
                out,
                "Even the smallest width overshoots the range, so the intervals are shifted until the maximum {} sits in the middle of the last one:",
                params.max
            )?;
            writeln!(out)?;
            writeln!(
                out,
                "    x1 = {} - ({} - 0.5) * {} = {}",
                params.max,
                params.bin_count,
                p.round(params.bin_width),
                d.round(params.first_lower_bound)
            )?;
        }
    } else {
        writeln!(out, "The exact width is kept, so the first interval starts at the minimum:")?;
        writeln!(out)?;
        writeln!(out, "    x1 = {}", params.min)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", BinTable(&series))?;
    writeln!(out)?;
    writeln!(out, "{}", SummaryView(&series))?;
    if chart {
        writeln!(out)?;
        writeln!(out, "{}", FrequencyChart(&series))?;
    }
    writeln!(out)?;
    write_legend(out)?;
    Ok(())
}

fn write_legend<W>(out: &mut W) -> anyhow::Result<()>
where
    W: Write,
{
    writeln!(out, "m        - fractional number of intervals")?;
    writeln!(out, "~m       - whole number of intervals")?;
    writeln!(out, "k        - length of a partial interval")?;
    writeln!(out, "overkill - excess introduced by rounding k")?;
    writeln!(out, "x_i      - interval midpoint, n_i - count, w_i - relative frequency")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walkthrough_text(config: &SeriesConfig) -> String {
        let mut buf = Vec::new();
        write_walkthrough(&mut buf, config, false).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_demo_sample() {
        let sample = demo_sample().unwrap();
        assert_eq!(sample.len(), 30);
        assert_eq!(sample.min(), 26.1);
        assert_eq!(sample.max(), 28.8);
    }

    #[test]
    fn test_walkthrough_mentions_every_step() {
        let text = walkthrough_text(&SeriesConfig::default());
        assert!(text.contains("n = 30"));
        assert!(text.contains("m = 1 + 3.322 * lg(30) = 5.907"));
        assert!(text.contains("~m = 6"));
        assert!(text.contains("≈ 0.46"));
        assert!(text.contains("overkill"));
        assert!(text.contains("x1 = 26.1 - "));
        assert!(text.contains('Σ'));
        assert!(text.contains("overkill - excess"));
    }

    #[test]
    fn test_walkthrough_zero_digits_shifts_intervals() {
        let config = SeriesConfig {
            precision: "0".parse().unwrap(),
            ..SeriesConfig::default()
        };
        let text = walkthrough_text(&config);
        assert!(text.contains("x1 = 28.8 - (6 - 0.5) * 1 = 23.3"));
        assert!(!text.contains("x1 = 26.1 - "));
    }

    #[test]
    fn test_walkthrough_exact_width() {
        let config = SeriesConfig {
            round_bin_width: false,
            ..SeriesConfig::default()
        };
        let text = walkthrough_text(&config);
        assert!(text.contains("x1 = 26.1\n"));
        assert!(!text.contains("overkill = "));
    }
}
