use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, ValueEnum};
use varseries_stats::{
    parameters::BinCountRule,
    precision::Precision,
    sample::Sample,
    series::{SeriesConfig, VariationSeries},
};

use crate::{
    report::Report,
    schema::SeriesReport,
    util::{self, Output},
};

/// Options shared by every command that builds a variation series
#[derive(Debug, Clone, Args)]
pub(crate) struct SeriesArg {
    /// Decimal places for the bin width and the presented frequencies
    #[arg(long, short = 'p', default_value = "2")]
    pub precision: Precision,
    /// How Sturges' estimate is turned into a whole number of bins (ceil or round)
    #[arg(long, default_value = "ceil")]
    pub bin_count_rule: BinCountRule,
    /// Keep the exact bin width instead of rounding it to the precision
    #[arg(long)]
    pub exact_width: bool,
}

impl Default for SeriesArg {
    fn default() -> Self {
        Self {
            precision: Precision::default(),
            bin_count_rule: BinCountRule::default(),
            exact_width: false,
        }
    }
}

impl SeriesArg {
    pub(crate) fn config(&self) -> SeriesConfig {
        SeriesConfig {
            precision: self.precision,
            round_bin_width: !self.exact_width,
            bin_count_rule: self.bin_count_rule,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct AnalyzeArg {
    /// Sample values; a comma may be used as the decimal separator
    #[arg(allow_negative_numbers = true)]
    values: Vec<String>,
    /// Read sample values from this file instead
    #[arg(long, short = 'f')]
    file: Option<PathBuf>,
    #[clap(flatten)]
    series: SeriesArg,
    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Output file path
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
    /// Also save the bin table as CSV to this path
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Append a bar chart of frequencies to the text report
    #[arg(long)]
    chart: bool,
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let AnalyzeArg {
        values,
        file,
        series: series_arg,
        format,
        output,
        csv,
        chart,
    } = arg;

    let sample = load_sample(values, file.as_deref())?;
    let series = compute(&sample, &series_arg.config())?;

    let mut output = Output::from_output_path(output.as_deref())?;
    match format {
        OutputFormat::Text => output.write_text(Report {
            series: &series,
            chart: *chart,
        })?,
        OutputFormat::Json => output.write_json(&SeriesReport::from(&series))?,
    }
    if let Some(path) = csv {
        util::save_bins_csv(path, &series.bins)?;
        eprintln!("Bin table saved to: {}", path.display());
    }
    Ok(())
}

fn load_sample(values: &[String], file: Option<&Path>) -> anyhow::Result<Sample> {
    match file {
        Some(path) if values.is_empty() => util::read_sample_file(path),
        Some(_) => anyhow::bail!("Pass sample values either as arguments or with --file, not both"),
        None => parse_sample(values),
    }
}

pub(crate) fn parse_sample(values: &[String]) -> anyhow::Result<Sample> {
    let sample = Sample::parse(&values.join(" ")).context("Failed to parse sample values")?;
    tracing::info!(n = sample.len(), "parsed sample");
    Ok(sample)
}

pub(crate) fn compute(sample: &Sample, config: &SeriesConfig) -> anyhow::Result<VariationSeries> {
    let series = VariationSeries::compute(sample, config)
        .context("Failed to build the variation series")?;
    if series.summary.corrected_variance().is_err() {
        tracing::warn!(n = sample.len(), "corrected variance is undefined");
    }
    Ok(series)
}
