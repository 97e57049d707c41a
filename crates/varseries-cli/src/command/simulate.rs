use std::io::Write;

use anyhow::Context as _;
use clap::Args;
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use varseries_stats::{sample::Sample, series::SeriesConfig};

use super::analyze::{self, SeriesArg};
use crate::{report::Report, util::Output};

const DEFAULT_RUNS: usize = 5;
const DEFAULT_SIZE: usize = 50;
const DEFAULT_LOW: f64 = 0.1;
const DEFAULT_HIGH: f64 = 10.0;

#[derive(Debug, Clone, Args)]
pub(crate) struct SimulateArg {
    /// Number of samples to generate
    #[arg(long, default_value_t = DEFAULT_RUNS)]
    runs: usize,
    /// Values per sample
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    size: usize,
    /// Lower end of the uniform distribution (inclusive)
    #[arg(long, default_value_t = DEFAULT_LOW, allow_negative_numbers = true)]
    low: f64,
    /// Upper end of the uniform distribution (exclusive)
    #[arg(long, default_value_t = DEFAULT_HIGH, allow_negative_numbers = true)]
    high: f64,
    /// Seed for reproducible samples; random when omitted
    #[arg(long)]
    seed: Option<u64>,
    #[clap(flatten)]
    series: SeriesArg,
    /// Append a bar chart of frequencies to each report
    #[arg(long)]
    chart: bool,
}

/// How many uniform samples to draw and from where
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SimulationPlan {
    pub runs: usize,
    pub size: usize,
    pub low: f64,
    pub high: f64,
    pub seed: u64,
}

impl SimulationPlan {
    pub(crate) fn with_random_seed() -> Self {
        Self {
            runs: DEFAULT_RUNS,
            size: DEFAULT_SIZE,
            low: DEFAULT_LOW,
            high: DEFAULT_HIGH,
            seed: rand::rng().random(),
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.size > 0, "Sample size must be positive");
        anyhow::ensure!(
            self.low.is_finite() && self.high.is_finite() && self.low < self.high,
            "Invalid range {}..{}: low must be below high",
            self.low,
            self.high
        );
        Ok(())
    }

    fn samples(&self) -> impl Iterator<Item = anyhow::Result<Sample>> + '_ {
        let mut rng = Pcg32::seed_from_u64(self.seed);
        (0..self.runs).map(move |_| {
            let values = (0..self.size)
                .map(|_| rng.random_range(self.low..self.high))
                .collect::<Vec<f64>>();
            Sample::new(values).context("Failed to build a random sample")
        })
    }
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let plan = SimulationPlan {
        runs: arg.runs,
        size: arg.size,
        low: arg.low,
        high: arg.high,
        seed: arg.seed.unwrap_or_else(|| rand::rng().random()),
    };
    let mut output = Output::stdout();
    write_runs(&mut output, &plan, &arg.series.config(), arg.chart)?;
    output.flush().context("Failed to flush stdout")?;
    Ok(())
}

/// Analyze every sample of the plan and write one report per run
pub(crate) fn write_runs<W>(
    out: &mut W,
    plan: &SimulationPlan,
    config: &SeriesConfig,
    chart: bool,
) -> anyhow::Result<()>
where
    W: Write,
{
    plan.validate()?;
    eprintln!(
        "Analyzing {} uniform samples of {} values in [{}, {}) (seed {})",
        plan.runs, plan.size, plan.low, plan.high, plan.seed
    );
    for (i, sample) in plan.samples().enumerate() {
        let sample = sample?;
        let series = analyze::compute(&sample, config)?;
        writeln!(out, "Run {}/{}", i + 1, plan.runs)?;
        writeln!(out, "{}", Report { series: &series, chart })?;
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(seed: u64) -> SimulationPlan {
        SimulationPlan {
            runs: 3,
            size: 20,
            low: 0.1,
            high: 10.0,
            seed,
        }
    }

    fn runs_text(plan: &SimulationPlan) -> String {
        let mut buf = Vec::new();
        write_runs(&mut buf, plan, &SeriesConfig::default(), false).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_samples_stay_in_range() {
        let plan = plan(7);
        let samples = plan.samples().collect::<anyhow::Result<Vec<_>>>().unwrap();
        assert_eq!(samples.len(), 3);
        for sample in &samples {
            assert_eq!(sample.len(), 20);
            assert!(sample.min() >= 0.1);
            assert!(sample.max() < 10.0);
        }
    }

    #[test]
    fn test_same_seed_same_report() {
        assert_eq!(runs_text(&plan(42)), runs_text(&plan(42)));
        assert_ne!(runs_text(&plan(42)), runs_text(&plan(43)));
    }

    #[test]
    fn test_one_report_per_run() {
        let text = runs_text(&plan(1));
        assert!(text.contains("Run 1/3"));
        assert!(text.contains("Run 3/3"));
        assert!(!text.contains("Run 4/3"));
    }

    #[test]
    fn test_rejects_empty_range() {
        let plan = SimulationPlan {
            low: 5.0,
            high: 5.0,
            ..plan(0)
        };
        let mut buf = Vec::new();
        let err = write_runs(&mut buf, &plan, &SeriesConfig::default(), false).unwrap_err();
        assert!(err.to_string().contains("low must be below high"));
    }

    #[test]
    fn test_default_plan() {
        let plan = SimulationPlan::with_random_seed();
        assert_eq!(plan.runs, DEFAULT_RUNS);
        assert_eq!(plan.size, DEFAULT_SIZE);
        assert!(plan.validate().is_ok());
    }
}
