//! Interactive `sv` command loop
//!
//! Reads one command per line until end of input or `exit`. A failing
//! command prints its error and the loop keeps accepting input.

use std::io::{self, BufRead, Write};

use anyhow::Context as _;
use clap::{Args, Parser};

use super::{
    analyze::{self, SeriesArg},
    demo,
    simulate::{self, SimulationPlan},
};
use crate::report::Report;

const COMMAND_NAME: &str = "sv";

#[derive(Debug, Clone, Args)]
pub(crate) struct ReplArg {
    /// Prompt shown before each command
    #[arg(long, default_value = "-> ")]
    prompt: String,
}

impl Default for ReplArg {
    fn default() -> Self {
        Self {
            prompt: "-> ".to_owned(),
        }
    }
}

/// One line of the interactive loop, e.g. `sv -a 4,6 4 4,1`
#[derive(Debug, Clone, Parser)]
#[command(name = COMMAND_NAME, disable_help_flag = true, disable_version_flag = true)]
struct SvCommand {
    /// Show usage and the worked example
    #[arg(short = 'h', long = "help")]
    help: bool,
    /// Analyze randomly generated samples
    #[arg(short = 't', long = "test")]
    test: bool,
    /// Sample values to analyze
    #[arg(short = 'a', long = "array", num_args = 1.., allow_negative_numbers = true)]
    values: Vec<String>,
    #[clap(flatten)]
    series: SeriesArg,
    /// Append a bar chart of frequencies
    #[arg(long)]
    chart: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub(crate) fn run(arg: &ReplArg) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut lines = stdin.lock().lines();
    loop {
        write!(stdout, "{}", arg.prompt)?;
        stdout.flush().context("Failed to flush stdout")?;
        let Some(line) = lines.next() else {
            writeln!(stdout)?;
            break;
        };
        let line = line.context("Failed to read command")?;
        match execute_line(&line, &mut stdout) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(err) => {
                tracing::debug!(%line, "command failed");
                writeln!(stdout, "Input Error! {err:#}")?;
                writeln!(stdout, "Use {COMMAND_NAME} -h")?;
            }
        }
    }
    Ok(())
}

fn execute_line<W>(line: &str, out: &mut W) -> anyhow::Result<Flow>
where
    W: Write,
{
    let mut words = line.split_whitespace().peekable();
    let Some(&command) = words.peek() else {
        return Ok(Flow::Continue);
    };
    match command {
        "exit" | "quit" => return Ok(Flow::Exit),
        "help" => {
            write_usage(out)?;
            return Ok(Flow::Continue);
        }
        COMMAND_NAME => {}
        _ => {
            writeln!(out, "Unknown command")?;
            return Ok(Flow::Continue);
        }
    }

    let command = SvCommand::try_parse_from(words)?;
    let config = command.series.config();
    if command.help {
        write_usage(out)?;
        writeln!(out)?;
        demo::write_walkthrough(out, &config, command.chart)?;
    } else if command.test {
        simulate::write_runs(out, &SimulationPlan::with_random_seed(), &config, command.chart)?;
    } else if !command.values.is_empty() {
        let sample = analyze::parse_sample(&command.values)?;
        let series = analyze::compute(&sample, &config)?;
        writeln!(
            out,
            "{}",
            Report {
                series: &series,
                chart: command.chart,
            }
        )?;
    } else {
        anyhow::bail!("Expected one of -h, -t or -a <values>");
    }
    Ok(Flow::Continue)
}

fn write_usage<W>(out: &mut W) -> io::Result<()>
where
    W: Write,
{
    writeln!(out, "  {:<24} {:<44} {}", "Command", "Description", "Input example")?;
    writeln!(out, "  {}", "-".repeat(90))?;
    writeln!(out, "  {:<24} {:<44} {}", "sv -h", "Instruction and worked example", "-")?;
    writeln!(out, "  {:<24} {:<44} {}", "sv -t", "Analyze random samples", "-")?;
    writeln!(
        out,
        "  {:<24} {:<44} {}",
        "sv -a [values]", "Analyze values (comma or dot decimals)", "sv -a 4,6 4 4.1"
    )?;
    writeln!(
        out,
        "  {:<24} {:<44} {}",
        "  -p <digits>", "Rounding precision (default 2)", "sv -a 1 2 3 -p 1"
    )?;
    writeln!(
        out,
        "  {:<24} {:<44} {}",
        "  --bin-count-rule <rule>", "ceil or round", "sv -a 1 2 3 --bin-count-rule round"
    )?;
    writeln!(out, "  {:<24} {:<44} {}", "  --exact-width", "Do not round the bin width", "-")?;
    writeln!(out, "  {:<24} {:<44} {}", "  --chart", "Append a frequency bar chart", "-")?;
    writeln!(out, "  {:<24} {:<44} {}", "exit", "Leave the program", "-")?;
    Ok(())
}
