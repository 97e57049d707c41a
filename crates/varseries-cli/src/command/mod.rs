use clap::{Parser, Subcommand};

use self::{analyze::AnalyzeArg, demo::DemoArg, repl::ReplArg, simulate::SimulateArg};

mod analyze;
mod demo;
mod repl;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Build the variation series of a sample
    Analyze(#[clap(flatten)] AnalyzeArg),
    /// Walk through the built-in worked example
    Demo(#[clap(flatten)] DemoArg),
    /// Analyze randomly generated uniform samples
    Simulate(#[clap(flatten)] SimulateArg),
    /// Read `sv` commands interactively (default)
    Repl(#[clap(flatten)] ReplArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Repl(ReplArg::default())) {
        Mode::Analyze(arg) => analyze::run(&arg)?,
        Mode::Demo(arg) => demo::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::Repl(arg) => repl::run(&arg)?,
    }
    Ok(())
}
