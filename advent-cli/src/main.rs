//! Advent CLI - runs registered puzzle solvers against an input file

mod cli;
mod config;
mod error;
mod output;
mod runner;

// Link the solver plugins
use advent_2025 as _;

use advent_core::{Registry, RegistryBuilder};
use clap::Parser;
use cli::Args;
use config::Config;
use output::OutputFormatter;
use runner::{PartOutcome, PartResult, Runner};
use std::process::ExitCode;

/// How a run ends, mapped onto the process exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Success,
    /// Some part has no solution for the input
    Unsolvable,
    Failure,
}

impl Status {
    fn code(self) -> u8 {
        match self {
            Status::Success => 0,
            Status::Failure => 1,
            Status::Unsolvable => 2,
        }
    }

    /// Any failure outranks an unsolvable part; skipped parts count as neither
    fn of(results: &[PartResult]) -> Self {
        results
            .iter()
            .fold(Status::Success, |status, result| match &result.outcome {
                PartOutcome::Failed(e) if !e.is_no_solution() => Status::Failure,
                PartOutcome::Failed(_) if status == Status::Success => Status::Unsolvable,
                _ => status,
            })
    }
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        ExitCode::from(status.code())
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let formatter = OutputFormatter::new(args.quiet);

    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Status::Failure.into();
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(&config, &formatter) {
        Ok(results) => Status::of(&results).into(),
        Err(e) => {
            eprintln!("Error: {}", e);
            Status::Failure.into()
        }
    }
}

/// Read the input, solve the selected parts and print every result
fn run(config: &Config, formatter: &OutputFormatter) -> Result<Vec<PartResult>, error::CliError> {
    let registry = build_registry(&config.tags)?;
    tracing::debug!(solvers = registry.len(), "registry built");

    let input = config.read_input()?;
    let results = Runner::new(registry, config).run(&input)?;

    for result in &results {
        formatter.print_result(result);
    }
    formatter.print_summary(&results);
    Ok(results)
}

/// Build registry with tag filtering
fn build_registry(tags: &[String]) -> Result<Registry, error::CliError> {
    let builder = RegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
