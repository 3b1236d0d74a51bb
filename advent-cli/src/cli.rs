//! CLI argument parsing using clap

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Run a puzzle solver on an input file
#[derive(Parser, Debug)]
#[command(name = "advent", about = "Run daily puzzle solvers on an input file", version)]
pub struct Args {
    /// Puzzle input file
    pub input: PathBuf,

    /// Event year
    #[arg(short, long, default_value_t = 2025)]
    pub year: u16,

    /// Day to run
    #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: u8,

    /// Part to run (runs all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Only consider solvers carrying all of these tags (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Quiet mode - only output answers
    #[arg(short, long)]
    pub quiet: bool,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
