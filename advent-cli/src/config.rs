//! Configuration resolution from CLI args

use crate::cli::Args;
use crate::error::CliError;
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;

/// Resolved runtime configuration
#[derive(Debug)]
pub struct Config {
    /// Input file, `~` expanded
    pub input_path: PathBuf,
    pub year: u16,
    pub day: u8,
    /// Part filter (None = all parts)
    pub part_filter: Option<u8>,
    pub tags: Vec<String>,
    pub quiet: bool,
    /// Verbosity for the stderr log
    pub log_level: LevelFilter,
}

impl Config {
    /// Build config from CLI args; the input file must exist
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let input_path = expand_tilde(&args.input);
        if !input_path.is_file() {
            return Err(CliError::Config(format!(
                "input file {} does not exist",
                input_path.display()
            )));
        }

        Ok(Config {
            input_path,
            year: args.year,
            day: args.day,
            part_filter: args.part,
            tags: args.tags,
            quiet: args.quiet,
            log_level: log_level(args.quiet, args.verbose),
        })
    }

    /// Read the whole input file
    pub fn read_input(&self) -> Result<String, CliError> {
        std::fs::read_to_string(&self.input_path).map_err(|source| CliError::Input {
            path: self.input_path.clone(),
            source,
        })
    }
}

fn log_level(quiet: bool, verbose: u8) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::OFF,
        (false, 0) => LevelFilter::WARN,
        (false, 1) => LevelFilter::INFO,
        (false, 2) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    }
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && (path_str.starts_with("~/") || path_str == "~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path_str.trim_start_matches('~').trim_start_matches('/'));
    }
    path.to_path_buf()
}
