//! Error types for the CLI

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cannot read {}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Solver error: {0}")]
    Solver(#[from] advent_core::SolverError),

    #[error("Registration error: {0}")]
    Registration(#[from] advent_core::RegistrationError),

    /// Requested part exceeds what the solver implements
    #[error("{year}/{day:02} has {parts} part(s), part {part} requested")]
    PartUnavailable {
        year: u16,
        day: u8,
        part: u8,
        parts: u8,
    },
}
