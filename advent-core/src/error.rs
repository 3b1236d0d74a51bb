//! Error types for the puzzle framework

use thiserror::Error;

/// Error type for parsing puzzle input
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// Input doesn't match the expected grammar
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    /// Required data is missing from input
    #[error("Missing data: {0}")]
    MissingData(String),
}

/// Error type for solving a specific part
#[derive(Debug, Error)]
pub enum SolveError {
    /// The requested part number is not implemented
    #[error("Part {0} is not implemented")]
    PartNotImplemented(u8),
    /// The requested part number is out of range (exceeds `PARTS`)
    #[error("Part {0} is out of range")]
    PartOutOfRange(u8),
    /// Parsed input lacks something this part needs
    #[error("Missing data: {0}")]
    MissingData(String),
    /// The puzzle has no answer for this input
    #[error("No solution: {0}")]
    NoSolution(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// An error occurred while solving the part
    #[error("Solve failed: {0}")]
    SolveFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Error type for registry lookups and solver creation
#[derive(Debug, Error)]
pub enum SolverError {
    /// No solver registered for the given year and day
    #[error("Solver not found for year {0} day {1}")]
    NotFound(u16, u8),
    /// Error occurred during parsing
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    /// Error occurred during solving
    #[error("Solve error: {0}")]
    Solve(#[from] SolveError),
}

impl SolverError {
    /// Whether the failure means "this input has no answer" rather than a broken input or solver
    pub fn is_no_solution(&self) -> bool {
        matches!(self, SolverError::Solve(SolveError::NoSolution(_)))
    }

    /// Whether the parsed input lacks something the part needs
    pub fn is_missing_data(&self) -> bool {
        matches!(self, SolverError::Solve(SolveError::MissingData(_)))
    }
}

/// Error type for registration failures
#[derive(Debug, Clone, Error)]
pub enum RegistrationError {
    /// Attempted to register a solver for a year-day combination that already exists
    #[error("Duplicate solver registration for year {0} day {1}")]
    DuplicateSolver(u16, u8),
    /// Day outside 1..=25
    #[error("Invalid day {1} for year {0}")]
    InvalidDay(u16, u8),
}
