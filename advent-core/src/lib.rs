//! Puzzle framework for daily Advent of Code style solvers.
//!
//! Each day is a self-contained type that parses its input once and then
//! answers one or more parts. The framework only supplies the plumbing:
//!
//! - [`Puzzle`] parses raw text into the day's input type
//! - [`Part<N>`] solves part `N`, with the part number checked at compile time
//! - [`Solver`] dispatches a runtime part number to the right `Part<N>`
//!   (derive it with `#[derive(Solver)]`)
//! - [`SolverInstance`] / [`DynSolver`] hold parsed input behind a
//!   type-erased, timed interface
//! - [`Registry`] maps year/day to solvers; `#[derive(AutoRegister)]`
//!   submits a [`SolverPlugin`] so binaries discover days at link time
//!
//! # Example
//!
//! ```
//! use advent_core::{Part, ParseError, Puzzle, RegisterableSolver, RegistryBuilder, SolveError, Solver};
//!
//! #[derive(Solver)]
//! #[solver(parts = 1)]
//! struct Sum;
//!
//! impl Puzzle for Sum {
//!     type Input<'a> = Vec<u32>;
//!
//!     fn parse(input: &str) -> Result<Self::Input<'_>, ParseError> {
//!         input
//!             .lines()
//!             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
//!             .collect()
//!     }
//! }
//!
//! impl Part<1> for Sum {
//!     fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
//!         Ok(input.iter().sum::<u32>().to_string())
//!     }
//! }
//!
//! let registry = Sum.register_with(RegistryBuilder::new(), 2025, 1, &[]).unwrap().build();
//! let mut solver = registry.create_solver(2025, 1, "1\n2\n3").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "6");
//! ```

extern crate self as advent_core;

mod error;
mod instance;
mod puzzle;
mod registry;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use puzzle::{Part, Puzzle, Solver, SolverExt};
pub use registry::{
    FactoryInfo, PuzzleId, RegisterableSolver, Registry, RegistryBuilder, SolverFactory,
    SolverPlugin,
};

// Used by the derive macros
pub use inventory;

pub use advent_macros::{AutoRegister, Solver};
