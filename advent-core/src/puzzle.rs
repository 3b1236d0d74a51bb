//! Core puzzle traits

use crate::error::{ParseError, SolveError};

/// Parsing half of a daily puzzle.
///
/// # Example
///
/// ```
/// use advent_core::{ParseError, Puzzle};
///
/// struct Day1;
///
/// impl Puzzle for Day1 {
///     type Input<'a> = Vec<i32>;
///
///     fn parse(input: &str) -> Result<Self::Input<'_>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat("bad int".into())))
///             .collect()
///     }
/// }
/// ```
pub trait Puzzle {
    /// Parsed input, shared by every part.
    ///
    /// Owned structures are the usual choice; `&'a str` works for
    /// zero-copy input.
    type Input<'a>;

    /// Parse raw puzzle text.
    fn parse<'a>(input: &'a str) -> Result<Self::Input<'a>, ParseError>;
}

/// One part of a puzzle. `N` is the part number, checked at compile time.
///
/// # Example
///
/// ```
/// use advent_core::{Part, ParseError, Puzzle, SolveError};
///
/// struct Day1;
///
/// impl Puzzle for Day1 {
///     type Input<'a> = Vec<i32>;
///
///     fn parse(input: &str) -> Result<Self::Input<'_>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat("bad int".into())))
///             .collect()
///     }
/// }
///
/// impl Part<1> for Day1 {
///     fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError> {
///         Ok(input.iter().sum::<i32>().to_string())
///     }
/// }
/// ```
pub trait Part<const N: u8>: Puzzle {
    /// Solve this part, returning the printable answer.
    fn solve(input: &mut Self::Input<'_>) -> Result<String, SolveError>;
}

/// Part dispatch for a puzzle.
///
/// Usually generated with `#[derive(Solver)]`, which routes part `N` to
/// `<Self as Part<N>>::solve`.
pub trait Solver: Puzzle {
    /// Number of parts this solver implements
    const PARTS: u8;

    /// Solve a specific part
    ///
    /// # Returns
    /// * `Ok(String)` - The answer for this part
    /// * `Err(SolveError::PartNotImplemented)` - The part is not implemented
    /// * `Err(SolveError::NoSolution)` - The input has no answer
    fn solve_part(input: &mut Self::Input<'_>, part: u8) -> Result<String, SolveError>;
}

pub trait SolverExt: Solver {
    /// `solve_part`, rejecting part numbers outside `1..=PARTS`.
    fn solve_part_checked_range(
        input: &mut Self::Input<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(input, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
