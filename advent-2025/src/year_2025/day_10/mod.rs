//! Day 10: fewest button presses to configure factory machines.
//!
//! Each button adds one to a fixed set of counters, so a machine is the
//! linear system `A·x = b` with `A` the counter/button incidence matrix.
//! Part 1 solves it over GF(2) (lights toggle); part 2 over the
//! nonnegative integers (joltage counters accumulate), using exact
//! rational elimination followed by a search over the free variables.

mod field;
mod machine;
mod search;
mod system;

pub use field::{Field, Gf2};
pub use machine::{Button, Machine, parse_machine, parse_machines};
pub use search::{IntegerForm, Solution, Strategy, min_weight_gf2};
pub use system::{LinearSystem, Reduced};

use advent_core::{AutoRegister, Part, ParseError, Puzzle, SolveError, Solver};
use num_rational::BigRational;
use thiserror::Error;

#[derive(Solver, AutoRegister)]
#[solver(parts = 2)]
#[puzzle(year = 2025, day = 10, tags = ["linear-algebra", "gf2", "ilp"])]
pub struct Day10;

/// Why a single machine has no answer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    /// The machine lacks the target this part needs
    #[error("machine has no {0}")]
    MissingTarget(&'static str),
    /// Elimination left a row reading `0 = nonzero`
    #[error("no combination of buttons reaches the target (row {row} reduces to 0 = nonzero)")]
    Inconsistent { row: usize },
    /// The system is consistent but the search found no nonnegative integer assignment
    #[error("no nonnegative integer assignment found ({free} free variables)")]
    NoAssignment { free: usize },
    /// Scaled coefficients need more than 128 bits, or the press total more than 64
    #[error("machine values exceed the supported integer range")]
    Overflow,
}

/// Why the input as a whole has no total
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Day10Error {
    /// A single machine failed, which voids the whole sum
    #[error("machine {machine}: {source}")]
    Unsolvable {
        /// 0-based position in the input
        machine: usize,
        #[source]
        source: MachineError,
    },
    /// Every machine solved but the sum does not fit in 64 bits
    #[error("total presses overflow after machine {machine}")]
    TotalOverflow { machine: usize },
}

/// Fewest presses that leave exactly the `#` lights on.
pub fn fewest_light_presses(machine: &Machine) -> Result<Solution, MachineError> {
    let lights = machine
        .lights
        .as_ref()
        .ok_or(MachineError::MissingTarget("light pattern"))?;
    let target = lights.iter().copied().map(Gf2).collect();

    let reduced = LinearSystem::from_buttons(&machine.buttons, target).reduce()?;
    tracing::debug!(
        counters = machine.counters(),
        buttons = machine.buttons.len(),
        rank = reduced.rank,
        free = reduced.free.len(),
        "reduced light system over GF(2)"
    );
    Ok(min_weight_gf2(&reduced))
}

/// Fewest presses that bring every counter exactly to its joltage target.
pub fn fewest_joltage_presses(
    machine: &Machine,
    strategy: Strategy,
) -> Result<Solution, MachineError> {
    let joltage = machine
        .joltage
        .as_ref()
        .ok_or(MachineError::MissingTarget("joltage list"))?;
    let target = joltage.iter().map(|&j| BigRational::from_u64(j)).collect();

    let reduced = LinearSystem::from_buttons(&machine.buttons, target).reduce()?;
    let form = IntegerForm::new(&reduced)?;
    tracing::debug!(
        counters = machine.counters(),
        buttons = machine.buttons.len(),
        rank = reduced.rank,
        free = form.free_count(),
        ?strategy,
        "reduced joltage system"
    );
    search::min_presses(&form, &machine.buttons, joltage, strategy)
}

/// Sum of per-machine totals. The first machine without a solution voids the whole sum.
pub fn total_presses<F>(machines: &[Machine], mut solve: F) -> Result<u64, Day10Error>
where
    F: FnMut(&Machine) -> Result<Solution, MachineError>,
{
    machines
        .iter()
        .enumerate()
        .try_fold(0u64, |total, (machine_idx, machine)| {
            let solution = solve(machine).map_err(|source| Day10Error::Unsolvable {
                machine: machine_idx,
                source,
            })?;
            total
                .checked_add(solution.total())
                .ok_or(Day10Error::TotalOverflow {
                    machine: machine_idx,
                })
        })
}

impl From<Day10Error> for SolveError {
    fn from(err: Day10Error) -> Self {
        match err {
            Day10Error::Unsolvable {
                machine,
                source: MachineError::MissingTarget(what),
            } => SolveError::MissingData(format!("machine {} has no {}", machine, what)),
            Day10Error::Unsolvable {
                source: MachineError::Overflow,
                ..
            }
            | Day10Error::TotalOverflow { .. } => SolveError::SolveFailed(Box::new(err)),
            Day10Error::Unsolvable { .. } => SolveError::NoSolution(Box::new(err)),
        }
    }
}

impl Puzzle for Day10 {
    type Input<'a> = Vec<Machine>;

    fn parse(input: &str) -> Result<Self::Input<'_>, ParseError> {
        let machines =
            parse_machines(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))?;
        if machines.is_empty() {
            return Err(ParseError::MissingData("no machines in input".to_string()));
        }
        Ok(machines)
    }
}

impl Part<1> for Day10 {
    fn solve(machines: &mut Self::Input<'_>) -> Result<String, SolveError> {
        Ok(total_presses(machines, fewest_light_presses)?.to_string())
    }
}

impl Part<2> for Day10 {
    fn solve(machines: &mut Self::Input<'_>) -> Result<String, SolveError> {
        let total = total_presses(machines, |m| fewest_joltage_presses(m, Strategy::Exact))?;
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}
[...#.] (0,2,3,4) (2,3) (0,4) (0,1,2) (1,2,3,4) {7,5,12,7,2}
[.###.#] (0,1,2,3,4) (0,3,4) (0,1,2,4,5) (1,2) {10,11,11,5,10,5}
";

    #[test]
    fn test_lights_per_machine() {
        let machines = parse_machines(EXAMPLE).unwrap();
        let totals: Vec<u64> = machines
            .iter()
            .map(|m| fewest_light_presses(m).unwrap().total())
            .collect();
        assert_eq!(totals, vec![2, 3, 2]);
    }

    #[test]
    fn test_joltage_per_machine() {
        let machines = parse_machines(EXAMPLE).unwrap();
        for strategy in [Strategy::Exact, Strategy::bounded()] {
            let totals: Vec<u64> = machines
                .iter()
                .map(|m| fewest_joltage_presses(m, strategy).unwrap().total())
                .collect();
            assert_eq!(totals, vec![10, 12, 11], "{strategy:?}");
        }
    }

    #[test]
    fn test_parts() {
        let mut machines = Day10::parse(EXAMPLE).unwrap();
        assert_eq!(<Day10 as Part<1>>::solve(&mut machines).unwrap(), "7");
        assert_eq!(<Day10 as Part<2>>::solve(&mut machines).unwrap(), "33");
        assert_eq!(<Day10 as Solver>::PARTS, 2);
    }

    #[test]
    fn test_unsolvable_voids_total() {
        // Second machine: both counters always move together but targets differ
        let machines = parse_machines("(0) (0,1) {3,1}\n(0,1) {3,5}").unwrap();
        let err = total_presses(&machines, |m| fewest_joltage_presses(m, Strategy::Exact))
            .unwrap_err();
        assert!(matches!(
            err,
            Day10Error::Unsolvable {
                machine: 1,
                source: MachineError::Inconsistent { .. }
            }
        ));
    }

    #[test]
    fn test_negative_only_solution_is_unsolvable() {
        // x0 + x1 = 1 and x1 = 3 forces x0 = -2
        let machines = parse_machines("(0) (0,1) {1,3}").unwrap();
        let err = total_presses(&machines, |m| fewest_joltage_presses(m, Strategy::Exact))
            .unwrap_err();
        assert_eq!(
            err,
            Day10Error::Unsolvable {
                machine: 0,
                source: MachineError::NoAssignment { free: 0 }
            }
        );

        let solve_error = SolveError::from(err);
        assert!(matches!(solve_error, SolveError::NoSolution(_)));
    }

    #[test]
    fn test_missing_target_is_missing_data() {
        let mut machines = Day10::parse("(0) (0,1) {1,3}").unwrap();
        let result = <Day10 as Part<1>>::solve(&mut machines);
        assert!(matches!(result, Err(SolveError::MissingData(_))));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Day10::parse("\n \n"), Err(ParseError::MissingData(_))));
        assert!(matches!(
            Day10::parse("[.#] (0) {1,1}\n[.# (0)"),
            Err(ParseError::InvalidFormat(msg)) if msg.starts_with("line 2")
        ));
    }

    #[test]
    fn test_machine_total_overflow() {
        let machines = parse_machines("(0) (1) {18446744073709551615,1}").unwrap();
        let err = total_presses(&machines, |m| fewest_joltage_presses(m, Strategy::Exact))
            .unwrap_err();
        assert_eq!(
            err,
            Day10Error::Unsolvable {
                machine: 0,
                source: MachineError::Overflow
            }
        );
        assert!(matches!(SolveError::from(err), SolveError::SolveFailed(_)));
    }

    #[test]
    fn test_aggregate_overflow() {
        let mut machines = Day10::parse("(0) {18446744073709551615}\n(0) {1}").unwrap();
        let err = total_presses(&machines, |m| fewest_joltage_presses(m, Strategy::Exact))
            .unwrap_err();
        assert_eq!(err, Day10Error::TotalOverflow { machine: 1 });

        let result = <Day10 as Part<2>>::solve(&mut machines);
        assert!(matches!(result, Err(SolveError::SolveFailed(_))));
    }

    #[test]
    fn test_bounded_huge_target() {
        let machine = parse_machine("(0) (0) {18446744073709551615}").unwrap();
        let strategy = Strategy::Bounded { trials: 1_000, seed: 3 };
        let solution = fewest_joltage_presses(&machine, strategy).unwrap();
        assert_eq!(solution.total(), u64::MAX);
    }
}
