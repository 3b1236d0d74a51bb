//! Free-variable search over a reduced system.
//!
//! Pivot variables are determined by the free ones, so every search here
//! enumerates free-variable assignments, back-substitutes, and keeps the
//! valid assignment with the fewest total presses.

use super::MachineError;
use super::field::Gf2;
use super::machine::Button;
use super::system::Reduced;
use itertools::Itertools;
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, ToPrimitive};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Press counts per button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub presses: Vec<u64>,
}

impl Solution {
    pub fn total(&self) -> u64 {
        self.presses.iter().sum()
    }
}

/// How to search the free variables of a joltage system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Branch and bound within proven per-button bounds. Always optimal.
    #[default]
    Exact,
    /// Enumerate `0..search_bound` per free variable when there are at most
    /// three of them and the grid stays small, otherwise draw `trials`
    /// random assignments. Can miss the optimum, or every valid assignment.
    Bounded { trials: usize, seed: u64 },
}

impl Strategy {
    pub const DEFAULT_TRIALS: usize = 100_000;
    pub const DEFAULT_SEED: u64 = 0x5eed_0a10;

    /// Free variables up to which [`Strategy::Bounded`] enumerates exhaustively
    pub const EXHAUSTIVE_FREE_LIMIT: usize = 3;

    /// Largest grid [`Strategy::Bounded`] enumerates before falling back to sampling
    pub const EXHAUSTIVE_GRID_LIMIT: u64 = 1 << 24;

    pub fn bounded() -> Self {
        Strategy::Bounded {
            trials: Self::DEFAULT_TRIALS,
            seed: Self::DEFAULT_SEED,
        }
    }
}

/// Fewest presses over GF(2): every button is pressed zero or one times.
///
/// Tries all `2^|free|` assignments; the full-rank case has exactly one.
pub fn min_weight_gf2(reduced: &Reduced<Gf2>) -> Solution {
    let to_solution = |x: Vec<Gf2>| Solution {
        presses: x.into_iter().map(|bit| u64::from(bit.0)).collect(),
    };

    let zeros = vec![Gf2(false); reduced.free.len()];
    let basic = to_solution(reduced.back_substitute(&zeros));
    if reduced.is_full_rank() {
        return basic;
    }

    (0..reduced.free.len())
        .map(|_| [Gf2(false), Gf2(true)])
        .multi_cartesian_product()
        .map(|free_values| to_solution(reduced.back_substitute(&free_values)))
        .fold(basic, |best, candidate| {
            if candidate.total() < best.total() {
                candidate
            } else {
                best
            }
        })
}

/// One pivot variable, scaled to integers:
/// `D·x[variable] = rhs − Σ_f coeffs[f]·x[free[f]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PivotRow {
    variable: usize,
    rhs: i128,
    coeffs: Vec<i128>,
}

/// A reduced rational system multiplied through by the common denominator
/// `D` of its entries, so candidates are checked with integer arithmetic.
///
/// The press total is affine in the free variables:
/// `D·total = base + Σ_f weights[f]·x[free[f]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerForm {
    variables: usize,
    denominator: i128,
    free: Vec<usize>,
    rows: Vec<PivotRow>,
    base: i128,
    weights: Vec<i128>,
}

impl IntegerForm {
    pub fn new(reduced: &Reduced<BigRational>) -> Result<Self, MachineError> {
        let pivots: Vec<(usize, usize)> = reduced
            .pivot_row
            .iter()
            .enumerate()
            .filter_map(|(var, row)| row.map(|row| (var, row)))
            .collect();

        let denominator = pivots
            .iter()
            .flat_map(|&(_, row)| {
                reduced
                    .free
                    .iter()
                    .map(move |&f| &reduced.matrix[row][f])
                    .chain(std::iter::once(&reduced.rhs[row]))
            })
            .fold(BigInt::one(), |acc, value| acc.lcm(value.denom()));
        let scale = BigRational::from_integer(denominator.clone());

        let to_i128 = |value: &BigRational| -> Result<i128, MachineError> {
            let scaled = value * &scale;
            debug_assert!(scaled.is_integer());
            scaled.to_integer().to_i128().ok_or(MachineError::Overflow)
        };

        let rows = pivots
            .iter()
            .map(|&(variable, row)| {
                Ok(PivotRow {
                    variable,
                    rhs: to_i128(&reduced.rhs[row])?,
                    coeffs: reduced
                        .free
                        .iter()
                        .map(|&f| to_i128(&reduced.matrix[row][f]))
                        .collect::<Result<_, _>>()?,
                })
            })
            .collect::<Result<Vec<_>, MachineError>>()?;

        let denominator = denominator.to_i128().ok_or(MachineError::Overflow)?;
        let base = rows
            .iter()
            .try_fold(0i128, |acc, r| acc.checked_add(r.rhs))
            .ok_or(MachineError::Overflow)?;
        let weights = (0..reduced.free.len())
            .map(|f| {
                rows.iter()
                    .try_fold(denominator, |acc, r| acc.checked_sub(r.coeffs[f]))
                    .ok_or(MachineError::Overflow)
            })
            .collect::<Result<_, _>>()?;

        Ok(Self {
            variables: reduced.variables(),
            denominator,
            free: reduced.free.clone(),
            rows,
            base,
            weights,
        })
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// The full assignment for `free_values`, if every pivot comes out a
    /// nonnegative integer.
    pub fn evaluate(&self, free_values: &[u64]) -> Option<Solution> {
        let mut presses = vec![0; self.variables];
        for (&var, &value) in self.free.iter().zip(free_values) {
            presses[var] = value;
        }
        for row in &self.rows {
            let numerator = row.rhs
                - row
                    .coeffs
                    .iter()
                    .zip(free_values)
                    .map(|(&c, &v)| c * i128::from(v))
                    .sum::<i128>();
            if numerator < 0 || numerator % self.denominator != 0 {
                return None;
            }
            presses[row.variable] = u64::try_from(numerator / self.denominator).ok()?;
        }
        Some(Solution { presses })
    }

    /// How far below zero the pivots fall with every free variable at zero,
    /// rounded up to whole presses.
    pub fn negative_slack(&self) -> u64 {
        self.rows
            .iter()
            .filter(|row| row.rhs < 0)
            .map(|row| Integer::div_ceil(&-row.rhs, &self.denominator))
            .max()
            .and_then(|slack| u64::try_from(slack).ok())
            .unwrap_or(0)
    }

    /// Fails unless every sum the searches form stays within `i128` for
    /// free values up to `value_bound` and press totals up to `ceiling`.
    fn check_range(&self, value_bound: u64, ceiling: u64) -> Result<(), MachineError> {
        let bound = i128::from(value_bound);
        let spread = |constant: i128, coeffs: &[i128]| -> Option<i128> {
            coeffs.iter().try_fold(constant.checked_abs()?, |acc, &c| {
                acc.checked_add(c.checked_abs()?.checked_mul(bound)?)
            })
        };

        let rows_fit = self
            .rows
            .iter()
            .all(|row| spread(row.rhs, &row.coeffs).is_some());
        let objective_fits = spread(self.base, &self.weights).is_some()
            && self.denominator.checked_mul(i128::from(ceiling)).is_some();
        if rows_fit && objective_fits {
            Ok(())
        } else {
            Err(MachineError::Overflow)
        }
    }
}

/// Most presses any valid assignment can total. Every press raises at least
/// one counter, and no button can be pressed more often than the smallest
/// target among its counters, so either sum caps the total.
fn press_ceiling(target: &[u64], caps: &[u64]) -> Result<u64, MachineError> {
    let by_counter: u128 = target.iter().map(|&t| u128::from(t)).sum();
    let by_button: u128 = caps.iter().map(|&c| u128::from(c)).sum();
    u64::try_from(by_counter.min(by_button)).map_err(|_| MachineError::Overflow)
}

/// Fewest presses for a joltage system using `strategy`.
///
/// `buttons` and `target` provide the bounds: the exact search caps each
/// free button at the smallest target among the counters it touches.
/// Machines whose totals or scaled sums could leave the integer range fail
/// with [`MachineError::Overflow`] before any search runs.
pub fn min_presses(
    form: &IntegerForm,
    buttons: &[Button],
    target: &[u64],
    strategy: Strategy,
) -> Result<Solution, MachineError> {
    let caps: Vec<u64> = buttons
        .iter()
        .map(|button| {
            button
                .counters()
                .iter()
                .map(|&c| target[c])
                .min()
                .unwrap_or(0)
        })
        .collect();
    let ceiling = press_ceiling(target, &caps)?;

    let free = form.free_count();
    if free == 0 {
        form.check_range(0, ceiling)?;
        return form
            .evaluate(&[])
            .ok_or(MachineError::NoAssignment { free });
    }

    let best = match strategy {
        Strategy::Exact => {
            let upper: Vec<u64> = form.free.iter().map(|&var| caps[var]).collect();
            form.check_range(upper.iter().copied().max().unwrap_or(0), ceiling)?;
            BranchAndBound::new(form, upper).run()
        }
        Strategy::Bounded { trials, seed } => {
            let max_target = target.iter().copied().max().unwrap_or(0);
            let bound = max_target
                .saturating_add(form.negative_slack())
                .saturating_add(1);
            form.check_range(bound, ceiling)?;

            let grid = u32::try_from(free)
                .ok()
                .and_then(|exp| bound.checked_pow(exp));
            if free <= Strategy::EXHAUSTIVE_FREE_LIMIT
                && grid.is_some_and(|cells| cells <= Strategy::EXHAUSTIVE_GRID_LIMIT)
            {
                exhaustive(form, bound)
            } else {
                tracing::warn!(
                    free,
                    bound,
                    trials,
                    seed,
                    "sampling free variables, result may not be minimal"
                );
                sampled(form, bound, trials, seed)
            }
        }
    };

    best.ok_or_else(|| {
        if let Strategy::Bounded { .. } = strategy {
            tracing::warn!(free, "no valid assignment within the search bound");
        }
        MachineError::NoAssignment { free }
    })
}

fn exhaustive(form: &IntegerForm, bound: u64) -> Option<Solution> {
    (0..form.free_count())
        .map(|_| 0..bound)
        .multi_cartesian_product()
        .filter_map(|values| form.evaluate(&values))
        .min_by_key(Solution::total)
}

fn sampled(form: &IntegerForm, bound: u64, trials: usize, seed: u64) -> Option<Solution> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut values = vec![0; form.free_count()];
    let mut best: Option<Solution> = None;

    // The all-zero assignment is the natural first guess
    if let Some(solution) = form.evaluate(&values) {
        best = Some(solution);
    }
    for _ in 0..trials {
        for value in values.iter_mut() {
            *value = rng.gen_range(0..bound);
        }
        if let Some(solution) = form.evaluate(&values)
            && best.as_ref().is_none_or(|b| solution.total() < b.total())
        {
            best = Some(solution);
        }
    }
    best
}

/// Depth-first search over free variables in `free` order.
///
/// A partial assignment is cut when some pivot can no longer reach zero
/// even with the remaining free variables at their most helpful bound, or
/// when the objective cannot drop below the incumbent.
struct BranchAndBound<'a> {
    form: &'a IntegerForm,
    upper: Vec<u64>,
    values: Vec<u64>,
    /// `D·total` of the incumbent
    best_scaled: i128,
    best: Option<Solution>,
}

impl<'a> BranchAndBound<'a> {
    fn new(form: &'a IntegerForm, upper: Vec<u64>) -> Self {
        Self {
            values: vec![0; upper.len()],
            form,
            upper,
            best_scaled: i128::MAX,
            best: None,
        }
    }

    fn run(mut self) -> Option<Solution> {
        self.descend(0);
        self.best
    }

    fn descend(&mut self, depth: usize) {
        if depth == self.values.len() {
            if let Some(solution) = self.form.evaluate(&self.values) {
                let scaled = i128::from(solution.total()) * self.form.denominator;
                if scaled < self.best_scaled {
                    self.best_scaled = scaled;
                    self.best = Some(solution);
                }
            }
            return;
        }

        for value in 0..=self.upper[depth] {
            self.values[depth] = value;
            if self.objective_floor(depth + 1) >= self.best_scaled {
                if self.form.weights[depth] >= 0 {
                    // the floor only grows with this variable
                    break;
                }
                continue;
            }
            if !self.pivots_reachable(depth + 1) {
                continue;
            }
            self.descend(depth + 1);
        }
        self.values[depth] = 0;
    }

    /// Lowest `D·total` any completion of the first `assigned` values can reach.
    fn objective_floor(&self, assigned: usize) -> i128 {
        let fixed: i128 = self.form.weights[..assigned]
            .iter()
            .zip(&self.values)
            .map(|(&w, &v)| w * i128::from(v))
            .sum();
        let open: i128 = self.form.weights[assigned..]
            .iter()
            .zip(&self.upper[assigned..])
            .filter(|(w, _)| **w < 0)
            .map(|(&w, &u)| w * i128::from(u))
            .sum();
        (self.form.base + fixed + open).max(0)
    }

    /// Whether every pivot numerator can still end up nonnegative.
    fn pivots_reachable(&self, assigned: usize) -> bool {
        self.form.rows.iter().all(|row| {
            let fixed: i128 = row.coeffs[..assigned]
                .iter()
                .zip(&self.values)
                .map(|(&c, &v)| c * i128::from(v))
                .sum();
            let open: i128 = row.coeffs[assigned..]
                .iter()
                .zip(&self.upper[assigned..])
                .filter(|(c, _)| **c < 0)
                .map(|(&c, &u)| c * i128::from(u))
                .sum();
            row.rhs - fixed - open >= 0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::field::Field;
    use super::super::machine::parse_machine;
    use super::super::system::LinearSystem;
    use super::*;

    fn form_for(line: &str) -> (IntegerForm, Vec<Button>, Vec<u64>) {
        let machine = parse_machine(line).unwrap();
        let target = machine.joltage.clone().unwrap();
        let system = LinearSystem::from_buttons(
            &machine.buttons,
            target.iter().map(|&t| BigRational::from_u64(t)).collect(),
        );
        let form = IntegerForm::new(&system.reduce().unwrap()).unwrap();
        (form, machine.buttons, target)
    }

    #[test]
    fn test_integer_form_objective_matches_total() {
        let (form, _, _) = form_for("(3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}");
        assert_eq!(form.free_count(), 2);
        for values in [[0, 0], [1, 2], [3, 0], [2, 3]] {
            if let Some(solution) = form.evaluate(&values) {
                let scaled = form.base
                    + form
                        .weights
                        .iter()
                        .zip(values)
                        .map(|(&w, v)| w * i128::from(v))
                        .sum::<i128>();
                assert_eq!(scaled, i128::from(solution.total()) * form.denominator);
            }
        }
    }

    #[test]
    fn test_evaluate_rejects_negative_pivots() {
        // x0 + x1 = 1 on one counter: x1 = 2 forces x0 = -1
        let (form, _, _) = form_for("(0) (0) {1}");
        assert_eq!(form.evaluate(&[0]).unwrap().presses, vec![1, 0]);
        assert!(form.evaluate(&[2]).is_none());
    }

    #[test]
    fn test_exact_matches_examples() {
        for (line, expected) in [
            ("(3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}", 10),
            ("(0,2,3,4) (2,3) (0,4) (0,1,2) (1,2,3,4) {7,5,12,7,2}", 12),
            ("(0,1,2,3,4) (0,3,4) (0,1,2,4,5) (1,2) {10,11,11,5,10,5}", 11),
        ] {
            let (form, buttons, target) = form_for(line);
            let solution = min_presses(&form, &buttons, &target, Strategy::Exact).unwrap();
            assert_eq!(solution.total(), expected, "{line}");
        }
    }

    #[test]
    fn test_bounded_matches_examples() {
        for (line, expected) in [
            ("(3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}", 10),
            ("(0,2,3,4) (2,3) (0,4) (0,1,2) (1,2,3,4) {7,5,12,7,2}", 12),
            ("(0,1,2,3,4) (0,3,4) (0,1,2,4,5) (1,2) {10,11,11,5,10,5}", 11),
        ] {
            let (form, buttons, target) = form_for(line);
            let solution = min_presses(&form, &buttons, &target, Strategy::bounded()).unwrap();
            assert_eq!(solution.total(), expected, "{line}");
        }
    }

    #[test]
    fn test_full_rank_skips_search() {
        let (form, buttons, target) = form_for("(0,1) (1) {2,5}");
        assert_eq!(form.free_count(), 0);
        let solution = min_presses(&form, &buttons, &target, Strategy::Exact).unwrap();
        assert_eq!(solution.presses, vec![2, 3]);
    }

    #[test]
    fn test_full_rank_negative_is_no_assignment() {
        // x0 = 5, x0 + x1 = 2 -> x1 = -3
        let (form, buttons, target) = form_for("(0,1) (1) {5,2}");
        let err = min_presses(&form, &buttons, &target, Strategy::Exact).unwrap_err();
        assert!(matches!(err, MachineError::NoAssignment { free: 0 }));
    }

    #[test]
    fn test_exact_prefers_cheaper_combination() {
        // (0,1,2) once beats (0),(1),(2) once each
        let (form, buttons, target) = form_for("(0) (1) (2) (0,1,2) {1,1,1}");
        let solution = min_presses(&form, &buttons, &target, Strategy::Exact).unwrap();
        assert_eq!(solution.total(), 1);
        assert_eq!(solution.presses, vec![0, 0, 0, 1]);
    }

    #[test]
    fn test_sampling_is_deterministic_for_seed() {
        // Five free variables force the sampling branch
        let line = "(0) (0) (0) (0) (0) (0) {6}";
        let (form, buttons, target) = form_for(line);
        assert_eq!(form.free_count(), 5);

        let strategy = Strategy::Bounded { trials: 500, seed: 42 };
        let first = min_presses(&form, &buttons, &target, strategy).unwrap();
        let second = min_presses(&form, &buttons, &target, strategy).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.total(), 6);
    }

    #[test]
    fn test_negative_slack() {
        // x0 + x1 = 1, x1 = 3 leaves x0 = -2
        let (form, _, _) = form_for("(0) (0,1) {1,3}");
        assert_eq!(form.free_count(), 0);
        assert_eq!(form.negative_slack(), 2);
        assert!(form.evaluate(&[]).is_none());

        let (form, _, _) = form_for("(0) (0) {3}");
        assert_eq!(form.negative_slack(), 0);
    }

    #[test]
    fn test_gf2_minimum_weight() {
        let machine = parse_machine("[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1)").unwrap();
        let target = machine.lights.unwrap().into_iter().map(Gf2).collect();
        let reduced = LinearSystem::from_buttons(&machine.buttons, target)
            .reduce()
            .unwrap();
        assert_eq!(min_weight_gf2(&reduced).total(), 2);
    }

    #[test]
    fn test_gf2_full_rank() {
        let machine = parse_machine("[#.] (0) (1)").unwrap();
        let target = machine.lights.unwrap().into_iter().map(Gf2).collect();
        let reduced = LinearSystem::from_buttons(&machine.buttons, target)
            .reduce()
            .unwrap();
        assert!(reduced.is_full_rank());
        assert_eq!(min_weight_gf2(&reduced).presses, vec![1, 0]);
    }

    #[test]
    fn test_press_ceiling_overflow() {
        // Full rank with presses u64::MAX and 1
        let (form, buttons, target) = form_for("(0) (1) {18446744073709551615,1}");
        for strategy in [Strategy::Exact, Strategy::bounded()] {
            let err = min_presses(&form, &buttons, &target, strategy).unwrap_err();
            assert_eq!(err, MachineError::Overflow);
        }

        // A shared button keeps the total at u64::MAX
        let (form, buttons, target) =
            form_for("(0,1) {18446744073709551615,18446744073709551615}");
        let solution = min_presses(&form, &buttons, &target, Strategy::Exact).unwrap();
        assert_eq!(solution.total(), u64::MAX);
    }

    #[test]
    fn test_huge_target_searches() {
        let (form, buttons, target) = form_for("(0) (0) {18446744073709551615}");
        assert_eq!(form.free_count(), 1);

        let exact = min_presses(&form, &buttons, &target, Strategy::Exact).unwrap();
        assert_eq!(exact.presses, vec![u64::MAX, 0]);

        // The grid is far too large to enumerate, so this samples
        let strategy = Strategy::Bounded { trials: 200, seed: 7 };
        let sampled = min_presses(&form, &buttons, &target, strategy).unwrap();
        assert_eq!(sampled.total(), u64::MAX);
    }

    #[test]
    fn test_check_range() {
        let (form, _, _) = form_for("(0) (0) {3}");
        assert!(form.check_range(u64::MAX, u64::MAX).is_ok());

        let wide = IntegerForm {
            denominator: i128::MAX / 2,
            ..form.clone()
        };
        assert_eq!(wide.check_range(0, 3), Err(MachineError::Overflow));
        assert!(wide.check_range(0, 1).is_ok());
    }
}
