//! Incidence system `A·x = b` for a machine and its Gauss-Jordan reduction.

use super::MachineError;
use super::field::Field;
use super::machine::Button;

/// `counters × buttons` incidence matrix with its right-hand side.
///
/// `matrix[i][j]` is one when button `j` touches counter `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem<F> {
    matrix: Vec<Vec<F>>,
    rhs: Vec<F>,
}

impl<F: Field> LinearSystem<F> {
    /// One row per entry of `target`, one column per button.
    pub fn from_buttons(buttons: &[Button], target: Vec<F>) -> Self {
        let matrix = (0..target.len())
            .map(|counter| {
                buttons
                    .iter()
                    .map(|button| {
                        if button.touches(counter) {
                            F::one()
                        } else {
                            F::zero()
                        }
                    })
                    .collect()
            })
            .collect();

        Self {
            matrix,
            rhs: target,
        }
    }

    pub fn counters(&self) -> usize {
        self.rhs.len()
    }

    pub fn variables(&self) -> usize {
        self.matrix.first().map_or(0, Vec::len)
    }

    pub fn matrix(&self) -> &[Vec<F>] {
        &self.matrix
    }

    pub fn rhs(&self) -> &[F] {
        &self.rhs
    }

    /// Reduce `[A|b]` to reduced row-echelon form.
    ///
    /// Columns are scanned left to right; the pivot is the first nonzero
    /// entry at or below the current rank row. The pivot row is scaled to
    /// a leading one and the column is cleared from every other row, above
    /// and below. Fails with [`MachineError::Inconsistent`] when a row past
    /// the rank still has a nonzero right-hand side.
    pub fn reduce(self) -> Result<Reduced<F>, MachineError> {
        let variables = self.variables();
        let rows = self.counters();
        let LinearSystem {
            mut matrix,
            mut rhs,
        } = self;

        let mut pivot_row = vec![None; variables];
        let mut rank = 0;

        for col in 0..variables {
            if rank == rows {
                break;
            }
            let Some(found) = (rank..rows).find(|&r| !matrix[r][col].is_zero()) else {
                continue;
            };
            matrix.swap(rank, found);
            rhs.swap(rank, found);

            let scale = matrix[rank][col].inv();
            for value in matrix[rank].iter_mut() {
                *value = value.mul(&scale);
            }
            rhs[rank] = rhs[rank].mul(&scale);

            let pivot = matrix[rank].clone();
            let pivot_rhs = rhs[rank].clone();
            for r in (0..rows).filter(|&r| r != rank) {
                let factor = matrix[r][col].clone();
                if factor.is_zero() {
                    continue;
                }
                for (value, p) in matrix[r].iter_mut().zip(&pivot) {
                    *value = value.sub(&factor.mul(p));
                }
                rhs[r] = rhs[r].sub(&factor.mul(&pivot_rhs));
            }

            pivot_row[col] = Some(rank);
            rank += 1;
        }

        if let Some(row) = (rank..rows).find(|&r| !rhs[r].is_zero()) {
            return Err(MachineError::Inconsistent { row });
        }

        let free = (0..variables).filter(|&v| pivot_row[v].is_none()).collect();

        Ok(Reduced {
            matrix,
            rhs,
            pivot_row,
            rank,
            free,
        })
    }
}

/// A consistent system in reduced row-echelon form.
#[derive(Debug, Clone, PartialEq)]
pub struct Reduced<F> {
    pub matrix: Vec<Vec<F>>,
    pub rhs: Vec<F>,
    /// Per variable: the row holding its pivot, `None` for free variables
    pub pivot_row: Vec<Option<usize>>,
    pub rank: usize,
    /// Variables without a pivot, ascending
    pub free: Vec<usize>,
}

impl<F: Field> Reduced<F> {
    pub fn variables(&self) -> usize {
        self.pivot_row.len()
    }

    pub fn is_full_rank(&self) -> bool {
        self.free.is_empty()
    }

    /// Full assignment for the given free-variable values (in `free` order).
    ///
    /// Each pivot variable gets `b[r] − Σ_{j≠i} A[r][j]·x[j]`.
    pub fn back_substitute(&self, free_values: &[F]) -> Vec<F> {
        debug_assert_eq!(free_values.len(), self.free.len());

        let mut x = vec![F::zero(); self.variables()];
        for (&var, value) in self.free.iter().zip(free_values) {
            x[var] = value.clone();
        }
        for (var, row) in self.pivot_row.iter().enumerate() {
            let Some(row) = *row else { continue };
            let mut value = self.rhs[row].clone();
            for (j, coeff) in self.matrix[row].iter().enumerate() {
                if j != var && !coeff.is_zero() {
                    value = value.sub(&coeff.mul(&x[j]));
                }
            }
            x[var] = value;
        }
        x
    }
}
