//! Minimum-cost assignment (Hungarian / Munkres-Kuhn algorithm).
//!
//! ## Purpose
//!
//! This module solves the linear assignment problem: given a cost matrix of
//! `rows × cols`, pick one column per row (each column at most once) so the
//! total cost is minimal. Tracking code feeds it track-to-detection distances.
//!
//! ## Design notes
//!
//! * **Copy, never alias**: The caller's matrix is copied into a square
//!   `nalgebra::DMatrix`, padded with the largest cost so padding is never
//!   preferred over a genuine assignment.
//! * **State machine**: The solver is an explicit [`Step`] cursor plus typed
//!   star / prime / cover arrays; [`HungarianSolver::step`] advances one state.
//! * **No iteration cap**: Termination follows from the Munkres proof for
//!   finite costs; inputs are validated to be finite.
//!
//! ## Key concepts
//!
//! * **Starred zero**: A zero belonging to the current partial matching.
//! * **Primed zero**: A candidate zero found while searching for an
//!   augmenting path.
//! * **Augmenting path**: Alternating primes and stars that, once flipped,
//!   grow the matching by one.
//!
//! ## Invariants
//!
//! * Each row and each column holds at most one star.
//! * The working matrix stays non-negative after the row reduction.
//! * For square input every row receives a distinct column.
//!
//! ## Non-goals
//!
//! * Maximization (negate the costs instead).
//! * Cancellation of a running solve.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use nalgebra::DMatrix;

// Internal dependencies
use crate::primitives::errors::NumericError;
use crate::primitives::validator::Validator;

// ============================================================================
// Solver State
// ============================================================================

/// Position of the solver in the Munkres state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Subtract each row minimum from its row.
    ReduceRows,

    /// Star one independent zero per row where possible.
    StarZeros,

    /// Cover the columns of all stars; finish once enough are covered.
    CoverStarredColumns,

    /// Prime uncovered zeros, growing the alternating tree.
    PrimeZeros,

    /// Flip the alternating path that ends at the given primed zero.
    Augment {
        /// Row of the primed zero that starts the path.
        row: usize,
        /// Column of the primed zero that starts the path.
        col: usize,
    },

    /// Shift costs by the smallest uncovered value.
    AdjustCosts,

    /// The matching is optimal.
    Done,
}

/// Hungarian algorithm over a (padded) square cost matrix.
#[derive(Debug, Clone)]
pub struct HungarianSolver {
    costs: DMatrix<f64>,
    num_rows: usize,
    num_cols: usize,
    star_in_row: Vec<Option<usize>>,
    star_in_col: Vec<Option<usize>>,
    prime_in_row: Vec<Option<usize>>,
    row_covered: Vec<bool>,
    col_covered: Vec<bool>,
    step: Step,
    iterations: usize,
}

impl HungarianSolver {
    /// Create a solver from a row-major cost matrix.
    ///
    /// # Errors
    ///
    /// * [`NumericError::EmptyInput`] for a matrix without rows or columns.
    /// * [`NumericError::RaggedMatrix`] when rows differ in length.
    /// * [`NumericError::InvalidNumericValue`] for NaN or infinite costs.
    pub fn new(cost_matrix: &[Vec<f64>]) -> Result<Self, NumericError> {
        let num_cols = Validator::validate_cost_matrix(cost_matrix)?;
        let num_rows = cost_matrix.len();
        let matrix = DMatrix::from_fn(num_rows, num_cols, |r, c| cost_matrix[r][c]);
        Ok(Self::from_validated(matrix))
    }

    /// Create a solver from an `nalgebra` matrix (copied).
    ///
    /// # Errors
    ///
    /// Same as [`HungarianSolver::new`].
    pub fn from_matrix(cost_matrix: &DMatrix<f64>) -> Result<Self, NumericError> {
        if cost_matrix.nrows() == 0 || cost_matrix.ncols() == 0 {
            return Err(NumericError::EmptyInput);
        }
        for &v in cost_matrix.iter() {
            Validator::validate_scalar(v, "cost")?;
        }
        Ok(Self::from_validated(cost_matrix.clone()))
    }

    fn from_validated(matrix: DMatrix<f64>) -> Self {
        let (num_rows, num_cols) = matrix.shape();
        let n = num_rows.max(num_cols);
        let filler = matrix.max();
        let costs = DMatrix::from_fn(n, n, |r, c| {
            if r < num_rows && c < num_cols {
                matrix[(r, c)]
            } else {
                filler
            }
        });
        Self {
            costs,
            num_rows,
            num_cols,
            star_in_row: vec![None; n],
            star_in_col: vec![None; n],
            prime_in_row: vec![None; n],
            row_covered: vec![false; n],
            col_covered: vec![false; n],
            step: Step::ReduceRows,
            iterations: 0,
        }
    }

    // ========================================================================
    // Driver
    // ========================================================================

    /// Run the state machine to completion and return the assignment.
    pub fn resolve(mut self) -> Assignment {
        while self.step != Step::Done {
            self.step();
        }
        tracing::debug!(
            rows = self.num_rows,
            cols = self.num_cols,
            iterations = self.iterations,
            "assignment solved"
        );
        self.assignment()
    }

    /// Advance one state and return the new state.
    pub fn step(&mut self) -> Step {
        self.iterations += 1;
        let next = match self.step {
            Step::ReduceRows => self.reduce_rows(),
            Step::StarZeros => self.star_zeros(),
            Step::CoverStarredColumns => self.cover_starred_columns(),
            Step::PrimeZeros => self.prime_zeros(),
            Step::Augment { row, col } => self.augment(row, col),
            Step::AdjustCosts => self.adjust_costs(),
            Step::Done => Step::Done,
        };
        tracing::trace!(from = ?self.step, to = ?next, "munkres step");
        self.step = next;
        next
    }

    /// Current state.
    pub fn current_step(&self) -> Step {
        self.step
    }

    /// Side length of the padded working matrix.
    pub fn dimension(&self) -> usize {
        self.costs.nrows()
    }

    /// Assignment implied by the current stars (complete once `Done`).
    pub fn assignment(&self) -> Assignment {
        let columns = self.star_in_row[..self.num_rows]
            .iter()
            .map(|c| c.unwrap_or(usize::MAX))
            .collect();
        Assignment {
            columns,
            num_cols: self.num_cols,
        }
    }

    // ========================================================================
    // Steps
    // ========================================================================

    fn reduce_rows(&mut self) -> Step {
        for mut row in self.costs.row_iter_mut() {
            let min = row.min();
            row.iter_mut().for_each(|v| *v -= min);
        }
        Step::StarZeros
    }

    fn star_zeros(&mut self) -> Step {
        let n = self.dimension();
        for r in 0..n {
            for c in 0..n {
                if self.costs[(r, c)] == 0.0
                    && self.star_in_row[r].is_none()
                    && self.star_in_col[c].is_none()
                {
                    self.star_in_row[r] = Some(c);
                    self.star_in_col[c] = Some(r);
                }
            }
        }
        Step::CoverStarredColumns
    }

    fn cover_starred_columns(&mut self) -> Step {
        let mut covered = 0;
        for (c, star) in self.star_in_col.iter().enumerate() {
            if star.is_some() {
                self.col_covered[c] = true;
                covered += 1;
            }
        }
        if covered >= self.dimension() {
            Step::Done
        } else {
            Step::PrimeZeros
        }
    }

    fn prime_zeros(&mut self) -> Step {
        let n = self.dimension();
        let mut c = 0;
        while c < n {
            if self.col_covered[c] {
                c += 1;
                continue;
            }
            match self.uncovered_zero_in_col(c) {
                None => c += 1,
                Some(r) => {
                    self.prime_in_row[r] = Some(c);
                    match self.star_in_row[r] {
                        None => return Step::Augment { row: r, col: c },
                        Some(star_col) => {
                            self.row_covered[r] = true;
                            self.col_covered[star_col] = false;
                            // The freshly uncovered column may hold zeros we
                            // already scanned past.
                            if star_col < c {
                                c = star_col;
                            }
                        }
                    }
                }
            }
        }
        Step::AdjustCosts
    }

    fn uncovered_zero_in_col(&self, c: usize) -> Option<usize> {
        (0..self.dimension()).find(|&r| !self.row_covered[r] && self.costs[(r, c)] == 0.0)
    }

    fn augment(&mut self, row: usize, col: usize) -> Step {
        let mut path = vec![(row, col)];
        let mut c = col;
        while let Some(r) = self.star_in_col[c] {
            path.push((r, c));
            // Every starred row on the path was covered while priming, so it
            // carries a prime.
            c = match self.prime_in_row[r] {
                Some(pc) => pc,
                None => break,
            };
            path.push((r, c));
        }

        for &(r, c) in path.iter() {
            if self.star_in_row[r] == Some(c) {
                self.star_in_row[r] = None;
                self.star_in_col[c] = None;
            }
        }
        for &(r, c) in path.iter() {
            if self.prime_in_row[r] == Some(c) {
                self.star_in_row[r] = Some(c);
                self.star_in_col[c] = Some(r);
            }
        }

        self.prime_in_row.iter_mut().for_each(|p| *p = None);
        self.row_covered.iter_mut().for_each(|v| *v = false);
        self.col_covered.iter_mut().for_each(|v| *v = false);
        Step::CoverStarredColumns
    }

    fn adjust_costs(&mut self) -> Step {
        let n = self.dimension();
        let mut min = f64::INFINITY;
        for r in (0..n).filter(|&r| !self.row_covered[r]) {
            for c in (0..n).filter(|&c| !self.col_covered[c]) {
                min = min.min(self.costs[(r, c)]);
            }
        }
        for r in 0..n {
            for c in 0..n {
                match (self.row_covered[r], self.col_covered[c]) {
                    (false, false) => self.costs[(r, c)] -= min,
                    (true, true) => self.costs[(r, c)] += min,
                    _ => {}
                }
            }
        }
        Step::PrimeZeros
    }
}

// ============================================================================
// Result
// ============================================================================

/// Row-to-column assignment produced by [`HungarianSolver::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    columns: Vec<usize>,
    num_cols: usize,
}

impl Assignment {
    /// Column assigned to each original row.
    ///
    /// Entries `>= num_cols()` designate padding columns, meaning the row is
    /// effectively unassigned; callers filter them.
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    /// Column count of the original matrix.
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Column of `row`, or `None` when it was matched to padding.
    pub fn column_of(&self, row: usize) -> Option<usize> {
        self.columns
            .get(row)
            .copied()
            .filter(|&c| c < self.num_cols)
    }

    /// `(row, column)` pairs with padding filtered out.
    pub fn matched_pairs(&self) -> Vec<(usize, usize)> {
        self.columns
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c < self.num_cols)
            .map(|(r, &c)| (r, c))
            .collect()
    }

    /// Total cost of the matched pairs in `cost_matrix`.
    pub fn total_cost(&self, cost_matrix: &[Vec<f64>]) -> f64 {
        self.matched_pairs()
            .into_iter()
            .map(|(r, c)| cost_matrix[r][c])
            .sum()
    }

    /// Consume into the raw column vector.
    pub fn into_columns(self) -> Vec<usize> {
        self.columns
    }
}

/// Solve the assignment problem for a row-major cost matrix.
///
/// # Errors
///
/// Same as [`HungarianSolver::new`].
pub fn solve(cost_matrix: &[Vec<f64>]) -> Result<Assignment, NumericError> {
    Ok(HungarianSolver::new(cost_matrix)?.resolve())
}
