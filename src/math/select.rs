//! Rank selection (k-th smallest element) by in-place partitioning.
//!
//! ## Purpose
//!
//! This module finds the k-th order statistic of an unsorted slice without
//! sorting it. It backs the median and MAD computations.
//!
//! ## Design notes
//!
//! * **Algorithm**: Quickselect with median-of-three pivoting, in the classic
//!   Numerical Recipes formulation using 1-based ranks.
//! * **Destructive**: The slice is partially reordered; copy first if the
//!   original order matters.
//!
//! ## Invariants
//!
//! After `select(k, data)`:
//! * `data[k - 1]` is the k-th smallest value.
//! * Every element before index `k - 1` is `<=` it.
//! * Every element after index `k - 1` is `>=` it.
//!
//! ## Non-goals
//!
//! * Stability or full sorting of either side.
//! * NaN ordering (NaN inputs give an unspecified permutation).

// Internal dependencies
use crate::primitives::errors::NumericError;
use crate::primitives::validator::Validator;

/// Return the `k`-th smallest element (1-based) and partition `data` around it.
///
/// # Errors
///
/// [`NumericError::InvalidRank`] when `k` is not in `[1, data.len()]`.
pub fn select<T: PartialOrd + Copy>(k: usize, data: &mut [T]) -> Result<T, NumericError> {
    let n = data.len();
    Validator::validate_rank(k, n)?;

    // 1-based bounds of the active window; element `i` lives at `data[i - 1]`.
    let mut l = 1usize;
    let mut ir = n;

    loop {
        if ir <= l + 1 {
            // One or two elements left.
            if ir == l + 1 && data[ir - 1] < data[l - 1] {
                data.swap(l - 1, ir - 1);
            }
            return Ok(data[k - 1]);
        }

        // Median of data[l], data[l+1], data[ir]; the pivot goes to l+1 and
        // the outer two act as sentinels for the scans below.
        let mid = (l + ir) >> 1;
        data.swap(mid - 1, l);
        if data[l - 1] > data[ir - 1] {
            data.swap(l - 1, ir - 1);
        }
        if data[l] > data[ir - 1] {
            data.swap(l, ir - 1);
        }
        if data[l - 1] > data[l] {
            data.swap(l - 1, l);
        }

        let mut i = l + 1;
        let mut j = ir;
        let pivot = data[l];
        loop {
            i += 1;
            while data[i - 1] < pivot {
                i += 1;
            }
            j -= 1;
            while data[j - 1] > pivot {
                j -= 1;
            }
            if j < i {
                break;
            }
            data.swap(i - 1, j - 1);
        }
        data[l] = data[j - 1];
        data[j - 1] = pivot;

        if j >= k {
            ir = j - 1;
        }
        if j <= k {
            l = i;
        }
    }
}
