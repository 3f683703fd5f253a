//! linalg — `ndarray` ↔ `nalgebra` bridge for small dense factorizations.
//!
//! Purpose
//! -------
//! Arrays live in `ndarray` throughout the crate; factorizations (Cholesky,
//! LU) are delegated to `nalgebra`. This module copies between the two
//! representations and wraps the handful of factorizations the crate needs
//! so that callers receive `Option`s rather than panics on degenerate input.
//!
//! Conventions
//! -----------
//! - Copies are explicit and column-major on the `nalgebra` side.
//! - `None` signals a failed factorization (not positive definite or
//!   singular); callers map it onto their own error types.
use nalgebra::{Cholesky, DMatrix, DVector, Dyn};
use ndarray::{Array1, Array2};

/// Copy an `ndarray` matrix into a freshly allocated `DMatrix`.
pub(crate) fn to_dmatrix(a: &Array2<f64>) -> DMatrix<f64> {
    let (rows, cols) = a.dim();
    let mut out = DMatrix::<f64>::zeros(rows, cols);
    for j in 0..cols {
        for i in 0..rows {
            out[(i, j)] = a[[i, j]];
        }
    }
    out
}

/// Copy a `DMatrix` back into an `ndarray` matrix.
pub(crate) fn to_array2(a: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn((a.nrows(), a.ncols()), |(i, j)| a[(i, j)])
}

/// Relative tolerance used when checking covariance matrices for symmetry.
pub(crate) const SYMMETRY_TOL: f64 = 1e-10;

/// Whether a square matrix is symmetric up to `rel_tol · max|aᵢⱼ|`.
///
/// Non-square matrices and matrices with NaN entries are not symmetric.
pub(crate) fn is_symmetric(a: &Array2<f64>, rel_tol: f64) -> bool {
    if !a.is_square() {
        return false;
    }
    let scale = a.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    let tol = rel_tol * scale;
    a.indexed_iter().all(|((i, j), &v)| (v - a[[j, i]]).abs() <= tol)
}

/// Lower Cholesky factor `L` with `A = L Lᵀ`, or `None` if `A` is not
/// positive definite.
///
/// Only the lower triangle of `a` is read by `nalgebra`; check
/// [`is_symmetric`] first when the input is untrusted.
pub(crate) fn cholesky_lower(a: &Array2<f64>) -> Option<Array2<f64>> {
    let chol = factor_spd(a)?;
    Some(to_array2(&chol.l()))
}

/// Inverse of a symmetric positive-definite matrix via Cholesky.
pub(crate) fn spd_inverse(a: &Array2<f64>) -> Option<Array2<f64>> {
    let chol = factor_spd(a)?;
    Some(to_array2(&chol.inverse()))
}

// ---- Helper methods ----

/// Cholesky factorization that also rejects zero or non-finite pivots.
fn factor_spd(a: &Array2<f64>) -> Option<Cholesky<f64, Dyn>> {
    let chol = to_dmatrix(a).cholesky()?;
    let l = chol.l_dirty();
    let pivots_ok = (0..l.nrows()).all(|i| {
        let d = l[(i, i)];
        d.is_finite() && d > 0.0
    });
    if pivots_ok { Some(chol) } else { None }
}

/// Solve `A x = b` for square `A` via LU with partial pivoting.
///
/// Returns `None` when `A` is numerically singular (LU reports failure or
/// the solution is not finite).
pub(crate) fn solve(a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    let rhs = DVector::from_iterator(b.len(), b.iter().copied());
    let x = to_dmatrix(a).lu().solve(&rhs)?;
    if x.iter().all(|v| v.is_finite()) {
        Some(Array1::from_iter(x.iter().copied()))
    } else {
        None
    }
}
