//! svar::cholesky — recursive (Cholesky) benchmark impulse responses.
//!
//! Purpose
//! -------
//! Provide the recursively identified responses to the first orthogonal
//! shock, normalized in the same way as the SVAR-IV responses, for visual
//! comparison.
//!
//! Key behaviors
//! -------------
//! - Factor `Σ = LL'` and take the first column of `L`.
//! - Rescale it as `col / col[n] · x`, so the horizon-0 response of the
//!   normalization variable equals `x` exactly.
//! - Responses are `C[h]·col` and `Ccum[h]·col`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `Σ` is symmetric positive definite; otherwise
//!   `SvarError::NotPositiveDefinite`.
//! - `col[n] ≠ 0`; otherwise `SvarError::ZeroCholeskyEntry`. The engine
//!   treats that case as a benchmark-only failure and reports
//!   [`CholeskyBenchmark::undefined`].
use crate::{
    linalg::{SYMMETRY_TOL, cholesky_lower, is_symmetric},
    svar::errors::{SvarError, SvarResult},
    var::tensor::MaTensor,
};
use ndarray::{Array1, Array2};

/// CholeskyBenchmark — level and cumulative responses, `n × (H + 1)` each.
#[derive(Debug, Clone, PartialEq)]
pub struct CholeskyBenchmark {
    /// Rescaled impulse vector, length `n`.
    pub impulse: Array1<f64>,
    pub levels: Array2<f64>,
    pub cumulative: Array2<f64>,
}

impl CholeskyBenchmark {
    /// Benchmark whose impulse and responses are all NaN, `n × width`.
    ///
    /// Stands in for a benchmark that cannot be normalized on the chosen
    /// variable, so the shapes seen by reporting layers do not change.
    pub fn undefined(n_vars: usize, width: usize) -> CholeskyBenchmark {
        CholeskyBenchmark {
            impulse: Array1::from_elem(n_vars, f64::NAN),
            levels: Array2::from_elem((n_vars, width), f64::NAN),
            cumulative: Array2::from_elem((n_vars, width), f64::NAN),
        }
    }
}

/// Build the Cholesky benchmark.
///
/// Parameters
/// ----------
/// - `sigma`: residual covariance, `n × n`.
/// - `ma`: MA tensor `C[0..=H]`.
/// - `norm_index`: 0-based normalization variable.
/// - `scale`: target horizon-0 response `x`.
///
/// Errors
/// ------
/// - `SvarError::NotPositiveDefinite { what: "Sigma" }` when `sigma` is
///   asymmetric or not positive definite.
/// - `SvarError::ZeroCholeskyEntry` (reported 1-based).
pub fn cholesky_benchmark(
    sigma: &Array2<f64>, ma: &MaTensor, norm_index: usize, scale: f64,
) -> SvarResult<CholeskyBenchmark> {
    if !is_symmetric(sigma, SYMMETRY_TOL) {
        return Err(SvarError::NotPositiveDefinite { what: "Sigma" });
    }
    let lower = cholesky_lower(sigma).ok_or(SvarError::NotPositiveDefinite { what: "Sigma" })?;
    let column = lower.column(0);
    let pivot = column[norm_index];
    if pivot == 0.0 {
        return Err(SvarError::ZeroCholeskyEntry { norm_var: norm_index + 1 });
    }
    let impulse = column.mapv(|v| v / pivot * scale);

    let n = sigma.nrows();
    let width = ma.len();
    let mut levels = Array2::<f64>::zeros((n, width));
    let mut cumulative = Array2::<f64>::zeros((n, width));
    for h in 0..width {
        levels.column_mut(h).assign(&ma.at(h, false).dot(&impulse));
        cumulative.column_mut(h).assign(&ma.at(h, true).dot(&impulse));
    }
    Ok(CholeskyBenchmark { impulse, levels, cumulative })
}
