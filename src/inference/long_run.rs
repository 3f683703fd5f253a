//! inference::long_run — long-run covariance of per-observation moments.
//!
//! Purpose
//! -------
//! Build the asymptotic covariance matrix `Ŵ` of a sample average of
//! per-observation moment contributions. In SVAR-IV inference the moments
//! are the influence contributions of `(vec(A), Γ)`, so that
//! `√T (θ̂ − θ) →d N(0, Ŵ)`. The estimator has the form
//!
//! ```text
//! Ŵ  =  Γ₀  +  ∑_{k=1}^{L} w_k ( Γ_k + Γ_kᵀ ),
//! Γ₀ = (1/T) Mᵀ M,
//! Γ_k = c_k · M_{k:}ᵀ M_{:T−k},
//! ```
//!
//! where `M` is the `T×m` moment matrix (rows=time, cols=moments), `w_k`
//! are kernel weights, and `L` is the bandwidth. The scaling `c_k` is
//!
//! - small-sample correction **on**:  `c_k = 1/(T − k)`,
//! - small-sample correction **off**: `c_k = 1/T`.
//!
//! Key behaviors
//! -------------
//! - Aggregate moment contributions into a symmetric `m×m` covariance on
//!   the *average-moment* scale.
//! - Support the IID outer product (`L = 0`) and kernel-weighted long-run
//!   estimators with a configurable bandwidth, centering, and
//!   small-sample correction.
//! - Validate the moment matrix (non-empty, finite) before aggregating.
//!
//! Invariants & assumptions
//! ------------------------
//! - Bandwidth is always truncated to `L ≤ T−1`, so no lag exceeds the
//!   available sample length.
//! - The taper argument is `x = k/(L+1)` so that `x ∈ [0,1)` even at the
//!   maximum lag `k = L`.
//!
//! Downstream usage
//! ----------------
//! - `var::estimate` stacks the per-observation moments of the
//!   reduced-form estimator and calls [`long_run_covariance`] to obtain
//!   `Ŵ`, which is stored on the `ReducedFormModel`.
use crate::inference::{
    errors::{InferenceError, InferenceResult},
    kernel::KernelType,
};
use ndarray::{Array2, Axis, s};
use std::{borrow::Cow, cmp::min};

/// LongRunOptions — configuration for long-run moment covariance estimation.
///
/// Fields
/// ------
/// - `kernel`: [`KernelType`]
///   Taper family controlling `w_k`.
/// - `bandwidth`: `usize`
///   Lag truncation `L`; truncated to `T−1` at compute time. `0` gives the
///   IID outer product regardless of the kernel.
/// - `center`: `bool`
///   Demean moment columns before aggregation.
/// - `small_sample_correction`: `bool`
///   Use `c_k = 1/(T−k)` instead of `c_k = 1/T` for `k ≥ 1`.
///
/// Notes
/// -----
/// - The `Default` configuration is Bartlett with `L = 0`, no centering,
///   and no small-sample correction, which reproduces the usual
///   heteroskedasticity-robust covariance of the moment vector.
#[derive(Debug, Clone, PartialEq)]
pub struct LongRunOptions {
    /// Kernel type for the long-run estimator.
    pub kernel: KernelType,
    /// Lag truncation.
    pub bandwidth: usize,
    /// Center moment columns before aggregation.
    pub center: bool,
    /// Apply finite-sample scaling to the autocovariance terms.
    pub small_sample_correction: bool,
}

impl LongRunOptions {
    /// Construct a `LongRunOptions` value from explicit settings.
    ///
    /// This constructor performs no validation; the bandwidth is clamped to
    /// `T−1` inside [`long_run_covariance`].
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_svar_iv::inference::{KernelType, LongRunOptions};
    /// let opts = LongRunOptions::new(4, KernelType::Bartlett, false, true);
    /// assert_eq!(opts.bandwidth, 4);
    /// ```
    pub fn new(
        bandwidth: usize, kernel: KernelType, center: bool, small_sample_correction: bool,
    ) -> LongRunOptions {
        LongRunOptions { kernel, bandwidth, center, small_sample_correction }
    }
}

impl Default for LongRunOptions {
    fn default() -> Self {
        Self {
            kernel: KernelType::Bartlett,
            bandwidth: 0,
            center: false,
            small_sample_correction: false,
        }
    }
}

/// Build an `m×m` long-run covariance matrix of average moment contributions.
///
/// Parameters
/// ----------
/// - `opts`: `&LongRunOptions`
///   Kernel, bandwidth, centering, and small-sample policy.
/// - `raw_moments`: `&Array2<f64>`
///   `T×m` matrix of per-observation moment contributions (rows=time).
///
/// Returns
/// -------
/// `InferenceResult<Array2<f64>>`
///   A symmetric `m×m` covariance matrix on the *average-moment* scale.
///
/// Errors
/// ------
/// - `InferenceError::EmptyMoments`
///   Returned when `raw_moments` has zero rows or zero columns.
/// - `InferenceError::NonFiniteMoment`
///   Returned for the first NaN/±inf entry encountered (row-major scan).
///
/// Notes
/// -----
/// - With an effective bandwidth `L = 0`, this reduces to `(1/T) MᵀM`.
/// - When `opts.center = true`, centering is applied once via `Cow`.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rust_svar_iv::inference::{LongRunOptions, long_run_covariance};
/// let moments = array![[1.0, -1.0], [0.5, 0.0], [-1.5, 1.0]];
/// let cov = long_run_covariance(&LongRunOptions::default(), &moments).unwrap();
/// assert_eq!(cov.dim(), (2, 2));
/// ```
pub fn long_run_covariance(
    opts: &LongRunOptions, raw_moments: &Array2<f64>,
) -> InferenceResult<Array2<f64>> {
    validate_moments(raw_moments)?;
    let n = raw_moments.nrows();
    let m = raw_moments.ncols();

    let moments: Cow<'_, Array2<f64>> = if opts.center {
        match raw_moments.mean_axis(Axis(0)) {
            Some(col_means) => Cow::Owned(raw_moments - &col_means),
            None => Cow::Borrowed(raw_moments),
        }
    } else {
        Cow::Borrowed(raw_moments)
    };

    let bandwidth = min(opts.bandwidth, n - 1);

    let mut cov = Array2::<f64>::zeros((m, m));
    for lag in 0..=bandwidth {
        add_autocovariance(&mut cov, moments.as_ref(), lag, bandwidth, opts);
    }
    Ok(cov)
}

// ---- Helper methods ----

fn validate_moments(raw_moments: &Array2<f64>) -> InferenceResult<()> {
    let (rows, cols) = raw_moments.dim();
    if rows == 0 || cols == 0 {
        return Err(InferenceError::EmptyMoments { rows, cols });
    }
    for ((row, col), &value) in raw_moments.indexed_iter() {
        if !value.is_finite() {
            return Err(InferenceError::NonFiniteMoment { row, col, value });
        }
    }
    Ok(())
}

fn add_autocovariance(
    cov: &mut Array2<f64>, moments: &Array2<f64>, lag: usize, bandwidth: usize,
    opts: &LongRunOptions,
) {
    let n = moments.nrows();
    if lag == 0 {
        cov.scaled_add(1.0 / (n as f64), &moments.t().dot(moments));
        return;
    }
    let weight = opts.kernel.weight(lag as f64 / (bandwidth + 1) as f64);
    let scale = if opts.small_sample_correction {
        1.0 / ((n - lag) as f64)
    } else {
        1.0 / (n as f64)
    };
    let lagged = moments.slice(s![lag.., ..]);
    let leading = moments.slice(s![..n - lag, ..]);
    let gamma_k = lagged.t().dot(&leading) * scale;
    cov.scaled_add(weight, &gamma_k);
    cov.scaled_add(weight, &gamma_k.t());
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Reduction to the IID outer product when L = 0.
    // - Symmetry of the long-run estimate with a nontrivial kernel.
    // - Invariance to centering when moment columns are exactly mean-zero.
    // - Hand-computed Bartlett estimate with L = 1.
    // - Validation failures for empty and non-finite moment matrices.
    // -------------------------------------------------------------------------

    const TOL: f64 = 1e-12;

    fn assert_matrices_close(a: &Array2<f64>, b: &Array2<f64>, tol: f64) {
        assert_eq!(a.shape(), b.shape(), "shape mismatch: {:?} vs {:?}", a.shape(), b.shape());
        for ((i, j), &v) in a.indexed_iter() {
            assert_relative_eq!(v, b[[i, j]], epsilon = tol, max_relative = tol);
        }
    }

    #[test]
    // Purpose
    // -------
    // With bandwidth zero the estimator must equal (1/T) MᵀM.
    //
    // Given
    // -----
    // - A 3×2 moment matrix and the default options (L = 0).
    //
    // Expect
    // ------
    // - The result matches the outer-product formula entrywise.
    fn long_run_covariance_with_zero_bandwidth_is_outer_product() {
        // Arrange
        let m = array![[1.0, -1.0], [0.5, 0.0], [-1.5, 1.0]];
        let expected = m.t().dot(&m) / 3.0;

        // Act
        let cov = long_run_covariance(&LongRunOptions::default(), &m).unwrap();

        // Assert
        assert_matrices_close(&cov, &expected, TOL);
    }

    #[test]
    // Purpose
    // -------
    // Check a hand-computed Bartlett estimate with one lag.
    //
    // Given
    // -----
    // - A univariate moment series [1, -1, 2] (T = 3), L = 1, no
    //   small-sample correction.
    //
    // Expect
    // ------
    // - Γ₀ = (1 + 1 + 4)/3 = 2, Γ₁ = (−1·1 + 2·−1)/3 = −1, w₁ = 1 − 1/2.
    // - Ŵ = 2 + 0.5·(−1 − 1) = 1.
    fn long_run_covariance_matches_hand_computed_bartlett() {
        // Arrange
        let m = array![[1.0], [-1.0], [2.0]];
        let opts = LongRunOptions::new(1, KernelType::Bartlett, false, false);

        // Act
        let cov = long_run_covariance(&opts, &m).unwrap();

        // Assert
        assert_relative_eq!(cov[[0, 0]], 1.0, epsilon = TOL);
    }

    #[test]
    // Purpose
    // -------
    // The long-run estimate must be symmetric and unaffected by centering
    // when the columns are already mean-zero.
    //
    // Given
    // -----
    // - A 4×2 moment matrix with mean-zero columns, Parzen kernel, L = 2.
    //
    // Expect
    // ------
    // - Ŵ = Ŵᵀ.
    // - Centered and uncentered estimates agree.
    fn long_run_covariance_is_symmetric_and_centering_invariant_for_mean_zero_columns() {
        // Arrange
        let m = array![[1.0, 0.5], [-2.0, 1.0], [0.5, -0.5], [0.5, -1.0]];
        let plain = LongRunOptions::new(2, KernelType::Parzen, false, true);
        let centered = LongRunOptions::new(2, KernelType::Parzen, true, true);

        // Act
        let cov_plain = long_run_covariance(&plain, &m).unwrap();
        let cov_centered = long_run_covariance(&centered, &m).unwrap();

        // Assert
        assert_matrices_close(&cov_plain, &cov_plain.t().to_owned(), TOL);
        assert_matrices_close(&cov_plain, &cov_centered, 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // Invalid moment matrices are reported, not aggregated.
    //
    // Given
    // -----
    // - A 0×3 matrix and a matrix containing an infinite entry.
    //
    // Expect
    // ------
    // - `EmptyMoments` and `NonFiniteMoment` respectively.
    fn long_run_covariance_rejects_empty_and_non_finite_moments() {
        let empty = Array2::<f64>::zeros((0, 3));
        assert_eq!(
            long_run_covariance(&LongRunOptions::default(), &empty),
            Err(InferenceError::EmptyMoments { rows: 0, cols: 3 })
        );

        let bad = array![[1.0, 2.0], [f64::INFINITY, 0.0]];
        match long_run_covariance(&LongRunOptions::default(), &bad) {
            Err(InferenceError::NonFiniteMoment { row, col, .. }) => {
                assert_eq!((row, col), (1, 0));
            }
            other => panic!("expected NonFiniteMoment, got {other:?}"),
        }
    }
}
