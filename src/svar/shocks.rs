//! svar::shocks — plug-in structural shock series.
//!
//! Purpose
//! -------
//! Recover the structural shock implied by the identified impulse vector,
//! `ε̂_t = x·Γ'Σ⁻¹η_t / Γₙ`, and its standardized version
//! `(ε̂ − mean) / std` (sample standard deviation, `T − 1` denominator).
//!
//! Invariants & assumptions
//! ------------------------
//! - `Σ⁻¹Γ` is obtained by an LU solve; no explicit inverse is formed.
//! - Standardization needs `T ≥ 2` and a positive, finite dispersion.
use crate::{
    linalg::solve,
    svar::errors::{SvarError, SvarResult},
};
use ndarray::{Array1, Array2};

/// StructuralShockSeries — raw and standardized shock, length `T`.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuralShockSeries {
    pub raw: Array1<f64>,
    pub standardized: Array1<f64>,
}

/// Recover the structural shock series.
///
/// Parameters
/// ----------
/// - `sigma`: residual covariance, `n × n`.
/// - `eta`: residuals, `n × T`.
/// - `gamma`: residual–instrument covariance, length `n`.
/// - `norm_index`: 0-based normalization variable.
/// - `scale`: normalization `x`.
///
/// Errors
/// ------
/// - `SvarError::ZeroNormalization` when `Γₙ == 0`.
/// - `SvarError::SingularMatrix { what: "Sigma" }` when `Σw = Γ` has no
///   finite solution.
/// - `SvarError::DegenerateShockSeries` when the series cannot be
///   standardized.
pub fn recover_shocks(
    sigma: &Array2<f64>, eta: &Array2<f64>, gamma: &Array1<f64>, norm_index: usize, scale: f64,
) -> SvarResult<StructuralShockSeries> {
    let gamma_n = gamma[norm_index];
    if gamma_n == 0.0 {
        return Err(SvarError::ZeroNormalization { norm_var: norm_index + 1 });
    }
    let weights = solve(sigma, gamma).ok_or(SvarError::SingularMatrix { what: "Sigma" })?;
    let raw = eta.t().dot(&weights) * (scale / gamma_n);

    let n_obs = raw.len();
    let degenerate = |std_dev: f64| SvarError::DegenerateShockSeries { n_obs, std_dev };
    if n_obs < 2 {
        return Err(degenerate(f64::NAN));
    }
    let mean = raw.mean().ok_or_else(|| degenerate(f64::NAN))?;
    let std_dev = raw.std(1.0);
    if !(std_dev.is_finite() && std_dev > 0.0) {
        return Err(degenerate(std_dev));
    }
    let standardized = raw.mapv(|v| (v - mean) / std_dev);
    Ok(StructuralShockSeries { raw, standardized })
}
