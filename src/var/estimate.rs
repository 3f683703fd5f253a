//! var::estimate — least-squares reduced form and moment covariance.
//!
//! Purpose
//! -------
//! Estimate a VAR(p) with intercept by equation-wise OLS and assemble the
//! inputs of the SVAR-IV engine: lag coefficients `AL`, residuals `η`,
//! residual covariance `Σ`, the instrument covariance `Γ`, and the
//! asymptotic covariance `Ŵ` of `(vec(AL), Γ)`.
//!
//! Key behaviors
//! -------------
//! - Regressors `X_t = [1, y_{t−1}', …, y_{t−p}']` for `t = p..T_total−1`;
//!   the effective sample has `T = T_total − p` rows.
//! - `B = (X'X)⁻¹ X'Y`, `AL` = transpose of the slope rows of `B`.
//! - `Σ = ηη'/T` and `Γ = η z / T` with `z` aligned to the effective
//!   sample (the first `p` instrument values are dropped).
//! - Moment contributions `m_t = [a_t ⊗ η_t ; η_t z_t − Γ]` where
//!   `a_t` holds the slope entries of `(X'X/T)⁻¹ X_t`; `Ŵ` is their
//!   long-run covariance under [`VarOptions::long_run`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Each block of moment contributions sums to zero in sample (normal
//!   equations for the first block, definition of `Γ` for the second).
//! - `Ŵ` is symmetric with side `n²p + n`.
//!
//! Downstream usage
//! ----------------
//! - Converted into [`crate::svar::ReducedFormModel`] via `TryFrom`.
use crate::{
    inference::long_run::long_run_covariance,
    linalg::spd_inverse,
    var::{
        data::VarData,
        errors::{VarError, VarResult},
        options::VarOptions,
    },
};
use ndarray::{Array1, Array2, Axis, s};
use tracing::debug;

/// ReducedFormEstimate — OLS output of a VAR(p) with intercept.
///
/// Fields
/// ------
/// - `al`: `Array2<f64>` — lag coefficients `[A_1 … A_p]`, `n × np`.
/// - `intercept`: `Array1<f64>` — constant terms, length `n`.
/// - `lags`: `usize` — lag order `p`.
/// - `sigma`: `Array2<f64>` — residual covariance `ηη'/T`, `n × n`.
/// - `eta`: `Array2<f64>` — residuals, `n × T`.
/// - `gamma`: `Array1<f64>` — instrument covariance `η z / T`, length `n`.
/// - `w_hat`: `Array2<f64>` — covariance of `(vec(AL), Γ)`, side `n²p + n`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReducedFormEstimate {
    pub al: Array2<f64>,
    pub intercept: Array1<f64>,
    pub lags: usize,
    pub sigma: Array2<f64>,
    pub eta: Array2<f64>,
    pub gamma: Array1<f64>,
    pub w_hat: Array2<f64>,
}

impl ReducedFormEstimate {
    /// Effective sample size `T`.
    pub fn n_obs(&self) -> usize {
        self.eta.ncols()
    }
}

/// Estimate the reduced form and the covariance of its moment conditions.
///
/// Parameters
/// ----------
/// - `data`: `&VarData`
///   Validated endogenous series and instrument.
/// - `opts`: `&VarOptions`
///   Lag order and long-run covariance policy.
///
/// Returns
/// -------
/// `VarResult<ReducedFormEstimate>`
///
/// Errors
/// ------
/// - `VarError::InvalidLagOrder` when `opts.lags == 0`.
/// - `VarError::InsufficientObservations` when `T_total − p` does not
///   exceed the number of regressors `1 + np`.
/// - `VarError::SingularRegressors` when `X'X` is not positive definite.
/// - `VarError::Inference(_)` when the moment covariance fails (for
///   example non-finite moments from an explosive sample).
pub fn estimate_reduced_form(data: &VarData, opts: &VarOptions) -> VarResult<ReducedFormEstimate> {
    let p = opts.lags;
    if p == 0 {
        return Err(VarError::InvalidLagOrder { lags: p });
    }
    let n = data.n_vars();
    let regressors = 1 + n * p;
    let effective = data.len().saturating_sub(p);
    if effective <= regressors {
        return Err(VarError::InsufficientObservations { effective, regressors });
    }

    let (x, y) = build_regression(data.y(), p);
    let xtx_inv = spd_inverse(&x.t().dot(&x)).ok_or(VarError::SingularRegressors)?;
    let b = xtx_inv.dot(&x.t().dot(&y));

    let residuals = &y - &x.dot(&b);
    let t = effective as f64;
    let eta = residuals.reversed_axes();
    let sigma = eta.dot(&eta.t()) / t;
    let z_eff = data.z().slice(s![p..]).to_owned();
    let gamma = eta.dot(&z_eff) / t;

    let al = b.slice(s![1.., ..]).t().to_owned();
    let intercept = b.row(0).to_owned();

    // Slope entries of T (X'X)⁻¹ X_t, one row per observation.
    let influence = x.dot(&xtx_inv).slice(s![.., 1..]).to_owned() * t;
    let moments = moment_contributions(&influence, &eta, &z_eff, &gamma);
    let w_hat = long_run_covariance(&opts.long_run, &moments)?;

    debug!(n_vars = n, lags = p, n_obs = effective, "estimated reduced-form VAR");

    Ok(ReducedFormEstimate { al, intercept, lags: p, sigma, eta, gamma, w_hat })
}

/// Stack per-observation moment contributions into a `T × (n²p + n)`
/// matrix.
///
/// Row `t` is `[a_t ⊗ η_t ; η_t z_t − Γ]`, where `influence` holds `a_t`
/// in its rows (`T × np`) and `eta` holds `η_t` in its columns (`n × T`).
pub fn moment_contributions(
    influence: &Array2<f64>, eta: &Array2<f64>, z: &Array1<f64>, gamma: &Array1<f64>,
) -> Array2<f64> {
    let n = eta.nrows();
    let n_obs = eta.ncols();
    let np = influence.ncols();
    let slope_dim = n * np;
    let mut moments = Array2::<f64>::zeros((n_obs, slope_dim + n));
    for (t, mut row) in moments.axis_iter_mut(Axis(0)).enumerate() {
        let eta_t = eta.column(t);
        for c in 0..np {
            let a_tc = influence[[t, c]];
            for i in 0..n {
                row[c * n + i] = a_tc * eta_t[i];
            }
        }
        for i in 0..n {
            row[slope_dim + i] = eta_t[i] * z[t] - gamma[i];
        }
    }
    moments
}

// ---- Helper methods ----

/// Build `X` (`T × (1 + np)`) and `Y` (`T × n`) for lag order `p`.
fn build_regression(y: &Array2<f64>, p: usize) -> (Array2<f64>, Array2<f64>) {
    let n = y.ncols();
    let effective = y.nrows() - p;
    let mut x = Array2::<f64>::zeros((effective, 1 + n * p));
    for r in 0..effective {
        let t = r + p;
        x[[r, 0]] = 1.0;
        for l in 1..=p {
            let start = 1 + (l - 1) * n;
            x.slice_mut(s![r, start..start + n]).assign(&y.row(t - l));
        }
    }
    let y_eff = y.slice(s![p.., ..]).to_owned();
    (x, y_eff)
}
