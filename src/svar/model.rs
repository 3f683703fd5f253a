//! svar::model — immutable reduced-form inputs of the confidence-set engine.
//!
//! Purpose
//! -------
//! Bundle the reduced-form quantities consumed by SVAR-IV inference and
//! enforce their dimensional consistency once, at construction time.
//!
//! Key behaviors
//! -------------
//! - [`ReducedFormModel::new`] validates every shape against `(n, p)`.
//! - [`ReducedFormModel::covariance_blocks`] partitions `Ŵ` at `n²p` into
//!   the coefficient block `W1`, the cross block `W12`, and the
//!   instrument-covariance block `W2`.
//! - `TryFrom<ReducedFormEstimate>` connects the estimator output.
//!
//! Invariants & assumptions
//! ------------------------
//! - `AL` is `n × np`, `Sigma` is `n × n`, `eta` is `n × T` with `T ≥ 1`,
//!   `Gamma` has length `n`, and `WHat` is square with side `n²p + n`.
//! - `Sigma` is symmetric up to a relative tolerance of `1e-10`.
//! - Values are not checked for finiteness here; numerical degeneracy is
//!   surfaced by the components that hit it.
use crate::{
    linalg::{SYMMETRY_TOL, is_symmetric},
    svar::errors::{SvarError, SvarResult},
    var::{errors::VarError, estimate::ReducedFormEstimate},
};
use ndarray::{Array1, Array2, s};

/// ReducedFormModel — validated `(AL, p, Sigma, eta, Gamma, WHat)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReducedFormModel {
    al: Array2<f64>,
    lags: usize,
    sigma: Array2<f64>,
    eta: Array2<f64>,
    gamma: Array1<f64>,
    w_hat: Array2<f64>,
}

/// CovarianceBlocks — `Ŵ` partitioned at the coefficient dimension `n²p`.
///
/// Fields
/// ------
/// - `w1`: `n²p × n²p` coefficient block.
/// - `w12`: `n²p × n` cross block.
/// - `w2`: `n × n` instrument-covariance block.
#[derive(Debug, Clone, PartialEq)]
pub struct CovarianceBlocks {
    pub w1: Array2<f64>,
    pub w12: Array2<f64>,
    pub w2: Array2<f64>,
}

impl ReducedFormModel {
    /// Validate shapes and build the model.
    ///
    /// Parameters
    /// ----------
    /// - `al`: lag coefficients `[A_1 … A_p]`, `n × np`.
    /// - `lags`: lag order `p ≥ 1`.
    /// - `sigma`: residual covariance, `n × n`.
    /// - `eta`: residuals, `n × T`.
    /// - `gamma`: residual–instrument covariance, length `n`.
    /// - `w_hat`: covariance of `(vec(AL), Gamma)`, `(n²p + n) × (n²p + n)`.
    ///
    /// Errors
    /// ------
    /// - `SvarError::Var(VarError::InvalidLagOrder)` when `lags == 0`.
    /// - `SvarError::DimensionMismatch { what, .. }` naming the first input
    ///   whose shape is inconsistent.
    /// - `SvarError::NotPositiveDefinite { what: "Sigma" }` when `sigma` is
    ///   not symmetric.
    /// - `SvarError::EmptySample` when `eta` has no columns.
    pub fn new(
        al: Array2<f64>, lags: usize, sigma: Array2<f64>, eta: Array2<f64>, gamma: Array1<f64>,
        w_hat: Array2<f64>,
    ) -> SvarResult<Self> {
        if lags == 0 {
            return Err(VarError::InvalidLagOrder { lags }.into());
        }
        let n = al.nrows();
        check_dim("AL", (n, n * lags), al.dim())?;
        if n == 0 {
            return Err(SvarError::DimensionMismatch {
                what: "AL",
                expected: (1, lags),
                actual: al.dim(),
            });
        }
        check_dim("Sigma", (n, n), sigma.dim())?;
        if !is_symmetric(&sigma, SYMMETRY_TOL) {
            return Err(SvarError::NotPositiveDefinite { what: "Sigma" });
        }
        if eta.nrows() != n {
            return Err(SvarError::DimensionMismatch {
                what: "eta",
                expected: (n, eta.ncols()),
                actual: eta.dim(),
            });
        }
        if eta.ncols() == 0 {
            return Err(SvarError::EmptySample);
        }
        check_dim("Gamma", (n, 1), (gamma.len(), 1))?;
        let m = n * n * lags + n;
        check_dim("WHat", (m, m), w_hat.dim())?;
        Ok(ReducedFormModel { al, lags, sigma, eta, gamma, w_hat })
    }

    pub fn al(&self) -> &Array2<f64> {
        &self.al
    }

    pub fn lags(&self) -> usize {
        self.lags
    }

    pub fn sigma(&self) -> &Array2<f64> {
        &self.sigma
    }

    pub fn eta(&self) -> &Array2<f64> {
        &self.eta
    }

    pub fn gamma(&self) -> &Array1<f64> {
        &self.gamma
    }

    pub fn w_hat(&self) -> &Array2<f64> {
        &self.w_hat
    }

    /// Number of endogenous variables `n`.
    pub fn n_vars(&self) -> usize {
        self.al.nrows()
    }

    /// Residual sample length `T`.
    pub fn n_obs(&self) -> usize {
        self.eta.ncols()
    }

    /// Dimension of `vec(AL)`, i.e. `n²p`.
    pub fn coefficient_dim(&self) -> usize {
        let n = self.n_vars();
        n * n * self.lags
    }

    /// Partition `Ŵ` into `(W1, W12, W2)` at `n²p`.
    pub fn covariance_blocks(&self) -> CovarianceBlocks {
        let k = self.coefficient_dim();
        CovarianceBlocks {
            w1: self.w_hat.slice(s![..k, ..k]).to_owned(),
            w12: self.w_hat.slice(s![..k, k..]).to_owned(),
            w2: self.w_hat.slice(s![k.., k..]).to_owned(),
        }
    }
}

impl TryFrom<ReducedFormEstimate> for ReducedFormModel {
    type Error = SvarError;

    fn try_from(est: ReducedFormEstimate) -> SvarResult<Self> {
        ReducedFormModel::new(est.al, est.lags, est.sigma, est.eta, est.gamma, est.w_hat)
    }
}

// ---- Helper methods ----

fn check_dim(
    what: &'static str, expected: (usize, usize), actual: (usize, usize),
) -> SvarResult<()> {
    if expected != actual {
        return Err(SvarError::DimensionMismatch { what, expected, actual });
    }
    Ok(())
}
