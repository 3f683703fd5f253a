//! svar::engine — orchestration of SVAR-IV inference for one request.
//!
//! Purpose
//! -------
//! Run every component once for a `(ReducedFormModel, InferenceOptions)`
//! pair and bundle the results: robust and delta-method confidence sets,
//! plug-in responses with standard errors and the shock series, and the
//! Cholesky benchmark.
//!
//! Key behaviors
//! -------------
//! - Order of work: option/model checks → `Γₙ ≠ 0` → MA and derivative
//!   tensors → Cholesky benchmark → shock recovery → first-stage
//!   diagnostics → robust sets → delta-method intervals.
//! - Dimension, option, and numerical errors on the shared inputs abort the
//!   request before any interval is computed. Per-cell degeneracy is data.
//! - Tensors from a caller-supplied provider are checked against
//!   `(n, H)` before use.
//! - A Cholesky benchmark that cannot be normalized on `nvar` (zero pivot)
//!   is reported as all-NaN with a `warn!` event; it never aborts the
//!   robust and delta-method results.
//! - Tensors and covariance blocks are computed once and shared read-only.
//!
//! Downstream usage
//! ----------------
//! - [`SvarIvOutcome::compute`] for a prebuilt model,
//!   [`SvarIvOutcome::compute_with`] for a custom MA provider, and
//!   [`SvarIvOutcome::from_data`] to estimate the reduced form first.
//! - Matrix accessors return `n × (H + 1)` arrays for reporting layers.
use crate::{
    svar::{
        cholesky::{CholeskyBenchmark, cholesky_benchmark},
        delta::{DeltaMethodSolution, delta_grid},
        diagnostics::FirstStageDiagnostics,
        errors::{SvarError, SvarResult},
        irf::{IrfGrid, IrfInputs},
        model::ReducedFormModel,
        options::InferenceOptions,
        robust::{QuadraticSolution, robust_grid},
        shocks::{StructuralShockSeries, recover_shocks},
    },
    var::{
        data::VarData,
        estimate::estimate_reduced_form,
        ma::{MovingAverageProvider, VarMaProvider},
        options::VarOptions,
        tensor::HorizonTensor,
    },
};
use ndarray::Array2;
use tracing::{debug, warn};

/// RobustInference — confidence sets for both response families.
#[derive(Debug, Clone, PartialEq)]
pub struct RobustInference {
    pub levels: IrfGrid<QuadraticSolution>,
    pub cumulative: IrfGrid<QuadraticSolution>,
    pub delta_levels: IrfGrid<DeltaMethodSolution>,
    pub delta_cumulative: IrfGrid<DeltaMethodSolution>,
    /// Residual sample length `T`.
    pub n_obs: usize,
    pub critical_value: f64,
    pub diagnostics: FirstStageDiagnostics,
}

/// PluginInference — point responses, standard errors, and shocks.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginInference {
    pub irf: Array2<f64>,
    pub irf_cumulative: Array2<f64>,
    pub std_error: Array2<f64>,
    pub std_error_cumulative: Array2<f64>,
    pub shocks: StructuralShockSeries,
}

/// SvarIvOutcome — everything produced for one inference request.
#[derive(Debug, Clone, PartialEq)]
pub struct SvarIvOutcome {
    pub robust: RobustInference,
    pub plugin: PluginInference,
    pub cholesky: CholeskyBenchmark,
}

impl SvarIvOutcome {
    /// Run inference with the closed-form MA provider.
    ///
    /// Errors
    /// ------
    /// - See [`SvarIvOutcome::compute_with`].
    pub fn compute(model: &ReducedFormModel, opts: &InferenceOptions) -> SvarResult<Self> {
        Self::compute_with(model, opts, &VarMaProvider)
    }

    /// Run inference with a caller-supplied MA provider.
    ///
    /// Errors
    /// ------
    /// - `SvarError::InvalidNormalizationVariable` when `norm_var > n`.
    /// - `SvarError::ZeroNormalization` when `Γₙ` is exactly zero.
    /// - `SvarError::Var(_)` when the provider rejects the coefficients.
    /// - `SvarError::DimensionMismatch { what: "MA" | "G", .. }` when the
    ///   provider returns tensors of the wrong length or matrix shape.
    /// - `SvarError::NotPositiveDefinite` when `Σ` cannot be factored. A zero
    ///   Cholesky pivot only blanks the benchmark.
    /// - `SvarError::SingularMatrix` / `DegenerateShockSeries` from shock
    ///   recovery.
    pub fn compute_with<P: MovingAverageProvider>(
        model: &ReducedFormModel, opts: &InferenceOptions, provider: &P,
    ) -> SvarResult<Self> {
        opts.check_norm_var(model.n_vars())?;
        let nv = opts.norm_index();
        let gamma_n = model.gamma()[nv];
        if gamma_n == 0.0 {
            return Err(SvarError::ZeroNormalization { norm_var: opts.norm_var() });
        }

        let n = model.n_vars();
        let ma = provider.build_ma(model.al(), model.lags(), opts.horizons())?;
        check_tensor("MA", &ma, opts.horizons(), (n, n))?;
        let derivatives = provider.build_derivatives(model.al(), &ma, model.lags())?;
        check_tensor("G", &derivatives, opts.horizons(), (n * n, model.coefficient_dim()))?;
        let blocks = model.covariance_blocks();
        debug!(
            n_vars = model.n_vars(),
            lags = model.lags(),
            horizons = opts.horizons(),
            "built MA and derivative tensors"
        );

        let cholesky = match cholesky_benchmark(model.sigma(), &ma, nv, opts.scale()) {
            Ok(bench) => bench,
            Err(SvarError::ZeroCholeskyEntry { norm_var }) => {
                warn!(norm_var, "first Cholesky column is zero at the normalization variable");
                CholeskyBenchmark::undefined(n, ma.len())
            }
            Err(err) => return Err(err),
        };
        let shocks = recover_shocks(model.sigma(), model.eta(), model.gamma(), nv, opts.scale())?;

        let critical_value = opts.critical_value();
        let diagnostics = FirstStageDiagnostics::compute(
            gamma_n,
            blocks.w2[[nv, nv]],
            model.n_obs(),
            critical_value,
            opts.confidence(),
        );
        diagnostics.report(opts.display_diagnostics());

        let inputs = IrfInputs::new(model, &blocks, &ma, &derivatives, opts);
        let levels = robust_grid(&inputs, false);
        let cumulative = robust_grid(&inputs, true);
        let delta_levels = delta_grid(&inputs, false);
        let delta_cumulative = delta_grid(&inputs, true);
        debug!(critical_value, "computed robust and delta-method sets");

        let plugin = PluginInference {
            irf: delta_levels.to_array(|d| d.point_estimate),
            irf_cumulative: delta_cumulative.to_array(|d| d.point_estimate),
            std_error: delta_levels.to_array(|d| d.std_error),
            std_error_cumulative: delta_cumulative.to_array(|d| d.std_error),
            shocks,
        };
        let robust = RobustInference {
            levels,
            cumulative,
            delta_levels,
            delta_cumulative,
            n_obs: model.n_obs(),
            critical_value,
            diagnostics,
        };
        Ok(SvarIvOutcome { robust, plugin, cholesky })
    }

    /// Estimate the reduced form from data, then run inference.
    ///
    /// Errors
    /// ------
    /// - `SvarError::Var(_)` from estimation, plus everything
    ///   [`SvarIvOutcome::compute`] returns.
    pub fn from_data(
        data: &VarData, var_opts: &VarOptions, opts: &InferenceOptions,
    ) -> SvarResult<Self> {
        let estimate = estimate_reduced_form(data, var_opts)?;
        let model = ReducedFormModel::try_from(estimate)?;
        Self::compute(&model, opts)
    }

    /// Robust `(lower, upper)` matrices; see [`crate::svar::ConfidenceSet::bounds`].
    pub fn robust_bounds(&self, cumulative: bool) -> (Array2<f64>, Array2<f64>) {
        let grid = self.robust_family(cumulative);
        (grid.to_array(|s| s.lower()), grid.to_array(|s| s.upper()))
    }

    /// Case codes in `{1, 2, 3, 4}`.
    pub fn case_codes(&self, cumulative: bool) -> Array2<u8> {
        self.robust_family(cumulative).to_array(|s| s.case.code())
    }

    /// Delta-method `(lower, upper)` matrices.
    pub fn delta_bounds(&self, cumulative: bool) -> (Array2<f64>, Array2<f64>) {
        let grid =
            if cumulative { &self.robust.delta_cumulative } else { &self.robust.delta_levels };
        (grid.to_array(|d| d.lower), grid.to_array(|d| d.upper))
    }

    fn robust_family(&self, cumulative: bool) -> &IrfGrid<QuadraticSolution> {
        if cumulative { &self.robust.cumulative } else { &self.robust.levels }
    }
}

// ---- Helper methods ----

/// Check that a provider tensor has `horizons + 1` matrices of shape `dim`.
fn check_tensor(
    what: &'static str, tensor: &HorizonTensor, horizons: usize, dim: (usize, usize),
) -> SvarResult<()> {
    if tensor.len() != horizons + 1 {
        return Err(SvarError::DimensionMismatch {
            what,
            expected: (horizons + 1, 1),
            actual: (tensor.len(), 1),
        });
    }
    match tensor.levels().iter().find(|m| m.dim() != dim) {
        Some(bad) => Err(SvarError::DimensionMismatch { what, expected: dim, actual: bad.dim() }),
        None => Ok(()),
    }
}
