//! svar::irf — shared per-cell inputs for impulse-response inference.
//!
//! Purpose
//! -------
//! Collect the read-only quantities used by both interval engines (MA and
//! derivative tensors, covariance blocks, `Γ`, `T`, the critical value, and
//! the normalization) and compute, for a `(variable j, horizon h)` cell,
//! the three building blocks every formula needs:
//!
//! - `eⱼ'C` — row `j` of `C[h]` (or `Ccum[h]`),
//! - `eⱼ'CΓ` — the unnormalized response,
//! - `(Γ ⊗ eⱼ)'G` — the gradient of `eⱼ'CΓ` with respect to `vec(AL)`.
//!
//! Conventions
//! -----------
//! - `j` and the normalization index are 0-based inside this module.
//! - `(Γ ⊗ eⱼ)'G = Σ_k Γ_k · G[k·n + j, :]` because `vec` stacks columns.
//! - [`IrfGrid`] stores one value per cell in variable-major order.
use crate::{
    svar::{
        model::{CovarianceBlocks, ReducedFormModel},
        options::InferenceOptions,
    },
    var::tensor::{DerivativeTensor, MaTensor},
};
use ndarray::{Array1, Array2, ArrayView2};

/// Read-only inputs shared by the robust and delta-method engines.
#[derive(Debug, Clone, Copy)]
pub struct IrfInputs<'a> {
    pub gamma: &'a Array1<f64>,
    pub w_hat: &'a Array2<f64>,
    pub blocks: &'a CovarianceBlocks,
    pub ma: &'a MaTensor,
    pub derivatives: &'a DerivativeTensor,
    pub n_obs: f64,
    pub critical_value: f64,
    pub scale: f64,
    pub norm_index: usize,
}

/// Per-cell building blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct CellTerms {
    /// Row `j` of `C[h]`, length `n`.
    pub row: Array1<f64>,
    /// `eⱼ'C[h]Γ`.
    pub response: f64,
    /// `(Γ ⊗ eⱼ)'G[h]`, length `n²p`.
    pub gradient: Array1<f64>,
}

impl<'a> IrfInputs<'a> {
    pub fn new(
        model: &'a ReducedFormModel, blocks: &'a CovarianceBlocks, ma: &'a MaTensor,
        derivatives: &'a DerivativeTensor, opts: &InferenceOptions,
    ) -> Self {
        IrfInputs {
            gamma: model.gamma(),
            w_hat: model.w_hat(),
            blocks,
            ma,
            derivatives,
            n_obs: model.n_obs() as f64,
            critical_value: opts.critical_value(),
            scale: opts.scale(),
            norm_index: opts.norm_index(),
        }
    }

    pub fn n_vars(&self) -> usize {
        self.gamma.len()
    }

    pub fn horizons(&self) -> usize {
        self.ma.horizons()
    }

    /// `Γ[nvar]`.
    pub fn gamma_norm(&self) -> f64 {
        self.gamma[self.norm_index]
    }

    /// Building blocks for cell `(j, h)` of the level or cumulative family.
    pub fn cell(&self, j: usize, h: usize, cumulative: bool) -> CellTerms {
        let c = self.ma.at(h, cumulative);
        let g = self.derivatives.at(h, cumulative);
        let row = c.row(j).to_owned();
        let response = row.dot(self.gamma);
        let gradient = gamma_kron_row(g.view(), self.gamma, j);
        CellTerms { row, response, gradient }
    }
}

/// `(Γ ⊗ eⱼ)'G` as a weighted sum of the rows `k·n + j` of `G`.
pub fn gamma_kron_row(g: ArrayView2<'_, f64>, gamma: &Array1<f64>, j: usize) -> Array1<f64> {
    let n = gamma.len();
    let mut out = Array1::<f64>::zeros(g.ncols());
    for (k, &gamma_k) in gamma.iter().enumerate() {
        out.scaled_add(gamma_k, &g.row(k * n + j));
    }
    out
}

/// IrfGrid — one value per `(variable, horizon)` cell.
#[derive(Debug, Clone, PartialEq)]
pub struct IrfGrid<T> {
    n_vars: usize,
    horizons: usize,
    cells: Vec<T>,
}

impl<T> IrfGrid<T> {
    /// Fill the grid by calling `f(j, h)` for every variable and horizon.
    pub fn from_fn<F: FnMut(usize, usize) -> T>(n_vars: usize, horizons: usize, mut f: F) -> Self {
        let mut cells = Vec::with_capacity(n_vars * (horizons + 1));
        for j in 0..n_vars {
            for h in 0..=horizons {
                cells.push(f(j, h));
            }
        }
        IrfGrid { n_vars, horizons, cells }
    }

    /// Cell for 0-based variable `j` and horizon `h`.
    ///
    /// Panics
    /// ------
    /// - If `j ≥ n_vars()` or `h > horizons()`.
    pub fn get(&self, j: usize, h: usize) -> &T {
        &self.cells[j * (self.horizons + 1) + h]
    }

    pub fn n_vars(&self) -> usize {
        self.n_vars
    }

    pub fn horizons(&self) -> usize {
        self.horizons
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.cells.iter()
    }

    /// Project every cell to a scalar, returning an `n × (H + 1)` matrix.
    pub fn to_array<U: Clone, F: Fn(&T) -> U>(&self, f: F) -> Array2<U> {
        Array2::from_shape_fn((self.n_vars, self.horizons + 1), |(j, h)| f(self.get(j, h)))
    }
}
