//! svar::delta — delta-method (Wald) intervals for plug-in impulse responses.
//!
//! For cell `(i, h)` the plug-in response is `λ = x·eᵢ'CΓ / Γₙ`. Its
//! gradient with respect to `(vec(AL), Γ)` is
//! `d = [x·(Γ⊗eᵢ)'G ; x·eᵢ'C − λ·eₙ']`, the variance is `d'·Ŵ·d`, and the
//! interval is `λ ± √(cv/T)·√var / |Γₙ|`.
//!
//! The interval is symmetric by construction. At the normalization cell
//! `(n, 0)` the gradient vanishes, so the interval collapses to `[x, x]`.
use crate::svar::irf::{IrfGrid, IrfInputs};
use ndarray::{Array1, s};

/// DeltaMethodSolution — plug-in estimate and Wald interval for one cell.
///
/// Fields
/// ------
/// - `point_estimate`: `λ`.
/// - `variance`: `d'·Ŵ·d` on the average-moment scale.
/// - `std_error`: `√var / (√T·|Γₙ|)`.
/// - `lower`, `upper`: `λ ∓ √cv · std_error`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaMethodSolution {
    pub point_estimate: f64,
    pub variance: f64,
    pub std_error: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Delta-method solution for cell `(i, h)`.
pub fn delta_cell(
    inputs: &IrfInputs<'_>, i: usize, h: usize, cumulative: bool,
) -> DeltaMethodSolution {
    let terms = inputs.cell(i, h, cumulative);
    let x = inputs.scale;
    let gamma_n = inputs.gamma_norm();
    let k = terms.gradient.len();
    let n = inputs.n_vars();

    let point_estimate = x * terms.response / gamma_n;

    let mut d = Array1::<f64>::zeros(k + n);
    d.slice_mut(s![..k]).assign(&(&terms.gradient * x));
    d.slice_mut(s![k..]).assign(&(&terms.row * x));
    d[k + inputs.norm_index] -= point_estimate;

    let variance = d.dot(&inputs.w_hat.dot(&d));
    let sd = variance.sqrt();
    let half_width = (inputs.critical_value / inputs.n_obs).sqrt() * sd / gamma_n.abs();
    let std_error = sd / (inputs.n_obs.sqrt() * gamma_n.abs());

    DeltaMethodSolution {
        point_estimate,
        variance,
        std_error,
        lower: point_estimate - half_width,
        upper: point_estimate + half_width,
    }
}

/// Delta-method solutions for every cell of one family.
pub fn delta_grid(inputs: &IrfInputs<'_>, cumulative: bool) -> IrfGrid<DeltaMethodSolution> {
    IrfGrid::from_fn(inputs.n_vars(), inputs.horizons(), |i, h| {
        delta_cell(inputs, i, h, cumulative)
    })
}
