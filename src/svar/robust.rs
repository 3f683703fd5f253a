//! svar::robust — weak-instrument-robust (Fieller-type) confidence sets.
//!
//! Purpose
//! -------
//! For each `(variable j, horizon h)` cell, invert the Anderson–Rubin-type
//! test of `H₀: λ = λ₀` into the set `{λ : aλ² + bλ + c ≤ 0}` and resolve
//! it according to the signs of `a` and the discriminant `Δ = b² − 4ac`.
//!
//! Key behaviors
//! -------------
//! - Coefficients, with `x` the scale, `n` the normalization index and
//!   `cv` the critical value:
//!
//! ```text
//! a = T·Γₙ² − cv·W2[n,n]
//! b = −2T·x·(eⱼ'CΓ)·Γₙ + 2cv·x·(Γ⊗eⱼ)'G·W12[:,n] + 2cv·x·eⱼ'C·W2[:,n]
//! c = T·x²·(eⱼ'CΓ)² − cv·x²·(Γ⊗eⱼ)'G·W1·G'(Γ⊗eⱼ)
//!     − 2cv·x²·(Γ⊗eⱼ)'G·W12·C'eⱼ − cv·x²·eⱼ'C·W2·C'eⱼ
//! ```
//!
//! - Case table:
//!
//! | a | Δ | case | set |
//! |---|---|------|-----|
//! | + | + | 1 | `[(−b−√Δ)/2a, (−b+√Δ)/2a]` |
//! | − | + | 2 | complement of `((−b+√Δ)/2a, (−b−√Δ)/2a)` |
//! | + | − | 3 | empty |
//! | otherwise | | 4 | whole real line |
//!
//! - The normalization cell `(n, h = 0)` is pinned to `[x, x]`; its case
//!   code still reflects the sign classification.
//!
//! Invariants & assumptions
//! ------------------------
//! - `case` depends on `sign(a)` and `sign(Δ)` only.
//! - No cell ever errors; degenerate sets are ordinary results.
//!
//! Testing notes
//! -------------
//! - Unit tests cover each case of the table, `bounds()` sentinels,
//!   membership of excluded intervals, and the pinned cell.
//! - `robust_cell` is checked against the unexpanded inequality
//!   `T(x·eⱼ'CΓ − λΓₙ)² − cv·d(λ)'Ŵd(λ)` on a dense `Ŵ` whose cross block
//!   `W12` is nonzero.
use crate::svar::irf::{IrfGrid, IrfInputs};

/// Confidence set resolved from the quadratic inequality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfidenceSet {
    /// `[lower, upper]`.
    Bounded { lower: f64, upper: f64 },
    /// `(−∞, lower] ∪ [upper, ∞)`; `(lower, upper)` is excluded.
    ExcludedInterval { lower: f64, upper: f64 },
    /// No value satisfies the inequality.
    Empty,
    /// Every real value satisfies the inequality.
    WholeLine,
}

impl ConfidenceSet {
    /// Legacy numeric pair: the interval ends for `Bounded`, the excluded
    /// interval ends for `ExcludedInterval`, `(NaN, NaN)` for `Empty`, and
    /// `(−∞, +∞)` for `WholeLine`.
    pub fn bounds(&self) -> (f64, f64) {
        match *self {
            ConfidenceSet::Bounded { lower, upper } => (lower, upper),
            ConfidenceSet::ExcludedInterval { lower, upper } => (lower, upper),
            ConfidenceSet::Empty => (f64::NAN, f64::NAN),
            ConfidenceSet::WholeLine => (f64::NEG_INFINITY, f64::INFINITY),
        }
    }

    /// Whether `value` belongs to the set.
    pub fn contains(&self, value: f64) -> bool {
        match *self {
            ConfidenceSet::Bounded { lower, upper } => lower <= value && value <= upper,
            ConfidenceSet::ExcludedInterval { lower, upper } => value <= lower || value >= upper,
            ConfidenceSet::Empty => false,
            ConfidenceSet::WholeLine => true,
        }
    }

    pub fn is_bounded(&self) -> bool {
        matches!(self, ConfidenceSet::Bounded { .. })
    }
}

/// Sign classification of the quadratic, coded 1–4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuadraticCase {
    Bounded = 1,
    ExcludedInterval = 2,
    Empty = 3,
    WholeLine = 4,
}

impl QuadraticCase {
    /// Classify from `a` and `Δ`. Zero or NaN values fall through to
    /// `WholeLine`.
    pub fn classify(a: f64, delta: f64) -> QuadraticCase {
        if a > 0.0 && delta > 0.0 {
            QuadraticCase::Bounded
        } else if a < 0.0 && delta > 0.0 {
            QuadraticCase::ExcludedInterval
        } else if a > 0.0 && delta < 0.0 {
            QuadraticCase::Empty
        } else {
            QuadraticCase::WholeLine
        }
    }

    /// Numeric code in `{1, 2, 3, 4}`.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

/// Quadratic coefficients and resolved set for one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticSolution {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub delta: f64,
    pub case: QuadraticCase,
    pub set: ConfidenceSet,
    /// `true` for the normalization cell whose set is fixed to `[x, x]`.
    pub pinned: bool,
}

impl QuadraticSolution {
    /// Solve `aλ² + bλ + c ≤ 0` by the case table.
    pub fn solve(a: f64, b: f64, c: f64) -> QuadraticSolution {
        let delta = b * b - 4.0 * a * c;
        let case = QuadraticCase::classify(a, delta);
        let set = match case {
            QuadraticCase::Bounded => {
                let root = delta.sqrt();
                ConfidenceSet::Bounded {
                    lower: (-b - root) / (2.0 * a),
                    upper: (-b + root) / (2.0 * a),
                }
            }
            QuadraticCase::ExcludedInterval => {
                let root = delta.sqrt();
                ConfidenceSet::ExcludedInterval {
                    lower: (-b + root) / (2.0 * a),
                    upper: (-b - root) / (2.0 * a),
                }
            }
            QuadraticCase::Empty => ConfidenceSet::Empty,
            QuadraticCase::WholeLine => ConfidenceSet::WholeLine,
        };
        QuadraticSolution { a, b, c, delta, case, set, pinned: false }
    }

    /// Replace the set by the degenerate interval `[value, value]`.
    pub fn pin(self, value: f64) -> QuadraticSolution {
        QuadraticSolution {
            set: ConfidenceSet::Bounded { lower: value, upper: value },
            pinned: true,
            ..self
        }
    }

    pub fn lower(&self) -> f64 {
        self.set.bounds().0
    }

    pub fn upper(&self) -> f64 {
        self.set.bounds().1
    }
}

/// Robust solution for cell `(j, h)`.
pub fn robust_cell(
    inputs: &IrfInputs<'_>, j: usize, h: usize, cumulative: bool,
) -> QuadraticSolution {
    let terms = inputs.cell(j, h, cumulative);
    let nv = inputs.norm_index;
    let t = inputs.n_obs;
    let cv = inputs.critical_value;
    let x = inputs.scale;
    let gamma_n = inputs.gamma_norm();
    let w1 = &inputs.blocks.w1;
    let w12 = &inputs.blocks.w12;
    let w2 = &inputs.blocks.w2;

    let a = t * gamma_n * gamma_n - cv * w2[[nv, nv]];

    let b = -2.0 * t * x * terms.response * gamma_n
        + 2.0 * cv * x * terms.gradient.dot(&w12.column(nv))
        + 2.0 * cv * x * terms.row.dot(&w2.column(nv));

    let c = t * (x * terms.response).powi(2)
        - cv * x * x * terms.gradient.dot(&w1.dot(&terms.gradient))
        - 2.0 * cv * x * x * terms.gradient.dot(&w12.dot(&terms.row))
        - cv * x * x * terms.row.dot(&w2.dot(&terms.row));

    let solution = QuadraticSolution::solve(a, b, c);
    if j == nv && h == 0 { solution.pin(x) } else { solution }
}

/// Robust solutions for every cell of one family.
pub fn robust_grid(inputs: &IrfInputs<'_>, cumulative: bool) -> IrfGrid<QuadraticSolution> {
    IrfGrid::from_fn(inputs.n_vars(), inputs.horizons(), |j, h| {
        robust_cell(inputs, j, h, cumulative)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svar::{
        delta::delta_cell,
        irf::fixtures::{DenseCase, HORIZONS},
    };
    use approx::assert_relative_eq;

    // Scope
    // -----
    // - The four cases of the table and the zero fall-through.
    // - Sentinels returned by `bounds()`.
    // - Membership semantics of an excluded interval.
    // - Pinning keeps the case code.
    // - Coefficients of `robust_cell` against the unexpanded inequality.

    #[test]
    // Purpose
    // -------
    // Case 1 returns the ordered roots of a convex quadratic.
    //
    // Given
    // -----
    // - (λ − 1)(λ − 3) = λ² − 4λ + 3.
    //
    // Expect
    // ------
    // - Case 1 with bounds [1, 3]; Δ = 4.
    fn solve_convex_with_real_roots_is_bounded() {
        let sol = QuadraticSolution::solve(1.0, -4.0, 3.0);
        assert_eq!(sol.case, QuadraticCase::Bounded);
        assert_eq!(sol.case.code(), 1);
        assert_relative_eq!(sol.delta, 4.0);
        assert_relative_eq!(sol.lower(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(sol.upper(), 3.0, epsilon = 1e-12);
        assert!(sol.set.contains(2.0) && !sol.set.contains(0.0));
    }

    #[test]
    // Purpose
    // -------
    // Case 2 reports the excluded interval in increasing order.
    //
    // Given
    // -----
    // - −(λ − 1)(λ − 3) = −λ² + 4λ − 3.
    //
    // Expect
    // ------
    // - Case 2 with pair (1, 3); 2 is excluded, 0 and 5 are included.
    fn solve_concave_with_real_roots_excludes_interval() {
        let sol = QuadraticSolution::solve(-1.0, 4.0, -3.0);
        assert_eq!(sol.case.code(), 2);
        assert_relative_eq!(sol.lower(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(sol.upper(), 3.0, epsilon = 1e-12);
        assert!(!sol.set.contains(2.0));
        assert!(sol.set.contains(0.0) && sol.set.contains(5.0));
        assert!(!sol.set.is_bounded());
    }

    #[test]
    // Purpose
    // -------
    // Cases 3 and 4 produce the documented sentinels.
    //
    // Given
    // -----
    // - λ² + 1 (a > 0, Δ < 0), −λ² − 1 (a < 0, Δ < 0), and a = 0.
    //
    // Expect
    // ------
    // - Case 3 → (NaN, NaN); case 4 → (−∞, ∞) for both others.
    fn solve_without_real_roots_is_empty_or_whole_line() {
        let empty = QuadraticSolution::solve(1.0, 0.0, 1.0);
        assert_eq!(empty.case.code(), 3);
        assert!(empty.lower().is_nan() && empty.upper().is_nan());
        assert!(!empty.set.contains(0.0));

        let whole = QuadraticSolution::solve(-1.0, 0.0, -1.0);
        assert_eq!(whole.case.code(), 4);
        assert_eq!(whole.set.bounds(), (f64::NEG_INFINITY, f64::INFINITY));

        let flat = QuadraticSolution::solve(0.0, 1.0, 1.0);
        assert_eq!(flat.case, QuadraticCase::WholeLine);
    }

    #[test]
    // Purpose
    // -------
    // Classification ignores magnitudes and handles zero discriminants.
    //
    // Given
    // -----
    // - Sign pairs with varied magnitudes and Δ = 0.
    //
    // Expect
    // ------
    // - Codes follow the table; Δ = 0 falls through to case 4.
    fn classify_depends_only_on_signs() {
        assert_eq!(QuadraticCase::classify(1e-12, 1e12).code(), 1);
        assert_eq!(QuadraticCase::classify(-5.0, 1e-9).code(), 2);
        assert_eq!(QuadraticCase::classify(3.0, -1e-3).code(), 3);
        assert_eq!(QuadraticCase::classify(-3.0, -7.0).code(), 4);
        assert_eq!(QuadraticCase::classify(2.0, 0.0).code(), 4);
        assert_eq!(QuadraticCase::classify(f64::NAN, 1.0).code(), 4);
    }

    #[test]
    // Purpose
    // -------
    // Pinning overrides the set but keeps coefficients and case.
    //
    // Given
    // -----
    // - An empty-set solution pinned at 2.5.
    //
    // Expect
    // ------
    // - Set [2.5, 2.5], `pinned`, case still 3.
    fn pin_overrides_set_only() {
        let pinned = QuadraticSolution::solve(1.0, 0.0, 1.0).pin(2.5);
        assert!(pinned.pinned);
        assert_eq!(pinned.case.code(), 3);
        assert_eq!(pinned.set, ConfidenceSet::Bounded { lower: 2.5, upper: 2.5 });
        assert_eq!(pinned.a, 1.0);
    }

    #[test]
    // Purpose
    // -------
    // The expanded coefficients reproduce the test statistic inequality,
    // including every term that involves the cross block W12 and the
    // off-diagonal entries of W2.
    //
    // Given
    // -----
    // - The dense fixture: n = 2, p = 1, T = 200, Ŵ = BBᵀ + 0.1·I,
    //   normalization on variable 2 with scale 1.5.
    // - Every non-pinned cell of both families, at λ ∈ {−1, 0.25, 2}.
    //
    // Expect
    // ------
    // - aλ² + bλ + c = T(x·eⱼ'CΓ − λΓₙ)² − cv·d(λ)'Ŵd(λ), with d(λ) built
    //   from kron(Γ, eⱼ)'G and eⱼ'C directly. Three λ values pin down
    //   (a, b, c).
    // - At the plug-in estimate the quadratic equals −cv times the
    //   delta-method variance.
    fn robust_cell_matches_unexpanded_inequality() {
        // Arrange
        let case = DenseCase::new();
        let inputs = case.inputs();
        let t = case.model.n_obs() as f64;
        let cv = case.opts.critical_value();
        let x = case.opts.scale();
        let gamma_n = case.model.gamma()[case.opts.norm_index()];
        let w_hat = case.model.w_hat();
        assert!(case.blocks.w12.iter().all(|v| v.abs() > 1e-6));
        assert!(case.blocks.w2[[0, 1]].abs() > 1e-6);

        for cumulative in [false, true] {
            for j in 0..2 {
                for h in 0..=HORIZONS {
                    if j == case.opts.norm_index() && h == 0 {
                        continue;
                    }

                    // Act
                    let sol = robust_cell(&inputs, j, h, cumulative);
                    let delta = delta_cell(&inputs, j, h, cumulative);

                    // Assert
                    assert_relative_eq!(
                        sol.a,
                        t * gamma_n * gamma_n - cv * case.blocks.w2[[1, 1]],
                        epsilon = 1e-10
                    );
                    let response = case.explicit_response(j, h, cumulative);
                    for lambda in [-1.0, 0.25, 2.0] {
                        let d = case.explicit_gradient(j, h, cumulative, lambda);
                        let expected = t * (x * response - lambda * gamma_n).powi(2)
                            - cv * d.dot(&w_hat.dot(&d));
                        let actual = sol.a * lambda * lambda + sol.b * lambda + sol.c;
                        assert_relative_eq!(actual, expected, epsilon = 1e-8, max_relative = 1e-10);
                    }
                    let l_hat = delta.point_estimate;
                    let at_estimate = sol.a * l_hat * l_hat + sol.b * l_hat + sol.c;
                    assert_relative_eq!(
                        at_estimate,
                        -cv * delta.variance,
                        epsilon = 1e-8,
                        max_relative = 1e-8
                    );
                }
            }
        }
    }
}
