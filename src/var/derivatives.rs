//! var::derivatives — analytic Jacobians of the MA coefficients.
//!
//! Purpose
//! -------
//! Compute `G[h] = ∂vec(C[h]) / ∂vec(AL)'` for the reduced-form moving-
//! average coefficients of a VAR(p), using the closed form
//!
//! ```text
//! G[h] = Σ_{m=0}^{h-1} J (Φ')^{h-1-m} ⊗ C[m],   G[0] = 0,
//! ```
//!
//! where `Φ` is the `np × np` companion matrix of `AL` and `J = [I_n 0 … 0]`
//! selects the first `n` rows.
//!
//! Conventions
//! -----------
//! - `vec` stacks columns, so row `c·n + r` of `G[h]` is the entry
//!   `C[h][r, c]` and column `k·n + i` is `AL[i, k]`.
//! - Inputs are assumed shape-checked by the caller
//!   ([`crate::var::ma::VarMaProvider`] validates before calling in).
//!
//! Testing notes
//! -------------
//! - `G[h]` is compared against a central finite-difference Jacobian of
//!   `vec(C[h])` computed with `finitediff`.
use ndarray::{Array2, linalg::kron, s};

/// Companion matrix of a VAR(p) with lag blocks `AL = [A_1 … A_p]`.
///
/// ```text
///     | A_1  A_2  …  A_{p-1}  A_p |
/// Φ = | I_n  0    …  0        0   |
///     | 0    I_n  …  0        0   |
///     | …                         |
/// ```
///
/// For `p = 1` this is `A_1` itself.
pub fn companion_matrix(al: &Array2<f64>, p: usize) -> Array2<f64> {
    let n = al.nrows();
    let np = n * p;
    let mut phi = Array2::<f64>::zeros((np, np));
    phi.slice_mut(s![0..n, ..]).assign(al);
    for i in n..np {
        phi[[i, i - n]] = 1.0;
    }
    phi
}

/// Per-horizon derivative matrices `G[0..=H]`, each `n² × n²p`.
///
/// Parameters
/// ----------
/// - `al`: `&Array2<f64>`
///   Lag coefficients, `n × np`.
/// - `ma`: `&[Array2<f64>]`
///   MA coefficients `C[0..=H]` already computed from `al`.
/// - `p`: `usize`
///   Lag order.
///
/// Returns
/// -------
/// `Vec<Array2<f64>>` of length `ma.len()`, with `G[0]` identically zero.
pub fn derivative_levels(al: &Array2<f64>, ma: &[Array2<f64>], p: usize) -> Vec<Array2<f64>> {
    let n = al.nrows();
    let rows = n * n;
    let cols = n * n * p;
    let horizons = ma.len().saturating_sub(1);

    // J (Φ')^k for k = 0..H-1.
    let phi_t = companion_matrix(al, p).reversed_axes();
    let mut selected_powers: Vec<Array2<f64>> = Vec::with_capacity(horizons);
    let mut power = Array2::<f64>::eye(n * p);
    for _ in 0..horizons {
        selected_powers.push(power.slice(s![0..n, ..]).to_owned());
        power = power.dot(&phi_t);
    }

    let mut levels: Vec<Array2<f64>> = Vec::with_capacity(ma.len());
    for h in 0..ma.len() {
        let mut g = Array2::<f64>::zeros((rows, cols));
        for (m, c_m) in ma.iter().enumerate().take(h) {
            g += &kron(&selected_powers[h - 1 - m], c_m);
        }
        levels.push(g);
    }
    levels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::var::ma::ma_levels;
    use approx::assert_relative_eq;
    use finitediff::FiniteDiff;
    use ndarray::{ShapeBuilder, array};

    // Scope
    // -----
    // - Companion layout for p = 1 and p = 2.
    // - G[0] = 0 and G[1] = [I_{n²} 0].
    // - Agreement of G[h] with a finite-difference Jacobian.

    fn al_from_vec(alpha: &[f64], n: usize, p: usize) -> Array2<f64> {
        Array2::from_shape_vec((n, n * p).f(), alpha.to_vec()).expect("column-major shape")
    }

    #[test]
    // Purpose
    // -------
    // The companion matrix carries the lag blocks in its first block row and
    // an identity shift below.
    //
    // Given
    // -----
    // - n = 2, p = 2 with AL = [[1, 2, 3, 4], [5, 6, 7, 8]].
    //
    // Expect
    // ------
    // - First two rows equal AL; rows 2..4 are [I_2 0].
    fn companion_matrix_stacks_lags_over_shift() {
        // Arrange
        let al = array![[1.0, 2.0, 3.0, 4.0], [5.0, 6.0, 7.0, 8.0]];

        // Act
        let phi = companion_matrix(&al, 2);

        // Assert
        assert_eq!(phi.slice(s![0..2, ..]), al);
        assert_eq!(phi.slice(s![2..4, ..]), array![[1.0, 0.0, 0.0, 0.0], [0.0, 1.0, 0.0, 0.0]]);
        assert_eq!(companion_matrix(&array![[0.5]], 1), array![[0.5]]);
    }

    #[test]
    // Purpose
    // -------
    // The first two derivative matrices have closed forms independent of AL.
    //
    // Given
    // -----
    // - n = 2, p = 2, arbitrary AL, H = 2.
    //
    // Expect
    // ------
    // - G[0] = 0 (4×8).
    // - G[1] = [I_4 0] since C[1] = A_1 is the first block of AL.
    fn derivative_levels_initial_horizons_have_closed_form() {
        // Arrange
        let al = array![[0.4, 0.1, -0.2, 0.05], [0.0, 0.3, 0.1, 0.1]];
        let ma = ma_levels(&al, 2, 2);

        // Act
        let g = derivative_levels(&al, &ma, 2);

        // Assert
        assert_eq!(g.len(), 3);
        assert_eq!(g[0].dim(), (4, 8));
        assert!(g[0].iter().all(|&v| v == 0.0));
        for i in 0..4 {
            for j in 0..8 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(g[1][[i, j]], expected, epsilon = 1e-14);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // The analytic Jacobian agrees with central finite differences of
    // vec(C[h]) with respect to vec(AL) at several horizons.
    //
    // Given
    // -----
    // - n = 2, p = 2 stable coefficients, horizons up to 4.
    //
    // Expect
    // ------
    // - Every entry of G[h] matches the numerical derivative to 1e-6.
    fn derivative_levels_match_finite_differences() {
        // Arrange
        let (n, p, horizons) = (2usize, 2usize, 4usize);
        let al = array![[0.5, 0.1, 0.2, -0.1], [-0.2, 0.3, 0.05, 0.15]];
        let alpha: Vec<f64> = al.t().iter().copied().collect();
        let ma = ma_levels(&al, p, horizons);

        // Act
        let g = derivative_levels(&al, &ma, p);

        // Assert
        for h in 0..=horizons {
            for col in 0..n {
                for row in 0..n {
                    let vec_idx = col * n + row;
                    let entry = |theta: &Vec<f64>| -> f64 {
                        let c = ma_levels(&al_from_vec(theta, n, p), p, h);
                        c[h][[row, col]]
                    };
                    let fd_row = alpha.central_diff(&entry);
                    for (k, fd) in fd_row.iter().enumerate() {
                        assert_relative_eq!(g[h][[vec_idx, k]], *fd, epsilon = 1e-6);
                    }
                }
            }
        }
    }
}
