//! var::ma — moving-average representation of a reduced-form VAR(p).
//!
//! Purpose
//! -------
//! Expose the contract consumed by the SVAR-IV engine: given lag
//! coefficients `AL` (`n × np`), produce the MA coefficients
//! `C[0..=H]` and their derivatives `G[0..=H]` together with cumulative
//! sums. The engine is generic over [`MovingAverageProvider`] so that
//! alternative parameterizations can plug in; [`VarMaProvider`] is the
//! analytic default.
//!
//! Key behaviors
//! -------------
//! - `C[0] = I_n`, `C[h] = Σ_{l=1}^{min(h,p)} C[h−l] · A_l`.
//! - `G[h]` via [`crate::var::derivatives::derivative_levels`].
//! - Shapes are validated once per call; the recursions themselves do not
//!   fail.
//!
//! Invariants & assumptions
//! ------------------------
//! - Outputs are deterministic and pure.
//! - `C` tensors have `H + 1` matrices of shape `n × n`; `G` tensors have
//!   `H + 1` matrices of shape `n² × n²p`.
use crate::var::{
    derivatives::derivative_levels,
    errors::{VarError, VarResult},
    tensor::{DerivativeTensor, HorizonTensor, MaTensor},
};
use ndarray::{Array2, s};

/// Source of MA coefficients and their derivatives for a VAR(p).
pub trait MovingAverageProvider {
    /// Build `C[0..=horizons]` and `Ccum` from `AL`.
    ///
    /// Errors
    /// ------
    /// - `VarError::InvalidLagOrder` when `p == 0`.
    /// - `VarError::CoefficientShape` when `AL` is not `n × np`.
    fn build_ma(&self, al: &Array2<f64>, p: usize, horizons: usize) -> VarResult<MaTensor>;

    /// Build `G[0..=H]` and `Gcum` for the MA tensor returned by
    /// [`MovingAverageProvider::build_ma`].
    ///
    /// Errors
    /// ------
    /// - Same shape errors as `build_ma`, plus `CoefficientShape` when the
    ///   MA matrices are not `n × n`.
    fn build_derivatives(
        &self, al: &Array2<f64>, ma: &MaTensor, p: usize,
    ) -> VarResult<DerivativeTensor>;
}

/// Closed-form provider for the standard VAR(p) parameterization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VarMaProvider;

impl MovingAverageProvider for VarMaProvider {
    fn build_ma(&self, al: &Array2<f64>, p: usize, horizons: usize) -> VarResult<MaTensor> {
        validate_coefficients(al, p)?;
        Ok(HorizonTensor::from_levels(ma_levels(al, p, horizons)))
    }

    fn build_derivatives(
        &self, al: &Array2<f64>, ma: &MaTensor, p: usize,
    ) -> VarResult<DerivativeTensor> {
        validate_coefficients(al, p)?;
        let n = al.nrows();
        if let Some(dim) = ma.matrix_dim() {
            if dim != (n, n) {
                return Err(VarError::CoefficientShape { expected: (n, n), actual: dim });
            }
        }
        Ok(HorizonTensor::from_levels(derivative_levels(al, ma.levels(), p)))
    }
}

/// MA recursion `C[h] = Σ_{l=1}^{min(h,p)} C[h−l] A_l` for `h = 0..=horizons`.
///
/// Assumes `al` is `n × np`; see [`VarMaProvider::build_ma`] for the
/// validated entry point.
pub fn ma_levels(al: &Array2<f64>, p: usize, horizons: usize) -> Vec<Array2<f64>> {
    let n = al.nrows();
    let mut levels: Vec<Array2<f64>> = Vec::with_capacity(horizons + 1);
    levels.push(Array2::<f64>::eye(n));
    for h in 1..=horizons {
        let mut c_h = Array2::<f64>::zeros((n, n));
        for l in 1..=h.min(p) {
            let a_l = al.slice(s![.., (l - 1) * n..l * n]);
            c_h += &levels[h - l].dot(&a_l);
        }
        levels.push(c_h);
    }
    levels
}

// ---- Helper methods ----

fn validate_coefficients(al: &Array2<f64>, p: usize) -> VarResult<()> {
    if p == 0 {
        return Err(VarError::InvalidLagOrder { lags: p });
    }
    let n = al.nrows();
    let expected = (n, n * p);
    if n == 0 || al.dim() != expected {
        return Err(VarError::CoefficientShape { expected, actual: al.dim() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // Scope
    // -----
    // - MA recursion for VAR(1) (powers of A) and VAR(2).
    // - Cumulative sums from the provider.
    // - Shape validation.

    #[test]
    // Purpose
    // -------
    // For a VAR(1), C[h] equals A^h.
    //
    // Given
    // -----
    // - A = [[0.5, 0.1], [0.0, 0.3]], H = 3.
    //
    // Expect
    // ------
    // - C[0] = I, C[1] = A, C[3] = A·A·A.
    fn build_ma_var1_returns_matrix_powers() {
        // Arrange
        let a = array![[0.5, 0.1], [0.0, 0.3]];

        // Act
        let ma = VarMaProvider.build_ma(&a, 1, 3).expect("valid VAR(1)");

        // Assert
        assert_eq!(ma.len(), 4);
        assert_eq!(ma.at(0, false), &Array2::<f64>::eye(2));
        assert_eq!(ma.at(1, false), &a);
        let a3 = a.dot(&a).dot(&a);
        for ((i, j), &v) in ma.at(3, false).indexed_iter() {
            assert_relative_eq!(v, a3[[i, j]], epsilon = 1e-14);
        }
        let cum1 = &Array2::<f64>::eye(2) + &a;
        assert_eq!(ma.at(1, true), &cum1);
    }

    #[test]
    // Purpose
    // -------
    // The VAR(2) recursion combines both lag blocks.
    //
    // Given
    // -----
    // - Scalar VAR(2): y_t = 0.5 y_{t-1} + 0.2 y_{t-2}.
    //
    // Expect
    // ------
    // - C = 1, 0.5, 0.45, 0.325 for h = 0..3.
    fn build_ma_var2_scalar_recursion() {
        let ma = VarMaProvider.build_ma(&array![[0.5, 0.2]], 2, 3).expect("valid VAR(2)");
        let values: Vec<f64> = ma.levels().iter().map(|c| c[[0, 0]]).collect();
        let expected = [1.0, 0.5, 0.45, 0.325];
        for (v, e) in values.iter().zip(expected.iter()) {
            assert_relative_eq!(*v, *e, epsilon = 1e-14);
        }
        assert_relative_eq!(ma.at(3, true)[[0, 0]], 2.275, epsilon = 1e-14);
    }

    #[test]
    // Purpose
    // -------
    // Shape and lag-order errors are reported before any computation.
    //
    // Given
    // -----
    // - A 2×3 AL with p = 2, p = 0, and a mismatched MA tensor.
    //
    // Expect
    // ------
    // - `CoefficientShape`, `InvalidLagOrder`, and `CoefficientShape`.
    fn provider_rejects_inconsistent_shapes() {
        let provider = VarMaProvider;
        let bad = array![[0.1, 0.2, 0.3], [0.0, 0.1, 0.2]];
        assert_eq!(
            provider.build_ma(&bad, 2, 1),
            Err(VarError::CoefficientShape { expected: (2, 4), actual: (2, 3) })
        );
        assert_eq!(provider.build_ma(&bad, 0, 1), Err(VarError::InvalidLagOrder { lags: 0 }));

        let scalar_ma = provider.build_ma(&array![[0.5]], 1, 2).expect("valid scalar VAR(1)");
        let two_var = array![[0.5, 0.0], [0.0, 0.5]];
        assert_eq!(
            provider.build_derivatives(&two_var, &scalar_ma, 1),
            Err(VarError::CoefficientShape { expected: (2, 2), actual: (1, 1) })
        );
    }

    #[test]
    // Purpose
    // -------
    // Derivative tensors have the documented shapes and cumulative sums.
    //
    // Given
    // -----
    // - n = 2, p = 1, H = 3.
    //
    // Expect
    // ------
    // - Four 4×4 matrices; Gcum[3] = G[1] + G[2] + G[3].
    fn build_derivatives_shapes_and_cumulative() {
        let a = array![[0.5, 0.1], [0.0, 0.3]];
        let ma = VarMaProvider.build_ma(&a, 1, 3).expect("valid VAR(1)");
        let g = VarMaProvider.build_derivatives(&a, &ma, 1).expect("valid shapes");

        assert_eq!(g.len(), 4);
        assert_eq!(g.matrix_dim(), Some((4, 4)));
        let manual = g.at(1, false) + g.at(2, false) + g.at(3, false);
        for ((i, j), &v) in g.at(3, true).indexed_iter() {
            assert_relative_eq!(v, manual[[i, j]], epsilon = 1e-14);
        }
    }
}
