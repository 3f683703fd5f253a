//! var::tensor — per-horizon matrix sequences with running sums.
//!
//! Purpose
//! -------
//! Store the moving-average coefficients `C[h]` and their derivatives
//! `G[h]` for `h = 0..=H` together with the cumulative sums used by
//! cumulative impulse responses.
//!
//! Invariants & assumptions
//! ------------------------
//! - `levels.len() == cumulative.len() == H + 1`.
//! - `cumulative[0] == levels[0]` and
//!   `cumulative[h] == cumulative[h-1] + levels[h]` for `h ≥ 1`.
//! - Every matrix in a tensor has the same shape.
use ndarray::Array2;

/// HorizonTensor — ordered per-horizon matrices and their running sums.
///
/// Fields
/// ------
/// - `levels`: `Vec<Array2<f64>>`
///   Per-horizon matrices, indexed by horizon.
/// - `cumulative`: `Vec<Array2<f64>>`
///   Running sums of `levels`.
#[derive(Debug, Clone, PartialEq)]
pub struct HorizonTensor {
    levels: Vec<Array2<f64>>,
    cumulative: Vec<Array2<f64>>,
}

/// `C[h]` (n × n) and `Ccum[h]`.
pub type MaTensor = HorizonTensor;

/// `G[h] = ∂vec(C[h]) / ∂vec(AL)'` (n² × n²p) and `Gcum[h]`.
pub type DerivativeTensor = HorizonTensor;

impl HorizonTensor {
    /// Build from per-horizon levels, forming the running sums.
    ///
    /// An empty `levels` vector yields an empty tensor.
    pub fn from_levels(levels: Vec<Array2<f64>>) -> Self {
        let mut cumulative: Vec<Array2<f64>> = Vec::with_capacity(levels.len());
        for level in &levels {
            let next = match cumulative.last() {
                Some(prev) => prev + level,
                None => level.clone(),
            };
            cumulative.push(next);
        }
        HorizonTensor { levels, cumulative }
    }

    /// Matrix at horizon `h`, level or cumulative.
    ///
    /// Panics
    /// ------
    /// - If `h > horizons()`; callers iterate over `0..=horizons()`.
    pub fn at(&self, h: usize, cumulative: bool) -> &Array2<f64> {
        if cumulative { &self.cumulative[h] } else { &self.levels[h] }
    }

    pub fn levels(&self) -> &[Array2<f64>] {
        &self.levels
    }

    /// Largest horizon stored (`H`). Zero for an empty tensor.
    pub fn horizons(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// Number of stored horizons (`H + 1`).
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Common `(rows, cols)` of the stored matrices, if any.
    pub fn matrix_dim(&self) -> Option<(usize, usize)> {
        self.levels.first().map(|m| m.dim())
    }
}
