//! var::data — validated input series for the reduced-form VAR.
//!
//! Purpose
//! -------
//! Hold the endogenous series `y` (`T_total × n`) together with the
//! external instrument `z` (length `T_total`) after checking shapes and
//! finiteness once, so downstream estimation can index freely.
//!
//! Invariants & assumptions
//! ------------------------
//! - `y` has at least one row and one column; all entries are finite.
//! - `z.len() == y.nrows()`; all entries are finite.
//! - Rows are ordered in time; the instrument at row `t` is matched with
//!   the reduced-form residual of period `t`.
use crate::var::errors::{VarError, VarResult};
use ndarray::{Array1, Array2};

/// VarData — endogenous series and external instrument.
///
/// Fields
/// ------
/// - `y`: `Array2<f64>`
///   Endogenous variables, rows = time, columns = variables.
/// - `z`: `Array1<f64>`
///   External instrument aligned with the rows of `y`.
#[derive(Debug, Clone, PartialEq)]
pub struct VarData {
    y: Array2<f64>,
    z: Array1<f64>,
}

impl VarData {
    /// Validate and wrap the series.
    ///
    /// Errors
    /// ------
    /// - `VarError::EmptySeries` when `y` has no rows or columns.
    /// - `VarError::NonFiniteData { row, col, value }` for the first
    ///   non-finite entry of `y`.
    /// - `VarError::InstrumentLengthMismatch` when `z.len() != y.nrows()`.
    /// - `VarError::NonFiniteInstrument` for the first non-finite entry of `z`.
    pub fn new(y: Array2<f64>, z: Array1<f64>) -> VarResult<Self> {
        let (rows, cols) = y.dim();
        if rows == 0 || cols == 0 {
            return Err(VarError::EmptySeries { rows, cols });
        }
        if let Some(((row, col), &value)) = y.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(VarError::NonFiniteData { row, col, value });
        }
        if z.len() != rows {
            return Err(VarError::InstrumentLengthMismatch { expected: rows, actual: z.len() });
        }
        if let Some((index, &value)) = z.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(VarError::NonFiniteInstrument { index, value });
        }
        Ok(VarData { y, z })
    }

    /// Endogenous series (`T_total × n`).
    pub fn y(&self) -> &Array2<f64> {
        &self.y
    }

    /// External instrument (length `T_total`).
    pub fn z(&self) -> &Array1<f64> {
        &self.z
    }

    /// Number of endogenous variables `n`.
    pub fn n_vars(&self) -> usize {
        self.y.ncols()
    }

    /// Total number of rows before losing `p` initial observations.
    pub fn len(&self) -> usize {
        self.y.nrows()
    }

    /// Always `false` for a constructed value; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.y.nrows() == 0
    }
}
