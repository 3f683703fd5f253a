//! Unified error handling for inference routines.
//!
//! This module defines `InferenceError`, the central error type used by
//! the long-run (kernel-weighted) covariance estimator that turns
//! per-observation moment contributions into the asymptotic covariance of
//! the reduced-form estimates, together with configuration failures such as
//! unknown kernel names. An alias `InferenceResult<T>` standardizes
//! the return type across inference code.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Unified error type for inference routines.
///
/// Covers malformed moment matrices and numerical degeneracies detected
/// before aggregation. Provides readable diagnostics through `Display`.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceError {
    // ---- Moment matrix validation ----
    /// The moment matrix has no rows (no observations) or no columns.
    EmptyMoments { rows: usize, cols: usize },

    /// A moment contribution is NaN/±inf.
    NonFiniteMoment { row: usize, col: usize, value: f64 },

    // ---- Configuration ----
    /// Kernel name not recognised when parsing from a string.
    InvalidKernel { name: String },
}

pub type InferenceResult<T> = Result<T, InferenceError>;

impl std::error::Error for InferenceError {}

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Moment matrix validation ----
            InferenceError::EmptyMoments { rows, cols } => write!(
                f,
                "Inference Error: moment matrix must be non-empty; got {rows} rows and {cols} columns"
            ),
            InferenceError::NonFiniteMoment { row, col, value } => write!(
                f,
                "Inference Error: moment contribution at ({row}, {col}) is non-finite: {value}"
            ),

            // ---- Configuration ----
            InferenceError::InvalidKernel { name } => write!(
                f,
                "Inference Error: unknown kernel {name:?} (expected 'iid', 'bartlett', 'parzen', or 'quadratic_spectral')"
            ),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<InferenceError> for PyErr {
    fn from(err: InferenceError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
