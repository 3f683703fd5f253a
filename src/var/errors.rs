//! Errors for the reduced-form VAR layer (data validation, lag order,
//! least-squares failures, and moving-average construction).
//!
//! This module defines [`VarError`], used by the reduced-form estimator
//! and the moving-average/derivative provider. It implements
//! `Display`/`Error` and, with the `python-bindings` feature, converts to
//! `PyErr` for PyO3.
//!
//! ## Conventions
//! - **Indices are 0-based** (match Rust/NumPy).
//! - Data matrices are `T × n` (rows = time, columns = variables).
//! - Failures of the long-run covariance step are wrapped in
//!   [`VarError::Inference`] so that callers only deal with one error type.
use crate::inference::errors::InferenceError;

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for reduced-form operations that may produce [`VarError`].
pub type VarResult<T> = Result<T, VarError>;

/// Unified error type for reduced-form VAR estimation and MA construction.
#[derive(Debug, Clone, PartialEq)]
pub enum VarError {
    // ---- Input/data validation ----
    /// Data matrix has no rows or no columns.
    EmptySeries { rows: usize, cols: usize },

    /// A data point is NaN/±inf.
    NonFiniteData { row: usize, col: usize, value: f64 },

    /// An instrument value is NaN/±inf.
    NonFiniteInstrument { index: usize, value: f64 },

    /// Instrument length differs from the number of data rows.
    InstrumentLengthMismatch { expected: usize, actual: usize },

    // ---- Options ----
    /// Lag order must be at least 1.
    InvalidLagOrder { lags: usize },

    // ---- Least squares ----
    /// Effective sample is too short for the number of regressors.
    InsufficientObservations { effective: usize, regressors: usize },

    /// X'X is not positive definite (collinear or constant regressors).
    SingularRegressors,

    // ---- Moving-average construction ----
    /// Lag-coefficient matrix does not have shape n × np.
    CoefficientShape { expected: (usize, usize), actual: (usize, usize) },

    // ---- Wrapped ----
    /// Long-run covariance of the moment contributions failed.
    Inference(InferenceError),
}

impl std::error::Error for VarError {}

impl std::fmt::Display for VarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            VarError::EmptySeries { rows, cols } => {
                write!(f, "Data matrix must be non-empty; got {rows} rows and {cols} columns.")
            }
            VarError::NonFiniteData { row, col, value } => {
                write!(f, "Data point at ({row}, {col}) is non-finite: {value}")
            }
            VarError::NonFiniteInstrument { index, value } => {
                write!(f, "Instrument value at index {index} is non-finite: {value}")
            }
            VarError::InstrumentLengthMismatch { expected, actual } => {
                write!(f, "Instrument length mismatch: expected {expected}, got {actual}")
            }
            // ---- Options ----
            VarError::InvalidLagOrder { lags } => {
                write!(f, "Lag order must be at least 1; got {lags}")
            }
            // ---- Least squares ----
            VarError::InsufficientObservations { effective, regressors } => write!(
                f,
                "Effective sample ({effective}) must exceed the number of regressors ({regressors})."
            ),
            VarError::SingularRegressors => {
                write!(f, "Regressor cross-product X'X is not positive definite.")
            }
            // ---- Moving-average construction ----
            VarError::CoefficientShape { expected, actual } => write!(
                f,
                "Lag-coefficient matrix must be {}x{}; got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
            // ---- Wrapped ----
            VarError::Inference(err) => write!(f, "{err}"),
        }
    }
}

impl From<InferenceError> for VarError {
    fn from(err: InferenceError) -> VarError {
        VarError::Inference(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<VarError> for PyErr {
    fn from(err: VarError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Display messages embed the offending values for the common
    // validation failures.
    //
    // Given
    // -----
    // - `InstrumentLengthMismatch`, `InsufficientObservations`, and
    //   `CoefficientShape` values.
    //
    // Expect
    // ------
    // - Each message contains its payload.
    fn var_error_display_embeds_payload() {
        let mismatch = VarError::InstrumentLengthMismatch { expected: 10, actual: 9 };
        assert!(mismatch.to_string().contains("expected 10, got 9"));

        let short = VarError::InsufficientObservations { effective: 3, regressors: 5 };
        assert!(short.to_string().contains("(3)") && short.to_string().contains("(5)"));

        let shape = VarError::CoefficientShape { expected: (2, 4), actual: (2, 3) };
        assert!(shape.to_string().contains("2x4") && shape.to_string().contains("2x3"));
    }

    #[test]
    // Purpose
    // -------
    // Inference failures are wrapped transparently.
    //
    // Given
    // -----
    // - An `InferenceError::EmptyMoments`.
    //
    // Expect
    // ------
    // - `VarError::from` yields `VarError::Inference` with the same message.
    fn var_error_wraps_inference_error() {
        let inner = InferenceError::EmptyMoments { rows: 0, cols: 2 };
        let wrapped = VarError::from(inner.clone());
        assert_eq!(wrapped, VarError::Inference(inner.clone()));
        assert_eq!(wrapped.to_string(), inner.to_string());
    }
}
