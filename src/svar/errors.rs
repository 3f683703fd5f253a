//! Errors for SVAR-IV inference (input dimensions, option validation, and
//! numerical failures of the reduced-form inputs).
//!
//! This module defines [`SvarError`], the single error type returned by the
//! confidence-set engine and its building blocks. It implements
//! `Display`/`Error` and, with the `python-bindings` feature, converts to
//! `PyErr` for PyO3.
//!
//! ## Conventions
//! - Matrix indices in payloads are **0-based**; the normalization variable
//!   is reported **1-based**, matching how it is configured.
//! - Degenerate confidence sets (excluded interval, empty set, whole line)
//!   are results, not errors, and never appear here.
//! - Errors from the reduced-form layer are wrapped in [`SvarError::Var`]
//!   and [`SvarError::Inference`].
use crate::{inference::errors::InferenceError, var::errors::VarError};

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for SVAR-IV operations that may produce [`SvarError`].
pub type SvarResult<T> = Result<T, SvarError>;

/// Unified error type for SVAR-IV inference.
#[derive(Debug, Clone, PartialEq)]
pub enum SvarError {
    // ---- Dimensions ----
    /// An input matrix/vector does not have the shape implied by `(n, p)`.
    DimensionMismatch { what: &'static str, expected: (usize, usize), actual: (usize, usize) },

    /// The residual matrix has no columns.
    EmptySample,

    // ---- Numerical ----
    /// A matrix required to be positive definite is not.
    NotPositiveDefinite { what: &'static str },

    /// A linear system could not be solved.
    SingularMatrix { what: &'static str },

    /// `Gamma[nvar]` is exactly zero, so the normalization is undefined.
    ZeroNormalization { norm_var: usize },

    /// The Cholesky impulse column has a zero entry at the normalization
    /// variable and cannot be rescaled. Returned by `cholesky_benchmark`;
    /// the engine reports an all-NaN benchmark instead.
    ZeroCholeskyEntry { norm_var: usize },

    /// The recovered shock series cannot be standardized.
    DegenerateShockSeries { n_obs: usize, std_dev: f64 },

    // ---- Options ----
    /// Confidence level must lie strictly inside (0, 1).
    InvalidConfidence { value: f64 },

    /// Normalization variable must satisfy `1 ≤ nvar ≤ n`.
    InvalidNormalizationVariable { norm_var: usize, n_vars: usize },

    /// Scale must be finite and nonzero.
    InvalidScale { value: f64 },

    // ---- Wrapped ----
    /// Reduced-form estimation or MA construction failed.
    Var(VarError),

    /// Long-run covariance construction failed.
    Inference(InferenceError),
}

impl std::error::Error for SvarError {}

impl std::fmt::Display for SvarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Dimensions ----
            SvarError::DimensionMismatch { what, expected, actual } => write!(
                f,
                "Dimension mismatch for {what}: expected {}x{}, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
            SvarError::EmptySample => {
                write!(f, "Residual matrix must have at least one observation.")
            }
            // ---- Numerical ----
            SvarError::NotPositiveDefinite { what } => {
                write!(f, "{what} is not symmetric positive definite.")
            }
            SvarError::SingularMatrix { what } => write!(f, "{what} is singular."),
            SvarError::ZeroNormalization { norm_var } => write!(
                f,
                "Instrument covariance is exactly zero for normalization variable {norm_var}."
            ),
            SvarError::ZeroCholeskyEntry { norm_var } => write!(
                f,
                "Cholesky impulse column is zero at normalization variable {norm_var}."
            ),
            SvarError::DegenerateShockSeries { n_obs, std_dev } => write!(
                f,
                "Structural shock series cannot be standardized: {n_obs} observations, \
                 standard deviation {std_dev}"
            ),
            // ---- Options ----
            SvarError::InvalidConfidence { value } => {
                write!(f, "Confidence level must lie in (0, 1); got {value}")
            }
            SvarError::InvalidNormalizationVariable { norm_var, n_vars } => write!(
                f,
                "Normalization variable must lie in 1..={n_vars}; got {norm_var}"
            ),
            SvarError::InvalidScale { value } => {
                write!(f, "Scale must be finite and nonzero; got {value}")
            }
            // ---- Wrapped ----
            SvarError::Var(err) => write!(f, "{err}"),
            SvarError::Inference(err) => write!(f, "{err}"),
        }
    }
}

impl From<VarError> for SvarError {
    fn from(err: VarError) -> SvarError {
        SvarError::Var(err)
    }
}

impl From<InferenceError> for SvarError {
    fn from(err: InferenceError) -> SvarError {
        SvarError::Inference(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<SvarError> for PyErr {
    fn from(err: SvarError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Display output names the offending input and its shape.
    //
    // Given
    // -----
    // - A `DimensionMismatch` for `WHat` and an `InvalidNormalizationVariable`.
    //
    // Expect
    // ------
    // - Messages contain the label and both shapes / the valid range.
    fn svar_error_display_includes_context() {
        let dim = SvarError::DimensionMismatch { what: "WHat", expected: (6, 6), actual: (5, 5) };
        let msg = dim.to_string();
        assert!(msg.contains("WHat") && msg.contains("6x6") && msg.contains("5x5"));

        let nvar = SvarError::InvalidNormalizationVariable { norm_var: 3, n_vars: 2 };
        assert!(nvar.to_string().contains("1..=2"));
    }

    #[test]
    // Purpose
    // -------
    // Lower-layer errors convert into `SvarError` without losing their message.
    //
    // Given
    // -----
    // - A `VarError::SingularRegressors` and an `InferenceError::InvalidKernel`.
    //
    // Expect
    // ------
    // - `SvarError::Var` / `SvarError::Inference` with identical Display text.
    fn svar_error_wraps_lower_layers() {
        let var = SvarError::from(VarError::SingularRegressors);
        assert_eq!(var.to_string(), VarError::SingularRegressors.to_string());

        let inner = InferenceError::InvalidKernel { name: "box".to_string() };
        let inf = SvarError::from(inner.clone());
        assert_eq!(inf, SvarError::Inference(inner));
    }
}
