//! inference — long-run covariance of moment contributions.
//!
//! Purpose
//! -------
//! Provide the covariance machinery that turns per-observation moment
//! contributions of the reduced-form estimator into the asymptotic
//! covariance `Ŵ` of the stacked vector `(vec(A), Γ)` consumed by the
//! SVAR-IV confidence-set engine.
//!
//! Key behaviors
//! -------------
//! - Define a unified error and result type, [`InferenceError`] and
//!   [`InferenceResult`], for moment-matrix and configuration failures.
//! - Configure the estimator via [`LongRunOptions`] (kernel, fixed
//!   bandwidth, centering, small-sample correction).
//! - Enumerate kernel tapers with [`KernelType`].
//! - Build the covariance with [`long_run_covariance`].
//!
//! Conventions
//! -----------
//! - Moment matrices are `T × m` with rows indexing time.
//! - Covariances are on the *average-moment* scale, so the implied
//!   variance of a sample mean is `Ŵ / T`.
//! - Functions are pure: no logging and no global state. Failures are
//!   reported via [`InferenceResult`] only.
//!
//! Testing notes
//! -------------
//! - Unit tests cover kernel weights and parsing, the IID reduction,
//!   a hand-computed Bartlett case, symmetry, centering invariance, and
//!   validation errors.

pub mod errors;
pub mod kernel;
pub mod long_run;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{InferenceError, InferenceResult};
pub use self::kernel::KernelType;
pub use self::long_run::{LongRunOptions, long_run_covariance};

// ---- Optional convenience prelude for downstream crates ------------------

pub mod prelude {
    pub use super::errors::{InferenceError, InferenceResult};
    pub use super::kernel::KernelType;
    pub use super::long_run::{LongRunOptions, long_run_covariance};
}
