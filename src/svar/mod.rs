//! svar — weak-instrument-robust inference for SVAR-IV impulse responses.
//!
//! Purpose
//! -------
//! Turn reduced-form estimates and the covariance of their moment vector
//! into confidence sets for impulse responses identified by an external
//! instrument: a Fieller-type set that stays valid under a weak first
//! stage, the conventional delta-method interval, a recursive benchmark,
//! the implied structural shock series, and a first-stage diagnostic.
//!
//! Key behaviors
//! -------------
//! - [`ReducedFormModel`] validates dimensions once; [`InferenceOptions`]
//!   validates the request.
//! - [`SvarIvOutcome`] orchestrates a single request and returns every
//!   result family (levels and cumulative).
//! - Robust sets are tagged values ([`ConfidenceSet`]) with numeric case
//!   codes ([`QuadraticCase`]); unbounded and empty sets are results.
//!
//! Invariants & assumptions
//! ------------------------
//! - The normalization cell `(nvar, h = 0)` is pinned to `[scale, scale]`.
//! - Both engines read the same MA/derivative tensors and covariance
//!   blocks; nothing is mutated after construction.
//!
//! Conventions
//! -----------
//! - `norm_var` is 1-based at the API boundary and 0-based internally.
//! - Result matrices are `n × (H + 1)` with rows = variables.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each component; `engine` covers the strong-
//!   and weak-instrument scenarios end to end on a synthetic model.

pub mod cholesky;
pub mod delta;
pub mod diagnostics;
pub mod engine;
pub mod errors;
pub mod irf;
pub mod model;
pub mod options;
pub mod robust;
pub mod shocks;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::cholesky::CholeskyBenchmark;
pub use self::delta::DeltaMethodSolution;
pub use self::diagnostics::FirstStageDiagnostics;
pub use self::engine::{PluginInference, RobustInference, SvarIvOutcome};
pub use self::errors::{SvarError, SvarResult};
pub use self::irf::IrfGrid;
pub use self::model::{CovarianceBlocks, ReducedFormModel};
pub use self::options::InferenceOptions;
pub use self::robust::{ConfidenceSet, QuadraticCase, QuadraticSolution};
pub use self::shocks::StructuralShockSeries;

// ---- Optional convenience prelude for downstream crates ------------------

pub mod prelude {
    pub use super::engine::{PluginInference, RobustInference, SvarIvOutcome};
    pub use super::errors::{SvarError, SvarResult};
    pub use super::model::ReducedFormModel;
    pub use super::options::InferenceOptions;
    pub use super::robust::{ConfidenceSet, QuadraticCase};
}
