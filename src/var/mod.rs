//! var — reduced-form VAR(p): estimation and moving-average tensors.
//!
//! Purpose
//! -------
//! Supply everything the SVAR-IV engine needs from the reduced form:
//! validated input series, least-squares estimates with the covariance of
//! their moment conditions, and the MA coefficients `C[h]` with their
//! derivatives `G[h]` (plus cumulative sums).
//!
//! Key behaviors
//! -------------
//! - [`VarData`] validates the endogenous series and instrument once.
//! - [`estimate_reduced_form`] fits a VAR(p) with intercept and builds
//!   `Σ`, `Γ`, and `Ŵ`.
//! - [`MovingAverageProvider`] is the seam the engine consumes;
//!   [`VarMaProvider`] implements it in closed form.
//!
//! Conventions
//! -----------
//! - Data are `T × n`; residuals are `n × T`.
//! - `AL = [A_1 … A_p]` is `n × np`; `vec` is column-major.
//!
//! Testing notes
//! -------------
//! - Derivatives are checked against finite differences; the estimator is
//!   checked on simulated VAR(1) data.

pub mod data;
pub mod derivatives;
pub mod errors;
pub mod estimate;
pub mod ma;
pub mod options;
pub mod tensor;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::data::VarData;
pub use self::errors::{VarError, VarResult};
pub use self::estimate::{ReducedFormEstimate, estimate_reduced_form};
pub use self::ma::{MovingAverageProvider, VarMaProvider};
pub use self::options::VarOptions;
pub use self::tensor::{DerivativeTensor, HorizonTensor, MaTensor};

// ---- Optional convenience prelude for downstream crates ------------------

pub mod prelude {
    pub use super::data::VarData;
    pub use super::errors::{VarError, VarResult};
    pub use super::estimate::{ReducedFormEstimate, estimate_reduced_form};
    pub use super::ma::{MovingAverageProvider, VarMaProvider};
    pub use super::options::VarOptions;
}
