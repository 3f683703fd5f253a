//! rust_svar_iv — weak-instrument-robust SVAR-IV inference with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! SVAR-IV impulse-response inference to Python via the `_rust_svar_iv`
//! extension module.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules: `var` (reduced-form estimation and MA
//!   tensors), `inference` (long-run covariance of moment contributions), and
//!   `svar` (robust and delta-method confidence sets).
//! - Define the `SvarIv` `#[pyclass]` and the `#[pymodule]` initializer when
//!   the `python-bindings` feature is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file performs only
//!   FFI glue, input conversion, and error mapping.
//! - The library emits `tracing` events but never installs a subscriber.
//!
//! Conventions
//! -----------
//! - Data matrices are `T × n` (rows = time). Result matrices are
//!   `n × (H + 1)` (rows = variables, columns = horizons).
//! - The normalization variable is 1-based at every public boundary.
//!
//! Downstream usage
//! ----------------
//! - Rust callers build a [`svar::ReducedFormModel`] (directly or from
//!   [`var::estimate_reduced_form`]) and call [`svar::SvarIvOutcome::compute`].
//! - Python callers construct `SvarIv(y, z, p, ...)` and read bound matrices
//!   as NumPy arrays.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by the
//!   simulated end-to-end pipeline under `tests/`.

pub mod inference;
pub(crate) mod linalg;
pub mod svar;
pub mod utils;
pub mod var;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1, PyArray2};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    svar::{InferenceOptions, SvarIvOutcome},
    utils::{extract_long_run_options, extract_matrix, extract_vector},
    var::{VarData, VarOptions},
};

/// SvarIv — Python-facing wrapper for SVAR-IV impulse-response inference.
///
/// Purpose
/// -------
/// Estimate a VAR(p) from `y`, identify the shock targeted by the external
/// instrument `z`, and expose robust, delta-method, and Cholesky results.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `SvarIv(y, z, p=1, confidence=0.95, norm_var=1, scale=1.0, horizons=20,
/// display_diagnostics=False, kernel=None, bandwidth=None, center=None,
/// small_sample_correction=None)`:
/// - `y`: `T × n` array-like of endogenous variables.
/// - `z`: length-`T` array-like instrument.
/// - `kernel`, `bandwidth`, `center`, `small_sample_correction`: long-run
///   covariance policy for the moment vector (default: outer product).
///
/// Notes
/// -----
/// - Invalid inputs raise `ValueError` with the message of the underlying
///   Rust error.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_svar_iv.svar")]
pub struct SvarIv {
    inner: SvarIvOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl SvarIv {
    #[new]
    #[pyo3(
        text_signature = "(y, z, /, p=1, confidence=0.95, norm_var=1, scale=1.0, horizons=20, \
                          display_diagnostics=False, kernel=None, bandwidth=None, center=None, \
                          small_sample_correction=None)",
        signature = (
            y, z, p = 1, confidence = 0.95, norm_var = 1, scale = 1.0, horizons = 20,
            display_diagnostics = false, kernel = None, bandwidth = None, center = None,
            small_sample_correction = None
        )
    )]
    #[allow(clippy::too_many_arguments)]
    pub fn new<'py>(
        py: Python<'py>, y: &Bound<'py, PyAny>, z: &Bound<'py, PyAny>, p: usize, confidence: f64,
        norm_var: usize, scale: f64, horizons: usize, display_diagnostics: bool,
        kernel: Option<&str>, bandwidth: Option<usize>, center: Option<bool>,
        small_sample_correction: Option<bool>,
    ) -> PyResult<SvarIv> {
        let y_arr = extract_matrix(y, "y")?;
        let z_arr = extract_vector(py, z, "z")?;
        let data = VarData::new(y_arr, z_arr)?;

        let long_run = extract_long_run_options(kernel, bandwidth, center, small_sample_correction)?;
        let var_opts = VarOptions::new(p, long_run)?;
        let opts =
            InferenceOptions::new(confidence, norm_var, scale, horizons, display_diagnostics)?;

        let inner = SvarIvOutcome::from_data(&data, &var_opts, &opts)?;
        Ok(SvarIv { inner })
    }

    /// Robust lower bounds (`n × (H + 1)`); for case 2 the excluded interval's start.
    #[getter]
    pub fn robust_lower<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.robust_bounds(false).0.into_pyarray(py)
    }

    /// Robust upper bounds (`n × (H + 1)`); for case 2 the excluded interval's end.
    #[getter]
    pub fn robust_upper<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.robust_bounds(false).1.into_pyarray(py)
    }

    #[getter]
    pub fn robust_lower_cumulative<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.robust_bounds(true).0.into_pyarray(py)
    }

    #[getter]
    pub fn robust_upper_cumulative<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.robust_bounds(true).1.into_pyarray(py)
    }

    /// Case codes in {1, 2, 3, 4}.
    #[getter]
    pub fn cases<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<u8>> {
        self.inner.case_codes(false).into_pyarray(py)
    }

    #[getter]
    pub fn cases_cumulative<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<u8>> {
        self.inner.case_codes(true).into_pyarray(py)
    }

    #[getter]
    pub fn delta_lower<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.delta_bounds(false).0.into_pyarray(py)
    }

    #[getter]
    pub fn delta_upper<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.delta_bounds(false).1.into_pyarray(py)
    }

    #[getter]
    pub fn delta_lower_cumulative<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.delta_bounds(true).0.into_pyarray(py)
    }

    #[getter]
    pub fn delta_upper_cumulative<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.delta_bounds(true).1.into_pyarray(py)
    }

    /// Plug-in impulse responses.
    #[getter]
    pub fn irf<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.plugin.irf.clone().into_pyarray(py)
    }

    #[getter]
    pub fn irf_cumulative<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.plugin.irf_cumulative.clone().into_pyarray(py)
    }

    #[getter]
    pub fn std_error<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.plugin.std_error.clone().into_pyarray(py)
    }

    #[getter]
    pub fn std_error_cumulative<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.plugin.std_error_cumulative.clone().into_pyarray(py)
    }

    /// Cholesky benchmark responses; all NaN when the first Cholesky column
    /// is zero at `norm_var`.
    #[getter]
    pub fn cholesky_irf<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.cholesky.levels.clone().into_pyarray(py)
    }

    #[getter]
    pub fn cholesky_irf_cumulative<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.cholesky.cumulative.clone().into_pyarray(py)
    }

    /// Recovered structural shock series (length `T`).
    #[getter]
    pub fn shocks<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.plugin.shocks.raw.clone().into_pyarray(py)
    }

    #[getter]
    pub fn shocks_standardized<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.plugin.shocks.standardized.clone().into_pyarray(py)
    }

    /// First-stage Wald statistic.
    #[getter]
    pub fn wald_statistic(&self) -> f64 {
        self.inner.robust.diagnostics.wald()
    }

    #[getter]
    pub fn wald_pvalue(&self) -> f64 {
        self.inner.robust.diagnostics.p_value()
    }

    #[getter]
    pub fn critical_value(&self) -> f64 {
        self.inner.robust.critical_value
    }

    /// Whether every robust set is guaranteed to be a bounded interval.
    #[getter]
    pub fn bounded_guaranteed(&self) -> bool {
        self.inner.robust.diagnostics.bounded_guaranteed()
    }

    /// Effective sample size `T`.
    #[getter]
    pub fn n_obs(&self) -> usize {
        self.inner.robust.n_obs
    }
}

/// _rust_svar_iv — PyO3 module initializer for the Python extension.
///
/// Purpose
/// -------
/// Define the `_rust_svar_iv` Python module and register the `svar`
/// submodule, including its `sys.modules` entry so that dotted imports work.
///
/// Errors
/// ------
/// - `PyErr`
///   If creating the submodule or manipulating `sys.modules` fails.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_svar_iv<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let svar_mod = PyModule::new(_py, "svar")?;
    svar_module(_py, m, &svar_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("rust_svar_iv.svar", svar_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn svar_module<'py>(
    _py: Python, rust_svar_iv: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<SvarIv>()?;
    rust_svar_iv.add_submodule(m)?;
    Ok(())
}
