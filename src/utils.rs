//! utils — conversion helpers for the Python bindings.
//!
//! Every item here is compiled only with the `python-bindings` feature.
//! The helpers accept NumPy arrays, pandas objects (via `to_numpy`), or
//! plain Python sequences and return owned `ndarray` values or validated
//! option structs; errors surface as `ValueError`/`TypeError`.

#[cfg(feature = "python-bindings")]
use ndarray::{Array1, Array2};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::inference::{kernel::KernelType, long_run::LongRunOptions};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
    PyReadonlyArray2,
};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Copy a 1-D float input into an owned `Array1`.
#[cfg(feature = "python-bindings")]
pub fn extract_vector<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>, name: &str,
) -> PyResult<Array1<f64>> {
    let arr = extract_f64_array(py, raw_data)?;
    let slice = arr.as_slice().map_err(|_| {
        PyValueError::new_err(format!("{name} must be a 1-D contiguous float64 array or sequence"))
    })?;
    Ok(Array1::from(slice.to_vec()))
}

/// Copy a 2-D float input (rows = time) into an owned `Array2`.
///
/// Accepts a 2-D `numpy.ndarray`, a `pandas.DataFrame`, or a sequence of
/// equal-length rows.
#[cfg(feature = "python-bindings")]
pub fn extract_matrix<'py>(raw_data: &Bound<'py, PyAny>, name: &str) -> PyResult<Array2<f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr_ro.as_array().to_owned());
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (), None) {
        if let Ok(frame_ro) = obj.extract::<PyReadonlyArray2<f64>>() {
            return Ok(frame_ro.as_array().to_owned());
        }
    }

    let rows: Vec<Vec<f64>> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(format!(
            "{name} must be a 2-D numpy.ndarray, pandas.DataFrame, or sequence of rows"
        ))
    })?;
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|r| r.len() != n_cols) {
        return Err(PyValueError::new_err(format!("{name} rows must all have the same length")));
    }
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((n_rows, n_cols), flat)
        .map_err(|e| PyValueError::new_err(format!("{name}: {e}")))
}

#[cfg(feature = "python-bindings")]
pub fn extract_long_run_options(
    kernel: Option<&str>, bandwidth: Option<usize>, center: Option<bool>,
    small_sample_correction: Option<bool>,
) -> PyResult<LongRunOptions> {
    use std::str::FromStr;

    let kernel_type = match kernel {
        Some(name) => KernelType::from_str(name)?,
        None => KernelType::Bartlett,
    };
    let bandwidth_val = bandwidth.unwrap_or(0);
    let center_val = center.unwrap_or(false);
    let ssc_val = small_sample_correction.unwrap_or(false);

    Ok(LongRunOptions::new(bandwidth_val, kernel_type, center_val, ssc_val))
}
