//! svar::options — per-request configuration of SVAR-IV inference.
//!
//! Purpose
//! -------
//! Hold the request-level knobs (confidence level, normalization variable,
//! scale, number of horizons, diagnostics display) and derive the critical
//! value shared by the robust and delta-method engines.
//!
//! Invariants & assumptions
//! ------------------------
//! - `0 < confidence < 1`.
//! - `norm_var ≥ 1` (1-based); the upper bound `norm_var ≤ n` depends on the
//!   model and is checked by [`InferenceOptions::check_norm_var`].
//! - `scale` is finite and nonzero.
use crate::svar::errors::{SvarError, SvarResult};
use statrs::distribution::{ContinuousCDF, Normal};

/// InferenceOptions — request configuration for the confidence-set engine.
///
/// Fields
/// ------
/// - `confidence`: `f64`
///   Nominal coverage in (0, 1).
/// - `norm_var`: `usize`
///   1-based index of the variable whose horizon-0 response is normalized.
/// - `scale`: `f64`
///   Size of that normalized response (`x` in the formulas).
/// - `horizons`: `usize`
///   Largest horizon `H`; results cover `h = 0..=H`.
/// - `display_diagnostics`: `bool`
///   Emit the first-stage report at `info` level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InferenceOptions {
    confidence: f64,
    norm_var: usize,
    scale: f64,
    horizons: usize,
    display_diagnostics: bool,
}

impl InferenceOptions {
    /// Construct validated options.
    ///
    /// Errors
    /// ------
    /// - `SvarError::InvalidConfidence` when `confidence ∉ (0, 1)` or NaN.
    /// - `SvarError::InvalidNormalizationVariable` when `norm_var == 0`.
    /// - `SvarError::InvalidScale` when `scale` is zero or non-finite.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_svar_iv::svar::InferenceOptions;
    /// let opts = InferenceOptions::new(0.95, 1, 1.0, 20, false).unwrap();
    /// assert!((opts.critical_value() - 3.8415).abs() < 1e-3);
    /// ```
    pub fn new(
        confidence: f64, norm_var: usize, scale: f64, horizons: usize, display_diagnostics: bool,
    ) -> SvarResult<Self> {
        if !(confidence > 0.0 && confidence < 1.0) {
            return Err(SvarError::InvalidConfidence { value: confidence });
        }
        if norm_var == 0 {
            return Err(SvarError::InvalidNormalizationVariable { norm_var, n_vars: 0 });
        }
        if !scale.is_finite() || scale == 0.0 {
            return Err(SvarError::InvalidScale { value: scale });
        }
        Ok(InferenceOptions { confidence, norm_var, scale, horizons, display_diagnostics })
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// 1-based normalization variable.
    pub fn norm_var(&self) -> usize {
        self.norm_var
    }

    /// 0-based position of the normalization variable.
    pub fn norm_index(&self) -> usize {
        self.norm_var - 1
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn horizons(&self) -> usize {
        self.horizons
    }

    pub fn display_diagnostics(&self) -> bool {
        self.display_diagnostics
    }

    /// Squared two-sided standard-normal quantile,
    /// `Φ⁻¹(1 − (1 − confidence)/2)²`.
    pub fn critical_value(&self) -> f64 {
        let q = 1.0 - (1.0 - self.confidence) / 2.0;
        Normal::new(0.0, 1.0).map_or(f64::NAN, |dist| dist.inverse_cdf(q).powi(2))
    }

    /// Check `norm_var ≤ n_vars` for a concrete model.
    pub fn check_norm_var(&self, n_vars: usize) -> SvarResult<()> {
        if self.norm_var > n_vars {
            return Err(SvarError::InvalidNormalizationVariable {
                norm_var: self.norm_var,
                n_vars,
            });
        }
        Ok(())
    }
}

impl Default for InferenceOptions {
    fn default() -> Self {
        InferenceOptions {
            confidence: 0.95,
            norm_var: 1,
            scale: 1.0,
            horizons: 20,
            display_diagnostics: false,
        }
    }
}
