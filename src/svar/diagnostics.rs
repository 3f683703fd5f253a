//! svar::diagnostics — first-stage strength of the external instrument.
//!
//! Purpose
//! -------
//! Report the first-stage Wald statistic `W = (√T·Γₙ)² / W2[n,n]` and
//! compare it with the critical value. When `W > cv` the robust confidence
//! set is a bounded interval at every horizon (equivalently `a > 0` in the
//! robust quadratic); otherwise it may be unbounded.
//!
//! Key behaviors
//! -------------
//! - The χ²(1) upper-tail p-value of `W` is reported alongside.
//! - With `display = true` the report is emitted as a `tracing` event at
//!   `info` level. A weak first stage always emits a `warn` event.
//! - Nothing here fails: a zero `W2[n,n]` yields `W = ∞`.
use statrs::distribution::{ChiSquared, ContinuousCDF};
use tracing::{info, warn};

/// FirstStageDiagnostics — Wald statistic and boundedness verdict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirstStageDiagnostics {
    wald: f64,
    critical_value: f64,
    p_value: f64,
    confidence: f64,
    bounded_guaranteed: bool,
}

impl FirstStageDiagnostics {
    /// Compute the first-stage statistic.
    ///
    /// Parameters
    /// ----------
    /// - `gamma_norm`: `Γₙ`.
    /// - `w2_norm`: `W2[n,n]`, the asymptotic variance of `√T·Γₙ`.
    /// - `n_obs`: `T`.
    /// - `critical_value`: squared two-sided normal quantile.
    /// - `confidence`: nominal level, carried for reporting.
    pub fn compute(
        gamma_norm: f64, w2_norm: f64, n_obs: usize, critical_value: f64, confidence: f64,
    ) -> Self {
        let scaled = (n_obs as f64).sqrt() * gamma_norm;
        let wald = scaled * scaled / w2_norm;
        let p_value = ChiSquared::new(1.0).map_or(f64::NAN, |dist| 1.0 - dist.cdf(wald));
        FirstStageDiagnostics {
            wald,
            critical_value,
            p_value,
            confidence,
            bounded_guaranteed: wald > critical_value,
        }
    }

    pub fn wald(&self) -> f64 {
        self.wald
    }

    pub fn critical_value(&self) -> f64 {
        self.critical_value
    }

    /// χ²(1) upper-tail p-value of [`Self::wald`].
    pub fn p_value(&self) -> f64 {
        self.p_value
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// `true` when every robust set is a bounded interval.
    pub fn bounded_guaranteed(&self) -> bool {
        self.bounded_guaranteed
    }

    /// Emit the report through `tracing`.
    pub fn report(&self, display: bool) {
        if display {
            info!(
                wald = self.wald,
                critical_value = self.critical_value,
                p_value = self.p_value,
                confidence = self.confidence,
                bounded_guaranteed = self.bounded_guaranteed,
                "first-stage Wald statistic"
            );
        }
        if !self.bounded_guaranteed {
            warn!(
                wald = self.wald,
                critical_value = self.critical_value,
                "first-stage Wald statistic does not exceed the critical value; \
                 robust confidence sets may be unbounded"
            );
        }
    }
}
