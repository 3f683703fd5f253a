//! Kernel tapers for long-run covariance estimation.
//!
//! This module provides:
//! - A `KernelType` enum with the usual long-run tapers (IID, Bartlett/Newey–West,
//!   Parzen, Quadratic Spectral).
//! - Per-lag weights `w(x)` where `x = k/(L+1)`.
//! - Case-insensitive parsing from strings for the Python-facing layer.
//!
//! Conventions:
//! - The bandwidth `L` is always supplied by the caller. Moment covariances in
//!   SVAR-IV inference are computed with a fixed lag truncation (the usual default
//!   is `L = 0`, i.e. the IID outer product).
use crate::inference::errors::InferenceError;
use std::str::FromStr;

/// Long-run covariance taper family.
///
/// - `IID`: no serial correlation; only `k=0` contributes (weight=1 at 0, else 0).
/// - `Bartlett`: triangular (Newey–West) kernel, compact support on |x|≤1.
/// - `Parzen`: smoother compact-support kernel with heavier down-weighting at high lags.
/// - `QuadraticSpectral`: infinite-support taper with high large-sample efficiency.
///
/// The taper argument is taken as `x = k/(L+1)` to avoid divide-by-zero at `k=L`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelType {
    IID,
    Bartlett,
    Parzen,
    QuadraticSpectral,
}

impl KernelType {
    /// Evaluate the kernel weight at the given taper argument.
    ///
    /// # Arguments
    /// - `input`: real number, typically `x = k/(L+1)` where `k` is the lag and `L` the bandwidth.
    ///
    /// # Returns
    /// Kernel value `w(x)`. For `IID`, returns 1.0 at `x=0` and 0.0 otherwise.
    pub fn weight(&self, input: f64) -> f64 {
        let abs_input = input.abs();
        match self {
            KernelType::IID => {
                if input == 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            KernelType::Bartlett => {
                if abs_input <= 1.0 {
                    1.0 - abs_input
                } else {
                    0.0
                }
            }
            KernelType::Parzen => {
                if abs_input <= 0.5 {
                    let sq = abs_input * abs_input;
                    1.0 - 6.0 * sq + 6.0 * abs_input * sq
                } else if abs_input <= 1.0 {
                    2.0 * (1.0 - abs_input).powi(3)
                } else {
                    0.0
                }
            }
            KernelType::QuadraticSpectral => {
                if input == 0.0 {
                    return 1.0;
                }
                let pi_x = std::f64::consts::PI * input;
                let arg = 6.0 * pi_x / 5.0;
                (25.0 / (12.0 * pi_x * pi_x)) * (arg.sin() / arg - arg.cos())
            }
        }
    }
}

impl FromStr for KernelType {
    type Err = InferenceError;

    /// Parse a kernel choice from a string (case-insensitive).
    ///
    /// Accepts `"iid"`, `"bartlett"` / `"newey_west"`, `"parzen"`, and
    /// `"quadratic_spectral"` / `"qs"`. Any other value returns
    /// `InferenceError::InvalidKernel`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "iid" => Ok(KernelType::IID),
            "bartlett" | "newey_west" => Ok(KernelType::Bartlett),
            "parzen" => Ok(KernelType::Parzen),
            "quadratic_spectral" | "quadraticspectral" | "qs" => Ok(KernelType::QuadraticSpectral),
            other => Err(InferenceError::InvalidKernel { name: other.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    // Purpose
    // -------
    // Every kernel must put full weight on lag zero.
    //
    // Given
    // -----
    // - All four kernel variants evaluated at x = 0.
    //
    // Expect
    // ------
    // - w(0) = 1 for each kernel.
    fn kernel_weight_is_one_at_origin() {
        for kernel in [
            KernelType::IID,
            KernelType::Bartlett,
            KernelType::Parzen,
            KernelType::QuadraticSpectral,
        ] {
            assert_relative_eq!(kernel.weight(0.0), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Check the closed-form Bartlett and Parzen weights at interior points
    // and the compact support outside |x| ≤ 1.
    //
    // Given
    // -----
    // - x = 0.25 (Parzen inner branch), x = 0.75 (Parzen outer branch),
    //   x = 1.5 (outside the support).
    //
    // Expect
    // ------
    // - Bartlett: 1 - |x| inside, 0 outside.
    // - Parzen: 1 - 6x² + 6|x|³ for |x| ≤ 1/2, 2(1-|x|)³ otherwise.
    // - IID: 0 away from the origin.
    fn kernel_weight_matches_closed_forms() {
        assert_relative_eq!(KernelType::Bartlett.weight(0.25), 0.75, epsilon = 1e-12);
        assert_relative_eq!(KernelType::Bartlett.weight(-0.25), 0.75, epsilon = 1e-12);
        assert_eq!(KernelType::Bartlett.weight(1.5), 0.0);

        let inner = 1.0 - 6.0 * 0.0625 + 6.0 * 0.015625;
        assert_relative_eq!(KernelType::Parzen.weight(0.25), inner, epsilon = 1e-12);
        assert_relative_eq!(KernelType::Parzen.weight(0.75), 2.0 * 0.25_f64.powi(3), epsilon = 1e-12);
        assert_eq!(KernelType::Parzen.weight(1.5), 0.0);

        assert_eq!(KernelType::IID.weight(0.5), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify case-insensitive parsing and the error path for unknown names.
    //
    // Given
    // -----
    // - Aliases "Newey_West", "QS", and an unknown name "triangle".
    //
    // Expect
    // ------
    // - Aliases map to Bartlett and QuadraticSpectral.
    // - The unknown name yields `InferenceError::InvalidKernel`.
    fn kernel_from_str_accepts_aliases_and_rejects_unknown() {
        assert_eq!("Newey_West".parse::<KernelType>(), Ok(KernelType::Bartlett));
        assert_eq!("QS".parse::<KernelType>(), Ok(KernelType::QuadraticSpectral));
        match "triangle".parse::<KernelType>() {
            Err(InferenceError::InvalidKernel { name }) => assert_eq!(name, "triangle"),
            other => panic!("expected InvalidKernel, got {other:?}"),
        }
    }
}
