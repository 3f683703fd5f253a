//! var::options — configuration of the reduced-form estimator.
use crate::{
    inference::long_run::LongRunOptions,
    var::errors::{VarError, VarResult},
};

/// VarOptions — lag order and moment-covariance policy.
///
/// Fields
/// ------
/// - `lags`: `usize`
///   VAR lag order `p ≥ 1`. An intercept is always included.
/// - `long_run`: [`LongRunOptions`]
///   Kernel/bandwidth policy used for the covariance `Ŵ` of the stacked
///   moment vector. The default (`L = 0`) gives the heteroskedasticity-
///   robust outer product.
#[derive(Debug, Clone, PartialEq)]
pub struct VarOptions {
    pub lags: usize,
    pub long_run: LongRunOptions,
}

impl VarOptions {
    /// Construct validated options.
    ///
    /// Errors
    /// ------
    /// - `VarError::InvalidLagOrder` when `lags == 0`.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_svar_iv::inference::LongRunOptions;
    /// # use rust_svar_iv::var::VarOptions;
    /// let opts = VarOptions::new(2, LongRunOptions::default()).unwrap();
    /// assert_eq!(opts.lags, 2);
    /// assert!(VarOptions::new(0, LongRunOptions::default()).is_err());
    /// ```
    pub fn new(lags: usize, long_run: LongRunOptions) -> VarResult<Self> {
        if lags == 0 {
            return Err(VarError::InvalidLagOrder { lags });
        }
        Ok(VarOptions { lags, long_run })
    }
}

impl Default for VarOptions {
    fn default() -> Self {
        VarOptions { lags: 1, long_run: LongRunOptions::default() }
    }
}
