//! Hickox (2014) distribution parameters
//!
//! Shape parameters for the power-law-with-exponential-cutoff PDF of
//! `L / L_avg`.

use serde::{Deserialize, Serialize};

use crate::VariabilityError;

/// Empirical normalization of the Hickox et al. (2014) fit.
///
/// Fitting constant from the source study, not derived here. It scales the
/// PDF only and cancels out of the CDF.
pub const HICKOX_NORMALIZATION: f64 = 0.00854;

/// Number of points in the luminosity-ratio domain.
pub const DOMAIN_POINTS: usize = 100;

/// log10 of the smallest luminosity ratio.
pub const LOG_RATIO_MIN: f64 = -5.0;

/// log10 of the largest luminosity ratio.
pub const LOG_RATIO_MAX: f64 = 3.0;

pub const DEFAULT_L_CUT: f64 = 100.0;
pub const DEFAULT_ALPHA: f64 = 0.2;

/// Parameters of the Hickox luminosity-ratio distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HickoxParams {
    /// Cutoff ratio of the exponential tail (must be > 0)
    pub l_cut: f64,
    /// Power-law slope below the cutoff
    pub alpha: f64,
}

impl HickoxParams {
    pub fn new(l_cut: f64, alpha: f64) -> Self {
        Self { l_cut, alpha }
    }

    pub fn validate(&self) -> Result<(), VariabilityError> {
        if !self.l_cut.is_finite() || self.l_cut <= 0.0 {
            return Err(VariabilityError::InvalidParameter {
                name: "l_cut",
                value: self.l_cut,
                reason: "must be finite and greater than zero",
            });
        }

        if !self.alpha.is_finite() {
            return Err(VariabilityError::InvalidParameter {
                name: "alpha",
                value: self.alpha,
                reason: "must be finite",
            });
        }

        Ok(())
    }
}

impl Default for HickoxParams {
    fn default() -> Self {
        Self {
            l_cut: DEFAULT_L_CUT,
            alpha: DEFAULT_ALPHA,
        }
    }
}
