use serde::{Deserialize, Serialize};

use crate::params::HickoxParams;
use crate::VariabilityError;

/// Configuration for a population of varied black-hole sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariabilityConfig {
    /// Median average luminosity of the population (caller's unit)
    pub l_avg: f64,
    /// Number of black-hole sources
    pub n_sources: usize,
    /// Varied luminosities drawn per source
    pub draws_per_source: usize,
    /// log10 scatter of per-source average luminosities
    pub population_sigma_dex: f64,
    /// RNG seed for reproducibility
    pub seed: u64,
    /// Shape of the luminosity-ratio distribution
    pub hickox: HickoxParams,
}

impl Default for VariabilityConfig {
    fn default() -> Self {
        Self {
            l_avg: 1.0,
            n_sources: 16,
            draws_per_source: 64,
            population_sigma_dex: 0.0,
            seed: 42,
            hickox: HickoxParams::default(),
        }
    }
}

impl VariabilityConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, VariabilityError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn validate(&self) -> Result<(), VariabilityError> {
        if !self.l_avg.is_finite() || self.l_avg <= 0.0 {
            return Err(VariabilityError::InvalidConfig(
                "l_avg must be finite and greater than zero".to_string(),
            ));
        }

        if self.n_sources == 0 {
            return Err(VariabilityError::InvalidConfig(
                "n_sources must be greater than zero".to_string(),
            ));
        }

        if self.draws_per_source == 0 {
            return Err(VariabilityError::InvalidConfig(
                "draws_per_source must be greater than zero".to_string(),
            ));
        }

        if self.total_draws().is_none() {
            return Err(VariabilityError::InvalidConfig(
                "n_sources * draws_per_source overflows".to_string(),
            ));
        }

        if !self.population_sigma_dex.is_finite() || self.population_sigma_dex < 0.0 {
            return Err(VariabilityError::InvalidConfig(
                "population_sigma_dex must be finite and non-negative".to_string(),
            ));
        }

        self.hickox.validate()
    }

    /// `None` when the product overflows `usize`.
    pub fn total_draws(&self) -> Option<usize> {
        self.n_sources.checked_mul(self.draws_per_source)
    }
}
