//! AGN luminosity variability
//!
//! Samples the instantaneous bolometric luminosity of a black-hole source
//! from the empirical Hickox et al. (2014) distribution of `L / L_avg`,
//! for use by dust radiative-transfer drivers that assign AGN SEDs per
//! source.

pub mod config;
pub mod distribution;
pub mod params;
pub mod sampler;
pub mod sim;

use thiserror::Error;

// Re-export main types
pub use config::VariabilityConfig;
pub use distribution::{hickox2014, log_space, CumulativeWeights, LuminosityDistribution};
pub use params::{HickoxParams, HICKOX_NORMALIZATION};
pub use sampler::{vary_bh_luminosity, LuminosityVariabilitySampler};
pub use sim::{run_population, PopulationRun, PopulationSummary, VariabilityRecord};

#[derive(Debug, Error)]
pub enum VariabilityError {
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    #[error("distribution weights do not normalize (total = {total})")]
    DegenerateDistribution { total: f64 },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("distribution error: {0}")]
    Distribution(#[from] rand_distr::NormalError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
