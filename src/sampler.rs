//! Luminosity variability sampler
//!
//! Draws an instantaneous black-hole luminosity by inverse-transform sampling
//! the Hickox (2014) distribution of `L / L_avg`.

use rand::Rng;
use rand_distr::Distribution;

use crate::distribution::{hickox2014, CumulativeWeights, LuminosityDistribution};
use crate::params::{HickoxParams, DEFAULT_ALPHA, DEFAULT_L_CUT};
use crate::VariabilityError;

/// Vary an average black-hole luminosity by one draw from the default
/// Hickox distribution.
///
/// The distribution is rebuilt on every call and nothing is retained between
/// calls. Exactly one `f64` is drawn from `rng`. The result lies in
/// `[l_avg * 1e-5, l_avg * 1e3]` and carries the unit and sign of `l_avg`;
/// NaN or infinite `l_avg` propagates.
pub fn vary_bh_luminosity<R: Rng + ?Sized>(l_avg: f64, rng: &mut R) -> f64 {
    let (weights, domain) = hickox2014(DEFAULT_L_CUT, DEFAULT_ALPHA).into_parts();
    let cdf = CumulativeWeights::from_weights(&weights);
    let choice: f64 = rng.gen();
    l_avg * domain[cdf.nearest_index(choice)]
}

/// Reusable sampler with a cached distribution and CDF
#[derive(Debug, Clone)]
pub struct LuminosityVariabilitySampler {
    params: HickoxParams,
    distribution: LuminosityDistribution,
    cdf: CumulativeWeights,
}

impl LuminosityVariabilitySampler {
    pub fn new(params: HickoxParams) -> Result<Self, VariabilityError> {
        let distribution = LuminosityDistribution::try_new(&params)?;
        let cdf = distribution.cumulative();
        Ok(Self {
            params,
            distribution,
            cdf,
        })
    }

    pub fn params(&self) -> &HickoxParams {
        &self.params
    }

    pub fn distribution(&self) -> &LuminosityDistribution {
        &self.distribution
    }

    pub fn cumulative(&self) -> &CumulativeWeights {
        &self.cdf
    }

    /// Ratio `L / L_avg` selected by the uniform draw `u`.
    pub fn ratio_at(&self, u: f64) -> f64 {
        self.distribution.domain()[self.cdf.nearest_index(u)]
    }

    /// Luminosity selected by the uniform draw `u`.
    pub fn sample_at(&self, l_avg: f64, u: f64) -> f64 {
        l_avg * self.ratio_at(u)
    }

    /// Draw one varied luminosity, consuming one `f64` from `rng`.
    pub fn sample<R: Rng + ?Sized>(&self, l_avg: f64, rng: &mut R) -> f64 {
        let u: f64 = rng.gen();
        self.sample_at(l_avg, u)
    }

    pub fn sample_n<R: Rng + ?Sized>(&self, l_avg: f64, n: usize, rng: &mut R) -> Vec<f64> {
        (0..n).map(|_| self.sample(l_avg, rng)).collect()
    }
}

impl Default for LuminosityVariabilitySampler {
    fn default() -> Self {
        let params = HickoxParams::default();
        let distribution = hickox2014(params.l_cut, params.alpha);
        let cdf = distribution.cumulative();
        Self {
            params,
            distribution,
            cdf,
        }
    }
}

/// Samples the dimensionless ratio `L / L_avg`.
impl Distribution<f64> for LuminosityVariabilitySampler {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.ratio_at(rng.gen())
    }
}
