//! Empirical luminosity-ratio distribution
//!
//! Builds the discretized Hickox et al. (2014) PDF over a log-spaced grid of
//! `L / L_avg` values and its normalized cumulative sum.

use crate::params::{
    HickoxParams, DOMAIN_POINTS, HICKOX_NORMALIZATION, LOG_RATIO_MAX, LOG_RATIO_MIN,
};
use crate::VariabilityError;

/// `n` values `10^e` with exponents linearly spaced over `[start_exp, stop_exp]`.
///
/// Both endpoints are included; the last exponent is exactly `stop_exp`.
pub fn log_space(start_exp: f64, stop_exp: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![10f64.powf(start_exp)],
        _ => {
            let step = (stop_exp - start_exp) / (n - 1) as f64;
            (0..n)
                .map(|i| {
                    let exponent = if i == n - 1 {
                        stop_exp
                    } else {
                        start_exp + step * i as f64
                    };
                    10f64.powf(exponent)
                })
                .collect()
        }
    }
}

/// Discretized PDF paired index-for-index with its ratio domain
#[derive(Debug, Clone, PartialEq)]
pub struct LuminosityDistribution {
    weights: Vec<f64>,
    domain: Vec<f64>,
}

impl LuminosityDistribution {
    /// Validated construction; see [`hickox2014`] for the raw evaluation.
    pub fn try_new(params: &HickoxParams) -> Result<Self, VariabilityError> {
        params.validate()?;
        let distribution = hickox2014(params.l_cut, params.alpha);

        let total: f64 = distribution.weights.iter().sum();
        if !total.is_finite() || total <= 0.0 {
            return Err(VariabilityError::DegenerateDistribution { total });
        }

        log::debug!(
            "Built Hickox distribution with l_cut={}, alpha={} (total weight {:.6e})",
            params.l_cut,
            params.alpha,
            total
        );

        Ok(distribution)
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn domain(&self) -> &[f64] {
        &self.domain
    }

    pub fn len(&self) -> usize {
        self.domain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    pub fn cumulative(&self) -> CumulativeWeights {
        CumulativeWeights::from_weights(&self.weights)
    }

    /// Split into `(weights, domain)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.weights, self.domain)
    }
}

/// Evaluate the Hickox (2014) PDF on the fixed 100-point domain
/// `10^-5 ..= 10^3`.
///
/// `w = HICKOX_NORMALIZATION * (x / l_cut)^-alpha * exp(-x / l_cut)`
///
/// Precondition: `l_cut > 0`. Nothing is checked; a zero or negative cutoff
/// yields infinities or NaNs. Use [`LuminosityDistribution::try_new`] for a
/// checked build.
pub fn hickox2014(l_cut: f64, alpha: f64) -> LuminosityDistribution {
    let domain = log_space(LOG_RATIO_MIN, LOG_RATIO_MAX, DOMAIN_POINTS);
    let weights = domain
        .iter()
        .map(|&x| {
            let scaled = x / l_cut;
            HICKOX_NORMALIZATION * (scaled.powf(-alpha) * (-scaled).exp())
        })
        .collect();

    LuminosityDistribution { weights, domain }
}

/// Running sum of the weights divided by their total
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeWeights {
    values: Vec<f64>,
}

impl CumulativeWeights {
    /// Normalized running sum of `weights`.
    ///
    /// `weights` must be non-empty with a positive, finite total. A zero
    /// total is not rejected and yields an all-NaN sequence.
    pub fn from_weights(weights: &[f64]) -> Self {
        debug_assert!(!weights.is_empty(), "cumulative weights need at least one weight");
        let total: f64 = weights.iter().sum();
        let mut running = 0.0;
        let values = weights
            .iter()
            .map(|&w| {
                running += w;
                running / total
            })
            .collect();

        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Index of the cumulative value closest to `u`.
    ///
    /// This is a nearest-bucket search, not the textbook "first index with
    /// `cdf >= u`" rule, so it is slightly biased against inverse-transform
    /// sampling proper. Ties go to the lowest index.
    ///
    /// NaN distances never win, so NaN entries are skipped and an all-NaN
    /// sequence returns 0. This differs from numpy `argmin`, which would
    /// return the first NaN index.
    pub fn nearest_index(&self, u: f64) -> usize {
        let mut best = 0;
        let mut best_distance = f64::INFINITY;

        for (i, &c) in self.values.iter().enumerate() {
            let distance = (c - u).abs();
            if distance < best_distance {
                best = i;
                best_distance = distance;
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_log_space_endpoints() {
        let values = log_space(-5.0, 3.0, 100);
        assert_eq!(values.len(), 100);
        assert_relative_eq!(values[0], 1e-5, max_relative = 1e-12);
        assert_relative_eq!(values[99], 1e3, max_relative = 1e-12);
    }

    #[test]
    fn test_log_space_constant_ratio() {
        let values = log_space(-5.0, 3.0, 100);
        let expected = 10f64.powf(8.0 / 99.0);
        for pair in values.windows(2) {
            assert_relative_eq!(pair[1] / pair[0], expected, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_log_space_degenerate_sizes() {
        assert!(log_space(0.0, 1.0, 0).is_empty());
        assert_eq!(log_space(2.0, 5.0, 1), vec![100.0]);
    }

    #[test]
    fn test_hickox_lengths_match() {
        let distribution = hickox2014(100.0, 0.2);
        assert_eq!(distribution.weights().len(), DOMAIN_POINTS);
        assert_eq!(distribution.domain().len(), DOMAIN_POINTS);
    }

    #[test]
    fn test_hickox_weight_formula() {
        let distribution = hickox2014(100.0, 0.2);
        // shape product first, then the normalization
        for (&x, &w) in distribution.domain().iter().zip(distribution.weights()) {
            let expected = 0.00854 * ((x / 100.0).powf(-0.2) * (-x / 100.0).exp());
            assert_eq!(w, expected);
        }
    }

    #[test]
    fn test_hickox_weights_non_negative() {
        let distribution = hickox2014(100.0, 0.2);
        assert!(distribution.weights().iter().all(|&w| w >= 0.0));
    }

    #[test]
    fn test_hickox_is_reproducible() {
        let a = hickox2014(100.0, 0.2);
        let b = hickox2014(100.0, 0.2);
        assert_eq!(a, b);
    }

    #[test]
    fn test_try_new_rejects_zero_cutoff() {
        let err = LuminosityDistribution::try_new(&HickoxParams::new(0.0, 0.2)).unwrap_err();
        assert!(matches!(err, VariabilityError::InvalidParameter { .. }));
    }

    #[test]
    fn test_try_new_rejects_overflowing_weights() {
        let err = LuminosityDistribution::try_new(&HickoxParams::new(100.0, 1.0e3)).unwrap_err();
        assert!(matches!(err, VariabilityError::DegenerateDistribution { .. }));
    }

    #[test]
    fn test_cumulative_is_monotone_and_normalized() {
        let cdf = hickox2014(100.0, 0.2).cumulative();
        for pair in cdf.values().windows(2) {
            assert!(pair[1] >= pair[0]);
        }
        assert_abs_diff_eq!(cdf.values()[cdf.len() - 1], 1.0, epsilon = 1e-9);
        assert!(cdf.values().iter().all(|&c| (0.0..=1.0 + 1e-12).contains(&c)));
    }

    #[test]
    fn test_nearest_index_tie_goes_to_lowest() {
        let cdf = CumulativeWeights::from_weights(&[1.0, 1.0, 1.0, 1.0]);
        assert_eq!(cdf.values(), &[0.25, 0.5, 0.75, 1.0]);
        assert_eq!(cdf.nearest_index(0.375), 0);
        assert_eq!(cdf.nearest_index(0.625), 1);
    }

    #[test]
    fn test_nearest_index_skips_nan_entries() {
        let cdf = CumulativeWeights::from_weights(&[0.0, 0.0]);
        assert!(cdf.values().iter().all(|c| c.is_nan()));
        assert_eq!(cdf.nearest_index(0.5), 0);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "at least one weight")]
    fn test_empty_weights_are_rejected() {
        CumulativeWeights::from_weights(&[]);
    }

    #[test]
    fn test_nearest_index_is_not_first_exceeding() {
        let cdf = CumulativeWeights::from_weights(&[1.0, 1.0, 1.0, 1.0]);
        // 0.3 first exceeds at index 1 but is closer to 0.25
        assert_eq!(cdf.nearest_index(0.3), 0);
        assert_eq!(cdf.nearest_index(0.0), 0);
        assert_eq!(cdf.nearest_index(0.99), 3);
    }
}
