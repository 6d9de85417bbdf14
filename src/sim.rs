//! Population harness
//!
//! Varies the luminosity of a set of black-hole sources the way a
//! radiative-transfer driver does: one average luminosity per source, then
//! repeated draws from the Hickox distribution.

use std::collections::BTreeMap;
use std::f64::consts::LN_10;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, LogNormal};
use serde::Serialize;

use crate::config::VariabilityConfig;
use crate::sampler::LuminosityVariabilitySampler;
use crate::VariabilityError;

/// One varied luminosity of one source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariabilityRecord {
    pub source_id: usize,
    pub draw: usize,
    pub l_avg: f64,
    pub ratio: f64,
    pub luminosity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationSummary {
    pub n_draws: usize,
    pub mean_ratio: f64,
    pub median_ratio: f64,
    pub min_ratio: f64,
    pub max_ratio: f64,
    /// Fraction of draws brighter than their source average
    pub brighter_fraction: f64,
}

#[derive(Debug, Clone)]
pub struct PopulationRun {
    pub records: Vec<VariabilityRecord>,
    pub summary: PopulationSummary,
}

/// Run the population draws described by `config`.
///
/// Deterministic for a fixed seed. With zero scatter every source uses
/// exactly `l_avg` and no draw is spent on it.
pub fn run_population(config: &VariabilityConfig) -> Result<PopulationRun, VariabilityError> {
    config.validate()?;

    let sampler = LuminosityVariabilitySampler::new(config.hickox)?;
    let population = LogNormal::new(config.l_avg.ln(), config.population_sigma_dex * LN_10)?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let total_draws = config.total_draws().unwrap_or_default();
    let mut records = Vec::new();
    records.try_reserve_exact(total_draws).map_err(|_| {
        VariabilityError::InvalidConfig(format!("cannot allocate {total_draws} records"))
    })?;

    for source_id in 0..config.n_sources {
        let source_l_avg = if config.population_sigma_dex > 0.0 {
            population.sample(&mut rng)
        } else {
            config.l_avg
        };

        for draw in 0..config.draws_per_source {
            let ratio = Distribution::sample(&sampler, &mut rng);
            records.push(VariabilityRecord {
                source_id,
                draw,
                l_avg: source_l_avg,
                ratio,
                luminosity: source_l_avg * ratio,
            });
        }
    }

    let ratios: Vec<f64> = records.iter().map(|r| r.ratio).collect();
    let summary = summarize(&ratios);

    log::debug!(
        "Population run: {} sources x {} draws, median ratio {:.4e}",
        config.n_sources,
        config.draws_per_source,
        summary.median_ratio
    );

    Ok(PopulationRun { records, summary })
}

/// Summary statistics of `ratios`.
///
/// An empty slice gives `n_draws = 0` and NaN for every statistic.
pub fn summarize(ratios: &[f64]) -> PopulationSummary {
    let n = ratios.len();
    if n == 0 {
        return PopulationSummary {
            n_draws: 0,
            mean_ratio: f64::NAN,
            median_ratio: f64::NAN,
            min_ratio: f64::NAN,
            max_ratio: f64::NAN,
            brighter_fraction: f64::NAN,
        };
    }

    let brighter = ratios.iter().filter(|&&r| r > 1.0).count();

    PopulationSummary {
        n_draws: n,
        mean_ratio: ratios.iter().sum::<f64>() / n as f64,
        median_ratio: median(ratios),
        min_ratio: ratios.iter().copied().fold(f64::INFINITY, f64::min),
        max_ratio: ratios.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        brighter_fraction: brighter as f64 / n as f64,
    }
}

/// Median of `values`; NaN when empty.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        0.5 * (sorted[mid - 1] + sorted[mid])
    } else {
        sorted[mid]
    }
}

/// Count of ratios per decade, keyed by `floor(log10(ratio))`.
///
/// Non-positive and non-finite ratios are skipped.
pub fn decade_histogram(ratios: &[f64]) -> Vec<(i32, usize)> {
    let mut counts = BTreeMap::new();
    for &ratio in ratios {
        if ratio > 0.0 && ratio.is_finite() {
            *counts.entry(ratio.log10().floor() as i32).or_insert(0) += 1;
        }
    }
    counts.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn small_config() -> VariabilityConfig {
        VariabilityConfig {
            n_sources: 4,
            draws_per_source: 25,
            ..Default::default()
        }
    }

    #[test]
    fn test_population_runs() {
        let run = run_population(&small_config()).unwrap();
        assert_eq!(run.records.len(), 100);
        assert_eq!(run.summary.n_draws, 100);
        assert_eq!(run.records[99].source_id, 3);
        assert_eq!(run.records[99].draw, 24);
    }

    #[test]
    fn test_population_is_reproducible() {
        let a = run_population(&small_config()).unwrap();
        let b = run_population(&small_config()).unwrap();
        assert_eq!(a.records, b.records);
    }

    #[test]
    fn test_zero_scatter_uses_exact_average() {
        let config = VariabilityConfig {
            l_avg: 3.0e44,
            ..small_config()
        };
        let run = run_population(&config).unwrap();
        for record in &run.records {
            assert_eq!(record.l_avg, 3.0e44);
            assert_eq!(record.luminosity, record.l_avg * record.ratio);
        }
    }

    #[test]
    fn test_scatter_varies_source_average() {
        let config = VariabilityConfig {
            population_sigma_dex: 0.5,
            ..small_config()
        };
        let run = run_population(&config).unwrap();
        assert_ne!(run.records[0].l_avg, run.records[25].l_avg);
        for record in &run.records {
            assert!(record.l_avg > 0.0);
        }
    }

    #[test]
    fn test_ratios_within_domain() {
        let run = run_population(&small_config()).unwrap();
        assert!(run.summary.min_ratio >= 1e-5 * (1.0 - 1e-12));
        assert!(run.summary.max_ratio <= 1e3 * (1.0 + 1e-12));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = VariabilityConfig {
            n_sources: 0,
            ..Default::default()
        };
        assert!(run_population(&config).is_err());
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
        assert!(median(&[]).is_nan());
    }

    #[test]
    fn test_summarize() {
        let summary = summarize(&[0.5, 2.0, 4.0, 0.1]);
        assert_relative_eq!(summary.mean_ratio, 1.65, max_relative = 1e-12);
        assert_eq!(summary.min_ratio, 0.1);
        assert_eq!(summary.max_ratio, 4.0);
        assert_eq!(summary.brighter_fraction, 0.5);
    }

    #[test]
    fn test_summarize_empty_is_all_nan() {
        let summary = summarize(&[]);
        assert_eq!(summary.n_draws, 0);
        assert!(summary.mean_ratio.is_nan());
        assert!(summary.median_ratio.is_nan());
        assert!(summary.min_ratio.is_nan());
        assert!(summary.max_ratio.is_nan());
        assert!(summary.brighter_fraction.is_nan());
    }

    #[test]
    fn test_huge_population_is_rejected_not_panicking() {
        let config = VariabilityConfig {
            n_sources: usize::MAX / 2,
            draws_per_source: 4,
            ..Default::default()
        };
        assert!(matches!(
            run_population(&config),
            Err(VariabilityError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_decade_histogram() {
        let histogram = decade_histogram(&[0.5, 0.2, 3.0, 20.0, 25.0, -1.0, f64::NAN]);
        assert_eq!(histogram, vec![(-1, 2), (0, 1), (1, 2)]);
    }
}
