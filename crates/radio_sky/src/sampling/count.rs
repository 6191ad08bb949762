//! Number of sources in a realization.
use rand::distr::Distribution;
use rand::RngCore;
use rand_distr::Poisson;

use crate::config::SimulationConfig;
use crate::error::{Error, Result};

/// Expected number of sources on the canvas for the configured density.
pub fn expected_source_count(config: &SimulationConfig) -> f64 {
    config.source_density_sqdeg * config.area_sqdeg()
}

/// Draw the number of sources for one realization.
///
/// The Poisson mean is the expected count truncated to an integer. A mean of
/// zero yields no sources. A mean the Poisson sampler cannot handle is reported
/// as [`Error::InvalidConfig`].
pub fn sample_source_count(config: &SimulationConfig, rng: &mut dyn RngCore) -> Result<usize> {
    let lambda = expected_source_count(config).trunc();
    if lambda == 0.0 {
        return Ok(0);
    }

    let poisson = Poisson::new(lambda).map_err(|e| {
        Error::InvalidConfig(format!("cannot draw source count for mean {lambda}: {e}"))
    })?;
    let n: f64 = poisson.sample(rng);
    Ok(n as usize)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn expected_count_matches_density_times_area() {
        let config = SimulationConfig::new(2000, 2000)
            .with_pixel_size(0.25)
            .with_source_density(13_000.0);
        // 500" x 500" = 0.019290... sq deg
        let expected = 13_000.0 * (500.0 * 500.0) / (3600.0 * 3600.0);
        assert!((expected_source_count(&config) - expected).abs() < 1e-9);
    }

    #[test]
    fn zero_density_yields_zero_sources() {
        let config = SimulationConfig::new(100, 100).with_source_density(0.0);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(sample_source_count(&config, &mut rng).expect("valid mean"), 0);
    }

    #[test]
    fn sub_unit_mean_truncates_to_zero() {
        let config = SimulationConfig::new(10, 10)
            .with_pixel_size(0.25)
            .with_source_density(13_000.0);
        assert!(expected_source_count(&config) < 1.0);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(sample_source_count(&config, &mut rng).expect("valid mean"), 0);
    }

    #[test]
    fn counts_average_to_truncated_mean() {
        let config = SimulationConfig::new(2000, 2000)
            .with_pixel_size(0.25)
            .with_source_density(13_000.0);
        let lambda = expected_source_count(&config).trunc();
        let mut rng = StdRng::seed_from_u64(99);

        let trials = 2_000;
        let total: usize = (0..trials)
            .map(|_| sample_source_count(&config, &mut rng).expect("valid mean"))
            .sum();
        let mean = total as f64 / trials as f64;
        assert!((mean - lambda).abs() < 2.0, "mean {mean} vs lambda {lambda}");
    }

    #[test]
    fn oversized_mean_is_reported() {
        let config = SimulationConfig::new(100, 100).with_source_density(1e30);
        assert!(config.validate().is_ok());
        let mut rng = StdRng::seed_from_u64(4);
        matches!(
            sample_source_count(&config, &mut rng),
            Err(Error::InvalidConfig(_))
        )
        .then_some(())
        .expect("expected InvalidConfig for an unrepresentable mean");
    }
}
