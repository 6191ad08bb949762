//! Frequency axis and power-law spectral scaling of rendered tiles.
use ndarray::{Array2, ArrayView2};

use crate::config::SimulationConfig;

/// Frequency at which sampled fluxes are defined, in GHz.
pub const REFERENCE_FREQUENCY_GHZ: f64 = 1.4;

/// Channel centre frequencies in GHz, evenly spaced over the configured range.
///
/// A single channel sits at `freq_min_ghz`.
pub fn channel_frequencies(config: &SimulationConfig) -> Vec<f64> {
    let n = config.nchan;
    let step = config.channel_spacing_ghz();
    (0..n)
        .map(|i| {
            if i + 1 == n && n > 1 {
                config.freq_max_ghz
            } else {
                config.freq_min_ghz + step * i as f64
            }
        })
        .collect()
}

/// Flux scale factor `(freq / reference)^(-spectral_index)`.
#[inline]
pub fn spectral_factor(freq_ghz: f64, spectral_index: f64, reference_ghz: f64) -> f64 {
    (freq_ghz / reference_ghz).powf(-spectral_index)
}

/// Scale factors for every channel frequency.
pub fn channel_factors(frequencies: &[f64], spectral_index: f64, reference_ghz: f64) -> Vec<f64> {
    frequencies
        .iter()
        .map(|&f| spectral_factor(f, spectral_index, reference_ghz))
        .collect()
}

/// Derive one scaled tile per channel from a shared base tile.
///
/// Each channel is an independent copy; the base is never modified.
pub fn scale_channels(
    base: ArrayView2<'_, f64>,
    frequencies: &[f64],
    spectral_index: f64,
    reference_ghz: f64,
) -> Vec<Array2<f64>> {
    frequencies
        .iter()
        .map(|&f| {
            let factor = spectral_factor(f, spectral_index, reference_ghz);
            base.mapv(|v| v * factor)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn single_channel_sits_at_minimum_frequency() {
        let config = SimulationConfig::new(8, 8).with_frequency_range(0.7, 2.0);
        assert_eq!(channel_frequencies(&config), vec![0.7]);
    }

    #[test]
    fn channels_span_range_inclusively() {
        let config = SimulationConfig::new(8, 8)
            .with_channels(5)
            .with_frequency_range(1.0, 2.0);
        let f = channel_frequencies(&config);
        assert_eq!(f.len(), 5);
        assert_eq!(f[0], 1.0);
        assert_eq!(f[4], 2.0);
        for (i, v) in f.iter().enumerate() {
            assert!((v - (1.0 + 0.25 * i as f64)).abs() < 1e-12);
        }
    }

    #[test]
    fn factor_is_unity_at_reference_and_falls_with_frequency() {
        assert_eq!(spectral_factor(1.4, 0.7, REFERENCE_FREQUENCY_GHZ), 1.0);
        assert!(spectral_factor(2.8, 0.7, REFERENCE_FREQUENCY_GHZ) < 1.0);
        assert!(spectral_factor(0.7, 0.7, REFERENCE_FREQUENCY_GHZ) > 1.0);
        let f = spectral_factor(2.8, 1.0, REFERENCE_FREQUENCY_GHZ);
        assert!((f - 0.5).abs() < 1e-12);
    }

    #[test]
    fn channels_are_independent_copies_of_base() {
        let base = array![[1.0, 2.0], [3.0, 4.0]];
        let before = base.clone();
        let freqs = [0.7, 1.4, 2.8];
        let scaled = scale_channels(base.view(), &freqs, 1.0, REFERENCE_FREQUENCY_GHZ);

        assert_eq!(base, before);
        assert_eq!(scaled.len(), 3);
        assert_eq!(scaled[0], base.mapv(|v| v * 2.0));
        assert_eq!(scaled[1], base);
        assert_eq!(scaled[2], base.mapv(|v| v * 0.5));
    }

    #[test]
    fn factors_match_scaled_tiles() {
        let base = array![[2.0]];
        let freqs = [0.9, 1.3, 1.7];
        let factors = channel_factors(&freqs, 0.55, REFERENCE_FREQUENCY_GHZ);
        let tiles = scale_channels(base.view(), &freqs, 0.55, REFERENCE_FREQUENCY_GHZ);
        for (factor, tile) in factors.iter().zip(&tiles) {
            assert_eq!(tile[[0, 0]], 2.0 * factor);
        }
    }
}
