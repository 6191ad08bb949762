//! Statistical sampling of galaxy populations.
//!
//! This module defines the [`GalaxySampling`] trait, the per-galaxy record
//! [`GalaxySample`] and the source-count draw used when a run does not fix
//! the number of galaxies.
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;

pub mod count;
pub mod galaxy;

pub use count::{expected_source_count, sample_source_count};
pub use galaxy::StarFormingGalaxies;

/// Parameters of a single simulated galaxy.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GalaxySample {
    /// Pixel column of the galaxy centre.
    pub x: usize,
    /// Pixel row of the galaxy centre.
    pub y: usize,
    /// Peak amplitude.
    pub flux: f64,
    /// Semi-major axis in pixels.
    pub sigma_x: f64,
    /// Semi-minor axis in pixels, derived from `sigma_x` and `ellipticity`.
    pub sigma_y: f64,
    /// Ellipticity in `[0, 1)`.
    pub ellipticity: f64,
    /// Orientation of the major axis in degrees, within `[-90, 90]`.
    pub position_angle_deg: f64,
    /// Power-law spectral index.
    pub spectral_index: f64,
}

impl GalaxySample {
    /// Semi-minor axis implied by a semi-major axis and an ellipticity.
    #[inline]
    pub fn minor_axis(sigma_x: f64, ellipticity: f64) -> f64 {
        sigma_x * ((1.0 - ellipticity) / (1.0 + ellipticity)).sqrt()
    }
}

/// Trait for drawing galaxy parameters.
pub trait GalaxySampling: Send + Sync {
    fn sample(&self, config: &SimulationConfig, rng: &mut dyn RngCore) -> GalaxySample;
}
