//! Star-forming galaxy parameter distributions.
use std::fmt::Display;

use rand::distr::{Distribution, OpenClosed01, Uniform};
use rand::{Rng, RngCore};
use rand_distr::{Beta, Gamma, Normal};

use crate::config::SimulationConfig;
use crate::error::{Error, Result};
use crate::sampling::{GalaxySample, GalaxySampling};

/// Exponent of the power-law flux draw.
pub const FLUX_EXPONENT: f64 = -2.0 / 3.0;
/// Shape of the Gamma distribution of galaxy sizes (arcsec).
pub const SIZE_GAMMA_SHAPE: f64 = 1.5;
/// Scale of the Gamma distribution of galaxy sizes (arcsec).
pub const SIZE_GAMMA_SCALE: f64 = 1.0;
/// Factor converting the drawn size to a semi-major axis.
pub const SIZE_TO_SEMI_MAJOR: f64 = 0.5;
/// Beta distribution parameters for ellipticity.
pub const ELLIPTICITY_BETA: (f64, f64) = (1.7, 4.5);
/// Mean and standard deviation of the spectral index.
pub const SPECTRAL_INDEX_NORMAL: (f64, f64) = (0.55, 0.25);
/// Position angle bound in degrees.
pub const POSITION_ANGLE_LIMIT_DEG: f64 = 90.0;
/// Largest `f64` below one; keeps the minor axis strictly positive.
pub const MAX_ELLIPTICITY: f64 = 1.0 - f64::EPSILON / 2.0;

/// Faint star-forming galaxy population.
///
/// Sizes follow a Gamma distribution, ellipticities a Beta distribution
/// and fluxes a power law. Distributions are built once and reused for
/// every draw.
#[derive(Debug, Clone)]
pub struct StarFormingGalaxies {
    size: Gamma<f64>,
    ellipticity: Beta<f64>,
    position_angle: Uniform<f64>,
    spectral_index: Normal<f64>,
}

fn distribution_error(name: &str, err: impl Display) -> Error {
    Error::InvalidConfig(format!("{name} distribution: {err}"))
}

impl StarFormingGalaxies {
    /// Build the default population distributions.
    pub fn new() -> Result<Self> {
        let size = Gamma::new(SIZE_GAMMA_SHAPE, SIZE_GAMMA_SCALE)
            .map_err(|e| distribution_error("size", e))?;
        let ellipticity = Beta::new(ELLIPTICITY_BETA.0, ELLIPTICITY_BETA.1)
            .map_err(|e| distribution_error("ellipticity", e))?;
        let position_angle =
            Uniform::new_inclusive(-POSITION_ANGLE_LIMIT_DEG, POSITION_ANGLE_LIMIT_DEG)
                .map_err(|e| distribution_error("position angle", e))?;
        let spectral_index = Normal::new(SPECTRAL_INDEX_NORMAL.0, SPECTRAL_INDEX_NORMAL.1)
            .map_err(|e| distribution_error("spectral index", e))?;

        Ok(Self {
            size,
            ellipticity,
            position_angle,
            spectral_index,
        })
    }
}

impl GalaxySampling for StarFormingGalaxies {
    fn sample(&self, config: &SimulationConfig, rng: &mut dyn RngCore) -> GalaxySample {
        let x = rng.random_range(0..config.nx.max(1));
        let y = rng.random_range(0..config.ny.max(1));

        let u: f64 = OpenClosed01.sample(rng);
        let flux = u.powf(FLUX_EXPONENT);

        let sigma_x = SIZE_TO_SEMI_MAJOR * self.size.sample(rng) / config.pixel_size_arcsec;

        // Beta support is closed at 1.
        let ellipticity = self.ellipticity.sample(rng).clamp(0.0, MAX_ELLIPTICITY);
        let sigma_y = GalaxySample::minor_axis(sigma_x, ellipticity);

        let position_angle_deg = self.position_angle.sample(rng);
        let spectral_index = self.spectral_index.sample(rng);

        GalaxySample {
            x,
            y,
            flux,
            sigma_x,
            sigma_y,
            ellipticity,
            position_angle_deg,
            spectral_index,
        }
    }
}
