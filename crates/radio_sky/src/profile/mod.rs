//! Galaxy brightness profiles rendered into square tiles.
//!
//! Define a profile by implementing [`ProfileRenderer`]. [`ProfileKind`] selects one of
//! the built-in renderers from configuration:
//! - [`GaussianProfile`]: elliptical 2D Gaussian (default).
//! - [`SersicProfile`]: elliptical Sersic profile with configurable index and radius.
use glam::DVec2;
use ndarray::{Array2, ArrayView2};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sampling::GalaxySample;

pub mod gaussian;
pub mod sersic;

pub use gaussian::GaussianProfile;
pub use sersic::SersicProfile;

/// Square tile holding one rendered profile, indexed `[x, y]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileTile {
    pub(crate) data: Array2<f64>,
}

impl ProfileTile {
    /// Create a zero-filled tile of `size x size` pixels.
    pub fn zeros(size: usize) -> Self {
        Self {
            data: Array2::zeros((size, size)),
        }
    }

    /// Wrap an existing square array.
    pub fn from_array(data: Array2<f64>) -> Result<Self> {
        let (w, h) = data.dim();
        if w != h {
            return Err(Error::InvalidProfile(format!(
                "tile must be square, got {w}x{h}"
            )));
        }
        Ok(Self { data })
    }

    /// Side length in pixels.
    pub fn size(&self) -> usize {
        self.data.nrows()
    }

    /// Value at tile pixel `(x, y)`, or `None` when out of range.
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        self.data.get((x, y)).copied()
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn into_inner(self) -> Array2<f64> {
        self.data
    }

    /// Largest value in the tile.
    pub fn peak(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Sum of all pixel values.
    pub fn total_flux(&self) -> f64 {
        self.data.sum()
    }
}

/// Shape parameters for rendering a single profile.
///
/// `correlation` is the off-diagonal coefficient of the Gaussian covariance and is
/// unrelated to `rotation_deg`, which rotates the whole profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileShape {
    /// Central amplitude.
    pub amplitude: f64,
    /// Profile centre in tile coordinates.
    pub center: DVec2,
    /// Width along the major axis in pixels.
    pub sigma_x: f64,
    /// Width along the minor axis in pixels.
    pub sigma_y: f64,
    /// Covariance correlation coefficient in `(-1, 1)`.
    pub correlation: f64,
    /// Rotation in degrees.
    pub rotation_deg: f64,
}

impl ProfileShape {
    /// Circular unit-amplitude shape centred at `center`.
    pub fn new(center: DVec2, sigma: f64) -> Self {
        Self {
            amplitude: 1.0,
            center,
            sigma_x: sigma,
            sigma_y: sigma,
            correlation: 0.0,
            rotation_deg: 0.0,
        }
    }

    /// Shape of a sampled galaxy centred in a tile of `tile_size` pixels.
    pub fn for_galaxy(sample: &GalaxySample, tile_size: usize) -> Self {
        let c = (tile_size / 2) as f64;
        Self {
            amplitude: sample.flux,
            center: DVec2::new(c, c),
            sigma_x: sample.sigma_x,
            sigma_y: sample.sigma_y,
            correlation: 0.0,
            rotation_deg: sample.position_angle_deg,
        }
    }

    /// Sets the amplitude.
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Sets both axis widths.
    pub fn with_sigmas(mut self, sigma_x: f64, sigma_y: f64) -> Self {
        self.sigma_x = sigma_x;
        self.sigma_y = sigma_y;
        self
    }

    /// Sets the covariance correlation coefficient.
    pub fn with_correlation(mut self, correlation: f64) -> Self {
        self.correlation = correlation;
        self
    }

    /// Sets the rotation in degrees.
    pub fn with_rotation(mut self, rotation_deg: f64) -> Self {
        self.rotation_deg = rotation_deg;
        self
    }

    /// Validates the shape, returning an error if it cannot be rendered.
    pub fn validate(&self) -> Result<()> {
        if !(self.sigma_x.is_finite() && self.sigma_x > 0.0)
            || !(self.sigma_y.is_finite() && self.sigma_y > 0.0)
        {
            return Err(Error::InvalidProfile(format!(
                "sigmas must be finite and > 0, got ({}, {})",
                self.sigma_x, self.sigma_y
            )));
        }
        if !(self.correlation.abs() < 1.0) {
            return Err(Error::InvalidProfile(format!(
                "correlation must lie in (-1, 1), got {}",
                self.correlation
            )));
        }
        if !self.amplitude.is_finite() || !self.rotation_deg.is_finite() {
            return Err(Error::InvalidProfile(
                "amplitude and rotation must be finite".into(),
            ));
        }
        Ok(())
    }
}

/// Trait for rendering a profile shape into a tile.
pub trait ProfileRenderer: Send + Sync {
    fn render(&self, shape: &ProfileShape, tile_size: usize) -> ProfileTile;
}

/// Profile selection for a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ProfileKind {
    /// Elliptical Gaussian.
    #[default]
    Gaussian,
    /// Elliptical Sersic profile.
    Sersic {
        /// Concentration index `n`.
        index: f64,
        /// Effective (half-light) radius in pixels.
        effective_radius: f64,
    },
}

impl ProfileKind {
    /// Sersic profile with the default de Vaucouleurs index and a 25 pixel radius.
    pub fn sersic_default() -> Self {
        ProfileKind::Sersic {
            index: sersic::DEFAULT_INDEX,
            effective_radius: sersic::DEFAULT_EFFECTIVE_RADIUS,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            ProfileKind::Gaussian => Ok(()),
            ProfileKind::Sersic {
                index,
                effective_radius,
            } => SersicProfile::new(index, effective_radius).map(|_| ()),
        }
    }

    /// Build the renderer for this profile.
    pub fn renderer(&self) -> Result<Box<dyn ProfileRenderer>> {
        match *self {
            ProfileKind::Gaussian => Ok(Box::new(GaussianProfile)),
            ProfileKind::Sersic {
                index,
                effective_radius,
            } => Ok(Box::new(SersicProfile::new(index, effective_radius)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GalaxySample {
        GalaxySample {
            x: 10,
            y: 20,
            flux: 3.0,
            sigma_x: 4.0,
            sigma_y: 2.0,
            ellipticity: 0.6,
            position_angle_deg: 30.0,
            spectral_index: 0.5,
        }
    }

    #[test]
    fn galaxy_shape_is_centred_and_uncorrelated() {
        let shape = ProfileShape::for_galaxy(&sample(), 250);
        assert_eq!(shape.center, DVec2::new(125.0, 125.0));
        assert_eq!(shape.correlation, 0.0);
        assert_eq!(shape.rotation_deg, 30.0);
        assert_eq!(shape.amplitude, 3.0);
        assert!(shape.validate().is_ok());
    }

    #[test]
    fn validate_rejects_degenerate_shapes() {
        let base = ProfileShape::new(DVec2::ZERO, 2.0);
        assert!(base.with_sigmas(0.0, 1.0).validate().is_err());
        assert!(base.with_sigmas(1.0, f64::NAN).validate().is_err());
        assert!(base.with_correlation(1.0).validate().is_err());
        assert!(base.with_correlation(-1.5).validate().is_err());
        assert!(base.with_correlation(0.99).validate().is_ok());
    }

    #[test]
    fn tile_from_array_requires_square() {
        assert!(ProfileTile::from_array(Array2::zeros((3, 4))).is_err());
        let tile = ProfileTile::from_array(Array2::ones((3, 3))).expect("square");
        assert_eq!(tile.size(), 3);
        assert_eq!(tile.total_flux(), 9.0);
        assert_eq!(tile.get(2, 2), Some(1.0));
        assert_eq!(tile.get(3, 0), None);
    }

    #[test]
    fn kind_builds_matching_renderer() {
        assert!(ProfileKind::Gaussian.renderer().is_ok());
        assert!(ProfileKind::sersic_default().renderer().is_ok());
        let bad = ProfileKind::Sersic {
            index: 0.0,
            effective_radius: 10.0,
        };
        assert!(bad.validate().is_err());
        assert!(bad.renderer().is_err());
    }
}
