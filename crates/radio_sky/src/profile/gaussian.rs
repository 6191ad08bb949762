//! Elliptical 2D Gaussian profile.
use std::f64::consts::LN_2;

use glam::{DMat2, DVec2};
use ndarray::Array2;

use crate::profile::{ProfileRenderer, ProfileShape, ProfileTile};

/// Converts a width into the Gaussian covariance diagonal (`4 ln 2 * sigma^2`).
const WIDTH_TO_VARIANCE: f64 = 4.0 * LN_2;

/// Elliptical Gaussian renderer.
///
/// Grid points and the centre are both rotated by the shape's rotation about the
/// tile origin. The profile is evaluated as `A * exp(-0.5 * d^T C^-1 d)` with
/// `C = [[4 ln2 sx^2, r sx sy], [r sx sy, 4 ln2 sy^2]]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussianProfile;

impl GaussianProfile {
    /// Inverse covariance for the given shape.
    pub fn inverse_covariance(shape: &ProfileShape) -> DMat2 {
        let sx = shape.sigma_x;
        let sy = shape.sigma_y;
        let off = shape.correlation * sx * sy;
        DMat2::from_cols(
            DVec2::new(WIDTH_TO_VARIANCE * sx * sx, off),
            DVec2::new(off, WIDTH_TO_VARIANCE * sy * sy),
        )
        .inverse()
    }
}

impl ProfileRenderer for GaussianProfile {
    fn render(&self, shape: &ProfileShape, tile_size: usize) -> ProfileTile {
        let rotation = DMat2::from_angle(shape.rotation_deg.to_radians());
        let inv = Self::inverse_covariance(shape);
        let center = rotation * shape.center;
        let amplitude = shape.amplitude;

        let data = Array2::from_shape_fn((tile_size, tile_size), |(ix, iy)| {
            let p = rotation * DVec2::new(ix as f64, iy as f64);
            let d = p - center;
            amplitude * (-0.5 * d.dot(inv * d)).exp()
        });

        ProfileTile { data }
    }
}
