//! Elliptical Sersic profile.
use ndarray::Array2;

use crate::error::{Error, Result};
use crate::profile::{ProfileRenderer, ProfileShape, ProfileTile};

/// de Vaucouleurs index.
pub const DEFAULT_INDEX: f64 = 4.0;
/// Effective radius in pixels.
pub const DEFAULT_EFFECTIVE_RADIUS: f64 = 25.0;

/// Sersic renderer with a fixed index and effective radius.
///
/// Evaluates `A * exp(-b_n * (z^(1/n) - 1))` where `z` is the elliptical radius in units
/// of the effective radius, so the amplitude is the brightness on the effective radius
/// and the centre reaches `A * e^(b_n)`. The axis ratio is taken from the shape's
/// `sigma_y / sigma_x` and the orientation from its rotation.
#[derive(Debug, Clone, Copy)]
pub struct SersicProfile {
    index: f64,
    effective_radius: f64,
    b_n: f64,
}

impl SersicProfile {
    pub fn new(index: f64, effective_radius: f64) -> Result<Self> {
        if !index.is_finite() || index <= 0.0 {
            return Err(Error::InvalidProfile(format!(
                "Sersic index must be finite and > 0, got {index}"
            )));
        }
        if !effective_radius.is_finite() || effective_radius <= 0.0 {
            return Err(Error::InvalidProfile(format!(
                "effective radius must be finite and > 0, got {effective_radius}"
            )));
        }
        Ok(Self {
            index,
            effective_radius,
            b_n: sersic_b(index),
        })
    }

    pub fn index(&self) -> f64 {
        self.index
    }

    pub fn effective_radius(&self) -> f64 {
        self.effective_radius
    }
}

impl Default for SersicProfile {
    fn default() -> Self {
        Self {
            index: DEFAULT_INDEX,
            effective_radius: DEFAULT_EFFECTIVE_RADIUS,
            b_n: sersic_b(DEFAULT_INDEX),
        }
    }
}

/// Half-light constant `b_n`, solving `gamma(2n, b_n) = Gamma(2n) / 2`.
///
/// Ciotti & Bertin (1999) expansion for `n > 0.36`, MacArthur et al. (2003)
/// polynomial below.
pub fn sersic_b(n: f64) -> f64 {
    if n > 0.36 {
        2.0 * n - 1.0 / 3.0 + 4.0 / (405.0 * n) + 46.0 / (25_515.0 * n * n)
            + 131.0 / (1_148_175.0 * n.powi(3))
            - 2_194_697.0 / (30_690_717_750.0 * n.powi(4))
    } else {
        0.01945 - 0.8902 * n + 10.95 * n * n - 19.67 * n.powi(3) + 13.43 * n.powi(4)
    }
}

impl ProfileRenderer for SersicProfile {
    fn render(&self, shape: &ProfileShape, tile_size: usize) -> ProfileTile {
        let axis_ratio = if shape.sigma_x > 0.0 {
            (shape.sigma_y / shape.sigma_x).clamp(f64::MIN_POSITIVE, 1.0)
        } else {
            1.0
        };
        let a = self.effective_radius;
        let b = a * axis_ratio;
        let (sin_t, cos_t) = shape.rotation_deg.to_radians().sin_cos();
        let inv_n = 1.0 / self.index;
        let amplitude = shape.amplitude;
        let (x0, y0) = (shape.center.x, shape.center.y);

        let data = Array2::from_shape_fn((tile_size, tile_size), |(ix, iy)| {
            let dx = ix as f64 - x0;
            let dy = iy as f64 - y0;
            let major = dx * cos_t + dy * sin_t;
            let minor = -dx * sin_t + dy * cos_t;
            let z = ((major / a).powi(2) + (minor / b).powi(2)).sqrt();
            amplitude * (-self.b_n * (z.powf(inv_n) - 1.0)).exp()
        });

        ProfileTile { data }
    }
}
