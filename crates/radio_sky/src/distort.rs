//! Optional geometric warps applied to rendered tiles before compositing.
//!
//! A [`TileDistortion`] maps a tile to a new tile of the same size. When no distortion is
//! configured the compositor uses the rendered tile unchanged.
use ndarray::{Array1, Array2, ArrayView2, Axis};
use rand::{Rng, RngCore};

use crate::profile::ProfileTile;

/// Smoothing width of the displacement field in pixels.
pub const DEFAULT_SMOOTHING_SIGMA: f64 = 3.0;

/// Kernel radius in units of sigma.
const TRUNCATE: f64 = 4.0;

/// Trait for tile-to-tile warps.
pub trait TileDistortion: Send + Sync {
    fn distort(&self, tile: &ProfileTile, rng: &mut dyn RngCore) -> ProfileTile;
}

/// Elastic warp with a smoothed random displacement field.
///
/// Each pixel draws a displacement uniform in `[-1, 1]` per axis. The fields are
/// smoothed with a Gaussian of width `sigma`, scaled by `alpha` and the tile is
/// resampled bilinearly at the displaced positions. Edges reflect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElasticDistortion {
    /// Displacement amplitude in pixels.
    pub alpha: f64,
    /// Smoothing width in pixels.
    pub sigma: f64,
}

impl ElasticDistortion {
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            sigma: DEFAULT_SMOOTHING_SIGMA,
        }
    }

    /// Sets the smoothing width.
    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    /// Draw the `(dx, dy)` displacement fields for a `size x size` tile.
    pub fn displacement_field(
        &self,
        size: usize,
        rng: &mut dyn RngCore,
    ) -> (Array2<f64>, Array2<f64>) {
        let mut draw = || {
            let raw = Array2::from_shape_fn((size, size), |_| 2.0 * rng.random::<f64>() - 1.0);
            gaussian_smooth(raw.view(), self.sigma).mapv(|v| v * self.alpha)
        };
        let dx = draw();
        let dy = draw();
        (dx, dy)
    }
}

impl TileDistortion for ElasticDistortion {
    fn distort(&self, tile: &ProfileTile, rng: &mut dyn RngCore) -> ProfileTile {
        let size = tile.size();
        if size == 0 || self.alpha == 0.0 || !self.alpha.is_finite() {
            return tile.clone();
        }

        let (dx, dy) = self.displacement_field(size, rng);
        let src = tile.view();
        let data = Array2::from_shape_fn((size, size), |(ix, iy)| {
            bilinear_reflect(
                src,
                ix as f64 + dx[[ix, iy]],
                iy as f64 + dy[[ix, iy]],
            )
        });

        ProfileTile { data }
    }
}

/// Reflect an index into `[0, n)` with the edge sample repeated (`dcba|abcd|dcba`).
#[inline]
fn reflect(i: isize, n: usize) -> usize {
    let period = 2 * n as isize;
    let m = i.rem_euclid(period);
    if m < n as isize {
        m as usize
    } else {
        (period - 1 - m) as usize
    }
}

/// Normalized 1D Gaussian kernel truncated at `TRUNCATE * sigma`.
pub(crate) fn gaussian_kernel(sigma: f64) -> Array1<f64> {
    let radius = (TRUNCATE * sigma + 0.5) as isize;
    let mut kernel = Array1::from_shape_fn((2 * radius + 1) as usize, |i| {
        let x = (i as isize - radius) as f64;
        (-0.5 * (x / sigma).powi(2)).exp()
    });
    let norm = kernel.sum();
    kernel.mapv_inplace(|v| v / norm);
    kernel
}

/// Separable Gaussian smoothing with reflecting edges.
pub(crate) fn gaussian_smooth(src: ArrayView2<'_, f64>, sigma: f64) -> Array2<f64> {
    if !(sigma.is_finite() && sigma > 0.0) {
        return src.to_owned();
    }
    let kernel = gaussian_kernel(sigma);
    let radius = (kernel.len() / 2) as isize;
    let mut out = src.to_owned();
    for axis in [Axis(0), Axis(1)] {
        let input = out.clone();
        for (mut dst_lane, src_lane) in out.lanes_mut(axis).into_iter().zip(input.lanes(axis)) {
            let n = src_lane.len();
            for (i, dst) in dst_lane.iter_mut().enumerate() {
                let mut acc = 0.0;
                for (k, w) in kernel.iter().enumerate() {
                    let j = reflect(i as isize + k as isize - radius, n);
                    acc += w * src_lane[j];
                }
                *dst = acc;
            }
        }
    }
    out
}

fn bilinear_reflect(src: ArrayView2<'_, f64>, x: f64, y: f64) -> f64 {
    let (w, h) = src.dim();
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (x0, y0) = (x0 as isize, y0 as isize);

    let xa = reflect(x0, w);
    let xb = reflect(x0 + 1, w);
    let ya = reflect(y0, h);
    let yb = reflect(y0 + 1, h);

    src[[xa, ya]] * (1.0 - fx) * (1.0 - fy)
        + src[[xb, ya]] * fx * (1.0 - fy)
        + src[[xa, yb]] * (1.0 - fx) * fy
        + src[[xb, yb]] * fx * fy
}

#[cfg(test)]
mod tests {
    use glam::DVec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::profile::{GaussianProfile, ProfileRenderer, ProfileShape};

    fn galaxy_tile() -> ProfileTile {
        let shape = ProfileShape::new(DVec2::new(32.0, 32.0), 6.0).with_sigmas(8.0, 4.0);
        GaussianProfile.render(&shape, 64)
    }

    #[test]
    fn reflect_mirrors_with_edge_repeat() {
        assert_eq!(reflect(-1, 4), 0);
        assert_eq!(reflect(-2, 4), 1);
        assert_eq!(reflect(4, 4), 3);
        assert_eq!(reflect(5, 4), 2);
        assert_eq!(reflect(2, 4), 2);
        assert_eq!(reflect(9, 4), 1);
    }

    #[test]
    fn kernel_is_normalized_and_symmetric() {
        let k = gaussian_kernel(3.0);
        assert_eq!(k.len(), 2 * 12 + 1);
        assert!((k.sum() - 1.0).abs() < 1e-12);
        for i in 0..k.len() / 2 {
            assert!((k[i] - k[k.len() - 1 - i]).abs() < 1e-15);
        }
    }

    #[test]
    fn smoothing_preserves_constants() {
        let src = Array2::from_elem((10, 7), 2.5);
        let out = gaussian_smooth(src.view(), 3.0);
        assert!(out.iter().all(|v| (v - 2.5).abs() < 1e-12));
    }

    #[test]
    fn zero_alpha_passes_tile_through() {
        let tile = galaxy_tile();
        let mut rng = StdRng::seed_from_u64(3);
        let out = ElasticDistortion::new(0.0).distort(&tile, &mut rng);
        assert_eq!(out, tile);
    }

    #[test]
    fn displacements_are_bounded_by_alpha() {
        let warp = ElasticDistortion::new(20.0);
        let mut rng = StdRng::seed_from_u64(8);
        let (dx, dy) = warp.displacement_field(48, &mut rng);
        assert_eq!(dx.dim(), (48, 48));
        for v in dx.iter().chain(dy.iter()) {
            assert!(v.abs() <= 20.0 + 1e-9);
        }
        // Independent fields.
        assert_ne!(dx, dy);
    }

    #[test]
    fn distortion_keeps_size_and_value_range() {
        let tile = galaxy_tile();
        let mut rng = StdRng::seed_from_u64(21);
        let out = ElasticDistortion::new(20.0).distort(&tile, &mut rng);
        assert_eq!(out.size(), tile.size());
        let max = tile.peak();
        assert!(out.view().iter().all(|v| v.is_finite() && *v >= 0.0));
        assert!(out.peak() <= max + 1e-12);
        assert_ne!(out, tile);
    }

    #[test]
    fn distortion_is_deterministic_for_same_seed() {
        let tile = galaxy_tile();
        let warp = ElasticDistortion::new(10.0);
        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);
        assert_eq!(warp.distort(&tile, &mut rng_a), warp.distort(&tile, &mut rng_b));
    }
}
