//! Multi-channel flux canvas.
//!
//! A [`Canvas`] is a zero-initialized `[x, y, channel]` array that only ever grows by
//! additive accumulation of clipped tiles.
use ndarray::{s, Array3, ArrayView2, ArrayView3};

use crate::clip::ClipWindow;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    data: Array3<f64>,
}

impl Canvas {
    /// Create a zero canvas of shape `(nx, ny, nchan)`.
    pub fn zeros(nx: usize, ny: usize, nchan: usize) -> Self {
        Self {
            data: Array3::zeros((nx, ny, nchan)),
        }
    }

    /// Shape as `(nx, ny, nchan)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    pub fn nchan(&self) -> usize {
        self.data.dim().2
    }

    pub fn get(&self, x: usize, y: usize, channel: usize) -> Option<f64> {
        self.data.get((x, y, channel)).copied()
    }

    pub fn view(&self) -> ArrayView3<'_, f64> {
        self.data.view()
    }

    /// Single channel as an `[x, y]` view.
    pub fn channel(&self, channel: usize) -> ArrayView2<'_, f64> {
        self.data.slice(s![.., .., channel])
    }

    pub fn into_inner(self) -> Array3<f64> {
        self.data
    }

    /// Sum over all pixels and channels.
    pub fn total_flux(&self) -> f64 {
        self.data.sum()
    }

    /// Returns `true` if every pixel is exactly zero.
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|v| *v == 0.0)
    }

    /// Add the tile region selected by `window` into one channel.
    ///
    /// The window is checked before any pixel is touched; a length mismatch is
    /// reported as [`Error::ClipMismatch`].
    pub fn accumulate(
        &mut self,
        window: &ClipWindow,
        tile: ArrayView2<'_, f64>,
        channel: usize,
    ) -> Result<()> {
        window.check()?;
        if window.is_empty() {
            return Ok(());
        }
        let (nx, ny, nchan) = self.shape();
        if channel >= nchan {
            return Err(Error::Other(format!(
                "channel {channel} out of range for {nchan} channels"
            )));
        }
        let (tw, th) = tile.dim();
        if window.canvas_x.end > nx || window.tile_x.end > tw {
            return Err(Error::ClipMismatch {
                axis: 'x',
                canvas: window.canvas_x.clone(),
                tile: window.tile_x.clone(),
            });
        }
        if window.canvas_y.end > ny || window.tile_y.end > th {
            return Err(Error::ClipMismatch {
                axis: 'y',
                canvas: window.canvas_y.clone(),
                tile: window.tile_y.clone(),
            });
        }

        let src = tile.slice(s![window.tile_x.clone(), window.tile_y.clone()]);
        let mut dst = self.data.slice_mut(s![
            window.canvas_x.clone(),
            window.canvas_y.clone(),
            channel
        ]);
        dst += &src;
        Ok(())
    }

    /// Add another canvas of identical shape into this one.
    pub fn merge(&mut self, other: &Canvas) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(Error::ShapeMismatch {
                expected: self.shape(),
                found: other.shape(),
            });
        }
        self.data += &other.data;
        Ok(())
    }
}
