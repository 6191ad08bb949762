//! PNG previews of simulated canvases.
use std::path::Path;

use anyhow::{bail, Context};
use image::{ImageBuffer, Luma};
use radio_sky::canvas::Canvas;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Output sample depth of a preview image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitDepth {
    Eight,
    #[default]
    Sixteen,
}

impl BitDepth {
    fn max_value(self) -> f64 {
        match self {
            BitDepth::Eight => u8::MAX as f64,
            BitDepth::Sixteen => u16::MAX as f64,
        }
    }
}

/// Installs a formatting subscriber honouring `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Min/max normalize one channel to `[0, 2^bits - 1]`, row-major with `y = 0` at the bottom.
///
/// A constant channel maps to zeros.
pub fn normalize_channel(canvas: &Canvas, channel: usize, depth: BitDepth) -> anyhow::Result<Vec<u16>> {
    let (nx, ny, nchan) = canvas.shape();
    if channel >= nchan {
        bail!("channel {channel} out of range for {nchan} channels");
    }
    let plane = canvas.channel(channel);
    let (min, max) = plane
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let range = max - min;
    let scale = if range > 0.0 { depth.max_value() / range } else { 0.0 };

    let mut out = Vec::with_capacity(nx * ny);
    for row in 0..ny {
        let y = ny - 1 - row;
        for x in 0..nx {
            out.push(((plane[[x, y]] - min) * scale) as u16);
        }
    }
    Ok(out)
}

/// Write one channel of `canvas` as a grayscale PNG.
pub fn write_channel_png(
    canvas: &Canvas,
    channel: usize,
    depth: BitDepth,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let (nx, ny, _) = canvas.shape();
    let pixels = normalize_channel(canvas, channel, depth)?;
    let (w, h) = (nx as u32, ny as u32);

    match depth {
        BitDepth::Eight => {
            let data: Vec<u8> = pixels.into_iter().map(|v| v as u8).collect();
            let img: ImageBuffer<Luma<u8>, Vec<u8>> = ImageBuffer::from_raw(w, h, data)
                .context("preview buffer does not match canvas size")?;
            img.save(path)
        }
        BitDepth::Sixteen => {
            let img: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::from_raw(w, h, pixels)
                .context("preview buffer does not match canvas size")?;
            img.save(path)
        }
    }
    .with_context(|| format!("failed to write {}", path.display()))?;

    info!("Wrote {}", path.display());
    Ok(())
}
