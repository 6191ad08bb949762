//! Sky compositor: samples galaxies, renders their tiles and accumulates them into a canvas.
use ndarray::{s, ArrayView2};
use rand::RngCore;
use tracing::{debug, info, warn};

use crate::canvas::Canvas;
use crate::catalog::{CatalogRecord, CatalogSink};
use crate::clip::{clip, ClipWindow};
use crate::config::SimulationConfig;
use crate::distort::{ElasticDistortion, TileDistortion};
use crate::error::Result;
use crate::profile::{ProfileRenderer, ProfileShape};
use crate::sampling::{sample_source_count, GalaxySample, GalaxySampling, StarFormingGalaxies};
use crate::spectral::{channel_frequencies, scale_channels, REFERENCE_FREQUENCY_GHZ};

/// Per-run options that are not part of the canvas configuration.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimulateOptions {
    /// Fixed number of galaxies. When unset the count is drawn from the source density.
    pub nsrc: Option<usize>,
    /// Elastic distortion amplitude in pixels. When unset tiles are used as rendered.
    pub distortion: Option<f64>,
}

impl SimulateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a fixed galaxy count.
    pub fn with_sources(mut self, nsrc: usize) -> Self {
        self.nsrc = Some(nsrc);
        self
    }

    /// Enables elastic distortion with amplitude `alpha`.
    pub fn with_distortion(mut self, alpha: f64) -> Self {
        self.distortion = Some(alpha);
        self
    }
}

/// Holds everything needed to simulate skies for one configuration.
pub struct SkySimulator {
    /// Canvas configuration applied to every run.
    pub config: SimulationConfig,
    renderer: Box<dyn ProfileRenderer>,
    sampler: Box<dyn GalaxySampling>,
    distortion: Option<Box<dyn TileDistortion>>,
}

impl SkySimulator {
    /// Validates `config` and builds the renderer and sampler it selects.
    pub fn try_new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let renderer = config.profile.renderer()?;
        let sampler = Box::new(StarFormingGalaxies::new()?);
        Ok(Self {
            config,
            renderer,
            sampler,
            distortion: None,
        })
    }

    /// Replaces the galaxy sampler.
    pub fn with_sampler(mut self, sampler: impl GalaxySampling + 'static) -> Self {
        self.sampler = Box::new(sampler);
        self
    }

    /// Replaces the profile renderer.
    pub fn with_renderer(mut self, renderer: impl ProfileRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Warps every tile before it is composited.
    pub fn with_distortion(mut self, distortion: impl TileDistortion + 'static) -> Self {
        self.distortion = Some(Box::new(distortion));
        self
    }

    /// Simulates a canvas, discarding the catalog.
    pub fn run(&self, nsrc: Option<usize>, rng: &mut impl RngCore) -> Result<Canvas> {
        self.run_internal(nsrc, rng, &mut ())
    }

    /// Simulates a canvas, streaming one catalog record per galaxy into `sink`.
    pub fn run_with_catalog(
        &self,
        nsrc: Option<usize>,
        rng: &mut impl RngCore,
        sink: &mut dyn CatalogSink,
    ) -> Result<Canvas> {
        self.run_internal(nsrc, rng, sink)
    }

    fn run_internal<R: RngCore>(
        &self,
        nsrc: Option<usize>,
        rng: &mut R,
        sink: &mut dyn CatalogSink,
    ) -> Result<Canvas> {
        let config = &self.config;
        let (nx, ny, nchan) = config.shape();
        let nsrc = match nsrc {
            Some(n) => n,
            None => sample_source_count(config, rng)?,
        };
        info!("Simulating {nsrc} galaxies on a {nx}x{ny}x{nchan} canvas.");

        let frequencies = channel_frequencies(config);
        let mut canvas = Canvas::zeros(nx, ny, nchan);

        for index in 0..nsrc {
            let galaxy = self.sampler.sample(config, rng);
            if index == 0 {
                sink.write_header()?;
            }
            sink.record(&CatalogRecord::from(&galaxy))?;
            debug!(
                "Galaxy {index}: ({}, {}) flux={:.4} sigma=({:.2}, {:.2}) pa={:.1}",
                galaxy.x,
                galaxy.y,
                galaxy.flux,
                galaxy.sigma_x,
                galaxy.sigma_y,
                galaxy.position_angle_deg
            );

            let shape = ProfileShape::for_galaxy(&galaxy, config.nblock);
            shape.validate()?;
            let mut tile = self.renderer.render(&shape, config.nblock);
            if let Some(distortion) = &self.distortion {
                tile = distortion.distort(&tile, rng);
            }

            let window = if nchan == 1 {
                composite_tile(&mut canvas, tile.view(), galaxy.x as isize, galaxy.y as isize, 0)?
            } else {
                composite_channels(&mut canvas, tile.view(), &galaxy, &frequencies)?
            };
            if window.is_empty() {
                warn!(
                    "Galaxy {index} at ({}, {}) lies outside the canvas; skipped.",
                    galaxy.x, galaxy.y
                );
            }
        }

        Ok(canvas)
    }
}

/// Simulates a sky for `config`, optionally streaming the catalog into `sink`.
pub fn simulate<R: RngCore>(
    config: &SimulationConfig,
    options: &SimulateOptions,
    rng: &mut R,
    sink: Option<&mut dyn CatalogSink>,
) -> Result<Canvas> {
    let mut simulator = SkySimulator::try_new(config.clone())?;
    if let Some(alpha) = options.distortion {
        simulator = simulator.with_distortion(ElasticDistortion::new(alpha));
    }
    if let Some(s) = sink {
        simulator.run_internal(options.nsrc, rng, s)
    } else {
        simulator.run_internal(options.nsrc, rng, &mut ())
    }
}

/// Simulates a sky for `config`, streaming one catalog record per galaxy into `sink`.
pub fn simulate_with_catalog<R: RngCore>(
    config: &SimulationConfig,
    options: &SimulateOptions,
    rng: &mut R,
    sink: &mut dyn CatalogSink,
) -> Result<Canvas> {
    simulate(config, options, rng, Some(sink))
}

/// Add a square `tile` centred on canvas pixel `(x, y)` into one channel.
///
/// Parts of the tile that fall off the canvas are dropped. Returns the window used.
pub fn composite_tile(
    canvas: &mut Canvas,
    tile: ArrayView2<'_, f64>,
    x: isize,
    y: isize,
    channel: usize,
) -> Result<ClipWindow> {
    let (nx, ny, _) = canvas.shape();
    let window = clip(nx, ny, x, y, tile.nrows());
    canvas.accumulate(&window, tile, channel)?;
    Ok(window)
}

fn composite_channels(
    canvas: &mut Canvas,
    tile: ArrayView2<'_, f64>,
    galaxy: &GalaxySample,
    frequencies: &[f64],
) -> Result<ClipWindow> {
    let (nx, ny, _) = canvas.shape();
    let window = clip(nx, ny, galaxy.x as isize, galaxy.y as isize, tile.nrows());
    window.check()?;
    if window.is_empty() {
        return Ok(window);
    }
    let base = tile.slice(s![window.tile_x.clone(), window.tile_y.clone()]);
    let scaled = scale_channels(
        base,
        frequencies,
        galaxy.spectral_index,
        REFERENCE_FREQUENCY_GHZ,
    );
    let local = ClipWindow {
        canvas_x: window.canvas_x.clone(),
        canvas_y: window.canvas_y.clone(),
        tile_x: 0..window.tile_x.len(),
        tile_y: 0..window.tile_y.len(),
    };
    for (channel, plane) in scaled.iter().enumerate() {
        canvas.accumulate(&local, plane.view(), channel)?;
    }
    Ok(window)
}
