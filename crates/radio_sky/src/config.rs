//! Simulation configuration.
//!
//! [`SimulationConfig`] fixes the canvas geometry, the frequency axis, the expected
//! source density and the tile size for one simulated realization.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::profile::ProfileKind;

/// Default tile size in pixels for rendering a single galaxy.
pub const DEFAULT_TILE_SIZE: usize = 250;

/// Default declination of the image reference pixel in degrees.
pub const DEFAULT_REFERENCE_DEC_DEG: f64 = 37.129_833_333_333_3;

/// Configuration for a sky simulation.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationConfig {
    /// Canvas width in pixels.
    pub nx: usize,
    /// Canvas height in pixels.
    pub ny: usize,
    /// Pixel scale in arcseconds.
    pub pixel_size_arcsec: f64,
    /// Number of frequency channels.
    pub nchan: usize,
    /// Lowest channel frequency in GHz.
    pub freq_min_ghz: f64,
    /// Highest channel frequency in GHz.
    pub freq_max_ghz: f64,
    /// Expected number of sources per square degree.
    pub source_density_sqdeg: f64,
    /// Side length of the square tile each galaxy is rendered into.
    pub nblock: usize,
    /// Brightness profile used for every galaxy.
    pub profile: ProfileKind,
    /// Declination of the reference pixel, used for image metadata only.
    pub reference_dec_deg: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            nx: 2000,
            ny: 2000,
            pixel_size_arcsec: 0.25,
            nchan: 1,
            freq_min_ghz: 0.7,
            freq_max_ghz: 2.0,
            source_density_sqdeg: 13_000.0,
            nblock: DEFAULT_TILE_SIZE,
            profile: ProfileKind::Gaussian,
            reference_dec_deg: DEFAULT_REFERENCE_DEC_DEG,
        }
    }
}

impl SimulationConfig {
    /// Creates a new [`SimulationConfig`] with the given canvas size and defaults elsewhere.
    pub fn new(nx: usize, ny: usize) -> Self {
        Self {
            nx,
            ny,
            ..Default::default()
        }
    }

    /// Sets the pixel scale in arcseconds.
    pub fn with_pixel_size(mut self, pixel_size_arcsec: f64) -> Self {
        self.pixel_size_arcsec = pixel_size_arcsec;
        self
    }

    /// Sets the number of frequency channels.
    pub fn with_channels(mut self, nchan: usize) -> Self {
        self.nchan = nchan;
        self
    }

    /// Sets the frequency range in GHz.
    pub fn with_frequency_range(mut self, freq_min_ghz: f64, freq_max_ghz: f64) -> Self {
        self.freq_min_ghz = freq_min_ghz;
        self.freq_max_ghz = freq_max_ghz;
        self
    }

    /// Sets the expected source density per square degree.
    pub fn with_source_density(mut self, source_density_sqdeg: f64) -> Self {
        self.source_density_sqdeg = source_density_sqdeg;
        self
    }

    /// Sets the tile size.
    pub fn with_tile_size(mut self, nblock: usize) -> Self {
        self.nblock = nblock;
        self
    }

    /// Sets the brightness profile.
    pub fn with_profile(mut self, profile: ProfileKind) -> Self {
        self.profile = profile;
        self
    }

    /// Sets the reference declination in degrees.
    pub fn with_reference_dec(mut self, reference_dec_deg: f64) -> Self {
        self.reference_dec_deg = reference_dec_deg;
        self
    }

    /// Canvas shape as `(nx, ny, nchan)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.nx, self.ny, self.nchan)
    }

    /// Canvas area in square degrees.
    pub fn area_sqdeg(&self) -> f64 {
        let pixel_deg = self.pixel_size_arcsec / 3600.0;
        (self.nx as f64) * (self.ny as f64) * pixel_deg * pixel_deg
    }

    /// Spacing between adjacent channels in GHz. Zero for a single channel.
    pub fn channel_spacing_ghz(&self) -> f64 {
        if self.nchan <= 1 {
            0.0
        } else {
            (self.freq_max_ghz - self.freq_min_ghz) / (self.nchan - 1) as f64
        }
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.nx == 0 || self.ny == 0 {
            return Err(Error::InvalidConfig("nx and ny must be >= 1".into()));
        }
        if self.nchan == 0 {
            return Err(Error::InvalidConfig("nchan must be >= 1".into()));
        }
        if self.nblock == 0 {
            return Err(Error::InvalidConfig("nblock must be >= 1".into()));
        }
        if !self.pixel_size_arcsec.is_finite() || self.pixel_size_arcsec <= 0.0 {
            return Err(Error::InvalidConfig(
                "pixel_size_arcsec must be finite and > 0".into(),
            ));
        }
        if !self.source_density_sqdeg.is_finite() || self.source_density_sqdeg < 0.0 {
            return Err(Error::InvalidConfig(
                "source_density_sqdeg must be finite and >= 0".into(),
            ));
        }
        if !self.freq_min_ghz.is_finite()
            || !self.freq_max_ghz.is_finite()
            || self.freq_min_ghz <= 0.0
            || self.freq_max_ghz < self.freq_min_ghz
        {
            return Err(Error::InvalidConfig(
                "frequency range must satisfy 0 < freq_min_ghz <= freq_max_ghz".into(),
            ));
        }
        self.profile.validate()?;

        Ok(())
    }
}
