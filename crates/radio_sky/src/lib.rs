#![deny(unsafe_code)]
//! radio_sky: Synthetic radio sky images populated with star-forming galaxies.
//!
//! Modules:
//! - sampling: galaxy parameter distributions and the source-count draw
//! - profile: Gaussian and Sersic brightness profiles rendered into square tiles
//! - clip: tile/canvas overlap at the image edges
//! - spectral: channel frequencies and power-law flux scaling
//! - canvas: the multi-channel accumulation buffer
//! - sky: the compositor tying sampling, rendering and accumulation together
//! - catalog, metadata, distort: catalog sinks, image axis metadata and tile warps
//!
//! For examples, see README and the radio_sky_examples crate.
pub mod canvas;
pub mod catalog;
pub mod clip;
pub mod config;
pub mod distort;
pub mod error;
pub mod metadata;
pub mod profile;
pub mod sampling;
pub mod sky;
pub mod spectral;

/// Convenient re-exports for common types. Import with `use radio_sky::prelude::*;`.
pub mod prelude {
    pub use crate::canvas::Canvas;
    pub use crate::catalog::{
        CatalogRecord, CatalogSink, FnSink, TextCatalogSink, VecSink, CATALOG_HEADER,
    };
    pub use crate::clip::{clip, clip_axis, ClipWindow};
    pub use crate::config::SimulationConfig;
    pub use crate::distort::{ElasticDistortion, TileDistortion};
    pub use crate::error::{Error, Result};
    pub use crate::metadata::{AxisDescriptor, HeaderValue, ImageMetadata};
    pub use crate::profile::{
        GaussianProfile, ProfileKind, ProfileRenderer, ProfileShape, ProfileTile, SersicProfile,
    };
    pub use crate::sampling::{
        expected_source_count, sample_source_count, GalaxySample, GalaxySampling,
        StarFormingGalaxies,
    };
    pub use crate::sky::{
        composite_tile, simulate, simulate_with_catalog, SimulateOptions, SkySimulator,
    };
    pub use crate::spectral::{
        channel_frequencies, scale_channels, spectral_factor, REFERENCE_FREQUENCY_GHZ,
    };
}
