use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use radio_sky::prelude::*;
use radio_sky_examples::{init_tracing, write_channel_png, BitDepth};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Profile {
    Gaussian,
    Sersic,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Simulate a radio sky of star-forming galaxies")]
struct Args {
    #[arg(long, default_value = "2000", help = "Canvas width in pixels")]
    nx: usize,

    #[arg(long, default_value = "2000", help = "Canvas height in pixels")]
    ny: usize,

    #[arg(long, default_value = "0.25", help = "Pixel size in arcseconds")]
    pixel_size: f64,

    #[arg(long, default_value = "1", help = "Number of frequency channels")]
    nchan: usize,

    #[arg(long, default_value = "0.7", help = "Lowest channel frequency (GHz)")]
    freq_min: f64,

    #[arg(long, default_value = "2.0", help = "Highest channel frequency (GHz)")]
    freq_max: f64,

    #[arg(long, default_value = "13000", help = "Sources per square degree")]
    density: f64,

    #[arg(long, help = "Fixed galaxy count (drawn from the density when omitted)")]
    nsrc: Option<usize>,

    #[arg(long, default_value = "250", help = "Tile side length in pixels")]
    tile_size: usize,

    #[arg(long, value_enum, default_value = "gaussian")]
    profile: Profile,

    #[arg(long, default_value = "4.0", help = "Sersic index")]
    sersic_index: f64,

    #[arg(long, default_value = "25.0", help = "Sersic effective radius in pixels")]
    effective_radius: f64,

    #[arg(long, value_name = "ALPHA", help = "Elastic distortion amplitude in pixels")]
    distort: Option<f64>,

    #[arg(long, default_value = "2025")]
    seed: u64,

    #[arg(short = 'o', long, default_value = "simulate-sky.png")]
    output: PathBuf,

    #[arg(long, help = "Write the galaxy catalog to this file")]
    catalog: Option<PathBuf>,

    #[arg(long, default_value = "0", help = "Channel rendered to the preview")]
    channel: usize,

    #[arg(long, help = "Write an 8-bit preview instead of 16-bit")]
    eight_bit: bool,
}

impl Args {
    fn config(&self) -> SimulationConfig {
        let profile = match self.profile {
            Profile::Gaussian => ProfileKind::Gaussian,
            Profile::Sersic => ProfileKind::Sersic {
                index: self.sersic_index,
                effective_radius: self.effective_radius,
            },
        };
        SimulationConfig::new(self.nx, self.ny)
            .with_pixel_size(self.pixel_size)
            .with_channels(self.nchan)
            .with_frequency_range(self.freq_min, self.freq_max)
            .with_source_density(self.density)
            .with_tile_size(self.tile_size)
            .with_profile(profile)
    }

    fn options(&self) -> SimulateOptions {
        let mut options = SimulateOptions::new();
        if let Some(n) = self.nsrc {
            options = options.with_sources(n);
        }
        if let Some(alpha) = self.distort {
            options = options.with_distortion(alpha);
        }
        options
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = args.config();
    config.validate()?;
    info!(
        "Expecting about {:.1} galaxies over {:.5} square degrees.",
        expected_source_count(&config),
        config.area_sqdeg()
    );

    let mut rng = StdRng::seed_from_u64(args.seed);
    let canvas = match &args.catalog {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut sink = TextCatalogSink::new(BufWriter::new(file));
            let canvas = simulate_with_catalog(&config, &args.options(), &mut rng, &mut sink)?;
            sink.into_inner().flush()?;
            info!("Wrote catalog to {}", path.display());
            canvas
        }
        None => simulate(&config, &args.options(), &mut rng, None)?,
    };

    for (keyword, value) in ImageMetadata::from_config(&config).cards() {
        info!("{keyword:<8} = {value}");
    }

    let depth = if args.eight_bit {
        BitDepth::Eight
    } else {
        BitDepth::Sixteen
    };
    write_channel_png(&canvas, args.channel, depth, &args.output)?;

    Ok(())
}
