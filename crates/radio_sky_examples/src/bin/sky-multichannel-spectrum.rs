use radio_sky::prelude::*;
use radio_sky_examples::{init_tracing, write_channel_png, BitDepth};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Eight channels across the band; steep-spectrum galaxies fade towards 2 GHz.
    let config = SimulationConfig::new(800, 800)
        .with_channels(8)
        .with_frequency_range(0.7, 2.0);
    let options = SimulateOptions::new().with_sources(40);

    let mut rng = StdRng::seed_from_u64(2025);
    let canvas = simulate(&config, &options, &mut rng, None)?;

    for (c, freq) in channel_frequencies(&config).iter().enumerate() {
        let flux: f64 = canvas.channel(c).sum();
        info!("channel {c}: {freq:.3} GHz, total flux {flux:.3}");
    }

    write_channel_png(&canvas, 0, BitDepth::Sixteen, "sky-multichannel-low.png")?;
    write_channel_png(&canvas, 7, BitDepth::Sixteen, "sky-multichannel-high.png")?;

    Ok(())
}
