use radio_sky::prelude::*;
use radio_sky_examples::{init_tracing, write_channel_png, BitDepth};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let base = SimulationConfig::new(600, 600).with_tile_size(200);
    let options = SimulateOptions::new().with_sources(12);

    // Same seed, so both images contain the same galaxies.
    let gaussian = simulate(&base, &options, &mut StdRng::seed_from_u64(7), None)?;
    write_channel_png(&gaussian, 0, BitDepth::Eight, "profiles-gaussian.png")?;

    let sersic = base.with_profile(ProfileKind::Sersic {
        index: 1.0,
        effective_radius: 6.0,
    });
    let sersic = simulate(&sersic, &options, &mut StdRng::seed_from_u64(7), None)?;
    write_channel_png(&sersic, 0, BitDepth::Eight, "profiles-sersic.png")?;

    Ok(())
}
