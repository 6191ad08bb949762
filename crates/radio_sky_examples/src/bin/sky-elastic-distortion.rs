use radio_sky::prelude::*;
use radio_sky_examples::{init_tracing, write_channel_png, BitDepth};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = SimulationConfig::new(500, 500).with_pixel_size(0.1);
    let mut catalog = VecSink::new();

    let simulator = SkySimulator::try_new(config)?
        .with_distortion(ElasticDistortion::new(25.0).with_sigma(4.0));
    let canvas = simulator.run_with_catalog(Some(8), &mut StdRng::seed_from_u64(99), &mut catalog)?;

    for record in catalog.as_slice() {
        println!("{}", record.to_line());
    }
    write_channel_png(&canvas, 0, BitDepth::Sixteen, "sky-elastic-distortion.png")?;

    Ok(())
}
