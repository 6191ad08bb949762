#![forbid(unsafe_code)]

mod preview;

pub use preview::{init_tracing, normalize_channel, write_channel_png, BitDepth};
