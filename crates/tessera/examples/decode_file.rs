//! Decode audio files the way an audio column would and print a summary.
//!
//! ```
//! cargo run -p tessera --example decode_file -- [--rate HZ] [--stereo] FILE...
//! ```

use std::{env::args, error::Error, num::NonZeroU32};

use tessera::prelude::*;
use tracing::{info, metadata::LevelFilter};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::default()
                .add_directive("tessera_audio=debug".parse()?)
                .add_directive("tessera_decode=debug".parse()?)
                .add_directive(LevelFilter::INFO.into()),
        )
        .with_line_number(false)
        .with_file(false)
        .init();

    let mut config = AudioFeatureConfig::default();
    let mut references = Vec::new();

    let mut argv = args().skip(1);
    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "--rate" => {
                let rate: u32 = argv.next().ok_or("--rate needs a value")?.parse()?;
                let rate = NonZeroU32::new(rate).ok_or("--rate must be positive")?;
                config = config.with_sampling_rate(rate);
            }
            "--stereo" => config = config.with_mono(false),
            path => references.push(StoredAudioReference::path_only(path)),
        }
    }
    if references.is_empty() {
        return Err("usage: decode_file [--rate HZ] [--stereo] FILE...".into());
    }

    info!(spec = %serde_json::to_string(&FeatureSpec::from(config.clone()))?, "Feature");

    let audio = Audio::new(config);
    let batch = audio.decode_batch(&references)?;

    for item in batch.into_items() {
        let secs = item.array.frames() as f64 / f64::from(item.sampling_rate);
        info!(
            path = %item.path,
            rate = item.sampling_rate,
            channels = item.array.channel_count(),
            frames = item.array.frames(),
            secs,
            "Decoded"
        );
    }

    Ok(())
}
