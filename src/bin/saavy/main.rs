//! saavy - render a built-in score to the speaker or a WAV file
//!
//! Run with: cargo run -- --score tones
//!           cargo run -- --score drumtest --output drums.wav

mod scores;
mod sequencer;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use saavy_synth::{
    runtime::{self, Destination, Outcome, StopSignal},
    SessionConfig, DEFAULT_SAMPLE_RATE,
};

use scores::Score;

#[derive(Debug, Parser)]
#[command(name = "saavy", about = "Procedural drum and tone renderer")]
struct Args {
    /// Score to render
    #[arg(long, value_enum, default_value_t = Score::Drumtest)]
    score: Score,

    /// Write a WAV file instead of playing on the default device
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Samples per second
    #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
    sample_rate: u32,

    /// Noise seed
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let args = Args::parse();
    let config = SessionConfig::new()
        .with_sample_rate(args.sample_rate)
        .with_noise_seed(args.seed);

    let stop = StopSignal::new();
    ctrlc::set_handler({
        let stop = stop.clone();
        move || stop.trigger()
    })
    .wrap_err("failed to install Ctrl+C handler")?;

    let destination = Destination::from(args.output);

    println!("=== Saavy ===");
    println!("Score: {:?}", args.score);
    println!("Sample rate: {} Hz", config.sample_rate);
    match &destination {
        Destination::Device => println!("Playing... Press Ctrl+C to stop"),
        Destination::File(path) => println!("Writing {}", path.display()),
    }
    println!();

    let score = args.score;
    let outcome = runtime::run(destination, &config, stop, |synth| score.perform(synth))
        .wrap_err("rendering failed")?;

    if outcome == Outcome::Interrupted {
        println!("Stopped.");
    }
    Ok(())
}
