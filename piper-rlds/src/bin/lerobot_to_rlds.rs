//! Converts a LeRobot dataset on disk into a Libero-style RLDS layout.
use anyhow::Result;
use clap::Parser;
use piper_rlds::{convert_dataset, LeRobotDataset};
use std::path::Path;

/// Convert a LeRobot dataset into per-episode RLDS bundles.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Source LeRobot dataset directory.
    input_dir: String,

    /// Destination directory for bundles and metadata.
    output_dir: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let dataset = LeRobotDataset::load(&args.input_dir)?;
    log::info!("{} frames in {}", dataset.num_frames()?, args.input_dir);

    let summary = convert_dataset(dataset.frames()?, &args.input_dir, Path::new(&args.output_dir))?;
    println!(
        "wrote {} episodes ({} steps) to {}",
        summary.episodes, summary.steps, args.output_dir
    );
    Ok(())
}
