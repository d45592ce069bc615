//! Conversion driver and run summary.
use crate::{frame_to_step, EpisodeBundle, EpisodeSegments, Frame, Step};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Format tag recorded in the run summary.
pub const FORMAT_TAG: &str = "libero_rlds_npz_v1";

/// Top-level descriptor of one conversion run.
///
/// Written once after all bundles; never mutated afterwards. A missing
/// `metadata.json` marks a run that did not finish.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DatasetSummary {
    /// Source dataset directory as given by the caller.
    pub input_dir: String,

    /// Number of episodes written.
    pub episodes: usize,

    /// Total number of steps over all episodes.
    pub steps: usize,

    /// Output format tag.
    pub format: String,
}

/// Converts a frame stream into per-episode bundles under `output_dir`.
///
/// Frames are grouped by contiguous runs of the episode identifier,
/// normalized into canonical steps, and written as one compressed bundle per
/// group; `output_dir/metadata.json` is written after the final bundle. Any
/// error aborts the run, leaving the bundles written so far on disk and no
/// summary.
pub fn convert_dataset<I>(frames: I, input_dir: &str, output_dir: &Path) -> Result<DatasetSummary>
where
    I: IntoIterator<Item = Result<Frame>>,
{
    fs::create_dir_all(output_dir.join("episodes"))
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    let mut episodes = 0;
    let mut steps = 0;
    for group in EpisodeSegments::new(frames.into_iter()) {
        let (episode, frames) = group?;
        let group_steps: Vec<Step> = frames.into_iter().map(frame_to_step).collect();
        let bundle = EpisodeBundle::from_steps(&group_steps)
            .with_context(|| format!("stacking episode {}", episode))?;
        let path = bundle.write(output_dir, episode)?;
        log::info!("episode {}: {} steps -> {}", episode, bundle.len(), path.display());
        episodes += 1;
        steps += group_steps.len();
    }

    let summary = DatasetSummary {
        input_dir: input_dir.to_owned(),
        episodes,
        steps,
        format: FORMAT_TAG.to_owned(),
    };
    write_summary(&summary, output_dir)?;
    log::info!(
        "wrote {} episodes ({} steps) to {}",
        episodes,
        steps,
        output_dir.display()
    );
    Ok(summary)
}

fn write_summary(summary: &DatasetSummary, output_dir: &Path) -> Result<()> {
    let path = output_dir.join("metadata.json");
    let file =
        File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writer.flush()?;
    Ok(())
}
