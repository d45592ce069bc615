//! Conversion of LeRobot episodic datasets into a Libero-style RLDS layout.
//!
//! This crate re-segments a flat stream of per-step frames into episodes and
//! serializes each episode as one self-contained array bundle, with a
//! top-level summary record written once the whole run has finished.
//!
//! # Features
//!
//! - **Episode segmentation**: group a one-pass frame stream by contiguous
//!   runs of the episode identifier.
//! - **Step normalization**: map raw frames into the canonical step layout
//!   (images, state, action, per-step instruction bytes).
//! - **Bundle serialization**: stack each field over time and persist one
//!   compressed `.npz` container per episode.
//! - **Dataset loading** (feature `lerobot`): read LeRobot datasets through
//!   the Python `lerobot` package.
//!
//! # Output layout
//!
//! ```text
//! output_dir/
//!   metadata.json
//!   episodes/
//!     episode_000000.npz
//!     episode_000001.npz
//!     ...
//! ```
//!
//! Each bundle stores `observation_image` (T×H×W×C), `observation_wrist_image`
//! (T×H×W×C), `observation_state` (T×S), `action` (T×A) and
//! `language_instruction` (T byte strings).
//!
//! # Example
//!
//! ```no_run
//! use anyhow::Result;
//! use piper_rlds::{convert_dataset, Frame};
//! use std::path::Path;
//!
//! fn main() -> Result<()> {
//!     // Any one-pass frame source works; here an already collected stream.
//!     let frames: Vec<Result<Frame>> = Vec::new();
//!     let summary = convert_dataset(frames, "datasets/piper", Path::new("out"))?;
//!     println!("{} episodes, {} steps", summary.episodes, summary.steps);
//!     Ok(())
//! }
//! ```

mod bundle;
mod convert;
mod error;
mod frame;
#[cfg(feature = "lerobot")]
mod lerobot;
mod npy_bytes;
mod segment;
mod step;

pub use bundle::EpisodeBundle;
pub use convert::{convert_dataset, DatasetSummary, FORMAT_TAG};
pub use error::ConvertError;
pub use frame::{Frame, TaskLabel};
#[cfg(feature = "lerobot")]
pub use lerobot::{LeRobotDataset, LeRobotFrames};
pub use segment::{EpisodeGroup, EpisodeSegments};
pub use step::{frame_to_step, Step};
