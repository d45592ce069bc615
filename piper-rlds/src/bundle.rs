//! Persisted episode bundles.
use crate::npy_bytes::{read_bytes_npy, write_bytes_npy};
use crate::{ConvertError, Step};
use anyhow::{Context, Result};
use ndarray::{Array, ArrayView, Axis, Dimension, RemoveAxis};
use ndarray::{Array2, ArrayD};
use ndarray_npy::{ReadNpyExt, WriteNpyExt};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use zip::{write::FileOptions, CompressionMethod, ZipArchive, ZipWriter};

/// The five parallel arrays of one persisted episode.
///
/// Every array shares the leading time dimension `T`. Bundles are written
/// once and never modified afterwards.
#[derive(Clone, Debug)]
pub struct EpisodeBundle {
    /// Stacked base camera images, `T×H×W×C`.
    pub observation_image: ArrayD<u8>,

    /// Stacked wrist camera images, `T×H×W×C`.
    pub observation_wrist_image: ArrayD<u8>,

    /// Stacked state vectors, `T×S`.
    pub observation_state: Array2<f32>,

    /// Stacked action vectors, `T×A`.
    pub action: Array2<f32>,

    /// Per-step instruction byte strings, length `T`.
    pub language_instruction: Vec<Vec<u8>>,
}

impl EpisodeBundle {
    /// Stacks the steps of one episode along a new leading time axis.
    ///
    /// All steps must agree per field in shape; stacking otherwise fails
    /// with [`ConvertError::ShapeMismatch`] naming the offending field.
    pub fn from_steps(steps: &[Step]) -> Result<Self, ConvertError> {
        if steps.is_empty() {
            return Err(ConvertError::EmptyEpisode);
        }

        Ok(Self {
            observation_image: stack_field(
                "observation_image",
                steps.iter().map(|step| step.image.view()).collect(),
            )?,
            observation_wrist_image: stack_field(
                "observation_wrist_image",
                steps.iter().map(|step| step.wrist_image.view()).collect(),
            )?,
            observation_state: stack_field(
                "observation_state",
                steps.iter().map(|step| step.state.view()).collect(),
            )?,
            action: stack_field(
                "action",
                steps.iter().map(|step| step.action.view()).collect(),
            )?,
            language_instruction: steps
                .iter()
                .map(|step| step.language_instruction.clone())
                .collect(),
        })
    }

    /// Number of steps in the bundle.
    pub fn len(&self) -> usize {
        self.language_instruction.len()
    }

    /// Whether the bundle holds no steps. Never true for a bundle built
    /// through [`EpisodeBundle::from_steps`].
    pub fn is_empty(&self) -> bool {
        self.language_instruction.is_empty()
    }

    /// Path of the bundle for `episode` under `output_dir`.
    pub fn path(output_dir: &Path, episode: i64) -> PathBuf {
        output_dir
            .join("episodes")
            .join(format!("episode_{:06}.npz", episode))
    }

    /// Writes the bundle as one compressed npz container.
    ///
    /// The file is staged next to its final path and renamed into place, so
    /// a crash cannot leave a half-written bundle under the final name.
    pub fn write(&self, output_dir: &Path, episode: i64) -> Result<PathBuf> {
        let path = Self::path(output_dir, episode);
        let staged = path.with_extension("npz.tmp");

        let file = File::create(&staged)
            .with_context(|| format!("failed to create {}", staged.display()))?;
        let mut npz = ZipWriter::new(BufWriter::new(file));
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        npz.start_file("observation_image.npy", options)?;
        self.observation_image.write_npy(&mut npz)?;
        npz.start_file("observation_wrist_image.npy", options)?;
        self.observation_wrist_image.write_npy(&mut npz)?;
        npz.start_file("observation_state.npy", options)?;
        self.observation_state.write_npy(&mut npz)?;
        npz.start_file("action.npy", options)?;
        self.action.write_npy(&mut npz)?;
        npz.start_file("language_instruction.npy", options)?;
        write_bytes_npy(&mut npz, &self.language_instruction)?;

        let mut inner = npz.finish()?;
        inner.flush()?;

        fs::rename(&staged, &path)
            .with_context(|| format!("failed to move bundle into {}", path.display()))?;
        Ok(path)
    }

    /// Reads a bundle back from `path`.
    pub fn read(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        let mut npz = ZipArchive::new(file)?;

        let observation_image = ArrayD::<u8>::read_npy(npz.by_name("observation_image.npy")?)?;
        let observation_wrist_image =
            ArrayD::<u8>::read_npy(npz.by_name("observation_wrist_image.npy")?)?;
        let observation_state = Array2::<f32>::read_npy(npz.by_name("observation_state.npy")?)?;
        let action = Array2::<f32>::read_npy(npz.by_name("action.npy")?)?;
        let language_instruction = read_bytes_npy(&mut npz.by_name("language_instruction.npy")?)?;

        Ok(Self {
            observation_image,
            observation_wrist_image,
            observation_state,
            action,
            language_instruction,
        })
    }
}

fn stack_field<A, D>(
    field: &'static str,
    views: Vec<ArrayView<A, D>>,
) -> Result<Array<A, D::Larger>, ConvertError>
where
    A: Clone,
    D: Dimension,
    D::Larger: RemoveAxis,
{
    ndarray::stack(Axis(0), &views).map_err(|_| ConvertError::ShapeMismatch { field })
}
