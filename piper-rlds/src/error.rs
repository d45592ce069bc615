//! Errors in the conversion pipeline.
use thiserror::Error;

/// Errors raised while converting a dataset.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// A source frame exposed neither `episode_index` nor `episode_id`.
    #[error("frame lacks `episode_index` or `episode_id` for grouping")]
    MissingGroupKey,

    /// Steps within one episode disagree in a per-field array shape.
    #[error("steps of one episode disagree in the shape of `{field}`")]
    ShapeMismatch {
        /// Bundle field whose per-step shapes disagree.
        field: &'static str,
    },

    /// An episode group contained no steps.
    #[error("episode group contains no steps")]
    EmptyEpisode,

    /// The Python `lerobot` package could not be imported.
    #[cfg(feature = "lerobot")]
    #[error(
        "the `lerobot` Python package is not installed; install it \
         (e.g. `pip install lerobot`) before converting"
    )]
    LeRobotUnavailable(#[source] pyo3::PyErr),
}
