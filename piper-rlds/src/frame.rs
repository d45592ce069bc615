//! Raw per-step records as provided by a source dataset.
use ndarray::{Array1, ArrayD};

/// Free-text task annotation attached to a frame.
///
/// Sources store the instruction either as text or as an already encoded
/// byte string; both are carried unchanged until normalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskLabel {
    /// Plain text.
    Text(String),

    /// Encoded bytes.
    Bytes(Vec<u8>),
}

impl TaskLabel {
    /// Encodes the label as a byte string.
    ///
    /// Text is UTF-8 encoded; bytes pass through unchanged.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            TaskLabel::Text(text) => text.into_bytes(),
            TaskLabel::Bytes(bytes) => bytes,
        }
    }
}

/// One raw step record.
///
/// `episode` is `None` when the source exposed no episode identifier;
/// segmentation treats that as a fatal error for the whole run. Image arrays
/// keep whatever layout the source stores, no reordering happens on this
/// path.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Episode identifier.
    pub episode: Option<i64>,

    /// Base camera image.
    pub image: ArrayD<u8>,

    /// Wrist camera image.
    pub wrist_image: ArrayD<u8>,

    /// Proprioceptive state vector.
    pub state: Array1<f32>,

    /// Action vector.
    pub actions: Array1<f32>,

    /// Optional task annotation.
    pub task: Option<TaskLabel>,
}
