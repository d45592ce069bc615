//! Canonical step records.
use crate::{Frame, TaskLabel};
use ndarray::{Array1, ArrayD};

/// One canonical step of an episode.
///
/// Image arrays are carried over from the source unchanged; layout and dtype
/// canonicalization belongs to the policy-input path, not to dataset
/// conversion.
#[derive(Clone, Debug)]
pub struct Step {
    /// Base camera image.
    pub image: ArrayD<u8>,

    /// Wrist camera image.
    pub wrist_image: ArrayD<u8>,

    /// Proprioceptive state vector.
    pub state: Array1<f32>,

    /// Action vector.
    pub action: Array1<f32>,

    /// Per-step instruction as a byte string.
    pub language_instruction: Vec<u8>,
}

/// Normalizes a raw frame into a canonical step.
///
/// A missing task annotation becomes an empty instruction. The instruction
/// is per-step; identical values across an episode are stored as-is, without
/// deduplication.
pub fn frame_to_step(frame: Frame) -> Step {
    let language_instruction = match frame.task {
        Some(task) => task.into_bytes(),
        None => Vec::new(),
    };

    Step {
        image: frame.image,
        wrist_image: frame.wrist_image,
        state: frame.state,
        action: frame.actions,
        language_instruction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{ArrayD, IxDyn};

    fn frame(task: Option<TaskLabel>) -> Frame {
        Frame {
            episode: Some(0),
            image: ArrayD::from_elem(IxDyn(&[3, 2, 2]), 7),
            wrist_image: ArrayD::zeros(IxDyn(&[2, 2, 3])),
            state: Array1::zeros(8),
            actions: Array1::zeros(7),
            task,
        }
    }

    #[test]
    fn text_task_is_utf8_encoded() {
        let step = frame_to_step(frame(Some(TaskLabel::Text("pick up the mug".into()))));
        assert_eq!(step.language_instruction, b"pick up the mug".to_vec());
    }

    #[test]
    fn byte_task_passes_through() {
        let step = frame_to_step(frame(Some(TaskLabel::Bytes(b"close drawer".to_vec()))));
        assert_eq!(step.language_instruction, b"close drawer".to_vec());
    }

    #[test]
    fn missing_task_becomes_empty_instruction() {
        let step = frame_to_step(frame(None));
        assert!(step.language_instruction.is_empty());
    }

    #[test]
    fn image_layout_is_not_touched() {
        // The frame above stores its base image channel-first; conversion
        // must not reorder it.
        let step = frame_to_step(frame(None));
        assert_eq!(step.image.shape(), &[3, 2, 2]);
        assert_eq!(step.wrist_image.shape(), &[2, 2, 3]);
    }
}
