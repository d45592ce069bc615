//! Policy input shaping.
use crate::{canonicalize, ImageTensor, ModelType, PolicyError};
use anyhow::Result;
use ndarray::{Array1, ArrayD};
use std::collections::HashMap;

/// A language prompt as provided by the caller.
#[derive(Clone, Debug)]
pub enum Prompt {
    /// Plain text.
    Text(String),

    /// UTF-8 encoded bytes.
    Bytes(Vec<u8>),
}

/// One step's raw observation at the policy boundary.
#[derive(Clone, Debug)]
pub struct PiperObservation {
    /// Base camera image.
    pub image: ImageTensor,

    /// Wrist camera image.
    pub wrist_image: ImageTensor,

    /// Proprioceptive state vector.
    pub state: Array1<f32>,

    /// Optional action chunk, passed through without shape validation.
    pub actions: Option<ArrayD<f32>>,

    /// Optional language prompt.
    pub prompt: Option<Prompt>,
}

/// The fixed input structure consumed by the policy.
#[derive(Clone, Debug)]
pub struct PolicyInput {
    /// Proprioceptive state vector.
    pub state: Array1<f32>,

    /// Canonicalized image per slot name.
    pub image: HashMap<String, ArrayD<u8>>,

    /// Whether each slot holds real data rather than a placeholder.
    pub image_mask: HashMap<String, bool>,

    /// Action chunk, when the caller provided one.
    pub actions: Option<ArrayD<f32>>,

    /// Decoded language prompt, when the caller provided one.
    pub prompt: Option<String>,
}

/// Shapes raw observations into the image slot layout of one model variant.
///
/// Stateless; the declared variant is the only configuration, so a single
/// converter value can serve any number of callers.
#[derive(Clone, Copy, Debug)]
pub struct PiperInputConverter {
    /// Variant whose slot layout is produced.
    pub model_type: ModelType,
}

impl PiperInputConverter {
    /// Builds the policy input for one observation.
    ///
    /// Both camera images are canonicalized to channel-last `u8`; the slot
    /// that has no physical camera is filled with zeros shaped like the base
    /// image and, for PI0/PI05, masked out.
    pub fn convert(&self, obs: PiperObservation) -> Result<PolicyInput> {
        let base = canonicalize(obs.image);
        let wrist = canonicalize(obs.wrist_image);

        let (names, images, masks) = match self.model_type {
            ModelType::Pi0 | ModelType::Pi05 => {
                let placeholder = ArrayD::zeros(base.raw_dim());
                (
                    ["base_0_rgb", "left_wrist_0_rgb", "right_wrist_0_rgb"],
                    vec![base, wrist, placeholder],
                    [true, true, false],
                )
            }
            ModelType::Pi0Fast => {
                let placeholder = ArrayD::zeros(base.raw_dim());
                (
                    ["base_0_rgb", "base_1_rgb", "wrist_0_rgb"],
                    vec![base, placeholder, wrist],
                    [true, true, true],
                )
            }
        };

        let mut image = HashMap::new();
        let mut image_mask = HashMap::new();
        for ((name, slot), mask) in names.iter().zip(images).zip(masks.iter()) {
            image.insert((*name).to_owned(), slot);
            image_mask.insert((*name).to_owned(), *mask);
        }

        let prompt = match obs.prompt {
            Some(Prompt::Text(text)) => Some(text),
            Some(Prompt::Bytes(bytes)) => {
                Some(String::from_utf8(bytes).map_err(PolicyError::from)?)
            }
            None => None,
        };

        Ok(PolicyInput {
            state: obs.state,
            image,
            image_mask,
            actions: obs.actions,
            prompt,
        })
    }
}
