//! Observation and action shaping at the Piper policy boundary.
//!
//! This crate maps one step's raw observation into the fixed tensor schema a
//! Piper policy consumes, and maps the policy's raw action output back into
//! the canonical action vector. Both directions are pure transforms over
//! immutable values; the declared [`ModelType`] is the only configuration,
//! so converters can be shared freely across callers.
//!
//! # Example
//!
//! ```
//! use ndarray::{Array1, ArrayD, IxDyn};
//! use piper_policy::{ImageTensor, ModelType, PiperInputConverter, PiperObservation};
//!
//! let converter = PiperInputConverter { model_type: ModelType::Pi0 };
//! let input = converter
//!     .convert(PiperObservation {
//!         image: ImageTensor::U8(ArrayD::zeros(IxDyn(&[224, 224, 3]))),
//!         wrist_image: ImageTensor::U8(ArrayD::zeros(IxDyn(&[224, 224, 3]))),
//!         state: Array1::zeros(8),
//!         actions: None,
//!         prompt: None,
//!     })
//!     .unwrap();
//! assert_eq!(input.image_mask["base_0_rgb"], true);
//! ```

mod error;
mod image;
mod input;
mod model;
mod output;

pub use error::PolicyError;
pub use image::{canonicalize, ImageTensor};
pub use input::{PiperInputConverter, PiperObservation, PolicyInput, Prompt};
pub use model::ModelType;
pub use output::{PiperOutputConverter, ACTION_DIM};
