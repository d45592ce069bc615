//! Errors at the policy boundary.
use thiserror::Error;

/// Errors raised while shaping policy inputs.
#[derive(Error, Debug)]
pub enum PolicyError {
    /// The requested model variant is not in the supported set.
    #[error("unsupported model type: {0}")]
    UnsupportedModelType(String),

    /// A byte prompt was not valid UTF-8.
    #[error("prompt is not valid UTF-8")]
    InvalidPrompt(#[from] std::string::FromUtf8Error),
}
