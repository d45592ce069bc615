//! Supported policy architectures.
use crate::PolicyError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The closed set of policy architectures served at this boundary.
///
/// Each variant defines its own image slot layout; adding a variant means
/// adding a case to the exhaustive matches over this type. Unknown names are
/// rejected at the parsing boundary, never mapped to a default.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum ModelType {
    /// PI0 flow-matching policy.
    Pi0,

    /// PI05 revision of PI0, same slot layout.
    Pi05,

    /// Autoregressive PI0-FAST policy.
    Pi0Fast,
}

impl FromStr for ModelType {
    type Err = PolicyError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "pi0" => Ok(Self::Pi0),
            "pi05" => Ok(Self::Pi05),
            "pi0_fast" => Ok(Self::Pi0Fast),
            other => Err(PolicyError::UnsupportedModelType(other.into())),
        }
    }
}
