//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("invalid artifact {name:?}: {reason}")]
    InvalidArtifact { name: String, reason: String },

    #[error("invalid subscription: {reason}")]
    InvalidSubscription { reason: String },

    #[error("failed to parse profile definition: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
