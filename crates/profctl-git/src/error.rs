//! Error types for git operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("profile definition not found at {path}: {source}")]
    DefinitionNotFound {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Definition(#[from] profctl_core::CoreError),

    #[error("failed to walk checkout: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed to copy {path}: {message}")]
    Copy { path: String, message: String },
}

pub type Result<T> = std::result::Result<T, GitError>;
