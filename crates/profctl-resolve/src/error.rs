//! Resolution error taxonomy
//!
//! Every failure aborts the whole resolution; there is no partial
//! result. Errors carry enough context (artifact name, nested profile
//! name) to reconstruct the failing path.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    /// Definition retrieval or parse failure at any depth. Retries are
    /// the fetcher's concern, never the resolver's.
    #[error("failed to get profile definition {url} on ref {git_ref}: {source}")]
    Fetch {
        url: String,
        git_ref: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("validation failed for artifact {name}: {source}")]
    InvalidArtifact {
        name: String,
        #[source]
        source: profctl_core::CoreError,
    },

    #[error(
        "recursive artifact detected: profile {url} on branch {branch} contains an artifact that points recursively back at itself"
    )]
    CyclicReference { url: String, branch: String },

    /// A path-based artifact cannot be expressed without the flux
    /// git repository source to reference.
    #[error("artifact {name} requires a git repository source but none is configured")]
    MissingSource { name: String },

    #[error("artifact kind {kind:?} not recognized")]
    UnrecognizedKind { kind: String },

    #[error("failed to generate resources for nested profile {name:?}: {source}")]
    NestedProfile {
        name: String,
        #[source]
        source: Box<ResolveError>,
    },
}

pub type Result<T> = std::result::Result<T, ResolveError>;
