//! profctl Core - data model for GitOps profile installation
//!
//! This crate provides the foundational types used throughout profctl:
//! - `Subscription`: a request to install one profile from a repository ref
//! - `ProfileDefinition`: the profile document fetched from that ref
//! - `DeclaredArtifact`: one entry in a definition, classified into the
//!   closed set of artifact kinds (`profile`, `helm-chart`, `kustomize`)

pub mod definition;
pub mod error;
pub mod subscription;

pub use definition::{
    ArtifactSpec, ChartReference, DeclaredArtifact, ProfileDefinition, ProfileReference,
    HELM_CHART_KIND, KUSTOMIZE_KIND, PROFILE_KIND,
};
pub use error::{CoreError, Result};
pub use subscription::Subscription;
