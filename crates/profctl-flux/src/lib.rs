//! profctl Flux - typed configuration objects for a downstream GitOps controller
//!
//! These are plain serde structs matching the Flux CRD wire format.
//! profctl never talks to a cluster; it only writes these objects to
//! disk (or into a pull request) for a controller to reconcile.

pub mod helm_release;
pub mod kustomization;
pub mod meta;
pub mod source;

pub use helm_release::{HelmChartTemplate, HelmChartTemplateSpec, HelmRelease, HelmReleaseSpec};
pub use kustomization::{Kustomization, KustomizationSpec};
pub use meta::ObjectMeta;
pub use source::{
    GitRef, GitRepository, GitRepositorySpec, HelmRepository, HelmRepositorySpec, SourceRef,
    GIT_REPOSITORY_KIND, HELM_REPOSITORY_KIND, SOURCE_API_VERSION,
};

use serde::Serialize;

/// One emittable configuration object of any supported kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FluxObject {
    HelmRelease(HelmRelease),
    HelmRepository(HelmRepository),
    Kustomization(Kustomization),
    GitRepository(GitRepository),
}

impl FluxObject {
    pub fn metadata(&self) -> &ObjectMeta {
        match self {
            Self::HelmRelease(o) => &o.metadata,
            Self::HelmRepository(o) => &o.metadata,
            Self::Kustomization(o) => &o.metadata,
            Self::GitRepository(o) => &o.metadata,
        }
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
