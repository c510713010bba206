//! Flux source kinds - GitRepository and HelmRepository

use serde::{Deserialize, Serialize};

use crate::meta::ObjectMeta;

pub const SOURCE_API_VERSION: &str = "source.toolkit.fluxcd.io/v1beta1";
pub const GIT_REPOSITORY_KIND: &str = "GitRepository";
pub const HELM_REPOSITORY_KIND: &str = "HelmRepository";

/// Reference from a consuming object to its source object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRef {
    pub kind: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl SourceRef {
    pub fn git_repository(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            kind: GIT_REPOSITORY_KIND.to_string(),
            name: name.into(),
            namespace: Some(namespace.into()),
        }
    }

    pub fn helm_repository(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            kind: HELM_REPOSITORY_KIND.to_string(),
            name: name.into(),
            namespace: Some(namespace.into()),
        }
    }
}

/// A git repository a controller fetches file content from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitRepository {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: GitRepositorySpec,
}

impl GitRepository {
    pub fn new(metadata: ObjectMeta, spec: GitRepositorySpec) -> Self {
        Self {
            api_version: SOURCE_API_VERSION.to_string(),
            kind: GIT_REPOSITORY_KIND.to_string(),
            metadata,
            spec,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitRepositorySpec {
    pub url: String,

    #[serde(rename = "ref")]
    pub reference: GitRef,
}

/// Branch or tag checked out by the source controller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl GitRef {
    pub fn branch(name: impl Into<String>) -> Self {
        Self {
            branch: Some(name.into()),
            tag: None,
        }
    }

    pub fn tag(name: impl Into<String>) -> Self {
        Self {
            branch: None,
            tag: Some(name.into()),
        }
    }
}

/// A Helm chart repository serving remote charts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelmRepository {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: HelmRepositorySpec,
}

impl HelmRepository {
    pub fn new(metadata: ObjectMeta, url: impl Into<String>) -> Self {
        Self {
            api_version: SOURCE_API_VERSION.to_string(),
            kind: HELM_REPOSITORY_KIND.to_string(),
            metadata,
            spec: HelmRepositorySpec { url: url.into() },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelmRepositorySpec {
    pub url: String,
}
