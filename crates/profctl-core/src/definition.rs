//! Profile definition documents and the artifacts they declare

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

pub const PROFILE_KIND: &str = "profile";
pub const HELM_CHART_KIND: &str = "helm-chart";
pub const KUSTOMIZE_KIND: &str = "kustomize";

/// A profile definition document as fetched from a repository ref.
/// Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDefinition {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Declared artifacts, in document order
    #[serde(default)]
    pub artifacts: Vec<DeclaredArtifact>,
}

impl ProfileDefinition {
    pub fn from_yaml(data: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(data)?)
    }
}

/// One declared artifact entry. The wire form keeps `kind` as a plain
/// string; [`DeclaredArtifact::classify`] turns it into the closed
/// [`ArtifactSpec`] sum the resolver dispatches on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclaredArtifact {
    pub name: String,
    pub kind: String,

    /// Path within the profile repository (helm-chart, kustomize)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Remote chart reference (helm-chart)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartReference>,

    /// Nested profile reference (profile)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileReference>,
}

/// A chart served from a Helm repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartReference {
    pub url: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// A profile nested inside another profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileReference {
    pub url: String,

    #[serde(default)]
    pub branch: String,

    /// Version tag; overrides the branch and derives the in-repo path
    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub path: String,
}

/// Kind-specific payload of a declared artifact. Closed set: anything
/// outside it is the resolver's unrecognized-kind failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ArtifactSpec<'a> {
    Profile(&'a ProfileReference),
    HelmChart {
        path: Option<&'a str>,
        chart: Option<&'a ChartReference>,
    },
    Kustomize {
        path: &'a str,
    },
}

impl DeclaredArtifact {
    /// Classify the string kind into the closed artifact sum.
    /// Returns `None` for kinds outside the known set.
    pub fn classify(&self) -> Option<ArtifactSpec<'_>> {
        match self.kind.as_str() {
            PROFILE_KIND => self.profile.as_ref().map(ArtifactSpec::Profile),
            HELM_CHART_KIND => Some(ArtifactSpec::HelmChart {
                path: self.path.as_deref(),
                chart: self.chart.as_ref(),
            }),
            KUSTOMIZE_KIND => Some(ArtifactSpec::Kustomize {
                path: self.path.as_deref().unwrap_or_default(),
            }),
            _ => None,
        }
    }

    /// Structural validation of the fields relevant to this artifact's
    /// kind. Unknown kinds pass - rejecting them is dispatch's job, so
    /// the error there can name the kind instead of a field.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return self.invalid("artifact name must not be empty");
        }
        match self.kind.as_str() {
            PROFILE_KIND => {
                let Some(profile) = self.profile.as_ref() else {
                    return self.invalid("profile artifacts must declare a profile reference");
                };
                if profile.url.is_empty() {
                    return self.invalid("nested profile URL must not be empty");
                }
                if profile.branch.is_empty() && profile.version.is_empty() {
                    return self.invalid("nested profile needs a branch or a version tag");
                }
                if self.path.is_some() || self.chart.is_some() {
                    return self.invalid("only the profile reference may be set on a profile artifact");
                }
            }
            HELM_CHART_KIND => {
                if self.profile.is_some() {
                    return self.invalid("a profile reference may not be set on a helm chart artifact");
                }
                if self.path.is_none() && self.chart.is_none() {
                    return self.invalid("helm chart artifacts need a local path or a remote chart");
                }
                if let Some(chart) = &self.chart {
                    if chart.url.is_empty() || chart.name.is_empty() {
                        return self.invalid("remote charts need both a repository URL and a chart name");
                    }
                }
            }
            KUSTOMIZE_KIND => {
                if self.profile.is_some() || self.chart.is_some() {
                    return self.invalid("only a path may be set on a kustomize artifact");
                }
                if self.path.as_deref().unwrap_or_default().is_empty() {
                    return self.invalid("kustomize artifacts must declare a path");
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn invalid(&self, reason: &str) -> Result<()> {
        Err(CoreError::InvalidArtifact {
            name: self.name.clone(),
            reason: reason.to_string(),
        })
    }
}
