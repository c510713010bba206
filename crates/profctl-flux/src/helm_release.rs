//! Flux HelmRelease - one chart deployed by the helm controller

use serde::{Deserialize, Serialize};

use crate::meta::ObjectMeta;
use crate::source::SourceRef;

pub const HELM_RELEASE_API_VERSION: &str = "helm.toolkit.fluxcd.io/v2beta1";
pub const HELM_RELEASE_KIND: &str = "HelmRelease";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelmRelease {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: HelmReleaseSpec,
}

impl HelmRelease {
    pub fn new(metadata: ObjectMeta, chart: HelmChartTemplateSpec) -> Self {
        Self {
            api_version: HELM_RELEASE_API_VERSION.to_string(),
            kind: HELM_RELEASE_KIND.to_string(),
            metadata,
            spec: HelmReleaseSpec {
                chart: HelmChartTemplate { spec: chart },
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelmReleaseSpec {
    pub chart: HelmChartTemplate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelmChartTemplate {
    pub spec: HelmChartTemplateSpec,
}

/// Where the chart comes from: a path inside the git source, or a
/// named chart in a Helm repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelmChartTemplateSpec {
    pub chart: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    pub source_ref: SourceRef,
}
