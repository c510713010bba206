//! Flux Kustomization - one overlay reconciled by the kustomize controller

use serde::{Deserialize, Serialize};

use crate::meta::ObjectMeta;
use crate::source::SourceRef;

pub const KUSTOMIZATION_API_VERSION: &str = "kustomize.toolkit.fluxcd.io/v1beta1";
pub const KUSTOMIZATION_KIND: &str = "Kustomization";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kustomization {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: KustomizationSpec,
}

impl Kustomization {
    pub fn new(metadata: ObjectMeta, spec: KustomizationSpec) -> Self {
        Self {
            api_version: KUSTOMIZATION_API_VERSION.to_string(),
            kind: KUSTOMIZATION_KIND.to_string(),
            metadata,
            spec,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KustomizationSpec {
    pub path: String,
    pub source_ref: SourceRef,
    pub prune: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_namespace: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kustomization_serializes_camel_case() {
        let kustomization = Kustomization::new(
            ObjectMeta::new("mysub-nginx-1-foo", "default"),
            KustomizationSpec {
                path: "root/artifacts/foo/overlay".to_string(),
                source_ref: SourceRef::git_repository("flux-system", "flux-system"),
                prune: true,
                target_namespace: Some("default".to_string()),
            },
        );

        let yaml = serde_yaml::to_string(&kustomization).unwrap();
        let expected = "\
apiVersion: kustomize.toolkit.fluxcd.io/v1beta1
kind: Kustomization
metadata:
  name: mysub-nginx-1-foo
  namespace: default
spec:
  path: root/artifacts/foo/overlay
  sourceRef:
    kind: GitRepository
    name: flux-system
    namespace: flux-system
  prune: true
  targetNamespace: default
";
        assert_eq!(yaml, expected);
    }
}
