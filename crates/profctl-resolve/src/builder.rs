//! Kind-specific configuration objects for leaf artifacts
//!
//! Pure data transformation: no network or disk I/O happens here.

use profctl_core::{ChartReference, CoreError, ProfileDefinition, Subscription};
use profctl_flux::{
    FluxObject, HelmChartTemplateSpec, HelmRelease, HelmRepository, Kustomization,
    KustomizationSpec, ObjectMeta, SourceRef,
};

use crate::context::{GitSourceRef, ResolutionContext};
use crate::error::{ResolveError, Result};
use crate::naming;
use crate::resolver::{Artifact, SourceCopy};

/// Builds the configuration objects for one profile's leaf artifacts.
pub struct ObjectBuilder<'a> {
    subscription: &'a Subscription,
    definition: &'a ProfileDefinition,
    ctx: &'a ResolutionContext,
}

impl<'a> ObjectBuilder<'a> {
    pub fn new(
        subscription: &'a Subscription,
        definition: &'a ProfileDefinition,
        ctx: &'a ResolutionContext,
    ) -> Self {
        Self {
            subscription,
            definition,
            ctx,
        }
    }

    pub fn helm_chart_artifact(
        &self,
        name: &str,
        path: Option<&str>,
        chart: Option<&ChartReference>,
    ) -> Result<Artifact> {
        let mut objects = Vec::new();
        let mut source = None;

        let chart_spec = if let Some(path) = path {
            let git_source = self.git_source(name)?;
            source = Some(self.source_copy(path));
            HelmChartTemplateSpec {
                chart: naming::artifact_path(&self.ctx.root_dir, name, path),
                version: None,
                source_ref: SourceRef::git_repository(
                    git_source.name.clone(),
                    git_source.namespace.clone(),
                ),
            }
        } else if let Some(chart) = chart {
            HelmChartTemplateSpec {
                chart: chart.name.clone(),
                version: chart.version.clone(),
                source_ref: SourceRef::helm_repository(
                    self.object_name(name),
                    self.subscription.namespace.clone(),
                ),
            }
        } else {
            // Reachable only with a validator laxer than the default.
            return Err(ResolveError::InvalidArtifact {
                name: name.to_string(),
                source: CoreError::InvalidArtifact {
                    name: name.to_string(),
                    reason: "helm chart artifacts need a local path or a remote chart".to_string(),
                },
            });
        };

        objects.push(FluxObject::HelmRelease(HelmRelease::new(
            self.object_meta(name),
            chart_spec,
        )));

        if let Some(chart) = chart {
            objects.push(FluxObject::HelmRepository(HelmRepository::new(
                self.object_meta(name),
                chart.url.clone(),
            )));
        }

        Ok(Artifact {
            name: name.to_string(),
            objects,
            source,
        })
    }

    pub fn kustomize_artifact(&self, name: &str, path: &str) -> Result<Artifact> {
        let git_source = self.git_source(name)?;
        let kustomization = Kustomization::new(
            self.object_meta(name),
            KustomizationSpec {
                path: naming::artifact_path(&self.ctx.root_dir, name, path),
                source_ref: SourceRef::git_repository(
                    git_source.name.clone(),
                    git_source.namespace.clone(),
                ),
                prune: true,
                target_namespace: Some(self.subscription.namespace.clone()),
            },
        );

        Ok(Artifact {
            name: name.to_string(),
            objects: vec![FluxObject::Kustomization(kustomization)],
            source: Some(self.source_copy(path)),
        })
    }

    fn object_meta(&self, artifact_name: &str) -> ObjectMeta {
        ObjectMeta::new(
            self.object_name(artifact_name),
            self.subscription.namespace.clone(),
        )
    }

    /// join(subscription, definition, base name); nested logical names
    /// contribute only their final segment.
    fn object_name(&self, artifact_name: &str) -> String {
        naming::join(&[
            &self.subscription.name,
            &self.definition.name,
            naming::base_name(artifact_name),
        ])
    }

    fn git_source(&self, artifact_name: &str) -> Result<&GitSourceRef> {
        self.ctx
            .git_source
            .as_ref()
            .ok_or_else(|| ResolveError::MissingSource {
                name: artifact_name.to_string(),
            })
    }

    fn source_copy(&self, path: &str) -> SourceCopy {
        SourceCopy {
            repo_url: self.subscription.profile_url.clone(),
            branch: self.subscription.git_ref().to_string(),
            sparse_folder: self.definition.name.clone(),
            paths_to_copy: vec![path.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subscription() -> Subscription {
        Subscription {
            name: "mysub".to_string(),
            namespace: "default".to_string(),
            profile_url: "https://github.com/org/nginx-profile".to_string(),
            branch: "main".to_string(),
            tag: String::new(),
            path: ".".to_string(),
        }
    }

    fn definition() -> ProfileDefinition {
        ProfileDefinition {
            name: "nginx-1".to_string(),
            description: None,
            artifacts: Vec::new(),
        }
    }

    fn context() -> ResolutionContext {
        ResolutionContext::new("root", Some(GitSourceRef::new("flux-system", "git-repo")))
    }

    #[test]
    fn local_helm_chart_rewrites_the_chart_path() {
        let sub = subscription();
        let def = definition();
        let ctx = context();
        let builder = ObjectBuilder::new(&sub, &def, &ctx);

        let artifact = builder
            .helm_chart_artifact("chart", Some("nginx/chart"), None)
            .unwrap();

        assert_eq!(artifact.objects.len(), 1);
        let FluxObject::HelmRelease(release) = &artifact.objects[0] else {
            panic!("expected a HelmRelease");
        };
        assert_eq!(release.metadata.name, "mysub-nginx-1-chart");
        assert_eq!(
            release.spec.chart.spec.chart,
            "root/artifacts/chart/nginx/chart"
        );
        assert_eq!(release.spec.chart.spec.source_ref.kind, "GitRepository");
        assert_eq!(release.spec.chart.spec.source_ref.name, "git-repo");

        let source = artifact.source.unwrap();
        assert_eq!(source.repo_url, "https://github.com/org/nginx-profile");
        assert_eq!(source.branch, "main");
        assert_eq!(source.sparse_folder, "nginx-1");
        assert_eq!(source.paths_to_copy, vec!["nginx/chart".to_string()]);
    }

    #[test]
    fn remote_helm_chart_adds_a_helm_repository() {
        let sub = subscription();
        let def = definition();
        let ctx = context();
        let builder = ObjectBuilder::new(&sub, &def, &ctx);

        let chart = ChartReference {
            url: "https://charts.bitnami.com/bitnami".to_string(),
            name: "nginx".to_string(),
            version: Some("8.9.1".to_string()),
        };
        let artifact = builder
            .helm_chart_artifact("bar", None, Some(&chart))
            .unwrap();

        assert_eq!(artifact.objects.len(), 2);
        assert!(artifact.source.is_none());

        let FluxObject::HelmRelease(release) = &artifact.objects[0] else {
            panic!("expected a HelmRelease");
        };
        assert_eq!(release.spec.chart.spec.chart, "nginx");
        assert_eq!(release.spec.chart.spec.version.as_deref(), Some("8.9.1"));
        assert_eq!(release.spec.chart.spec.source_ref.kind, "HelmRepository");

        let FluxObject::HelmRepository(repository) = &artifact.objects[1] else {
            panic!("expected a HelmRepository");
        };
        assert_eq!(repository.metadata.name, "mysub-nginx-1-bar");
        assert_eq!(repository.spec.url, "https://charts.bitnami.com/bitnami");
    }

    #[test]
    fn local_chart_with_remote_reference_attaches_both_objects() {
        let sub = subscription();
        let def = definition();
        let ctx = context();
        let builder = ObjectBuilder::new(&sub, &def, &ctx);

        let chart = ChartReference {
            url: "https://charts.example.com".to_string(),
            name: "nginx".to_string(),
            version: None,
        };
        let artifact = builder
            .helm_chart_artifact("bar", Some("chart"), Some(&chart))
            .unwrap();

        // Local path wins for the release; the repository rides along.
        assert_eq!(artifact.objects.len(), 2);
        assert!(artifact.source.is_some());
        let FluxObject::HelmRelease(release) = &artifact.objects[0] else {
            panic!("expected a HelmRelease");
        };
        assert_eq!(release.spec.chart.spec.chart, "root/artifacts/bar/chart");
    }

    #[test]
    fn kustomize_source_copy_uses_the_tag_when_set() {
        let mut sub = subscription();
        sub.tag = "nginx-1/v0.0.1".to_string();
        let def = definition();
        let ctx = context();
        let builder = ObjectBuilder::new(&sub, &def, &ctx);

        let artifact = builder.kustomize_artifact("foo", "overlay").unwrap();
        assert_eq!(artifact.source.unwrap().branch, "nginx-1/v0.0.1");
    }

    #[test]
    fn path_based_artifacts_fail_without_a_git_source() {
        let sub = subscription();
        let def = definition();
        let ctx = ResolutionContext::new("root", None);
        let builder = ObjectBuilder::new(&sub, &def, &ctx);

        let err = builder.kustomize_artifact("foo", "overlay").unwrap_err();
        assert!(matches!(err, ResolveError::MissingSource { name } if name == "foo"));

        let err = builder
            .helm_chart_artifact("bar", Some("chart"), None)
            .unwrap_err();
        assert!(matches!(err, ResolveError::MissingSource { name } if name == "bar"));
    }

    #[test]
    fn remote_only_chart_needs_no_git_source() {
        let sub = subscription();
        let def = definition();
        let ctx = ResolutionContext::new("root", None);
        let builder = ObjectBuilder::new(&sub, &def, &ctx);

        let chart = ChartReference {
            url: "https://charts.example.com".to_string(),
            name: "nginx".to_string(),
            version: None,
        };
        assert!(builder.helm_chart_artifact("bar", None, Some(&chart)).is_ok());
    }

    #[test]
    fn nested_names_keep_only_the_base_segment() {
        let sub = subscription();
        let def = definition();
        let ctx = context();
        let builder = ObjectBuilder::new(&sub, &def, &ctx);

        let artifact = builder.kustomize_artifact("p/a", "overlay").unwrap();
        assert_eq!(artifact.name, "p/a");
        assert_eq!(artifact.objects[0].metadata().name, "mysub-nginx-1-a");
        let FluxObject::Kustomization(kustomization) = &artifact.objects[0] else {
            panic!("expected a Kustomization");
        };
        assert_eq!(kustomization.spec.path, "root/artifacts/p/a/overlay");
    }
}
