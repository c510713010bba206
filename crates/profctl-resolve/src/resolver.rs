//! Recursive expansion of profile subscriptions into deployable artifacts

use tracing::debug;

use profctl_core::{ArtifactSpec, ProfileReference, Subscription};
use profctl_flux::FluxObject;

use crate::builder::ObjectBuilder;
use crate::context::ResolutionContext;
use crate::error::{ResolveError, Result};
use crate::fetch::{ArtifactValidator, DefinitionFetcher, StructuralValidator};
use crate::naming;

/// One resolved, emittable unit: a logical name, the configuration
/// objects representing it, and (for local resources) where to copy
/// its files from.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub name: String,
    pub objects: Vec<FluxObject>,
    pub source: Option<SourceCopy>,
}

/// Source-copy metadata for artifacts whose files must be materialized
/// locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCopy {
    pub repo_url: String,
    /// Branch or tag the files live at
    pub branch: String,
    /// Folder the sparse checkout is rooted at (the definition name)
    pub sparse_folder: String,
    /// In-repo paths to copy, relative to the sparse folder
    pub paths_to_copy: Vec<String>,
}

/// Resolves a profile subscription into a flat artifact list.
///
/// Single-threaded, synchronous, depth-first; any error at any depth
/// aborts the whole pass and discards partially built results.
pub struct Resolver<'a> {
    fetcher: &'a dyn DefinitionFetcher,
    validator: &'a dyn ArtifactValidator,
}

impl<'a> Resolver<'a> {
    pub fn new(fetcher: &'a dyn DefinitionFetcher) -> Self {
        Self {
            fetcher,
            validator: &StructuralValidator,
        }
    }

    pub fn with_validator(
        fetcher: &'a dyn DefinitionFetcher,
        validator: &'a dyn ArtifactValidator,
    ) -> Self {
        Self { fetcher, validator }
    }

    /// Resolve the root subscription. Output order follows document
    /// order across siblings, with nested profiles expanded in place.
    pub fn resolve(&self, sub: &Subscription, ctx: &ResolutionContext) -> Result<Vec<Artifact>> {
        self.resolve_profile(sub, ctx, "", &[])
    }

    fn resolve_profile(
        &self,
        sub: &Subscription,
        ctx: &ResolutionContext,
        nested_name: &str,
        visited: &[String],
    ) -> Result<Vec<Artifact>> {
        let git_ref = sub.git_ref();
        debug!(url = %sub.profile_url, git_ref, path = %sub.path, "fetching profile definition");
        let definition = self
            .fetcher
            .get_definition(&sub.profile_url, git_ref, &sub.path)
            .map_err(|source| ResolveError::Fetch {
                url: sub.profile_url.clone(),
                git_ref: git_ref.to_string(),
                source,
            })?;

        let repo_key = sub.repo_key();
        if naming::contains_key(visited, &repo_key) {
            return Err(ResolveError::CyclicReference {
                url: sub.profile_url.clone(),
                branch: git_ref.to_string(),
            });
        }
        // Path-scoped guard: each branch of the recursion owns its copy,
        // so sibling profiles may legitimately reuse a repo key.
        let mut visited = visited.to_vec();
        visited.push(repo_key);

        let builder = ObjectBuilder::new(sub, &definition, ctx);
        let mut artifacts = Vec::new();

        for declared in &definition.artifacts {
            self.validator
                .validate(declared)
                .map_err(|source| ResolveError::InvalidArtifact {
                    name: declared.name.clone(),
                    source,
                })?;

            let name = naming::qualify(nested_name, &declared.name);

            let Some(spec) = declared.classify() else {
                return Err(ResolveError::UnrecognizedKind {
                    kind: declared.kind.clone(),
                });
            };

            match spec {
                ArtifactSpec::Profile(reference) => {
                    let nested = nested_subscription(sub, reference);
                    let expanded = self
                        .resolve_profile(&nested, ctx, &name, &visited)
                        .map_err(|err| match err {
                            // A cycle already names the offending repo.
                            cycle @ ResolveError::CyclicReference { .. } => cycle,
                            other => ResolveError::NestedProfile {
                                name: name.clone(),
                                source: Box::new(other),
                            },
                        })?;
                    artifacts.extend(expanded);
                }
                ArtifactSpec::HelmChart { path, chart } => {
                    artifacts.push(builder.helm_chart_artifact(&name, path, chart)?);
                }
                ArtifactSpec::Kustomize { path } => {
                    artifacts.push(builder.kustomize_artifact(&name, path)?);
                }
            }
        }

        Ok(artifacts)
    }
}

/// The subscription a nested profile artifact expands into. A pinned
/// version tag overrides the branch, and its leading segment (or `.`
/// when the tag has no `/`) becomes the in-repo path.
fn nested_subscription(parent: &Subscription, reference: &ProfileReference) -> Subscription {
    let mut sub = parent.clone();
    sub.profile_url = reference.url.clone();
    sub.branch = reference.branch.clone();
    sub.tag = reference.version.clone();
    sub.path = reference.path.clone();
    if !reference.version.is_empty() {
        sub.path = match reference.version.split_once('/') {
            Some((folder, _)) => folder.to_string(),
            None => ".".to_string(),
        };
    }
    sub
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    use profctl_core::{
        ChartReference, DeclaredArtifact, ProfileDefinition, HELM_CHART_KIND, KUSTOMIZE_KIND,
        PROFILE_KIND,
    };

    use crate::context::GitSourceRef;
    use crate::fetch::FetchResult;

    struct MapFetcher {
        definitions: HashMap<(String, String, String), ProfileDefinition>,
    }

    impl MapFetcher {
        fn new() -> Self {
            Self {
                definitions: HashMap::new(),
            }
        }

        fn with(mut self, url: &str, git_ref: &str, path: &str, def: ProfileDefinition) -> Self {
            self.definitions.insert(
                (url.to_string(), git_ref.to_string(), path.to_string()),
                def,
            );
            self
        }
    }

    impl DefinitionFetcher for MapFetcher {
        fn get_definition(&self, url: &str, git_ref: &str, path: &str) -> FetchResult {
            self.definitions
                .get(&(url.to_string(), git_ref.to_string(), path.to_string()))
                .cloned()
                .ok_or_else(|| format!("no definition at {url}@{git_ref}:{path}").into())
        }
    }

    fn definition(name: &str, artifacts: Vec<DeclaredArtifact>) -> ProfileDefinition {
        ProfileDefinition {
            name: name.to_string(),
            description: None,
            artifacts,
        }
    }

    fn kustomize(name: &str, path: &str) -> DeclaredArtifact {
        DeclaredArtifact {
            name: name.to_string(),
            kind: KUSTOMIZE_KIND.to_string(),
            path: Some(path.to_string()),
            chart: None,
            profile: None,
        }
    }

    fn remote_chart(name: &str) -> DeclaredArtifact {
        DeclaredArtifact {
            name: name.to_string(),
            kind: HELM_CHART_KIND.to_string(),
            path: None,
            chart: Some(ChartReference {
                url: "https://charts.example.com".to_string(),
                name: "nginx".to_string(),
                version: None,
            }),
            profile: None,
        }
    }

    fn nested_profile(name: &str, url: &str, branch: &str, path: &str) -> DeclaredArtifact {
        DeclaredArtifact {
            name: name.to_string(),
            kind: PROFILE_KIND.to_string(),
            path: None,
            chart: None,
            profile: Some(ProfileReference {
                url: url.to_string(),
                branch: branch.to_string(),
                version: String::new(),
                path: path.to_string(),
            }),
        }
    }

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

    fn context() -> ResolutionContext {
        ResolutionContext::new("root", Some(GitSourceRef::new("flux-system", "git-repo")))
    }

    #[test]
    fn resolves_a_single_kustomize_artifact() {
        let fetcher = MapFetcher::new().with(
            "https://github.com/org/nginx-profile",
            "main",
            ".",
            definition("nginx-1", vec![kustomize("foo", "overlay")]),
        );
        let resolver = Resolver::new(&fetcher);

        let artifacts = resolver.resolve(&subscription(), &context()).unwrap();

        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].name, "foo");
        let FluxObject::Kustomization(kustomization) = &artifacts[0].objects[0] else {
            panic!("expected a Kustomization");
        };
        assert_eq!(kustomization.metadata.name, "mysub-nginx-1-foo");
        assert_eq!(kustomization.metadata.namespace, "default");
        assert_eq!(kustomization.spec.path, "root/artifacts/foo/overlay");
    }

    #[test]
    fn resolution_is_deterministic() {
        let fetcher = MapFetcher::new().with(
            "https://github.com/org/nginx-profile",
            "main",
            ".",
            definition(
                "nginx-1",
                vec![kustomize("foo", "overlay"), remote_chart("bar")],
            ),
        );
        let resolver = Resolver::new(&fetcher);

        let first = resolver.resolve(&subscription(), &context()).unwrap();
        let second = resolver.resolve(&subscription(), &context()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn nested_profiles_expand_in_place() {
        let fetcher = MapFetcher::new()
            .with(
                "https://github.com/org/nginx-profile",
                "main",
                ".",
                definition(
                    "nginx-1",
                    vec![
                        kustomize("a", "overlay-a"),
                        nested_profile("p", "https://github.com/org/other-profile", "main", "."),
                        kustomize("b", "overlay-b"),
                    ],
                ),
            )
            .with(
                "https://github.com/org/other-profile",
                "main",
                ".",
                definition(
                    "other",
                    vec![kustomize("x", "overlay-x"), kustomize("y", "overlay-y")],
                ),
            );
        let resolver = Resolver::new(&fetcher);

        let artifacts = resolver.resolve(&subscription(), &context()).unwrap();

        let names: Vec<&str> = artifacts.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["a", "p/x", "p/y", "b"]);

        // Nested object names derive from the base segment; the nested
        // definition contributes its own middle component.
        assert_eq!(artifacts[1].objects[0].metadata().name, "mysub-other-x");
        // The prefix does not leak to the sibling after the nested entry.
        assert_eq!(artifacts[3].objects[0].metadata().name, "mysub-nginx-1-b");
    }

    #[test]
    fn deeply_nested_prefixes_compose() {
        let fetcher = MapFetcher::new()
            .with(
                "https://github.com/org/nginx-profile",
                "main",
                ".",
                definition(
                    "nginx-1",
                    vec![nested_profile(
                        "outer",
                        "https://github.com/org/mid-profile",
                        "main",
                        ".",
                    )],
                ),
            )
            .with(
                "https://github.com/org/mid-profile",
                "main",
                ".",
                definition(
                    "mid",
                    vec![nested_profile(
                        "inner",
                        "https://github.com/org/leaf-profile",
                        "main",
                        ".",
                    )],
                ),
            )
            .with(
                "https://github.com/org/leaf-profile",
                "main",
                ".",
                definition("leaf", vec![kustomize("k", "overlay")]),
            );
        let resolver = Resolver::new(&fetcher);

        let artifacts = resolver.resolve(&subscription(), &context()).unwrap();

        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].name, "outer/inner/k");
        assert_eq!(artifacts[0].objects[0].metadata().name, "mysub-leaf-k");
    }

    #[test]
    fn rejects_a_profile_that_points_back_at_itself() {
        let fetcher = MapFetcher::new().with(
            "https://github.com/org/nginx-profile",
            "main",
            ".",
            definition(
                "nginx-1",
                vec![nested_profile(
                    "loop",
                    "https://github.com/org/nginx-profile",
                    "main",
                    ".",
                )],
            ),
        );
        let resolver = Resolver::new(&fetcher);

        let err = resolver.resolve(&subscription(), &context()).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::CyclicReference { url, branch }
                if url == "https://github.com/org/nginx-profile" && branch == "main"
        ));
    }

    #[test]
    fn rejects_a_transitive_cycle() {
        let fetcher = MapFetcher::new()
            .with(
                "https://github.com/org/nginx-profile",
                "main",
                ".",
                definition(
                    "nginx-1",
                    vec![nested_profile(
                        "p",
                        "https://github.com/org/other-profile",
                        "main",
                        ".",
                    )],
                ),
            )
            .with(
                "https://github.com/org/other-profile",
                "main",
                ".",
                definition(
                    "other",
                    vec![nested_profile(
                        "back",
                        "https://github.com/org/nginx-profile",
                        "main",
                        ".",
                    )],
                ),
            );
        let resolver = Resolver::new(&fetcher);

        let err = resolver.resolve(&subscription(), &context()).unwrap_err();
        assert!(matches!(err, ResolveError::CyclicReference { .. }));
    }

    #[test]
    fn sibling_branches_may_reuse_a_repo_key() {
        let fetcher = MapFetcher::new()
            .with(
                "https://github.com/org/nginx-profile",
                "main",
                ".",
                definition(
                    "nginx-1",
                    vec![
                        nested_profile("p1", "https://github.com/org/other-profile", "main", "."),
                        nested_profile("p2", "https://github.com/org/other-profile", "main", "."),
                    ],
                ),
            )
            .with(
                "https://github.com/org/other-profile",
                "main",
                ".",
                definition("other", vec![kustomize("x", "overlay")]),
            );
        let resolver = Resolver::new(&fetcher);

        let artifacts = resolver.resolve(&subscription(), &context()).unwrap();
        let names: Vec<&str> = artifacts.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["p1/x", "p2/x"]);
    }

    #[test]
    fn nested_version_tag_overrides_ref_and_path() {
        let mut tagged = nested_profile("p", "https://github.com/org/other-profile", "", "");
        tagged.profile.as_mut().unwrap().version = "other/v0.0.1".to_string();

        let fetcher = MapFetcher::new()
            .with(
                "https://github.com/org/nginx-profile",
                "main",
                ".",
                definition("nginx-1", vec![tagged]),
            )
            .with(
                "https://github.com/org/other-profile",
                "other/v0.0.1",
                "other",
                definition("other", vec![kustomize("x", "overlay")]),
            );
        let resolver = Resolver::new(&fetcher);

        let artifacts = resolver.resolve(&subscription(), &context()).unwrap();
        assert_eq!(artifacts[0].name, "p/x");
        // Source copy for the nested artifact records the tag.
        assert_eq!(
            artifacts[0].source.as_ref().unwrap().branch,
            "other/v0.0.1"
        );
    }

    #[test]
    fn bare_version_tag_derives_the_root_path() {
        let mut tagged = nested_profile("p", "https://github.com/org/other-profile", "", "");
        tagged.profile.as_mut().unwrap().version = "v0.0.1".to_string();

        let fetcher = MapFetcher::new()
            .with(
                "https://github.com/org/nginx-profile",
                "main",
                ".",
                definition("nginx-1", vec![tagged]),
            )
            .with(
                "https://github.com/org/other-profile",
                "v0.0.1",
                ".",
                definition("other", vec![kustomize("x", "overlay")]),
            );
        let resolver = Resolver::new(&fetcher);

        assert!(resolver.resolve(&subscription(), &context()).is_ok());
    }

    #[test]
    fn unrecognized_kind_names_the_kind() {
        let unknown = DeclaredArtifact {
            name: "baz".to_string(),
            kind: "unknown".to_string(),
            path: None,
            chart: None,
            profile: None,
        };
        let fetcher = MapFetcher::new().with(
            "https://github.com/org/nginx-profile",
            "main",
            ".",
            definition("nginx-1", vec![unknown]),
        );
        let resolver = Resolver::new(&fetcher);

        let err = resolver.resolve(&subscription(), &context()).unwrap_err();
        assert!(matches!(err, ResolveError::UnrecognizedKind { kind } if kind == "unknown"));
    }

    #[test]
    fn fetch_failures_propagate_with_coordinates() {
        let fetcher = MapFetcher::new();
        let resolver = Resolver::new(&fetcher);

        let err = resolver.resolve(&subscription(), &context()).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Fetch { url, git_ref, .. }
                if url == "https://github.com/org/nginx-profile" && git_ref == "main"
        ));
    }

    #[test]
    fn invalid_artifact_aborts_the_whole_resolution() {
        let mut broken = kustomize("bad", "overlay");
        broken.path = None;

        let fetcher = MapFetcher::new().with(
            "https://github.com/org/nginx-profile",
            "main",
            ".",
            definition("nginx-1", vec![kustomize("good", "overlay"), broken]),
        );
        let resolver = Resolver::new(&fetcher);

        let err = resolver.resolve(&subscription(), &context()).unwrap_err();
        assert!(matches!(err, ResolveError::InvalidArtifact { name, .. } if name == "bad"));
    }

    #[test]
    fn nested_failures_name_the_nested_profile() {
        let fetcher = MapFetcher::new().with(
            "https://github.com/org/nginx-profile",
            "main",
            ".",
            definition(
                "nginx-1",
                vec![nested_profile(
                    "p",
                    "https://github.com/org/missing-profile",
                    "main",
                    ".",
                )],
            ),
        );
        let resolver = Resolver::new(&fetcher);

        let err = resolver.resolve(&subscription(), &context()).unwrap_err();
        let ResolveError::NestedProfile { name, source } = err else {
            panic!("expected a NestedProfile wrap, got {err}");
        };
        assert_eq!(name, "p");
        assert!(matches!(*source, ResolveError::Fetch { .. }));
    }

    #[test]
    fn missing_git_source_fails_path_based_artifacts() {
        let fetcher = MapFetcher::new().with(
            "https://github.com/org/nginx-profile",
            "main",
            ".",
            definition("nginx-1", vec![kustomize("foo", "overlay")]),
        );
        let resolver = Resolver::new(&fetcher);
        let ctx = ResolutionContext::new("root", None);

        let err = resolver.resolve(&subscription(), &ctx).unwrap_err();
        assert!(matches!(err, ResolveError::MissingSource { name } if name == "foo"));
    }
}
