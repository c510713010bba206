//! Artifact writer - lays resolved artifacts out on disk
//!
//! Runs only after resolution fully succeeded; a failed resolution
//! never produces partial output.

use std::fs;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use profctl_core::Subscription;
use profctl_flux::{FluxObject, GitRepository};
use profctl_resolve::Artifact;

/// File recording what was installed, read back by later invocations
pub const INSTALLATION_FILE: &str = "profile.yaml";

const INSTALLATION_API_VERSION: &str = "profctl.dev/v1alpha1";
const INSTALLATION_KIND: &str = "ProfileInstallation";

/// Installation manifest persisted at the output root so a later run
/// can see what was installed from where.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileInstallation<'a> {
    api_version: &'static str,
    kind: &'static str,
    metadata: InstallationMeta<'a>,
    spec: InstallationSpec<'a>,
}

#[derive(Debug, Serialize)]
struct InstallationMeta<'a> {
    name: &'a str,
    namespace: &'a str,
}

#[derive(Debug, Serialize)]
struct InstallationSpec<'a> {
    source: InstallationSource<'a>,
}

#[derive(Debug, Serialize)]
struct InstallationSource<'a> {
    url: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    branch: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    tag: &'a str,
    path: &'a str,
}

#[derive(Debug, Error)]
pub enum WriterError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize object: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Git(#[from] profctl_git::GitError),
}

/// Write each artifact's objects under `<root>/artifacts/<name>/` and
/// copy any declared source paths next to them.
pub fn write_artifacts(root: &Path, artifacts: &[Artifact]) -> Result<(), WriterError> {
    for artifact in artifacts {
        // Slash-qualified logical names become nested directories.
        let dir = root.join("artifacts").join(&artifact.name);
        fs::create_dir_all(&dir)?;

        for object in &artifact.objects {
            fs::write(dir.join(object_file_name(object)), object.to_yaml()?)?;
        }

        if let Some(source) = &artifact.source {
            let checkout = profctl_git::checkout_ref(&source.repo_url, &source.branch)?;
            profctl_git::copy_paths(
                checkout.path(),
                &source.sparse_folder,
                &source.paths_to_copy,
                &dir,
            )?;
        }
    }
    Ok(())
}

/// Write the installation manifest for `subscription` at the output root.
pub fn write_subscription(root: &Path, subscription: &Subscription) -> Result<(), WriterError> {
    let installation = ProfileInstallation {
        api_version: INSTALLATION_API_VERSION,
        kind: INSTALLATION_KIND,
        metadata: InstallationMeta {
            name: &subscription.name,
            namespace: &subscription.namespace,
        },
        spec: InstallationSpec {
            source: InstallationSource {
                url: &subscription.profile_url,
                branch: &subscription.branch,
                tag: &subscription.tag,
                path: &subscription.path,
            },
        },
    };
    fs::create_dir_all(root)?;
    fs::write(
        root.join(INSTALLATION_FILE),
        serde_yaml::to_string(&installation)?,
    )?;
    Ok(())
}

/// Write the GitRepository source object at the output root.
pub fn write_git_repository(root: &Path, repository: &GitRepository) -> Result<(), WriterError> {
    fs::create_dir_all(root)?;
    fs::write(
        root.join("git-repository.yaml"),
        serde_yaml::to_string(repository)?,
    )?;
    Ok(())
}

fn object_file_name(object: &FluxObject) -> &'static str {
    match object {
        FluxObject::HelmRelease(_) => "helm-release.yaml",
        FluxObject::HelmRepository(_) => "helm-repository.yaml",
        FluxObject::Kustomization(_) => "kustomization.yaml",
        FluxObject::GitRepository(_) => "git-repository.yaml",
    }
}
