//! Install command - resolve a profile and write its artifacts

use std::path::PathBuf;

use console::style;
use miette::{miette, Result};

use profctl_catalog::{install, CatalogClient, InstallConfig, ProfileConfig};
use profctl_flux::{GitRef, GitRepository, GitRepositorySpec, ObjectMeta};
use profctl_git::GitDefinitionFetcher;
use profctl_resolve::GitSourceRef;

use super::catalog_client;
use crate::writer;

pub struct InstallArgs {
    pub catalog_url: Option<String>,
    pub profile: Option<String>,
    pub version: String,
    pub profile_url: Option<String>,
    pub profile_branch: String,
    pub profile_path: String,
    pub sub_name: String,
    pub namespace: String,
    pub out: PathBuf,
    pub git_repository: Option<String>,
}

pub fn run(args: InstallArgs) -> Result<()> {
    let profile = profile_config(&args)?;
    let git_source = args
        .git_repository
        .as_deref()
        .map(parse_git_repository)
        .transpose()?;

    // Only catalog-mode installs need a client.
    let client = if profile.profile_url.is_empty() {
        Some(catalog_client(args.catalog_url.as_deref())?)
    } else {
        None
    };

    let fetcher = GitDefinitionFetcher::new();
    let cfg = InstallConfig {
        client: client.as_ref().map(|c| c as &dyn CatalogClient),
        fetcher: &fetcher,
        profile,
        root_dir: args.out.display().to_string(),
        git_source: git_source.clone(),
    };

    let installation = install(&cfg).map_err(|err| miette!("{err}"))?;
    println!(
        "{} resolved {} artifact(s) from {}",
        style("→").blue(),
        installation.artifacts.len(),
        installation.subscription.profile_url,
    );

    writer::write_subscription(&args.out, &installation.subscription)
        .map_err(|err| miette!("{err}"))?;
    writer::write_artifacts(&args.out, &installation.artifacts).map_err(|err| miette!("{err}"))?;

    if let Some(source) = git_source {
        let sub = &installation.subscription;
        let reference = if sub.tag.is_empty() {
            GitRef::branch(sub.branch.clone())
        } else {
            GitRef::tag(sub.tag.clone())
        };
        let repository = GitRepository::new(
            ObjectMeta::new(source.name, source.namespace),
            GitRepositorySpec {
                url: sub.profile_url.clone(),
                reference,
            },
        );
        writer::write_git_repository(&args.out, &repository).map_err(|err| miette!("{err}"))?;
    }

    println!(
        "{} wrote artifacts to {}",
        style("✓").green(),
        args.out.display()
    );
    Ok(())
}

fn profile_config(args: &InstallArgs) -> Result<ProfileConfig> {
    let mut profile = ProfileConfig {
        version: args.version.clone(),
        profile_branch: args.profile_branch.clone(),
        profile_path: args.profile_path.clone(),
        sub_name: args.sub_name.clone(),
        namespace: args.namespace.clone(),
        ..ProfileConfig::default()
    };

    match (&args.profile, &args.profile_url) {
        (Some(entry), None) => {
            let (catalog, name) = entry
                .split_once('/')
                .ok_or_else(|| miette!("expected <catalog>/<profile>, got {entry:?}"))?;
            profile.catalog_name = catalog.to_string();
            profile.profile_name = name.to_string();
        }
        (None, Some(url)) => {
            profile.profile_url = url.clone();
        }
        _ => return Err(miette!("pass either <catalog>/<profile> or --profile-url")),
    }
    Ok(profile)
}

fn parse_git_repository(value: &str) -> Result<GitSourceRef> {
    let (namespace, name) = value
        .split_once('/')
        .ok_or_else(|| miette!("expected <namespace>/<name>, got {value:?}"))?;
    Ok(GitSourceRef::new(namespace, name))
}
