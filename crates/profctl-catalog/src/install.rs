//! Install orchestration: catalog entry (or direct URL) → subscription
//! → resolved artifacts

use tracing::info;

use profctl_core::Subscription;
use profctl_resolve::{
    Artifact, DefinitionFetcher, GitSourceRef, ResolutionContext, Resolver,
};

use crate::client::CatalogClient;
use crate::error::{CatalogError, Result};
use crate::ops::get_with_version;

/// Where the profile comes from and how it is installed locally.
/// Either `profile_url` is set (direct mode) or the catalog triple
/// (`catalog_name`/`profile_name`/`version`) is looked up.
#[derive(Debug, Clone, Default)]
pub struct ProfileConfig {
    pub catalog_name: String,
    pub profile_name: String,
    pub version: String,
    pub profile_url: String,
    pub profile_branch: String,
    pub profile_path: String,
    pub sub_name: String,
    pub namespace: String,
}

/// Everything `install` needs for one profile
pub struct InstallConfig<'a> {
    pub client: Option<&'a dyn CatalogClient>,
    pub fetcher: &'a dyn DefinitionFetcher,
    pub profile: ProfileConfig,
    pub root_dir: String,
    pub git_source: Option<GitSourceRef>,
}

/// The outcome of a successful install resolution
#[derive(Debug, Clone)]
pub struct Installation {
    pub subscription: Subscription,
    pub artifacts: Vec<Artifact>,
}

/// Resolve the requested profile into artifacts. All-or-nothing: any
/// resolution failure discards the pass.
pub fn install(cfg: &InstallConfig) -> Result<Installation> {
    let subscription = make_subscription(cfg)?;
    subscription.validate()?;
    info!(
        profile = %subscription.profile_url,
        git_ref = subscription.git_ref(),
        "resolving profile"
    );

    let ctx = ResolutionContext::new(cfg.root_dir.clone(), cfg.git_source.clone());
    let resolver = Resolver::new(cfg.fetcher);
    let artifacts = resolver.resolve(&subscription, &ctx)?;

    Ok(Installation {
        subscription,
        artifacts,
    })
}

fn make_subscription(cfg: &InstallConfig) -> Result<Subscription> {
    let profile = &cfg.profile;
    if !profile.profile_url.is_empty() {
        return Ok(Subscription {
            name: profile.sub_name.clone(),
            namespace: profile.namespace.clone(),
            profile_url: profile.profile_url.clone(),
            branch: profile.profile_branch.clone(),
            tag: String::new(),
            path: profile.profile_path.clone(),
        });
    }

    let client = cfg.client.ok_or(CatalogError::MissingClient)?;
    let entry = get_with_version(
        client,
        &profile.catalog_name,
        &profile.profile_name,
        &profile.version,
    )?;
    let url = entry.url.clone().ok_or_else(|| CatalogError::MissingUrl {
        name: entry.name.clone(),
    })?;

    // Catalog entries pin a tag; its leading segment is the in-repo
    // path, same as for nested profiles.
    let tag = entry
        .tag
        .clone()
        .or(entry.version.clone())
        .unwrap_or_else(|| profile.version.clone());
    let path = match tag.split_once('/') {
        Some((folder, _)) => folder.to_string(),
        None => ".".to_string(),
    };

    Ok(Subscription {
        name: profile.sub_name.clone(),
        namespace: profile.namespace.clone(),
        profile_url: url,
        branch: String::new(),
        tag,
        path,
    })
}
