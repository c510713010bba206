//! Definition fetching backed by a real git clone

use std::fs;
use std::path::Path;

use git2::build::CheckoutBuilder;
use git2::Repository;
use tempfile::TempDir;
use tracing::debug;

use profctl_core::ProfileDefinition;
use profctl_resolve::{DefinitionFetcher, FetchResult};

use crate::error::{GitError, Result};

/// File a profile repository must carry at each profile path
pub const DEFINITION_FILE: &str = "profile.yaml";

/// A repository cloned at a specific ref. The working tree lives in a
/// temp directory and is removed on drop.
pub struct CheckedOutRepo {
    dir: TempDir,
}

impl CheckedOutRepo {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Clone `url` and check out `git_ref` (branch or tag) into a temp
/// directory.
pub fn checkout_ref(url: &str, git_ref: &str) -> Result<CheckedOutRepo> {
    let dir = TempDir::new()?;
    debug!(url, git_ref, "cloning profile repository");
    let repo = Repository::clone(url, dir.path())?;
    checkout(&repo, git_ref)?;
    Ok(CheckedOutRepo { dir })
}

fn checkout(repo: &Repository, git_ref: &str) -> Result<()> {
    let (object, reference) = repo.revparse_ext(git_ref)?;
    repo.checkout_tree(&object, Some(CheckoutBuilder::default().force()))?;
    match reference.as_ref().and_then(|r| r.name()) {
        Some(name) => repo.set_head(name)?,
        None => repo.set_head_detached(object.id())?,
    }
    Ok(())
}

/// Fetches profile definitions by cloning the repository at the
/// requested ref and parsing `profile.yaml` at the requested path.
#[derive(Debug, Default)]
pub struct GitDefinitionFetcher;

impl GitDefinitionFetcher {
    pub fn new() -> Self {
        Self
    }

    fn definition_at(&self, url: &str, git_ref: &str, path: &str) -> Result<ProfileDefinition> {
        let checkout = checkout_ref(url, git_ref)?;
        let file = checkout.path().join(path).join(DEFINITION_FILE);
        let raw = fs::read_to_string(&file).map_err(|source| GitError::DefinitionNotFound {
            path: file.display().to_string(),
            source,
        })?;
        Ok(ProfileDefinition::from_yaml(&raw)?)
    }
}

impl DefinitionFetcher for GitDefinitionFetcher {
    fn get_definition(&self, url: &str, git_ref: &str, path: &str) -> FetchResult {
        Ok(self.definition_at(url, git_ref, path)?)
    }
}
