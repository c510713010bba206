//! Profile subscriptions - the root request handed to the resolver

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// A request to install one profile from a specific repository ref
/// under a given local name and namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Logical sub-name, used as the leading object name component
    pub name: String,

    /// Target namespace for every emitted object
    pub namespace: String,

    /// Profile repository URL
    pub profile_url: String,

    /// Branch to fetch the definition from; ignored when a tag is set
    #[serde(default)]
    pub branch: String,

    /// Version tag; takes precedence over the branch wherever a ref is used
    #[serde(default)]
    pub tag: String,

    /// Path of the profile within the repository
    #[serde(default = "default_path")]
    pub path: String,
}

fn default_path() -> String {
    ".".to_string()
}

impl Subscription {
    /// The ref the definition is fetched at: tag wins over branch.
    pub fn git_ref(&self) -> &str {
        if self.tag.is_empty() {
            &self.branch
        } else {
            &self.tag
        }
    }

    /// Identity of this subscription on the recursion path. Tagged
    /// subscriptions are keyed by tag alone since a tag pins both the
    /// ref and the in-repo path.
    pub fn repo_key(&self) -> String {
        if self.tag.is_empty() {
            format!("{}:{}:{}", self.profile_url, self.branch, self.path)
        } else {
            format!("{}:{}", self.profile_url, self.tag)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(CoreError::InvalidSubscription {
                reason: "subscription name must not be empty".to_string(),
            });
        }
        if self.profile_url.is_empty() {
            return Err(CoreError::InvalidSubscription {
                reason: "profile URL must not be empty".to_string(),
            });
        }
        if self.branch.is_empty() && self.tag.is_empty() {
            return Err(CoreError::InvalidSubscription {
                reason: "either a branch or a tag must be set".to_string(),
            });
        }
        Ok(())
    }
}
