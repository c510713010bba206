//! Catalog error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to reach catalog: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid catalog URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("catalog returned status {status} for {path}")]
    Status { status: u16, path: String },

    #[error("failed to parse catalog response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no profiles matching {name:?} found in the catalog")]
    NoMatches { name: String },

    #[error("profile {profile} not found in catalog {catalog}")]
    NotFound { catalog: String, profile: String },

    #[error("catalog entry for {name} carries no repository URL")]
    MissingUrl { name: String },

    #[error("either a profile URL or a catalog client must be configured")]
    MissingClient,

    #[error(transparent)]
    Subscription(#[from] profctl_core::CoreError),

    #[error("failed to generate artifacts: {0}")]
    Resolve(#[from] profctl_resolve::ResolveError),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
