//! profctl Catalog - profile catalog client and install orchestration
//!
//! Talks to a profile catalog service over HTTP, turns catalog entries
//! (or direct repository URLs) into subscriptions, and runs the
//! resolver over them.

pub mod client;
pub mod entry;
pub mod error;
pub mod install;
pub mod ops;

pub use client::{CatalogClient, HttpCatalogClient};
pub use entry::ProfileCatalogEntry;
pub use error::{CatalogError, Result};
pub use install::{install, InstallConfig, Installation, ProfileConfig};
pub use ops::{get_with_version, search, show};
