//! profctl Git - git plumbing behind the resolver's fetcher seam
//!
//! Clones profile repositories at a branch or tag, parses their
//! `profile.yaml` definitions, and copies declared source paths for
//! the artifact writer.

pub mod copy;
pub mod error;
pub mod fetcher;

pub use copy::copy_paths;
pub use error::{GitError, Result};
pub use fetcher::{checkout_ref, CheckedOutRepo, GitDefinitionFetcher, DEFINITION_FILE};
