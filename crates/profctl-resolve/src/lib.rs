//! profctl Resolve - the profile resolution core
//!
//! Turns one profile subscription into a flat, ordered list of
//! deployable artifacts by recursively fetching profile definitions,
//! expanding nested profiles (with cycle detection over repo keys),
//! and building the Flux objects each leaf artifact needs.
//!
//! Fetching and validation are injected through the
//! [`DefinitionFetcher`] and [`ArtifactValidator`] seams; the resolver
//! itself performs no I/O.

pub mod builder;
pub mod context;
pub mod error;
pub mod fetch;
pub mod naming;
pub mod resolver;

pub use context::{GitSourceRef, ResolutionContext};
pub use error::{ResolveError, Result};
pub use fetch::{ArtifactValidator, DefinitionFetcher, FetchResult, StructuralValidator};
pub use resolver::{Artifact, Resolver, SourceCopy};
