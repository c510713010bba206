//! External collaborator seams: definition fetching and artifact validation

use profctl_core::{CoreError, DeclaredArtifact, ProfileDefinition};

/// What a fetcher reports back: a parsed definition or an opaque error
/// the resolver wraps with the repository coordinates.
pub type FetchResult = std::result::Result<ProfileDefinition, Box<dyn std::error::Error + Send + Sync>>;

/// Retrieves and parses a profile definition from a repository ref.
/// Timeouts and retries live behind this trait, not in the resolver.
pub trait DefinitionFetcher {
    fn get_definition(&self, url: &str, git_ref: &str, path: &str) -> FetchResult;
}

/// Reports whether one declared artifact is well-formed.
pub trait ArtifactValidator {
    fn validate(&self, artifact: &DeclaredArtifact) -> std::result::Result<(), CoreError>;
}

/// The default validator: the structural checks declared by the core
/// data model.
#[derive(Debug, Default)]
pub struct StructuralValidator;

impl ArtifactValidator for StructuralValidator {
    fn validate(&self, artifact: &DeclaredArtifact) -> std::result::Result<(), CoreError> {
        artifact.validate()
    }
}
