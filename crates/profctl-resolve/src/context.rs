//! State threaded through one resolution pass

/// The externally managed flux GitRepository object path-based
/// artifacts attach to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitSourceRef {
    pub namespace: String,
    pub name: String,
}

impl GitSourceRef {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

/// Caller-supplied context for a resolution pass. Owned by the caller;
/// the resolver only reads it.
#[derive(Debug, Clone)]
pub struct ResolutionContext {
    /// Root directory local artifact paths are qualified against
    pub root_dir: String,

    /// Git source for path-based artifacts; `None` makes those
    /// artifacts fail with `MissingSource`.
    pub git_source: Option<GitSourceRef>,
}

impl ResolutionContext {
    pub fn new(root_dir: impl Into<String>, git_source: Option<GitSourceRef>) -> Self {
        Self {
            root_dir: root_dir.into(),
            git_source,
        }
    }
}
