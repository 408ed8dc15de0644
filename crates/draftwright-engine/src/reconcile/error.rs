use thiserror::Error;

/// How a caller should treat a [`ReconcileError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The stored draft cannot be read as a document. Never papered over
    /// with an empty one.
    DataIntegrity,
    /// The caller asked for something that cannot be done as given.
    Usage,
}

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("Failed to parse stored draft body near {excerpt:?}: {source}")]
    CorruptBody {
        excerpt: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Stored draft body is not a document: expected an object, found {found}")]
    NotADocument { found: &'static str },
    #[error("A draft id is required to {operation} content")]
    MissingDraftId { operation: &'static str },
}

impl ReconcileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReconcileError::CorruptBody { .. } | ReconcileError::NotADocument { .. } => {
                ErrorKind::DataIntegrity
            }
            ReconcileError::MissingDraftId { .. } => ErrorKind::Usage,
        }
    }
}
