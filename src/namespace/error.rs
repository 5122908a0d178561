//! Error types for namespace reconciliation.

use resource_service::{Code, PayloadError, ResourceError};
use thiserror::Error;

/// Errors returned by [`ensure_exists`](super::ensure_exists) and
/// [`ensure_deleted`](super::ensure_deleted).
///
/// Remote failures keep the original [`ResourceError`] as their source, so a
/// caller can still branch on its [`Code`] after wrapping.
#[derive(Debug, Error)]
pub enum NamespaceError {
    /// The namespace exists but is marked for deletion; creation must wait.
    #[error("consul namespace {0:?} deletion in progress")]
    DeletionInProgress(String),

    /// Read failure while ensuring the namespace is deleted.
    #[error("namespace read failed: {0}")]
    Read(#[source] ResourceError),

    /// Read failure while ensuring the namespace exists.
    #[error("consul namespace read failed: {0}")]
    ExistsRead(#[source] ResourceError),

    #[error("namespace delete failed: {0}")]
    Delete(#[source] ResourceError),

    #[error("consul namespace creation failed: {0}")]
    Create(#[source] ResourceError),

    #[error(transparent)]
    Payload(#[from] PayloadError),

    /// The cross-namespace policy hook failed for a live namespace.
    #[error("cross-namespace policy failed: {0}")]
    Policy(String),
}

impl NamespaceError {
    /// Status code of the underlying remote failure, if there was one.
    pub fn code(&self) -> Option<Code> {
        match self {
            NamespaceError::Read(e)
            | NamespaceError::ExistsRead(e)
            | NamespaceError::Delete(e)
            | NamespaceError::Create(e) => Some(e.code),
            _ => None,
        }
    }
}
