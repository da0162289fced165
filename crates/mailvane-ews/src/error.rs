//! Error types for remote EWS operations.

use thiserror::Error;

/// Errors reported by the remote Exchange service.
///
/// Batch operations return these *as values* alongside successful results
/// (one entry per requested item), so callers can decide per item whether a
/// failure means "skip silently", "recover", or "abort the whole pass".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// The requested folder does not exist on the server.
    #[error("folder not found: {0}")]
    FolderNotFound(String),

    /// The caller is not authorized to see the requested folder.
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// The requested item does not exist. Some servers report missing
    /// distinguished folders this way instead of `FolderNotFound`.
    #[error("item not found: {0}")]
    ItemNotFound(String),

    /// The server rejected the operation as invalid. Typically another way
    /// of reporting a distinguished folder the server does not have; the
    /// message text is localized and cannot be matched reliably.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// No replica of the public folder store is available.
    #[error("no public folder replica available: {0}")]
    NoPublicFolderReplica(String),

    /// The server returned a SOAP fault not covered by a specific kind.
    #[error("server fault {code}: {message}")]
    ServerFault {
        /// Machine-readable fault code from the response.
        code: String,
        /// Human-readable fault text.
        message: String,
    },

    /// The request never produced a usable response.
    #[error("transport error: {0}")]
    Transport(String),
}

impl Error {
    /// Whether this error means "the server does not have this
    /// distinguished folder".
    ///
    /// Servers report missing well-known folders in several shapes, and a
    /// denied folder is indistinguishable from an absent one during bulk
    /// discovery. All of these are skipped silently when resolving the
    /// well-known folder list of a hierarchy.
    #[must_use]
    pub const fn is_missing_distinguished(&self) -> bool {
        matches!(
            self,
            Self::FolderNotFound(_)
                | Self::NoPublicFolderReplica(_)
                | Self::InvalidOperation(_)
                | Self::ItemNotFound(_)
                | Self::AccessDenied(_)
        )
    }

    /// Whether this error is an authorization failure.
    #[must_use]
    pub const fn is_access_denied(&self) -> bool {
        matches!(self, Self::AccessDenied(_))
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_distinguished_kinds() {
        assert!(Error::FolderNotFound("inbox".into()).is_missing_distinguished());
        assert!(Error::ItemNotFound("x".into()).is_missing_distinguished());
        assert!(Error::InvalidOperation("x".into()).is_missing_distinguished());
        assert!(Error::NoPublicFolderReplica("x".into()).is_missing_distinguished());
        assert!(Error::AccessDenied("x".into()).is_missing_distinguished());
    }

    #[test]
    fn hard_failures_are_not_missing_distinguished() {
        let fault = Error::ServerFault {
            code: "ErrorInternalServerError".into(),
            message: "boom".into(),
        };
        assert!(!fault.is_missing_distinguished());
        assert!(!Error::Transport("connection reset".into()).is_missing_distinguished());
    }

    #[test]
    fn access_denied_detection() {
        assert!(Error::AccessDenied("hidden".into()).is_access_denied());
        assert!(!Error::FolderNotFound("inbox".into()).is_access_denied());
    }
}
