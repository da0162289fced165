//! Error types for the core library.

use mailvane_ews::ExchangeVersion;
use thiserror::Error;

use crate::oof::OofError;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The remote service reported an error this layer does not recover
    /// from. Propagated verbatim.
    #[error(transparent)]
    Ews(#[from] mailvane_ews::Error),

    /// A folder without an id was passed where cache membership requires
    /// one.
    #[error("folder must have an id")]
    MissingFolderId,

    /// The folder kind has no distinguished folder id, so it cannot be
    /// resolved as a distinguished folder.
    #[error("folder kind {0} has no distinguished folder id")]
    MissingDistinguishedId(&'static str),

    /// The server does not expose the requested distinguished folder.
    #[error("could not find distinguished folder {0}")]
    DistinguishedFolderNotFound(String),

    /// No default folder of the requested kind could be found, even after
    /// all fallback searches.
    #[error("no usable default {0} folder")]
    NoUsableDefaultFolder(&'static str),

    /// More than one folder qualified as the default at the same priority
    /// tier. This is a mailbox configuration problem the caller must
    /// resolve, never a silent pick.
    #[error("multiple possible default {kind} folders: {candidates:?}")]
    AmbiguousDefaultFolder {
        /// Kind name of the requested default folder.
        kind: &'static str,
        /// Display names of every qualifying candidate.
        candidates: Vec<String>,
    },

    /// No folder kind matches the given localized folder name.
    #[error("no folder kind matches folder name {0:?}")]
    UnknownFolderName(String),

    /// The account's server version predates the requested feature.
    #[error("{what} requires server version {required} or later")]
    UnsupportedVersion {
        /// What was requested.
        what: &'static str,
        /// Minimum version that supports it.
        required: ExchangeVersion,
    },

    /// Out-of-office settings failed validation or (de)serialization.
    #[error(transparent)]
    Oof(#[from] OofError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
