//! The remote folder service seam.

use mailvane_ews::TraversalDepth;

use super::model::Folder;
use crate::account::Account;

/// One entry of a batch result: a resolved folder, or the error the server
/// reported for that entry.
///
/// Recognized per-item failures travel as values in the same sequence as
/// successes so the discovery loops can decide per entry whether to skip,
/// recover, or abort.
pub type Resolution = std::result::Result<Folder, mailvane_ews::Error>;

/// The transport collaborator a hierarchy root talks to.
///
/// Implementations wrap the actual EWS SOAP operations. Every method is a
/// single blocking batch call: it either returns one result entry per
/// requested item, or fails as a whole. Timeouts, retries, and cancellation
/// are the transport's business; this layer never handles them.
pub trait FolderService {
    /// Batch-resolves folder stubs against the service (`GetFolder`).
    ///
    /// Stubs without an id are resolved by their distinguished name.
    /// Returns one [`Resolution`] per stub, in request order.
    ///
    /// # Errors
    ///
    /// Fails only when the batch itself never produced a response.
    fn resolve(&self, account: &Account, stubs: Vec<Folder>)
    -> mailvane_ews::Result<Vec<Resolution>>;

    /// Lists folders below `parent` at the given depth (`FindFolder`).
    ///
    /// # Errors
    ///
    /// Fails when the query as a whole is rejected; per-folder failures
    /// come back as [`Resolution`] entries.
    fn find_folders(
        &self,
        account: &Account,
        parent: &Folder,
        depth: TraversalDepth,
    ) -> mailvane_ews::Result<Vec<Resolution>>;

    /// Lightweight access probe: an item query against the folder that
    /// succeeds exactly when the caller may read it (`FindItem` with a
    /// zero-size page). Used to distinguish "does not exist" from "exists
    /// but hidden" when a folder lookup is denied.
    ///
    /// # Errors
    ///
    /// Fails with the access error the server reported.
    fn test_access(&self, account: &Account, folder: &Folder) -> mailvane_ews::Result<()>;

    /// Re-reads a folder's own properties from the service.
    ///
    /// # Errors
    ///
    /// Fails when the folder cannot be fetched.
    fn refresh_folder(&self, account: &Account, folder: &Folder) -> mailvane_ews::Result<Folder>;
}
