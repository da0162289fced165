//! Hierarchy roots: the folder tree cache and distinguished folder
//! resolution.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use mailvane_ews::{ExchangeVersion, FolderId, TraversalDepth};
use tracing::debug;

use super::known_folders::{
    ARCHIVE_ROOT, MSG_FOLDER_ROOT, NON_DELETEABLE_FOLDERS, PUBLIC_FOLDERS_ROOT, ROOT,
    WELLKNOWN_FOLDERS_IN_ARCHIVE_ROOT, WELLKNOWN_FOLDERS_IN_ROOT,
};
use super::model::{Folder, FolderKind};
use super::service::FolderService;
use crate::account::Account;
use crate::error::{Error, Result};

/// Which folder hierarchy a root sits on top of.
///
/// The three hierarchies of a mailbox share all of their caching and
/// resolution machinery; they differ in which well-known folders they
/// contain, how deep the service lets us traverse them, and which server
/// versions have them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    /// The primary mailbox hierarchy.
    Standard,
    /// The public folder hierarchy. Forbids deep traversal, so children
    /// below the top level are discovered on demand.
    PublicFolders,
    /// The archive mailbox hierarchy.
    Archive,
}

impl RootKind {
    /// The folder kind of the root folder itself.
    #[must_use]
    pub const fn folder_kind(self) -> &'static FolderKind {
        match self {
            Self::Standard => &ROOT,
            Self::PublicFolders => &PUBLIC_FOLDERS_ROOT,
            Self::Archive => &ARCHIVE_ROOT,
        }
    }

    /// Traversal depth used when listing the hierarchy from its root.
    #[must_use]
    pub const fn traversal_depth(self) -> TraversalDepth {
        match self {
            Self::PublicFolders => TraversalDepth::Shallow,
            Self::Standard | Self::Archive => TraversalDepth::Deep,
        }
    }

    /// The well-known folder kinds that belong to this hierarchy. Root
    /// kinds themselves are never in these lists.
    #[must_use]
    pub const fn wellknown_folders(self) -> &'static [&'static FolderKind] {
        match self {
            Self::Standard => WELLKNOWN_FOLDERS_IN_ROOT,
            Self::PublicFolders => &[],
            Self::Archive => WELLKNOWN_FOLDERS_IN_ARCHIVE_ROOT,
        }
    }

    /// Minimum server version that has this hierarchy, if gated.
    #[must_use]
    pub const fn supported_from(self) -> Option<ExchangeVersion> {
        match self {
            Self::Standard => None,
            Self::PublicFolders => Some(ExchangeVersion::Exchange2007Sp1),
            Self::Archive => Some(ExchangeVersion::Exchange2010Sp1),
        }
    }

    /// Finds the folder kind matching a localized folder name.
    ///
    /// Scans this hierarchy's well-known kinds and the non-deleteable
    /// system kinds, matching case-insensitively against the localized
    /// name tables for `locale` (e.g. `da_DK`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFolderName`] if no kind matches.
    pub fn folder_kind_from_folder_name(
        self,
        folder_name: &str,
        locale: &str,
    ) -> Result<&'static FolderKind> {
        let needle = folder_name.to_lowercase();
        for kind in self
            .wellknown_folders()
            .iter()
            .chain(NON_DELETEABLE_FOLDERS.iter())
            .copied()
        {
            if kind.localized_names(locale).any(|n| n == needle.as_str()) {
                return Ok(kind);
            }
        }
        Err(Error::UnknownFolderName(folder_name.to_string()))
    }
}

/// A special folder that acts as the top of a folder hierarchy.
///
/// Finds and caches the subfolders of the hierarchy, indexed by folder id,
/// and resolves distinguished and default folders against the cache and
/// the remote service.
///
/// The cache is explicitly lazy and invalidatable: it is absent until an
/// operation needs it, rebuilt silently on the next access after
/// [`clear_cache`](Self::clear_cache) or [`refresh`](Self::refresh), and
/// never exposed to callers in a partially built state. It is not
/// synchronized; if multiple threads share one root, the caller must
/// serialize access externally.
pub struct RootOfHierarchy {
    account: Account,
    service: Rc<dyn FolderService>,
    kind: RootKind,
    folder: Folder,
    // None = cache not built. Keyed by FolderId::value; change keys churn
    // without changing folder identity.
    subfolders: RefCell<Option<HashMap<String, Folder>>>,
}

impl std::fmt::Debug for RootOfHierarchy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RootOfHierarchy")
            .field("account", &self.account.email)
            .field("kind", &self.kind)
            .field("folder", &self.folder)
            .field("cache_built", &self.is_cache_built())
            .finish_non_exhaustive()
    }
}

impl RootOfHierarchy {
    /// Fetches the distinguished root folder of the given hierarchy and
    /// wraps it as a hierarchy root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedVersion`] if the account's server
    /// version predates the hierarchy, or the resolution error from the
    /// service.
    pub fn get_distinguished(
        account: Account,
        service: Rc<dyn FolderService>,
        kind: RootKind,
    ) -> Result<Self> {
        if let Some(required) = kind.supported_from() {
            if account.version < required {
                return Err(Error::UnsupportedVersion {
                    what: kind.folder_kind().name,
                    required,
                });
            }
        }
        let folder = resolve_distinguished(&account, service.as_ref(), kind.folder_kind())?;
        Ok(Self::from_folder(account, service, kind, folder))
    }

    /// Wraps an already-resolved root folder, with an unbuilt cache.
    #[must_use]
    pub fn from_folder(
        account: Account,
        service: Rc<dyn FolderService>,
        kind: RootKind,
        folder: Folder,
    ) -> Self {
        Self {
            account,
            service,
            kind,
            folder,
            subfolders: RefCell::new(None),
        }
    }

    /// The account this hierarchy belongs to.
    #[must_use]
    pub const fn account(&self) -> &Account {
        &self.account
    }

    /// Which hierarchy this root sits on top of.
    #[must_use]
    pub const fn kind(&self) -> RootKind {
        self.kind
    }

    /// The root's own folder record.
    #[must_use]
    pub const fn folder(&self) -> &Folder {
        &self.folder
    }

    /// Whether the subfolder cache has been built. An empty built cache is
    /// not the same thing as an unbuilt one: the former answers lookups
    /// without touching the service.
    #[must_use]
    pub fn is_cache_built(&self) -> bool {
        self.subfolders.borrow().is_some()
    }

    /// Looks up a cached folder by id, building the cache first if needed.
    /// Returns `None` for ids not in this hierarchy.
    ///
    /// # Errors
    ///
    /// Fails only if the cache had to be built and a discovery pass
    /// failed.
    pub fn get_folder(&self, id: &FolderId) -> Result<Option<Folder>> {
        self.ensure_cache()?;
        Ok(self
            .subfolders
            .borrow()
            .as_ref()
            .and_then(|map| map.get(&id.value).cloned()))
    }

    /// Inserts or replaces a folder in the cache, keyed by its id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingFolderId`] if the folder has no id; the
    /// cache is not touched in that case.
    pub fn add_folder(&self, folder: Folder) -> Result<()> {
        let id = folder.id.clone().ok_or(Error::MissingFolderId)?;
        self.ensure_cache()?;
        if let Some(map) = self.subfolders.borrow_mut().as_mut() {
            map.insert(id.value, folder);
        }
        Ok(())
    }

    /// Replaces a folder in the cache. Insert-or-replace by id, same as
    /// [`add_folder`](Self::add_folder).
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingFolderId`] if the folder has no id.
    pub fn update_folder(&self, folder: Folder) -> Result<()> {
        self.add_folder(folder)
    }

    /// Removes a folder from the cache by id. Removing an id that is not
    /// cached is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingFolderId`] if the folder has no id.
    pub fn remove_folder(&self, folder: &Folder) -> Result<()> {
        let id = folder.id.as_ref().ok_or(Error::MissingFolderId)?;
        self.ensure_cache()?;
        if let Some(map) = self.subfolders.borrow_mut().as_mut() {
            map.remove(&id.value);
        }
        Ok(())
    }

    /// Drops the cache. The next operation that needs it rebuilds it from
    /// the service. Does not touch the service itself.
    pub fn clear_cache(&self) {
        *self.subfolders.borrow_mut() = None;
    }

    /// Drops the cache and re-reads the root's own properties from the
    /// service.
    ///
    /// # Errors
    ///
    /// Fails if the root folder cannot be re-fetched; the cache stays
    /// dropped either way.
    pub fn refresh(&mut self) -> Result<()> {
        self.clear_cache();
        self.folder = self.service.refresh_folder(&self.account, &self.folder)?;
        Ok(())
    }

    /// The cached folders whose parent is `folder`.
    ///
    /// Re-derived from the cache on every call, so the result reflects
    /// later mutations. The root itself has no parent and is never
    /// returned. On the public folder hierarchy this also fetches unknown
    /// children on demand, because the cache only ever holds the top
    /// level; see [`RootKind::PublicFolders`].
    ///
    /// # Errors
    ///
    /// Fails if the cache had to be built (or, for public folders,
    /// extended) and discovery failed.
    pub fn get_children(&self, folder: &Folder) -> Result<Vec<Folder>> {
        let children = self.cached_children(folder)?;
        if self.kind != RootKind::PublicFolders {
            return Ok(children);
        }

        // Known children are trusted and never re-fetched.
        if !children.is_empty() {
            return Ok(children);
        }
        // The server already told us there is nothing below this folder.
        if folder.child_folder_count == Some(0) {
            return Ok(children);
        }

        let mut fetched: HashMap<String, Folder> = HashMap::new();
        match self
            .service
            .find_folders(&self.account, folder, TraversalDepth::Shallow)
        {
            Ok(results) => {
                for result in results {
                    match result {
                        Ok(f) => {
                            let id = f.id.clone().ok_or(Error::MissingFolderId)?;
                            fetched.insert(id.value, f);
                        }
                        Err(e) if e.is_access_denied() => {
                            debug!("no access to children of {}", folder.name);
                            break;
                        }
                        Err(e) => return Err(e.into()),
                    }
                }
            }
            Err(e) if e.is_access_denied() => {
                debug!("no access to children of {}", folder.name);
            }
            Err(e) => return Err(e.into()),
        }

        // Merge in a single step so no reader of the cache ever observes
        // half of this update.
        if let Some(map) = self.subfolders.borrow_mut().as_mut() {
            map.extend(fetched);
        }

        self.cached_children(folder)
    }

    /// Resolves the exact distinguished folder of the given kind from the
    /// service, bypassing the cache.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingDistinguishedId`] for kinds without a
    /// distinguished id, [`Error::DistinguishedFolderNotFound`] when the
    /// server does not have the folder, or the service error verbatim.
    pub fn resolve_distinguished(&self, kind: &'static FolderKind) -> Result<Folder> {
        resolve_distinguished(&self.account, self.service.as_ref(), kind)
    }

    /// "Top of Information Store": the folder that usually contains the
    /// standard distinguished folders of the account.
    ///
    /// # Errors
    ///
    /// Fails like [`get_default_folder`](Self::get_default_folder) when no
    /// such folder can be found.
    pub fn tois(&self) -> Result<Folder> {
        self.get_default_folder(&MSG_FOLDER_ROOT)
    }

    /// Returns the default folder of the given kind for this account.
    ///
    /// Prefers a cached distinguished instance, then an explicit
    /// distinguished lookup, then an access probe when the lookup is
    /// denied. On the primary hierarchy a failed lookup additionally falls
    /// back to searching the cached tree: first for a folder carrying the
    /// default distinguished name, then among the direct children of the
    /// Top of Information Store, then among the direct children of the
    /// root, matching exact kind and preferring distinguished folders over
    /// localized-name matches.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AmbiguousDefaultFolder`] when several folders
    /// qualify at the same priority, and
    /// [`Error::NoUsableDefaultFolder`] when every strategy comes up
    /// empty. Unexpected service errors propagate verbatim.
    pub fn get_default_folder(&self, kind: &'static FolderKind) -> Result<Folder> {
        match self.default_folder_base(kind) {
            Err(Error::NoUsableDefaultFolder(_)) if self.kind == RootKind::Standard => {
                self.default_folder_fallback(kind)
            }
            other => other,
        }
    }

    fn default_folder_base(&self, kind: &'static FolderKind) -> Result<Folder> {
        if kind.distinguished_id.is_none() {
            return Err(Error::MissingDistinguishedId(kind.name));
        }

        // A cached instance avoids a round-trip, but only when the cache
        // was already built for another reason. The kind comparison is
        // exact so a specialized kind never stands in for the requested
        // one.
        {
            let borrow = self.subfolders.borrow();
            if let Some(map) = borrow.as_ref() {
                for f in map.values() {
                    if f.kind == kind && f.is_distinguished {
                        debug!("found cached distinguished {} folder", kind.name);
                        return Ok(f.clone());
                    }
                }
            }
        }

        debug!("requesting distinguished {} folder explicitly", kind.name);
        match self.resolve_distinguished(kind) {
            Ok(folder) => return Ok(folder),
            Err(Error::Ews(e)) if e.is_access_denied() => {
                // The folder lookup may be denied while item access still
                // works. Probe before giving up.
                debug!("testing default {} folder with an access probe", kind.name);
                let stub = Folder::distinguished_stub(kind);
                self.service.test_access(&self.account, &stub)?;
                return Ok(stub);
            }
            Err(Error::DistinguishedFolderNotFound(_)) => {
                // The server does not expose this distinguished folder.
            }
            Err(e) => return Err(e),
        }
        Err(Error::NoUsableDefaultFolder(kind.name))
    }

    fn default_folder_fallback(&self, kind: &'static FolderKind) -> Result<Folder> {
        debug!("searching for a default {} folder in the full folder list", kind.name);
        self.ensure_cache()?;
        {
            let borrow = self.subfolders.borrow();
            if let Some(map) = borrow.as_ref() {
                for f in map.values() {
                    if f.kind == kind && f.has_distinguished_name() {
                        debug!("found cached {} folder with the distinguished name", kind.name);
                        return Ok(f.clone());
                    }
                }
            }
        }

        // Direct children of TOIS next. TOIS might not exist. Anchoring
        // the search for TOIS at TOIS itself would recurse forever.
        if kind != &MSG_FOLDER_ROOT {
            match self.tois() {
                Ok(tois) => {
                    let children = self.get_children(&tois)?;
                    match self.single_candidate(kind, &children) {
                        Err(Error::NoUsableDefaultFolder(_)) => {}
                        other => return other,
                    }
                }
                Err(Error::NoUsableDefaultFolder(_)) => {}
                Err(e) => return Err(e),
            }
        }

        // Last resort: direct children of the root itself.
        let own = self.folder.clone();
        let children = self.get_children(&own)?;
        self.single_candidate(kind, &children)
    }

    /// Picks the single qualifying folder of `kind` out of a candidate
    /// collection. Distinguished folders outrank localized-name matches;
    /// several candidates at the same rank are a configuration error.
    fn single_candidate(&self, kind: &'static FolderKind, folders: &[Folder]) -> Result<Folder> {
        let same_kind: Vec<&Folder> = folders.iter().filter(|f| f.kind == kind).collect();
        let distinguished: Vec<&Folder> = same_kind
            .iter()
            .copied()
            .filter(|f| f.is_distinguished)
            .collect();
        let candidates = if distinguished.is_empty() {
            same_kind
                .into_iter()
                .filter(|f| {
                    let name = f.name.to_lowercase();
                    kind.localized_names(&self.account.locale)
                        .any(|n| n == name.as_str())
                })
                .collect()
        } else {
            distinguished
        };
        match candidates.as_slice() {
            [] => Err(Error::NoUsableDefaultFolder(kind.name)),
            [folder] => {
                debug!("found {} folder {}", kind.name, folder.name);
                Ok((*folder).clone())
            }
            several => Err(Error::AmbiguousDefaultFolder {
                kind: kind.name,
                candidates: several.iter().map(|f| f.name.clone()).collect(),
            }),
        }
    }

    fn ensure_cache(&self) -> Result<()> {
        if self.subfolders.borrow().is_some() {
            return Ok(());
        }
        let map = self.build_folders_map()?;
        *self.subfolders.borrow_mut() = Some(map);
        Ok(())
    }

    /// Maps the root and every discoverable subfolder by folder id.
    ///
    /// Two passes: distinguished folders are resolved first so each gets
    /// its correct concrete kind, then the generic traversal fills in the
    /// rest. The distinguished entries are authoritative; traversal
    /// duplicates never replace them.
    fn build_folders_map(&self) -> Result<HashMap<String, Folder>> {
        let root_id = self.folder.id.as_ref().ok_or(Error::MissingFolderId)?;
        let mut map = HashMap::new();
        map.insert(root_id.value.clone(), self.folder.clone());

        let stubs: Vec<Folder> = self
            .kind
            .wellknown_folders()
            .iter()
            .copied()
            .filter(|k| k.get_folder_allowed && k.supports_version(self.account.version))
            .map(Folder::distinguished_stub)
            .collect();
        if !stubs.is_empty() {
            for result in self.service.resolve(&self.account, stubs)? {
                match result {
                    Ok(f) => {
                        let id = f.id.clone().ok_or(Error::MissingFolderId)?;
                        map.insert(id.value, f);
                    }
                    Err(e) if e.is_missing_distinguished() => {
                        // Just a distinguished folder this server does not
                        // have, or one we are not allowed to see.
                        debug!("skipping absent distinguished folder: {e}");
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }

        for result in
            self.service
                .find_folders(&self.account, &self.folder, self.kind.traversal_depth())?
        {
            match result {
                Ok(f) => {
                    let id = f.id.clone().ok_or(Error::MissingFolderId)?;
                    // Already-present entries are distinguished folders;
                    // they keep their concrete kind.
                    map.entry(id.value).or_insert(f);
                }
                Err(e) if e.is_access_denied() => {
                    debug!("skipping unauthorized folder during traversal: {e}");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(map)
    }

    fn cached_children(&self, folder: &Folder) -> Result<Vec<Folder>> {
        let Some(folder_id) = folder.id.as_ref() else {
            return Ok(Vec::new());
        };
        self.ensure_cache()?;
        let borrow = self.subfolders.borrow();
        let Some(map) = borrow.as_ref() else {
            return Ok(Vec::new());
        };
        Ok(map
            .values()
            .filter(|f| {
                f.parent_id
                    .as_ref()
                    .is_some_and(|p| p.value == folder_id.value)
            })
            .cloned()
            .collect())
    }
}

/// Resolves the exact distinguished folder of `kind` for `account`.
fn resolve_distinguished(
    account: &Account,
    service: &dyn FolderService,
    kind: &'static FolderKind,
) -> Result<Folder> {
    let Some(distinguished_id) = kind.distinguished_id else {
        return Err(Error::MissingDistinguishedId(kind.name));
    };
    let stub = Folder::distinguished_stub(kind);
    let mut results = service.resolve(account, vec![stub])?;
    match results.drain(..).next() {
        Some(Ok(folder)) => Ok(folder),
        Some(Err(mailvane_ews::Error::FolderNotFound(_))) | None => Err(
            Error::DistinguishedFolderNotFound(distinguished_id.to_string()),
        ),
        Some(Err(e)) => Err(e.into()),
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::similar_names
)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    use mailvane_ews::Error as EwsError;

    use super::*;
    use crate::hierarchy::known_folders::{
        CONTACTS, GENERIC_FOLDER, INBOX, PUBLIC_FOLDERS_ROOT, RECIPIENT_CACHE,
    };
    use crate::hierarchy::service::Resolution;

    /// Scripted folder service. Each queue is popped once per call; an
    /// exhausted queue answers with an empty successful batch.
    #[derive(Default)]
    struct MockService {
        resolve_batches: RefCell<VecDeque<mailvane_ews::Result<Vec<Resolution>>>>,
        find_batches: RefCell<VecDeque<mailvane_ews::Result<Vec<Resolution>>>>,
        access_checks: RefCell<VecDeque<mailvane_ews::Result<()>>>,
        resolve_calls: Cell<usize>,
        find_calls: Cell<usize>,
        access_calls: Cell<usize>,
    }

    impl MockService {
        fn queue_resolve(&self, batch: mailvane_ews::Result<Vec<Resolution>>) {
            self.resolve_batches.borrow_mut().push_back(batch);
        }

        fn queue_find(&self, batch: mailvane_ews::Result<Vec<Resolution>>) {
            self.find_batches.borrow_mut().push_back(batch);
        }

        fn queue_access(&self, result: mailvane_ews::Result<()>) {
            self.access_checks.borrow_mut().push_back(result);
        }
    }

    impl FolderService for MockService {
        fn resolve(
            &self,
            _account: &Account,
            _stubs: Vec<Folder>,
        ) -> mailvane_ews::Result<Vec<Resolution>> {
            self.resolve_calls.set(self.resolve_calls.get() + 1);
            self.resolve_batches
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        fn find_folders(
            &self,
            _account: &Account,
            _parent: &Folder,
            _depth: TraversalDepth,
        ) -> mailvane_ews::Result<Vec<Resolution>> {
            self.find_calls.set(self.find_calls.get() + 1);
            self.find_batches
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        fn test_access(&self, _account: &Account, _folder: &Folder) -> mailvane_ews::Result<()> {
            self.access_calls.set(self.access_calls.get() + 1);
            self.access_checks.borrow_mut().pop_front().unwrap_or(Ok(()))
        }

        fn refresh_folder(
            &self,
            _account: &Account,
            folder: &Folder,
        ) -> mailvane_ews::Result<Folder> {
            let mut refreshed = folder.clone();
            refreshed.name = "refreshed".to_string();
            Ok(refreshed)
        }
    }

    fn account() -> Account {
        Account::new("user@example.com").with_locale("da_DK")
    }

    fn root_folder() -> Folder {
        Folder::new(&ROOT, "root")
            .with_id(FolderId::new("root-id"))
            .with_distinguished(true)
    }

    fn standard_root(service: &Rc<MockService>) -> RootOfHierarchy {
        RootOfHierarchy::from_folder(
            account(),
            Rc::clone(service) as Rc<dyn FolderService>,
            RootKind::Standard,
            root_folder(),
        )
    }

    fn public_root(service: &Rc<MockService>) -> RootOfHierarchy {
        let folder = Folder::new(&PUBLIC_FOLDERS_ROOT, "publicfoldersroot")
            .with_id(FolderId::new("pf-root-id"))
            .with_distinguished(true);
        RootOfHierarchy::from_folder(
            account(),
            Rc::clone(service) as Rc<dyn FolderService>,
            RootKind::PublicFolders,
            folder,
        )
    }

    fn child(kind: &'static FolderKind, id: &str, name: &str, parent: &str) -> Folder {
        Folder::new(kind, name)
            .with_id(FolderId::new(id))
            .with_parent(FolderId::new(parent))
    }

    mod cache_tests {
        use super::*;

        #[test]
        fn cache_contains_root_under_own_id() {
            let service = Rc::new(MockService::default());
            let root = standard_root(&service);
            let found = root.get_folder(&FolderId::new("root-id")).unwrap().unwrap();
            assert_eq!(found, *root.folder());
            assert!(root.is_cache_built());
        }

        #[test]
        fn distinguished_pass_takes_precedence() {
            let service = Rc::new(MockService::default());
            // The same folder comes back from the distinguished pass with
            // its concrete kind and from traversal as a generic folder.
            service.queue_resolve(Ok(vec![Ok(child(&INBOX, "inbox-id", "Inbox", "root-id")
                .with_distinguished(true))]));
            service.queue_find(Ok(vec![
                Ok(child(&GENERIC_FOLDER, "inbox-id", "Inbox", "root-id")),
                Ok(child(&GENERIC_FOLDER, "f1", "Projects", "root-id")),
            ]));
            let root = standard_root(&service);
            let inbox = root.get_folder(&FolderId::new("inbox-id")).unwrap().unwrap();
            assert_eq!(inbox.kind, &INBOX);
            assert!(inbox.is_distinguished);
            assert!(root.get_folder(&FolderId::new("f1")).unwrap().is_some());
        }

        #[test]
        fn absent_distinguished_folders_are_skipped() {
            let service = Rc::new(MockService::default());
            service.queue_resolve(Ok(vec![
                Err(EwsError::FolderNotFound("no journal here".into())),
                Err(EwsError::ItemNotFound("no notes either".into())),
                Err(EwsError::InvalidOperation("localized message".into())),
                Err(EwsError::NoPublicFolderReplica("none".into())),
                Err(EwsError::AccessDenied("hidden".into())),
            ]));
            let root = standard_root(&service);
            assert!(root.get_folder(&FolderId::new("root-id")).unwrap().is_some());
        }

        #[test]
        fn unexpected_error_in_distinguished_pass_fails() {
            let service = Rc::new(MockService::default());
            service.queue_resolve(Ok(vec![Err(EwsError::ServerFault {
                code: "ErrorInternalServerError".into(),
                message: "boom".into(),
            })]));
            let root = standard_root(&service);
            let err = root.get_folder(&FolderId::new("root-id")).unwrap_err();
            assert!(matches!(err, Error::Ews(EwsError::ServerFault { .. })));
            // The failed build leaves the cache unbuilt, so the next call
            // gets a clean retry.
            assert!(!root.is_cache_built());
            assert!(root.get_folder(&FolderId::new("root-id")).unwrap().is_some());
        }

        #[test]
        fn traversal_access_denied_is_skipped() {
            let service = Rc::new(MockService::default());
            service.queue_find(Ok(vec![
                Err(EwsError::AccessDenied("not yours".into())),
                Ok(child(&GENERIC_FOLDER, "f1", "Projects", "root-id")),
            ]));
            let root = standard_root(&service);
            assert!(root.get_folder(&FolderId::new("f1")).unwrap().is_some());
        }

        #[test]
        fn unexpected_traversal_error_fails() {
            let service = Rc::new(MockService::default());
            service.queue_find(Ok(vec![Err(EwsError::Transport("reset".into()))]));
            let root = standard_root(&service);
            assert!(matches!(
                root.get_folder(&FolderId::new("root-id")),
                Err(Error::Ews(EwsError::Transport(_)))
            ));
        }

        #[test]
        fn cache_is_built_once() {
            let service = Rc::new(MockService::default());
            let root = standard_root(&service);
            root.get_folder(&FolderId::new("a")).unwrap();
            root.get_folder(&FolderId::new("b")).unwrap();
            root.get_children(&root_folder()).unwrap();
            assert_eq!(service.resolve_calls.get(), 1);
            assert_eq!(service.find_calls.get(), 1);
        }

        #[test]
        fn clear_cache_triggers_rebuild_on_next_access() {
            let service = Rc::new(MockService::default());
            let root = standard_root(&service);
            root.get_folder(&FolderId::new("a")).unwrap();
            root.clear_cache();
            assert!(!root.is_cache_built());
            root.get_folder(&FolderId::new("a")).unwrap();
            assert_eq!(service.find_calls.get(), 2);
        }

        #[test]
        fn refresh_drops_cache_and_reloads_root() {
            let service = Rc::new(MockService::default());
            let mut root = standard_root(&service);
            root.get_folder(&FolderId::new("a")).unwrap();
            root.refresh().unwrap();
            assert!(!root.is_cache_built());
            assert_eq!(root.folder().name, "refreshed");
        }
    }

    mod index_tests {
        use super::*;

        #[test]
        fn add_then_get() {
            let service = Rc::new(MockService::default());
            let root = standard_root(&service);
            root.add_folder(child(&GENERIC_FOLDER, "f1", "Projects", "root-id"))
                .unwrap();
            let found = root.get_folder(&FolderId::new("f1")).unwrap().unwrap();
            assert_eq!(found.name, "Projects");
        }

        #[test]
        fn update_replaces_by_id() {
            let service = Rc::new(MockService::default());
            let root = standard_root(&service);
            root.add_folder(child(&GENERIC_FOLDER, "f1", "Projects", "root-id"))
                .unwrap();
            root.update_folder(child(&GENERIC_FOLDER, "f1", "Renamed", "root-id"))
                .unwrap();
            let found = root.get_folder(&FolderId::new("f1")).unwrap().unwrap();
            assert_eq!(found.name, "Renamed");
        }

        #[test]
        fn remove_then_get_is_none() {
            let service = Rc::new(MockService::default());
            let root = standard_root(&service);
            let folder = child(&GENERIC_FOLDER, "f1", "Projects", "root-id");
            root.add_folder(folder.clone()).unwrap();
            root.remove_folder(&folder).unwrap();
            assert!(root.get_folder(&FolderId::new("f1")).unwrap().is_none());
        }

        #[test]
        fn remove_of_absent_id_is_a_noop() {
            let service = Rc::new(MockService::default());
            let root = standard_root(&service);
            let folder = child(&GENERIC_FOLDER, "never-added", "X", "root-id");
            root.remove_folder(&folder).unwrap();
        }

        #[test]
        fn mutations_require_an_id() {
            let service = Rc::new(MockService::default());
            let root = standard_root(&service);
            let idless = Folder::new(&GENERIC_FOLDER, "Stray");
            assert!(matches!(
                root.add_folder(idless.clone()),
                Err(Error::MissingFolderId)
            ));
            assert!(matches!(
                root.update_folder(idless.clone()),
                Err(Error::MissingFolderId)
            ));
            assert!(matches!(
                root.remove_folder(&idless),
                Err(Error::MissingFolderId)
            ));
            // Nothing was built or mutated on the error path.
            assert!(!root.is_cache_built());
        }

        #[test]
        fn children_have_matching_parent_and_exclude_root() {
            let service = Rc::new(MockService::default());
            service.queue_find(Ok(vec![
                Ok(child(&GENERIC_FOLDER, "f1", "A", "root-id")),
                Ok(child(&GENERIC_FOLDER, "f2", "B", "root-id")),
                Ok(child(&GENERIC_FOLDER, "f3", "C", "f1")),
            ]));
            let root = standard_root(&service);
            let children = root.get_children(root.folder()).unwrap();
            assert_eq!(children.len(), 2);
            for c in &children {
                assert_eq!(c.parent_id.as_ref().unwrap().value, "root-id");
            }
            let grandchildren = root
                .get_children(&child(&GENERIC_FOLDER, "f1", "A", "root-id"))
                .unwrap();
            assert_eq!(grandchildren.len(), 1);
            assert_eq!(grandchildren[0].name, "C");
        }
    }

    mod distinguished_tests {
        use super::*;

        #[test]
        fn get_distinguished_fetches_the_root() {
            let service = Rc::new(MockService::default());
            service.queue_resolve(Ok(vec![Ok(root_folder())]));
            let root = RootOfHierarchy::get_distinguished(
                account(),
                Rc::clone(&service) as Rc<dyn FolderService>,
                RootKind::Standard,
            )
            .unwrap();
            assert_eq!(root.folder().name, "root");
            assert!(!root.is_cache_built());
        }

        #[test]
        fn archive_requires_2010_sp1() {
            let service = Rc::new(MockService::default());
            let old_account = account().with_version(ExchangeVersion::Exchange2007Sp1);
            let err = RootOfHierarchy::get_distinguished(
                old_account,
                Rc::clone(&service) as Rc<dyn FolderService>,
                RootKind::Archive,
            )
            .unwrap_err();
            assert!(matches!(
                err,
                Error::UnsupportedVersion {
                    what: "ArchiveRoot",
                    required: ExchangeVersion::Exchange2010Sp1,
                }
            ));
            assert_eq!(service.resolve_calls.get(), 0);
        }

        #[test]
        fn kind_without_distinguished_id_is_a_caller_error() {
            let service = Rc::new(MockService::default());
            let root = standard_root(&service);
            assert!(matches!(
                root.resolve_distinguished(&GENERIC_FOLDER),
                Err(Error::MissingDistinguishedId("Folder"))
            ));
            assert!(matches!(
                root.get_default_folder(&GENERIC_FOLDER),
                Err(Error::MissingDistinguishedId("Folder"))
            ));
        }

        #[test]
        fn not_found_is_translated() {
            let service = Rc::new(MockService::default());
            service.queue_resolve(Ok(vec![Err(EwsError::FolderNotFound("gone".into()))]));
            let root = standard_root(&service);
            assert!(matches!(
                root.resolve_distinguished(&INBOX),
                Err(Error::DistinguishedFolderNotFound(id)) if id == "inbox"
            ));
        }
    }

    mod default_folder_tests {
        use super::*;

        #[test]
        fn prefers_cached_distinguished_instance() {
            let service = Rc::new(MockService::default());
            service.queue_find(Ok(vec![Ok(child(&INBOX, "inbox-id", "Inbox", "root-id")
                .with_distinguished(true))]));
            let root = standard_root(&service);
            // Build the cache, then resolve the default folder from it.
            root.get_folder(&FolderId::new("inbox-id")).unwrap();
            let resolve_calls = service.resolve_calls.get();
            let inbox = root.get_default_folder(&INBOX).unwrap();
            assert_eq!(inbox.id.unwrap().value, "inbox-id");
            assert_eq!(service.resolve_calls.get(), resolve_calls);
        }

        #[test]
        fn exact_kind_never_matches_a_specialization() {
            let service = Rc::new(MockService::default());
            service.queue_find(Ok(vec![Ok(child(
                &RECIPIENT_CACHE,
                "rc-id",
                "RecipientCache",
                "root-id",
            )
            .with_distinguished(true))]));
            let root = standard_root(&service);
            root.get_folder(&FolderId::new("rc-id")).unwrap();
            // A distinguished RecipientCache is cached, but it must not
            // satisfy a request for the Contacts default folder.
            let err = root.get_default_folder(&CONTACTS).unwrap_err();
            assert!(matches!(err, Error::NoUsableDefaultFolder("Contacts")));
        }

        #[test]
        fn resolves_explicitly_when_cache_is_cold() {
            let service = Rc::new(MockService::default());
            service.queue_resolve(Ok(vec![Ok(child(&INBOX, "inbox-id", "Inbox", "root-id")
                .with_distinguished(true))]));
            let root = standard_root(&service);
            let inbox = root.get_default_folder(&INBOX).unwrap();
            assert_eq!(inbox.id.unwrap().value, "inbox-id");
            // The cache is only built when a fallback needs it.
            assert!(!root.is_cache_built());
            assert_eq!(service.find_calls.get(), 0);
        }

        #[test]
        fn access_denied_falls_back_to_probe() {
            let service = Rc::new(MockService::default());
            service.queue_resolve(Ok(vec![Err(EwsError::AccessDenied("no GetFolder".into()))]));
            service.queue_access(Ok(()));
            let root = standard_root(&service);
            let stub = root.get_default_folder(&INBOX).unwrap();
            assert!(stub.id.is_none());
            assert!(stub.is_distinguished);
            assert_eq!(stub.kind, &INBOX);
            assert_eq!(service.access_calls.get(), 1);
        }

        #[test]
        fn failed_probe_propagates() {
            let service = Rc::new(MockService::default());
            service.queue_resolve(Ok(vec![Err(EwsError::AccessDenied("no GetFolder".into()))]));
            service.queue_access(Err(EwsError::AccessDenied("no FindItem either".into())));
            let root = standard_root(&service);
            assert!(matches!(
                root.get_default_folder(&INBOX),
                Err(Error::Ews(EwsError::AccessDenied(_)))
            ));
        }

        #[test]
        fn fallback_finds_folder_with_distinguished_name() {
            let service = Rc::new(MockService::default());
            // Explicit resolution fails; the cache holds a Contacts folder
            // whose name follows the distinguished-name convention.
            service.queue_resolve(Ok(vec![Err(EwsError::FolderNotFound("gone".into()))]));
            service.queue_find(Ok(vec![Ok(child(
                &CONTACTS,
                "c-id",
                "Contacts",
                "root-id",
            ))]));
            let root = standard_root(&service);
            let found = root.get_default_folder(&CONTACTS).unwrap();
            assert_eq!(found.id.unwrap().value, "c-id");
        }

        #[test]
        fn fallback_prefers_tois_children_over_root_children() {
            let service = Rc::new(MockService::default());
            service.queue_resolve(Ok(vec![Err(EwsError::FolderNotFound("gone".into()))]));
            // Cache: TOIS below the root, a localized Contacts folder in
            // each. Neither carries the distinguished flag or name.
            service.queue_find(Ok(vec![
                Ok(
                    child(&MSG_FOLDER_ROOT, "tois-id", "Top of Information Store", "root-id")
                        .with_distinguished(true),
                ),
                Ok(child(&CONTACTS, "c-tois", "Personer", "tois-id")),
                Ok(child(&CONTACTS, "c-root", "Kontakter", "root-id")),
            ]));
            let root = standard_root(&service);
            let found = root.get_default_folder(&CONTACTS).unwrap();
            assert_eq!(found.id.unwrap().value, "c-tois");
        }

        #[test]
        fn fallback_prefers_distinguished_over_localized_name() {
            let service = Rc::new(MockService::default());
            service.queue_resolve(Ok(vec![Err(EwsError::FolderNotFound("gone".into()))]));
            service.queue_find(Ok(vec![
                Ok(
                    child(&MSG_FOLDER_ROOT, "tois-id", "Top of Information Store", "root-id")
                        .with_distinguished(true),
                ),
                Ok(child(&CONTACTS, "c-flag", "Whatever", "tois-id").with_distinguished(true)),
                Ok(child(&CONTACTS, "c-name", "Personer", "tois-id")),
            ]));
            let root = standard_root(&service);
            let found = root.get_default_folder(&CONTACTS).unwrap();
            assert_eq!(found.id.unwrap().value, "c-flag");
        }

        #[test]
        fn fallback_uses_root_children_when_tois_is_missing() {
            let service = Rc::new(MockService::default());
            // Both the requested kind and TOIS fail to resolve
            // explicitly; the empty default batches below stand in for
            // the server answering "not found" to both.
            service.queue_find(Ok(vec![Ok(child(
                &CONTACTS,
                "c-root",
                "Personer",
                "root-id",
            ))]));
            let root = standard_root(&service);
            let found = root.get_default_folder(&CONTACTS).unwrap();
            assert_eq!(found.id.unwrap().value, "c-root");
        }

        #[test]
        fn ambiguous_candidates_are_a_hard_error() {
            let service = Rc::new(MockService::default());
            service.queue_resolve(Ok(vec![Err(EwsError::FolderNotFound("gone".into()))]));
            service.queue_find(Ok(vec![
                Ok(
                    child(&MSG_FOLDER_ROOT, "tois-id", "Top of Information Store", "root-id")
                        .with_distinguished(true),
                ),
                Ok(child(&CONTACTS, "c1", "One", "tois-id").with_distinguished(true)),
                Ok(child(&CONTACTS, "c2", "Two", "tois-id").with_distinguished(true)),
            ]));
            let root = standard_root(&service);
            let err = root.get_default_folder(&CONTACTS).unwrap_err();
            match err {
                Error::AmbiguousDefaultFolder { kind, candidates } => {
                    assert_eq!(kind, "Contacts");
                    assert_eq!(candidates.len(), 2);
                    assert!(candidates.contains(&"One".to_string()));
                    assert!(candidates.contains(&"Two".to_string()));
                }
                other => panic!("expected ambiguity error, got {other:?}"),
            }
        }

        #[test]
        fn no_fallback_outside_the_primary_hierarchy() {
            let service = Rc::new(MockService::default());
            let root = public_root(&service);
            // Resolution fails; public folder roots never fall back to
            // name searches.
            assert!(matches!(
                root.get_default_folder(&CONTACTS),
                Err(Error::NoUsableDefaultFolder("Contacts"))
            ));
            assert_eq!(service.find_calls.get(), 0);
        }
    }

    mod public_folder_tests {
        use super::*;

        fn seeded_public_root(service: &Rc<MockService>) -> RootOfHierarchy {
            // Top-level listing is shallow; pf1 claims children, pf2 has
            // none.
            service.queue_find(Ok(vec![
                Ok(child(&GENERIC_FOLDER, "pf1", "Teams", "pf-root-id")
                    .with_child_folder_count(2)),
                Ok(child(&GENERIC_FOLDER, "pf2", "Announcements", "pf-root-id")
                    .with_child_folder_count(0)),
            ]));
            public_root(service)
        }

        #[test]
        fn zero_child_count_never_queries_the_service() {
            let service = Rc::new(MockService::default());
            let root = seeded_public_root(&service);
            let pf2 = root.get_folder(&FolderId::new("pf2")).unwrap().unwrap();
            let find_calls = service.find_calls.get();
            assert!(root.get_children(&pf2).unwrap().is_empty());
            assert_eq!(service.find_calls.get(), find_calls);
        }

        #[test]
        fn unknown_children_are_fetched_and_merged() {
            let service = Rc::new(MockService::default());
            let root = seeded_public_root(&service);
            let pf1 = root.get_folder(&FolderId::new("pf1")).unwrap().unwrap();
            service.queue_find(Ok(vec![
                Ok(child(&GENERIC_FOLDER, "pf1a", "Alpha", "pf1")),
                Ok(child(&GENERIC_FOLDER, "pf1b", "Beta", "pf1")),
            ]));
            let children = root.get_children(&pf1).unwrap();
            assert_eq!(children.len(), 2);
            // The fetched children are now cached.
            assert!(root.get_folder(&FolderId::new("pf1a")).unwrap().is_some());
            let find_calls = service.find_calls.get();
            assert_eq!(root.get_children(&pf1).unwrap().len(), 2);
            assert_eq!(service.find_calls.get(), find_calls);
        }

        #[test]
        fn access_denied_on_fetch_yields_nothing() {
            let service = Rc::new(MockService::default());
            let root = seeded_public_root(&service);
            let pf1 = root.get_folder(&FolderId::new("pf1")).unwrap().unwrap();
            service.queue_find(Err(EwsError::AccessDenied("members only".into())));
            assert!(root.get_children(&pf1).unwrap().is_empty());
        }

        #[test]
        fn unexpected_fetch_error_propagates() {
            let service = Rc::new(MockService::default());
            let root = seeded_public_root(&service);
            let pf1 = root.get_folder(&FolderId::new("pf1")).unwrap().unwrap();
            service.queue_find(Ok(vec![Err(EwsError::Transport("reset".into()))]));
            assert!(matches!(
                root.get_children(&pf1),
                Err(Error::Ews(EwsError::Transport(_)))
            ));
        }
    }

    mod folder_name_tests {
        use super::*;

        #[test]
        fn localized_name_resolves_to_kind() {
            let kind = RootKind::Standard
                .folder_kind_from_folder_name("Indbakke", "da_DK")
                .unwrap();
            assert_eq!(kind, &INBOX);
        }

        #[test]
        fn unknown_name_is_an_error() {
            assert!(matches!(
                RootKind::Standard.folder_kind_from_folder_name("Nonsense", "da_DK"),
                Err(Error::UnknownFolderName(name)) if name == "Nonsense"
            ));
        }

        #[test]
        fn non_deleteable_folders_are_searched_too() {
            let kind = RootKind::Standard
                .folder_kind_from_folder_name("Common Views", "en_US")
                .unwrap();
            assert_eq!(kind.name, "CommonViews");
        }
    }
}
