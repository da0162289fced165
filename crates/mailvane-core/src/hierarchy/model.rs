//! Folder data model.

use mailvane_ews::{ExchangeVersion, FolderId};

/// Static descriptor of a folder kind.
///
/// A kind is the client-side notion of a folder's concrete type: Inbox,
/// Calendar, RecipientCache, a plain mail folder, and so on. Kinds are
/// registered once as statics in [`known_folders`](super::known_folders)
/// and referenced by every [`Folder`].
///
/// Two kinds are equal only if they are the *same registry entry*; a
/// specialized kind sharing behavior with a general one (RecipientCache vs.
/// Contacts) never compares equal to it. Default-folder resolution relies
/// on this exactness.
#[derive(Debug)]
pub struct FolderKind {
    /// Registry name, unique across all kinds.
    pub name: &'static str,
    /// Well-known wire name, for kinds the server can address by logical
    /// name instead of opaque id.
    pub distinguished_id: Option<&'static str>,
    /// PR_CONTAINER_CLASS value the server tags folders of this kind with.
    pub container_class: Option<&'static str>,
    /// Whether the folder can be fetched with a folder lookup. Some system
    /// folders only answer item queries.
    pub get_folder_allowed: bool,
    /// Minimum server version that has this kind, if gated.
    pub supported_from: Option<ExchangeVersion>,
    /// Localized display names per locale, all lowercase.
    pub localized: &'static [(&'static str, &'static [&'static str])],
}

impl FolderKind {
    /// Whether this kind exists on servers of the given version.
    #[must_use]
    pub fn supports_version(&self, version: ExchangeVersion) -> bool {
        self.supported_from.is_none_or(|min| version >= min)
    }

    /// Lowercase localized display names of this kind for a locale.
    pub fn localized_names(&self, locale: &str) -> impl Iterator<Item = &'static str> + '_ {
        let locale = locale.to_string();
        self.localized
            .iter()
            .filter(move |(l, _)| l.eq_ignore_ascii_case(&locale))
            .flat_map(|(_, names)| names.iter().copied())
    }
}

impl PartialEq for FolderKind {
    fn eq(&self, other: &Self) -> bool {
        // Registry names are unique, so name equality is identity.
        self.name == other.name
    }
}

impl Eq for FolderKind {}

impl std::fmt::Display for FolderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A folder in a hierarchy.
///
/// The parent link is an id, not a reference: folders live inside their
/// hierarchy root's cache, and an owning back-reference would cycle with
/// it. Resolve parents by looking the id up in the owning root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    /// Server-assigned id. `None` for local stubs that have not been
    /// resolved against the service yet.
    pub id: Option<FolderId>,
    /// Id of the parent folder, if any. The root of a hierarchy has none.
    pub parent_id: Option<FolderId>,
    /// Concrete kind of this folder.
    pub kind: &'static FolderKind,
    /// Display name.
    pub name: String,
    /// Whether the server flagged this folder as distinguished.
    pub is_distinguished: bool,
    /// Raw container class reported by the server.
    pub folder_class: Option<String>,
    /// Number of direct child folders, if reported.
    pub child_folder_count: Option<u32>,
    /// Total item count, if reported.
    pub total_count: Option<u32>,
    /// Unread item count, if reported.
    pub unread_count: Option<u32>,
}

impl Folder {
    /// Creates a folder of the given kind with no server state.
    #[must_use]
    pub fn new(kind: &'static FolderKind, name: impl Into<String>) -> Self {
        Self {
            id: None,
            parent_id: None,
            kind,
            name: name.into(),
            is_distinguished: false,
            folder_class: kind.container_class.map(str::to_string),
            child_folder_count: None,
            total_count: None,
            unread_count: None,
        }
    }

    /// Creates the local stub used to request a distinguished folder by
    /// logical name. The stub has no id until resolved.
    #[must_use]
    pub fn distinguished_stub(kind: &'static FolderKind) -> Self {
        let mut folder = Self::new(kind, kind.distinguished_id.unwrap_or(kind.name));
        folder.is_distinguished = true;
        folder
    }

    /// Sets the folder id.
    #[must_use]
    pub fn with_id(mut self, id: FolderId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the parent folder id.
    #[must_use]
    pub fn with_parent(mut self, parent_id: FolderId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Sets the distinguished flag.
    #[must_use]
    pub const fn with_distinguished(mut self, is_distinguished: bool) -> Self {
        self.is_distinguished = is_distinguished;
        self
    }

    /// Sets the reported child folder count.
    #[must_use]
    pub const fn with_child_folder_count(mut self, count: u32) -> Self {
        self.child_folder_count = Some(count);
        self
    }

    /// Whether this folder's name is the distinguished-name convention for
    /// its kind, compared case-insensitively.
    #[must_use]
    pub fn has_distinguished_name(&self) -> bool {
        self.kind
            .distinguished_id
            .is_some_and(|d| self.name.eq_ignore_ascii_case(d))
    }
}

impl std::fmt::Display for Folder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::hierarchy::known_folders::{CONTACTS, INBOX, RECIPIENT_CACHE};

    #[test]
    fn kind_equality_is_exact() {
        // RecipientCache behaves like Contacts but must never match it.
        assert_eq!(&CONTACTS, &CONTACTS);
        assert_ne!(&CONTACTS, &RECIPIENT_CACHE);
    }

    #[test]
    fn distinguished_stub_shape() {
        let stub = Folder::distinguished_stub(&INBOX);
        assert!(stub.id.is_none());
        assert!(stub.is_distinguished);
        assert_eq!(stub.name, "inbox");
        assert_eq!(stub.kind, &INBOX);
    }

    #[test]
    fn has_distinguished_name_is_case_insensitive() {
        let mut folder = Folder::new(&INBOX, "Inbox");
        assert!(folder.has_distinguished_name());
        folder.name = "Indbakke".to_string();
        assert!(!folder.has_distinguished_name());
    }

    #[test]
    fn localized_names_lookup() {
        let names: Vec<_> = INBOX.localized_names("da_DK").collect();
        assert!(names.contains(&"indbakke"));
        assert_eq!(INBOX.localized_names("xx_XX").count(), 0);
    }

    #[test]
    fn version_gating() {
        use mailvane_ews::ExchangeVersion;
        assert!(RECIPIENT_CACHE.supports_version(ExchangeVersion::Exchange2013));
        assert!(!RECIPIENT_CACHE.supports_version(ExchangeVersion::Exchange2010Sp1));
        assert!(INBOX.supports_version(ExchangeVersion::Exchange2007));
    }
}
