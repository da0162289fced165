//! Integration tests for folder hierarchy resolution.
//!
//! These tests drive the public API against an in-memory folder service
//! simulating a small mailbox, without a real server connection.

#![allow(clippy::unwrap_used)]

use std::rc::Rc;

use mailvane_core::known_folders::{
    self, CALENDAR, CONTACTS, INBOX, JOURNAL, MSG_FOLDER_ROOT, PUBLIC_FOLDERS_ROOT, ROOT,
};
use mailvane_core::{
    Account, Error, Folder, FolderService, Resolution, RootKind, RootOfHierarchy,
};
use mailvane_ews::{FolderId, TraversalDepth};

/// In-memory mailbox answering folder service calls from a fixed tree.
///
/// Resolution answers distinguished stubs with the stored folder,
/// including its concrete kind. Traversal simulates the wire: results
/// carry only what the server would send, so kinds are re-derived from
/// the container class and the distinguished flag is absent.
struct InMemoryMailbox {
    folders: Vec<Folder>,
}

impl InMemoryMailbox {
    fn wire_view(folder: &Folder) -> Folder {
        let mut view = Folder::new(
            known_folders::kind_from_container_class(folder.folder_class.as_deref()),
            folder.name.clone(),
        );
        view.id = folder.id.clone();
        view.parent_id = folder.parent_id.clone();
        view.folder_class = folder.folder_class.clone();
        view.child_folder_count = folder.child_folder_count;
        view
    }

    fn direct_children(&self, parent_id: &str) -> Vec<&Folder> {
        self.folders
            .iter()
            .filter(|f| {
                f.parent_id
                    .as_ref()
                    .is_some_and(|p| p.value == parent_id)
            })
            .collect()
    }

    fn descendants(&self, root_id: &str) -> Vec<&Folder> {
        let mut frontier = vec![root_id.to_string()];
        let mut out = Vec::new();
        while let Some(id) = frontier.pop() {
            for folder in self.direct_children(&id) {
                frontier.push(folder.id.clone().unwrap().value);
                out.push(folder);
            }
        }
        out
    }
}

impl FolderService for InMemoryMailbox {
    fn resolve(
        &self,
        _account: &Account,
        stubs: Vec<Folder>,
    ) -> mailvane_ews::Result<Vec<Resolution>> {
        Ok(stubs
            .iter()
            .map(|stub| {
                self.folders
                    .iter()
                    .find(|f| f.is_distinguished && f.kind == stub.kind)
                    .cloned()
                    .ok_or_else(|| {
                        mailvane_ews::Error::FolderNotFound(format!(
                            "no distinguished folder {}",
                            stub.name
                        ))
                    })
            })
            .collect())
    }

    fn find_folders(
        &self,
        _account: &Account,
        parent: &Folder,
        depth: TraversalDepth,
    ) -> mailvane_ews::Result<Vec<Resolution>> {
        let Some(parent_id) = parent.id.as_ref() else {
            return Ok(Vec::new());
        };
        let found = match depth {
            TraversalDepth::Shallow => self.direct_children(&parent_id.value),
            TraversalDepth::Deep => self.descendants(&parent_id.value),
        };
        Ok(found.into_iter().map(|f| Ok(Self::wire_view(f))).collect())
    }

    fn test_access(&self, _account: &Account, _folder: &Folder) -> mailvane_ews::Result<()> {
        Ok(())
    }

    fn refresh_folder(
        &self,
        _account: &Account,
        folder: &Folder,
    ) -> mailvane_ews::Result<Folder> {
        Ok(folder.clone())
    }
}

fn folder(
    kind: &'static mailvane_core::FolderKind,
    id: &str,
    name: &str,
    parent: Option<&str>,
) -> Folder {
    let mut f = Folder::new(kind, name).with_id(FolderId::new(id));
    if let Some(parent) = parent {
        f = f.with_parent(FolderId::new(parent));
    }
    f
}

/// A primary mailbox: root, TOIS, distinguished Inbox and Calendar, a
/// localized contacts folder without the distinguished flag, and a plain
/// mail folder.
fn standard_mailbox() -> Rc<InMemoryMailbox> {
    Rc::new(InMemoryMailbox {
        folders: vec![
            folder(&ROOT, "root-id", "root", None).with_distinguished(true),
            folder(
                &MSG_FOLDER_ROOT,
                "tois-id",
                "Top of Information Store",
                Some("root-id"),
            )
            .with_distinguished(true),
            folder(&INBOX, "inbox-id", "Indbakke", Some("tois-id")).with_distinguished(true),
            folder(&CALENDAR, "cal-id", "Kalender", Some("tois-id")).with_distinguished(true),
            folder(&CONTACTS, "contacts-id", "Personer", Some("tois-id")),
            folder(&known_folders::GENERIC_FOLDER, "misc-id", "Projects", Some("tois-id")),
        ],
    })
}

fn standard_root(mailbox: &Rc<InMemoryMailbox>) -> RootOfHierarchy {
    let account = Account::new("user@example.com").with_locale("da_DK");
    RootOfHierarchy::get_distinguished(
        account,
        Rc::clone(mailbox) as Rc<dyn FolderService>,
        RootKind::Standard,
    )
    .unwrap()
}

#[test]
fn distinguished_folders_keep_their_kind_through_discovery() {
    let mailbox = standard_mailbox();
    let root = standard_root(&mailbox);
    // Traversal reports the inbox as a plain IPF.Note folder; the
    // distinguished pass must win.
    let inbox = root.get_folder(&FolderId::new("inbox-id")).unwrap().unwrap();
    assert_eq!(inbox.kind, &INBOX);
    assert!(inbox.is_distinguished);
    assert_eq!(inbox.name, "Indbakke");
    // The plain folder keeps its traversal identity.
    let misc = root.get_folder(&FolderId::new("misc-id")).unwrap().unwrap();
    assert!(!misc.is_distinguished);
}

#[test]
fn children_come_from_the_cache() {
    let mailbox = standard_mailbox();
    let root = standard_root(&mailbox);
    let tois = root.tois().unwrap();
    let children = root.get_children(&tois).unwrap();
    let mut names: Vec<&str> = children.iter().map(|f| f.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, ["Indbakke", "Kalender", "Personer", "Projects"]);
}

#[test]
fn default_folders_resolve_directly() {
    let mailbox = standard_mailbox();
    let root = standard_root(&mailbox);
    let inbox = root.get_default_folder(&INBOX).unwrap();
    assert_eq!(inbox.id.unwrap().value, "inbox-id");
    let calendar = root.get_default_folder(&CALENDAR).unwrap();
    assert_eq!(calendar.id.unwrap().value, "cal-id");
}

#[test]
fn default_folder_falls_back_to_localized_name_search() {
    let mailbox = standard_mailbox();
    let root = standard_root(&mailbox);
    // No distinguished contacts folder exists; the localized name under
    // TOIS identifies it.
    let contacts = root.get_default_folder(&CONTACTS).unwrap();
    assert_eq!(contacts.id.unwrap().value, "contacts-id");
    assert_eq!(contacts.name, "Personer");
}

#[test]
fn missing_default_folder_is_reported() {
    let mailbox = standard_mailbox();
    let root = standard_root(&mailbox);
    assert!(matches!(
        root.get_default_folder(&JOURNAL),
        Err(Error::NoUsableDefaultFolder("Journal"))
    ));
}

#[test]
fn cache_survives_and_rebuilds_after_invalidation() {
    let mailbox = standard_mailbox();
    let root = standard_root(&mailbox);
    assert!(root.get_folder(&FolderId::new("cal-id")).unwrap().is_some());
    root.clear_cache();
    assert!(!root.is_cache_built());
    assert!(root.get_folder(&FolderId::new("cal-id")).unwrap().is_some());
}

/// A public folder hierarchy: two top-level folders, one with a subtree.
fn public_mailbox() -> Rc<InMemoryMailbox> {
    Rc::new(InMemoryMailbox {
        folders: vec![
            folder(&PUBLIC_FOLDERS_ROOT, "pf-root", "publicfoldersroot", None)
                .with_distinguished(true),
            folder(&known_folders::GENERIC_FOLDER, "teams", "Teams", Some("pf-root"))
                .with_child_folder_count(2),
            folder(&known_folders::GENERIC_FOLDER, "ann", "Announcements", Some("pf-root"))
                .with_child_folder_count(0),
            folder(&known_folders::GENERIC_FOLDER, "teams-a", "Alpha", Some("teams"))
                .with_child_folder_count(0),
            folder(&known_folders::GENERIC_FOLDER, "teams-b", "Beta", Some("teams"))
                .with_child_folder_count(0),
        ],
    })
}

#[test]
fn public_folder_children_are_discovered_on_demand() {
    let mailbox = public_mailbox();
    let root = RootOfHierarchy::get_distinguished(
        Account::new("user@example.com"),
        Rc::clone(&mailbox) as Rc<dyn FolderService>,
        RootKind::PublicFolders,
    )
    .unwrap();

    // The initial shallow listing only sees the top level.
    let top: Vec<Folder> = root.get_children(root.folder()).unwrap();
    assert_eq!(top.len(), 2);
    assert!(root.get_folder(&FolderId::new("teams-a")).unwrap().is_none());

    // Asking for a subtree fetches and caches it.
    let teams = root.get_folder(&FolderId::new("teams")).unwrap().unwrap();
    let subtree = root.get_children(&teams).unwrap();
    let mut names: Vec<&str> = subtree.iter().map(|f| f.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, ["Alpha", "Beta"]);
    assert!(root.get_folder(&FolderId::new("teams-a")).unwrap().is_some());

    // A folder the server reported as empty is never queried again.
    let ann = root.get_folder(&FolderId::new("ann")).unwrap().unwrap();
    assert!(root.get_children(&ann).unwrap().is_empty());
}
