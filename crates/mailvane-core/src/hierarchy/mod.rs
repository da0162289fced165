//! Folder hierarchy caching and resolution.
//!
//! A mailbox exposes one or more folder *hierarchies* (the primary mailbox,
//! public folders, the archive mailbox), each rooted at a special folder.
//! [`RootOfHierarchy`] caches and indexes the whole tree below such a root
//! and resolves well-known ("distinguished") folders against it.

pub mod known_folders;

mod model;
mod root;
mod service;

pub use model::{Folder, FolderKind};
pub use root::{RootKind, RootOfHierarchy};
pub use service::{FolderService, Resolution};
