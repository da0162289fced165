//! # mailvane-core
//!
//! Core client-side logic for Exchange mailbox access.
//!
//! This crate provides:
//! - **Folder hierarchy roots** ([`RootOfHierarchy`]): a lazily built,
//!   invalidatable cache of an entire folder tree, indexed by folder id
//! - **Distinguished folder resolution**: well-known folders (Inbox,
//!   Calendar, ...) resolved explicitly, from the cache, or through a chain
//!   of fallback searches over localized folder names
//! - **Public folder support**: on-demand child discovery for hierarchies
//!   that forbid deep traversal
//! - **Out-of-office settings** ([`OofSettings`]): a validated value object
//!   with the server's own normalization quirks baked into its equality
//!
//! Network transport and SOAP envelope handling are collaborators consumed
//! through the [`FolderService`] trait; this crate performs no I/O.

pub mod account;
pub mod hierarchy;
pub mod oof;

mod error;

pub use account::Account;
pub use error::{Error, Result};
pub use hierarchy::known_folders;
pub use hierarchy::{Folder, FolderKind, FolderService, Resolution, RootKind, RootOfHierarchy};
pub use oof::{ExternalAudience, OofError, OofSettings, OofState};
