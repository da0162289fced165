//! # mailvane-ews
//!
//! Wire-level vocabulary for Exchange Web Services (EWS) clients.
//!
//! This crate defines the types a client-side folder cache needs to talk
//! *about* the remote service without talking *to* it:
//!
//! - **Folder identifiers**: opaque server-assigned ids with change keys
//! - **Server versions**: the ordered `ExchangeVersion` markers used to gate
//!   features and well-known folders
//! - **Traversal depth**: shallow vs. deep folder listing
//! - **Error taxonomy**: the remote error kinds that discovery and
//!   resolution logic must distinguish (skip silently, recover, or abort)
//!
//! The SOAP transport itself lives behind a collaborator trait in
//! `mailvane-core`; implementations of that trait produce and consume the
//! types defined here.

pub mod types;

mod error;

pub use error::{Error, Result};
pub use types::{ExchangeVersion, FolderId, TraversalDepth};
