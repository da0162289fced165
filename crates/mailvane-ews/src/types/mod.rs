//! Core EWS types.
//!
//! The fundamental vocabulary shared by the folder cache and whatever
//! transport implementation feeds it.

mod identifiers;
mod traversal;
mod version;

pub use identifiers::FolderId;
pub use traversal::TraversalDepth;
pub use version::ExchangeVersion;
