//! Out-of-office (OOF) autoreply settings.
//!
//! [`OofSettings`] is a value object mirroring the server's
//! `UserOofSettings` structure, with cross-field validation and an equality
//! that ignores the fields the server normalizes away depending on the
//! autoreply state.

mod model;
mod validation;
mod xml;

pub use model::{ExternalAudience, OofSettings, OofState};
pub use validation::OofError;
