//! Folder identifiers.

use serde::{Deserialize, Serialize};

/// Opaque server-assigned folder identifier.
///
/// The `value` identifies the folder for its whole lifetime. The change key
/// is a version token that the server rotates on every modification; two
/// ids with the same `value` and different change keys refer to the same
/// folder. Caches must therefore key on `value` alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FolderId {
    /// Stable opaque identifier.
    pub value: String,
    /// Change key, if the server supplied one.
    pub changekey: Option<String>,
}

impl FolderId {
    /// Creates an id without a change key.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            changekey: None,
        }
    }

    /// Creates an id with a change key.
    #[must_use]
    pub fn with_changekey(value: impl Into<String>, changekey: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            changekey: Some(changekey.into()),
        }
    }

    /// Whether two ids name the same folder, ignoring the change key.
    #[must_use]
    pub fn same_folder(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl std::fmt::Display for FolderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_folder_ignores_changekey() {
        let a = FolderId::with_changekey("AAMk", "CQAAABY1");
        let b = FolderId::with_changekey("AAMk", "CQAAABY2");
        let c = FolderId::new("AAMl");
        assert!(a.same_folder(&b));
        assert!(!a.same_folder(&c));
    }

    #[test]
    fn display_is_value_only() {
        let id = FolderId::with_changekey("AAMk", "CQAAABY1");
        assert_eq!(format!("{id}"), "AAMk");
    }
}
