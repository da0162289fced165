//! Folder traversal depth.

use serde::{Deserialize, Serialize};

/// How far a folder listing descends below its starting folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraversalDepth {
    /// Direct children only.
    Shallow,
    /// The entire subtree.
    Deep,
}

impl TraversalDepth {
    /// Wire name used in the `FindFolder` Traversal attribute.
    #[must_use]
    pub const fn api_name(self) -> &'static str {
        match self {
            Self::Shallow => "Shallow",
            Self::Deep => "Deep",
        }
    }
}

impl std::fmt::Display for TraversalDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.api_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_names() {
        assert_eq!(TraversalDepth::Shallow.api_name(), "Shallow");
        assert_eq!(TraversalDepth::Deep.api_name(), "Deep");
    }
}
