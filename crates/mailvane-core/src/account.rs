//! Account session context.

use mailvane_ews::ExchangeVersion;
use serde::{Deserialize, Serialize};

/// The session context a folder hierarchy belongs to.
///
/// Carries the facts the cache and resolution logic need about the
/// authenticated session: whose mailbox this is, which server version the
/// service negotiated, and the locale used for localized folder-name
/// matching. The authenticated transport itself lives behind the
/// [`FolderService`](crate::hierarchy::FolderService) trait.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Primary SMTP address of the mailbox.
    pub email: String,
    /// Server version negotiated for this session.
    pub version: ExchangeVersion,
    /// Locale for localized folder names, e.g. `da_DK`.
    pub locale: String,
}

impl Account {
    /// Creates an account context with the default version and an `en_US`
    /// locale.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            version: ExchangeVersion::default(),
            locale: "en_US".to_string(),
        }
    }

    /// Sets the negotiated server version.
    #[must_use]
    pub const fn with_version(mut self, version: ExchangeVersion) -> Self {
        self.version = version;
        self
    }

    /// Sets the locale used for localized folder-name matching.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let account = Account::new("user@example.com");
        assert_eq!(account.version, ExchangeVersion::Exchange2016);
        assert_eq!(account.locale, "en_US");
        assert_eq!(format!("{account}"), "user@example.com");
    }

    #[test]
    fn builder_setters() {
        let account = Account::new("user@example.com")
            .with_version(ExchangeVersion::Exchange2010Sp1)
            .with_locale("da_DK");
        assert_eq!(account.version, ExchangeVersion::Exchange2010Sp1);
        assert_eq!(account.locale, "da_DK");
    }
}
