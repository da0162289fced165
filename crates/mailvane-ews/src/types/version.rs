//! Exchange server version markers.

use serde::{Deserialize, Serialize};

/// Exchange server version, ordered from oldest to newest.
///
/// Well-known folders and whole hierarchies are gated on a minimum version;
/// the ordering of the variants is part of the contract.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum ExchangeVersion {
    /// Exchange 2007 RTM.
    Exchange2007,
    /// Exchange 2007 SP1.
    Exchange2007Sp1,
    /// Exchange 2010 RTM.
    Exchange2010,
    /// Exchange 2010 SP1.
    Exchange2010Sp1,
    /// Exchange 2010 SP2.
    Exchange2010Sp2,
    /// Exchange 2013.
    Exchange2013,
    /// Exchange 2013 SP1.
    Exchange2013Sp1,
    /// Exchange 2016 and later, including Exchange Online.
    #[default]
    Exchange2016,
}

impl ExchangeVersion {
    /// Wire name used in the `RequestServerVersion` SOAP header.
    #[must_use]
    pub const fn api_name(self) -> &'static str {
        match self {
            Self::Exchange2007 => "Exchange2007",
            Self::Exchange2007Sp1 => "Exchange2007_SP1",
            Self::Exchange2010 => "Exchange2010",
            Self::Exchange2010Sp1 => "Exchange2010_SP1",
            Self::Exchange2010Sp2 => "Exchange2010_SP2",
            Self::Exchange2013 => "Exchange2013",
            Self::Exchange2013Sp1 => "Exchange2013_SP1",
            Self::Exchange2016 => "Exchange2016",
        }
    }
}

impl std::fmt::Display for ExchangeVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.api_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_are_ordered() {
        assert!(ExchangeVersion::Exchange2007 < ExchangeVersion::Exchange2007Sp1);
        assert!(ExchangeVersion::Exchange2007Sp1 < ExchangeVersion::Exchange2010Sp1);
        assert!(ExchangeVersion::Exchange2010Sp1 < ExchangeVersion::Exchange2016);
    }

    #[test]
    fn api_names() {
        assert_eq!(
            ExchangeVersion::Exchange2010Sp1.api_name(),
            "Exchange2010_SP1"
        );
        assert_eq!(format!("{}", ExchangeVersion::Exchange2016), "Exchange2016");
    }

    #[test]
    fn default_is_newest() {
        assert_eq!(ExchangeVersion::default(), ExchangeVersion::Exchange2016);
    }
}
