//! Out-of-office settings data model.

use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Autoreply state of a mailbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OofState {
    /// Autoreplies are on, regardless of any schedule.
    Enabled,
    /// Autoreplies are on only within the scheduled period.
    Scheduled,
    /// Autoreplies are off.
    Disabled,
}

impl OofState {
    /// Wire name of this state.
    #[must_use]
    pub const fn api_name(self) -> &'static str {
        match self {
            Self::Enabled => "Enabled",
            Self::Scheduled => "Scheduled",
            Self::Disabled => "Disabled",
        }
    }

    /// Parses a wire name back into a state.
    #[must_use]
    pub fn from_api_name(name: &str) -> Option<Self> {
        match name {
            "Enabled" => Some(Self::Enabled),
            "Scheduled" => Some(Self::Scheduled),
            "Disabled" => Some(Self::Disabled),
            _ => None,
        }
    }
}

impl std::fmt::Display for OofState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.api_name())
    }
}

/// Which external senders receive the external autoreply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExternalAudience {
    /// No external senders.
    None,
    /// Only senders in the user's contacts.
    Known,
    /// All external senders.
    #[default]
    All,
}

impl ExternalAudience {
    /// Wire name of this audience.
    #[must_use]
    pub const fn api_name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Known => "Known",
            Self::All => "All",
        }
    }

    /// Parses a wire name back into an audience.
    #[must_use]
    pub fn from_api_name(name: &str) -> Option<Self> {
        match name {
            "None" => Some(Self::None),
            "Known" => Some(Self::Known),
            "All" => Some(Self::All),
            _ => None,
        }
    }
}

impl std::fmt::Display for ExternalAudience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.api_name())
    }
}

/// Out-of-office autoreply settings of a mailbox.
///
/// Equality and hashing only consider the fields that matter for the
/// current [`state`](Self::state). The server clears or ignores the other
/// fields when storing the settings, so two values that differ only in
/// those fields produce the same server state and must compare equal:
///
/// - `Disabled`: only the state itself counts.
/// - `Enabled`: the schedule is ignored.
/// - `Scheduled`: every field counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OofSettings {
    /// Autoreply state.
    pub state: OofState,
    /// Which external senders get the external reply.
    pub external_audience: ExternalAudience,
    /// Start of the autoreply period, for `Scheduled`.
    pub start: Option<DateTime<Utc>>,
    /// End of the autoreply period, for `Scheduled`.
    pub end: Option<DateTime<Utc>>,
    /// Autoreply sent to senders inside the organization.
    pub internal_reply: Option<String>,
    /// Autoreply sent to senders outside the organization.
    pub external_reply: Option<String>,
}

/// Fields participating in comparison, in a fixed order.
type ComparisonKey<'a> = (
    OofState,
    Option<ExternalAudience>,
    Option<DateTime<Utc>>,
    Option<DateTime<Utc>>,
    Option<&'a str>,
    Option<&'a str>,
);

impl OofSettings {
    /// Settings with autoreplies turned off.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            state: OofState::Disabled,
            external_audience: ExternalAudience::All,
            start: None,
            end: None,
            internal_reply: None,
            external_reply: None,
        }
    }

    /// Settings with the given state and everything else unset.
    #[must_use]
    pub const fn new(state: OofState) -> Self {
        Self {
            state,
            external_audience: ExternalAudience::All,
            start: None,
            end: None,
            internal_reply: None,
            external_reply: None,
        }
    }

    /// Sets the external audience.
    #[must_use]
    pub const fn with_external_audience(mut self, audience: ExternalAudience) -> Self {
        self.external_audience = audience;
        self
    }

    /// Sets the autoreply period.
    #[must_use]
    pub const fn with_period(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Sets the internal autoreply message.
    #[must_use]
    pub fn with_internal_reply(mut self, reply: impl Into<String>) -> Self {
        self.internal_reply = Some(reply.into());
        self
    }

    /// Sets the external autoreply message.
    #[must_use]
    pub fn with_external_reply(mut self, reply: impl Into<String>) -> Self {
        self.external_reply = Some(reply.into());
        self
    }

    fn comparison_key(&self) -> ComparisonKey<'_> {
        match self.state {
            OofState::Disabled => (self.state, None, None, None, None, None),
            OofState::Enabled => (
                self.state,
                Some(self.external_audience),
                None,
                None,
                self.internal_reply.as_deref(),
                self.external_reply.as_deref(),
            ),
            OofState::Scheduled => (
                self.state,
                Some(self.external_audience),
                self.start,
                self.end,
                self.internal_reply.as_deref(),
                self.external_reply.as_deref(),
            ),
        }
    }
}

impl PartialEq for OofSettings {
    fn eq(&self, other: &Self) -> bool {
        self.comparison_key() == other.comparison_key()
    }
}

impl Eq for OofSettings {}

impl Hash for OofSettings {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.comparison_key().hash(state);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::hash::{DefaultHasher, Hash, Hasher};

    use chrono::TimeZone;
    use proptest::prelude::*;

    use super::*;

    fn hash_of(settings: &OofSettings) -> u64 {
        let mut hasher = DefaultHasher::new();
        settings.hash(&mut hasher);
        hasher.finish()
    }

    fn period() -> (DateTime<Utc>, DateTime<Utc>) {
        (
            Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2030, 1, 15, 17, 0, 0).unwrap(),
        )
    }

    mod equality_tests {
        use super::*;

        #[test]
        fn disabled_only_compares_the_state() {
            let (start, end) = period();
            let bare = OofSettings::disabled();
            let loaded = OofSettings::disabled()
                .with_external_audience(ExternalAudience::None)
                .with_period(start, end)
                .with_internal_reply("gone fishing")
                .with_external_reply("back soon");
            assert_eq!(bare, loaded);
            assert_eq!(hash_of(&bare), hash_of(&loaded));
        }

        #[test]
        fn enabled_ignores_the_schedule() {
            let (start, end) = period();
            let without = OofSettings::new(OofState::Enabled).with_internal_reply("ooo");
            let with = without.clone().with_period(start, end);
            assert_eq!(without, with);
            assert_eq!(hash_of(&without), hash_of(&with));
        }

        #[test]
        fn enabled_compares_replies_and_audience() {
            let a = OofSettings::new(OofState::Enabled).with_internal_reply("ooo");
            let b = OofSettings::new(OofState::Enabled).with_internal_reply("away");
            assert_ne!(a, b);
            let c = a.clone().with_external_audience(ExternalAudience::Known);
            assert_ne!(a, c);
        }

        #[test]
        fn scheduled_compares_everything() {
            let (start, end) = period();
            let a = OofSettings::new(OofState::Scheduled)
                .with_period(start, end)
                .with_internal_reply("ooo");
            let b = a.clone();
            assert_eq!(a, b);
            let later = a
                .clone()
                .with_period(start + chrono::Duration::hours(1), end);
            assert_ne!(a, later);
        }

        #[test]
        fn different_states_never_compare_equal() {
            assert_ne!(
                OofSettings::new(OofState::Enabled),
                OofSettings::new(OofState::Disabled)
            );
        }
    }

    mod wire_name_tests {
        use super::*;

        #[test]
        fn state_names_round_trip() {
            for state in [OofState::Enabled, OofState::Scheduled, OofState::Disabled] {
                assert_eq!(OofState::from_api_name(state.api_name()), Some(state));
            }
            assert_eq!(OofState::from_api_name("enabled"), None);
        }

        #[test]
        fn audience_names_round_trip() {
            for audience in [
                ExternalAudience::None,
                ExternalAudience::Known,
                ExternalAudience::All,
            ] {
                assert_eq!(
                    ExternalAudience::from_api_name(audience.api_name()),
                    Some(audience)
                );
            }
            assert_eq!(ExternalAudience::from_api_name("Everyone"), None);
        }
    }

    fn arb_settings() -> impl Strategy<Value = OofSettings> {
        (
            prop_oneof![
                Just(OofState::Enabled),
                Just(OofState::Scheduled),
                Just(OofState::Disabled),
            ],
            prop_oneof![
                Just(ExternalAudience::None),
                Just(ExternalAudience::Known),
                Just(ExternalAudience::All),
            ],
            proptest::option::of(0i64..4_000_000_000),
            proptest::option::of(0i64..4_000_000_000),
            proptest::option::of("[a-z ]{0,12}"),
            proptest::option::of("[a-z ]{0,12}"),
        )
            .prop_map(|(state, audience, start, end, internal, external)| {
                OofSettings {
                    state,
                    external_audience: audience,
                    start: start.and_then(|s| DateTime::from_timestamp(s, 0)),
                    end: end.and_then(|s| DateTime::from_timestamp(s, 0)),
                    internal_reply: internal,
                    external_reply: external,
                }
            })
    }

    proptest! {
        #[test]
        fn equality_is_reflexive(settings in arb_settings()) {
            prop_assert_eq!(&settings, &settings);
        }

        #[test]
        fn disabled_values_are_all_equal(a in arb_settings(), b in arb_settings()) {
            let mut a = a;
            let mut b = b;
            a.state = OofState::Disabled;
            b.state = OofState::Disabled;
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(hash_of(&a), hash_of(&b));
        }

        #[test]
        fn enabled_schedule_is_irrelevant(
            settings in arb_settings(),
            start in proptest::option::of(0i64..4_000_000_000i64),
        ) {
            let mut a = settings;
            a.state = OofState::Enabled;
            let mut b = a.clone();
            b.start = start.and_then(|s| DateTime::from_timestamp(s, 0));
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(hash_of(&a), hash_of(&b));
        }

        #[test]
        fn equal_values_hash_identically(a in arb_settings(), b in arb_settings()) {
            if a == b {
                prop_assert_eq!(hash_of(&a), hash_of(&b));
            }
        }
    }
}
