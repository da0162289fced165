//! Cross-field validation of out-of-office settings.

use chrono::Utc;
use thiserror::Error;

use super::model::{OofSettings, OofState};

/// Errors from validating or (de)serializing out-of-office settings.
#[derive(Debug, Error)]
pub enum OofError {
    /// The state is `Scheduled` but the period is incomplete.
    #[error("a start and end time are required when the state is Scheduled")]
    MissingSchedule,

    /// The scheduled period starts at or after its end.
    #[error("the start time must be before the end time")]
    StartNotBeforeEnd,

    /// The scheduled period ends in the past.
    #[error("the end time must be in the future")]
    EndInPast,

    /// Autoreplies are on but a reply message is missing.
    #[error("internal and external replies are required when the state is not Disabled")]
    MissingReplies,

    /// A required element was absent from the payload.
    #[error("missing required element {0}")]
    MissingElement(&'static str),

    /// An enumeration element carried a value outside its value set.
    #[error("invalid value {value:?} for {field}")]
    InvalidChoice {
        /// Element the value was read from.
        field: &'static str,
        /// The offending value.
        value: String,
    },

    /// A timestamp element could not be parsed.
    #[error("invalid timestamp {0:?}")]
    InvalidTimestamp(String),

    /// The payload was structurally broken.
    #[error("malformed out-of-office payload: {0}")]
    Malformed(String),

    /// The XML reader or writer failed.
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),
}

impl OofSettings {
    /// Validates cross-field consistency.
    ///
    /// A `Scheduled` state needs a complete, ordered period that has not
    /// already passed, and any state other than `Disabled` needs both
    /// reply messages set and non-empty.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule, in the order documented on the
    /// variants above.
    pub fn clean(&self) -> Result<(), OofError> {
        if self.state == OofState::Scheduled {
            let (Some(start), Some(end)) = (self.start, self.end) else {
                return Err(OofError::MissingSchedule);
            };
            if start >= end {
                return Err(OofError::StartNotBeforeEnd);
            }
            if end < Utc::now() {
                return Err(OofError::EndInPast);
            }
        }
        if self.state != OofState::Disabled
            && (self.internal_reply.as_deref().is_none_or(str::is_empty)
                || self.external_reply.as_deref().is_none_or(str::is_empty))
        {
            return Err(OofError::MissingReplies);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::oof::ExternalAudience;

    fn scheduled() -> OofSettings {
        OofSettings::new(OofState::Scheduled)
            .with_period(Utc::now() + Duration::days(1), Utc::now() + Duration::days(7))
            .with_internal_reply("ooo")
            .with_external_reply("ooo")
    }

    #[test]
    fn valid_settings_pass() {
        scheduled().clean().unwrap();
        OofSettings::disabled().clean().unwrap();
        OofSettings::new(OofState::Enabled)
            .with_internal_reply("ooo")
            .with_external_reply("ooo")
            .clean()
            .unwrap();
    }

    #[test]
    fn scheduled_requires_a_complete_period() {
        let mut settings = scheduled();
        settings.end = None;
        assert!(matches!(settings.clean(), Err(OofError::MissingSchedule)));
        settings.start = None;
        assert!(matches!(settings.clean(), Err(OofError::MissingSchedule)));
    }

    #[test]
    fn scheduled_period_must_be_ordered() {
        let mut settings = scheduled();
        std::mem::swap(&mut settings.start, &mut settings.end);
        assert!(matches!(settings.clean(), Err(OofError::StartNotBeforeEnd)));
        settings.end = settings.start;
        assert!(matches!(settings.clean(), Err(OofError::StartNotBeforeEnd)));
    }

    #[test]
    fn scheduled_period_must_not_be_over() {
        let settings = OofSettings::new(OofState::Scheduled)
            .with_period(Utc::now() - Duration::days(7), Utc::now() - Duration::days(1))
            .with_internal_reply("ooo")
            .with_external_reply("ooo");
        assert!(matches!(settings.clean(), Err(OofError::EndInPast)));
    }

    #[test]
    fn active_states_require_both_replies() {
        let settings = OofSettings::new(OofState::Enabled).with_internal_reply("ooo");
        assert!(matches!(settings.clean(), Err(OofError::MissingReplies)));
        let settings = OofSettings::new(OofState::Enabled).with_external_reply("ooo");
        assert!(matches!(settings.clean(), Err(OofError::MissingReplies)));
    }

    #[test]
    fn empty_replies_do_not_count() {
        let settings = OofSettings::new(OofState::Enabled)
            .with_external_audience(ExternalAudience::None)
            .with_internal_reply("")
            .with_external_reply("ooo");
        assert!(matches!(settings.clean(), Err(OofError::MissingReplies)));
    }

    #[test]
    fn disabled_needs_nothing() {
        let mut settings = OofSettings::disabled();
        settings.start = Some(Utc::now() + Duration::days(1));
        // An incomplete period does not matter when autoreplies are off.
        settings.clean().unwrap();
    }
}
