//! XML (de)serialization of out-of-office settings.
//!
//! The wire shape is the `UserOofSettings` structure: an `OofState` and
//! `ExternalAudience` choice element each, an optional `Duration` with
//! `StartTime`/`EndTime`, and `InternalReply`/`ExternalReply` wrappers
//! around a `Message` element. Namespace prefixes on the input are
//! ignored; output uses the `t:` types prefix throughout.

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::model::{ExternalAudience, OofSettings, OofState};
use super::validation::OofError;

impl OofSettings {
    /// Serializes these settings as a `t:UserOofSettings` fragment,
    /// validating them first.
    ///
    /// The `t:Duration` element is emitted whenever any part of the period
    /// is set. Both reply wrappers are always emitted; an unset reply is
    /// sent as an empty message so the server clears any stored one.
    ///
    /// # Errors
    ///
    /// Returns the validation error from [`clean`](Self::clean), or an
    /// [`OofError::Xml`] if serialization itself fails.
    pub fn to_xml(&self) -> Result<String, OofError> {
        self.clean()?;
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Start(BytesStart::new("t:UserOofSettings")))?;
        write_text_element(&mut writer, "t:OofState", self.state.api_name())?;
        write_text_element(
            &mut writer,
            "t:ExternalAudience",
            self.external_audience.api_name(),
        )?;
        if self.start.is_some() || self.end.is_some() {
            writer.write_event(Event::Start(BytesStart::new("t:Duration")))?;
            if let Some(start) = self.start {
                write_text_element(&mut writer, "t:StartTime", &format_time(start))?;
            }
            if let Some(end) = self.end {
                write_text_element(&mut writer, "t:EndTime", &format_time(end))?;
            }
            writer.write_event(Event::End(BytesEnd::new("t:Duration")))?;
        }
        for (tag, reply) in [
            ("t:InternalReply", &self.internal_reply),
            ("t:ExternalReply", &self.external_reply),
        ] {
            writer.write_event(Event::Start(BytesStart::new(tag)))?;
            write_text_element(&mut writer, "t:Message", reply.as_deref().unwrap_or(""))?;
            writer.write_event(Event::End(BytesEnd::new(tag)))?;
        }
        writer.write_event(Event::End(BytesEnd::new("t:UserOofSettings")))?;
        String::from_utf8(writer.into_inner()).map_err(|e| OofError::Malformed(e.to_string()))
    }

    /// Parses settings out of an `OofSettings`/`UserOofSettings` response
    /// fragment.
    ///
    /// Only `OofState` is required; everything else falls back to its
    /// unset or default value. No validation is applied, because the
    /// server may legitimately return a period that has already passed.
    ///
    /// # Errors
    ///
    /// Returns [`OofError::MissingElement`] if the state is absent,
    /// [`OofError::InvalidChoice`] or [`OofError::InvalidTimestamp`] for
    /// unparseable element values, or [`OofError::Xml`] for broken XML.
    pub fn from_xml(xml: &str) -> Result<Self, OofError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut path: Vec<String> = Vec::new();
        let mut state: Option<OofState> = None;
        let mut external_audience = ExternalAudience::default();
        let mut start: Option<DateTime<Utc>> = None;
        let mut end: Option<DateTime<Utc>> = None;
        let mut internal_reply: Option<String> = None;
        let mut external_reply: Option<String> = None;

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => path.push(element_name(e.local_name().as_ref())?),
                Event::End(_) => {
                    path.pop();
                }
                Event::Text(t) => {
                    let text = t.unescape()?.into_owned();
                    let current = path.last().map_or("", String::as_str);
                    let parent = path
                        .len()
                        .checked_sub(2)
                        .and_then(|i| path.get(i))
                        .map_or("", String::as_str);
                    match (parent, current) {
                        (_, "OofState") => {
                            state = Some(OofState::from_api_name(&text).ok_or_else(|| {
                                OofError::InvalidChoice {
                                    field: "OofState",
                                    value: text.clone(),
                                }
                            })?);
                        }
                        (_, "ExternalAudience") => {
                            external_audience = ExternalAudience::from_api_name(&text)
                                .ok_or_else(|| OofError::InvalidChoice {
                                    field: "ExternalAudience",
                                    value: text.clone(),
                                })?;
                        }
                        ("Duration", "StartTime") => start = Some(parse_time(&text)?),
                        ("Duration", "EndTime") => end = Some(parse_time(&text)?),
                        ("InternalReply", "Message") => internal_reply = Some(text),
                        ("ExternalReply", "Message") => external_reply = Some(text),
                        _ => {}
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        let state = state.ok_or(OofError::MissingElement("OofState"))?;
        Ok(Self {
            state,
            external_audience,
            start,
            end,
            internal_reply,
            external_reply,
        })
    }
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    tag: &str,
    text: &str,
) -> Result<(), OofError> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn element_name(local: &[u8]) -> Result<String, OofError> {
    String::from_utf8(local.to_vec()).map_err(|e| OofError::Malformed(e.to_string()))
}

fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn parse_time(text: &str) -> Result<DateTime<Utc>, OofError> {
    DateTime::parse_from_rfc3339(text)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| OofError::InvalidTimestamp(text.to_string()))
}
