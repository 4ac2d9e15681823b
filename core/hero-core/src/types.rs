//! Session rows as delivered by the backend, plus timestamp parsing.
//!
//! The hero card only ever reads these rows. Field names follow the
//! `sessions` table so a query result can be deserialized directly.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{HeroError, Result};

/// Status flag set by staff on the session row.
///
/// Values outside the three known flags deserialize to `Unrecognized` and are
/// treated as if no flag was set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Upcoming,
    Live,
    Ended,
    #[serde(other)]
    Unrecognized,
}

impl SessionStatus {
    /// Whether the row is eligible for the hero card and schedule.
    pub fn is_candidate(self) -> bool {
        matches!(self, SessionStatus::Upcoming | SessionStatus::Live)
    }
}

/// One row of the `sessions` table.
///
/// Deserialization never rejects a row over a single odd field: numeric ids
/// become text, and a status that is not a string reads as `Unrecognized`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SessionRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub topic: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub subject: String,
    /// Raw scheduled start. Kept unparsed so a bad value surfaces at
    /// resolution time instead of dropping the whole batch.
    #[serde(default)]
    pub session_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<SessionStatus>,
    #[serde(default)]
    pub session_link: Option<String>,
    #[serde(default)]
    pub recording_link: Option<String>,
}

impl SessionRecord {
    /// Parsed scheduled start of the session.
    pub fn scheduled_start(&self) -> Result<DateTime<Utc>> {
        let raw = self
            .session_time
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .ok_or(HeroError::MissingScheduledStart)?;

        parse_session_time(raw).ok_or_else(|| HeroError::InvalidScheduledStart {
            raw: raw.to_string(),
        })
    }

    /// Whether the stored flag explicitly says the session is live.
    pub fn is_flagged_live(&self) -> bool {
        self.status == Some(SessionStatus::Live)
    }

    pub fn is_candidate(&self) -> bool {
        self.status.map(SessionStatus::is_candidate).unwrap_or(false)
    }

    /// Recording link, ignoring blank strings.
    pub fn recording(&self) -> Option<&str> {
        non_blank(self.recording_link.as_deref())
    }

    /// Join link, ignoring blank strings.
    pub fn join_link(&self) -> Option<&str> {
        non_blank(self.session_link.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    })
}

fn text_or_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

fn lenient_status<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<SessionStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(
            serde_json::from_value(Value::String(text)).unwrap_or(SessionStatus::Unrecognized),
        ),
        _ => Some(SessionStatus::Unrecognized),
    })
}

/// Parses a scheduled start in any of the forms the backend emits.
///
/// Accepts RFC 3339, the Postgres text form (`2025-09-10 14:00:00+00`), and a
/// naive date-time which is taken as UTC.
pub fn parse_session_time(raw: &str) -> Option<DateTime<Utc>> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"] {
        if let Ok(dt) = DateTime::parse_from_str(value, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(naive.and_utc());
        }
    }

    None
}
