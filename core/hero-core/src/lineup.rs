//! Featured-session selection and the schedule beneath the hero card.
//!
//! Only rows flagged `Upcoming` or `Live` take part. They're ordered by
//! scheduled start; the head is featured and the rest become schedule cards.
//! Equal starts keep their input order. Rows whose start can't be parsed sort
//! after every valid row, so they only reach the hero card when nothing else
//! qualifies, where they surface as "unavailable".

use std::fmt::Write as _;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::config::HeroConfig;
use crate::types::{SessionRecord, SessionStatus};

/// Sort key: valid starts ascending, unparsable ones last.
fn start_key(record: &SessionRecord) -> (bool, Option<DateTime<Utc>>) {
    let start = record.scheduled_start().ok();
    (start.is_none(), start)
}

/// Returns the session that belongs on the hero card, if any.
pub fn select_featured(sessions: &[SessionRecord]) -> Option<&SessionRecord> {
    // min_by_key keeps the first of equal keys
    sessions
        .iter()
        .filter(|record| record.is_candidate())
        .min_by_key(|record| start_key(record))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lineup {
    pub featured: Option<SessionRecord>,
    pub others: Vec<SessionRecord>,
}

impl Lineup {
    pub fn from_sessions(rows: Vec<SessionRecord>) -> Self {
        let mut candidates: Vec<SessionRecord> =
            rows.into_iter().filter(SessionRecord::is_candidate).collect();
        // Stable, and parses each start once.
        candidates.sort_by_cached_key(start_key);

        let mut iter = candidates.into_iter();
        let featured = iter.next();
        Self {
            featured,
            others: iter.collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.featured.is_none()
    }

    /// Schedule cards for every non-featured candidate, in start order.
    pub fn schedule(&self, config: &HeroConfig) -> Vec<ScheduleEntry> {
        self.others
            .iter()
            .map(|record| ScheduleEntry::from_record(record, config))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTag {
    Upcoming,
    Live,
    Ended,
}

impl StatusTag {
    /// Schedule tags follow the stored flag only; the time windows apply to the hero card.
    pub fn from_status(status: Option<SessionStatus>) -> Self {
        match status {
            Some(SessionStatus::Live) => StatusTag::Live,
            Some(SessionStatus::Ended) => StatusTag::Ended,
            _ => StatusTag::Upcoming,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub topic: String,
    pub subject: String,
    pub time_label: String,
    pub tag: StatusTag,
    pub tag_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording_link: Option<String>,
}

impl ScheduleEntry {
    pub fn from_record(record: &SessionRecord, config: &HeroConfig) -> Self {
        let labels = &config.labels;
        let tag = StatusTag::from_status(record.status);
        let tag_label = match tag {
            StatusTag::Upcoming => labels.upcoming.clone(),
            StatusTag::Live => labels.live_now.clone(),
            StatusTag::Ended => labels.ended_status.clone(),
        };
        let recording_link = match tag {
            StatusTag::Ended => record.recording().map(str::to_string),
            _ => None,
        };
        let time_label = match record.scheduled_start() {
            Ok(start) => format_start(start, config),
            Err(_) => labels.unavailable.clone(),
        };

        Self {
            topic: record.topic.clone(),
            subject: record.subject.clone(),
            time_label,
            tag,
            tag_label,
            recording_link,
        }
    }
}

/// Formats a start time for a schedule card. Falls back to RFC 3339 when the
/// configured format string is invalid.
pub fn format_start(start: DateTime<Utc>, config: &HeroConfig) -> String {
    let offset = FixedOffset::east_opt(config.utc_offset_minutes.saturating_mul(60))
        .unwrap_or_else(|| Utc.fix());
    let local = start.with_timezone(&offset);

    let mut out = String::new();
    if write!(out, "{}", local.format(&config.schedule_time_format)).is_err() {
        tracing::warn!(
            format = %config.schedule_time_format,
            "Invalid schedule time format"
        );
        return local.to_rfc3339();
    }
    out
}
