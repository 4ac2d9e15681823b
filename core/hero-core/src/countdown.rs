//! Countdown to a session's scheduled start.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Time remaining until a target, split into display fields.
///
/// Each field is floored from the total distance independently, so the
/// fields never borrow from one another. A target in the past yields zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    total_ms: i64,
}

impl Countdown {
    pub fn until(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self::from_millis(target.signed_duration_since(now).num_milliseconds())
    }

    pub fn from_millis(distance_ms: i64) -> Self {
        if distance_ms < 0 {
            return Self::default();
        }

        Self {
            days: distance_ms / MS_PER_DAY,
            hours: (distance_ms % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (distance_ms % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (distance_ms % MS_PER_MINUTE) / MS_PER_SECOND,
            total_ms: distance_ms,
        }
    }

    /// Remaining distance in milliseconds, floored at zero.
    pub fn total_millis(&self) -> i64 {
        self.total_ms
    }

    pub fn is_zero(&self) -> bool {
        self.total_ms == 0
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}
