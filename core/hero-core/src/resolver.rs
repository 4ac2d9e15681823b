//! Hero card status resolution.
//!
//! Maps one session row and the current time onto what the hero card shows:
//! a phase, the call-to-action, an optional status badge and an optional
//! countdown.
//!
//! # Classification
//!
//! With `diff = scheduled_start - now`, the first matching rule wins:
//!
//! ```text
//! LIVE               status == Live  OR  -grace < diff <= 0
//! UPCOMING_FAR       diff > imminent
//! UPCOMING_IMMINENT  0 < diff <= imminent
//! ENDED              otherwise
//! ```
//!
//! The explicit flag always wins, but a session is also shown as live for the
//! grace window after its start so a late flag flip doesn't hide the join link.
//!
//! Everything here is pure: the same `(session, now)` always yields the same
//! state, and nothing is remembered between calls.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{HeroConfig, Labels};
use crate::countdown::Countdown;
use crate::error::Result;
use crate::types::{SessionRecord, SessionStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Live,
    UpcomingFar,
    UpcomingImminent,
    Ended,
}

impl Phase {
    pub fn shows_countdown(self) -> bool {
        matches!(self, Phase::UpcomingFar | Phase::UpcomingImminent)
    }
}

/// Classification windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub live_grace: Duration,
    pub imminent_window: Duration,
}

impl Default for Thresholds {
    fn default() -> Self {
        HeroConfig::default().thresholds()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cta {
    pub enabled: bool,
    pub label: String,
    pub target: Option<String>,
    /// Pulsing treatment used while the join link is actionable.
    pub emphasized: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayState {
    pub phase: Phase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<Countdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_label: Option<String>,
    pub cta: Cta,
}

/// Classifies a session from its stored flag and the time left until its start.
pub fn classify(
    status: Option<SessionStatus>,
    until_start: Duration,
    thresholds: &Thresholds,
) -> Phase {
    let diff_ms = until_start.num_milliseconds();
    let grace_ms = thresholds.live_grace.num_milliseconds();
    let imminent_ms = thresholds.imminent_window.num_milliseconds();

    if status == Some(SessionStatus::Live) || (diff_ms <= 0 && diff_ms > -grace_ms) {
        Phase::Live
    } else if diff_ms > imminent_ms {
        Phase::UpcomingFar
    } else if diff_ms > 0 {
        Phase::UpcomingImminent
    } else {
        Phase::Ended
    }
}

/// Resolves the display state of `session` at `now`.
///
/// Fails only when the scheduled start is missing or unparsable.
pub fn resolve(
    session: &SessionRecord,
    now: DateTime<Utc>,
    thresholds: &Thresholds,
    labels: &Labels,
) -> Result<DisplayState> {
    let start = session.scheduled_start()?;
    let phase = classify(
        session.status,
        start.signed_duration_since(now),
        thresholds,
    );

    let remaining = phase
        .shows_countdown()
        .then(|| Countdown::until(start, now));

    let (status_label, cta) = match phase {
        Phase::Live => (
            Some(labels.live_now.clone()),
            Cta {
                enabled: true,
                label: labels.join_now.clone(),
                target: session.join_link().map(str::to_string),
                emphasized: true,
            },
        ),
        Phase::UpcomingFar => (
            None,
            Cta {
                enabled: false,
                label: labels.coming_soon.clone(),
                target: None,
                emphasized: false,
            },
        ),
        Phase::UpcomingImminent => (
            None,
            Cta {
                enabled: true,
                label: labels.prepare_to_join.clone(),
                target: session.join_link().map(str::to_string),
                emphasized: true,
            },
        ),
        Phase::Ended => {
            let cta = match session.recording() {
                Some(link) => Cta {
                    enabled: true,
                    label: labels.watch_recording.clone(),
                    target: Some(link.to_string()),
                    emphasized: false,
                },
                None => Cta {
                    enabled: false,
                    label: labels.ended.clone(),
                    target: None,
                    emphasized: false,
                },
            };
            (Some(labels.ended_status.clone()), cta)
        }
    };

    Ok(DisplayState {
        phase,
        remaining,
        status_label,
        cta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HeroError;

    const JOIN: &str = "https://meet.example.com/abc";
    const RECORDING: &str = "https://videos.example.com/abc";

    fn session_at(start: DateTime<Utc>, status: Option<SessionStatus>) -> SessionRecord {
        SessionRecord {
            id: Some("s1".to_string()),
            topic: "Fractions".to_string(),
            subject: "Math".to_string(),
            session_time: Some(start.to_rfc3339()),
            status,
            session_link: Some(JOIN.to_string()),
            recording_link: None,
        }
    }

    fn resolve_at(session: &SessionRecord, now: DateTime<Utc>) -> DisplayState {
        resolve(session, now, &Thresholds::default(), &Labels::default()).unwrap()
    }

    fn offsets() -> Vec<Duration> {
        let mut offsets = Vec::new();
        for minutes in [-24 * 60, -120, -61, -60, -59, -10, -1, 0, 1, 5, 10, 11, 15, 600] {
            offsets.push(Duration::minutes(minutes));
        }
        offsets.push(Duration::milliseconds(1));
        offsets.push(Duration::milliseconds(-1));
        offsets.push(Duration::minutes(-60) + Duration::milliseconds(1));
        offsets.push(Duration::minutes(10) + Duration::milliseconds(1));
        offsets
    }

    #[test]
    fn test_live_flag_always_wins() {
        let thresholds = Thresholds::default();
        for offset in offsets() {
            assert_eq!(
                classify(Some(SessionStatus::Live), offset, &thresholds),
                Phase::Live,
                "offset {:?}",
                offset
            );
        }
    }

    #[test]
    fn test_grace_window_is_live_without_flag() {
        let thresholds = Thresholds::default();
        for status in [
            None,
            Some(SessionStatus::Upcoming),
            Some(SessionStatus::Ended),
            Some(SessionStatus::Unrecognized),
        ] {
            for offset in offsets() {
                let diff_ms = offset.num_milliseconds();
                if diff_ms <= 0 && diff_ms > -3_600_000 {
                    assert_eq!(classify(status, offset, &thresholds), Phase::Live);
                }
            }
        }
    }

    #[test]
    fn test_window_boundaries() {
        let t = Thresholds::default();
        let upcoming = Some(SessionStatus::Upcoming);
        assert_eq!(classify(upcoming, Duration::zero(), &t), Phase::Live);
        assert_eq!(classify(upcoming, Duration::minutes(-60), &t), Phase::Ended);
        assert_eq!(
            classify(upcoming, Duration::minutes(-60) + Duration::milliseconds(1), &t),
            Phase::Live
        );
        assert_eq!(classify(upcoming, Duration::milliseconds(1), &t), Phase::UpcomingImminent);
        assert_eq!(classify(upcoming, Duration::minutes(10), &t), Phase::UpcomingImminent);
        assert_eq!(
            classify(upcoming, Duration::minutes(10) + Duration::milliseconds(1), &t),
            Phase::UpcomingFar
        );
    }

    #[test]
    fn test_far_upcoming_disables_cta() {
        let now = Utc::now();
        for minutes in [11, 15, 60, 60 * 24 * 3] {
            let session = session_at(now + Duration::minutes(minutes), Some(SessionStatus::Upcoming));
            let state = resolve_at(&session, now);
            assert_eq!(state.phase, Phase::UpcomingFar);
            assert!(!state.cta.enabled);
            assert_eq!(state.cta.target, None);
            assert!(state.remaining.is_some());
        }
    }

    #[test]
    fn test_imminent_enables_cta() {
        let now = Utc::now();
        for seconds in [1, 60, 300, 600] {
            let session = session_at(now + Duration::seconds(seconds), Some(SessionStatus::Upcoming));
            let state = resolve_at(&session, now);
            assert_eq!(state.phase, Phase::UpcomingImminent);
            assert!(state.cta.enabled);
        }
    }

    #[test]
    fn test_ended_cta_follows_recording_link() {
        let now = Utc::now();
        let mut session = session_at(now - Duration::minutes(90), Some(SessionStatus::Ended));

        let state = resolve_at(&session, now);
        assert_eq!(state.phase, Phase::Ended);
        assert!(!state.cta.enabled);

        session.recording_link = Some(RECORDING.to_string());
        let state = resolve_at(&session, now);
        assert_eq!(state.phase, Phase::Ended);
        assert!(state.cta.enabled);
        assert_eq!(state.cta.label, Labels::default().watch_recording);
        assert_eq!(state.cta.target.as_deref(), Some(RECORDING));
        assert!(state.remaining.is_none());
    }

    #[test]
    fn test_scenario_fifteen_minutes_out() {
        let now = Utc::now();
        let session = session_at(now + Duration::minutes(15), Some(SessionStatus::Upcoming));
        let state = resolve_at(&session, now);

        assert_eq!(state.phase, Phase::UpcomingFar);
        assert!(!state.cta.enabled);
        assert_eq!(state.cta.label, "قريباً...");
        assert_eq!(state.status_label, None);
        assert_eq!(state.remaining.map(|c| c.to_string()).as_deref(), Some("00:00:15:00"));
    }

    #[test]
    fn test_scenario_five_minutes_out() {
        let now = Utc::now();
        let session = session_at(now + Duration::minutes(5), Some(SessionStatus::Upcoming));
        let state = resolve_at(&session, now);

        assert_eq!(state.phase, Phase::UpcomingImminent);
        assert!(state.cta.enabled);
        assert!(state.cta.emphasized);
        assert_eq!(state.cta.target.as_deref(), Some(JOIN));
    }

    #[test]
    fn test_scenario_started_without_flag_update() {
        let now = Utc::now();
        let session = session_at(now - Duration::minutes(10), Some(SessionStatus::Upcoming));
        let state = resolve_at(&session, now);

        assert_eq!(state.phase, Phase::Live);
        assert!(state.cta.enabled);
        assert_eq!(state.cta.label, Labels::default().join_now);
        assert_eq!(state.cta.target.as_deref(), Some(JOIN));
        assert_eq!(state.status_label, Some(Labels::default().live_now));
        assert!(state.remaining.is_none());
    }

    #[test]
    fn test_scenario_ended_without_recording() {
        let now = Utc::now();
        let session = session_at(now - Duration::hours(2), Some(SessionStatus::Ended));
        let state = resolve_at(&session, now);

        assert_eq!(state.phase, Phase::Ended);
        assert!(!state.cta.enabled);
        assert_eq!(state.cta.label, Labels::default().ended);
        assert_eq!(state.cta.target, None);
        assert_eq!(state.status_label, Some(Labels::default().ended_status));
    }

    #[test]
    fn test_live_without_link_keeps_cta_enabled() {
        let now = Utc::now();
        let mut session = session_at(now + Duration::hours(5), Some(SessionStatus::Live));
        session.session_link = None;

        let state = resolve_at(&session, now);
        assert_eq!(state.phase, Phase::Live);
        assert!(state.cta.enabled);
        assert_eq!(state.cta.target, None);
    }

    #[test]
    fn test_unrecognized_status_uses_time_only() {
        let now = Utc::now();
        let session = session_at(now + Duration::minutes(30), Some(SessionStatus::Unrecognized));
        assert_eq!(resolve_at(&session, now).phase, Phase::UpcomingFar);

        let session = session_at(now - Duration::hours(3), None);
        assert_eq!(resolve_at(&session, now).phase, Phase::Ended);
    }

    #[test]
    fn test_bad_start_is_an_error() {
        let now = Utc::now();
        let mut session = session_at(now, Some(SessionStatus::Live));
        session.session_time = Some("soon".to_string());

        let result = resolve(&session, now, &Thresholds::default(), &Labels::default());
        assert!(matches!(result, Err(HeroError::InvalidScheduledStart { .. })));

        session.session_time = None;
        let result = resolve(&session, now, &Thresholds::default(), &Labels::default());
        assert!(matches!(result, Err(HeroError::MissingScheduledStart)));
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = Thresholds {
            live_grace: Duration::minutes(90),
            imminent_window: Duration::minutes(30),
        };
        let upcoming = Some(SessionStatus::Upcoming);
        assert_eq!(classify(upcoming, Duration::minutes(-75), &thresholds), Phase::Live);
        assert_eq!(
            classify(upcoming, Duration::minutes(20), &thresholds),
            Phase::UpcomingImminent
        );
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let now = Utc::now();
        let session = session_at(now + Duration::minutes(7), Some(SessionStatus::Upcoming));
        assert_eq!(resolve_at(&session, now), resolve_at(&session, now));
    }
}
