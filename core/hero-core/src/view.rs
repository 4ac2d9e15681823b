//! What a render target receives on every tick.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::HeroConfig;
use crate::resolver::{resolve, DisplayState};
use crate::types::SessionRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HeroView {
    /// Nothing upcoming or live. Not an error.
    NoSessions { title: String, hint: String },
    /// The featured session's data can't be classified. Countdown stops.
    Unavailable { message: String },
    Featured {
        topic: String,
        subject: String,
        display: DisplayState,
    },
}

impl HeroView {
    pub fn display(&self) -> Option<&DisplayState> {
        match self {
            HeroView::Featured { display, .. } => Some(display),
            _ => None,
        }
    }
}

/// Builds the hero view for the featured session at `now`.
pub fn render_hero(
    featured: Option<&SessionRecord>,
    now: DateTime<Utc>,
    config: &HeroConfig,
) -> HeroView {
    let labels = &config.labels;
    let Some(session) = featured else {
        return HeroView::NoSessions {
            title: labels.no_sessions_title.clone(),
            hint: labels.no_sessions_hint.clone(),
        };
    };

    match resolve(session, now, &config.thresholds(), labels) {
        Ok(display) => HeroView::Featured {
            topic: session.topic.clone(),
            subject: session.subject.clone(),
            display,
        },
        Err(err) => {
            tracing::warn!(
                session_id = ?session.id,
                error = %err,
                "Featured session can't be classified"
            );
            HeroView::Unavailable {
                message: labels.unavailable.clone(),
            }
        }
    }
}
