//! Plain-text rendering of hero views and schedule cards.

use std::io::{self, IsTerminal, Write};

use hero_core::{HeroConfig, HeroSink, HeroView, ScheduleEntry};

pub fn hero_line(view: &HeroView) -> String {
    match view {
        HeroView::NoSessions { title, hint } => format!("{} | {}", title, hint),
        HeroView::Unavailable { message } => message.clone(),
        HeroView::Featured {
            topic,
            subject,
            display,
        } => {
            let mut parts = vec![format!("{} - {}", topic, subject)];
            if let Some(label) = &display.status_label {
                parts.push(label.clone());
            }
            if let Some(remaining) = &display.remaining {
                parts.push(remaining.to_string());
            }

            let cta = match (&display.cta.target, display.cta.enabled) {
                (Some(target), true) => format!("[{}] {}", display.cta.label, target),
                (_, true) => format!("[{}]", display.cta.label),
                (_, false) => format!("({})", display.cta.label),
            };
            parts.push(cta);
            parts.join(" | ")
        }
    }
}

pub fn schedule_lines(entries: &[ScheduleEntry], config: &HeroConfig) -> Vec<String> {
    if entries.is_empty() {
        return vec![config.labels.no_other_sessions.clone()];
    }

    entries
        .iter()
        .map(|entry| {
            let mut line = format!(
                "[{}] {} - {} @ {}",
                entry.tag_label, entry.topic, entry.subject, entry.time_label
            );
            if let Some(link) = &entry.recording_link {
                line.push_str(&format!(" | {}: {}", config.labels.watch_recording, link));
            }
            line
        })
        .collect()
}

/// Writes one line per tick; on a terminal the line is rewritten in place.
pub struct TerminalSink {
    in_place: bool,
}

impl TerminalSink {
    pub fn new() -> Self {
        Self {
            in_place: io::stdout().is_terminal(),
        }
    }
}

impl Default for TerminalSink {
    fn default() -> Self {
        Self::new()
    }
}

impl HeroSink for TerminalSink {
    fn render(&mut self, view: &HeroView) {
        let line = hero_line(view);
        let mut stdout = io::stdout().lock();
        let result = if self.in_place {
            write!(stdout, "\r\x1b[2K{}", line).and_then(|_| stdout.flush())
        } else {
            writeln!(stdout, "{}", line)
        };
        if let Err(err) = result {
            tracing::warn!(error = %err, "Failed to write hero line");
        }
    }
}
