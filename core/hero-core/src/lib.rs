//! # hero-core
//!
//! Core library for the live-session hero card on the academy landing page:
//! which session is featured, whether it's live, upcoming or over, what the
//! call-to-action does, and how long until it starts.
//!
//! ## Design Principles
//!
//! - **Pure resolution**: [`resolve`] and [`render_hero`] depend only on the
//!   session row and the time passed in. No hidden state.
//! - **Owned timer**: [`HeroTicker`] is a value the host holds; dropping it
//!   stops the countdown.
//! - **Whole-input replacement**: data refreshes swap the featured session in
//!   one message, never a partial update.
//! - **Explicit data errors**: a session with a bad start time renders as
//!   unavailable instead of guessing a phase.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hero_core::{render_hero, HeroConfig, Lineup};
//!
//! let lineup = Lineup::from_sessions(rows);
//! let view = render_hero(lineup.featured.as_ref(), chrono::Utc::now(), &HeroConfig::default());
//! ```

pub mod config;
pub mod countdown;
pub mod error;
pub mod lineup;
pub mod resolver;
pub mod source;
pub mod ticker;
pub mod types;
pub mod view;
pub mod watcher;

pub use config::{load_config, load_config_from, save_config, save_config_to, HeroConfig, Labels};
pub use countdown::Countdown;
pub use error::{HeroError, Result};
pub use lineup::{select_featured, Lineup, ScheduleEntry, StatusTag};
pub use resolver::{classify, resolve, Cta, DisplayState, Phase, Thresholds};
pub use source::{JsonFileSource, Refresh, SessionPoller, SessionSource};
pub use ticker::{Clock, HeroSink, HeroTicker, ManualClock, SystemClock};
pub use types::{parse_session_time, SessionRecord, SessionStatus};
pub use view::{render_hero, HeroView};
pub use watcher::HeroWatcher;
