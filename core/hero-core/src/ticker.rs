//! Owned, cancellable timer that drives the hero card.
//!
//! One worker thread per ticker. It renders immediately, then once per tick
//! interval, each time building a fresh [`HeroView`] from the current featured
//! session and `clock.now()`. Nothing carries over between ticks.
//!
//! The featured session is swapped whole through [`HeroTicker::replace`]; the
//! swap lands between ticks, renders at once and restarts the cadence. Dropping
//! the ticker stops and joins the worker, so a host that replaces its ticker
//! never has two timers driving the same display.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, trace, warn};

use crate::config::HeroConfig;
use crate::types::SessionRecord;
use crate::view::{render_hero, HeroView};

/// Source of "now" for tick evaluation.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut guard = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *guard += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Render target for hero views.
pub trait HeroSink: Send {
    fn render(&mut self, view: &HeroView);
}

impl<F> HeroSink for F
where
    F: FnMut(&HeroView) + Send,
{
    fn render(&mut self, view: &HeroView) {
        self(view)
    }
}

enum Command {
    Replace(Option<SessionRecord>),
    Stop,
}

pub struct HeroTicker {
    commands: Sender<Command>,
    worker: Option<JoinHandle<()>>,
}

impl HeroTicker {
    /// Starts ticking for `featured`. The first render happens right away.
    pub fn start<S>(
        featured: Option<SessionRecord>,
        config: HeroConfig,
        clock: Arc<dyn Clock>,
        sink: S,
    ) -> Self
    where
        S: HeroSink + 'static,
    {
        let (commands, inbox) = mpsc::channel();
        let worker = thread::spawn(move || run_ticks(featured, config, clock, sink, inbox));

        Self {
            commands,
            worker: Some(worker),
        }
    }

    /// Swaps the featured session. Takes effect before the next tick.
    pub fn replace(&self, featured: Option<SessionRecord>) {
        if self.commands.send(Command::Replace(featured)).is_err() {
            warn!("Hero ticker is not running; replacement dropped");
        }
    }

    /// Stops the worker and waits for it to exit. Calling it again is a no-op.
    pub fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };

        let _ = self.commands.send(Command::Stop);
        if worker.join().is_err() {
            warn!("Hero ticker worker panicked");
        }
    }

    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .map(|worker| !worker.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for HeroTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_ticks<S: HeroSink>(
    mut featured: Option<SessionRecord>,
    config: HeroConfig,
    clock: Arc<dyn Clock>,
    mut sink: S,
    inbox: mpsc::Receiver<Command>,
) {
    let interval = config.tick_interval();
    let mut next_tick = Instant::now();
    let mut ticks: u64 = 0;

    loop {
        let wait = next_tick.saturating_duration_since(Instant::now());
        match inbox.recv_timeout(wait) {
            Ok(Command::Replace(session)) => {
                debug!(
                    session_id = ?session.as_ref().and_then(|s| s.id.as_deref()),
                    "Featured session replaced"
                );
                featured = session;
                next_tick = Instant::now();
                continue;
            }
            Ok(Command::Stop) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }

        let tick_started = Instant::now();
        let view = render_hero(featured.as_ref(), clock.now(), &config);
        sink.render(&view);

        ticks = ticks.wrapping_add(1);
        trace!(ticks, "Hero tick rendered");
        next_tick = tick_started + interval;
    }

    debug!(ticks, "Hero ticker stopped");
}
