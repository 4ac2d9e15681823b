//! Host that keeps a ticker fed from a session source.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::HeroConfig;
use crate::error::Result;
use crate::lineup::Lineup;
use crate::source::{SessionPoller, SessionSource};
use crate::ticker::{Clock, HeroSink, HeroTicker};

/// Owns the poller and the ticker for one hero display.
///
/// Each [`refresh`](HeroWatcher::refresh) re-fetches everything; if the
/// featured session changed (including any of its fields) the ticker's input
/// is replaced whole.
pub struct HeroWatcher<S: SessionSource> {
    poller: SessionPoller<S>,
    ticker: HeroTicker,
    lineup: Lineup,
}

impl<S: SessionSource> HeroWatcher<S> {
    /// Fetches once, then starts ticking. Fails if the first fetch fails.
    pub fn start<K>(source: S, config: HeroConfig, clock: Arc<dyn Clock>, sink: K) -> Result<Self>
    where
        K: HeroSink + 'static,
    {
        let mut poller = SessionPoller::new(source);
        let lineup = poller.poll_once()?.lineup;
        info!(
            featured = ?lineup.featured.as_ref().and_then(|s| s.id.as_deref()),
            others = lineup.others.len(),
            "Hero watcher started"
        );

        let ticker = HeroTicker::start(lineup.featured.clone(), config, clock, sink);
        Ok(Self {
            poller,
            ticker,
            lineup,
        })
    }

    /// Re-fetches rows. Returns whether anything changed. On error the
    /// current lineup stays on screen.
    pub fn refresh(&mut self) -> Result<bool> {
        let refresh = self.poller.poll_once()?;
        if !refresh.changed {
            return Ok(false);
        }

        if refresh.lineup.featured != self.lineup.featured {
            debug!(
                featured = ?refresh.lineup.featured.as_ref().and_then(|s| s.id.as_deref()),
                "Featured session changed"
            );
            self.ticker.replace(refresh.lineup.featured.clone());
        }
        self.lineup = refresh.lineup;
        Ok(true)
    }

    pub fn lineup(&self) -> &Lineup {
        &self.lineup
    }

    pub fn source(&self) -> &S {
        self.poller.source()
    }

    pub fn stop(&mut self) {
        self.ticker.stop();
    }
}
