//! Where session rows come from, and change detection between fetches.
//!
//! The backend query is abstracted behind [`SessionSource`]. Every poll is a
//! full re-fetch; the poller compares it with the previous fetch and hands
//! back a complete [`Lineup`] so the host can replace the ticker's input in
//! one step rather than merging deltas.

use std::path::{Path, PathBuf};

use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

use crate::error::{HeroError, Result};
use crate::lineup::Lineup;
use crate::types::SessionRecord;

pub trait SessionSource: Send + Sync {
    fn fetch(&self) -> Result<Vec<SessionRecord>>;
}

impl SessionSource for Vec<SessionRecord> {
    fn fetch(&self) -> Result<Vec<SessionRecord>> {
        Ok(self.clone())
    }
}

/// Reads rows from a JSON export: either a bare array or `{ "sessions": [...] }`.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SessionsFile {
    Rows(Vec<SessionRecord>),
    Wrapped { sessions: Vec<SessionRecord> },
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionSource for JsonFileSource {
    fn fetch(&self) -> Result<Vec<SessionRecord>> {
        let content = fs::read_to_string(&self.path).map_err(|source| HeroError::SourceRead {
            path: self.path.clone(),
            source,
        })?;

        let parsed: SessionsFile =
            serde_json::from_str(&content).map_err(|source| HeroError::SourceParse {
                path: self.path.clone(),
                source,
            })?;

        Ok(match parsed {
            SessionsFile::Rows(rows) => rows,
            SessionsFile::Wrapped { sessions } => sessions,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refresh {
    pub lineup: Lineup,
    /// True on the first poll and whenever the fetched rows differ from the last poll.
    pub changed: bool,
}

#[derive(Debug)]
pub struct SessionPoller<S: SessionSource> {
    source: S,
    previous: Option<Vec<SessionRecord>>,
}

impl<S: SessionSource> SessionPoller<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            previous: None,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches once. On error the previous rows are kept for the next comparison.
    pub fn poll_once(&mut self) -> Result<Refresh> {
        let rows = self.source.fetch()?;
        let changed = self.previous.as_ref() != Some(&rows);
        if changed {
            debug!(rows = rows.len(), "Session rows changed");
        }

        let lineup = Lineup::from_sessions(rows.clone());
        self.previous = Some(rows);
        Ok(Refresh { lineup, changed })
    }
}
