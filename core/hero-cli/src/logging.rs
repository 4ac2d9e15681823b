//! Logging setup for the `hero` binary.
//!
//! `watch` owns stdout for the countdown, so its logs go to a daily-rolling
//! file. Every other subcommand logs to stderr.

use std::env;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const DEBUG_ENV: &str = "HERO_DEBUG_LOG";
const LOG_FILE_PREFIX: &str = "hero.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File,
}

fn env_filter() -> EnvFilter {
    let debug_enabled = env::var(DEBUG_ENV)
        .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false);
    if debug_enabled {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

pub fn log_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("profy-hero").join("logs"))
}

/// Installs the global subscriber. Keep the returned guard alive until exit
/// so buffered file logs are flushed.
pub fn init(target: LogTarget) -> Option<WorkerGuard> {
    let filter = env_filter();

    if target == LogTarget::File {
        if let Some(dir) = log_dir() {
            if std::fs::create_dir_all(&dir).is_ok() {
                let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(writer)
                    .with_ansi(false)
                    .init();
                return Some(guard);
            }
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    None
}
