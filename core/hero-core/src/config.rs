//! Configuration loading and saving utilities.
//!
//! Handles paths and persistence for the hero configuration: classification
//! windows, tick and refresh cadence, schedule formatting and every
//! user-facing label. A missing file means defaults.

use std::path::{Path, PathBuf};

use chrono::Duration;
use fs_err as fs;
use serde::{Deserialize, Serialize};

use crate::error::{HeroError, Result};
use crate::resolver::Thresholds;

pub const DEFAULT_LIVE_GRACE_MINUTES: i64 = 60;
pub const DEFAULT_IMMINENT_WINDOW_MINUTES: i64 = 10;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1_000;
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_SCHEDULE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Upper bound for the grace and imminent windows (one year).
pub const MAX_WINDOW_MINUTES: i64 = 365 * 24 * 60;
/// Upper bound for the tick and refresh cadences (one day).
const MAX_INTERVAL_SECS: u64 = 24 * 60 * 60;

/// User-facing text. Defaults are the Arabic strings shown on the landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub hero_title: String,
    pub schedule_title: String,
    pub live_now: String,
    pub upcoming: String,
    pub ended_status: String,
    pub join_now: String,
    pub coming_soon: String,
    pub prepare_to_join: String,
    pub watch_recording: String,
    pub ended: String,
    pub no_sessions_title: String,
    pub no_sessions_hint: String,
    pub no_other_sessions: String,
    pub unavailable: String,
    pub fetch_error: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            hero_title: "الحصة القادمة المباشرة".to_string(),
            schedule_title: "الجدول الكامل للحصص".to_string(),
            live_now: "مباشر الآن 🔥".to_string(),
            upcoming: "قادمة".to_string(),
            ended_status: "انتهت (شاهد التسجيل)".to_string(),
            join_now: "انضم الآن".to_string(),
            coming_soon: "قريباً...".to_string(),
            prepare_to_join: "استعد للإنضمام".to_string(),
            watch_recording: "شاهد التسجيل".to_string(),
            ended: "انتهت".to_string(),
            no_sessions_title: "لا توجد حصص قادمة".to_string(),
            no_sessions_hint: "يرجى التحقق مرة أخرى قريبًا!".to_string(),
            no_other_sessions: "لا توجد حصص أخرى مجدولة حاليًا.".to_string(),
            unavailable: "بيانات الحصة غير متاحة حاليًا.".to_string(),
            fetch_error: "حدث خطأ أثناء جلب بيانات الحصص.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    /// How long after the scheduled start a session counts as live without the flag.
    pub live_grace_minutes: i64,
    /// Window before the start during which the join button is already enabled.
    pub imminent_window_minutes: i64,
    pub tick_interval_ms: u64,
    pub refresh_interval_secs: u64,
    /// `chrono` format string for schedule cards.
    pub schedule_time_format: String,
    /// Offset applied to schedule times before formatting.
    pub utc_offset_minutes: i32,
    pub labels: Labels,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            live_grace_minutes: DEFAULT_LIVE_GRACE_MINUTES,
            imminent_window_minutes: DEFAULT_IMMINENT_WINDOW_MINUTES,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            schedule_time_format: DEFAULT_SCHEDULE_TIME_FORMAT.to_string(),
            utc_offset_minutes: 0,
            labels: Labels::default(),
        }
    }
}

impl HeroConfig {
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            live_grace: window(self.live_grace_minutes),
            imminent_window: window(self.imminent_window_minutes),
        }
    }

    pub fn tick_interval(&self) -> std::time::Duration {
        let millis = self.tick_interval_ms.clamp(1, MAX_INTERVAL_SECS * 1_000);
        std::time::Duration::from_millis(millis)
    }

    pub fn refresh_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.refresh_interval_secs.clamp(1, MAX_INTERVAL_SECS))
    }
}

fn window(minutes: i64) -> Duration {
    Duration::minutes(minutes.clamp(0, MAX_WINDOW_MINUTES))
}

/// Returns the directory holding hero configuration (`<config dir>/profy-hero`).
pub fn get_hero_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("profy-hero"))
}

/// Returns the path to the hero configuration file.
pub fn get_hero_config_path() -> Option<PathBuf> {
    get_hero_config_dir().map(|d| d.join("hero.json"))
}

/// Loads the hero configuration, returning defaults if the file doesn't exist
/// or can't be parsed.
pub fn load_config() -> HeroConfig {
    let Some(path) = get_hero_config_path() else {
        return HeroConfig::default();
    };

    load_config_from(&path).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Falling back to default hero config");
        HeroConfig::default()
    })
}

/// Loads the configuration at `path`. A missing file yields defaults; a
/// malformed one is an error.
pub fn load_config_from(path: &Path) -> Result<HeroConfig> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(HeroConfig::default())
        }
        Err(err) => {
            return Err(HeroError::ConfigMalformed {
                path: path.to_path_buf(),
                details: err.to_string(),
            })
        }
    };

    if content.trim().is_empty() {
        return Ok(HeroConfig::default());
    }

    serde_json::from_str(&content).map_err(|err| HeroError::ConfigMalformed {
        path: path.to_path_buf(),
        details: err.to_string(),
    })
}

/// Saves the hero configuration to the default path.
pub fn save_config(config: &HeroConfig) -> Result<PathBuf> {
    let path = get_hero_config_path().ok_or(HeroError::ConfigDirNotFound)?;
    save_config_to(&path, config)?;
    Ok(path)
}

/// Writes `config` to `path` via temp file + rename.
pub fn save_config_to(path: &Path, config: &HeroConfig) -> Result<()> {
    let write_failed = |source: std::io::Error| HeroError::ConfigWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_failed)?;
    }

    let content =
        serde_json::to_string_pretty(config).map_err(|err| HeroError::ConfigMalformed {
            path: path.to_path_buf(),
            details: err.to_string(),
        })?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, content).map_err(write_failed)?;
    fs::rename(&tmp_path, path).map_err(write_failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config_from(&dir.path().join("hero.json")).unwrap();
        assert_eq!(config, HeroConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hero.json");
        std::fs::write(
            &path,
            r#"{"imminent_window_minutes": 15, "labels": {"join_now": "Join"}}"#,
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.imminent_window_minutes, 15);
        assert_eq!(config.live_grace_minutes, DEFAULT_LIVE_GRACE_MINUTES);
        assert_eq!(config.labels.join_now, "Join");
        assert_eq!(config.labels.coming_soon, Labels::default().coming_soon);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hero.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            load_config_from(&path),
            Err(HeroError::ConfigMalformed { .. })
        ));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("hero.json");
        let config = HeroConfig {
            tick_interval_ms: 250,
            utc_offset_minutes: 60,
            ..HeroConfig::default()
        };

        save_config_to(&path, &config).unwrap();
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(load_config_from(&path).unwrap(), config);
    }

    #[test]
    fn test_thresholds_clamp_negative_windows() {
        let config = HeroConfig {
            live_grace_minutes: -5,
            ..HeroConfig::default()
        };
        let thresholds = config.thresholds();
        assert_eq!(thresholds.live_grace, Duration::zero());
        assert_eq!(thresholds.imminent_window, Duration::minutes(10));
    }

    #[test]
    fn test_oversized_values_are_capped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hero.json");
        std::fs::write(
            &path,
            r#"{"live_grace_minutes": 1000000000000000,
                "imminent_window_minutes": 9223372036854775807,
                "tick_interval_ms": 18446744073709551615,
                "refresh_interval_secs": 18446744073709551615}"#,
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        let thresholds = config.thresholds();
        assert_eq!(thresholds.live_grace, Duration::minutes(MAX_WINDOW_MINUTES));
        assert_eq!(thresholds.imminent_window, Duration::minutes(MAX_WINDOW_MINUTES));
        assert_eq!(config.tick_interval().as_secs(), MAX_INTERVAL_SECS);
        assert_eq!(config.refresh_interval().as_secs(), MAX_INTERVAL_SECS);
    }
}
