//! hero: terminal front-end for the live-session hero card.
//!
//! ## Subcommands
//!
//! - `resolve`: one evaluation of the hero card for a sessions export
//! - `schedule`: the schedule cards beneath the hero card
//! - `watch`: live countdown, re-reading the export on a fixed cadence
//! - `config`: show or initialize the configuration file

mod logging;
mod render;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use hero_core::{
    load_config, load_config_from, parse_session_time, render_hero, save_config, save_config_to,
    HeroConfig, HeroError, HeroWatcher, JsonFileSource, Lineup, SessionSource, SystemClock,
};
use tracing::{error, warn};

use logging::LogTarget;
use render::TerminalSink;

#[derive(Parser)]
#[command(name = "hero")]
#[command(about = "Live-session hero card: status, countdown and schedule")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to <config dir>/profy-hero/hero.json)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the hero card once
    Resolve {
        /// Sessions export (JSON array or {"sessions": [...]})
        #[arg(long, value_name = "FILE")]
        sessions: PathBuf,

        /// Evaluate at this instant instead of now (RFC 3339)
        #[arg(long, value_name = "TIME")]
        now: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the sessions scheduled after the featured one
    Schedule {
        #[arg(long, value_name = "FILE")]
        sessions: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Keep the hero card ticking, re-reading the export periodically
    Watch {
        #[arg(long, value_name = "FILE")]
        sessions: PathBuf,
    },

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let target = match cli.command {
        Commands::Watch { .. } => LogTarget::File,
        _ => LogTarget::Stderr,
    };
    let _logging_guard = logging::init(target);

    let config = effective_config(cli.config.as_deref());

    let result = match cli.command {
        Commands::Resolve {
            sessions,
            now,
            json,
        } => run_resolve(&sessions, now.as_deref(), json, &config),
        Commands::Schedule { sessions, json } => run_schedule(&sessions, json, &config),
        Commands::Watch { sessions } => run_watch(&sessions, config),
        Commands::Config { action } => run_config(action, cli.config.as_deref(), &config),
    };

    if let Err(e) = result {
        error!(error = %e, "hero failed");
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn effective_config(path: Option<&Path>) -> HeroConfig {
    match path {
        Some(path) => load_config_from(path).unwrap_or_else(|err| {
            warn!(error = %err, "Falling back to default hero config");
            HeroConfig::default()
        }),
        None => load_config(),
    }
}

fn load_lineup(path: &Path, config: &HeroConfig) -> Result<Lineup, String> {
    let rows = JsonFileSource::new(path).fetch().map_err(|err| {
        error!(error = %err, "Failed to load sessions");
        format!("{} ({})", config.labels.fetch_error, err)
    })?;
    Ok(Lineup::from_sessions(rows))
}

fn parse_now(value: Option<&str>) -> Result<DateTime<Utc>, String> {
    match value {
        None => Ok(Utc::now()),
        Some(raw) => {
            parse_session_time(raw).ok_or_else(|| format!("Invalid --now timestamp: {}", raw))
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("Failed to serialize output: {}", e))
}

fn run_resolve(
    sessions: &Path,
    now: Option<&str>,
    json: bool,
    config: &HeroConfig,
) -> Result<(), String> {
    let now = parse_now(now)?;
    let lineup = load_lineup(sessions, config)?;
    let view = render_hero(lineup.featured.as_ref(), now, config);

    if json {
        println!("{}", to_json(&view)?);
    } else {
        println!("{}", config.labels.hero_title);
        println!("{}", render::hero_line(&view));
    }
    Ok(())
}

fn run_schedule(sessions: &Path, json: bool, config: &HeroConfig) -> Result<(), String> {
    let lineup = load_lineup(sessions, config)?;
    let entries = lineup.schedule(config);

    if json {
        println!("{}", to_json(&entries)?);
    } else {
        println!("{}", config.labels.schedule_title);
        for line in render::schedule_lines(&entries, config) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn run_watch(sessions: &Path, config: HeroConfig) -> Result<(), String> {
    let refresh_interval = config.refresh_interval();
    let print_schedule = |lineup: &Lineup, config: &HeroConfig| {
        println!();
        println!("{}", config.labels.schedule_title);
        for line in render::schedule_lines(&lineup.schedule(config), config) {
            println!("  {}", line);
        }
        println!("{}", config.labels.hero_title);
    };

    let mut watcher = HeroWatcher::start(
        JsonFileSource::new(sessions),
        config.clone(),
        Arc::new(SystemClock),
        TerminalSink::new(),
    )
    .map_err(|err: HeroError| format!("{} ({})", config.labels.fetch_error, err))?;
    print_schedule(watcher.lineup(), &config);

    loop {
        thread::sleep(refresh_interval);
        match watcher.refresh() {
            Ok(true) => print_schedule(watcher.lineup(), &config),
            Ok(false) => {}
            Err(err) => {
                warn!(error = %err, "Session refresh failed; keeping last lineup");
                eprintln!("{}", config.labels.fetch_error);
            }
        }
    }
}

fn run_config(
    action: ConfigAction,
    explicit_path: Option<&Path>,
    config: &HeroConfig,
) -> Result<(), String> {
    match action {
        ConfigAction::Show => {
            let path = explicit_path
                .map(Path::to_path_buf)
                .or_else(hero_core::config::get_hero_config_path);
            if let Some(path) = path {
                println!("# {}", path.display());
            }
            println!("{}", to_json(config)?);
            Ok(())
        }
        ConfigAction::Init { force } => {
            let defaults = HeroConfig::default();
            let path = match explicit_path {
                Some(path) => path.to_path_buf(),
                None => hero_core::config::get_hero_config_path()
                    .ok_or_else(|| HeroError::ConfigDirNotFound.to_string())?,
            };

            if path.exists() && !force {
                return Err(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                ));
            }

            match explicit_path {
                Some(_) => save_config_to(&path, &defaults)?,
                None => {
                    save_config(&defaults)?;
                }
            }
            println!("Wrote {}", path.display());
            Ok(())
        }
    }
}
