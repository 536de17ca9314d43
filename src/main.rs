//! QuickClick - keyboard-driven clickable element finder
//!
//! Command-line entry point: offline search over page snapshots, scripted
//! session replay, and settings management.

mod cli;
mod cmd_replay;
mod cmd_search;
mod cmd_settings;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use quickclick_config::{
    ConfigLoader, ConfigValidator, JsonFileStore, Settings, SettingsStore, Tuning,
};

use crate::cli::{Cli, Commands};
use crate::cmd_replay::replay;
use crate::cmd_search::search;
use crate::cmd_settings::handle_settings_command;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let store = JsonFileStore::new(settings_path(cli.settings.as_deref())?);
    match cli.command {
        Commands::Search {
            page,
            query,
            include_attrs,
            signals,
        } => {
            let mut settings = load_settings(&store)?;
            settings.include_attrs |= include_attrs;
            let tuning = load_tuning(cli.tuning.as_deref(), &settings)?;
            search(&page, &query, &settings, &tuning, signals)
        }
        Commands::Replay { page, script } => {
            let settings = load_settings(&store)?;
            let tuning = load_tuning(cli.tuning.as_deref(), &settings)?;
            replay(&page, &script, settings, tuning)
        }
        Commands::Settings { action } => handle_settings_command(action, store),
    }
}

/// Initialize tracing on stderr. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn settings_path(flag: Option<&str>) -> Result<PathBuf> {
    match flag {
        Some(path) => Ok(PathBuf::from(ConfigLoader::expand_path(path))),
        None => match JsonFileStore::default_path() {
            Some(path) => Ok(path),
            None => bail!("no user config directory; pass --settings"),
        },
    }
}

fn load_settings(store: &JsonFileStore) -> Result<Settings> {
    store
        .get(&Settings::default())
        .with_context(|| format!("reading settings from {}", store.path().display()))
}

/// Load tuning and refuse to run with invalid values. Warnings are logged.
fn load_tuning(flag: Option<&str>, settings: &Settings) -> Result<Tuning> {
    let path = flag.map(|p| PathBuf::from(ConfigLoader::expand_path(p)));
    let tuning = ConfigLoader::load_or_default(path.as_deref())
        .with_context(|| format!("loading tuning from {}", display(path.as_deref())))?;

    let report = ConfigValidator::validate(&tuning, settings)?;
    for warning in &report.warnings {
        warn!("{}: {}", warning.path, warning.message);
    }
    if !report.is_valid() {
        let problems: Vec<String> = report
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.path, e.message))
            .collect();
        bail!("invalid configuration:\n  {}", problems.join("\n  "));
    }
    Ok(tuning)
}

fn display(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string())
}
