//! CLI definitions for QuickClick.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// QuickClick CLI.
#[derive(Parser)]
#[command(name = "quickclick")]
#[command(about = "Find and activate clickable elements from the keyboard")]
#[command(version)]
pub(crate) struct Cli {
    /// Settings file (JSON). Defaults to the user config directory.
    #[arg(long, env = "QUICKCLICK_SETTINGS", global = true)]
    pub settings: Option<String>,

    /// Tuning file (TOML)
    #[arg(long, env = "QUICKCLICK_TUNING", global = true)]
    pub tuning: Option<String>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Search a page snapshot and print the matches in order
    Search {
        /// Page snapshot (JSON)
        page: PathBuf,

        /// Text to look for
        query: String,

        /// Also match title, aria-label and placeholder
        #[arg(long)]
        include_attrs: bool,

        /// Print the clickability signals of each match
        #[arg(long)]
        signals: bool,
    },

    /// Replay a scripted session against a page snapshot
    Replay {
        /// Page snapshot (JSON)
        page: PathBuf,

        /// Session script (TOML)
        script: PathBuf,
    },

    /// Stored settings management
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum SettingsAction {
    /// Print the effective settings
    Show,

    /// Update one or more settings
    Set {
        #[arg(long)]
        auto_open: Option<bool>,

        /// Page key that toggles the panel (" " or "Space" for the space bar)
        #[arg(long)]
        open_key: Option<String>,

        #[arg(long)]
        include_attrs: Option<bool>,

        /// Language code (es, en)
        #[arg(long)]
        language: Option<String>,
    },

    /// Restore the defaults
    Reset,
}
