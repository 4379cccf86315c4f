//! Command-line interface for strictly_words.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Words - word-placement rules engine
#[derive(Parser, Debug)]
#[command(name = "strictly_words")]
#[command(about = "Check words, suggest plays and replay command scripts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the session configuration file
    #[arg(short, long, default_value = "strictly_words.toml")]
    pub config: PathBuf,

    /// Dictionary directory, overriding the configuration
    #[arg(long)]
    pub dictionary_dir: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List loaded dictionaries
    Dictionaries,

    /// Look a word up
    Check {
        /// Word to look up
        word: String,

        /// Dictionary id (defaults to the configured one)
        #[arg(short, long)]
        dictionary: Option<String>,
    },

    /// List words a rack can make
    Suggest {
        /// Rack letters, `*` for a blank
        rack: String,

        /// Board pattern, `.` for an empty square (e.g. `..e.`)
        #[arg(short, long)]
        pattern: Option<String>,

        /// Dictionary id (defaults to the configured one)
        #[arg(short, long)]
        dictionary: Option<String>,
    },

    /// Replay a command script in a fresh game
    Replay {
        /// Script file
        script: PathBuf,

        /// Dictionary id, overriding the script
        #[arg(short, long)]
        dictionary: Option<String>,

        /// Random seed, overriding the script
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}
