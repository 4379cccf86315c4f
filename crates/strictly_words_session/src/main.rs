//! Strictly Words - command-line front end.
//!
//! Loads the dictionaries named by the configuration, then checks words,
//! suggests plays or replays command scripts.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use cli::{Cli, Command};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use strictly_words::{DictionaryRegistry, GameSummary, candidate_words, normalize_word};
use strictly_words_session::{Script, SessionConfig, SessionManager, StepReport, load_dir};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = SessionConfig::load_or_default(&cli.config)?;
    if let Some(dir) = cli.dictionary_dir {
        config = config.with_dictionary_dir(dir);
    }

    let registry = Arc::new(DictionaryRegistry::new());
    load_dictionaries(&registry, config.dictionary_dir())?;

    match cli.command {
        Command::Dictionaries => list_dictionaries(&registry),
        Command::Check { word, dictionary } => {
            let id = dictionary.unwrap_or_else(|| config.default_dictionary().clone());
            check_word(&registry, &id, &word)
        }
        Command::Suggest {
            rack,
            pattern,
            dictionary,
        } => {
            let id = dictionary.unwrap_or_else(|| config.default_dictionary().clone());
            suggest(&registry, &id, &rack, pattern.as_deref())
        }
        Command::Replay {
            script,
            dictionary,
            seed,
            json,
        } => replay(registry, config, script, dictionary, seed, json),
    }
}

/// Loads every dictionary file in `dir`, if it exists.
#[instrument(skip(registry))]
fn load_dictionaries(registry: &DictionaryRegistry, dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        warn!(dir = %dir.display(), "Dictionary directory not found");
        return Ok(());
    }
    let ids = load_dir(registry, dir)?;
    info!(?ids, "Dictionaries ready");
    Ok(())
}

fn list_dictionaries(registry: &DictionaryRegistry) -> Result<()> {
    for id in registry.ids() {
        if let Some(dictionary) = registry.dictionary(&id) {
            println!("{}\t{}\t{} words", id, dictionary.title(), dictionary.len());
        }
    }
    Ok(())
}

fn check_word(registry: &DictionaryRegistry, id: &str, word: &str) -> Result<()> {
    let found = registry.lookup(id, word)?;
    let verdict = if found { "valid" } else { "not found" };
    println!("{}: {} in {}", normalize_word(word), verdict, id);
    Ok(())
}

/// Prints the words `rack` makes along `pattern`, or on its own when no
/// pattern is given.
fn suggest(registry: &DictionaryRegistry, id: &str, rack: &str, pattern: Option<&str>) -> Result<()> {
    let dictionary = registry
        .dictionary(id)
        .ok_or_else(|| anyhow!("Unknown dictionary '{}'", id))?;
    let letters: Vec<char> = rack.to_lowercase().chars().collect();

    let patterns: Vec<Vec<Option<char>>> = match pattern {
        Some(pattern) => vec![
            pattern
                .chars()
                .map(|c| match c {
                    '.' | '_' => None,
                    c => Some(c.to_ascii_lowercase()),
                })
                .collect(),
        ],
        None => (2..=letters.len()).map(|n| vec![None; n]).collect(),
    };

    for pattern in &patterns {
        for word in candidate_words(&letters, pattern, &dictionary) {
            println!("{}", word);
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct ReplayReport {
    steps: Vec<StepReport>,
    summary: GameSummary,
}

fn replay(
    registry: Arc<DictionaryRegistry>,
    config: SessionConfig,
    path: PathBuf,
    dictionary: Option<String>,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    let script = Script::parse(&text)?;

    let manager = SessionManager::new(registry, config);
    let session_id = "replay".to_string();
    let steps = script.replay(&manager, session_id.clone(), dictionary.as_deref(), seed)?;
    let summary = manager.summary(&session_id)?;

    if json {
        let report = ReplayReport { steps, summary };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for step in &steps {
        match (&step.outcome, &step.rejection) {
            (_, Some(reason)) => println!("{:>4} {}: {} -> rejected: {}", step.line, step.player, step.command, reason),
            (Some(outcome), None) => println!("{:>4} {}: {} -> {:?}", step.line, step.player, step.command, outcome),
            (None, None) => {}
        }
    }
    for (player, score) in &summary.scores {
        println!("{}\t{}", player, score);
    }
    if let Some(reason) = &summary.end_reason {
        println!("Game over: {}", reason);
    }
    println!("Winners: {}", summary.winners.join(", "));
    Ok(())
}
