//! Reads dictionary files into a registry.
//!
//! Two formats are understood, chosen by extension:
//! - `.json`: `{ "title": ..., "description": ..., "words": [...] }`
//! - `.txt`: one word per line, `#` starts a comment line
//!
//! The file stem is the dictionary id (`fr.json` publishes `fr`).

use derive_more::{Display, Error};
use std::path::Path;
use std::sync::Arc;
use strictly_words::{Dictionary, DictionaryError, DictionaryFile, DictionaryRegistry};
use tracing::{debug, info, instrument, warn};

/// Dictionary loading error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Load error: {} at {}:{}", message, file, line)]
pub struct LoadError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LoadError {
    /// Creates a new load error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for LoadError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

impl From<DictionaryError> for LoadError {
    #[track_caller]
    fn from(err: DictionaryError) -> Self {
        Self::new(err.to_string())
    }
}

/// Builds a dictionary from a plain word list.
fn parse_word_list(id: &str, content: &str) -> Dictionary {
    let words = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'));
    Dictionary::from_words(id, id, "", words)
}

/// Loads one dictionary file and publishes it.
///
/// Publishing replaces any dictionary with the same id; running games look
/// words up by id, so they see the new list on their next command.
#[instrument(skip(registry, path), fields(path = %path.as_ref().display()))]
pub fn load_file(
    registry: &DictionaryRegistry,
    path: impl AsRef<Path>,
) -> Result<Arc<Dictionary>, LoadError> {
    let path = path.as_ref();
    let id = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| LoadError::new(format!("No dictionary id in {}", path.display())))?;
    let content = std::fs::read_to_string(path)?;

    let dictionary = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => DictionaryFile::from_json(&content)?.into_dictionary(id),
        Some("txt") => parse_word_list(id, &content),
        other => {
            return Err(LoadError::new(format!(
                "Unsupported dictionary format {:?} for {}",
                other,
                path.display()
            )));
        }
    };
    debug!(id, words = dictionary.len(), "Dictionary parsed");
    Ok(registry.publish(dictionary))
}

/// Loads every `.json` and `.txt` file in `dir`, in name order.
///
/// Returns the ids published. Files with other extensions are skipped.
#[instrument(skip(registry, dir), fields(dir = %dir.as_ref().display()))]
pub fn load_dir(registry: &DictionaryRegistry, dir: impl AsRef<Path>) -> Result<Vec<String>, LoadError> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") | Some("txt") => paths.push(path),
            _ => debug!(path = %path.display(), "Skipping non-dictionary file"),
        }
    }
    paths.sort();

    let mut ids = Vec::with_capacity(paths.len());
    for path in paths {
        let dictionary = load_file(registry, &path)?;
        ids.push(dictionary.id().clone());
    }
    if ids.is_empty() {
        warn!("No dictionaries found");
    }
    info!(count = ids.len(), "Dictionaries loaded");
    Ok(ids)
}
