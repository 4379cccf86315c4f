//! Dictionary registry: one immutable trie per dictionary id.
//!
//! Dictionaries are published as `Arc<Dictionary>`. Reloading an id builds a
//! whole new trie and swaps the `Arc` in under a short write lock; a lookup
//! clones the current `Arc` and searches it without holding any lock, so a
//! reader never observes a half-built trie.

use crate::letters::normalize_word;
use crate::trie::Trie;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, instrument, warn};

/// Identifier of a loaded dictionary.
pub type DictionaryId = String;

/// Errors raised by the dictionary layer.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum DictionaryError {
    /// No dictionary is registered under this id.
    #[display("Unknown dictionary '{}'", _0)]
    UnknownDictionary(#[error(not(source))] DictionaryId),

    /// A dictionary file could not be parsed.
    #[display("Malformed dictionary file: {}", _0)]
    Malformed(#[error(not(source))] String),
}

/// A built dictionary and its metadata.
#[derive(Clone, Getters)]
pub struct Dictionary {
    /// Registry key.
    id: DictionaryId,
    /// Human-readable title.
    title: String,
    /// Free-form description.
    description: String,
    /// Normalized words.
    #[getter(skip)]
    trie: Trie,
}

impl Dictionary {
    /// Builds a dictionary, normalizing every word before insertion.
    #[instrument(skip(title, description, words))]
    pub fn from_words<S: AsRef<str>>(
        id: &str,
        title: &str,
        description: &str,
        words: impl IntoIterator<Item = S>,
    ) -> Self {
        let trie: Trie = words
            .into_iter()
            .map(|w| normalize_word(w.as_ref()))
            .filter(|w| !w.is_empty())
            .collect();
        debug!(words = trie.len(), "Built dictionary trie");
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            trie,
        }
    }

    /// Checks a word, normalizing it first.
    pub fn contains(&self, word: &str) -> bool {
        self.trie.search(&normalize_word(word))
    }

    /// Checks an already normalized prefix.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.trie.has_prefix(prefix)
    }

    /// The underlying trie.
    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    /// True when the dictionary holds no words.
    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }
}

impl std::fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dictionary")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("words", &self.trie.len())
            .finish()
    }
}

/// On-disk dictionary format: `{ "title", "description", "words": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct DictionaryFile {
    /// Title shown to players.
    title: String,
    /// Description shown to players.
    #[serde(default)]
    description: String,
    /// Word list, any case.
    words: Vec<String>,
}

impl DictionaryFile {
    /// Parses a JSON dictionary document.
    #[instrument(skip(json), fields(bytes = json.len()))]
    pub fn from_json(json: &str) -> Result<Self, DictionaryError> {
        serde_json::from_str(json).map_err(|e| DictionaryError::Malformed(e.to_string()))
    }

    /// Builds the dictionary under the given id.
    pub fn into_dictionary(self, id: &str) -> Dictionary {
        Dictionary::from_words(id, &self.title, &self.description, self.words)
    }
}

/// Registry of loaded dictionaries, shared read-mostly across sessions.
#[derive(Debug, Default)]
pub struct DictionaryRegistry {
    dictionaries: RwLock<HashMap<DictionaryId, Arc<Dictionary>>>,
}

impl DictionaryRegistry {
    /// Creates an empty registry.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a dictionary, replacing any previous one with the same id.
    ///
    /// Returns the published handle.
    #[instrument(skip(self, dictionary), fields(dictionary_id = %dictionary.id))]
    pub fn publish(&self, dictionary: Dictionary) -> Arc<Dictionary> {
        let dictionary = Arc::new(dictionary);
        let previous = self
            .dictionaries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(dictionary.id.clone(), Arc::clone(&dictionary));
        info!(
            words = dictionary.len(),
            replaced = previous.is_some(),
            "Dictionary published"
        );
        dictionary
    }

    /// Builds and publishes a dictionary from a word list.
    pub fn load<S: AsRef<str>>(
        &self,
        id: &str,
        title: &str,
        words: impl IntoIterator<Item = S>,
    ) -> Arc<Dictionary> {
        self.publish(Dictionary::from_words(id, title, "", words))
    }

    /// Unregisters a dictionary. Sessions already holding it keep their handle.
    #[instrument(skip(self))]
    pub fn remove(&self, id: &str) -> bool {
        let removed = self
            .dictionaries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .is_some();
        debug!(removed, "Dictionary removal");
        removed
    }

    /// Current handle for a dictionary id.
    pub fn dictionary(&self, id: &str) -> Option<Arc<Dictionary>> {
        self.dictionaries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<DictionaryId> {
        let mut ids: Vec<_> = self
            .dictionaries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }

    /// Looks a word up, reporting an unknown dictionary id as an error.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError::UnknownDictionary`] if `id` is not registered.
    #[instrument(level = "debug", skip(self))]
    pub fn lookup(&self, id: &str, word: &str) -> Result<bool, DictionaryError> {
        let dictionary = self
            .dictionary(id)
            .ok_or_else(|| DictionaryError::UnknownDictionary(id.to_string()))?;
        Ok(dictionary.contains(word))
    }

    /// Fail-closed lookup: an unknown dictionary id answers `false`.
    pub fn in_dictionary(&self, id: &str, word: &str) -> bool {
        match self.lookup(id, word) {
            Ok(found) => found,
            Err(e) => {
                warn!(error = %e, word, "Lookup against unknown dictionary");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_normalizes_word() {
        let registry = DictionaryRegistry::new();
        registry.load("fr", "Français", ["Éléphant", "vendre"]);
        assert_eq!(registry.lookup("fr", "ELEPHANT"), Ok(true));
        assert_eq!(registry.lookup("fr", "vendré"), Ok(true));
        assert_eq!(registry.lookup("fr", "vend"), Ok(false));
    }

    #[test]
    fn test_unknown_dictionary_is_distinct_but_fails_closed() {
        let registry = DictionaryRegistry::new();
        assert_eq!(
            registry.lookup("missing", "mot"),
            Err(DictionaryError::UnknownDictionary("missing".to_string()))
        );
        assert!(!registry.in_dictionary("missing", "mot"));
    }

    #[test]
    fn test_reload_swaps_without_touching_old_handle() {
        let registry = DictionaryRegistry::new();
        let old = registry.load("d", "v1", ["alpha"]);
        registry.load("d", "v2", ["beta"]);

        assert!(old.contains("alpha"));
        assert!(!old.contains("beta"));
        assert!(registry.in_dictionary("d", "beta"));
        assert!(!registry.in_dictionary("d", "alpha"));
        assert_eq!(registry.ids(), vec!["d".to_string()]);
    }

    #[test]
    fn test_remove() {
        let registry = DictionaryRegistry::new();
        registry.load("d", "t", ["mot"]);
        assert!(registry.remove("d"));
        assert!(!registry.remove("d"));
        assert!(registry.dictionary("d").is_none());
    }

    #[test]
    fn test_dictionary_file_from_json() {
        let file = DictionaryFile::from_json(
            r#"{"title":"Mini","description":"test","words":["Aa","Ab"]}"#,
        )
        .unwrap();
        assert_eq!(file.title(), "Mini");
        let dictionary = file.into_dictionary("mini");
        assert_eq!(dictionary.len(), 2);
        assert!(dictionary.contains("aa"));

        assert!(matches!(
            DictionaryFile::from_json("{not json"),
            Err(DictionaryError::Malformed(_))
        ));
    }
}
