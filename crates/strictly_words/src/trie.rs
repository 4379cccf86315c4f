//! Prefix tree for exact-match word lookup.
//!
//! A trie is built once per dictionary load and never mutated afterwards, so
//! it can be shared across threads behind an `Arc` without locking.

use std::collections::HashMap;
use tracing::instrument;

/// One node of the trie.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct TrieNode {
    is_word: bool,
    children: HashMap<char, TrieNode>,
}

/// Prefix tree of words.
///
/// The trie does no normalization. Callers normalize before insertion and
/// before every lookup (see [`crate::normalize_word`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trie {
    root: TrieNode,
    words: usize,
}

impl Trie {
    /// Creates an empty trie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a word. Inserting the same word twice is a no-op.
    pub fn insert(&mut self, word: &str) {
        let mut node = &mut self.root;
        for c in word.chars() {
            node = node.children.entry(c).or_default();
        }
        if !node.is_word {
            node.is_word = true;
            self.words += 1;
        }
    }

    /// Returns true only if `word` itself was inserted (not a mere prefix).
    #[instrument(level = "trace", skip(self))]
    pub fn search(&self, word: &str) -> bool {
        self.walk(word).is_some_and(|node| node.is_word)
    }

    /// Returns true if some inserted word starts with `prefix`.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.walk(prefix).is_some()
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words
    }

    /// True when no word has been inserted.
    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    fn walk(&self, path: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        for c in path.chars() {
            node = node.children.get(&c)?;
        }
        Some(node)
    }
}

impl<S: AsRef<str>> FromIterator<S> for Trie {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut trie = Trie::new();
        for word in iter {
            trie.insert(word.as_ref());
        }
        trie
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_exact_match_only() {
        let trie: Trie = ["vendre", "vent"].into_iter().collect();
        assert!(trie.search("vendre"));
        assert!(trie.search("vent"));
        assert!(!trie.search("ven"));
        assert!(!trie.search("vendres"));
        assert!(trie.has_prefix("ven"));
        assert!(!trie.has_prefix("vx"));
    }

    #[test]
    fn test_duplicate_insert_counts_once() {
        let mut trie = Trie::new();
        trie.insert("mot");
        trie.insert("mot");
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_empty_trie() {
        let trie = Trie::new();
        assert!(trie.is_empty());
        assert!(!trie.search("a"));
        // The empty string is a prefix of everything, but never a word.
        assert!(!trie.search(""));
    }
}
