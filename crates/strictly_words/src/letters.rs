//! Letter values, reserve distribution and word normalization.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Marker character for a blank tile that has not been assigned a letter.
pub const BLANK: char = '*';

/// Vowels, in the order blank resolution draws from.
pub const VOWELS: [char; 6] = ['a', 'e', 'i', 'o', 'u', 'y'];

/// Initial reserve content: 102 tiles including 2 blanks.
pub const LETTER_DISTRIBUTION: [(char, u32); 27] = [
    ('a', 9),
    ('b', 2),
    ('c', 2),
    ('d', 3),
    ('e', 15),
    ('f', 2),
    ('g', 2),
    ('h', 2),
    ('i', 8),
    ('j', 1),
    ('k', 1),
    ('l', 5),
    ('m', 3),
    ('n', 6),
    ('o', 6),
    ('p', 2),
    ('q', 1),
    ('r', 6),
    ('s', 6),
    ('t', 6),
    ('u', 6),
    ('v', 2),
    ('w', 1),
    ('x', 1),
    ('y', 1),
    ('z', 1),
    (BLANK, 2),
];

/// Point value of a letter. Blanks and unknown characters are worth nothing.
pub fn point_value(character: char) -> u32 {
    match character.to_ascii_lowercase() {
        'a' | 'e' | 'i' | 'l' | 'n' | 'o' | 'r' | 's' | 't' | 'u' => 1,
        'd' | 'g' | 'm' => 2,
        'b' | 'c' | 'p' => 3,
        'f' | 'h' | 'v' => 4,
        'j' | 'q' => 8,
        'k' | 'w' | 'x' | 'y' | 'z' => 10,
        _ => 0,
    }
}

/// Returns true for `a e i o u y`, case-insensitively.
pub fn is_vowel(character: char) -> bool {
    VOWELS.contains(&character.to_ascii_lowercase())
}

/// Returns true for an ASCII letter that is not a vowel.
pub fn is_consonant(character: char) -> bool {
    character.is_ascii_alphabetic() && !is_vowel(character)
}

/// Lowercases a word and folds accented Latin letters to their base letter.
///
/// Applied once when a dictionary is built and once per lookup, so the trie
/// only ever sees `a`..`z`.
#[instrument(level = "trace")]
pub fn normalize_word(word: &str) -> String {
    word.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
            'ç' => 'c',
            'è' | 'é' | 'ê' | 'ë' => 'e',
            'ì' | 'í' | 'î' | 'ï' => 'i',
            'ñ' => 'n',
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
            'ù' | 'ú' | 'û' | 'ü' => 'u',
            'ý' | 'ÿ' => 'y',
            other => other,
        })
        .collect()
}

/// A letter tile: its character and its point value.
///
/// A blank on a rack is `('*', 0)`. Once placed it takes the character it
/// stands for and keeps a value of 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Letter {
    character: char,
    value: u32,
}

impl Letter {
    /// Creates a regular letter with its standard point value.
    pub fn new(character: char) -> Self {
        let character = character.to_ascii_lowercase();
        Self {
            character,
            value: point_value(character),
        }
    }

    /// Creates an unassigned blank tile.
    pub fn blank() -> Self {
        Self {
            character: BLANK,
            value: 0,
        }
    }

    /// Creates a blank tile standing for `character`.
    pub fn blank_as(character: char) -> Self {
        Self {
            character: character.to_ascii_lowercase(),
            value: 0,
        }
    }

    /// The letter's character (lowercase, or `*` for an unassigned blank).
    pub fn character(&self) -> char {
        self.character
    }

    /// Points this tile is worth.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// True for blank tiles, assigned or not.
    pub fn is_blank(&self) -> bool {
        self.character == BLANK || self.value == 0
    }
}

impl std::fmt::Display for Letter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.character.to_ascii_uppercase())
    }
}

/// Sum of point values for a sequence of characters.
pub fn total_points(characters: impl IntoIterator<Item = char>) -> u32 {
    characters.into_iter().map(point_value).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_totals_102_with_two_blanks() {
        let total: u32 = LETTER_DISTRIBUTION.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 102);
        assert!(LETTER_DISTRIBUTION.contains(&(BLANK, 2)));
    }

    #[test]
    fn test_point_values() {
        assert_eq!(point_value('x'), 10);
        assert_eq!(point_value('Z'), 10);
        assert_eq!(point_value('w'), 10);
        assert_eq!(point_value('e'), 1);
        assert_eq!(point_value(BLANK), 0);
    }

    #[test]
    fn test_normalize_folds_accents() {
        assert_eq!(normalize_word("Éléphant"), "elephant");
        assert_eq!(normalize_word("  garçon "), "garcon");
    }

    #[test]
    fn test_blank_letters() {
        assert!(Letter::blank().is_blank());
        let blank = Letter::blank_as('Q');
        assert_eq!(blank.character(), 'q');
        assert_eq!(blank.value(), 0);
        assert!(!Letter::new('q').is_blank());
    }

    #[test]
    fn test_vowels_and_consonants() {
        assert!(is_vowel('A'));
        assert!(is_vowel('y'));
        assert!(is_consonant('b'));
        assert!(!is_consonant('*'));
    }
}
