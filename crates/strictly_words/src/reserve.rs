//! The shared letter reserve ("bag").

use crate::letters::{LETTER_DISTRIBUTION, Letter};
use derive_more::{Display, Error};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

/// Error drawing from the reserve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ReserveError {
    /// No letters remain.
    #[display("The reserve is empty")]
    Empty,
}

/// Remaining count for one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveEntry {
    /// The character (`*` for blanks).
    pub character: char,
    /// How many are left.
    pub remaining: u32,
}

/// Bag of letters players draw from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reserve {
    entries: Vec<ReserveEntry>,
}

impl Reserve {
    /// Creates the standard 102-letter reserve.
    #[instrument]
    pub fn new() -> Self {
        Self::from_counts(LETTER_DISTRIBUTION)
    }

    /// Creates a reserve with explicit counts.
    pub fn from_counts(counts: impl IntoIterator<Item = (char, u32)>) -> Self {
        Self {
            entries: counts
                .into_iter()
                .map(|(character, remaining)| ReserveEntry {
                    character,
                    remaining,
                })
                .collect(),
        }
    }

    /// Total letters left.
    pub fn remaining(&self) -> u32 {
        self.entries.iter().map(|e| e.remaining).sum()
    }

    /// True when nothing is left to draw.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Letters left for one character.
    pub fn count(&self, character: char) -> u32 {
        self.entries
            .iter()
            .find(|e| e.character == character)
            .map_or(0, |e| e.remaining)
    }

    /// Per-character counts.
    pub fn entries(&self) -> &[ReserveEntry] {
        &self.entries
    }

    /// Draws one letter, each remaining tile equally likely.
    ///
    /// # Errors
    ///
    /// Returns [`ReserveError::Empty`] when no letters remain; counts are
    /// left untouched.
    #[instrument(level = "debug", skip(self, rng), fields(remaining = self.remaining()))]
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Letter, ReserveError> {
        let total = self.remaining();
        if total == 0 {
            debug!("Draw from empty reserve");
            return Err(ReserveError::Empty);
        }
        let mut pick = rng.random_range(0..total);
        for entry in &mut self.entries {
            if pick < entry.remaining {
                entry.remaining -= 1;
                let letter = if entry.character == crate::letters::BLANK {
                    Letter::blank()
                } else {
                    Letter::new(entry.character)
                };
                trace!(%letter, "Drew letter");
                return Ok(letter);
            }
            pick -= entry.remaining;
        }
        Err(ReserveError::Empty)
    }

    /// Draws up to `count` letters, stopping early if the reserve runs out.
    pub fn draw_many<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> Vec<Letter> {
        let mut drawn = Vec::with_capacity(count);
        for _ in 0..count {
            match self.draw(rng) {
                Ok(letter) => drawn.push(letter),
                Err(ReserveError::Empty) => break,
            }
        }
        drawn
    }

    /// Puts letters back, e.g. after an exchange. Blanks return as `*`.
    #[instrument(skip(self, letters), fields(count = letters.len()))]
    pub fn return_letters(&mut self, letters: &[Letter]) {
        for letter in letters {
            let character = if letter.is_blank() {
                crate::letters::BLANK
            } else {
                letter.character()
            };
            match self.entries.iter_mut().find(|e| e.character == character) {
                Some(entry) => entry.remaining += 1,
                None => self.entries.push(ReserveEntry {
                    character,
                    remaining: 1,
                }),
            }
        }
        debug!(remaining = self.remaining(), "Letters returned to reserve");
    }
}

impl Default for Reserve {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_standard_reserve_has_102_letters() {
        let reserve = Reserve::new();
        assert_eq!(reserve.remaining(), 102);
        assert_eq!(reserve.count('e'), 15);
        assert_eq!(reserve.count('*'), 2);
    }

    #[test]
    fn test_draw_decrements() {
        let mut reserve = Reserve::new();
        let mut rng = StdRng::seed_from_u64(1);
        let letter = reserve.draw(&mut rng).unwrap();
        assert_eq!(reserve.remaining(), 101);
        let key = if letter.is_blank() { '*' } else { letter.character() };
        let initial = LETTER_DISTRIBUTION.iter().find(|(c, _)| *c == key).unwrap().1;
        assert_eq!(reserve.count(key), initial - 1);
    }

    #[test]
    fn test_draw_from_empty_reserve() {
        let mut reserve = Reserve::from_counts([('a', 0), ('b', 0)]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(reserve.draw(&mut rng), Err(ReserveError::Empty));
        assert_eq!(reserve.remaining(), 0);
        assert!(reserve.entries().iter().all(|e| e.remaining == 0));
    }

    #[test]
    fn test_draw_exhausts_exactly() {
        let mut reserve = Reserve::from_counts([('a', 2), ('b', 1)]);
        let mut rng = StdRng::seed_from_u64(9);
        let mut drawn = reserve.draw_many(10, &mut rng);
        assert_eq!(drawn.len(), 3);
        drawn.sort();
        assert_eq!(drawn, vec![Letter::new('a'), Letter::new('a'), Letter::new('b')]);
        assert!(reserve.is_empty());
    }

    #[test]
    fn test_return_letters() {
        let mut reserve = Reserve::from_counts([('a', 0)]);
        reserve.return_letters(&[Letter::new('a'), Letter::blank()]);
        assert_eq!(reserve.count('a'), 1);
        assert_eq!(reserve.count('*'), 1);
        assert_eq!(reserve.remaining(), 2);
    }
}
