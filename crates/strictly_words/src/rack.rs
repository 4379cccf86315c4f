//! A player's rack: up to seven letters, handled as a multiset.

use crate::letters::{BLANK, Letter};
use crate::reserve::Reserve;
use derive_more::{Display, Error};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Letters a rack can hold.
pub const RACK_CAPACITY: usize = 7;

/// Letters the reserve must hold for an exchange to be allowed.
pub const MIN_RESERVE_FOR_EXCHANGE: u32 = RACK_CAPACITY as u32;

/// Errors from rack operations. None of them modify the rack.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum RackError {
    /// Some requested letters are not on the rack.
    #[display("Rack does not contain letters '{}'", _0)]
    MissingLetters(#[error(not(source))] String),

    /// The rack already holds seven letters.
    #[display("Rack is full")]
    Full,

    /// An exchange named no letters.
    #[display("No letters to exchange")]
    NoLetters,

    /// Too few letters in the reserve to exchange.
    #[display("Reserve holds {} letters, at least {} are needed to exchange", remaining, MIN_RESERVE_FOR_EXCHANGE)]
    ReserveTooSmall {
        /// Letters left in the reserve.
        remaining: u32,
    },
}

/// Result of refilling a rack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillOutcome {
    /// Letters drawn, in draw order.
    pub drawn: Vec<Letter>,
    /// True if the reserve ran dry before the rack was full.
    pub reserve_exhausted: bool,
}

/// A player's letters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rack {
    letters: Vec<Letter>,
}

impl Rack {
    /// Creates an empty rack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a rack from characters (`*` for blanks).
    ///
    /// # Errors
    ///
    /// Returns [`RackError::Full`] for more than seven letters.
    pub fn from_chars(characters: &str) -> Result<Self, RackError> {
        let letters: Vec<Letter> = characters
            .chars()
            .map(|c| if c == BLANK { Letter::blank() } else { Letter::new(c) })
            .collect();
        if letters.len() > RACK_CAPACITY {
            return Err(RackError::Full);
        }
        Ok(Self { letters })
    }

    /// Letters on the rack.
    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    /// Characters on the rack (`*` for blanks).
    pub fn characters(&self) -> Vec<char> {
        self.letters.iter().map(Letter::character).collect()
    }

    /// Number of letters.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// True with no letters.
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// True with seven letters.
    pub fn is_full(&self) -> bool {
        self.letters.len() >= RACK_CAPACITY
    }

    /// Sum of the letters' point values.
    pub fn points(&self) -> u32 {
        self.letters.iter().map(Letter::value).sum()
    }

    /// Adds one letter.
    ///
    /// # Errors
    ///
    /// Returns [`RackError::Full`] if the rack is full.
    pub fn add(&mut self, letter: Letter) -> Result<(), RackError> {
        if self.is_full() {
            return Err(RackError::Full);
        }
        self.letters.push(letter);
        Ok(())
    }

    /// Indices of `characters` on the rack, or the characters that are missing.
    fn locate(&self, characters: &[char]) -> Result<Vec<usize>, String> {
        let mut taken = vec![false; self.letters.len()];
        let mut indices = Vec::with_capacity(characters.len());
        let mut missing = String::new();
        for wanted in characters {
            let found = self
                .letters
                .iter()
                .enumerate()
                .position(|(i, l)| !taken[i] && l.character() == *wanted);
            match found {
                Some(i) => {
                    taken[i] = true;
                    indices.push(i);
                }
                None => missing.push(*wanted),
            }
        }
        if missing.is_empty() {
            Ok(indices)
        } else {
            Err(missing)
        }
    }

    /// True if `characters` is a sub-multiset of the rack.
    pub fn contains_letters(&self, characters: &[char]) -> bool {
        self.locate(characters).is_ok()
    }

    /// Removes `characters` from the rack, all or nothing.
    ///
    /// # Errors
    ///
    /// Returns [`RackError::MissingLetters`] naming what is absent; the rack is
    /// unchanged.
    #[instrument(skip(self), fields(rack = %self))]
    pub fn remove_letters(&mut self, characters: &[char]) -> Result<Vec<Letter>, RackError> {
        let mut indices = self.locate(characters).map_err(|missing| {
            warn!(missing = %missing, "Letters not on rack");
            RackError::MissingLetters(missing)
        })?;
        let removed_in_order: Vec<Letter> = indices.iter().map(|i| self.letters[*i]).collect();
        indices.sort_unstable_by(|a, b| b.cmp(a));
        for i in indices {
            self.letters.remove(i);
        }
        Ok(removed_in_order)
    }

    /// Draws from the reserve until the rack is full or the reserve is empty.
    #[instrument(skip(self, reserve, rng), fields(rack = self.len(), reserve = reserve.remaining()))]
    pub fn fill<R: Rng + ?Sized>(&mut self, reserve: &mut Reserve, rng: &mut R) -> FillOutcome {
        let needed = RACK_CAPACITY.saturating_sub(self.letters.len());
        let drawn = reserve.draw_many(needed, rng);
        self.letters.extend(drawn.iter().copied());
        let reserve_exhausted = drawn.len() < needed;
        debug!(drawn = drawn.len(), reserve_exhausted, "Rack filled");
        FillOutcome {
            drawn,
            reserve_exhausted,
        }
    }

    /// Swaps letters with the reserve.
    ///
    /// Replacements are drawn before the old letters go back, so a player never
    /// draws back what they just discarded.
    ///
    /// # Errors
    ///
    /// [`RackError::NoLetters`] for an empty request,
    /// [`RackError::ReserveTooSmall`] below seven letters in the reserve,
    /// [`RackError::MissingLetters`] if the rack lacks any requested letter.
    /// Neither the rack nor the reserve is modified on error.
    #[instrument(skip(self, reserve, rng), fields(rack = %self))]
    pub fn exchange<R: Rng + ?Sized>(
        &mut self,
        characters: &[char],
        reserve: &mut Reserve,
        rng: &mut R,
    ) -> Result<Vec<Letter>, RackError> {
        if characters.is_empty() {
            return Err(RackError::NoLetters);
        }
        let remaining = reserve.remaining();
        if remaining < MIN_RESERVE_FOR_EXCHANGE {
            return Err(RackError::ReserveTooSmall { remaining });
        }
        let removed = self.remove_letters(characters)?;
        let drawn = reserve.draw_many(removed.len(), rng);
        reserve.return_letters(&removed);
        self.letters.extend(drawn.iter().copied());
        debug!(returned = removed.len(), drawn = drawn.len(), "Letters exchanged");
        Ok(removed)
    }
}

impl std::fmt::Display for Rack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for letter in &self.letters {
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_contains_is_multiset() {
        let rack = Rack::from_chars("aab*").unwrap();
        assert!(rack.contains_letters(&['a', 'a']));
        assert!(rack.contains_letters(&['b', '*', 'a']));
        assert!(!rack.contains_letters(&['a', 'a', 'a']));
        assert!(!rack.contains_letters(&['c']));
    }

    #[test]
    fn test_remove_is_all_or_nothing() {
        let mut rack = Rack::from_chars("abc").unwrap();
        assert_eq!(
            rack.remove_letters(&['a', 'z']),
            Err(RackError::MissingLetters("z".to_string()))
        );
        assert_eq!(rack.len(), 3);

        let removed = rack.remove_letters(&['c', 'a']).unwrap();
        assert_eq!(removed, vec![Letter::new('c'), Letter::new('a')]);
        assert_eq!(rack.characters(), vec!['b']);
    }

    #[test]
    fn test_fill_stops_at_capacity() {
        let mut rack = Rack::from_chars("ab").unwrap();
        let mut reserve = Reserve::new();
        let mut rng = StdRng::seed_from_u64(3);
        let outcome = rack.fill(&mut reserve, &mut rng);
        assert_eq!(outcome.drawn.len(), 5);
        assert!(!outcome.reserve_exhausted);
        assert!(rack.is_full());
        assert_eq!(reserve.remaining(), 97);

        let again = rack.fill(&mut reserve, &mut rng);
        assert!(again.drawn.is_empty());
        assert_eq!(reserve.remaining(), 97);
    }

    #[test]
    fn test_fill_reports_exhaustion() {
        let mut rack = Rack::new();
        let mut reserve = Reserve::from_counts([('e', 2)]);
        let mut rng = StdRng::seed_from_u64(3);
        let outcome = rack.fill(&mut reserve, &mut rng);
        assert_eq!(outcome.drawn.len(), 2);
        assert!(outcome.reserve_exhausted);
    }

    #[test]
    fn test_add_respects_capacity() {
        let mut rack = Rack::from_chars("abcdefg").unwrap();
        assert_eq!(rack.add(Letter::new('h')), Err(RackError::Full));
        assert_eq!(Rack::from_chars("abcdefgh"), Err(RackError::Full));
    }

    #[test]
    fn test_exchange() {
        let mut rack = Rack::from_chars("xzwe").unwrap();
        let mut reserve = Reserve::from_counts([('a', 10)]);
        let mut rng = StdRng::seed_from_u64(5);
        let returned = rack.exchange(&['x', 'z'], &mut reserve, &mut rng).unwrap();
        assert_eq!(returned, vec![Letter::new('x'), Letter::new('z')]);
        assert_eq!(rack.characters(), vec!['w', 'e', 'a', 'a']);
        assert_eq!(reserve.remaining(), 10);
        assert_eq!(reserve.count('x'), 1);
    }

    #[test]
    fn test_exchange_needs_letters() {
        let mut rack = Rack::from_chars("xzwe").unwrap();
        let mut reserve = Reserve::from_counts([('a', 10)]);
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(rack.exchange(&[], &mut reserve, &mut rng), Err(RackError::NoLetters));
        assert_eq!(rack.len(), 4);
        assert_eq!(reserve.remaining(), 10);
    }

    #[test]
    fn test_exchange_needs_full_reserve() {
        let mut rack = Rack::from_chars("xzwe").unwrap();
        let mut reserve = Reserve::from_counts([('a', 6)]);
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(
            rack.exchange(&['x'], &mut reserve, &mut rng),
            Err(RackError::ReserveTooSmall { remaining: 6 })
        );
        assert_eq!(rack.len(), 4);
        assert_eq!(reserve.remaining(), 6);
    }
}
