//! Objective rules: a measurement over an event plus a threshold.

use crate::events::{EventKind, GameEvent};
use crate::letters::{Letter, is_consonant, is_vowel};
use serde::{Deserialize, Serialize};

/// What an objective measures on each relevant event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Measure {
    /// Letters drawn from the reserve.
    LettersDrawn,
    /// Point value of the letters given back in one exchange.
    ExchangedPoints,
    /// Letters placed in a move whose main word holds only consonants.
    ConsonantWord,
    /// Letters placed in a move scoring strictly less than `max_score`.
    LowScoringPlacement {
        /// Score the move must stay under.
        max_score: u32,
    },
    /// Vowels among the letters placed in one move.
    VowelsPlaced,
}

impl Measure {
    /// Event kind this measure reads.
    pub fn trigger(&self) -> EventKind {
        match self {
            Measure::LettersDrawn => EventKind::LettersDrawn,
            Measure::ExchangedPoints => EventKind::LettersExchanged,
            Measure::ConsonantWord
            | Measure::LowScoringPlacement { .. }
            | Measure::VowelsPlaced => EventKind::PlacementValidated,
        }
    }

    /// Measures an event, or `None` if the event is not the trigger kind.
    pub fn measure(&self, event: &GameEvent) -> Option<u32> {
        match (self, event) {
            (Measure::LettersDrawn, GameEvent::LettersDrawn { letters, .. }) => {
                Some(letters.len() as u32)
            }
            (Measure::ExchangedPoints, GameEvent::LettersExchanged { letters, .. }) => {
                Some(letters.iter().map(Letter::value).sum())
            }
            (Measure::ConsonantWord, GameEvent::PlacementValidated { words, placed, .. }) => {
                let main = words.first()?;
                Some(if main.chars().all(is_consonant) {
                    placed.len() as u32
                } else {
                    0
                })
            }
            (
                Measure::LowScoringPlacement { max_score },
                GameEvent::PlacementValidated { score, placed, .. },
            ) => Some(if score < max_score { placed.len() as u32 } else { 0 }),
            (Measure::VowelsPlaced, GameEvent::PlacementValidated { placed, .. }) => Some(
                placed
                    .iter()
                    .filter(|l| is_vowel(l.character()))
                    .count() as u32,
            ),
            _ => None,
        }
    }
}

/// A counter-and-threshold rule.
///
/// Accumulating rules add each measurement to the owner's counter; the others
/// replace it, so they must be met by a single event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rule {
    /// What is measured.
    pub measure: Measure,
    /// Counter value that completes the objective.
    pub threshold: u32,
    /// True if measurements add up across events.
    pub accumulates: bool,
}

impl Rule {
    /// Counter after `event`, or `None` if the event is irrelevant.
    pub fn advance(&self, counter: u32, event: &GameEvent) -> Option<u32> {
        let measured = self.measure.measure(event)?;
        Some(if self.accumulates {
            counter.saturating_add(measured)
        } else {
            measured
        })
    }

    /// True once the counter reaches the threshold.
    pub fn is_met(&self, counter: u32) -> bool {
        counter >= self.threshold
    }
}

/// True if the exchanged letters reach `threshold` points.
///
/// Stops as soon as the running total gets there.
pub fn has_exchanged_enough_points(letters: &str, threshold: u32) -> bool {
    let mut total = 0;
    for c in letters.chars() {
        total += crate::letters::point_value(c);
        if total >= threshold {
            return true;
        }
    }
    false
}
