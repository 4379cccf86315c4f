//! Game events: what happened, in order.
//!
//! A [`crate::Game`] appends every event to its log and hands each one to the
//! objective dispatcher synchronously, in the order they were produced.

use crate::command::PlaceCommand;
use crate::letters::Letter;
use serde::{Deserialize, Serialize};

/// Something that happened during a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, strum::EnumDiscriminants)]
#[strum_discriminants(name(EventKind), derive(Hash, strum::Display))]
pub enum GameEvent {
    /// A player drew letters from the reserve.
    LettersDrawn {
        /// Drawing player.
        player: String,
        /// Letters drawn.
        letters: Vec<Letter>,
    },

    /// A player swapped letters with the reserve.
    LettersExchanged {
        /// Exchanging player.
        player: String,
        /// Letters given back.
        letters: Vec<Letter>,
    },

    /// A placement passed validation and was applied.
    PlacementValidated {
        /// Placing player.
        player: String,
        /// The command as played.
        command: PlaceCommand,
        /// Points scored by the placement itself.
        score: u32,
        /// New tiles, in path order.
        placed: Vec<Letter>,
        /// Words formed, main word first.
        words: Vec<String>,
    },

    /// A player skipped their turn.
    TurnPassed {
        /// Passing player.
        player: String,
    },

    /// An objective was completed.
    ObjectiveAchieved {
        /// Player awarded.
        player: String,
        /// Objective description.
        objective: String,
        /// Points awarded.
        points: u32,
    },

    /// The game ended.
    GameEnded {
        /// Final scores in seating order.
        scores: Vec<(String, i32)>,
    },
}

impl GameEvent {
    /// The player the event is about, if any.
    pub fn player(&self) -> Option<&str> {
        match self {
            GameEvent::LettersDrawn { player, .. }
            | GameEvent::LettersExchanged { player, .. }
            | GameEvent::PlacementValidated { player, .. }
            | GameEvent::TurnPassed { player }
            | GameEvent::ObjectiveAchieved { player, .. } => Some(player),
            GameEvent::GameEnded { .. } => None,
        }
    }

    /// The event's kind.
    pub fn kind(&self) -> EventKind {
        EventKind::from(self)
    }
}
