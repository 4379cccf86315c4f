//! Turn order, pass counting and rack refills.

use crate::letters::Letter;
use crate::rack::Rack;
use crate::reserve::Reserve;
use derive_more::Display;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Result of topping up a rack after a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefillOutcome {
    /// The rack is full again.
    Full {
        /// Letters drawn.
        drawn: Vec<Letter>,
    },
    /// The reserve ran out first.
    NoLettersLeft {
        /// Letters drawn before it ran out.
        drawn: Vec<Letter>,
    },
}

impl RefillOutcome {
    /// Letters drawn, whatever the outcome.
    pub fn drawn(&self) -> &[Letter] {
        match self {
            RefillOutcome::Full { drawn } | RefillOutcome::NoLettersLeft { drawn } => drawn,
        }
    }
}

/// Why a game ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum EndReason {
    /// A player emptied their rack with the reserve empty.
    #[display("{_0} played out")]
    RackEmptied(String),
    /// Too many turns in a row were passed.
    #[display("Too many consecutive passes")]
    ConsecutivePasses,
}

/// Seating order and whose turn it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnManager {
    players: Vec<String>,
    active: usize,
    turn: u32,
    consecutive_passes: u32,
    max_consecutive_passes: u32,
}

impl TurnManager {
    /// Seats `players` in order; the first one starts.
    pub fn new(players: Vec<String>, max_consecutive_passes: u32) -> Self {
        Self {
            players,
            active: 0,
            turn: 1,
            consecutive_passes: 0,
            max_consecutive_passes,
        }
    }

    /// Players in seating order.
    pub fn players(&self) -> &[String] {
        &self.players
    }

    /// Seat index of the player to act.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Name of the player to act.
    pub fn active_player(&self) -> &str {
        self.players
            .get(self.active)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// True if it is `player`'s turn.
    pub fn is_active(&self, player: &str) -> bool {
        self.active_player() == player
    }

    /// Turn number, starting at 1.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Passes in a row since the last placement or exchange.
    pub fn consecutive_passes(&self) -> u32 {
        self.consecutive_passes
    }

    /// True once the pass limit is reached.
    pub fn pass_limit_reached(&self) -> bool {
        self.consecutive_passes >= self.max_consecutive_passes
    }

    /// Hands the turn to the next player.
    #[instrument(skip(self), fields(turn = self.turn, player = %self.active_player()))]
    pub fn end_turn(&mut self, passed: bool) {
        if passed {
            self.consecutive_passes += 1;
        } else {
            self.consecutive_passes = 0;
        }
        if !self.players.is_empty() {
            self.active = (self.active + 1) % self.players.len();
        }
        self.turn += 1;
        debug!(next = %self.active_player(), passes = self.consecutive_passes, "Turn ended");
    }

    /// Tops a rack up from the reserve.
    pub fn refill<R: Rng + ?Sized>(
        &self,
        rack: &mut Rack,
        reserve: &mut Reserve,
        rng: &mut R,
    ) -> RefillOutcome {
        let outcome = rack.fill(reserve, rng);
        if outcome.reserve_exhausted {
            RefillOutcome::NoLettersLeft {
                drawn: outcome.drawn,
            }
        } else {
            RefillOutcome::Full {
                drawn: outcome.drawn,
            }
        }
    }
}
