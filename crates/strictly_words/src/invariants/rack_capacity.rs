//! Rack capacity invariant.

use super::Invariant;
use crate::game::Game;
use crate::rack::RACK_CAPACITY;

/// Invariant: no rack ever holds more than seven letters.
pub struct RackCapacityInvariant;

impl Invariant<Game> for RackCapacityInvariant {
    fn holds(game: &Game) -> bool {
        game.players()
            .iter()
            .all(|player| player.rack().len() <= RACK_CAPACITY)
    }

    fn description() -> &'static str {
        "Racks hold at most seven letters"
    }
}
