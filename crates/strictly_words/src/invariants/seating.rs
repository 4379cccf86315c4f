//! Seating invariant: the turn order matches the players.

use super::Invariant;
use crate::game::Game;

/// Invariant: the turn manager seats exactly the game's players, in the same
/// order, and the active seat exists.
pub struct SeatingInvariant;

impl Invariant<Game> for SeatingInvariant {
    fn holds(game: &Game) -> bool {
        let seated = game.turns().players();
        seated.len() == game.players().len()
            && seated
                .iter()
                .zip(game.players())
                .all(|(name, player)| name == player.id())
            && game.turns().active_index() < seated.len()
    }

    fn description() -> &'static str {
        "Turn order seats every player once"
    }
}
