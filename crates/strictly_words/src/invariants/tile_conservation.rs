//! Tile conservation: tiles move between reserve, racks and board, never
//! appear or vanish.

use super::Invariant;
use crate::game::Game;

/// Invariant: the per-character census of board, racks and reserve equals the
/// census at game start. Blanks count as `*` wherever they are.
pub struct TileConservationInvariant;

impl Invariant<Game> for TileConservationInvariant {
    fn holds(game: &Game) -> bool {
        game.tile_census() == *game.initial_census()
    }

    fn description() -> &'static str {
        "Tiles are conserved across reserve, racks and board"
    }
}
