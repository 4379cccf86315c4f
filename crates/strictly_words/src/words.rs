//! Word discovery: every word a placement forms.
//!
//! Discovery runs against the board as it is *before* the placement, with the
//! new tiles laid over it, so a rejected placement never touches the board.

use crate::board::{Board, Orientation, Position};
use crate::iterator::{BackwardIterator, BoardIterator};
use crate::letters::Letter;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A letter that is part of a formed word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordTile {
    /// Cell the letter sits on.
    pub position: Position,
    /// The letter.
    pub letter: Letter,
    /// True if placed by the move being validated.
    pub is_new: bool,
}

/// A word formed by a placement, in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormedWord {
    tiles: Vec<WordTile>,
    orientation: Orientation,
}

impl FormedWord {
    /// Letters in reading order.
    pub fn tiles(&self) -> &[WordTile] {
        &self.tiles
    }

    /// Axis the word reads along.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The word as lowercase text.
    pub fn text(&self) -> String {
        self.tiles.iter().map(|t| t.letter.character()).collect()
    }

    /// Number of letters.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// True for a word with no letters (never produced by discovery).
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Letters placed by this move.
    pub fn new_tiles(&self) -> impl Iterator<Item = &WordTile> {
        self.tiles.iter().filter(|t| t.is_new)
    }
}

impl std::fmt::Display for FormedWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text().to_uppercase())
    }
}

/// The board with a pending placement laid over it.
struct Overlay<'a> {
    board: &'a Board,
    placed: &'a [(Position, Letter)],
}

impl Overlay<'_> {
    fn tile(&self, position: Position) -> Option<WordTile> {
        if let Some((_, letter)) = self.placed.iter().find(|(p, _)| *p == position) {
            return Some(WordTile {
                position,
                letter: *letter,
                is_new: true,
            });
        }
        self.board.letter_at(position).map(|letter| WordTile {
            position,
            letter,
            is_new: false,
        })
    }

    /// Walks back to the start of the run through `anchor`, then forward to
    /// its end.
    fn assemble(&self, anchor: Position, orientation: Orientation) -> FormedWord {
        let mut backward = BackwardIterator::at(self.board, anchor, orientation);
        let mut start = anchor;
        loop {
            backward.previous();
            match backward.current_position() {
                Some(previous) if self.tile(previous).is_some() => start = previous,
                _ => break,
            }
        }

        let mut forward = BoardIterator::at(self.board, start, orientation);
        let mut tiles = Vec::new();
        while let Some(tile) = forward.current_position().and_then(|p| self.tile(p)) {
            tiles.push(tile);
            forward.advance();
        }
        FormedWord { tiles, orientation }
    }
}

/// Finds the main word and every perpendicular word a placement creates.
///
/// `placed` holds the new tiles in path order; it must not be empty and must
/// only name empty cells. The main word always comes first, even when it is a
/// single letter; callers drop words shorter than the minimum length.
#[instrument(skip(board, placed), fields(placed = placed.len()))]
pub fn discover_words(
    board: &Board,
    placed: &[(Position, Letter)],
    orientation: Orientation,
) -> Vec<FormedWord> {
    let Some((anchor, _)) = placed.first() else {
        return Vec::new();
    };
    let overlay = Overlay { board, placed };

    let mut words = vec![overlay.assemble(*anchor, orientation)];

    let cross = orientation.cross();
    for (position, _) in placed {
        let has_cross_neighbor = [-1, 1].iter().any(|step| {
            position
                .offset(cross, *step)
                .is_some_and(|p| board.is_occupied(p))
        });
        if has_cross_neighbor {
            words.push(overlay.assemble(*position, cross));
        }
    }

    debug!(
        words = ?words.iter().map(FormedWord::text).collect::<Vec<_>>(),
        "Discovered words"
    );
    words
}
