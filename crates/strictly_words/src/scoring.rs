//! Score computation for formed words.

use crate::board::Board;
use crate::words::FormedWord;
use tracing::instrument;

/// Bonus for placing every rack letter in one move.
pub const BINGO_BONUS: u32 = 50;

/// Scores one word.
///
/// Every letter counts its face value. Letter and word multipliers only apply
/// on cells covered by this move; existing letters count plain.
pub fn word_score(board: &Board, word: &FormedWord) -> u32 {
    let mut letters = 0;
    let mut multiplier = 1;
    for tile in word.tiles() {
        if tile.is_new {
            let bonus = board.tile(tile.position).bonus();
            letters += tile.letter.value() * bonus.letter_multiplier();
            multiplier *= bonus.word_multiplier();
        } else {
            letters += tile.letter.value();
        }
    }
    letters * multiplier
}

/// Scores a whole placement: every word, plus the bingo bonus.
#[instrument(skip(board, words), fields(words = words.len()))]
pub fn placement_score(board: &Board, words: &[FormedWord], bingo: bool) -> u32 {
    let words: u32 = words.iter().map(|w| word_score(board, w)).sum();
    if bingo { words + BINGO_BONUS } else { words }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Orientation, Position};
    use crate::letters::Letter;
    use crate::words::discover_words;

    fn run(start: Position, orientation: Orientation, word: &str) -> Vec<(Position, Letter)> {
        word.chars()
            .enumerate()
            .map(|(i, c)| (start.offset(orientation, i as isize).unwrap(), Letter::new(c)))
            .collect()
    }

    #[test]
    fn test_center_double_word() {
        let board = Board::new("t");
        let placed = run(Position::CENTER, Orientation::Vertical, "vendre");
        let words = discover_words(&board, &placed, Orientation::Vertical);
        // Rows 7..=12 at column 7: h8 D, i8 ., j8 ., k8 ., l8 d, m8 .
        // Letters: v4 e1 n1 d2 r1*2 e1 = 11, doubled = 22.
        assert_eq!(placement_score(&board, &words, false), 22);
    }

    #[test]
    fn test_existing_letters_ignore_bonuses() {
        let mut board = Board::new("t");
        board.place(Position::CENTER, Letter::new('a'));
        board.begin_turn();
        let placed = run(Position::new(7, 8).unwrap(), Orientation::Horizontal, "s");
        let words = discover_words(&board, &placed, Orientation::Horizontal);
        // "as": a counts 1 without the center double word, s on h9 plain.
        assert_eq!(placement_score(&board, &words, false), 2);
    }

    #[test]
    fn test_blank_scores_zero_and_bingo_adds_fifty() {
        let board = Board::new("t");
        let placed = vec![
            (Position::CENTER, Letter::blank_as('z')),
            (Position::new(7, 8).unwrap(), Letter::new('a')),
        ];
        let words = discover_words(&board, &placed, Orientation::Horizontal);
        assert_eq!(placement_score(&board, &words, false), 2);
        assert_eq!(placement_score(&board, &words, true), 52);
    }
}
