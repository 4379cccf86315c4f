//! Placement validation and application.
//!
//! Validation is read-only: it traces the path, checks the rack, discovers
//! every formed word, looks each one up and computes the score. Only a
//! [`ValidatedPlacement`] can be applied, and application cannot fail halfway.

use crate::board::{Board, Position};
use crate::command::{CommandLetter, PlaceCommand};
use crate::contracts::{Contract, LegalPlacement, PlacementContract, PlayerView};
use crate::dictionary::{DictionaryError, DictionaryRegistry};
use crate::letters::Letter;
use crate::rack::{RACK_CAPACITY, Rack};
use crate::scoring::placement_score;
use crate::words::{FormedWord, discover_words};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Shortest word that is checked against the dictionary.
pub const MIN_WORD_LENGTH: usize = 2;

/// Why a placement was rejected. A rejected placement changes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum PlacementError {
    /// The path runs off the board.
    #[display("Placement goes outside the board")]
    OutOfBounds,

    /// The path crosses a cell holding a different letter.
    #[display("Cell {} already holds '{}'", position, expected)]
    LetterMismatch {
        /// Conflicting cell.
        position: Position,
        /// Letter on the board.
        expected: char,
    },

    /// The rack does not hold the letters to place.
    #[display("Rack does not contain '{}'", _0)]
    MissingRackLetters(#[error(not(source))] String),

    /// A blank was sent without the letter it stands for.
    #[display("A blank letter has not been assigned")]
    UnresolvedBlank,

    /// Every cell of the path was already occupied.
    #[display("Placement adds no new letter")]
    NoNewLetters,

    /// The first placement does not cover the center cell.
    #[display("The first word must cover the center cell h8")]
    FirstMoveMustCoverCenter,

    /// The placement does not touch any letter already on the board.
    #[display("Placement must touch a letter already on the board")]
    NotConnected,

    /// No formed word reaches the minimum length.
    #[display("Words must have at least {} letters", MIN_WORD_LENGTH)]
    WordTooShort,

    /// A formed word is not in the dictionary.
    #[display("'{}' is not in the dictionary", _0)]
    NotInDictionary(#[error(not(source))] String),

    /// The board's dictionary is not loaded.
    #[display("Unknown dictionary '{}'", _0)]
    UnknownDictionary(#[error(not(source))] String),

    /// The dictionary could not be read. Registry lookups do not parse files,
    /// so only callers converting a load error see this.
    #[display("Malformed dictionary: {}", _0)]
    MalformedDictionary(#[error(not(source))] String),

    /// A postcondition failed after application.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(#[error(not(source))] String),
}

impl From<DictionaryError> for PlacementError {
    fn from(err: DictionaryError) -> Self {
        match err {
            DictionaryError::UnknownDictionary(id) => PlacementError::UnknownDictionary(id),
            DictionaryError::Malformed(message) => PlacementError::MalformedDictionary(message),
        }
    }
}

/// A placement that passed every check, ready to apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedPlacement {
    command: PlaceCommand,
    placed: Vec<(Position, Letter)>,
    rack_letters: Vec<char>,
    words: Vec<FormedWord>,
    score: u32,
    bingo: bool,
}

impl ValidatedPlacement {
    /// The validated command.
    pub fn command(&self) -> &PlaceCommand {
        &self.command
    }

    /// New tiles, in path order.
    pub fn placed(&self) -> &[(Position, Letter)] {
        &self.placed
    }

    /// Rack characters consumed (`*` for blanks).
    pub fn rack_letters(&self) -> &[char] {
        &self.rack_letters
    }

    /// Words formed, main word first.
    pub fn words(&self) -> &[FormedWord] {
        &self.words
    }

    /// Points scored, bingo included.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// True if all seven rack letters were placed.
    pub fn bingo(&self) -> bool {
        self.bingo
    }
}

/// Validates placements against a dictionary registry.
#[derive(Debug, Clone, Copy)]
pub struct PlacementValidator<'a> {
    registry: &'a DictionaryRegistry,
}

impl<'a> PlacementValidator<'a> {
    /// Creates a validator reading from `registry`.
    pub fn new(registry: &'a DictionaryRegistry) -> Self {
        Self { registry }
    }

    /// Checks a placement without modifying anything.
    ///
    /// Words are looked up in the board's dictionary.
    ///
    /// # Errors
    ///
    /// Structural rejections come first (bounds, mismatch, rack, center,
    /// connection), then lexical ones (too short, not in dictionary, unknown
    /// dictionary).
    #[instrument(skip(self, board, rack, command), fields(command = %command, sender = command.sender_id()))]
    pub fn validate(
        &self,
        board: &Board,
        rack: &Rack,
        command: &PlaceCommand,
    ) -> Result<ValidatedPlacement, PlacementError> {
        let view = PlayerView { board, rack };
        let path = LegalPlacement::check(&view, command).inspect_err(|e| {
            warn!(reason = %e, "Placement rejected");
        })?;

        let mut placed = Vec::new();
        let mut rack_letters = Vec::new();
        for cell in path.iter().filter(|cell| cell.is_new()) {
            let letter = match cell.letter {
                CommandLetter::Regular(c) => Letter::new(c),
                CommandLetter::Blank(Some(c)) => Letter::blank_as(c),
                CommandLetter::Blank(None) => return Err(PlacementError::UnresolvedBlank),
            };
            placed.push((cell.position, letter));
            rack_letters.push(cell.letter.rack_character());
        }

        let words: Vec<FormedWord> = discover_words(board, &placed, command.orientation())
            .into_iter()
            .filter(|word| word.len() >= MIN_WORD_LENGTH)
            .collect();
        if words.is_empty() {
            warn!("Placement forms no word long enough");
            return Err(PlacementError::WordTooShort);
        }

        for word in &words {
            let text = word.text();
            if !self.registry.lookup(board.dictionary_id(), &text)? {
                warn!(word = %text, "Word not in dictionary");
                return Err(PlacementError::NotInDictionary(text));
            }
        }

        let bingo = placed.len() == RACK_CAPACITY;
        let score = placement_score(board, &words, bingo);
        debug!(score, bingo, "Placement validated");

        Ok(ValidatedPlacement {
            command: command.clone(),
            placed,
            rack_letters,
            words,
            score,
            bingo,
        })
    }

    /// Validates then applies a placement.
    ///
    /// On error nothing is modified.
    pub fn place(
        &self,
        board: &mut Board,
        rack: &mut Rack,
        command: &PlaceCommand,
    ) -> Result<ValidatedPlacement, PlacementError> {
        let validated = self.validate(board, rack, command)?;
        apply(board, rack, &validated)?;
        Ok(validated)
    }
}

/// Applies a validated placement: takes the letters off the rack, clears last
/// turn's markers and puts the new tiles down.
///
/// # Errors
///
/// Returns [`PlacementError::MissingRackLetters`] if the rack changed since
/// validation; the board and rack are then untouched.
#[instrument(skip(board, rack, placement), fields(command = %placement.command, score = placement.score))]
pub fn apply(
    board: &mut Board,
    rack: &mut Rack,
    placement: &ValidatedPlacement,
) -> Result<(), PlacementError> {
    #[cfg(debug_assertions)]
    let (board_before, rack_before) = (board.clone(), rack.clone());

    rack.remove_letters(&placement.rack_letters)
        .map_err(|_| PlacementError::MissingRackLetters(placement.rack_letters.iter().collect()))?;

    board.begin_turn();
    for (position, letter) in &placement.placed {
        board.place(*position, *letter);
    }

    #[cfg(debug_assertions)]
    {
        PlacementContract::post(
            &PlayerView {
                board: &board_before,
                rack: &rack_before,
            },
            &PlayerView {
                board: &*board,
                rack: &*rack,
            },
        )?;
    }

    info!(
        words = ?placement.words.iter().map(FormedWord::text).collect::<Vec<_>>(),
        "Placement applied"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> DictionaryRegistry {
        let registry = DictionaryRegistry::new();
        registry.load("fr", "test", ["vendre", "vent", "as", "sa", "at", "ta", "tas"]);
        registry
    }

    fn command(text: &str) -> PlaceCommand {
        PlaceCommand::parse("p1", text).unwrap()
    }

    #[test]
    fn test_place_vendre_on_empty_board() {
        let registry = registry();
        let mut board = Board::new("fr");
        let mut rack = Rack::from_chars("vendrex").unwrap();
        let result = PlacementValidator::new(&registry)
            .place(&mut board, &mut rack, &command("h8v vendre"))
            .unwrap();

        assert_eq!(result.words().len(), 1);
        assert_eq!(result.score(), 22);
        assert!(!result.bingo());
        assert_eq!(board.placed_this_turn().len(), 6);
        assert_eq!(rack.characters(), vec!['x']);
    }

    #[test]
    fn test_unknown_word_changes_nothing() {
        let registry = registry();
        let mut board = Board::new("fr");
        let mut rack = Rack::from_chars("vendrex").unwrap();
        let (board_before, rack_before) = (board.clone(), rack.clone());

        let result = PlacementValidator::new(&registry).place(&mut board, &mut rack, &command("h8h vexe"));
        assert_eq!(result, Err(PlacementError::NotInDictionary("vexe".to_string())));
        assert_eq!(board, board_before);
        assert_eq!(rack, rack_before);
    }

    #[test]
    fn test_unknown_dictionary_is_reported() {
        let registry = registry();
        let mut board = Board::new("en");
        let mut rack = Rack::from_chars("as").unwrap();
        let result = PlacementValidator::new(&registry).place(&mut board, &mut rack, &command("h8h as"));
        assert_eq!(result, Err(PlacementError::UnknownDictionary("en".to_string())));
        assert!(board.is_empty());
    }

    #[test]
    fn test_dictionary_errors_keep_their_meaning() {
        assert_eq!(
            PlacementError::from(DictionaryError::UnknownDictionary("en".to_string())),
            PlacementError::UnknownDictionary("en".to_string())
        );
        assert_eq!(
            PlacementError::from(DictionaryError::Malformed("bad json".to_string())),
            PlacementError::MalformedDictionary("bad json".to_string())
        );
    }

    #[test]
    fn test_single_letter_first_move_is_too_short() {
        let registry = registry();
        let board = Board::new("fr");
        let rack = Rack::from_chars("a").unwrap();
        let result = PlacementValidator::new(&registry).validate(&board, &rack, &command("h8 a"));
        assert_eq!(result, Err(PlacementError::WordTooShort));
    }

    #[test]
    fn test_cross_words_are_checked_and_scored() {
        let registry = registry();
        let validator = PlacementValidator::new(&registry);
        let mut board = Board::new("fr");
        let mut rack = Rack::from_chars("as").unwrap();
        validator.place(&mut board, &mut rack, &command("h8h as")).unwrap();

        let mut rack = Rack::from_chars("ta").unwrap();
        let result = validator.place(&mut board, &mut rack, &command("i8h ta")).unwrap();
        let texts: Vec<_> = result.words().iter().map(FormedWord::text).collect();
        assert_eq!(texts, vec!["ta", "at", "sa"]);
        // i9 is a double letter: ta 3 + at 2 + sa 3.
        assert_eq!(result.score(), 8);
        assert_eq!(board.placed_this_turn().len(), 2);
    }

    #[test]
    fn test_bingo_bonus() {
        let registry = DictionaryRegistry::new();
        registry.load("fr", "test", ["abaisse"]);
        let mut board = Board::new("fr");
        let mut rack = Rack::from_chars("abaisse").unwrap();
        let result = PlacementValidator::new(&registry)
            .place(&mut board, &mut rack, &command("h8h abaisse"))
            .unwrap();
        assert!(result.bingo());
        assert!(rack.is_empty());
        // a1 b3 a1 i1 s2 (h12 double letter) s1 e1 = 10, h8 doubles it, +50.
        assert_eq!(result.score(), 70);
    }
}
