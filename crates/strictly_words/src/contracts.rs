//! Contract-based validation for placements.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P(state, action)} action {Q(before, after)}. Preconditions are always
//! checked; postconditions run in debug builds.

use crate::board::{Board, Position};
use crate::command::{CommandLetter, PlaceCommand};
use crate::iterator::BoardIterator;
use crate::letters::Letter;
use crate::placement::PlacementError;
use crate::rack::{RACK_CAPACITY, Rack};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Error reported when a condition fails.
    type Error;

    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), Self::Error>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), Self::Error>;
}

/// What a placement is checked against: the board and the acting rack.
#[derive(Debug, Clone, Copy)]
pub struct PlayerView<'a> {
    /// Current board.
    pub board: &'a Board,
    /// Acting player's rack.
    pub rack: &'a Rack,
}

/// One cell of a placement path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathCell {
    /// Cell position.
    pub position: Position,
    /// Letter the command puts here.
    pub letter: CommandLetter,
    /// Letter already on the board, if any (always equal to `letter`).
    pub existing: Option<Letter>,
}

impl PathCell {
    /// True if this cell receives a new tile.
    pub fn is_new(&self) -> bool {
        self.existing.is_none()
    }
}

/// Walks the command's path, checking bounds and overwrites on the way.
///
/// # Errors
///
/// [`PlacementError::OutOfBounds`] if the path leaves the board,
/// [`PlacementError::LetterMismatch`] if it crosses a different letter.
#[instrument(skip(board, command), fields(command = %command))]
pub fn trace_path(board: &Board, command: &PlaceCommand) -> Result<Vec<PathCell>, PlacementError> {
    let mut cursor = BoardIterator::new(board, command);
    let mut path = Vec::with_capacity(command.letters().len());
    for letter in command.letters() {
        let position = cursor
            .current_position()
            .ok_or(PlacementError::OutOfBounds)?;
        let existing = board.letter_at(position);
        if let Some(existing) = existing {
            if Some(existing.character()) != letter.character() {
                return Err(PlacementError::LetterMismatch {
                    position,
                    expected: existing.character(),
                });
            }
        }
        path.push(PathCell {
            position,
            letter: *letter,
            existing,
        });
        cursor.advance();
    }
    Ok(path)
}

// ─────────────────────────────────────────────────────────────
//  Placement Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: every blank knows which letter it stands for.
pub struct BlanksResolved;

impl BlanksResolved {
    /// Checks the command.
    pub fn check(command: &PlaceCommand) -> Result<(), PlacementError> {
        if command.is_resolved() {
            Ok(())
        } else {
            Err(PlacementError::UnresolvedBlank)
        }
    }
}

/// Precondition: at least one new tile is placed.
pub struct PlacesNewTile;

impl PlacesNewTile {
    /// Checks the traced path.
    pub fn check(path: &[PathCell]) -> Result<(), PlacementError> {
        if path.iter().any(PathCell::is_new) {
            Ok(())
        } else {
            Err(PlacementError::NoNewLetters)
        }
    }
}

/// Precondition: the rack holds a tile for every new cell.
pub struct RackHoldsLetters;

impl RackHoldsLetters {
    /// Checks the rack against the traced path.
    #[instrument(skip(rack, path), fields(rack = %rack))]
    pub fn check(rack: &Rack, path: &[PathCell]) -> Result<(), PlacementError> {
        let needed: Vec<char> = path
            .iter()
            .filter(|cell| cell.is_new())
            .map(|cell| cell.letter.rack_character())
            .collect();
        if rack.contains_letters(&needed) {
            Ok(())
        } else {
            let needed: String = needed.into_iter().collect();
            warn!(needed = %needed, "Rack lacks letters");
            Err(PlacementError::MissingRackLetters(needed))
        }
    }
}

/// Precondition: the first placement of the game covers the center.
pub struct CoversCenterOnFirstMove;

impl CoversCenterOnFirstMove {
    /// Checks the traced path.
    pub fn check(board: &Board, path: &[PathCell]) -> Result<(), PlacementError> {
        if board.placement_achieved() || path.iter().any(|c| c.position == Position::CENTER) {
            Ok(())
        } else {
            Err(PlacementError::FirstMoveMustCoverCenter)
        }
    }
}

/// Precondition: after the first move, a placement touches existing letters.
pub struct TouchesExistingLetters;

impl TouchesExistingLetters {
    /// Checks the traced path.
    pub fn check(board: &Board, path: &[PathCell]) -> Result<(), PlacementError> {
        if !board.placement_achieved() {
            return Ok(());
        }
        let touches = path
            .iter()
            .any(|cell| !cell.is_new() || board.has_neighbor(cell.position));
        if touches {
            Ok(())
        } else {
            Err(PlacementError::NotConnected)
        }
    }
}

/// Composite precondition for a placement, before any dictionary lookup.
pub struct LegalPlacement;

impl LegalPlacement {
    /// Validates every structural precondition and returns the traced path.
    #[instrument(skip(view, command), fields(command = %command))]
    pub fn check(
        view: &PlayerView<'_>,
        command: &PlaceCommand,
    ) -> Result<Vec<PathCell>, PlacementError> {
        BlanksResolved::check(command)?;
        let path = trace_path(view.board, command)?;
        PlacesNewTile::check(&path)?;
        RackHoldsLetters::check(view.rack, &path)?;
        CoversCenterOnFirstMove::check(view.board, &path)?;
        TouchesExistingLetters::check(view.board, &path)?;
        Ok(path)
    }
}

// ─────────────────────────────────────────────────────────────
//  Placement Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for placements.
///
/// Preconditions: see [`LegalPlacement`].
///
/// Postconditions:
/// - No letter on the board before the move was moved or changed
/// - The rack is within capacity
pub struct PlacementContract;

impl<'a> Contract<PlayerView<'a>, PlaceCommand> for PlacementContract {
    type Error = PlacementError;

    fn pre(view: &PlayerView<'a>, command: &PlaceCommand) -> Result<(), PlacementError> {
        LegalPlacement::check(view, command).map(|_| ())
    }

    fn post(before: &PlayerView<'a>, after: &PlayerView<'a>) -> Result<(), PlacementError> {
        let kept = before
            .board
            .occupied()
            .all(|(position, letter)| after.board.letter_at(position) == Some(letter));
        if !kept {
            return Err(PlacementError::InvariantViolation(
                "existing letters changed".to_string(),
            ));
        }
        if after.rack.len() > RACK_CAPACITY {
            return Err(PlacementError::InvariantViolation(
                "rack over capacity".to_string(),
            ));
        }
        Ok(())
    }
}
