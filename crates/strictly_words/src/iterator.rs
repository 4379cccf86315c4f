//! Cursors walking the board along one axis.
//!
//! Neither cursor clamps at the edges. A cursor may step off the board; its
//! [`current_position`](BoardIterator::current_position) then returns `None`
//! and the caller decides whether that means "reject" (placement checks) or
//! "stop" (word extension).

use crate::board::{Board, Orientation, Position};
use crate::command::PlaceCommand;
use crate::letters::Letter;

/// Forward cursor: increments the row for vertical, the column for horizontal.
#[derive(Debug, Clone)]
pub struct BoardIterator<'a> {
    board: &'a Board,
    row: isize,
    column: isize,
    orientation: Orientation,
}

impl<'a> BoardIterator<'a> {
    /// Starts at the command's origin, along its orientation.
    pub fn new(board: &'a Board, command: &PlaceCommand) -> Self {
        Self::at(board, command.origin(), command.orientation())
    }

    /// Starts at an arbitrary position.
    pub fn at(board: &'a Board, origin: Position, orientation: Orientation) -> Self {
        Self {
            board,
            row: origin.row() as isize,
            column: origin.column() as isize,
            orientation,
        }
    }

    /// Current cell, or `None` once the cursor has left the board.
    pub fn current_position(&self) -> Option<Position> {
        Position::from_signed(self.row, self.column)
    }

    /// Letter under the cursor, if on the board and occupied.
    pub fn current_letter(&self) -> Option<Letter> {
        self.current_position()
            .and_then(|position| self.board.letter_at(position))
    }

    /// Steps one cell forward.
    pub fn advance(&mut self) {
        let (dr, dc) = self.orientation.delta();
        self.row += dr;
        self.column += dc;
    }

    /// Axis the cursor walks.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
}

/// Backward cursor: walks left or up from a fixed origin.
#[derive(Debug, Clone)]
pub struct BackwardIterator<'a> {
    board: &'a Board,
    row: isize,
    column: isize,
    orientation: Orientation,
}

impl<'a> BackwardIterator<'a> {
    /// Starts at the command's origin, along its orientation.
    pub fn new(board: &'a Board, command: &PlaceCommand) -> Self {
        Self::at(board, command.origin(), command.orientation())
    }

    /// Starts at an arbitrary position.
    pub fn at(board: &'a Board, origin: Position, orientation: Orientation) -> Self {
        Self {
            board,
            row: origin.row() as isize,
            column: origin.column() as isize,
            orientation,
        }
    }

    /// Steps one cell backward.
    pub fn previous(&mut self) {
        let (dr, dc) = self.orientation.delta();
        self.row -= dr;
        self.column -= dc;
    }

    /// Axis coordinate of the cursor (row when vertical, column when
    /// horizontal). Negative once the cursor has left the board.
    pub fn get_previous(&self) -> isize {
        match self.orientation {
            Orientation::Horizontal => self.column,
            Orientation::Vertical => self.row,
        }
    }

    /// Current cell, or `None` once the cursor has left the board.
    pub fn current_position(&self) -> Option<Position> {
        Position::from_signed(self.row, self.column)
    }

    /// Letter under the cursor, if on the board and occupied.
    pub fn current_letter(&self) -> Option<Letter> {
        self.current_position()
            .and_then(|position| self.board.letter_at(position))
    }

    /// Axis the cursor walks.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
}

/// First cell of the run of occupied cells ending just before `position`.
///
/// Returns `position` itself when the cell before it is empty or off-board.
pub fn word_start(board: &Board, position: Position, orientation: Orientation) -> Position {
    let mut cursor = BackwardIterator::at(board, position, orientation);
    let mut start = position;
    loop {
        cursor.previous();
        match cursor.current_position() {
            Some(previous) if board.is_occupied(previous) => start = previous,
            _ => return start,
        }
    }
}
