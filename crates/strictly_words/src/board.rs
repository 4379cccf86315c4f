//! Board model: positions, orientations, bonus tiles and the 15×15 grid.

use crate::dictionary::DictionaryId;
use crate::letters::Letter;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Width and height of the board.
pub const BOARD_SIZE: usize = 15;

/// Standard bonus layout. `T` triple word, `D` double word, `t` triple
/// letter, `d` double letter.
const LAYOUT: [&str; BOARD_SIZE] = [
    "T..d...T...d..T",
    ".D...t...t...D.",
    "..D...d.d...D..",
    "d..D...d...D..d",
    "....D.....D....",
    ".t...t...t...t.",
    "..d...d.d...d..",
    "T..d...D...d..T",
    "..d...d.d...d..",
    ".t...t...t...t.",
    "....D.....D....",
    "d..D...d...D..d",
    "..D...d.d...D..",
    ".D...t...t...D.",
    "T..d...T...d..T",
];

/// Direction a placement runs in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
pub enum Orientation {
    /// Left to right, column increases.
    Horizontal,
    /// Top to bottom, row increases.
    Vertical,
}

impl Orientation {
    /// The perpendicular orientation.
    pub fn cross(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// `(row, column)` step for one move along this orientation.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
        }
    }
}

/// A cell coordinate, both components in `0..BOARD_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawPosition")]
pub struct Position {
    row: usize,
    column: usize,
}

/// Unchecked wire form of a [`Position`].
#[derive(Deserialize)]
struct RawPosition {
    row: usize,
    column: usize,
}

impl TryFrom<RawPosition> for Position {
    type Error = PositionParseError;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        Position::new(raw.row, raw.column).ok_or_else(|| PositionParseError {
            input: format!("({}, {})", raw.row, raw.column),
        })
    }
}

/// Error parsing a textual coordinate such as `h8`.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid position '{}'", input)]
pub struct PositionParseError {
    /// Rejected input.
    pub input: String,
}

impl Position {
    /// The center cell, which the first placement must cover.
    pub const CENTER: Position = Position { row: 7, column: 7 };

    /// Creates a position, or `None` when outside the board.
    pub fn new(row: usize, column: usize) -> Option<Self> {
        (row < BOARD_SIZE && column < BOARD_SIZE).then_some(Self { row, column })
    }

    /// Creates a position from signed coordinates, or `None` when outside.
    pub fn from_signed(row: isize, column: isize) -> Option<Self> {
        let row = usize::try_from(row).ok()?;
        let column = usize::try_from(column).ok()?;
        Self::new(row, column)
    }

    /// Row index.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Column index.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Coordinate along the given orientation's axis.
    pub fn axis(&self, orientation: Orientation) -> usize {
        match orientation {
            Orientation::Horizontal => self.column,
            Orientation::Vertical => self.row,
        }
    }

    /// Moves `steps` cells along `orientation` (negative moves backward).
    pub fn offset(&self, orientation: Orientation, steps: isize) -> Option<Self> {
        let (dr, dc) = orientation.delta();
        Self::from_signed(
            self.row as isize + dr * steps,
            self.column as isize + dc * steps,
        )
    }

    /// Row letter and 1-based column, e.g. `h8` for the center.
    pub fn label(&self) -> String {
        format!("{}{}", (b'a' + self.row as u8) as char, self.column + 1)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Position {
    type Err = PositionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || PositionParseError {
            input: s.to_string(),
        };
        let s = s.trim().to_ascii_lowercase();
        let mut chars = s.chars();
        let row_char = chars.next().ok_or_else(err)?;
        if !row_char.is_ascii_lowercase() {
            return Err(err());
        }
        let row = (row_char as u8 - b'a') as usize;
        let column: usize = chars.as_str().parse().map_err(|_| err())?;
        if column == 0 {
            return Err(err());
        }
        Position::new(row, column - 1).ok_or_else(err)
    }
}

/// Score multiplier printed on a cell.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Bonus {
    /// No multiplier.
    #[default]
    Base,
    /// Letter counts twice.
    DoubleLetter,
    /// Letter counts three times.
    TripleLetter,
    /// Word counts twice.
    DoubleWord,
    /// Word counts three times.
    TripleWord,
}

impl Bonus {
    /// Multiplier applied to a letter placed on this cell.
    pub fn letter_multiplier(self) -> u32 {
        match self {
            Bonus::DoubleLetter => 2,
            Bonus::TripleLetter => 3,
            _ => 1,
        }
    }

    /// Multiplier applied to a word covering this cell with a new tile.
    pub fn word_multiplier(self) -> u32 {
        match self {
            Bonus::DoubleWord => 2,
            Bonus::TripleWord => 3,
            _ => 1,
        }
    }

    fn from_layout(symbol: u8) -> Self {
        match symbol {
            b'T' => Bonus::TripleWord,
            b'D' => Bonus::DoubleWord,
            b't' => Bonus::TripleLetter,
            b'd' => Bonus::DoubleLetter,
            _ => Bonus::Base,
        }
    }
}

/// One board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tile {
    bonus: Bonus,
    occupant: Option<Letter>,
    placed_this_turn: bool,
}

impl Tile {
    /// The cell's fixed bonus.
    pub fn bonus(&self) -> Bonus {
        self.bonus
    }

    /// The letter on the cell, if any.
    pub fn occupant(&self) -> Option<Letter> {
        self.occupant
    }

    /// True if the letter was placed during the current turn.
    pub fn placed_this_turn(&self) -> bool {
        self.placed_this_turn
    }

    /// True if a letter sits on the cell.
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }
}

/// The 15×15 game board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    tiles: [[Tile; BOARD_SIZE]; BOARD_SIZE],
    dictionary_id: DictionaryId,
    placement_achieved: bool,
}

impl Board {
    /// Creates an empty board with the standard bonus layout.
    #[instrument]
    pub fn new(dictionary_id: &str) -> Self {
        let mut tiles = [[Tile::default(); BOARD_SIZE]; BOARD_SIZE];
        for (row, line) in LAYOUT.iter().enumerate() {
            for (column, symbol) in line.bytes().enumerate() {
                tiles[row][column].bonus = Bonus::from_layout(symbol);
            }
        }
        Self {
            tiles,
            dictionary_id: dictionary_id.to_string(),
            placement_achieved: false,
        }
    }

    /// Dictionary words on this board are checked against.
    pub fn dictionary_id(&self) -> &str {
        &self.dictionary_id
    }

    /// True once any placement has been applied.
    pub fn placement_achieved(&self) -> bool {
        self.placement_achieved
    }

    /// The tile at a position.
    pub fn tile(&self, position: Position) -> &Tile {
        &self.tiles[position.row][position.column]
    }

    /// The letter at a position, if any.
    pub fn letter_at(&self, position: Position) -> Option<Letter> {
        self.tile(position).occupant
    }

    /// True if a letter sits at the position.
    pub fn is_occupied(&self, position: Position) -> bool {
        self.tile(position).is_occupied()
    }

    /// True if the signed coordinate lies on the board and holds a letter.
    pub fn is_occupied_at(&self, row: isize, column: isize) -> bool {
        Position::from_signed(row, column).is_some_and(|p| self.is_occupied(p))
    }

    /// True if any orthogonal neighbor of `position` holds a letter.
    pub fn has_neighbor(&self, position: Position) -> bool {
        [(-1, 0), (1, 0), (0, -1), (0, 1)].iter().any(|(dr, dc)| {
            self.is_occupied_at(position.row as isize + dr, position.column as isize + dc)
        })
    }

    /// Every occupied position, row-major.
    pub fn occupied(&self) -> impl Iterator<Item = (Position, Letter)> + '_ {
        self.tiles.iter().enumerate().flat_map(|(row, line)| {
            line.iter().enumerate().filter_map(move |(column, tile)| {
                tile.occupant.map(|letter| (Position { row, column }, letter))
            })
        })
    }

    /// Positions covered during the current turn.
    pub fn placed_this_turn(&self) -> Vec<Position> {
        self.tiles
            .iter()
            .enumerate()
            .flat_map(|(row, line)| {
                line.iter()
                    .enumerate()
                    .filter(|(_, tile)| tile.placed_this_turn)
                    .map(move |(column, _)| Position { row, column })
            })
            .collect()
    }

    /// True when no letter has been placed.
    pub fn is_empty(&self) -> bool {
        self.occupied().next().is_none()
    }

    /// Clears the `placed_this_turn` flag on every tile.
    #[instrument(skip(self))]
    pub fn begin_turn(&mut self) {
        for tile in self.tiles.iter_mut().flatten() {
            tile.placed_this_turn = false;
        }
    }

    /// Puts a letter on an empty cell and marks it as placed this turn.
    ///
    /// Only the placement validator calls this, after every check passed.
    pub(crate) fn place(&mut self, position: Position, letter: Letter) {
        let tile = &mut self.tiles[position.row][position.column];
        debug_assert!(tile.occupant.is_none(), "placing over {position}");
        tile.occupant = Some(letter);
        tile.placed_this_turn = true;
        self.placement_achieved = true;
        debug!(%position, %letter, "Letter placed");
    }

    /// Formats the board, letters in uppercase and bonuses as symbols.
    pub fn display(&self) -> String {
        let mut result = String::from("   ");
        for column in 1..=BOARD_SIZE {
            result.push_str(&format!("{column:>3}"));
        }
        result.push('\n');
        for (row, line) in self.tiles.iter().enumerate() {
            result.push_str(&format!(" {} ", (b'a' + row as u8) as char));
            for tile in line {
                let symbol = match (tile.occupant, tile.bonus) {
                    (Some(letter), _) => letter.to_string(),
                    (None, Bonus::TripleWord) => "#".to_string(),
                    (None, Bonus::DoubleWord) => "=".to_string(),
                    (None, Bonus::TripleLetter) => "+".to_string(),
                    (None, Bonus::DoubleLetter) => "-".to_string(),
                    (None, Bonus::Base) => ".".to_string(),
                };
                result.push_str(&format!("{symbol:>3}"));
            }
            result.push('\n');
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(board: &Board, bonus: Bonus) -> usize {
        (0..BOARD_SIZE)
            .flat_map(|r| (0..BOARD_SIZE).map(move |c| (r, c)))
            .filter_map(|(r, c)| Position::new(r, c))
            .filter(|p| board.tile(*p).bonus() == bonus)
            .count()
    }

    #[test]
    fn test_standard_layout_counts() {
        let board = Board::new("fr");
        assert_eq!(count(&board, Bonus::TripleWord), 8);
        assert_eq!(count(&board, Bonus::DoubleWord), 17);
        assert_eq!(count(&board, Bonus::TripleLetter), 12);
        assert_eq!(count(&board, Bonus::DoubleLetter), 24);
        assert_eq!(board.tile(Position::CENTER).bonus(), Bonus::DoubleWord);
    }

    #[test]
    fn test_position_parse_and_label() {
        let center: Position = "h8".parse().unwrap();
        assert_eq!(center, Position::CENTER);
        assert_eq!(center.label(), "h8");
        assert_eq!("a1".parse::<Position>().unwrap(), Position::new(0, 0).unwrap());
        assert_eq!("O15".parse::<Position>().unwrap(), Position::new(14, 14).unwrap());
        assert!("p1".parse::<Position>().is_err());
        assert!("a0".parse::<Position>().is_err());
        assert!("a16".parse::<Position>().is_err());
        assert!("".parse::<Position>().is_err());
    }

    #[test]
    fn test_offset_stops_at_edges() {
        let corner = Position::new(0, 0).unwrap();
        assert_eq!(corner.offset(Orientation::Horizontal, -1), None);
        assert_eq!(
            corner.offset(Orientation::Vertical, 14),
            Position::new(14, 0)
        );
        assert_eq!(corner.offset(Orientation::Vertical, 15), None);
    }

    #[test]
    fn test_deserialized_position_is_checked() {
        let center: Position = serde_json::from_str(r#"{"row":7,"column":7}"#).unwrap();
        assert_eq!(center, Position::CENTER);
        assert!(serde_json::from_str::<Position>(r#"{"row":15,"column":0}"#).is_err());
        assert!(serde_json::from_str::<Position>(r#"{"row":0,"column":99}"#).is_err());
    }

    #[test]
    fn test_place_and_begin_turn() {
        let mut board = Board::new("fr");
        assert!(board.is_empty());
        board.place(Position::CENTER, Letter::new('a'));
        assert!(board.placement_achieved());
        assert_eq!(board.placed_this_turn(), vec![Position::CENTER]);
        board.begin_turn();
        assert!(board.placed_this_turn().is_empty());
        assert_eq!(board.letter_at(Position::CENTER), Some(Letter::new('a')));
        assert!(board.has_neighbor(Position::new(7, 8).unwrap()));
        assert!(!board.has_neighbor(Position::new(0, 0).unwrap()));
    }
}
