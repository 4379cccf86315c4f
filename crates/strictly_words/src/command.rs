//! Player commands: placement, exchange and pass.
//!
//! Commands are domain values, validated independently of execution. The
//! textual forms are:
//!
//! - `place h8v vendre`: row letter, 1-based column, `h`/`v` orientation
//!   (optional for a single letter), then the letters. Uppercase letters are
//!   blanks standing for that letter, `*` is a blank still to be resolved.
//! - `exchange ab*`: rack letters to swap, `*` for a blank.
//! - `pass`

use crate::board::{Orientation, Position};
use crate::letters::{BLANK, VOWELS};
use derive_more::{Display, Error};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One letter of a placement command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandLetter {
    /// A regular tile.
    Regular(char),
    /// A blank tile, with the letter it stands for once known.
    Blank(Option<char>),
}

impl CommandLetter {
    /// Parses one character of the command text.
    pub fn from_char(c: char) -> Result<Self, CommandParseError> {
        match c {
            BLANK => Ok(CommandLetter::Blank(None)),
            c if c.is_ascii_lowercase() => Ok(CommandLetter::Regular(c)),
            c if c.is_ascii_uppercase() => Ok(CommandLetter::Blank(Some(c.to_ascii_lowercase()))),
            other => Err(CommandParseError::InvalidLetter(other)),
        }
    }

    /// The concrete letter, if resolved.
    pub fn character(&self) -> Option<char> {
        match self {
            CommandLetter::Regular(c) | CommandLetter::Blank(Some(c)) => Some(*c),
            CommandLetter::Blank(None) => None,
        }
    }

    /// True for blank tiles.
    pub fn is_blank(&self) -> bool {
        matches!(self, CommandLetter::Blank(_))
    }

    /// The character needed on the rack to play this letter.
    pub fn rack_character(&self) -> char {
        match self {
            CommandLetter::Regular(c) => *c,
            CommandLetter::Blank(_) => BLANK,
        }
    }
}

impl std::fmt::Display for CommandLetter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandLetter::Regular(c) => write!(f, "{c}"),
            CommandLetter::Blank(Some(c)) => write!(f, "{}", c.to_ascii_uppercase()),
            CommandLetter::Blank(None) => write!(f, "{BLANK}"),
        }
    }
}

/// Error parsing a command.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum CommandParseError {
    /// Nothing to parse.
    #[display("Empty command")]
    Empty,

    /// The verb is not `place`, `exchange` or `pass`.
    #[display("Unknown command '{}'", _0)]
    UnknownVerb(#[error(not(source))] String),

    /// The coordinate part is not a board position.
    #[display("Invalid position '{}'", _0)]
    InvalidPosition(#[error(not(source))] String),

    /// Several letters were given without an orientation.
    #[display("Orientation (h or v) is required to place several letters")]
    MissingOrientation,

    /// A character that is not a letter or `*`.
    #[display("Invalid letter '{}'", _0)]
    InvalidLetter(#[error(not(source))] char),

    /// No letters were given.
    #[display("No letters given")]
    NoLetters,

    /// Text left over after the letters.
    #[display("Unexpected '{}' after the letters", _0)]
    TrailingInput(#[error(not(source))] String),
}

/// A request to place letters along a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceCommand {
    sender_id: String,
    letters: Vec<CommandLetter>,
    origin: Position,
    orientation: Orientation,
}

impl PlaceCommand {
    /// Creates a placement command.
    pub fn new(
        sender_id: impl Into<String>,
        letters: Vec<CommandLetter>,
        origin: Position,
        orientation: Orientation,
    ) -> Self {
        Self {
            sender_id: sender_id.into(),
            letters,
            origin,
            orientation,
        }
    }

    /// Parses `"<position>[h|v] <letters>"`.
    #[instrument(skip(sender_id))]
    pub fn parse(sender_id: &str, text: &str) -> Result<Self, CommandParseError> {
        let mut parts = text.split_whitespace();
        let target = parts.next().ok_or(CommandParseError::Empty)?;
        let letters = parts.next().ok_or(CommandParseError::NoLetters)?;
        if let Some(extra) = parts.next() {
            return Err(CommandParseError::TrailingInput(extra.to_string()));
        }

        let letters = letters
            .chars()
            .map(CommandLetter::from_char)
            .collect::<Result<Vec<_>, _>>()?;
        if letters.is_empty() {
            return Err(CommandParseError::NoLetters);
        }

        let target = target.to_ascii_lowercase();
        let explicit = match target.chars().last() {
            Some('h') => Some(Orientation::Horizontal),
            Some('v') => Some(Orientation::Vertical),
            _ => None,
        };
        let (origin, orientation) = match explicit {
            Some(orientation) if target.len() > 2 => {
                let origin = target[..target.len() - 1]
                    .parse::<Position>()
                    .map_err(|_| CommandParseError::InvalidPosition(target.clone()))?;
                (origin, orientation)
            }
            _ => {
                let origin = target
                    .parse::<Position>()
                    .map_err(|_| CommandParseError::InvalidPosition(target.clone()))?;
                if letters.len() > 1 {
                    return Err(CommandParseError::MissingOrientation);
                }
                (origin, Orientation::Horizontal)
            }
        };

        Ok(Self::new(sender_id, letters, origin, orientation))
    }

    /// Who sent the command.
    pub fn sender_id(&self) -> &str {
        &self.sender_id
    }

    /// Letters in path order.
    pub fn letters(&self) -> &[CommandLetter] {
        &self.letters
    }

    /// First cell of the path.
    pub fn origin(&self) -> Position {
        self.origin
    }

    /// Direction of the path.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// True when every blank knows which letter it stands for.
    pub fn is_resolved(&self) -> bool {
        self.letters.iter().all(|l| l.character().is_some())
    }

    /// Assigns a pseudo-random vowel to every unresolved blank.
    ///
    /// This is a placeholder policy, not a rule of the game: callers that know
    /// which letter a blank stands for should send it in uppercase instead.
    #[instrument(skip(self, rng), fields(sender = %self.sender_id))]
    pub fn resolve_blanks<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for letter in &mut self.letters {
            if let CommandLetter::Blank(None) = letter {
                let vowel = *VOWELS.choose(rng).unwrap_or(&'e');
                debug!(vowel = %vowel, "Resolved blank");
                *letter = CommandLetter::Blank(Some(vowel));
            }
        }
    }
}

impl std::fmt::Display for PlaceCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let orientation = match self.orientation {
            Orientation::Horizontal => 'h',
            Orientation::Vertical => 'v',
        };
        write!(f, "{}{} ", self.origin, orientation)?;
        for letter in &self.letters {
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}

/// Any command a player can send on their turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Place letters on the board.
    Place(PlaceCommand),
    /// Swap rack letters with the reserve.
    Exchange(Vec<char>),
    /// Skip the turn.
    Pass,
}

impl Command {
    /// Parses `place ...`, `exchange ...` or `pass`.
    #[instrument(skip(sender_id))]
    pub fn parse(sender_id: &str, text: &str) -> Result<Self, CommandParseError> {
        let text = text.trim();
        let (verb, rest) = text.split_once(char::is_whitespace).unwrap_or((text, ""));
        match verb.to_ascii_lowercase().as_str() {
            "" => Err(CommandParseError::Empty),
            "place" => PlaceCommand::parse(sender_id, rest).map(Command::Place),
            "exchange" => {
                let letters: Vec<char> = rest.trim().chars().collect();
                if letters.is_empty() {
                    return Err(CommandParseError::NoLetters);
                }
                if let Some(bad) = letters
                    .iter()
                    .find(|c| !(c.is_ascii_lowercase() || **c == BLANK))
                {
                    return Err(CommandParseError::InvalidLetter(*bad));
                }
                Ok(Command::Exchange(letters))
            }
            "pass" => Ok(Command::Pass),
            other => Err(CommandParseError::UnknownVerb(other.to_string())),
        }
    }
}
