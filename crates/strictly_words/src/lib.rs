//! Strictly Words - rules engine for a word-placement board game
//!
//! Validates moves on a 15×15 board against a dictionary, scores them, keeps
//! the shared reserve and the players' racks, and feeds gameplay events to
//! bonus objectives. Pure logic: no I/O, no clocks, randomness injected.
//!
//! # Architecture
//!
//! - **Dictionary**: one immutable trie per dictionary id, swapped on reload
//! - **Board**: tiles, bonuses and the iterators that walk them
//! - **Placement**: contracts, word discovery, lookup and scoring
//! - **Reserve / Rack**: weighted draws and multiset racks
//! - **Game**: turns, objectives and the event log for one session
//!
//! # Example
//!
//! ```
//! use strictly_words::{DictionaryRegistry, Game, GameConfig, PlaceCommand};
//!
//! let registry = DictionaryRegistry::new();
//! registry.load("fr", "Demo", ["vendre", "vent"]);
//!
//! let mut game = Game::new(
//!     GameConfig::default(),
//!     "fr",
//!     vec!["ana".to_string(), "bob".to_string()],
//!     42,
//! )
//! .unwrap();
//! let command = PlaceCommand::parse("ana", "h8v vendre").unwrap();
//! // Racks are random, so the placement may be refused for missing letters.
//! let _ = game.place("ana", command, &registry);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod combinations;
mod command;
mod config;
mod dictionary;
mod events;
mod game;
mod iterator;
mod letters;
mod objectives;
mod placement;
mod rack;
mod reserve;
mod scoring;
mod trie;
mod turn;
mod words;

// Public modules - contracts and invariants are used on their own
pub mod contracts;
pub mod invariants;

// Crate-level exports - Letters
pub use letters::{
    BLANK, LETTER_DISTRIBUTION, Letter, VOWELS, is_consonant, is_vowel, normalize_word,
    point_value, total_points,
};

// Crate-level exports - Dictionary
pub use dictionary::{
    Dictionary, DictionaryError, DictionaryFile, DictionaryId, DictionaryRegistry,
};
pub use trie::Trie;

// Crate-level exports - Board
pub use board::{BOARD_SIZE, Board, Bonus, Orientation, Position, PositionParseError, Tile};
pub use iterator::{BackwardIterator, BoardIterator, word_start};

// Crate-level exports - Commands
pub use command::{Command, CommandLetter, CommandParseError, PlaceCommand};

// Crate-level exports - Words and scoring
pub use combinations::{
    candidate_words, interleave, pattern_along, unique_combinations, unique_permutations,
};
pub use scoring::{BINGO_BONUS, placement_score, word_score};
pub use words::{FormedWord, WordTile, discover_words};

// Crate-level exports - Placement
pub use placement::{
    MIN_WORD_LENGTH, PlacementError, PlacementValidator, ValidatedPlacement, apply,
};

// Crate-level exports - Reserve and rack
pub use rack::{FillOutcome, MIN_RESERVE_FOR_EXCHANGE, RACK_CAPACITY, Rack, RackError};
pub use reserve::{Reserve, ReserveEntry, ReserveError};

// Crate-level exports - Turns, events and objectives
pub use events::{EventKind, GameEvent};
pub use objectives::{
    Measure, Objective, ObjectiveAward, ObjectiveEngine, ObjectiveTemplate, OwnerProgress,
    Rule, Scope, catalog, has_exchanged_enough_points,
};
pub use turn::{EndReason, RefillOutcome, TurnManager};

// Crate-level exports - Game
pub use config::GameConfig;
pub use game::{
    CommandOutcome, ExchangeOutcome, Game, GameError, GameSetup, GameStatus, GameSummary,
    PlacementOutcome, PlayerState,
};
