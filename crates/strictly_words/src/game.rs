//! The per-session game: board, reserve, racks, turns, objectives and the
//! event log, driven by place, exchange and pass commands.
//!
//! Every command is atomic. A rejected command returns an error and leaves the
//! whole game, random state included, exactly as it was.

use crate::board::Board;
use crate::command::{Command, PlaceCommand};
use crate::config::GameConfig;
use crate::dictionary::DictionaryRegistry;
use crate::events::GameEvent;
use crate::letters::{BLANK, Letter};
use crate::objectives::{ObjectiveAward, ObjectiveEngine};
use crate::placement::{PlacementError, PlacementValidator, apply};
use crate::rack::{Rack, RackError};
use crate::reserve::Reserve;
use crate::turn::{EndReason, RefillOutcome, TurnManager};
use crate::words::FormedWord;
use derive_getters::Getters;
use derive_more::{Display, Error, From};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info, instrument, warn};

/// Why a command was refused.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum GameError {
    /// The placement broke a rule.
    #[display("{_0}")]
    #[from]
    Placement(PlacementError),

    /// The rack or reserve refused the exchange.
    #[display("{_0}")]
    #[from]
    Rack(RackError),

    /// Someone other than the active player tried to act.
    #[display("It is {active}'s turn, not {player}'s")]
    NotYourTurn {
        /// Player who sent the command.
        player: String,
        /// Player whose turn it is.
        active: String,
    },

    /// The player is not seated in this game.
    #[display("Unknown player '{_0}'")]
    UnknownPlayer(#[error(not(source))] String),

    /// The same name was seated twice.
    #[display("Player '{_0}' is seated twice")]
    DuplicatePlayer(#[error(not(source))] String),

    /// A placement command names a different sender than the acting player.
    #[display("Command from '{sender}' sent on behalf of '{player}'")]
    SenderMismatch {
        /// Acting player.
        player: String,
        /// Sender recorded in the command.
        sender: String,
    },

    /// A game was started with nobody seated.
    #[display("A game needs at least one player")]
    NoPlayers,

    /// The game has already ended.
    #[display("The game is over")]
    GameOver,

    /// A game invariant failed after a command.
    #[display("Invariant violation: {_0}")]
    InvariantViolation(#[error(not(source))] String),
}

/// One seated player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PlayerState {
    id: String,
    rack: Rack,
    score: i32,
}

/// Whether the game accepts commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Commands are accepted.
    InProgress,
    /// The game ended.
    Finished(EndReason),
}

/// Result of a successful placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementOutcome {
    /// Points scored by the placement, bingo included.
    pub score: u32,
    /// Words formed, main word first.
    pub words: Vec<String>,
    /// Objectives completed by this command.
    pub awards: Vec<ObjectiveAward>,
    /// How the rack was topped up.
    pub refill: RefillOutcome,
    /// True if this placement ended the game.
    pub game_over: bool,
}

/// Result of a successful exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeOutcome {
    /// Letters given back.
    pub returned: Vec<Letter>,
    /// Letters received.
    pub drawn: Vec<Letter>,
    /// Objectives completed by this command.
    pub awards: Vec<ObjectiveAward>,
}

/// Result of any command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandOutcome {
    /// Letters were placed.
    Placed(PlacementOutcome),
    /// Letters were exchanged.
    Exchanged(ExchangeOutcome),
    /// The turn was passed.
    Passed {
        /// True if the pass ended the game.
        game_over: bool,
    },
}

/// What the persistence layer stores at the end of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Scores in seating order.
    pub scores: Vec<(String, i32)>,
    /// Players sharing the best score.
    pub winners: Vec<String>,
    /// Turns played.
    pub turns: u32,
    /// Why the game ended, if it has.
    pub end_reason: Option<EndReason>,
}

/// Builder for a [`Game`].
///
/// Players may bring a preset rack; it is topped up from the reserve when
/// the game starts.
#[derive(Debug, Clone)]
pub struct GameSetup {
    config: GameConfig,
    dictionary_id: String,
    seats: Vec<(String, Rack)>,
    reserve: Reserve,
    seed: u64,
}

impl GameSetup {
    /// Starts a setup for a board checked against `dictionary_id`.
    pub fn new(dictionary_id: &str) -> Self {
        Self {
            config: GameConfig::default(),
            dictionary_id: dictionary_id.to_string(),
            seats: Vec::new(),
            reserve: Reserve::new(),
            seed: 0,
        }
    }

    /// Sets the rules.
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Seats a player with an empty rack.
    pub fn player(self, id: impl Into<String>) -> Self {
        self.player_with_rack(id, Rack::new())
    }

    /// Seats a player with a preset rack.
    pub fn player_with_rack(mut self, id: impl Into<String>, rack: Rack) -> Self {
        self.seats.push((id.into(), rack));
        self
    }

    /// Replaces the standard reserve.
    pub fn reserve(mut self, reserve: Reserve) -> Self {
        self.reserve = reserve;
        self
    }

    /// Seeds every random choice of the game.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Deals objectives, fills the racks and starts the game.
    ///
    /// # Errors
    ///
    /// [`GameError::NoPlayers`] with nobody seated,
    /// [`GameError::DuplicatePlayer`] if a name is seated twice.
    #[instrument(skip(self), fields(dictionary = %self.dictionary_id, players = self.seats.len(), seed = self.seed))]
    pub fn start(self) -> Result<Game, GameError> {
        if self.seats.is_empty() {
            return Err(GameError::NoPlayers);
        }
        let mut seen = HashSet::new();
        for (id, _) in &self.seats {
            if !seen.insert(id.as_str()) {
                return Err(GameError::DuplicatePlayer(id.clone()));
            }
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let names: Vec<String> = self.seats.iter().map(|(id, _)| id.clone()).collect();
        let objectives = if *self.config.objectives_enabled() {
            ObjectiveEngine::generate(
                &names,
                *self.config.public_objectives(),
                *self.config.private_objectives_per_player(),
                &mut rng,
            )
        } else {
            ObjectiveEngine::new()
        };

        let mut game = Game {
            board: Board::new(&self.dictionary_id),
            reserve: self.reserve,
            players: self
                .seats
                .into_iter()
                .map(|(id, rack)| PlayerState { id, rack, score: 0 })
                .collect(),
            turns: TurnManager::new(names, *self.config.max_consecutive_passes()),
            objectives,
            events: Vec::new(),
            rng,
            status: GameStatus::InProgress,
            config: self.config,
            initial_census: BTreeMap::new(),
        };
        game.initial_census = game.tile_census();

        for seat in 0..game.players.len() {
            let refill =
                game.turns
                    .refill(&mut game.players[seat].rack, &mut game.reserve, &mut game.rng);
            if !refill.drawn().is_empty() {
                let player = game.players[seat].id.clone();
                game.emit(GameEvent::LettersDrawn {
                    player,
                    letters: refill.drawn().to_vec(),
                });
            }
        }

        info!(
            objectives = game.objectives.objectives().len(),
            reserve = game.reserve.remaining(),
            "Game started"
        );
        Ok(game)
    }
}

/// A game in progress or finished.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    reserve: Reserve,
    players: Vec<PlayerState>,
    turns: TurnManager,
    objectives: ObjectiveEngine,
    events: Vec<GameEvent>,
    rng: StdRng,
    status: GameStatus,
    config: GameConfig,
    initial_census: BTreeMap<char, u32>,
}

impl Game {
    /// Seats `players` in order and starts a game with a standard reserve.
    ///
    /// # Errors
    ///
    /// See [`GameSetup::start`].
    pub fn new(
        config: GameConfig,
        dictionary_id: &str,
        players: Vec<String>,
        seed: u64,
    ) -> Result<Self, GameError> {
        players
            .into_iter()
            .fold(
                GameSetup::new(dictionary_id).config(config).seed(seed),
                |setup, player| setup.player(player),
            )
            .start()
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The shared reserve.
    pub fn reserve(&self) -> &Reserve {
        &self.reserve
    }

    /// Players in seating order.
    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    /// One player's state.
    pub fn player(&self, id: &str) -> Option<&PlayerState> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Turn order.
    pub fn turns(&self) -> &TurnManager {
        &self.turns
    }

    /// Name of the player to act.
    pub fn active_player(&self) -> &str {
        self.turns.active_player()
    }

    /// The objectives in play.
    pub fn objectives(&self) -> &ObjectiveEngine {
        &self.objectives
    }

    /// Every event so far, oldest first.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Current status.
    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    /// The rules in force.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// True once the game has ended.
    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Finished(_))
    }

    /// Tiles per character at game start.
    pub fn initial_census(&self) -> &BTreeMap<char, u32> {
        &self.initial_census
    }

    /// Tiles per character on the board, on racks and in the reserve.
    /// Blanks count as `*`.
    pub fn tile_census(&self) -> BTreeMap<char, u32> {
        let key = |letter: &Letter| if letter.is_blank() { BLANK } else { letter.character() };
        let mut census = BTreeMap::new();
        for (_, letter) in self.board.occupied() {
            *census.entry(key(&letter)).or_insert(0) += 1;
        }
        for letter in self.players.iter().flat_map(|p| p.rack.letters()) {
            *census.entry(key(letter)).or_insert(0) += 1;
        }
        for entry in self.reserve.entries() {
            *census.entry(entry.character).or_insert(0) += entry.remaining;
        }
        census.retain(|_, count| *count > 0);
        census
    }

    /// Scores in seating order.
    pub fn scores(&self) -> Vec<(String, i32)> {
        self.players
            .iter()
            .map(|p| (p.id.clone(), p.score))
            .collect()
    }

    /// Scores, winners and turn count.
    pub fn summary(&self) -> GameSummary {
        let scores = self.scores();
        let best = scores.iter().map(|(_, score)| *score).max();
        let winners = scores
            .iter()
            .filter(|(_, score)| Some(*score) == best)
            .map(|(id, _)| id.clone())
            .collect();
        GameSummary {
            scores,
            winners,
            turns: self.turns.turn().saturating_sub(1),
            end_reason: match &self.status {
                GameStatus::InProgress => None,
                GameStatus::Finished(reason) => Some(reason.clone()),
            },
        }
    }

    /// Runs any command for `player`.
    ///
    /// # Errors
    ///
    /// Whatever the underlying command returns.
    pub fn execute(
        &mut self,
        player: &str,
        command: Command,
        registry: &DictionaryRegistry,
    ) -> Result<CommandOutcome, GameError> {
        match command {
            Command::Place(place) => self.place(player, place, registry).map(CommandOutcome::Placed),
            Command::Exchange(letters) => self.exchange(player, &letters).map(CommandOutcome::Exchanged),
            Command::Pass => self
                .pass(player)
                .map(|game_over| CommandOutcome::Passed { game_over }),
        }
    }

    /// Validates and applies a placement, then refills the player's rack.
    ///
    /// Unresolved blanks get a random vowel first.
    ///
    /// # Errors
    ///
    /// Turn errors ([`GameError::GameOver`], [`GameError::UnknownPlayer`],
    /// [`GameError::NotYourTurn`], [`GameError::SenderMismatch`]) or the
    /// placement's rejection reason. Nothing changes on error.
    #[instrument(skip(self, command, registry), fields(command = %command, turn = self.turns.turn()))]
    pub fn place(
        &mut self,
        player: &str,
        command: PlaceCommand,
        registry: &DictionaryRegistry,
    ) -> Result<PlacementOutcome, GameError> {
        let seat = self.ensure_turn(player)?;
        if command.sender_id() != player {
            return Err(GameError::SenderMismatch {
                player: player.to_string(),
                sender: command.sender_id().to_string(),
            });
        }

        let mut rng = self.rng.clone();
        let mut command = command;
        if !command.is_resolved() {
            command.resolve_blanks(&mut rng);
        }
        let validated = PlacementValidator::new(registry).validate(
            &self.board,
            &self.players[seat].rack,
            &command,
        )?;
        apply(&mut self.board, &mut self.players[seat].rack, &validated)?;
        self.rng = rng;

        let score = validated.score();
        self.players[seat].score += score as i32;
        let words: Vec<String> = validated.words().iter().map(FormedWord::text).collect();
        let mut awards = self.emit(GameEvent::PlacementValidated {
            player: player.to_string(),
            command: validated.command().clone(),
            score,
            placed: validated.placed().iter().map(|(_, letter)| *letter).collect(),
            words: words.clone(),
        });

        let refill = self.turns.refill(
            &mut self.players[seat].rack,
            &mut self.reserve,
            &mut self.rng,
        );
        if !refill.drawn().is_empty() {
            awards.extend(self.emit(GameEvent::LettersDrawn {
                player: player.to_string(),
                letters: refill.drawn().to_vec(),
            }));
        }

        self.advance_turn(false);
        let game_over = self.players[seat].rack.is_empty() && self.reserve.is_empty();
        if game_over {
            self.finish(EndReason::RackEmptied(player.to_string()));
        }
        self.check_invariants()?;

        info!(score, ?words, game_over, "Placement played");
        Ok(PlacementOutcome {
            score,
            words,
            awards,
            refill,
            game_over,
        })
    }

    /// Swaps rack letters with the reserve.
    ///
    /// # Errors
    ///
    /// Turn errors, [`RackError::NoLetters`] for an empty list,
    /// [`RackError::ReserveTooSmall`] with fewer than seven
    /// letters in the reserve, [`RackError::MissingLetters`] if the rack lacks
    /// a letter. Nothing changes on error.
    #[instrument(skip(self, letters), fields(letters = %letters.iter().collect::<String>()))]
    pub fn exchange(&mut self, player: &str, letters: &[char]) -> Result<ExchangeOutcome, GameError> {
        let seat = self.ensure_turn(player)?;
        let returned = self.players[seat]
            .rack
            .exchange(letters, &mut self.reserve, &mut self.rng)?;

        let rack = self.players[seat].rack.letters();
        let drawn = rack[rack.len().saturating_sub(returned.len())..].to_vec();
        let mut awards = self.emit(GameEvent::LettersExchanged {
            player: player.to_string(),
            letters: returned.clone(),
        });
        awards.extend(self.emit(GameEvent::LettersDrawn {
            player: player.to_string(),
            letters: drawn.clone(),
        }));

        self.advance_turn(false);
        self.check_invariants()?;
        debug!(returned = returned.len(), "Exchange played");
        Ok(ExchangeOutcome {
            returned,
            drawn,
            awards,
        })
    }

    /// Skips the turn. Returns true if the pass ended the game.
    ///
    /// # Errors
    ///
    /// Turn errors only.
    #[instrument(skip(self))]
    pub fn pass(&mut self, player: &str) -> Result<bool, GameError> {
        self.ensure_turn(player)?;
        self.emit(GameEvent::TurnPassed {
            player: player.to_string(),
        });
        self.advance_turn(true);
        if self.turns.pass_limit_reached() {
            self.finish(EndReason::ConsecutivePasses);
        }
        self.check_invariants()?;
        Ok(self.is_over())
    }

    fn seat(&self, player: &str) -> Result<usize, GameError> {
        self.players
            .iter()
            .position(|p| p.id == player)
            .ok_or_else(|| GameError::UnknownPlayer(player.to_string()))
    }

    fn ensure_turn(&self, player: &str) -> Result<usize, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        let seat = self.seat(player)?;
        if seat != self.turns.active_index() {
            warn!(player, active = %self.turns.active_player(), "Command out of turn");
            return Err(GameError::NotYourTurn {
                player: player.to_string(),
                active: self.turns.active_player().to_string(),
            });
        }
        Ok(seat)
    }

    /// Logs an event, feeds it to the objectives and credits any awards.
    fn emit(&mut self, event: GameEvent) -> Vec<ObjectiveAward> {
        let awards = self.objectives.dispatch(&event);
        self.events.push(event);
        for award in &awards {
            if let Some(state) = self.players.iter_mut().find(|p| p.id == award.player) {
                state.score += award.points as i32;
            }
            self.events.push(GameEvent::ObjectiveAchieved {
                player: award.player.clone(),
                objective: award.objective.clone(),
                points: award.points,
            });
        }
        awards
    }

    /// Hands the turn on; tiles from the finished turn stop counting as new.
    fn advance_turn(&mut self, passed: bool) {
        self.board.begin_turn();
        self.turns.end_turn(passed);
    }

    /// Applies end-of-game rack penalties and closes the game.
    fn finish(&mut self, reason: EndReason) {
        let mut leftover = 0;
        for state in &mut self.players {
            let penalty = state.rack.points() as i32;
            state.score -= penalty;
            leftover += penalty;
        }
        if let EndReason::RackEmptied(finisher) = &reason {
            if let Some(state) = self.players.iter_mut().find(|p| &p.id == finisher) {
                state.score += leftover;
            }
        }

        let scores = self.scores();
        info!(%reason, ?scores, "Game over");
        self.status = GameStatus::Finished(reason);
        self.events.push(GameEvent::GameEnded { scores });
    }

    fn check_invariants(&self) -> Result<(), GameError> {
        #[cfg(debug_assertions)]
        {
            crate::invariants::check_game(self).map_err(GameError::InvariantViolation)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> DictionaryRegistry {
        let registry = DictionaryRegistry::new();
        registry.load("fr", "test", ["vendre", "vent", "as", "sa", "ta", "tas"]);
        registry
    }

    fn setup() -> GameSetup {
        GameSetup::new("fr")
            .config(GameConfig::default().without_objectives())
            .player_with_rack("ana", Rack::from_chars("vendrex").unwrap())
            .player_with_rack("bob", Rack::from_chars("astaxyz").unwrap())
            .reserve(Reserve::from_counts([('e', 20)]))
            .seed(7)
    }

    fn place(text: &str, player: &str) -> PlaceCommand {
        PlaceCommand::parse(player, text).unwrap()
    }

    #[test]
    fn test_place_scores_and_refills() {
        let registry = registry();
        let mut game = setup().start().unwrap();
        let outcome = game.place("ana", place("h8v vendre", "ana"), &registry).unwrap();

        assert_eq!(outcome.score, 22);
        assert_eq!(outcome.words, vec!["vendre"]);
        assert_eq!(outcome.refill.drawn().len(), 6);
        assert!(!outcome.game_over);
        assert_eq!(*game.player("ana").unwrap().score(), 22);
        assert_eq!(game.player("ana").unwrap().rack().len(), 7);
        assert_eq!(game.active_player(), "bob");
        assert_eq!(game.reserve().remaining(), 14);
    }

    #[test]
    fn test_rejected_placement_changes_nothing() {
        let registry = registry();
        let mut game = setup().start().unwrap();
        let board = game.board().clone();
        let reserve = game.reserve().clone();
        let players = game.players().to_vec();
        let events = game.events().len();

        let result = game.place("ana", place("h8h vexe", "ana"), &registry);
        assert_eq!(
            result,
            Err(GameError::Placement(PlacementError::NotInDictionary(
                "vexe".to_string()
            )))
        );
        assert_eq!(game.board(), &board);
        assert_eq!(game.reserve(), &reserve);
        assert_eq!(game.players(), players.as_slice());
        assert_eq!(game.events().len(), events);
        assert_eq!(game.active_player(), "ana");
    }

    #[test]
    fn test_only_active_player_may_act() {
        let registry = registry();
        let mut game = setup().start().unwrap();
        assert_eq!(
            game.place("bob", place("h8h as", "bob"), &registry),
            Err(GameError::NotYourTurn {
                player: "bob".to_string(),
                active: "ana".to_string(),
            })
        );
        assert_eq!(game.pass("zoe"), Err(GameError::UnknownPlayer("zoe".to_string())));
        assert!(matches!(
            game.place("ana", place("h8h as", "bob"), &registry),
            Err(GameError::SenderMismatch { .. })
        ));
    }

    #[test]
    fn test_exchange() {
        let mut game = setup().start().unwrap();
        let outcome = game.exchange("ana", &['x']).unwrap();
        assert_eq!(outcome.returned, vec![Letter::new('x')]);
        assert_eq!(outcome.drawn, vec![Letter::new('e')]);
        assert_eq!(game.reserve().count('x'), 1);
        assert_eq!(game.active_player(), "bob");

        assert_eq!(
            game.exchange("bob", &['q']),
            Err(GameError::Rack(RackError::MissingLetters("q".to_string())))
        );
    }

    #[test]
    fn test_new_tiles_are_cleared_when_the_turn_ends() {
        let registry = registry();
        let mut game = setup().start().unwrap();
        game.place("ana", place("h8v vendre", "ana"), &registry).unwrap();
        assert!(game.board().placed_this_turn().is_empty());
        assert!(game.board().placement_achieved());

        game.pass("bob").unwrap();
        assert!(game.board().placed_this_turn().is_empty());
        game.exchange("ana", &['e']).unwrap();
        assert!(game.board().placed_this_turn().is_empty());
    }

    #[test]
    fn test_empty_exchange_does_not_reset_passes() {
        let mut game = setup()
            .config(GameConfig::default().without_objectives().with_max_consecutive_passes(2))
            .start()
            .unwrap();
        game.pass("ana").unwrap();
        let events = game.events().len();

        assert_eq!(game.exchange("bob", &[]), Err(GameError::Rack(RackError::NoLetters)));
        assert_eq!(game.events().len(), events);
        assert_eq!(game.turns().consecutive_passes(), 1);
        assert_eq!(game.active_player(), "bob");
        assert!(game.pass("bob").unwrap());
    }

    #[test]
    fn test_consecutive_passes_end_the_game() {
        let mut game = setup()
            .config(GameConfig::default().without_objectives().with_max_consecutive_passes(4))
            .start()
            .unwrap();
        assert!(!game.pass("ana").unwrap());
        assert!(!game.pass("bob").unwrap());
        assert!(!game.pass("ana").unwrap());
        assert!(game.pass("bob").unwrap());
        assert_eq!(game.pass("ana"), Err(GameError::GameOver));

        let summary = game.summary();
        assert_eq!(summary.end_reason, Some(EndReason::ConsecutivePasses));
        assert_eq!(summary.turns, 4);
        // vendrex 4+1+1+2+1+1+10, astaxyz 1+1+1+1+10+10+10.
        assert_eq!(summary.scores, vec![("ana".to_string(), -20), ("bob".to_string(), -34)]);
        assert_eq!(summary.winners, vec!["ana".to_string()]);
        assert!(matches!(game.events().last(), Some(GameEvent::GameEnded { .. })));
    }

    #[test]
    fn test_playing_out_ends_the_game() {
        let registry = registry();
        let mut game = GameSetup::new("fr")
            .config(GameConfig::default().without_objectives())
            .player_with_rack("ana", Rack::from_chars("as").unwrap())
            .player_with_rack("bob", Rack::from_chars("zk").unwrap())
            .reserve(Reserve::from_counts(Vec::new()))
            .start()
            .unwrap();

        let outcome = game.place("ana", place("h8h as", "ana"), &registry).unwrap();
        assert!(outcome.game_over);
        assert!(matches!(outcome.refill, RefillOutcome::NoLettersLeft { .. }));
        // "as" on h8 doubles to 4, bob's z and k add 20.
        assert_eq!(
            game.summary().scores,
            vec![("ana".to_string(), 24), ("bob".to_string(), -20)]
        );
        assert_eq!(
            *game.status(),
            GameStatus::Finished(EndReason::RackEmptied("ana".to_string()))
        );
    }

    #[test]
    fn test_setup_rejects_bad_seating() {
        assert!(matches!(GameSetup::new("fr").start(), Err(GameError::NoPlayers)));
        assert!(matches!(
            GameSetup::new("fr").player("ana").player("ana").start(),
            Err(GameError::DuplicatePlayer(_))
        ));
    }

    #[test]
    fn test_objectives_are_dealt_and_fed() {
        let game = Game::new(
            GameConfig::default(),
            "fr",
            vec!["ana".to_string(), "bob".to_string()],
            21,
        )
        .unwrap();
        assert_eq!(game.objectives().objectives().len(), 4);
        let drawn = game
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::LettersDrawn { .. }))
            .count();
        assert_eq!(drawn, 2);
        assert_eq!(game.reserve().remaining(), 88);
    }
}
