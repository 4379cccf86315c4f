//! Game session management.
//!
//! Each session owns one [`Game`] behind its own mutex, so commands for a
//! session are applied one at a time while other sessions proceed in
//! parallel. The session map lock is held only long enough to find or insert
//! a session handle.

use crate::config::SessionConfig;
use derive_getters::Getters;
use derive_more::{Display, Error, From};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use strictly_words::{
    Command, CommandOutcome, CommandParseError, DictionaryRegistry, Game, GameError, GameSummary,
};
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a game session.
pub type SessionId = String;

/// Why a session request failed.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum SessionError {
    /// No session has this id.
    #[display("Unknown session '{_0}'")]
    UnknownSession(#[error(not(source))] SessionId),

    /// A session with this id is already running.
    #[display("Session '{_0}' already exists")]
    SessionExists(#[error(not(source))] SessionId),

    /// The configured session limit is reached.
    #[display("Session limit of {limit} reached")]
    TooManySessions {
        /// Configured limit.
        limit: usize,
    },

    /// The session asked for a dictionary that is not loaded.
    #[display("Unknown dictionary '{_0}'")]
    UnknownDictionary(#[error(not(source))] String),

    /// The command text could not be parsed.
    #[display("{_0}")]
    #[from]
    Parse(CommandParseError),

    /// The game refused the command.
    #[display("{_0}")]
    #[from]
    Game(GameError),
}

/// One accepted command, as handed to persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct MoveRecord {
    session_id: SessionId,
    turn: u32,
    player: String,
    command: String,
    score: u32,
    bonus: u32,
}

/// A running game and the commands it accepted.
#[derive(Debug, Clone, Getters)]
pub struct GameSession {
    id: SessionId,
    game: Game,
    history: Vec<MoveRecord>,
}

impl GameSession {
    /// Wraps a started game.
    #[instrument(skip(game))]
    pub fn new(id: SessionId, game: Game) -> Self {
        info!(session_id = %id, players = game.players().len(), "Creating game session");
        Self {
            id,
            game,
            history: Vec::new(),
        }
    }

    /// Parses and runs one command, recording it if accepted.
    #[instrument(skip(self, registry), fields(session_id = %self.id))]
    pub fn execute(
        &mut self,
        player: &str,
        text: &str,
        registry: &DictionaryRegistry,
    ) -> Result<CommandOutcome, SessionError> {
        let command = Command::parse(player, text)?;
        let turn = self.game.turns().turn();
        let outcome = self.game.execute(player, command, registry).map_err(|e| {
            warn!(player, error = %e, "Command rejected");
            e
        })?;

        let (score, bonus) = match &outcome {
            CommandOutcome::Placed(placed) => (
                placed.score,
                placed.awards.iter().map(|a| a.points).sum(),
            ),
            CommandOutcome::Exchanged(exchanged) => {
                (0, exchanged.awards.iter().map(|a| a.points).sum())
            }
            CommandOutcome::Passed { .. } => (0, 0),
        };
        self.history.push(MoveRecord::new(
            self.id.clone(),
            turn,
            player.to_string(),
            text.trim().to_string(),
            score,
            bonus,
        ));
        debug!(turn, score, bonus, "Command recorded");
        Ok(outcome)
    }

    /// The game's event log as JSON.
    pub fn events_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self.game.events())
    }
}

/// Manages all game sessions.
#[derive(Debug, Clone)]
pub struct SessionManager {
    registry: Arc<DictionaryRegistry>,
    config: SessionConfig,
    sessions: Arc<Mutex<HashMap<SessionId, Arc<Mutex<GameSession>>>>>,
}

impl SessionManager {
    /// Creates a session manager over a shared dictionary registry.
    #[instrument(skip(registry, config))]
    pub fn new(registry: Arc<DictionaryRegistry>, config: SessionConfig) -> Self {
        info!(max_sessions = config.max_sessions(), "Creating session manager");
        Self {
            registry,
            config,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Dictionaries available to sessions.
    pub fn registry(&self) -> &DictionaryRegistry {
        &self.registry
    }

    /// Settings new sessions are created with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Starts a game under `id`.
    ///
    /// `dictionary` falls back to the configured default.
    #[instrument(skip(self, players))]
    pub fn create_session(
        &self,
        id: SessionId,
        dictionary: Option<&str>,
        players: Vec<String>,
        seed: u64,
    ) -> Result<SessionId, SessionError> {
        let dictionary = dictionary.unwrap_or(self.config.default_dictionary().as_str());
        if self.registry.dictionary(dictionary).is_none() {
            warn!(dictionary, "Session requested an unloaded dictionary");
            return Err(SessionError::UnknownDictionary(dictionary.to_string()));
        }

        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        if sessions.contains_key(&id) {
            warn!(session_id = %id, "Session already exists");
            return Err(SessionError::SessionExists(id));
        }
        let limit = *self.config.max_sessions();
        if sessions.len() >= limit {
            warn!(limit, "Session limit reached");
            return Err(SessionError::TooManySessions { limit });
        }

        let game = Game::new(self.config.game().clone(), dictionary, players, seed)?;
        let session = GameSession::new(id.clone(), game);
        sessions.insert(id.clone(), Arc::new(Mutex::new(session)));
        info!(session_id = %id, total_sessions = sessions.len(), "Session created");
        Ok(id)
    }

    fn session(&self, id: &str) -> Result<Arc<Mutex<GameSession>>, SessionError> {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
            .ok_or_else(|| SessionError::UnknownSession(id.to_string()))
    }

    /// Runs a command line such as `place h8v vendre` for `player`.
    #[instrument(skip(self))]
    pub fn execute(
        &self,
        session_id: &str,
        player: &str,
        text: &str,
    ) -> Result<CommandOutcome, SessionError> {
        let session = self.session(session_id)?;
        let mut session = session.lock().unwrap_or_else(PoisonError::into_inner);
        session.execute(player, text, &self.registry)
    }

    /// Reads a session under its lock.
    pub fn with_session<T>(
        &self,
        session_id: &str,
        f: impl FnOnce(&GameSession) -> T,
    ) -> Result<T, SessionError> {
        let session = self.session(session_id)?;
        let session = session.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(f(&session))
    }

    /// Current scores and winners.
    pub fn summary(&self, session_id: &str) -> Result<GameSummary, SessionError> {
        self.with_session(session_id, |session| session.game.summary())
    }

    /// Commands accepted so far.
    pub fn history(&self, session_id: &str) -> Result<Vec<MoveRecord>, SessionError> {
        self.with_session(session_id, |session| session.history.clone())
    }

    /// Session ids, sorted.
    pub fn list_sessions(&self) -> Vec<SessionId> {
        let mut ids: Vec<_> = self
            .sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }

    /// Closes a session, returning its final summary.
    #[instrument(skip(self))]
    pub fn remove_session(&self, session_id: &str) -> Result<GameSummary, SessionError> {
        let session = self
            .sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(session_id)
            .ok_or_else(|| SessionError::UnknownSession(session_id.to_string()))?;
        let summary = session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .game
            .summary();
        info!(session_id, winners = ?summary.winners, "Session removed");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_words::GameEvent;

    fn manager(toml: &str) -> SessionManager {
        let registry = DictionaryRegistry::new();
        registry.load("fr", "Test", ["vendre", "eau"]);
        let config = SessionConfig::from_toml_str(toml).unwrap();
        SessionManager::new(Arc::new(registry), config)
    }

    fn players() -> Vec<String> {
        vec!["ana".to_string(), "bob".to_string()]
    }

    #[test]
    fn test_pass_is_recorded() {
        let manager = manager("");
        manager
            .create_session("s1".to_string(), None, players(), 7)
            .unwrap();
        let outcome = manager.execute("s1", "ana", "pass").unwrap();
        assert_eq!(outcome, CommandOutcome::Passed { game_over: false });

        let history = manager.history("s1").unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].player(), "ana");
        assert_eq!(history[0].command(), "pass");
        assert_eq!(*history[0].turn(), 1);
    }

    #[test]
    fn test_rejected_command_is_not_recorded() {
        let manager = manager("");
        manager
            .create_session("s1".to_string(), Some("fr"), players(), 7)
            .unwrap();
        assert!(matches!(
            manager.execute("s1", "bob", "pass"),
            Err(SessionError::Game(GameError::NotYourTurn { .. }))
        ));
        assert!(matches!(
            manager.execute("s1", "ana", "jump"),
            Err(SessionError::Parse(CommandParseError::UnknownVerb(_)))
        ));
        assert!(manager.history("s1").unwrap().is_empty());
    }

    #[test]
    fn test_session_errors() {
        let manager = manager("max_sessions = 1");
        assert_eq!(
            manager.create_session("s1".to_string(), Some("en"), players(), 1),
            Err(SessionError::UnknownDictionary("en".to_string()))
        );
        manager
            .create_session("s1".to_string(), None, players(), 1)
            .unwrap();
        assert_eq!(
            manager.create_session("s1".to_string(), None, players(), 1),
            Err(SessionError::SessionExists("s1".to_string()))
        );
        assert_eq!(
            manager.create_session("s2".to_string(), None, players(), 1),
            Err(SessionError::TooManySessions { limit: 1 })
        );
        assert_eq!(
            manager.execute("nope", "ana", "pass"),
            Err(SessionError::UnknownSession("nope".to_string()))
        );
    }

    #[test]
    fn test_remove_returns_summary() {
        let manager = manager("[game]\nmax_consecutive_passes = 2\nobjectives_enabled = false\n");
        manager
            .create_session("s1".to_string(), None, players(), 3)
            .unwrap();
        manager.execute("s1", "ana", "pass").unwrap();
        manager.execute("s1", "bob", "pass").unwrap();

        let ended = manager
            .with_session("s1", |session| {
                session
                    .game()
                    .events()
                    .iter()
                    .any(|e| matches!(e, GameEvent::GameEnded { .. }))
            })
            .unwrap();
        assert!(ended);

        let summary = manager.remove_session("s1").unwrap();
        assert!(summary.end_reason.is_some());
        assert!(manager.list_sessions().is_empty());
    }
}
