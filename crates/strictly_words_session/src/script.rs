//! Command scripts: a seating line followed by one command per line.
//!
//! ```text
//! # comments and blank lines are ignored
//! players ana bob
//! dictionary fr
//! seed 42
//! ana: place h8v vendre
//! bob: pass
//! ```
//!
//! `dictionary` and `seed` are optional and must come before the first step.

use crate::session::{SessionError, SessionId, SessionManager};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::Serialize;
use strictly_words::CommandOutcome;
use tracing::{debug, info, instrument};

/// Why a script could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ScriptError {
    /// No `players` line before the first step.
    #[display("Script has no players line")]
    MissingPlayers,

    /// A line that is neither a header nor `player: command`.
    #[display("Line {line}: cannot read '{text}'")]
    MalformedLine {
        /// One-based line number.
        line: usize,
        /// Offending text.
        text: String,
    },

    /// `seed` is not an unsigned integer.
    #[display("Line {line}: invalid seed '{text}'")]
    InvalidSeed {
        /// One-based line number.
        line: usize,
        /// Offending text.
        text: String,
    },
}

/// One `player: command` line.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ScriptStep {
    line: usize,
    player: String,
    command: String,
}

/// A parsed command script.
#[derive(Debug, Clone, PartialEq, Eq, Default, Getters)]
pub struct Script {
    players: Vec<String>,
    dictionary: Option<String>,
    seed: Option<u64>,
    steps: Vec<ScriptStep>,
}

/// What happened to one step of a replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// Script line of the step.
    pub line: usize,
    /// Acting player.
    pub player: String,
    /// Command text.
    pub command: String,
    /// Result when accepted.
    pub outcome: Option<CommandOutcome>,
    /// Reason when rejected.
    pub rejection: Option<String>,
}

impl Script {
    /// Parses script text.
    #[instrument(skip(text), fields(bytes = text.len()))]
    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        let mut script = Script::default();
        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            if let Some((player, command)) = trimmed.split_once(':') {
                if script.players.is_empty() {
                    return Err(ScriptError::MissingPlayers);
                }
                let player = player.trim();
                let command = command.trim();
                if player.is_empty() || command.is_empty() {
                    return Err(ScriptError::MalformedLine {
                        line,
                        text: trimmed.to_string(),
                    });
                }
                script.steps.push(ScriptStep {
                    line,
                    player: player.to_string(),
                    command: command.to_string(),
                });
                continue;
            }

            let (keyword, rest) = trimmed
                .split_once(char::is_whitespace)
                .unwrap_or((trimmed, ""));
            let rest = rest.trim();
            match keyword {
                "players" if script.steps.is_empty() && !rest.is_empty() => {
                    script.players = rest.split_whitespace().map(str::to_string).collect();
                }
                "dictionary" if script.steps.is_empty() && !rest.is_empty() => {
                    script.dictionary = Some(rest.to_string());
                }
                "seed" if script.steps.is_empty() => {
                    let seed = rest.parse().map_err(|_| ScriptError::InvalidSeed {
                        line,
                        text: rest.to_string(),
                    })?;
                    script.seed = Some(seed);
                }
                _ => {
                    return Err(ScriptError::MalformedLine {
                        line,
                        text: trimmed.to_string(),
                    });
                }
            }
        }

        if script.players.is_empty() {
            return Err(ScriptError::MissingPlayers);
        }
        debug!(players = script.players.len(), steps = script.steps.len(), "Script parsed");
        Ok(script)
    }

    /// Plays every step in a new session.
    ///
    /// Rejected steps are reported and the replay carries on; the session
    /// stays open afterwards for inspection. Arguments override the script's
    /// own dictionary and seed.
    #[instrument(skip(self, manager))]
    pub fn replay(
        &self,
        manager: &SessionManager,
        session_id: SessionId,
        dictionary: Option<&str>,
        seed: Option<u64>,
    ) -> Result<Vec<StepReport>, SessionError> {
        let dictionary = dictionary.or(self.dictionary.as_deref());
        let seed = seed.or(self.seed).unwrap_or_default();
        let session_id = manager.create_session(session_id, dictionary, self.players.clone(), seed)?;

        let reports: Vec<StepReport> = self
            .steps
            .iter()
            .map(|step| {
                let result = manager.execute(&session_id, &step.player, &step.command);
                StepReport {
                    line: step.line,
                    player: step.player.clone(),
                    command: step.command.clone(),
                    rejection: result.as_ref().err().map(ToString::to_string),
                    outcome: result.ok(),
                }
            })
            .collect();

        let rejected = reports.iter().filter(|r| r.rejection.is_some()).count();
        info!(steps = reports.len(), rejected, "Replay finished");
        Ok(reports)
    }
}
