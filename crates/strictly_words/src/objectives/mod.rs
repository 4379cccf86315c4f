//! Bonus objectives fed by game events.
//!
//! Every objective is the same type: a description, a point value, a scope and
//! a [`Rule`]. Progress is kept per owner. The first owner to reach the
//! threshold wins the points and the objective locks.

mod engine;
mod rule;

pub use engine::{ObjectiveEngine, ObjectiveTemplate, catalog};
pub use rule::{Measure, Rule, has_exchanged_enough_points};

use crate::events::GameEvent;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Who an objective counts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// Every player competes.
    Public,
    /// Only the named player.
    Private(String),
}

/// One owner's counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerProgress {
    /// Player name.
    pub name: String,
    /// Counter value.
    pub progress: u32,
}

/// Points won by completing an objective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveAward {
    /// Player awarded.
    pub player: String,
    /// Objective description.
    pub objective: String,
    /// Points won.
    pub points: u32,
}

/// A bonus objective and its per-owner progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Objective {
    description: String,
    points: u32,
    achieved: bool,
    scope: Scope,
    owners: Vec<OwnerProgress>,
    rule: Rule,
}

impl Objective {
    /// Creates a public objective counting every listed player.
    pub fn public(
        description: impl Into<String>,
        points: u32,
        rule: Rule,
        players: &[String],
    ) -> Self {
        Self {
            description: description.into(),
            points,
            achieved: false,
            scope: Scope::Public,
            owners: players
                .iter()
                .map(|name| OwnerProgress {
                    name: name.clone(),
                    progress: 0,
                })
                .collect(),
            rule,
        }
    }

    /// Creates an objective only `owner` can complete.
    pub fn private(
        description: impl Into<String>,
        points: u32,
        rule: Rule,
        owner: impl Into<String>,
    ) -> Self {
        let owner = owner.into();
        Self {
            description: description.into(),
            points,
            achieved: false,
            scope: Scope::Private(owner.clone()),
            owners: vec![OwnerProgress {
                name: owner,
                progress: 0,
            }],
            rule,
        }
    }

    /// Counter for one owner, or `None` if the player is not an owner.
    pub fn progress_of(&self, player: &str) -> Option<u32> {
        self.owners
            .iter()
            .find(|owner| owner.name == player)
            .map(|owner| owner.progress)
    }

    /// Updates progress from an event and returns an award if the acting
    /// player just completed the objective.
    ///
    /// Achieved objectives, events without a player and players who are not
    /// owners are ignored.
    pub fn observe(&mut self, event: &GameEvent) -> Option<ObjectiveAward> {
        if self.achieved {
            return None;
        }
        let player = event.player()?;
        let rule = self.rule;
        let owner = self.owners.iter_mut().find(|owner| owner.name == player)?;
        owner.progress = rule.advance(owner.progress, event)?;
        debug!(
            objective = %self.description,
            player,
            progress = owner.progress,
            "Objective progress"
        );
        if !rule.is_met(owner.progress) {
            return None;
        }

        self.achieved = true;
        info!(objective = %self.description, player, points = self.points, "Objective achieved");
        Some(ObjectiveAward {
            player: player.to_string(),
            objective: self.description.clone(),
            points: self.points,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::PlaceCommand;
    use crate::letters::Letter;

    fn vowels_rule() -> Rule {
        Rule {
            measure: Measure::VowelsPlaced,
            threshold: 4,
            accumulates: false,
        }
    }

    fn placement(player: &str, word: &str) -> GameEvent {
        GameEvent::PlacementValidated {
            player: player.to_string(),
            command: PlaceCommand::parse(player, &format!("h8h {word}")).unwrap(),
            score: 5,
            placed: word.chars().map(Letter::new).collect(),
            words: vec![word.to_string()],
        }
    }

    #[test]
    fn test_vowels_objective_awards_once() {
        let players = vec!["ana".to_string(), "bob".to_string()];
        let mut objective = Objective::public("Place four vowels", 20, vowels_rule(), &players);

        let award = objective.observe(&placement("ana", "aeiou")).unwrap();
        assert_eq!(award.player, "ana");
        assert_eq!(award.points, 20);
        assert!(objective.achieved());

        assert_eq!(objective.observe(&placement("bob", "aeiou")), None);
        assert_eq!(objective.observe(&placement("ana", "aeiou")), None);
    }

    #[test]
    fn test_single_event_rule_resets() {
        let players = vec!["ana".to_string()];
        let mut objective = Objective::public("Place four vowels", 20, vowels_rule(), &players);
        assert_eq!(objective.observe(&placement("ana", "aie")), None);
        assert_eq!(objective.observe(&placement("ana", "ou")), None);
        assert_eq!(objective.progress_of("ana"), Some(2));
        assert!(!objective.achieved());
    }

    #[test]
    fn test_private_objective_ignores_others() {
        let mut objective = Objective::private("Place four vowels", 20, vowels_rule(), "bob");
        assert_eq!(objective.observe(&placement("ana", "aeiou")), None);
        assert_eq!(objective.progress_of("ana"), None);
        assert!(objective.observe(&placement("bob", "aeiou")).is_some());
    }

    #[test]
    fn test_exchange_objective() {
        let rule = Rule {
            measure: Measure::ExchangedPoints,
            threshold: 30,
            accumulates: false,
        };
        let mut objective = Objective::private("Exchange 30 points", 15, rule, "ana");
        let event = GameEvent::LettersExchanged {
            player: "ana".to_string(),
            letters: "xzwe".chars().map(Letter::new).collect(),
        };
        assert!(has_exchanged_enough_points("XZWE", 30));
        assert!(objective.observe(&event).is_some());
    }
}
