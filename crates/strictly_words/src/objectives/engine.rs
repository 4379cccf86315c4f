//! Objective registration, generation and event dispatch.

use super::{Measure, Objective, ObjectiveAward, Rule};
use crate::events::GameEvent;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// An objective before it is given a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectiveTemplate {
    /// Description shown to players.
    pub description: &'static str,
    /// Points awarded.
    pub points: u32,
    /// Completion rule.
    pub rule: Rule,
}

/// The objectives a game draws from.
pub fn catalog() -> [ObjectiveTemplate; 5] {
    [
        ObjectiveTemplate {
            description: "Draw 25 letters from the reserve",
            points: 15,
            rule: Rule {
                measure: Measure::LettersDrawn,
                threshold: 25,
                accumulates: true,
            },
        },
        ObjectiveTemplate {
            description: "Exchange letters worth at least 30 points at once",
            points: 20,
            rule: Rule {
                measure: Measure::ExchangedPoints,
                threshold: 30,
                accumulates: false,
            },
        },
        ObjectiveTemplate {
            description: "Place 3 letters in a word made only of consonants",
            points: 30,
            rule: Rule {
                measure: Measure::ConsonantWord,
                threshold: 3,
                accumulates: false,
            },
        },
        ObjectiveTemplate {
            description: "Place 5 letters in a move worth less than 15 points",
            points: 25,
            rule: Rule {
                measure: Measure::LowScoringPlacement { max_score: 15 },
                threshold: 5,
                accumulates: false,
            },
        },
        ObjectiveTemplate {
            description: "Place 4 vowels in one move",
            points: 20,
            rule: Rule {
                measure: Measure::VowelsPlaced,
                threshold: 4,
                accumulates: false,
            },
        },
    ]
}

/// Holds a game's objectives and feeds them events in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveEngine {
    objectives: Vec<Objective>,
}

impl ObjectiveEngine {
    /// Creates an engine with no objectives.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws objectives for a new game.
    ///
    /// `public` objectives shared by every player come first, then
    /// `private_per_player` for each player in seating order. Public objectives
    /// never repeat; private ones reuse the remaining catalog entries when
    /// there are more players than entries.
    #[instrument(skip(players, rng), fields(players = players.len()))]
    pub fn generate<R: Rng + ?Sized>(
        players: &[String],
        public: usize,
        private_per_player: usize,
        rng: &mut R,
    ) -> Self {
        let mut deck = catalog().to_vec();
        deck.shuffle(rng);

        let public = public.min(deck.len());
        let private_pool = deck.split_off(public);
        let mut engine = Self::new();
        for template in deck {
            engine.register(Objective::public(
                template.description,
                template.points,
                template.rule,
                players,
            ));
        }

        if private_pool.is_empty() {
            if private_per_player > 0 {
                warn!("No objectives left for private draws");
            }
            return engine;
        }
        let mut private = private_pool.iter().cycle();
        for player in players {
            for template in private.by_ref().take(private_per_player) {
                engine.register(Objective::private(
                    template.description,
                    template.points,
                    template.rule,
                    player.as_str(),
                ));
            }
        }
        debug!(count = engine.objectives.len(), "Objectives generated");
        engine
    }

    /// Adds an objective after the existing ones.
    pub fn register(&mut self, objective: Objective) {
        self.objectives.push(objective);
    }

    /// Delivers an event to every objective in registration order.
    pub fn dispatch(&mut self, event: &GameEvent) -> Vec<ObjectiveAward> {
        self.objectives
            .iter_mut()
            .filter_map(|objective| objective.observe(event))
            .collect()
    }

    /// Registered objectives.
    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    /// Objectives visible to `player`: every public one and their own.
    pub fn visible_to<'a>(&'a self, player: &'a str) -> impl Iterator<Item = &'a Objective> + 'a {
        self.objectives.iter().filter(move |objective| match objective.scope() {
            super::Scope::Public => true,
            super::Scope::Private(owner) => owner == player,
        })
    }
}
