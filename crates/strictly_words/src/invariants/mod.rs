//! First-class invariants for a word game.
//!
//! Invariants are properties of a [`Game`] that hold after every command.
//! They are checked in debug builds and can be tested on their own.

use crate::game::Game;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together. Implemented for tuples.
pub trait InvariantSet<S> {
    /// Checks every invariant, collecting all violations.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! invariant_tuple {
    ($($member:ident),+) => {
        impl<S, $($member: Invariant<S>),+> InvariantSet<S> for ($($member,)+) {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let checks: &[(fn(&S) -> bool, &'static str)] =
                    &[$(($member::holds as fn(&S) -> bool, $member::description())),+];
                let violations: Vec<_> = checks
                    .iter()
                    .filter(|(holds, _)| !holds(state))
                    .map(|(_, description)| InvariantViolation::new(*description))
                    .collect();
                if violations.is_empty() { Ok(()) } else { Err(violations) }
            }
        }
    };
}

invariant_tuple!(A, B);
invariant_tuple!(A, B, C);

mod rack_capacity;
mod seating;
mod tile_conservation;

pub use rack_capacity::RackCapacityInvariant;
pub use seating::SeatingInvariant;
pub use tile_conservation::TileConservationInvariant;

/// Every game invariant as a composable set.
pub type GameInvariants = (
    TileConservationInvariant,
    RackCapacityInvariant,
    SeatingInvariant,
);

/// Checks [`GameInvariants`] and joins the violated descriptions.
pub fn check_game(game: &Game) -> Result<(), String> {
    GameInvariants::check_all(game).map_err(|violations| {
        violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn game() -> Game {
        Game::new(
            GameConfig::default(),
            "fr",
            vec!["ana".to_string(), "bob".to_string()],
            3,
        )
        .unwrap()
    }

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        assert!(GameInvariants::check_all(&game()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_passes() {
        let mut game = game();
        game.pass("ana").unwrap();
        game.pass("bob").unwrap();
        assert!(check_game(&game).is_ok());
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (TileConservationInvariant, RackCapacityInvariant);
        assert!(TwoInvariants::check_all(&game()).is_ok());
    }
}
