//! Property tests for the trie, reserve and first-move rule.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use strictly_words::contracts::{LegalPlacement, PlayerView};
use strictly_words::{
    Board, CommandLetter, Dictionary, Orientation, PlaceCommand, PlacementError, Position, Rack,
    Reserve, Trie,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every inserted word is found; nothing else is.
    #[test]
    fn trie_finds_exactly_inserted_words(
        words in prop::collection::vec("[a-z]{1,10}", 1..40),
        probe in "[a-z]{1,10}",
    ) {
        let trie: Trie = words.iter().collect();
        for word in &words {
            prop_assert!(trie.search(word));
        }
        let inserted: HashSet<&String> = words.iter().collect();
        prop_assert_eq!(trie.search(&probe), inserted.contains(&probe));
    }

    /// Case does not matter to a dictionary.
    #[test]
    fn dictionary_normalizes_case(word in "[a-z]{2,10}") {
        let dictionary = Dictionary::from_words("t", "Test", "", [word.as_str()]);
        prop_assert!(dictionary.contains(&word.to_uppercase()));
        prop_assert!(dictionary.contains(&word));
    }

    /// Drawing never takes more than the reserve holds.
    #[test]
    fn reserve_never_goes_negative(
        counts in prop::collection::vec(0u32..5, 1..6),
        draws in 0usize..30,
        seed in any::<u64>(),
    ) {
        let mut reserve = Reserve::from_counts(
            counts.iter().enumerate().map(|(i, n)| ((b'a' + i as u8) as char, *n)),
        );
        let total = reserve.remaining();
        let mut rng = StdRng::seed_from_u64(seed);
        let drawn = reserve.draw_many(draws, &mut rng);
        prop_assert_eq!(drawn.len() as u32, total.min(draws as u32));
        prop_assert_eq!(reserve.remaining(), total - drawn.len() as u32);
    }

    /// On an empty board a two-letter placement passes the structural checks
    /// exactly when it covers the center.
    #[test]
    fn first_move_must_cover_center(
        row in 0usize..15,
        column in 0usize..15,
        vertical in any::<bool>(),
    ) {
        let orientation = if vertical { Orientation::Vertical } else { Orientation::Horizontal };
        let origin = Position::new(row, column).unwrap();
        let second = origin.offset(orientation, 1);
        prop_assume!(second.is_some());

        let board = Board::new("t");
        let rack = Rack::from_chars("as").unwrap();
        let command = PlaceCommand::new(
            "ana",
            vec![CommandLetter::Regular('a'), CommandLetter::Regular('s')],
            origin,
            orientation,
        );
        let view = PlayerView { board: &board, rack: &rack };
        let covers = origin == Position::CENTER || second == Some(Position::CENTER);
        match LegalPlacement::check(&view, &command) {
            Ok(_) => prop_assert!(covers),
            Err(e) => {
                prop_assert!(!covers);
                prop_assert_eq!(e, PlacementError::FirstMoveMustCoverCenter);
            }
        }
    }
}
