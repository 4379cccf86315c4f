//! Combination generator over rack letters and fixed board letters.
//!
//! Letters are handled as a multiset: repeated letters are deduplicated by
//! value, so `aab` yields 3 orderings, not 6.

use crate::board::{Board, Orientation, Position};
use crate::dictionary::Dictionary;
use crate::letters::BLANK;
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// Every distinct ordering of a letter multiset, in lexicographic order.
pub fn unique_permutations(letters: &[char]) -> Vec<Vec<char>> {
    let mut current = letters.to_vec();
    current.sort_unstable();
    let mut result = vec![current.clone()];
    while next_permutation(&mut current) {
        result.push(current.clone());
    }
    result
}

/// Rearranges into the next lexicographic permutation; false after the last.
fn next_permutation(letters: &mut [char]) -> bool {
    if letters.len() < 2 {
        return false;
    }
    let mut i = letters.len() - 1;
    while i > 0 && letters[i - 1] >= letters[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = letters.len() - 1;
    while letters[j] <= letters[i - 1] {
        j -= 1;
    }
    letters.swap(i - 1, j);
    letters[i..].reverse();
    true
}

/// Every distinct sub-multiset of `size` letters, each sorted.
pub fn unique_combinations(letters: &[char], size: usize) -> Vec<Vec<char>> {
    fn combine(
        sorted: &[char],
        start: usize,
        size: usize,
        current: &mut Vec<char>,
        out: &mut Vec<Vec<char>>,
    ) {
        if current.len() == size {
            out.push(current.clone());
            return;
        }
        for i in start..sorted.len() {
            if i > start && sorted[i] == sorted[i - 1] {
                continue;
            }
            current.push(sorted[i]);
            combine(sorted, i + 1, size, current, out);
            current.pop();
        }
    }

    let mut sorted = letters.to_vec();
    sorted.sort_unstable();
    let mut out = Vec::new();
    combine(&sorted, 0, size, &mut Vec::with_capacity(size), &mut out);
    out
}

/// Fills the empty slots of `pattern` with `fill`, in order.
///
/// Returns `None` when the number of empty slots differs from `fill.len()`.
pub fn interleave(fill: &[char], pattern: &[Option<char>]) -> Option<String> {
    if pattern.iter().filter(|slot| slot.is_none()).count() != fill.len() {
        return None;
    }
    let mut fill = fill.iter();
    pattern
        .iter()
        .map(|slot| slot.or_else(|| fill.next().copied()))
        .collect()
}

/// Reads `length` cells from the board: fixed letters as `Some`, empty cells
/// as `None`. Returns `None` if the run leaves the board.
pub fn pattern_along(
    board: &Board,
    start: Position,
    orientation: Orientation,
    length: usize,
) -> Option<Vec<Option<char>>> {
    (0..length)
        .map(|i| {
            start
                .offset(orientation, i as isize)
                .map(|p| board.letter_at(p).map(|l| l.character()))
        })
        .collect()
}

/// Replaces each blank with every letter `a..=z`.
fn expand_blanks(letters: &[char]) -> Vec<Vec<char>> {
    match letters.iter().position(|c| *c == BLANK) {
        None => vec![letters.to_vec()],
        Some(index) => ('a'..='z')
            .flat_map(|c| {
                let mut assigned = letters.to_vec();
                assigned[index] = c;
                expand_blanks(&assigned)
            })
            .collect(),
    }
}

/// Every dictionary word that fills `pattern` using rack letters.
///
/// Exhaustive: each distinct choice of rack letters for the empty slots is
/// tried in each distinct order. Blanks stand for any letter.
#[instrument(skip(dictionary), fields(dictionary_id = %dictionary.id()))]
pub fn candidate_words(
    rack: &[char],
    pattern: &[Option<char>],
    dictionary: &Dictionary,
) -> Vec<String> {
    let slots = pattern.iter().filter(|slot| slot.is_none()).count();
    if slots == 0 || slots > rack.len() {
        return Vec::new();
    }

    let mut found = BTreeSet::new();
    for combination in unique_combinations(rack, slots) {
        for assigned in expand_blanks(&combination) {
            for ordering in unique_permutations(&assigned) {
                if let Some(word) = interleave(&ordering, pattern) {
                    if dictionary.contains(&word) {
                        found.insert(word);
                    }
                }
            }
        }
    }
    debug!(count = found.len(), "Candidate words found");
    found.into_iter().collect()
}
