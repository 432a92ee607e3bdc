//! Category formulas.
//!
//! A [`Formula`] is a pure function from dice faces to points. The rule set
//! maps every playable category to one formula; features swap entries in
//! that table. Formulas never look at dice order and never mutate their
//! input.

use serde::{Deserialize, Serialize};

use crate::core::feature::STANDARD_DICE;

/// Points for a full house under classic rules.
pub const FULL_HOUSE_POINTS: u32 = 25;
/// Points for a run of four under classic rules.
pub const SMALL_STRAIGHT_POINTS: u32 = 30;
/// Points for a run of five under classic rules.
pub const LARGE_STRAIGHT_POINTS: u32 = 40;
/// Points for five of a kind.
pub const YAHTZEE_POINTS: u32 = 50;
/// Points for the exact 1-2-3-4-5 run under Scandinavian rules.
pub const SCANDINAVIAN_SMALL_POINTS: u32 = 15;
/// Points for the exact 2-3-4-5-6 run under Scandinavian rules.
pub const SCANDINAVIAN_LARGE_POINTS: u32 = 20;

/// A scoring formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Formula {
    /// `count(face) * face`.
    Upper(u8),
    /// `n * face` for the highest face showing at least `n` times.
    OfAKind(u8),
    /// Fixed points for a triple plus a pair of a different face.
    FullHouse(u32),
    /// Dice sum for a triple plus a pair of a different face.
    FullHouseSum,
    /// Fixed points when the distinct faces contain a run of `len`.
    Straight { len: u8, points: u32 },
    /// Fixed points when every face in `low..=high` is showing.
    ExactRun { low: u8, high: u8, points: u32 },
    /// Fixed points when all dice show the same face.
    AllSame(u32),
    /// Sum of all dice.
    Sum,
    /// Sum of the best five dice.
    BestFive,
}

impl Formula {
    /// Evaluate the formula over face values.
    #[must_use]
    pub fn apply(&self, dice: &[u8]) -> u32 {
        match *self {
            Formula::Upper(face) => u32::from(face_counts(dice)[face as usize]) * u32::from(face),
            Formula::OfAKind(n) => highest_with_count(dice, n)
                .map(|face| u32::from(n) * u32::from(face))
                .unwrap_or(0),
            Formula::FullHouse(points) => {
                if is_full_house(dice) {
                    points
                } else {
                    0
                }
            }
            Formula::FullHouseSum => {
                if is_full_house(dice) {
                    sum(dice)
                } else {
                    0
                }
            }
            Formula::Straight { len, points } => {
                if has_run(dice, len) {
                    points
                } else {
                    0
                }
            }
            Formula::ExactRun { low, high, points } => {
                let counts = face_counts(dice);
                if (low..=high).all(|face| counts[face as usize] > 0) {
                    points
                } else {
                    0
                }
            }
            Formula::AllSame(points) => {
                if all_same(dice) {
                    points
                } else {
                    0
                }
            }
            Formula::Sum => sum(dice),
            Formula::BestFive => best_five(dice),
        }
    }
}

/// Occurrences of each face, indexed by face (index 0 unused).
#[must_use]
pub fn face_counts(dice: &[u8]) -> [u8; 7] {
    let mut counts = [0u8; 7];
    for &face in dice.iter().filter(|f| (1..=6).contains(*f)) {
        counts[face as usize] += 1;
    }
    counts
}

/// Every die shows the same face. False for an empty hand.
#[must_use]
pub fn all_same(dice: &[u8]) -> bool {
    match dice.first() {
        Some(&first) => dice.iter().all(|&d| d == first),
        None => false,
    }
}

/// Some face shows at least three times and a different face at least twice.
#[must_use]
pub fn is_full_house(dice: &[u8]) -> bool {
    let counts = face_counts(dice);
    (1..=6).any(|triple| {
        counts[triple] >= 3 && (1..=6).any(|pair| pair != triple && counts[pair] >= 2)
    })
}

/// The distinct faces contain `len` consecutive values.
#[must_use]
pub fn has_run(dice: &[u8], len: u8) -> bool {
    let counts = face_counts(dice);
    let len = len as usize;
    len > 0 && len <= 6 && (1..=7 - len).any(|start| (start..start + len).all(|f| counts[f] > 0))
}

fn highest_with_count(dice: &[u8], n: u8) -> Option<u8> {
    let counts = face_counts(dice);
    (1..=6u8).rev().find(|&face| counts[face as usize] >= n)
}

fn sum(dice: &[u8]) -> u32 {
    dice.iter().map(|&d| u32::from(d)).sum()
}

fn best_five(dice: &[u8]) -> u32 {
    let mut sorted: smallvec::SmallVec<[u8; 6]> = dice.iter().copied().collect();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sum(&sorted[..sorted.len().min(STANDARD_DICE)])
}
