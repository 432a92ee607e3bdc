//! Scoring categories.
//!
//! The category set is closed: thirteen playable lines plus the bonus lines
//! only the engine writes. Categories display and parse as snake_case names,
//! which is the form transports exchange.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Error;

/// A scoring line on a player's sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    // === Upper section ===
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,

    // === Lower section ===
    ThreeOfAKind,
    FourOfAKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    /// Five of a kind.
    Yahtzee,
    Chance,

    // === Engine-written ===
    UpperBonus,
    YahtzeeBonus,
    ChanceBonus,
}

impl Category {
    /// Every category, playable first.
    pub const ALL: [Category; 16] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yahtzee,
        Category::Chance,
        Category::UpperBonus,
        Category::YahtzeeBonus,
        Category::ChanceBonus,
    ];

    /// Categories a player may choose. One per round.
    pub const PLAYABLE: [Category; 13] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yahtzee,
        Category::Chance,
    ];

    /// The six face-count categories.
    pub const UPPER: [Category; 6] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
    ];

    /// Face value counted by an upper category, `None` otherwise.
    #[must_use]
    pub const fn face(self) -> Option<u8> {
        match self {
            Category::Ones => Some(1),
            Category::Twos => Some(2),
            Category::Threes => Some(3),
            Category::Fours => Some(4),
            Category::Fives => Some(5),
            Category::Sixes => Some(6),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_upper(self) -> bool {
        self.face().is_some()
    }

    /// Bonus categories are only ever written by hooks.
    #[must_use]
    pub const fn is_bonus(self) -> bool {
        matches!(
            self,
            Category::UpperBonus | Category::YahtzeeBonus | Category::ChanceBonus
        )
    }

    /// snake_case name used on the wire.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Category::Ones => "ones",
            Category::Twos => "twos",
            Category::Threes => "threes",
            Category::Fours => "fours",
            Category::Fives => "fives",
            Category::Sixes => "sixes",
            Category::ThreeOfAKind => "three_of_a_kind",
            Category::FourOfAKind => "four_of_a_kind",
            Category::FullHouse => "full_house",
            Category::SmallStraight => "small_straight",
            Category::LargeStraight => "large_straight",
            Category::Yahtzee => "yahtzee",
            Category::Chance => "chance",
            Category::UpperBonus => "upper_bonus",
            Category::YahtzeeBonus => "yahtzee_bonus",
            Category::ChanceBonus => "chance_bonus",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}
