//! Opt-in rule variants chosen at session creation.
//!
//! A session's features never change after creation. The scoring engine
//! derives its formula table and hook lists from the feature set alone, so a
//! stored session only needs to carry the set itself.

use im::OrdSet;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Dice per session without [`Feature::SixDice`].
pub const STANDARD_DICE: usize = 5;

/// Dice per session with [`Feature::SixDice`].
pub const SIX_DICE: usize = 6;

/// A rule variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Play with six dice; chance keeps the best five.
    SixDice,
    /// Full house scores the dice sum; straights are the fixed 1-5 / 2-6 runs
    /// worth 15 / 20.
    ScandinavianScoring,
    /// Each extra five-of-a-kind after a scored Yahtzee adds 100.
    YahtzeeBonus,
    /// A chance of exactly 21 at game end earns 100.
    ChanceBonus,
    /// A player far behind the leader gets their lowest die turned to a six
    /// before scoring.
    Equalizer,
}

impl Feature {
    pub const ALL: [Feature; 5] = [
        Feature::SixDice,
        Feature::ScandinavianScoring,
        Feature::YahtzeeBonus,
        Feature::ChanceBonus,
        Feature::Equalizer,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Feature::SixDice => "six_dice",
            Feature::ScandinavianScoring => "scandinavian_scoring",
            Feature::YahtzeeBonus => "yahtzee_bonus",
            Feature::ChanceBonus => "chance_bonus",
            Feature::Equalizer => "equalizer",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Feature::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| Error::UnknownFeature(s.to_string()))
    }
}

/// Pairs that cannot be active together.
///
/// The Scandinavian straights are exact five-face runs; with a sixth die the
/// run no longer covers the whole hand.
const INCOMPATIBLE: [(Feature, Feature); 1] = [(Feature::SixDice, Feature::ScandinavianScoring)];

/// An immutable, validated set of features.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureSet {
    features: OrdSet<Feature>,
}

impl FeatureSet {
    /// The empty set: classic rules.
    #[must_use]
    pub fn classic() -> Self {
        Self::default()
    }

    /// Build a set, rejecting incompatible combinations.
    pub fn new(features: impl IntoIterator<Item = Feature>) -> Result<Self> {
        let features: OrdSet<Feature> = features.into_iter().collect();
        for (a, b) in INCOMPATIBLE {
            if features.contains(&a) && features.contains(&b) {
                return Err(Error::IncompatibleFeatures(a, b));
            }
        }
        Ok(Self { features })
    }

    /// Parse feature names as sent by a transport.
    pub fn parse<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let features = names
            .into_iter()
            .map(str::parse)
            .collect::<Result<Vec<Feature>>>()?;
        Self::new(features)
    }

    #[must_use]
    pub fn contains(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }

    pub fn iter(&self) -> impl Iterator<Item = Feature> + '_ {
        self.features.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Number of dice a session with these features plays with.
    #[must_use]
    pub fn dice_count(&self) -> usize {
        if self.contains(Feature::SixDice) {
            SIX_DICE
        } else {
            STANDARD_DICE
        }
    }
}
