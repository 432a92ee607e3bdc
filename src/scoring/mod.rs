//! Scoring engine: category formulas plus feature hooks.
//!
//! ## Key Components
//!
//! - [`Formula`]: pure dice → points function for one category
//! - [`Hook`]: a side-effecting step run before scoring, after scoring, or
//!   at game end
//! - [`RuleSet`]: the formula table and hook lists for a feature set
//!
//! Features never register hooks globally. A rule set is assembled from the
//! session's feature set whenever it is needed, and two rule sets built from
//! the same features are identical.

mod formula;
mod hooks;
mod rules;

pub use formula::{
    all_same, face_counts, has_run, is_full_house, Formula, FULL_HOUSE_POINTS,
    LARGE_STRAIGHT_POINTS, SMALL_STRAIGHT_POINTS, YAHTZEE_POINTS,
};
pub use hooks::{
    Hook, HookContext, HookKind, HookTiming, CHANCE_BONUS_POINTS, CHANCE_BONUS_TARGET,
    EQUALIZER_GAP, UPPER_BONUS_POINTS, UPPER_BONUS_THRESHOLD, YAHTZEE_BONUS_POINTS,
};
pub use rules::RuleSet;

use crate::core::{Category, FeatureSet};
use crate::error::Result;

/// Score a category for a hand under a feature set.
///
/// Convenience over [`RuleSet::score`] for one-off queries.
pub fn score(category: Category, dice: &[u8], features: &FeatureSet) -> Result<u32> {
    RuleSet::new(features).score(category, dice)
}
