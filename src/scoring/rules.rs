//! Rule sets: the formula table and hook lists implied by a feature set.

use rustc_hash::FxHashMap;

use super::formula::{
    Formula, FULL_HOUSE_POINTS, LARGE_STRAIGHT_POINTS, SCANDINAVIAN_LARGE_POINTS,
    SCANDINAVIAN_SMALL_POINTS, SMALL_STRAIGHT_POINTS, YAHTZEE_POINTS,
};
use super::hooks::{Hook, HookContext, HookKind, HookTiming};
use crate::core::dice::validate_faces;
use crate::core::{Category, Feature, FeatureSet, Session};
use crate::error::{Error, Result};

/// Formulas and hooks for one feature set.
///
/// Built once from a [`FeatureSet`] and fully determined by it, so a stored
/// session only needs to keep its features.
///
/// ```
/// use dice_referee::core::{Category, FeatureSet};
/// use dice_referee::scoring::RuleSet;
///
/// let rules = RuleSet::new(&FeatureSet::classic());
/// assert_eq!(rules.score(Category::FullHouse, &[5, 5, 2, 5, 2]).unwrap(), 25);
/// assert_eq!(rules.score(Category::Chance, &[1, 6, 3, 3, 5]).unwrap(), 18);
/// ```
#[derive(Clone, Debug)]
pub struct RuleSet {
    formulas: FxHashMap<Category, Formula>,
    pre_score: Vec<Hook>,
    post_score: Vec<Hook>,
    post_game: Vec<Hook>,
    dice_count: usize,
}

impl RuleSet {
    /// Resolve a feature set into formulas and hooks.
    #[must_use]
    pub fn new(features: &FeatureSet) -> Self {
        let mut rules = Self::base(features.dice_count());

        for feature in features.iter() {
            match feature {
                Feature::SixDice => {
                    rules.formulas.insert(Category::Chance, Formula::BestFive);
                }
                Feature::ScandinavianScoring => {
                    rules.formulas.insert(Category::FullHouse, Formula::FullHouseSum);
                    rules.formulas.insert(
                        Category::SmallStraight,
                        Formula::ExactRun {
                            low: 1,
                            high: 5,
                            points: SCANDINAVIAN_SMALL_POINTS,
                        },
                    );
                    rules.formulas.insert(
                        Category::LargeStraight,
                        Formula::ExactRun {
                            low: 2,
                            high: 6,
                            points: SCANDINAVIAN_LARGE_POINTS,
                        },
                    );
                }
                Feature::YahtzeeBonus => {
                    rules.register(Hook::new("yahtzee_bonus", HookKind::YahtzeeBonus));
                }
                Feature::ChanceBonus => {
                    rules.register(Hook::new("chance_bonus", HookKind::ChanceBonus));
                }
                Feature::Equalizer => {
                    rules.register(Hook::new("equalizer", HookKind::Equalizer));
                }
            }
        }

        rules
    }

    /// Classic five-dice rules.
    #[must_use]
    pub fn classic() -> Self {
        Self::new(&FeatureSet::classic())
    }

    fn base(dice_count: usize) -> Self {
        let mut formulas = FxHashMap::default();
        for category in Category::UPPER {
            if let Some(face) = category.face() {
                formulas.insert(category, Formula::Upper(face));
            }
        }
        formulas.insert(Category::ThreeOfAKind, Formula::OfAKind(3));
        formulas.insert(Category::FourOfAKind, Formula::OfAKind(4));
        formulas.insert(Category::FullHouse, Formula::FullHouse(FULL_HOUSE_POINTS));
        formulas.insert(
            Category::SmallStraight,
            Formula::Straight {
                len: 4,
                points: SMALL_STRAIGHT_POINTS,
            },
        );
        formulas.insert(
            Category::LargeStraight,
            Formula::Straight {
                len: 5,
                points: LARGE_STRAIGHT_POINTS,
            },
        );
        formulas.insert(Category::Yahtzee, Formula::AllSame(YAHTZEE_POINTS));
        formulas.insert(Category::Chance, Formula::Sum);

        Self {
            formulas,
            pre_score: Vec::new(),
            // The upper bonus applies under every feature set.
            post_score: vec![Hook::new("upper_bonus", HookKind::UpperBonus)],
            post_game: Vec::new(),
            dice_count,
        }
    }

    fn register(&mut self, hook: Hook) {
        match hook.timing {
            HookTiming::PreScore => self.pre_score.push(hook),
            HookTiming::PostScore => self.post_score.push(hook),
            HookTiming::PostGame => self.post_game.push(hook),
        }
    }

    /// Dice per hand under these rules.
    #[must_use]
    pub fn dice_count(&self) -> usize {
        self.dice_count
    }

    /// The formula in effect for a category.
    #[must_use]
    pub fn formula(&self, category: Category) -> Option<Formula> {
        self.formulas.get(&category).copied()
    }

    /// Hooks registered for a timing, in run order.
    #[must_use]
    pub fn hooks(&self, timing: HookTiming) -> &[Hook] {
        match timing {
            HookTiming::PreScore => &self.pre_score,
            HookTiming::PostScore => &self.post_score,
            HookTiming::PostGame => &self.post_game,
        }
    }

    /// Points for `category` over face values `dice`.
    ///
    /// Pure: the same dice always give the same points.
    pub fn score(&self, category: Category, dice: &[u8]) -> Result<u32> {
        if category.is_bonus() {
            return Err(Error::BonusCategory(category));
        }
        let formula = self
            .formula(category)
            .ok_or_else(|| Error::UnknownCategory(category.to_string()))?;
        Ok(formula.apply(dice))
    }

    /// Run every hook of `timing` in order. Returns how many changed state.
    pub fn run_hooks(&self, timing: HookTiming, ctx: &mut HookContext<'_>) -> usize {
        let mut fired = 0;
        for hook in self.hooks(timing) {
            if hook.apply(ctx) {
                tracing::trace!(hook = hook.name, ?timing, "hook fired");
                fired += 1;
            }
        }
        fired
    }

    /// Value of every playable category for a literal hand.
    ///
    /// The hand must have this rule set's dice count and legal faces.
    pub fn hints(&self, dice: &[u8]) -> Result<Vec<(Category, u32)>> {
        if dice.len() != self.dice_count {
            return Err(Error::InvalidDice(format!(
                "expected {} dice, got {}",
                self.dice_count,
                dice.len()
            )));
        }
        validate_faces(dice)?;
        Category::PLAYABLE
            .into_iter()
            .map(|category| Ok((category, self.score(category, dice)?)))
            .collect()
    }

    /// Values of the current player's open categories for the session's dice.
    ///
    /// Empty when nobody joined yet or the game is over.
    #[must_use]
    pub fn hints_for(&self, session: &Session) -> Vec<(Category, u32)> {
        let Some(player) = session.current() else {
            return Vec::new();
        };
        if session.is_terminal() {
            return Vec::new();
        }
        let dice = session.dice().values();
        player
            .sheet
            .open_categories()
            .filter_map(|category| {
                self.formula(category)
                    .map(|formula| (category, formula.apply(&dice)))
            })
            .collect()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::classic()
    }
}
