//! Scoring hooks.
//!
//! Hooks run around a score action and may change the dice being scored or
//! write bonus categories. Like formulas, hooks are data: a [`Hook`] names
//! its [`HookTiming`] and its [`HookKind`], and the rule set keeps one
//! ordered list per timing.
//!
//! | Timing      | Runs                                   | Sees                      |
//! |-------------|----------------------------------------|---------------------------|
//! | `PreScore`  | before the category value is computed  | dice, sheet, leader total |
//! | `PostScore` | after the category value is recorded   | dice, sheet, category     |
//! | `PostGame`  | once per player when round 13 is hit   | sheet                     |

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::formula::{all_same, YAHTZEE_POINTS};
use crate::core::{Category, ScoreSheet};

/// Upper total needed for the upper bonus.
pub const UPPER_BONUS_THRESHOLD: u32 = 63;
/// Points for reaching the upper threshold.
pub const UPPER_BONUS_POINTS: u32 = 35;
/// Points added per extra five-of-a-kind.
pub const YAHTZEE_BONUS_POINTS: u32 = 100;
/// Chance value that earns the end-game chance bonus.
pub const CHANCE_BONUS_TARGET: u32 = 21;
/// Points for hitting the chance target.
pub const CHANCE_BONUS_POINTS: u32 = 100;
/// Deficit to the leader at which the equalizer kicks in.
pub const EQUALIZER_GAP: u32 = 50;

/// When a hook runs relative to the score action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HookTiming {
    PreScore,
    PostScore,
    PostGame,
}

/// What a hook does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HookKind {
    /// 35 once the upper total reaches 63; 0 once the upper section is full
    /// without reaching it.
    UpperBonus,
    /// +100 per five-of-a-kind scored after a 50-point Yahtzee.
    YahtzeeBonus,
    /// Turn the lowest die into a six when trailing the leader by 50 or more.
    Equalizer,
    /// 100 for a chance of exactly 21 at game end, 0 otherwise.
    ChanceBonus,
}

impl HookKind {
    /// The timing this kind of hook belongs to.
    #[must_use]
    pub const fn timing(self) -> HookTiming {
        match self {
            HookKind::Equalizer => HookTiming::PreScore,
            HookKind::UpperBonus | HookKind::YahtzeeBonus => HookTiming::PostScore,
            HookKind::ChanceBonus => HookTiming::PostGame,
        }
    }
}

/// A registered hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Hook {
    /// Human-readable name (for logging).
    pub name: &'static str,
    pub timing: HookTiming,
    pub kind: HookKind,
}

impl Hook {
    #[must_use]
    pub const fn new(name: &'static str, kind: HookKind) -> Self {
        Self {
            name,
            timing: kind.timing(),
            kind,
        }
    }

    /// Run the hook against the acting player's view.
    ///
    /// Returns whether the hook changed anything.
    pub fn apply(&self, ctx: &mut HookContext<'_>) -> bool {
        match self.kind {
            HookKind::UpperBonus => {
                if ctx.sheet.upper_total() >= UPPER_BONUS_THRESHOLD {
                    ctx.sheet.set_bonus(Category::UpperBonus, UPPER_BONUS_POINTS)
                } else if ctx.sheet.upper_complete() {
                    ctx.sheet.set_bonus(Category::UpperBonus, 0)
                } else {
                    false
                }
            }
            HookKind::YahtzeeBonus => {
                let extra = ctx.category != Some(Category::Yahtzee)
                    && all_same(ctx.dice.as_slice())
                    && ctx.sheet.get(Category::Yahtzee) == Some(YAHTZEE_POINTS);
                if extra {
                    ctx.sheet.add_bonus(Category::YahtzeeBonus, YAHTZEE_BONUS_POINTS);
                }
                extra
            }
            HookKind::Equalizer => {
                let own = ctx.sheet.total();
                if ctx.leader_total < own.saturating_add(EQUALIZER_GAP) {
                    return false;
                }
                let lowest = ctx
                    .dice
                    .iter()
                    .enumerate()
                    .min_by_key(|&(_, &face)| face)
                    .map(|(i, _)| i);
                match lowest {
                    Some(i) if ctx.dice[i] < 6 => {
                        ctx.dice[i] = 6;
                        true
                    }
                    _ => false,
                }
            }
            HookKind::ChanceBonus => {
                let points = if ctx.sheet.get(Category::Chance) == Some(CHANCE_BONUS_TARGET) {
                    CHANCE_BONUS_POINTS
                } else {
                    0
                };
                ctx.sheet.set_bonus(Category::ChanceBonus, points)
            }
        }
    }
}

/// The slice of session state a hook may read and write.
pub struct HookContext<'a> {
    /// Category being scored. `None` for post-game hooks.
    pub category: Option<Category>,
    /// Face values being scored, in stored dice order.
    pub dice: &'a mut SmallVec<[u8; 6]>,
    /// The acting player's sheet.
    pub sheet: &'a mut ScoreSheet,
    /// Highest total among the other players.
    pub leader_total: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn run(
        kind: HookKind,
        category: Option<Category>,
        dice: &mut SmallVec<[u8; 6]>,
        sheet: &mut ScoreSheet,
        leader: u32,
    ) -> bool {
        let mut ctx = HookContext {
            category,
            dice,
            sheet,
            leader_total: leader,
        };
        Hook::new("test", kind).apply(&mut ctx)
    }

    #[test]
    fn test_timings() {
        assert_eq!(Hook::new("eq", HookKind::Equalizer).timing, HookTiming::PreScore);
        assert_eq!(Hook::new("ub", HookKind::UpperBonus).timing, HookTiming::PostScore);
        assert_eq!(Hook::new("cb", HookKind::ChanceBonus).timing, HookTiming::PostGame);
    }

    #[test]
    fn test_upper_bonus_reached() {
        let mut sheet = ScoreSheet::new();
        sheet.record(Category::Sixes, 30).unwrap();
        sheet.record(Category::Fives, 25).unwrap();
        let mut dice = smallvec![4, 4, 4, 1, 1];

        assert!(!run(HookKind::UpperBonus, Some(Category::Fives), &mut dice, &mut sheet, 0));
        sheet.record(Category::Fours, 12).unwrap();
        assert!(run(HookKind::UpperBonus, Some(Category::Fours), &mut dice, &mut sheet, 0));
        assert_eq!(sheet.get(Category::UpperBonus), Some(35));

        // Written once.
        assert!(!run(HookKind::UpperBonus, Some(Category::Ones), &mut dice, &mut sheet, 0));
    }

    #[test]
    fn test_upper_bonus_sentinel() {
        let mut sheet = ScoreSheet::new();
        for category in Category::UPPER {
            sheet.record(category, 1).unwrap();
        }
        let mut dice = smallvec![1, 2, 3, 4, 5];
        assert!(run(HookKind::UpperBonus, Some(Category::Sixes), &mut dice, &mut sheet, 0));
        assert_eq!(sheet.get(Category::UpperBonus), Some(0));
    }

    #[test]
    fn test_yahtzee_bonus() {
        let mut sheet = ScoreSheet::new();
        let mut dice = smallvec![4, 4, 4, 4, 4];

        sheet.record(Category::Yahtzee, 50).unwrap();
        assert!(!run(HookKind::YahtzeeBonus, Some(Category::Yahtzee), &mut dice, &mut sheet, 0));

        sheet.record(Category::Fours, 20).unwrap();
        assert!(run(HookKind::YahtzeeBonus, Some(Category::Fours), &mut dice, &mut sheet, 0));
        sheet.record(Category::Chance, 20).unwrap();
        assert!(run(HookKind::YahtzeeBonus, Some(Category::Chance), &mut dice, &mut sheet, 0));
        assert_eq!(sheet.get(Category::YahtzeeBonus), Some(200));
    }

    #[test]
    fn test_yahtzee_bonus_needs_scored_yahtzee() {
        let mut sheet = ScoreSheet::new();
        sheet.record(Category::Yahtzee, 0).unwrap();
        sheet.record(Category::Twos, 10).unwrap();
        let mut dice = smallvec![2, 2, 2, 2, 2];
        assert!(!run(HookKind::YahtzeeBonus, Some(Category::Twos), &mut dice, &mut sheet, 0));
        assert_eq!(sheet.get(Category::YahtzeeBonus), None);
    }

    #[test]
    fn test_equalizer() {
        let mut sheet = ScoreSheet::new();
        sheet.record(Category::Chance, 10).unwrap();
        let mut dice = smallvec![3, 1, 5, 2, 4];

        // Gap of 49: nothing happens.
        assert!(!run(HookKind::Equalizer, Some(Category::Ones), &mut dice, &mut sheet, 59));
        assert_eq!(dice.as_slice(), &[3, 1, 5, 2, 4]);

        // Gap of 50: lowest die becomes a six.
        assert!(run(HookKind::Equalizer, Some(Category::Sixes), &mut dice, &mut sheet, 60));
        assert_eq!(dice.as_slice(), &[3, 6, 5, 2, 4]);
    }

    #[test]
    fn test_equalizer_all_sixes() {
        let mut sheet = ScoreSheet::new();
        let mut dice = smallvec![6, 6, 6, 6, 6];
        assert!(!run(HookKind::Equalizer, Some(Category::Sixes), &mut dice, &mut sheet, 200));
    }

    #[test]
    fn test_chance_bonus() {
        let mut dice = smallvec![1, 1, 1, 1, 1];

        let mut hit = ScoreSheet::new();
        hit.record(Category::Chance, 21).unwrap();
        assert!(run(HookKind::ChanceBonus, None, &mut dice, &mut hit, 0));
        assert_eq!(hit.get(Category::ChanceBonus), Some(100));

        let mut miss = ScoreSheet::new();
        miss.record(Category::Chance, 22).unwrap();
        assert!(run(HookKind::ChanceBonus, None, &mut dice, &mut miss, 0));
        assert_eq!(miss.get(Category::ChanceBonus), Some(0));
    }
}
