//! Players and their score sheets.
//!
//! ## ScoreSheet
//!
//! A mapping from [`Category`] to points. Playable categories are written
//! once through [`ScoreSheet::record`]; bonus categories are written by
//! engine hooks through [`ScoreSheet::set_bonus`] and
//! [`ScoreSheet::add_bonus`].

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::category::Category;
use crate::error::{Error, Result};

/// Per-player score sheet.
///
/// Backed by an `im::OrdMap` so cloning a session is O(1) and iteration
/// order is the category order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreSheet {
    entries: OrdMap<Category, u32>,
}

impl ScoreSheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, category: Category) -> Option<u32> {
        self.entries.get(&category).copied()
    }

    #[must_use]
    pub fn contains(&self, category: Category) -> bool {
        self.entries.contains_key(&category)
    }

    /// Record a player-chosen category. Each category is written once.
    pub fn record(&mut self, category: Category, points: u32) -> Result<()> {
        if category.is_bonus() {
            return Err(Error::BonusCategory(category));
        }
        if self.contains(category) {
            return Err(Error::AlreadyScored(category));
        }
        self.entries.insert(category, points);
        Ok(())
    }

    /// Write a bonus category if it is not written yet.
    ///
    /// Returns whether the entry was written.
    pub fn set_bonus(&mut self, category: Category, points: u32) -> bool {
        debug_assert!(category.is_bonus());
        if self.contains(category) {
            return false;
        }
        self.entries.insert(category, points);
        true
    }

    /// Grow a bonus category, creating it at `points` when absent.
    pub fn add_bonus(&mut self, category: Category, points: u32) {
        debug_assert!(category.is_bonus());
        *self.entries.entry(category).or_insert(0) += points;
    }

    /// Sum of every entry, bonuses included.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.entries.values().sum()
    }

    /// Sum of the six upper categories.
    #[must_use]
    pub fn upper_total(&self) -> u32 {
        Category::UPPER.iter().filter_map(|&c| self.get(c)).sum()
    }

    /// All six upper categories are filled.
    #[must_use]
    pub fn upper_complete(&self) -> bool {
        Category::UPPER.iter().all(|&c| self.contains(c))
    }

    /// Playable categories not yet filled, in category order.
    pub fn open_categories(&self) -> impl Iterator<Item = Category> + '_ {
        Category::PLAYABLE
            .into_iter()
            .filter(move |&c| !self.contains(c))
    }

    /// Iterate over (category, points) in category order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        self.entries.iter().map(|(&c, &p)| (c, p))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    /// Opaque identity supplied by the transport.
    pub identity: String,
    pub sheet: ScoreSheet,
}

impl Player {
    #[must_use]
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            sheet: ScoreSheet::new(),
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.identity, self.sheet.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_once() {
        let mut sheet = ScoreSheet::new();
        sheet.record(Category::Chance, 18).unwrap();
        assert_eq!(sheet.get(Category::Chance), Some(18));

        let err = sheet.record(Category::Chance, 20).unwrap_err();
        assert!(matches!(err, Error::AlreadyScored(Category::Chance)));
        assert_eq!(sheet.get(Category::Chance), Some(18));
    }

    #[test]
    fn test_record_rejects_bonus() {
        let mut sheet = ScoreSheet::new();
        let err = sheet.record(Category::UpperBonus, 35).unwrap_err();
        assert!(matches!(err, Error::BonusCategory(Category::UpperBonus)));
        assert!(sheet.is_empty());
    }

    #[test]
    fn test_bonus_writes() {
        let mut sheet = ScoreSheet::new();
        assert!(sheet.set_bonus(Category::UpperBonus, 35));
        assert!(!sheet.set_bonus(Category::UpperBonus, 0));
        assert_eq!(sheet.get(Category::UpperBonus), Some(35));

        sheet.add_bonus(Category::YahtzeeBonus, 100);
        sheet.add_bonus(Category::YahtzeeBonus, 100);
        assert_eq!(sheet.get(Category::YahtzeeBonus), Some(200));
    }

    #[test]
    fn test_totals() {
        let mut sheet = ScoreSheet::new();
        sheet.record(Category::Sixes, 18).unwrap();
        sheet.record(Category::Twos, 4).unwrap();
        sheet.record(Category::Chance, 20).unwrap();
        sheet.set_bonus(Category::UpperBonus, 35);

        assert_eq!(sheet.upper_total(), 22);
        assert_eq!(sheet.total(), 77);
        assert!(!sheet.upper_complete());
    }

    #[test]
    fn test_open_categories() {
        let mut sheet = ScoreSheet::new();
        assert_eq!(sheet.open_categories().count(), 13);
        sheet.record(Category::Ones, 3).unwrap();
        assert!(sheet.open_categories().all(|c| c != Category::Ones));
        assert_eq!(sheet.open_categories().count(), 12);
    }

    #[test]
    fn test_player_serialization() {
        let mut player = Player::new("alice");
        player.sheet.record(Category::FullHouse, 25).unwrap();
        let json = serde_json::to_string(&player).unwrap();
        let deserialized: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(player, deserialized);
    }
}
