//! Scoring engine integration tests.
//!
//! Formula values for the classic and variant rule sets, plus properties
//! that must hold for every hand.

use dice_referee::scoring::{face_counts, RuleSet};
use dice_referee::{score, Category, Error, Feature, FeatureSet};
use proptest::prelude::*;

fn hand() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(1u8..=6, 5)
}

/// Exactly one face with three or more, plus a different face with two or more.
fn is_full_house_by_counts(dice: &[u8]) -> bool {
    let counts = face_counts(dice);
    let triples: Vec<usize> = (1..=6).filter(|&f| counts[f] >= 3).collect();
    triples.len() == 1 && (1..=6).any(|f| f != triples[0] && counts[f] >= 2)
}

#[test]
fn test_classic_values() {
    let classic = FeatureSet::classic();
    assert_eq!(score(Category::Ones, &[1, 2, 3, 1, 1], &classic).unwrap(), 3);
    assert_eq!(score(Category::Yahtzee, &[3, 3, 3, 3, 3], &classic).unwrap(), 50);
    assert_eq!(score(Category::FullHouse, &[5, 5, 2, 5, 2], &classic).unwrap(), 25);
    assert_eq!(score(Category::Chance, &[1, 6, 3, 3, 5], &classic).unwrap(), 18);
}

#[test]
fn test_classic_table() {
    let rules = RuleSet::classic();
    let cases: &[(Category, [u8; 5], u32)] = &[
        (Category::Sixes, [6, 6, 1, 6, 2], 18),
        (Category::ThreeOfAKind, [4, 4, 4, 2, 1], 12),
        (Category::ThreeOfAKind, [4, 4, 3, 2, 1], 0),
        (Category::FourOfAKind, [2, 2, 2, 2, 6], 8),
        (Category::FullHouse, [3, 3, 3, 3, 3], 0),
        (Category::SmallStraight, [6, 3, 4, 5, 5], 30),
        (Category::SmallStraight, [1, 2, 3, 5, 6], 0),
        (Category::LargeStraight, [5, 4, 3, 2, 1], 40),
        (Category::LargeStraight, [1, 2, 3, 4, 6], 0),
        (Category::Yahtzee, [3, 3, 3, 3, 2], 0),
    ];
    for &(category, dice, expected) in cases {
        assert_eq!(
            rules.score(category, &dice).unwrap(),
            expected,
            "{} over {:?}",
            category,
            dice
        );
    }
}

#[test]
fn test_unknown_and_bonus_categories() {
    assert!(matches!(
        "full_houses".parse::<Category>(),
        Err(Error::UnknownCategory(name)) if name == "full_houses"
    ));
    assert!(matches!(
        score(Category::YahtzeeBonus, &[1, 1, 1, 1, 1], &FeatureSet::classic()),
        Err(Error::BonusCategory(Category::YahtzeeBonus))
    ));
}

#[test]
fn test_six_dice_chance_is_best_five() {
    let six = FeatureSet::new([Feature::SixDice]).unwrap();
    assert_eq!(score(Category::Chance, &[6, 6, 6, 6, 6, 1], &six).unwrap(), 30);
    assert_eq!(score(Category::Chance, &[2, 2, 2, 2, 2, 2], &six).unwrap(), 10);
    // Five-of-a-kind needs every die to match.
    assert_eq!(score(Category::Yahtzee, &[5, 5, 5, 5, 5, 5], &six).unwrap(), 50);
    assert_eq!(score(Category::Yahtzee, &[5, 5, 5, 5, 5, 4], &six).unwrap(), 0);
}

#[test]
fn test_scandinavian_values() {
    let scandi = FeatureSet::parse(["scandinavian_scoring"]).unwrap();
    assert_eq!(score(Category::FullHouse, &[6, 6, 6, 4, 4], &scandi).unwrap(), 26);
    assert_eq!(score(Category::FullHouse, &[6, 6, 6, 4, 3], &scandi).unwrap(), 0);
    assert_eq!(score(Category::SmallStraight, &[5, 4, 3, 2, 1], &scandi).unwrap(), 15);
    assert_eq!(score(Category::LargeStraight, &[6, 5, 4, 3, 2], &scandi).unwrap(), 20);
    assert_eq!(score(Category::LargeStraight, &[1, 2, 3, 4, 5], &scandi).unwrap(), 0);
}

#[test]
fn test_incompatible_features() {
    let err = FeatureSet::parse(["six_dice", "scandinavian_scoring"]).unwrap_err();
    assert!(matches!(
        err,
        Error::IncompatibleFeatures(Feature::SixDice, Feature::ScandinavianScoring)
    ));
    assert!(matches!(
        FeatureSet::parse(["seven_dice"]),
        Err(Error::UnknownFeature(name)) if name == "seven_dice"
    ));
}

proptest! {
    #[test]
    fn prop_full_house_iff_triple_and_pair(dice in hand()) {
        let points = RuleSet::classic().score(Category::FullHouse, &dice).unwrap();
        let expected = if is_full_house_by_counts(&dice) { 25 } else { 0 };
        prop_assert_eq!(points, expected);
    }

    #[test]
    fn prop_scoring_is_pure(dice in hand(), index in 0usize..13) {
        let rules = RuleSet::classic();
        let category = Category::PLAYABLE[index];
        let before = dice.clone();
        let first = rules.score(category, &dice).unwrap();
        let second = rules.score(category, &dice).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(dice, before);
    }

    #[test]
    fn prop_hints_match_score(dice in hand()) {
        let rules = RuleSet::classic();
        for (category, points) in rules.hints(&dice).unwrap() {
            prop_assert_eq!(points, rules.score(category, &dice).unwrap());
        }
    }
}
