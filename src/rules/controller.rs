//! Turn controller: the join / roll / lock / score state machine.
//!
//! A controller is bound to one session snapshot and one acting identity.
//! Each action validates against the snapshot, applies itself to a clone,
//! and returns the clone in an [`Outcome`]. A rejected action returns an
//! error and the snapshot is left exactly as it was.
//!
//! ## Check order
//!
//! Roll, lock and score share a prefix:
//! 1. turn order (also rejects sessions with no players)
//! 2. game over
//!
//! then their own checks:
//! - roll: out of rolls
//! - lock: out of rolls, must have rolled, die index in range
//! - score: must have rolled, not a bonus category, not already scored

use super::action::{Action, BonusAward, Outcome, Payload};
use crate::core::{Category, GameRng, Player, ScoreSheet, Session, MAX_ROLLS};
use crate::error::{Error, Result};
use crate::scoring::{HookContext, HookTiming, RuleSet};

/// Applies one player's actions to a session snapshot.
///
/// ```
/// use dice_referee::core::{FeatureSet, GameRng, Session};
/// use dice_referee::rules::TurnController;
///
/// let session = Session::new(FeatureSet::classic());
/// let session = TurnController::new(&session, "alice").join().unwrap().session;
///
/// let mut rng = GameRng::new(42);
/// let outcome = TurnController::new(&session, "alice").roll(&mut rng).unwrap();
/// assert_eq!(outcome.session.roll_count(), 1);
///
/// // Not bob's turn; the snapshot is untouched.
/// assert!(TurnController::new(&outcome.session, "bob").roll(&mut rng).is_err());
/// ```
pub struct TurnController<'a> {
    session: &'a Session,
    identity: &'a str,
    rules: RuleSet,
}

impl<'a> TurnController<'a> {
    /// Bind a controller to a snapshot and an acting identity.
    #[must_use]
    pub fn new(session: &'a Session, identity: &'a str) -> Self {
        Self {
            session,
            identity,
            rules: session.rules(),
        }
    }

    /// The rule set derived from the session's features.
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Dispatch an [`Action`].
    pub fn apply(&self, action: Action, rng: &mut GameRng) -> Result<Outcome> {
        match action {
            Action::Join => self.join(),
            Action::Roll => self.roll(rng),
            Action::Lock { die } => self.lock(die),
            Action::Score { category } => self.score(category),
        }
    }

    // === Checks ===

    fn check_turn(&self) -> Result<()> {
        match self.session.current() {
            Some(player) if player.identity == self.identity => Ok(()),
            _ => Err(Error::NotYourTurn),
        }
    }

    fn check_active(&self) -> Result<()> {
        self.check_turn()?;
        if self.session.is_terminal() {
            return Err(Error::GameOver);
        }
        Ok(())
    }

    // === Actions ===

    /// Seat the acting identity. Only legal before the first score.
    pub fn join(&self) -> Result<Outcome> {
        if !self.session.is_joinable() {
            return Err(Error::GameStarted);
        }
        if self.session.player(self.identity).is_some() {
            return Err(Error::AlreadyJoined(self.identity.to_string()));
        }

        let mut next = self.session.clone();
        let seat = next.players().len();
        next.push_player(Player::new(self.identity));

        Ok(Outcome {
            session: next,
            payload: Payload::Join { seat },
        })
    }

    /// Re-roll every unlocked die.
    pub fn roll(&self, rng: &mut GameRng) -> Result<Outcome> {
        self.check_active()?;
        if self.session.roll_count() >= MAX_ROLLS {
            return Err(Error::OutOfRolls);
        }

        let mut next = self.session.clone();
        next.dice_mut().roll(rng);
        next.record_roll();

        let payload = Payload::Roll {
            dice: next.dice().values().to_vec(),
            roll_count: next.roll_count(),
        };
        Ok(Outcome {
            session: next,
            payload,
        })
    }

    /// Toggle the lock flag of one die.
    pub fn lock(&self, die: usize) -> Result<Outcome> {
        self.check_active()?;
        if self.session.roll_count() >= MAX_ROLLS {
            return Err(Error::OutOfRolls);
        }
        if self.session.roll_count() == 0 {
            return Err(Error::NoRollYet);
        }

        let mut next = self.session.clone();
        let locked = next.dice_mut().toggle_lock(die)?;

        Ok(Outcome {
            session: next,
            payload: Payload::Lock { die, locked },
        })
    }

    /// Score the current dice into `category` and end the turn.
    pub fn score(&self, category: Category) -> Result<Outcome> {
        self.check_active()?;
        if self.session.roll_count() == 0 {
            return Err(Error::NoRollYet);
        }
        if category.is_bonus() {
            return Err(Error::BonusCategory(category));
        }
        let seat = self.session.current_player();
        if self.session.players()[seat].sheet.contains(category) {
            return Err(Error::AlreadyScored(category));
        }

        let leader_total = self
            .session
            .players()
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != seat)
            .map(|(_, p)| p.sheet.total())
            .max()
            .unwrap_or(0);

        let mut next = self.session.clone();
        let mut dice = next.dice().values();
        let mut bonuses = Vec::new();

        let points = {
            let player = &mut next.players_mut()[seat];
            let before = player.sheet.clone();
            let mut ctx = HookContext {
                category: Some(category),
                dice: &mut dice,
                sheet: &mut player.sheet,
                leader_total,
            };

            self.rules.run_hooks(HookTiming::PreScore, &mut ctx);
            let points = self.rules.score(category, ctx.dice.as_slice())?;
            ctx.sheet.record(category, points)?;
            self.rules.run_hooks(HookTiming::PostScore, &mut ctx);

            collect_bonuses(&player.identity, &before, &player.sheet, &mut bonuses);
            points
        };
        next.dice_mut().set_values(&dice);

        let game_over = next.end_turn();
        if game_over {
            for player in next.players_mut().iter_mut() {
                let before = player.sheet.clone();
                let mut scratch = dice.clone();
                let mut ctx = HookContext {
                    category: None,
                    dice: &mut scratch,
                    sheet: &mut player.sheet,
                    leader_total: 0,
                };
                self.rules.run_hooks(HookTiming::PostGame, &mut ctx);
                collect_bonuses(&player.identity, &before, &player.sheet, &mut bonuses);
            }
        }

        let payload = Payload::Score {
            category,
            points,
            dice: dice.to_vec(),
            bonuses,
            round: next.round(),
            game_over,
        };
        Ok(Outcome {
            session: next,
            payload,
        })
    }
}

/// Append every bonus entry that differs between two versions of a sheet.
fn collect_bonuses(player: &str, before: &ScoreSheet, after: &ScoreSheet, out: &mut Vec<BonusAward>) {
    for (category, points) in after.iter().filter(|(c, _)| c.is_bonus()) {
        if before.get(category) != Some(points) {
            out.push(BonusAward {
                player: player.to_string(),
                category,
                points,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Feature, FeatureSet};

    fn joined(names: &[&str]) -> Session {
        let mut session = Session::new(FeatureSet::classic());
        for name in names {
            session = TurnController::new(&session, name).join().unwrap().session;
        }
        session
    }

    fn rolled(session: &Session, who: &str, rng: &mut GameRng) -> Session {
        TurnController::new(session, who).roll(rng).unwrap().session
    }

    #[test]
    fn test_join() {
        let session = joined(&["alice", "bob"]);
        assert_eq!(session.players().len(), 2);
        assert_eq!(session.players()[1].identity, "bob");
        assert_eq!(session.round(), 0);
        assert_eq!(session.current_player(), 0);
    }

    #[test]
    fn test_join_twice_rejected() {
        let session = joined(&["alice"]);
        let err = TurnController::new(&session, "alice").join().unwrap_err();
        assert!(matches!(err, Error::AlreadyJoined(name) if name == "alice"));
    }

    #[test]
    fn test_join_after_first_score_rejected() {
        let mut rng = GameRng::new(1);
        let session = joined(&["alice", "bob"]);
        let session = rolled(&session, "alice", &mut rng);
        let session = TurnController::new(&session, "alice")
            .score(Category::Chance)
            .unwrap()
            .session;

        let err = TurnController::new(&session, "carol").join().unwrap_err();
        assert!(matches!(err, Error::GameStarted));
    }

    #[test]
    fn test_join_mid_first_turn_allowed() {
        // Rolling does not close the table; only a score does.
        let mut rng = GameRng::new(1);
        let session = rolled(&joined(&["alice"]), "alice", &mut rng);
        let outcome = TurnController::new(&session, "bob").join().unwrap();
        assert_eq!(outcome.payload, Payload::Join { seat: 1 });
    }

    #[test]
    fn test_roll_without_players() {
        let session = Session::new(FeatureSet::classic());
        let mut rng = GameRng::new(1);
        let err = TurnController::new(&session, "alice").roll(&mut rng).unwrap_err();
        assert!(matches!(err, Error::NotYourTurn));
    }

    #[test]
    fn test_roll_ceiling() {
        let mut rng = GameRng::new(1);
        let mut session = joined(&["alice"]);
        for expected in 1..=3 {
            session = rolled(&session, "alice", &mut rng);
            assert_eq!(session.roll_count(), expected);
        }
        let err = TurnController::new(&session, "alice").roll(&mut rng).unwrap_err();
        assert!(matches!(err, Error::OutOfRolls));
    }

    #[test]
    fn test_roll_keeps_locked_dice() {
        let mut rng = GameRng::new(5);
        let session = rolled(&joined(&["alice"]), "alice", &mut rng);
        let kept = session.dice().get(2).unwrap().value;
        let session = TurnController::new(&session, "alice").lock(2).unwrap().session;
        let session = rolled(&session, "alice", &mut rng);
        assert_eq!(session.dice().get(2).unwrap().value, kept);
        assert!(session.dice().get(2).unwrap().locked);
    }

    #[test]
    fn test_lock_requires_roll() {
        let session = joined(&["alice"]);
        let err = TurnController::new(&session, "alice").lock(0).unwrap_err();
        assert!(matches!(err, Error::NoRollYet));
    }

    #[test]
    fn test_lock_index_bounds() {
        let mut rng = GameRng::new(1);
        let session = rolled(&joined(&["alice"]), "alice", &mut rng);
        let err = TurnController::new(&session, "alice").lock(5).unwrap_err();
        assert!(matches!(err, Error::InvalidDieIndex { index: 5, len: 5 }));
    }

    #[test]
    fn test_lock_after_last_roll_rejected() {
        let mut rng = GameRng::new(1);
        let mut session = joined(&["alice"]);
        for _ in 0..3 {
            session = rolled(&session, "alice", &mut rng);
        }
        let err = TurnController::new(&session, "alice").lock(0).unwrap_err();
        assert!(matches!(err, Error::OutOfRolls));
    }

    #[test]
    fn test_score_advances_turn() {
        let mut rng = GameRng::new(9);
        let session = rolled(&joined(&["alice", "bob"]), "alice", &mut rng);
        let session = TurnController::new(&session, "alice").lock(0).unwrap().session;

        let outcome = TurnController::new(&session, "alice")
            .score(Category::Chance)
            .unwrap();
        let next = &outcome.session;

        let expected: u32 = session.dice().values().iter().map(|&d| u32::from(d)).sum();
        assert_eq!(next.players()[0].sheet.get(Category::Chance), Some(expected));
        assert_eq!(next.current_player(), 1);
        assert_eq!(next.round(), 0);
        assert_eq!(next.roll_count(), 0);
        assert!(next.dice().iter().all(|d| !d.locked));
    }

    #[test]
    fn test_score_rejections_leave_snapshot() {
        let mut rng = GameRng::new(9);
        let session = joined(&["alice"]);
        let controller = TurnController::new(&session, "alice");
        assert!(matches!(controller.score(Category::Ones), Err(Error::NoRollYet)));

        let session = rolled(&session, "alice", &mut rng);
        let snapshot = session.clone();
        let controller = TurnController::new(&session, "alice");
        assert!(matches!(
            controller.score(Category::UpperBonus),
            Err(Error::BonusCategory(Category::UpperBonus))
        ));
        assert_eq!(session, snapshot);
    }

    #[test]
    fn test_score_twice_rejected() {
        let mut rng = GameRng::new(9);
        let session = rolled(&joined(&["alice"]), "alice", &mut rng);
        let session = TurnController::new(&session, "alice")
            .score(Category::Fives)
            .unwrap()
            .session;
        let session = rolled(&session, "alice", &mut rng);
        let err = TurnController::new(&session, "alice")
            .score(Category::Fives)
            .unwrap_err();
        assert!(matches!(err, Error::AlreadyScored(Category::Fives)));
    }

    #[test]
    fn test_full_game_reaches_terminal() {
        let mut rng = GameRng::new(11);
        let mut session = joined(&["alice", "bob"]);
        let mut last = None;

        for category in Category::PLAYABLE {
            for who in ["alice", "bob"] {
                session = rolled(&session, who, &mut rng);
                let outcome = TurnController::new(&session, who).score(category).unwrap();
                session = outcome.session;
                last = Some(outcome.payload);
            }
        }

        assert!(session.is_terminal());
        assert_eq!(session.round(), 13);
        assert!(matches!(last, Some(Payload::Score { game_over: true, round: 13, .. })));

        let err = TurnController::new(&session, "alice").roll(&mut rng).unwrap_err();
        assert!(matches!(err, Error::GameOver));
    }

    #[test]
    fn test_post_game_hooks_run_for_every_player() {
        let features = FeatureSet::new([Feature::ChanceBonus]).unwrap();
        let mut session = Session::new(features);
        for name in ["alice", "bob"] {
            session = TurnController::new(&session, name).join().unwrap().session;
        }

        let mut rng = GameRng::new(3);
        for category in Category::PLAYABLE {
            for who in ["alice", "bob"] {
                session = rolled(&session, who, &mut rng);
                session = TurnController::new(&session, who).score(category).unwrap().session;
            }
        }

        for player in session.players() {
            let expected = if player.sheet.get(Category::Chance) == Some(21) { 100 } else { 0 };
            assert_eq!(player.sheet.get(Category::ChanceBonus), Some(expected));
        }
    }

    #[test]
    fn test_apply_dispatch() {
        let mut rng = GameRng::new(2);
        let session = joined(&["alice"]);
        let outcome = TurnController::new(&session, "alice")
            .apply(Action::Roll, &mut rng)
            .unwrap();
        assert!(matches!(outcome.payload, Payload::Roll { roll_count: 1, .. }));
    }
}
