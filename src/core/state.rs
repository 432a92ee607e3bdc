//! Session state: one game in progress.
//!
//! A [`Session`] is plain data. It is created empty by [`Session::new`] and
//! mutated only by the turn controller, which works on a clone and hands the
//! clone back on success. Players and score sheets use `im` persistent
//! structures so that clone is O(1).
//!
//! ## Counters
//!
//! - `round`: completed rounds, `0..=13`; 13 is terminal
//! - `current_player`: index into `players`
//! - `roll_count`: rolls taken this turn, `0..=3`

use im::Vector;
use serde::{Deserialize, Serialize};

use rustc_hash::FxHashSet;

use super::dice::{validate_faces, Dice};
use super::feature::FeatureSet;
use super::player::Player;
use crate::error::{Error, Result};
use crate::scoring::RuleSet;

/// Rounds in a game. Reaching this round ends the game.
pub const ROUNDS: u8 = 13;

/// Rolls allowed per turn.
pub const MAX_ROLLS: u8 = 3;

/// Opaque session identifier allocated by the service.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionKey(String);

impl SessionKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Allocate a fresh random key.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// One game in progress.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Session {
    players: Vector<Player>,
    dice: Dice,
    features: FeatureSet,
    round: u8,
    current_player: usize,
    roll_count: u8,
}

impl Session {
    /// Create an empty session with dice sized for `features`.
    #[must_use]
    pub fn new(features: FeatureSet) -> Self {
        Self {
            players: Vector::new(),
            dice: Dice::new(features.dice_count()),
            features,
            round: 0,
            current_player: 0,
            roll_count: 0,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn players(&self) -> &Vector<Player> {
        &self.players
    }

    #[must_use]
    pub fn dice(&self) -> &Dice {
        &self.dice
    }

    #[must_use]
    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    #[must_use]
    pub fn round(&self) -> u8 {
        self.round
    }

    #[must_use]
    pub fn current_player(&self) -> usize {
        self.current_player
    }

    #[must_use]
    pub fn roll_count(&self) -> u8 {
        self.roll_count
    }

    /// The player whose turn it is, if anyone joined.
    #[must_use]
    pub fn current(&self) -> Option<&Player> {
        self.players.get(self.current_player)
    }

    /// Look up a player by identity.
    #[must_use]
    pub fn player(&self, identity: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.identity == identity)
    }

    /// Joining is open until the first score is recorded.
    #[must_use]
    pub fn is_joinable(&self) -> bool {
        self.round == 0 && self.current_player == 0
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.round >= ROUNDS
    }

    /// Rule set implied by this session's features.
    #[must_use]
    pub fn rules(&self) -> RuleSet {
        RuleSet::new(&self.features)
    }

    /// (identity, total) pairs, highest total first; ties keep seat order.
    #[must_use]
    pub fn standings(&self) -> Vec<(String, u32)> {
        let mut standings: Vec<_> = self
            .players
            .iter()
            .map(|p| (p.identity.clone(), p.sheet.total()))
            .collect();
        standings.sort_by(|a, b| b.1.cmp(&a.1));
        standings
    }

    /// Check the counters and dice against the session invariants.
    ///
    /// Sessions built by the controller always pass; this is for sessions
    /// that arrive from outside, such as decoded snapshots.
    pub fn validate(&self) -> Result<()> {
        let expected = self.features.dice_count();
        if self.dice.len() != expected {
            return Err(Error::CorruptSession(format!(
                "{} dice, feature set needs {expected}",
                self.dice.len()
            )));
        }
        validate_faces(&self.dice.values())
            .map_err(|err| Error::CorruptSession(err.to_string()))?;
        if self.roll_count > MAX_ROLLS {
            return Err(Error::CorruptSession(format!(
                "roll count {} above {MAX_ROLLS}",
                self.roll_count
            )));
        }
        if self.round > ROUNDS {
            return Err(Error::CorruptSession(format!(
                "round {} above {ROUNDS}",
                self.round
            )));
        }
        // An empty session still points at seat 0.
        if self.current_player >= self.players.len().max(1) {
            return Err(Error::CorruptSession(format!(
                "current player {} with {} players",
                self.current_player,
                self.players.len()
            )));
        }
        let mut seen = FxHashSet::default();
        if let Some(dup) = self.players.iter().find(|p| !seen.insert(p.identity.as_str())) {
            return Err(Error::CorruptSession(format!(
                "player {} seated twice",
                dup.identity
            )));
        }
        Ok(())
    }

    // === Controller-only mutation ===

    pub(crate) fn push_player(&mut self, player: Player) {
        self.players.push_back(player);
    }

    pub(crate) fn players_mut(&mut self) -> &mut Vector<Player> {
        &mut self.players
    }

    pub(crate) fn dice_mut(&mut self) -> &mut Dice {
        &mut self.dice
    }

    pub(crate) fn record_roll(&mut self) {
        self.roll_count += 1;
    }

    /// End the current turn: unlock dice, reset rolls, pass to the next
    /// seat, and count a round when the seat wraps.
    ///
    /// Returns true when this ended the game.
    pub(crate) fn end_turn(&mut self) -> bool {
        self.dice.unlock_all();
        self.roll_count = 0;
        self.current_player = (self.current_player + 1) % self.players.len().max(1);
        if self.current_player == 0 {
            self.round += 1;
            return self.round == ROUNDS;
        }
        false
    }
}
