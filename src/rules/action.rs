//! Player actions and their results.
//!
//! An [`Action`] is what a transport asks for; a [`Payload`] describes what
//! actually happened once the controller accepted it. Both serialize with an
//! `action` tag so transports can forward them unchanged.
//!
//! ```
//! use dice_referee::core::Category;
//! use dice_referee::rules::{Action, ActionKind};
//!
//! let action = Action::Score {
//!     category: Category::Chance,
//! };
//! assert_eq!(action.kind(), ActionKind::Score);
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{Category, Session};

/// The four player actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Join,
    Roll,
    Lock { die: usize },
    Score { category: Category },
}

impl Action {
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Action::Join => ActionKind::Join,
            Action::Roll => ActionKind::Roll,
            Action::Lock { .. } => ActionKind::Lock,
            Action::Score { .. } => ActionKind::Score,
        }
    }
}

/// Action discriminant, used in events and logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Join,
    Roll,
    Lock,
    Score,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ActionKind::Join => "join",
            ActionKind::Roll => "roll",
            ActionKind::Lock => "lock",
            ActionKind::Score => "score",
        })
    }
}

/// What an accepted action did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Payload {
    Join {
        /// Seat index of the new player.
        seat: usize,
    },
    Roll {
        /// Face values after the roll.
        dice: Vec<u8>,
        /// Rolls taken this turn, including this one.
        roll_count: u8,
    },
    Lock {
        die: usize,
        /// Lock flag after the toggle.
        locked: bool,
    },
    Score {
        category: Category,
        points: u32,
        /// Face values that were scored, after pre-score hooks.
        dice: Vec<u8>,
        /// Bonus entries written by hooks during this action.
        bonuses: Vec<BonusAward>,
        /// Round after the turn ended.
        round: u8,
        game_over: bool,
    },
}

impl Payload {
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Payload::Join { .. } => ActionKind::Join,
            Payload::Roll { .. } => ActionKind::Roll,
            Payload::Lock { .. } => ActionKind::Lock,
            Payload::Score { .. } => ActionKind::Score,
        }
    }
}

/// A bonus entry written or grown by a hook.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusAward {
    pub player: String,
    pub category: Category,
    /// Value of the entry after the action.
    pub points: u32,
}

/// Result of an accepted action: the new session and what changed.
///
/// The session passed to the controller is never touched; callers persist
/// `session` from here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub session: Session,
    pub payload: Payload,
}

impl Outcome {
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        self.payload.kind()
    }
}
