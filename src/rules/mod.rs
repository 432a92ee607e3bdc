//! Turn rules: player actions and the controller that applies them.
//!
//! The controller never interprets transport concepts. It takes a session
//! snapshot, an acting identity and an [`Action`], and either rejects the
//! action or returns the next session with a [`Payload`] describing it.

pub mod action;
pub mod controller;

pub use action::{Action, ActionKind, BonusAward, Outcome, Payload};
pub use controller::TurnController;
