//! # dice-referee
//!
//! Session rule engine for a multiplayer, turn-based dice-scoring game in
//! the Yahtzee family.
//!
//! ## Design Principles
//!
//! 1. **Sessions are values**: a [`Session`] is plain, serializable data.
//!    Actions never mutate it in place; the controller returns a new one.
//!
//! 2. **Rules from features**: scoring formulas and hooks are assembled
//!    from a session's [`FeatureSet`] on demand, so stored sessions only
//!    carry their feature list.
//!
//! 3. **One writer per session**: read-modify-write of a session happens
//!    under the store's per-key exclusive section, and events are published
//!    before that section ends.
//!
//! ## Modules
//!
//! - `core`: dice, categories, players, features, sessions, RNG, config
//! - `scoring`: category formulas and feature hooks
//! - `rules`: actions and the turn controller
//! - `store`: session storage and per-key locking
//! - `events`: per-session event fan-out
//! - `service`: the lock → load → act → save → publish flow
//! - `codec`: binary session snapshots
//! - `telemetry`: logging setup

pub mod codec;
pub mod core;
pub mod error;
pub mod events;
pub mod rules;
pub mod scoring;
pub mod service;
pub mod store;
pub mod telemetry;

// Re-export commonly used types
pub use crate::core::{
    Category, Dice, Die, Feature, FeatureSet, GameRng, GameRngState, Player, ScoreSheet,
    ServerConfig, Session, SessionKey, MAX_ROLLS, ROUNDS,
};

pub use crate::error::{Error, ErrorKind, Result};

pub use crate::scoring::{score, Formula, Hook, HookContext, HookKind, HookTiming, RuleSet};

pub use crate::rules::{Action, ActionKind, BonusAward, Outcome, Payload, TurnController};

pub use crate::events::{Event, EventBus};

pub use crate::store::{MemoryGuard, MemoryStore, SessionStore};

pub use crate::service::SessionService;

pub use crate::codec::{decode_session, encode_session};
