//! Core data model: dice, categories, players, features, sessions, RNG,
//! configuration.
//!
//! Everything here is plain data. Game rules live in `scoring` and `rules`.

pub mod category;
pub mod config;
pub mod dice;
pub mod feature;
pub mod player;
pub mod rng;
pub mod state;

pub use category::Category;
pub use config::ServerConfig;
pub use dice::{Dice, Die};
pub use feature::{Feature, FeatureSet};
pub use player::{Player, ScoreSheet};
pub use rng::{GameRng, GameRngState};
pub use state::{Session, SessionKey, MAX_ROLLS, ROUNDS};
