//! Service configuration.

use serde::{Deserialize, Serialize};

use super::feature::{Feature, FeatureSet};
use crate::error::Result;

/// Configuration for a [`SessionService`](crate::service::SessionService).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Seed for the dice RNG. `None` seeds from OS entropy.
    /// Same seed and same action sequence produce the same rolls.
    pub seed: Option<u64>,

    /// Events buffered per subscriber before new events are dropped for it.
    pub subscriber_buffer: usize,

    /// Features applied when a session is created without an explicit set.
    pub default_features: Vec<Feature>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            subscriber_buffer: 64,
            default_features: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Use a fixed RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the per-subscriber buffer (minimum 1).
    #[must_use]
    pub fn with_subscriber_buffer(mut self, buffer: usize) -> Self {
        self.subscriber_buffer = buffer.max(1);
        self
    }

    /// Set the features used by default.
    #[must_use]
    pub fn with_default_features(mut self, features: impl IntoIterator<Item = Feature>) -> Self {
        self.default_features = features.into_iter().collect();
        self
    }

    /// Resolve the default features into a validated set.
    pub fn default_feature_set(&self) -> Result<FeatureSet> {
        FeatureSet::new(self.default_features.iter().copied())
    }
}
