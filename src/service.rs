//! Session service: the request flow around the turn controller.
//!
//! Every action runs inside the store's exclusive section for its key:
//!
//! ```text
//! lock(key) → load → TurnController → save → publish → unlock
//! ```
//!
//! Subscribers therefore see events for one session in the order the
//! actions were committed, and a rejected action leaves nothing behind.

use dashmap::DashMap;
use tokio::sync::{mpsc, Mutex};

use crate::core::{
    Category, FeatureSet, GameRng, GameRngState, ServerConfig, Session, SessionKey,
};
use crate::error::Result;
use crate::events::{Event, EventBus};
use crate::rules::{Action, Outcome, TurnController};
use crate::scoring::RuleSet;
use crate::store::{MemoryStore, SessionStore};

/// Owns a store, an event bus and the dice RNG.
///
/// Each session rolls from its own RNG stream, forked from a master RNG
/// when the session is created. With a configured seed, the same sequence
/// of sessions and actions reproduces the same rolls.
pub struct SessionService<S: SessionStore = MemoryStore> {
    store: S,
    bus: EventBus,
    config: ServerConfig,
    master: Mutex<GameRng>,
    streams: DashMap<SessionKey, GameRng>,
}

impl SessionService<MemoryStore> {
    /// Service backed by a fresh [`MemoryStore`].
    #[must_use]
    pub fn in_memory(config: ServerConfig) -> Self {
        Self::new(MemoryStore::new(), config)
    }
}

impl<S: SessionStore> SessionService<S> {
    #[must_use]
    pub fn new(store: S, config: ServerConfig) -> Self {
        let master = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        Self {
            store,
            bus: EventBus::new(config.subscriber_buffer),
            config,
            master: Mutex::new(master),
            streams: DashMap::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    // === Lifecycle ===

    /// Create an empty session under a fresh key.
    pub async fn create_session(&self, features: FeatureSet) -> Result<SessionKey> {
        let key = SessionKey::generate();
        let _guard = self.store.lock(&key).await;
        self.store.save(&key, Session::new(features)).await?;
        let stream = self.master.lock().await.fork();
        self.streams.insert(key.clone(), stream);
        tracing::debug!(session = %key, "session created");
        Ok(key)
    }

    /// Create a session with the configured default features.
    pub async fn create_default_session(&self) -> Result<SessionKey> {
        let features = self.config.default_feature_set()?;
        self.create_session(features).await
    }

    /// Drop a session and its RNG stream.
    pub async fn remove_session(&self, key: &SessionKey) -> Option<Session> {
        let _guard = self.store.lock(key).await;
        self.streams.remove(key);
        self.store.remove(key).await
    }

    // === Actions ===

    pub async fn join(&self, key: &SessionKey, identity: &str) -> Result<Outcome> {
        self.apply(key, identity, Action::Join).await
    }

    pub async fn roll(&self, key: &SessionKey, identity: &str) -> Result<Outcome> {
        self.apply(key, identity, Action::Roll).await
    }

    pub async fn lock_die(&self, key: &SessionKey, identity: &str, die: usize) -> Result<Outcome> {
        self.apply(key, identity, Action::Lock { die }).await
    }

    pub async fn score(
        &self,
        key: &SessionKey,
        identity: &str,
        category: Category,
    ) -> Result<Outcome> {
        self.apply(key, identity, Action::Score { category }).await
    }

    /// Run one action through the exclusive section for `key`.
    ///
    /// The event is published after the new session is saved and before
    /// the section is released.
    pub async fn apply(&self, key: &SessionKey, identity: &str, action: Action) -> Result<Outcome> {
        let _guard = self.store.lock(key).await;
        let session = self.store.load(key).await?;

        let mut rng = self.take_stream(key).await;
        let result = TurnController::new(&session, identity).apply(action, &mut rng);
        self.streams.insert(key.clone(), rng);

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::debug!(
                    session = %key,
                    player = identity,
                    action = %action.kind(),
                    %err,
                    "action rejected"
                );
                return Err(err);
            }
        };

        self.store.save(key, outcome.session.clone()).await?;
        let delivered = self.bus.publish(&Event::from_outcome(key.clone(), identity, &outcome));
        tracing::debug!(
            session = %key,
            player = identity,
            action = %action.kind(),
            delivered,
            "action applied"
        );
        Ok(outcome)
    }

    async fn take_stream(&self, key: &SessionKey) -> GameRng {
        match self.streams.remove(key) {
            Some((_, rng)) => rng,
            // Session saved by someone else; give it a stream now.
            None => self.master.lock().await.fork(),
        }
    }

    /// Capture the dice stream of a session, e.g. next to a stored snapshot.
    ///
    /// Runs inside the session's exclusive section so the state matches the
    /// last committed action.
    pub async fn rng_state(&self, key: &SessionKey) -> Option<GameRngState> {
        let _guard = self.store.lock(key).await;
        self.streams.get(key).map(|rng| rng.state())
    }

    /// Resume a session's dice stream from a captured state.
    pub async fn restore_rng(&self, key: &SessionKey, state: &GameRngState) {
        let _guard = self.store.lock(key).await;
        self.streams.insert(key.clone(), GameRng::from_state(state));
    }

    // === Queries ===

    /// Current state of a session.
    pub async fn snapshot(&self, key: &SessionKey) -> Result<Session> {
        self.store.load(key).await
    }

    /// Values of the current player's open categories for the current dice.
    pub async fn score_hints(&self, key: &SessionKey) -> Result<Vec<(Category, u32)>> {
        let session = self.store.load(key).await?;
        Ok(session.rules().hints_for(&session))
    }

    /// (identity, total) pairs for a session, best first.
    pub async fn standings(&self, key: &SessionKey) -> Result<Vec<(String, u32)>> {
        Ok(self.store.load(key).await?.standings())
    }

    /// Dry-run every playable category for literal dice under `features`.
    pub fn preview(features: &FeatureSet, dice: &[u8]) -> Result<Vec<(Category, u32)>> {
        RuleSet::new(features).hints(dice)
    }

    // === Subscriptions ===

    pub fn subscribe(&self, key: &SessionKey, subscriber: &str) -> mpsc::Receiver<Event> {
        self.bus.subscribe(key, subscriber)
    }

    pub fn unsubscribe(&self, key: &SessionKey, subscriber: &str) -> bool {
        self.bus.unsubscribe(key, subscriber)
    }
}
