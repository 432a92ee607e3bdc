use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::SessionStore;
use crate::core::{Session, SessionKey};
use crate::error::{Error, Result};

type LockMap = DashMap<SessionKey, Arc<Mutex<()>>>;

/// In-process store.
///
/// Sessions and per-key locks live in two `DashMap`s. A key's mutex is
/// created the first time it is locked and dropped again when its last
/// guard is released with nobody waiting; the map's shard lock is held only
/// while looking it up.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sessions: DashMap<SessionKey, Session>,
    locks: Arc<LockMap>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Number of keys with a live mutex (held or waited on).
    #[must_use]
    pub fn lock_count(&self) -> usize {
        self.locks.len()
    }

    fn key_lock(&self, key: &SessionKey) -> Arc<Mutex<()>> {
        Arc::clone(&self.locks.entry(key.clone()).or_default())
    }
}

/// Exclusive section for one key of a [`MemoryStore`].
///
/// Dropping the last guard of a key with no waiters removes the key's
/// mutex, so the lock map only holds keys that are in use.
#[derive(Debug)]
pub struct MemoryGuard {
    guard: Option<OwnedMutexGuard<()>>,
    key: SessionKey,
    locks: Arc<LockMap>,
}

impl Drop for MemoryGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        // Waiters and holders each own a clone; only the map's is left.
        self.locks
            .remove_if(&self.key, |_, lock| Arc::strong_count(lock) == 1);
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    type Guard = MemoryGuard;

    async fn save(&self, key: &SessionKey, session: Session) -> Result<()> {
        self.sessions.insert(key.clone(), session);
        Ok(())
    }

    async fn load(&self, key: &SessionKey) -> Result<Session> {
        self.sessions
            .get(key)
            .map(|session| session.clone())
            .ok_or_else(|| Error::NotFound(key.clone()))
    }

    async fn lock(&self, key: &SessionKey) -> Self::Guard {
        let guard = self.key_lock(key).lock_owned().await;
        MemoryGuard {
            guard: Some(guard),
            key: key.clone(),
            locks: Arc::clone(&self.locks),
        }
    }

    async fn remove(&self, key: &SessionKey) -> Option<Session> {
        self.sessions.remove(key).map(|(_, session)| session)
    }

    async fn contains(&self, key: &SessionKey) -> bool {
        self.sessions.contains_key(key)
    }
}
