//! Session storage with per-key exclusive sections.
//!
//! A read-modify-write of one session runs as
//! `lock → load → controller → save → publish`, holding the guard from
//! [`SessionStore::lock`] the whole time. Different keys never wait on
//! each other.

mod memory;

pub use memory::{MemoryGuard, MemoryStore};

use async_trait::async_trait;

use crate::core::{Session, SessionKey};
use crate::error::Result;

/// Storage backend for sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Held for the duration of an exclusive section; dropping it releases
    /// the key.
    type Guard: Send;

    /// Store `session` under `key`, replacing any previous value.
    async fn save(&self, key: &SessionKey, session: Session) -> Result<()>;

    /// Fetch the session under `key`. Fails with `NotFound` when absent.
    async fn load(&self, key: &SessionKey) -> Result<Session>;

    /// Enter the exclusive section for `key`, waiting for any holder.
    ///
    /// The key does not need to exist yet.
    async fn lock(&self, key: &SessionKey) -> Self::Guard;

    /// Delete the session under `key`, returning it if it existed.
    async fn remove(&self, key: &SessionKey) -> Option<Session>;

    /// Whether a session is stored under `key`.
    async fn contains(&self, key: &SessionKey) -> bool;
}
