//! Per-session event fan-out.
//!
//! Every subscriber owns a bounded channel. Publishing is non-blocking:
//! a subscriber whose buffer is full misses the event, and a subscriber
//! whose receiver was dropped is removed. Neither case fails the publish.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use rustc_hash::FxHashMap;
use tokio::sync::mpsc::{self, error::TrySendError};

use super::event::Event;
use crate::core::SessionKey;

/// Default per-subscriber buffer.
pub const DEFAULT_BUFFER: usize = 64;

/// Fan-out of [`Event`]s to subscribers keyed by session.
#[derive(Debug)]
pub struct EventBus {
    sessions: DashMap<SessionKey, FxHashMap<String, mpsc::Sender<Event>>>,
    buffer: usize,
    dropped: AtomicU64,
}

impl EventBus {
    /// Create a bus whose subscribers buffer up to `buffer` events each.
    #[must_use]
    pub fn new(buffer: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            buffer: buffer.max(1),
            dropped: AtomicU64::new(0),
        }
    }

    /// Register `subscriber` for events of `key`.
    ///
    /// Subscribing again under the same id replaces the earlier channel;
    /// its receiver sees the stream end.
    pub fn subscribe(&self, key: &SessionKey, subscriber: impl Into<String>) -> mpsc::Receiver<Event> {
        let subscriber = subscriber.into();
        let (tx, rx) = mpsc::channel(self.buffer);
        tracing::debug!(session = %key, %subscriber, "subscribed");
        self.sessions
            .entry(key.clone())
            .or_default()
            .insert(subscriber, tx);
        rx
    }

    /// Remove a subscriber. Returns whether it was registered.
    pub fn unsubscribe(&self, key: &SessionKey, subscriber: &str) -> bool {
        let removed = self
            .sessions
            .get_mut(key)
            .map(|mut subs| subs.remove(subscriber).is_some())
            .unwrap_or(false);
        self.sessions.remove_if(key, |_, subs| subs.is_empty());
        if removed {
            tracing::debug!(session = %key, %subscriber, "unsubscribed");
        }
        removed
    }

    /// Deliver `event` to every subscriber of its session.
    ///
    /// Returns how many subscribers received it. With no subscribers this
    /// is a no-op.
    pub fn publish(&self, event: &Event) -> usize {
        let key = &event.session;
        let Some(mut subs) = self.sessions.get_mut(key) else {
            return 0;
        };

        let mut delivered = 0;
        subs.retain(|subscriber, tx| match tx.try_send(event.clone()) {
            Ok(()) => {
                delivered += 1;
                true
            }
            Err(TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    session = %key,
                    %subscriber,
                    kind = %event.kind,
                    "subscriber buffer full, event dropped"
                );
                true
            }
            Err(TrySendError::Closed(_)) => {
                tracing::debug!(session = %key, %subscriber, "subscriber gone");
                false
            }
        });
        drop(subs);

        self.sessions.remove_if(key, |_, subs| subs.is_empty());
        delivered
    }

    /// Subscribers currently registered for `key`.
    #[must_use]
    pub fn subscriber_count(&self, key: &SessionKey) -> usize {
        self.sessions.get(key).map_or(0, |subs| subs.len())
    }

    /// Events dropped because a subscriber's buffer was full.
    #[must_use]
    pub fn dropped_events(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER)
    }
}
