//! Events published after accepted actions.

use serde::{Deserialize, Serialize};

use crate::core::SessionKey;
use crate::rules::{ActionKind, Outcome, Payload};

/// One accepted action, as seen by subscribers of its session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub session: SessionKey,
    /// Identity that performed the action.
    pub actor: String,
    pub kind: ActionKind,
    pub payload: Payload,
}

impl Event {
    #[must_use]
    pub fn new(session: SessionKey, actor: impl Into<String>, payload: Payload) -> Self {
        Self {
            session,
            actor: actor.into(),
            kind: payload.kind(),
            payload,
        }
    }

    /// Build the event for a controller outcome.
    #[must_use]
    pub fn from_outcome(session: SessionKey, actor: impl Into<String>, outcome: &Outcome) -> Self {
        Self::new(session, actor, outcome.payload.clone())
    }
}
