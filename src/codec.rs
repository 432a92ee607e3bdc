//! Compact binary snapshots of sessions.
//!
//! Stores that keep sessions outside the process can use these to persist
//! a [`Session`] and restore it exactly.

use crate::core::Session;
use crate::error::Result;

/// Encode a session with bincode.
pub fn encode_session(session: &Session) -> Result<Vec<u8>> {
    Ok(bincode::serialize(session)?)
}

/// Decode a session written by [`encode_session`].
///
/// Well-formed bytes that describe an impossible session (wrong dice count,
/// faces outside 1..=6, counters out of range) are rejected with
/// [`Error::CorruptSession`](crate::error::Error::CorruptSession).
pub fn decode_session(bytes: &[u8]) -> Result<Session> {
    let session: Session = bincode::deserialize(bytes)?;
    session.validate()?;
    Ok(session)
}
