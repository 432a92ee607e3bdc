//! Event bus: fan-out of accepted actions to per-session subscribers.

pub mod bus;
pub mod event;

pub use bus::{EventBus, DEFAULT_BUFFER};
pub use event::Event;
