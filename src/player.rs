//! Playback core: the controller that owns the active track, the key-burst
//! debouncer, the track sequencer, and the session that dispatches loop
//! events to them.
//!
//! Everything here runs on the UI thread, one event at a time, so none of
//! it needs locking.

mod controller;
mod debounce;
mod filter;
mod schedule;
mod sequencer;
mod session;

pub use controller::*;
pub use debounce::*;
pub use filter::*;
pub use schedule::*;
pub use sequencer::*;
pub use session::*;

#[cfg(test)]
mod fake;
