//! Decode/output adapter.
//!
//! The playback core only talks to the [`AudioBackend`] and [`Voice`] traits;
//! [`RodioBackend`] is the real implementation used by the binary.

mod backend;
mod sink;
mod types;

pub use backend::RodioBackend;
pub use types::*;

#[cfg(test)]
mod tests;
