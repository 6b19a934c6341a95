//! Music library: scanning configured roots and reading track metadata.
//!
//! The resulting `Vec<Track>` is built once at startup and never reordered;
//! a track's position in it is its identity for the rest of the session.

mod display;
mod model;
mod scan;

pub use model::*;
pub use scan::scan;

#[cfg(test)]
mod tests;
