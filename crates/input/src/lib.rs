//! Viewer input.
//!
//! Maps `crossterm` key events into [`crate::types::ViewerAction`]. The
//! spectator never sends anything to the server, so the only actions are
//! local to the viewer.

pub mod map;

pub use mech_spectator_types as types;

pub use map::map_key;
