//! Terminal presentation for the arena spectator.
//!
//! Rendering goes through a plain framebuffer rather than a widget toolkit:
//! [`ArenaView`] fills a [`FrameBuffer`] from a session snapshot, and
//! [`TerminalRenderer`] writes the cells that changed to the terminal.

pub mod arena_view;
pub mod fb;
pub mod renderer;

pub use mech_spectator_core as core;
pub use mech_spectator_types as types;

pub use arena_view::{ArenaView, LinkStatus};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
