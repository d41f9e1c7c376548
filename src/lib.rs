//! Mech arena spectator (workspace facade crate).
//!
//! Re-exports the member crates under `mech_spectator::{client,core,input,term,types}`
//! and holds the logging setup the binaries share.

pub use mech_spectator_client as client;
pub use mech_spectator_core as core;
pub use mech_spectator_input as input;
pub use mech_spectator_term as term;
pub use mech_spectator_types as types;

pub mod logging;
