//! Core spectator logic - pure, deterministic, and testable
//!
//! This crate holds everything that has real invariants but no I/O:
//!
//! - [`tracker`]: the live Mech and Projectile sets, keyed by server id
//! - [`viewport`]: the auto-scaling world-to-viewport normalizer
//! - [`phase`]: the world-phase state machine and its edge table
//! - [`heading`]: orientation-to-glyph classification
//! - [`session`]: the per-connection context tying the above together
//!
//! Nothing here touches sockets or the terminal, so the whole episode
//! lifecycle can be driven from unit tests.
//!
//! # Example
//!
//! ```
//! use glam::{Quat, Vec3};
//! use mech_spectator_core::Session;
//! use mech_spectator_types::ObjectKind;
//!
//! let mut session = Session::new(80, 24);
//! session
//!     .tracker_mut()
//!     .spawn(ObjectKind::Mech, 1, Vec3::new(30.0, 0.0, 5.0), Quat::IDENTITY);
//!
//! let snap = session.snapshot();
//! assert_eq!(snap.scale, 1.0);
//! assert_eq!(snap.mechs[0].point.x, 70.0);
//! assert_eq!(snap.mechs[0].point.z, 17.0);
//! ```

pub mod heading;
pub mod phase;
pub mod session;
pub mod tracker;
pub mod viewport;

pub use mech_spectator_types as types;

pub use heading::{Heading, PROJECTILE_GLYPH};
pub use phase::{phase_edges, PhaseEdges, PhaseMachine};
pub use session::{ArenaSnapshot, PlacedObject, Session};
pub use tracker::{ObjectTracker, TrackedObject, TrackerError, TrackerOp};
pub use viewport::{ViewPoint, ViewportNormalizer};
