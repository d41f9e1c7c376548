//! Mech arena spectator client.
//!
//! Connects to an arena server over TCP, reassembles length-prefixed frames,
//! decodes their JSON bodies and keeps a [`core::Session`] in step with the
//! world. Applications observe progress through a [`Listener`].
//!
//! The transport runs on tokio; everything from framing onward is sync and
//! runs on whichever thread drains [`Connection`].

pub use mech_spectator_core as core;
pub use mech_spectator_types as types;

pub mod config;
pub mod dispatcher;
pub mod event;
pub mod frame;
pub mod message;
pub mod runtime;
pub mod spectator;
pub mod transport;

pub use config::{ClientConfig, LogFormat};
pub use dispatcher::{Dispatcher, FrameOutcome};
pub use event::{ClientEvent, Listener};
pub use frame::{encode_frame, BodyTooLarge, Frame, FrameDecoder, Frames};
pub use message::{
    DecodeError, GenericResponse, JsonDecoder, Message, ObjectDestroy, ObjectMove, ObjectSpawn,
    PayloadDecoder, StateSnapshot, WireQuat, WireVec3, WorldStateMessage,
};
pub use runtime::Connection;
pub use spectator::{FeedStats, Spectator};
pub use transport::{run_transport, TransportEvent};
