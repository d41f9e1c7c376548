//! Decoded message payloads and the pluggable body decoder.
//!
//! The frame layer only knows codes and byte bodies. Turning a body into a
//! typed [`Message`] is the job of a [`PayloadDecoder`], chosen by the caller.
//! [`JsonDecoder`] is the default: one JSON object per body, camelCase field
//! names, absent numeric fields default to zero.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{MessageCode, WorldPhase};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WireVec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<WireVec3> for Vec3 {
    fn from(v: WireVec3) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

/// Orientation quaternion in (x, y, z, w) order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WireQuat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl From<WireQuat> for Quat {
    fn from(q: WireQuat) -> Self {
        Quat::from_xyzw(q.x, q.y, q.z, q.w)
    }
}

/// Opaque server state dump. The spectator only forwards it to listeners.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateSnapshot(pub serde_json::Value);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldStateMessage {
    pub world_state: WorldPhase,
}

/// Server reply to an earlier request, identified by `msg_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenericResponse {
    pub msg_id: u32,
    pub response: u32,
    pub error: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObjectSpawn {
    pub object_id: u32,
    pub object_type: u32,
    pub position: WireVec3,
    pub rotation: WireQuat,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObjectMove {
    pub object_id: u32,
    pub position: WireVec3,
    pub rotation: WireQuat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObjectDestroy {
    pub object_id: u32,
}

/// A decoded frame body.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    StateSnapshot(StateSnapshot),
    WorldState(WorldStateMessage),
    LoginResponse,
    GenericResponse(GenericResponse),
    Spawn(ObjectSpawn),
    Move(ObjectMove),
    Destroy(ObjectDestroy),
    Unknown,
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to decode {code} body: {source}")]
    Json {
        code: MessageCode,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to decode {code} body: {reason}")]
    Invalid { code: MessageCode, reason: String },
}

/// Turns a frame body into a [`Message`] for a given code.
///
/// Any `Fn(MessageCode, &[u8]) -> Result<Message, DecodeError>` works as a
/// decoder, so tests and alternative codecs can plug in a closure.
pub trait PayloadDecoder {
    fn decode(&self, code: MessageCode, body: &[u8]) -> Result<Message, DecodeError>;
}

impl<F> PayloadDecoder for F
where
    F: Fn(MessageCode, &[u8]) -> Result<Message, DecodeError>,
{
    fn decode(&self, code: MessageCode, body: &[u8]) -> Result<Message, DecodeError> {
        self(code, body)
    }
}

/// JSON body decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl JsonDecoder {
    fn parse<'a, T: Deserialize<'a>>(code: MessageCode, body: &'a [u8]) -> Result<T, DecodeError> {
        // An empty body carries only defaults.
        let body: &[u8] = if body.is_empty() { b"{}" } else { body };
        serde_json::from_slice(body).map_err(|source| DecodeError::Json { code, source })
    }
}

impl PayloadDecoder for JsonDecoder {
    fn decode(&self, code: MessageCode, body: &[u8]) -> Result<Message, DecodeError> {
        let message = match code {
            MessageCode::StateSnapshot => Message::StateSnapshot(Self::parse(code, body)?),
            MessageCode::WorldState => Message::WorldState(Self::parse(code, body)?),
            MessageCode::LoginResponse => Message::LoginResponse,
            MessageCode::GenericResponse => Message::GenericResponse(Self::parse(code, body)?),
            MessageCode::ObjectSpawn => Message::Spawn(Self::parse(code, body)?),
            MessageCode::ObjectMove => Message::Move(Self::parse(code, body)?),
            MessageCode::ObjectDestroy => Message::Destroy(Self::parse(code, body)?),
            MessageCode::Unknown(_) => Message::Unknown,
        };
        Ok(message)
    }
}
