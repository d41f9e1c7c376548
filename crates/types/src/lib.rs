//! Shared protocol types and constants.
//!
//! This crate defines the vocabulary every other crate speaks: message codes,
//! world phases, object kinds, error codes, and the phase edges raised when the
//! server moves the world from one phase to the next. All types are plain data
//! with no I/O, usable from core logic, the network client, and the renderer.
//!
//! # Wire frame
//!
//! Every server message is a frame:
//!
//! | Offset | Size | Meaning |
//! |--------|------|---------|
//! | 0 | 1 | message code ([`MessageCode`]) |
//! | 1 | 2 | body length, big-endian `u16` |
//! | 3 | len | body |
//!
//! # Examples
//!
//! ```
//! use mech_spectator_types::{MessageCode, ObjectKind, WorldPhase};
//!
//! assert_eq!(MessageCode::from_u8(5), MessageCode::ObjectSpawn);
//! assert_eq!(MessageCode::from_u8(200), MessageCode::Unknown(200));
//! assert_eq!(ObjectKind::from_code(100), Some(ObjectKind::Projectile));
//! assert_eq!(WorldPhase::try_from(4u8), Ok(WorldPhase::Game));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Frame header size: one code byte plus a big-endian `u16` length.
pub const FRAME_HEADER_LEN: usize = 3;

/// Largest body a frame can declare.
pub const MAX_FRAME_BODY: usize = u16::MAX as usize;

/// Default server address.
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

/// Fallback viewport when the terminal size is unknown.
pub const DEFAULT_VIEWPORT_WIDTH: u16 = 80;
pub const DEFAULT_VIEWPORT_HEIGHT: u16 = 24;

/// Request id of the configure-mech request, echoed back in generic responses.
pub const REQUEST_CONFIGURE_MECH: u32 = 101;
/// Request id of the configure-done request, echoed back in generic responses.
pub const REQUEST_CONFIGURE_DONE: u32 = 102;

/// Server message codes.
///
/// The set is closed: anything the client does not understand lands in
/// [`MessageCode::Unknown`] instead of a default fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageCode {
    StateSnapshot,
    WorldState,
    GenericResponse,
    LoginResponse,
    ObjectSpawn,
    ObjectMove,
    ObjectDestroy,
    Unknown(u8),
}

impl MessageCode {
    pub const fn from_u8(code: u8) -> Self {
        match code {
            1 => Self::StateSnapshot,
            2 => Self::WorldState,
            3 => Self::GenericResponse,
            4 => Self::LoginResponse,
            5 => Self::ObjectSpawn,
            6 => Self::ObjectMove,
            7 => Self::ObjectDestroy,
            other => Self::Unknown(other),
        }
    }

    pub const fn as_u8(self) -> u8 {
        match self {
            Self::StateSnapshot => 1,
            Self::WorldState => 2,
            Self::GenericResponse => 3,
            Self::LoginResponse => 4,
            Self::ObjectSpawn => 5,
            Self::ObjectMove => 6,
            Self::ObjectDestroy => 7,
            Self::Unknown(code) => code,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::StateSnapshot => "ServerStateMessage",
            Self::WorldState => "ServerWorldStateMessage",
            Self::GenericResponse => "ServerSlugGenericResponse",
            Self::LoginResponse => "SlugActionLoginResponse",
            Self::ObjectSpawn => "ServerClientObjectSpawnMessage",
            Self::ObjectMove => "ServerClientObjectMoveMessage",
            Self::ObjectDestroy => "ServerClientObjectDestroyMessage",
            Self::Unknown(_) => "Unknown",
        }
    }
}

impl From<u8> for MessageCode {
    fn from(code: u8) -> Self {
        Self::from_u8(code)
    }
}

impl fmt::Display for MessageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.as_u8())
    }
}

/// Server-driven lifecycle stage of the current episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum WorldPhase {
    #[default]
    Initializing,
    Configuration,
    Startup,
    Game,
    GameOver,
}

impl WorldPhase {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Initializing => "INIT",
            Self::Configuration => "CONFIG",
            Self::Startup => "STARTUP",
            Self::Game => "GAME",
            Self::GameOver => "GAME OVER",
        }
    }
}

/// Rejected world-state code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidWorldPhase(pub u8);

impl fmt::Display for InvalidWorldPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid world state code {}", self.0)
    }
}

impl std::error::Error for InvalidWorldPhase {}

impl TryFrom<u8> for WorldPhase {
    type Error = InvalidWorldPhase;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Initializing),
            2 => Ok(Self::Configuration),
            3 => Ok(Self::Startup),
            4 => Ok(Self::Game),
            5 => Ok(Self::GameOver),
            other => Err(InvalidWorldPhase(other)),
        }
    }
}

impl From<WorldPhase> for u8 {
    fn from(phase: WorldPhase) -> Self {
        match phase {
            WorldPhase::Initializing => 1,
            WorldPhase::Configuration => 2,
            WorldPhase::Startup => 3,
            WorldPhase::Game => 4,
            WorldPhase::GameOver => 5,
        }
    }
}

/// Phase boundary crossed by a world-state update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseEdge {
    ConfigurationStart,
    ConfigurationEnd,
    StartupStart,
    StartupEnd,
    GameStart,
    GameEnd,
}

/// Category of a tracked object. Ids are only unique within one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectKind {
    Mech,
    Projectile,
}

impl ObjectKind {
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            2 => Some(Self::Mech),
            100 => Some(Self::Projectile),
            _ => None,
        }
    }

    pub const fn code(self) -> u32 {
        match self {
            Self::Mech => 2,
            Self::Projectile => 100,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mech => f.write_str("mech"),
            Self::Projectile => f.write_str("projectile"),
        }
    }
}

/// Error codes carried by generic responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    None,
    WrongState,
    ActuatorNotFound,
    AmmoNotFound,
    ArmNotFound,
    ArmNoIndex,
    ArmNotConfigured,
    ArmorNotFound,
    CapacitorNotFound,
    ChassisNotFound,
    ChassisNotConfigured,
    CockpitNotFound,
    CockpitNotConfigured,
    CommunicationNotFound,
    CommunicationsOverLimit,
    ComputerNotFound,
    ComputersOverLimit,
    CounterMeasureNotFound,
    CounterMeasureOverLimit,
    EngineNotFound,
    GyroNotFound,
    LegNotFound,
    LegNoIndex,
    LegNotConfigured,
    OverChassisMaxWeight,
    ProtocolMismatch,
    ReactorNotFound,
    SensorNotFound,
    SensorOverLimit,
    TorsoNotFound,
    TorsoNotConfigured,
    WeaponNotFound,
    WeaponOverLimit,
}

impl ErrorCode {
    pub const fn from_code(code: u32) -> Option<Self> {
        let e = match code {
            0 => Self::None,
            50 => Self::WrongState,
            100 => Self::ActuatorNotFound,
            101 => Self::AmmoNotFound,
            102 => Self::ArmNotFound,
            103 => Self::ArmNoIndex,
            104 => Self::ArmNotConfigured,
            105 => Self::ArmorNotFound,
            106 => Self::CapacitorNotFound,
            107 => Self::ChassisNotFound,
            108 => Self::ChassisNotConfigured,
            109 => Self::CockpitNotFound,
            110 => Self::CockpitNotConfigured,
            111 => Self::CommunicationNotFound,
            112 => Self::CommunicationsOverLimit,
            113 => Self::ComputerNotFound,
            114 => Self::ComputersOverLimit,
            115 => Self::CounterMeasureNotFound,
            116 => Self::CounterMeasureOverLimit,
            117 => Self::EngineNotFound,
            118 => Self::GyroNotFound,
            119 => Self::LegNotFound,
            120 => Self::LegNoIndex,
            121 => Self::LegNotConfigured,
            122 => Self::OverChassisMaxWeight,
            123 => Self::ProtocolMismatch,
            124 => Self::ReactorNotFound,
            125 => Self::SensorNotFound,
            126 => Self::SensorOverLimit,
            127 => Self::TorsoNotFound,
            128 => Self::TorsoNotConfigured,
            129 => Self::WeaponNotFound,
            130 => Self::WeaponOverLimit,
            _ => return None,
        };
        Some(e)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::WrongState => "WrongState",
            Self::ActuatorNotFound => "ActuatorNotFound",
            Self::AmmoNotFound => "AmmoNotFound",
            Self::ArmNotFound => "ArmNotFound",
            Self::ArmNoIndex => "ArmNoIndex",
            Self::ArmNotConfigured => "ArmNotConfigured",
            Self::ArmorNotFound => "ArmorNotFound",
            Self::CapacitorNotFound => "CapacitorNotFound",
            Self::ChassisNotFound => "ChassisNotFound",
            Self::ChassisNotConfigured => "ChassisNotConfigured",
            Self::CockpitNotFound => "CockpitNotFound",
            Self::CockpitNotConfigured => "CockpitNotConfigured",
            Self::CommunicationNotFound => "CommunicationNotFound",
            Self::CommunicationsOverLimit => "CommunicationsOverLimit",
            Self::ComputerNotFound => "ComputerNotFound",
            Self::ComputersOverLimit => "ComputersOverLimit",
            Self::CounterMeasureNotFound => "CounterMeasureNotFound",
            Self::CounterMeasureOverLimit => "CounterMeasureOverLimit",
            Self::EngineNotFound => "EngineNotFound",
            Self::GyroNotFound => "GyroNotFound",
            Self::LegNotFound => "LegNotFound",
            Self::LegNoIndex => "LegNoIndex",
            Self::LegNotConfigured => "LegNotConfigured",
            Self::OverChassisMaxWeight => "OverChassisMaxWeight",
            Self::ProtocolMismatch => "ProtocolMismatch",
            Self::ReactorNotFound => "ReactorNotFound",
            Self::SensorNotFound => "SensorNotFound",
            Self::SensorOverLimit => "SensorOverLimit",
            Self::TorsoNotFound => "TorsoNotFound",
            Self::TorsoNotConfigured => "TorsoNotConfigured",
            Self::WeaponNotFound => "WeaponNotFound",
            Self::WeaponOverLimit => "WeaponOverLimit",
        }
    }
}

/// Human-readable name for a raw error code, if it is one we know.
pub fn error_code_name(code: u32) -> Option<&'static str> {
    ErrorCode::from_code(code).map(ErrorCode::name)
}

/// Viewer-level actions produced by the key map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewerAction {
    Quit,
    Redraw,
}
