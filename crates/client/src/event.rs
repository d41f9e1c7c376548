//! Events raised to the embedding application.

use std::net::SocketAddr;

use crate::core::{Session, TrackerError};
use crate::message::Message;
use crate::types::{MessageCode, PhaseEdge};

#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// TCP connection established (not yet authenticated).
    Connected(SocketAddr),
    /// Server acknowledged the login: the session is live.
    ConnectionStart,
    ConnectionEnd,
    ConnectionClosed,
    ConnectionTimeout,
    ConnectionError(String),
    Phase(PhaseEdge),
    /// Raised for every decoded frame, recognized or not.
    MessageReceived {
        code: MessageCode,
        message: Message,
    },
    UnknownMessage {
        code: u8,
    },
    ConfigurationCommitFinished {
        response: u32,
        error: u32,
        description: Option<&'static str>,
    },
    /// Non-zero error code in a response outside the configuration phase.
    ResponseWarning {
        msg_id: u32,
        error: u32,
        description: Option<&'static str>,
    },
    /// A frame was dropped because its body could not be handled.
    FrameError {
        code: MessageCode,
        error: String,
    },
    /// Move or destroy for an object that was never spawned. Rendering stays
    /// suppressed until the episode ends.
    TrackerFault(TrackerError),
}

/// Observer for spectator activity.
///
/// Both methods default to doing nothing, so implementors only override what
/// they care about.
pub trait Listener {
    fn on_event(&mut self, event: &ClientEvent) {
        let _ = event;
    }

    /// Called after every frame that changed tracked state, unless the tracker
    /// is faulted. Renderers draw from here.
    ///
    /// The scale only grows when a snapshot is taken, so an implementation
    /// that never snapshots sees [`Session::scale`] stay where it was.
    fn on_state_changed(&mut self, session: &mut Session) {
        let _ = session;
    }
}

impl Listener for () {}
