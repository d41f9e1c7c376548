//! Frame dispatch: decode, drive the phase machine, apply tracker updates.

use tracing::{debug, error, info, warn};

use crate::core::Session;
use crate::event::{ClientEvent, Listener};
use crate::frame::Frame;
use crate::message::{DecodeError, GenericResponse, Message, PayloadDecoder};
use crate::types::{
    error_code_name, ObjectKind, PhaseEdge, WorldPhase, REQUEST_CONFIGURE_DONE,
    REQUEST_CONFIGURE_MECH,
};

/// Whether a frame changed what the renderer would draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    StateChanged,
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct Dispatcher<D> {
    decoder: D,
}

impl<D: PayloadDecoder> Dispatcher<D> {
    pub fn new(decoder: D) -> Self {
        Self { decoder }
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    /// Handle one frame against `session`.
    ///
    /// A decode failure leaves `session` untouched. Tracker faults are not
    /// errors here: they are reported through `listener` and the frame counts
    /// as handled.
    pub fn on_frame(
        &mut self,
        frame: &Frame,
        session: &mut Session,
        listener: &mut dyn Listener,
    ) -> Result<FrameOutcome, DecodeError> {
        let code = frame.message_code();
        let message = self.decoder.decode(code, &frame.body)?;
        debug!(%code, len = frame.body.len(), "frame");

        let outcome = match &message {
            Message::StateSnapshot(_) => FrameOutcome::Unchanged,
            Message::WorldState(ws) => {
                let prev = session.phase();
                let edges = session.advance_phase(ws.world_state);
                if prev != ws.world_state {
                    info!(from = ?prev, to = ?ws.world_state, "world phase");
                }
                for edge in &edges {
                    listener.on_event(&ClientEvent::Phase(*edge));
                }
                let reset = edges
                    .iter()
                    .any(|e| matches!(e, PhaseEdge::GameStart | PhaseEdge::GameEnd));
                if reset {
                    FrameOutcome::StateChanged
                } else {
                    FrameOutcome::Unchanged
                }
            }
            Message::LoginResponse => {
                info!("login acknowledged");
                listener.on_event(&ClientEvent::ConnectionStart);
                FrameOutcome::Unchanged
            }
            Message::GenericResponse(resp) => {
                on_response(resp, session.phase(), listener);
                FrameOutcome::Unchanged
            }
            Message::Spawn(spawn) => match ObjectKind::from_code(spawn.object_type) {
                Some(kind) => {
                    session.tracker_mut().spawn(
                        kind,
                        spawn.object_id,
                        spawn.position.into(),
                        spawn.rotation.into(),
                    );
                    FrameOutcome::StateChanged
                }
                None => {
                    warn!(
                        id = spawn.object_id,
                        object_type = spawn.object_type,
                        "spawn of untracked object type"
                    );
                    FrameOutcome::Unchanged
                }
            },
            Message::Move(mv) => {
                let moved = session.tracker_mut().move_object(
                    mv.object_id,
                    mv.position.into(),
                    mv.rotation.into(),
                );
                match moved {
                    Ok(_) => FrameOutcome::StateChanged,
                    Err(e) => {
                        error!(error = %e, "tracker fault");
                        listener.on_event(&ClientEvent::TrackerFault(e));
                        FrameOutcome::Unchanged
                    }
                }
            }
            Message::Destroy(d) => match session.tracker_mut().destroy(d.object_id) {
                Ok(_) => FrameOutcome::StateChanged,
                Err(e) => {
                    error!(error = %e, "tracker fault");
                    listener.on_event(&ClientEvent::TrackerFault(e));
                    FrameOutcome::Unchanged
                }
            },
            Message::Unknown => {
                warn!(code = frame.code, "unrecognized message");
                listener.on_event(&ClientEvent::UnknownMessage { code: frame.code });
                FrameOutcome::Unchanged
            }
        };

        listener.on_event(&ClientEvent::MessageReceived { code, message });
        Ok(outcome)
    }
}

/// Interpret a generic response according to the current phase.
///
/// The configuration branch and the out-of-configuration branch are
/// independent: an error during configuration is only reported through the
/// commit event, never also as a warning.
fn on_response(resp: &GenericResponse, phase: WorldPhase, listener: &mut dyn Listener) {
    let description = error_code_name(resp.error);
    match phase {
        WorldPhase::Configuration => match resp.msg_id {
            REQUEST_CONFIGURE_DONE => info!("configuration done acknowledged"),
            REQUEST_CONFIGURE_MECH => {
                listener.on_event(&ClientEvent::ConfigurationCommitFinished {
                    response: resp.response,
                    error: resp.error,
                    description,
                });
            }
            other => debug!(msg_id = other, "response ignored during configuration"),
        },
        _ if resp.error != 0 => {
            warn!(
                msg_id = resp.msg_id,
                error = resp.error,
                name = description.unwrap_or("unknown"),
                "request failed"
            );
            listener.on_event(&ClientEvent::ResponseWarning {
                msg_id: resp.msg_id,
                error: resp.error,
                description,
            });
        }
        _ => {}
    }
}

impl<D: PayloadDecoder + Default> Default for Dispatcher<D> {
    fn default() -> Self {
        Self::new(D::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::encode_frame;
    use crate::message::JsonDecoder;
    use crate::types::MessageCode;
    use bytes::Bytes;

    #[derive(Default)]
    struct Recorder(Vec<ClientEvent>);

    impl Listener for Recorder {
        fn on_event(&mut self, event: &ClientEvent) {
            self.0.push(event.clone());
        }
    }

    fn frame(code: u8, body: &str) -> Frame {
        let raw = encode_frame(code, body.as_bytes()).unwrap();
        Frame {
            code,
            body: Bytes::copy_from_slice(&raw[3..]),
        }
    }

    fn world(phase: u8) -> Frame {
        frame(2, &format!(r#"{{"worldState":{phase}}}"#))
    }

    #[test]
    fn world_state_fires_edges_then_message() {
        let mut d = Dispatcher::new(JsonDecoder);
        let mut s = Session::new(80, 24);
        let mut rec = Recorder::default();

        d.on_frame(&world(2), &mut s, &mut rec).unwrap();
        assert_eq!(rec.0[0], ClientEvent::Phase(PhaseEdge::ConfigurationStart));
        assert!(matches!(
            rec.0[1],
            ClientEvent::MessageReceived {
                code: MessageCode::WorldState,
                ..
            }
        ));
        assert_eq!(s.phase(), WorldPhase::Configuration);
    }

    #[test]
    fn commit_response_only_during_configuration() {
        let mut d = Dispatcher::new(JsonDecoder);
        let mut s = Session::new(80, 24);
        let mut rec = Recorder::default();
        let resp = frame(3, r#"{"msgId":101,"response":1,"error":122}"#);

        d.on_frame(&world(2), &mut s, &mut ()).unwrap();
        d.on_frame(&resp, &mut s, &mut rec).unwrap();
        assert_eq!(
            rec.0[0],
            ClientEvent::ConfigurationCommitFinished {
                response: 1,
                error: 122,
                description: Some("OverChassisMaxWeight"),
            }
        );
        assert!(!rec
            .0
            .iter()
            .any(|e| matches!(e, ClientEvent::ResponseWarning { .. })));

        rec.0.clear();
        d.on_frame(&world(3), &mut s, &mut ()).unwrap();
        d.on_frame(&resp, &mut s, &mut rec).unwrap();
        assert_eq!(
            rec.0[0],
            ClientEvent::ResponseWarning {
                msg_id: 101,
                error: 122,
                description: Some("OverChassisMaxWeight"),
            }
        );
    }

    #[test]
    fn successful_response_outside_configuration_is_quiet() {
        let mut d = Dispatcher::new(JsonDecoder);
        let mut s = Session::new(80, 24);
        let mut rec = Recorder::default();
        d.on_frame(&frame(3, r#"{"msgId":7,"error":0}"#), &mut s, &mut rec)
            .unwrap();
        assert_eq!(rec.0.len(), 1);
        assert!(matches!(rec.0[0], ClientEvent::MessageReceived { .. }));
    }

    #[test]
    fn unknown_code_is_reported_not_fatal() {
        let mut d = Dispatcher::new(JsonDecoder);
        let mut s = Session::new(80, 24);
        let mut rec = Recorder::default();
        let out = d.on_frame(&frame(99, "whatever"), &mut s, &mut rec).unwrap();
        assert_eq!(out, FrameOutcome::Unchanged);
        assert_eq!(rec.0[0], ClientEvent::UnknownMessage { code: 99 });
        assert_eq!(
            rec.0[1],
            ClientEvent::MessageReceived {
                code: MessageCode::Unknown(99),
                message: Message::Unknown,
            }
        );
    }

    #[test]
    fn decode_error_leaves_session_untouched() {
        let mut d = Dispatcher::new(JsonDecoder);
        let mut s = Session::new(80, 24);
        let mut rec = Recorder::default();
        assert!(d.on_frame(&frame(2, "{broken"), &mut s, &mut rec).is_err());
        assert!(rec.0.is_empty());
        assert_eq!(s.phase(), WorldPhase::Initializing);
    }

    #[test]
    fn spawn_of_unknown_type_is_ignored() {
        let mut d = Dispatcher::new(JsonDecoder);
        let mut s = Session::new(80, 24);
        let out = d
            .on_frame(&frame(5, r#"{"objectId":1,"objectType":7}"#), &mut s, &mut ())
            .unwrap();
        assert_eq!(out, FrameOutcome::Unchanged);
        assert!(s.tracker().is_empty());
    }
}
