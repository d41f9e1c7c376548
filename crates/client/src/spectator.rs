//! Spectator: frame reassembly, dispatch and render triggering in one place.

use tracing::{error, info, warn};

use crate::core::Session;
use crate::dispatcher::{Dispatcher, FrameOutcome};
use crate::event::{ClientEvent, Listener};
use crate::frame::FrameDecoder;
use crate::message::{JsonDecoder, PayloadDecoder};
use crate::transport::TransportEvent;

/// Counters for one [`Spectator::feed`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedStats {
    pub frames: usize,
    pub errors: usize,
    pub renders: usize,
}

pub struct Spectator<D = JsonDecoder> {
    frames: FrameDecoder,
    dispatcher: Dispatcher<D>,
    session: Session,
}

impl Spectator<JsonDecoder> {
    pub fn with_json(width: u16, height: u16) -> Self {
        Self::new(JsonDecoder, width, height)
    }
}

impl<D: PayloadDecoder> Spectator<D> {
    pub fn new(decoder: D, width: u16, height: u16) -> Self {
        Self {
            frames: FrameDecoder::new(),
            dispatcher: Dispatcher::new(decoder),
            session: Session::new(width, height),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Bytes waiting for the rest of their frame.
    pub fn buffered(&self) -> usize {
        self.frames.buffered()
    }

    /// Feed a chunk of stream bytes and handle every complete frame in it.
    ///
    /// A frame that fails to decode is reported and skipped; the frames after
    /// it are still handled.
    pub fn feed(&mut self, bytes: &[u8], listener: &mut dyn Listener) -> FeedStats {
        let mut stats = FeedStats::default();
        let Self {
            frames,
            dispatcher,
            session,
        } = self;

        for frame in frames.feed(bytes) {
            stats.frames += 1;
            match dispatcher.on_frame(&frame, session, listener) {
                Ok(FrameOutcome::StateChanged) => {
                    if !session.is_faulted() {
                        listener.on_state_changed(session);
                        stats.renders += 1;
                    }
                }
                Ok(FrameOutcome::Unchanged) => {}
                Err(e) => {
                    stats.errors += 1;
                    error!(code = %frame.message_code(), error = %e, "dropping frame");
                    listener.on_event(&ClientEvent::FrameError {
                        code: frame.message_code(),
                        error: e.to_string(),
                    });
                }
            }
        }
        stats
    }

    /// Route one transport notification.
    pub fn handle_transport(&mut self, event: TransportEvent, listener: &mut dyn Listener) {
        match event {
            TransportEvent::Connected(addr) => {
                info!(%addr, "spectating");
                listener.on_event(&ClientEvent::Connected(addr));
            }
            TransportEvent::Data(bytes) => {
                self.feed(&bytes, listener);
            }
            TransportEvent::End => listener.on_event(&ClientEvent::ConnectionEnd),
            TransportEvent::Timeout => listener.on_event(&ClientEvent::ConnectionTimeout),
            TransportEvent::Error(e) => {
                warn!(error = %e, "transport error");
                listener.on_event(&ClientEvent::ConnectionError(e));
            }
            TransportEvent::Closed => {
                if self.frames.buffered() > 0 {
                    warn!(bytes = self.frames.buffered(), "discarding partial frame");
                    self.frames.clear();
                }
                listener.on_event(&ClientEvent::ConnectionClosed);
            }
        }
    }
}
