//! Terminal arena spectator (default binary).
//!
//! Connects to the arena server, tracks mechs and projectiles and draws them
//! with crossterm through the framebuffer renderer. `q` quits, `r` repaints.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use tracing::{error, info};

use mech_spectator::client::{ClientConfig, ClientEvent, Connection, Listener, Spectator};
use mech_spectator::core::{ArenaSnapshot, Session};
use mech_spectator::input::map_key;
use mech_spectator::logging::{init_tracing, Fallback};
use mech_spectator::term::{ArenaView, FrameBuffer, LinkStatus, TerminalRenderer};
use mech_spectator::types::{ViewerAction, DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};

const INPUT_POLL: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = ClientConfig::from_env();
    init_tracing(&config, Fallback::Discard)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        error!(error = %e, "viewer stopped");
    }
    result
}

fn run(term: &mut TerminalRenderer, config: ClientConfig) -> Result<()> {
    let (w, h) =
        crossterm::terminal::size().unwrap_or((DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT));
    let mut spectator = Spectator::with_json(w, h);
    let mut viewer = Viewer::new(term, w, h);
    let mut conn = Connection::start(config)?;

    let result = loop {
        while let Some(ev) = conn.try_recv() {
            spectator.handle_transport(ev, &mut viewer);
        }
        if let Some(e) = viewer.failure.take() {
            break Err(e);
        }
        if viewer.dirty {
            if let Err(e) = viewer.draw(spectator.session_mut()) {
                break Err(e);
            }
        }

        if !event::poll(INPUT_POLL)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => match map_key(key) {
                Some(ViewerAction::Quit) => break Ok(()),
                Some(ViewerAction::Redraw) => {
                    viewer.term.invalidate();
                    viewer.dirty = true;
                }
                None => {}
            },
            Event::Resize(w, h) => {
                info!(w, h, "terminal resized");
                spectator.session_mut().set_extent(w, h);
                viewer.fb.resize(w, h);
                viewer.term.invalidate();
                viewer.dirty = true;
            }
            _ => {}
        }
    };

    conn.shutdown();
    result
}

/// Draws the arena whenever the session reports a change.
struct Viewer<'a> {
    term: &'a mut TerminalRenderer,
    view: ArenaView,
    fb: FrameBuffer,
    snap: ArenaSnapshot,
    link: LinkStatus,
    /// Status line is stale; repaint on the next loop turn.
    dirty: bool,
    failure: Option<anyhow::Error>,
}

impl<'a> Viewer<'a> {
    fn new(term: &'a mut TerminalRenderer, w: u16, h: u16) -> Self {
        Self {
            term,
            view: ArenaView::new(),
            fb: FrameBuffer::new(w, h),
            snap: ArenaSnapshot::default(),
            link: LinkStatus::Connecting,
            dirty: true,
            failure: None,
        }
    }

    /// While the tracker is faulted the snapshot keeps the last good objects,
    /// so only the status line changes.
    fn draw(&mut self, session: &mut Session) -> Result<()> {
        self.dirty = false;
        session.snapshot_into(&mut self.snap);
        self.view.render_into(&self.snap, self.link, &mut self.fb);
        self.term.present(&mut self.fb)
    }
}

impl Listener for Viewer<'_> {
    fn on_event(&mut self, event: &ClientEvent) {
        let link = match event {
            ClientEvent::Connected(_) => LinkStatus::Connected,
            ClientEvent::ConnectionStart => LinkStatus::Live,
            ClientEvent::ConnectionEnd => LinkStatus::Ended,
            ClientEvent::ConnectionClosed if self.link != LinkStatus::Failed => LinkStatus::Closed,
            ClientEvent::ConnectionTimeout => LinkStatus::TimedOut,
            ClientEvent::ConnectionError(_) => LinkStatus::Failed,
            ClientEvent::Phase(_) | ClientEvent::TrackerFault(_) => {
                self.dirty = true;
                return;
            }
            _ => return,
        };
        if link != self.link {
            self.link = link;
            self.dirty = true;
        }
    }

    fn on_state_changed(&mut self, session: &mut Session) {
        if let Err(e) = self.draw(session) {
            self.failure.get_or_insert(e);
        }
    }
}
