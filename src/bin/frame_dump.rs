//! Headless spectator: connects, decodes and logs every event.
//!
//! Useful for watching a server without a terminal UI, or for capturing a
//! session with `SPECTATOR_LOG_PATH` and `SPECTATOR_LOG_FORMAT=json`.

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use mech_spectator::client::{
    run_transport, ClientConfig, ClientEvent, Listener, Spectator, TransportEvent,
};
use mech_spectator::core::Session;
use mech_spectator::logging::{init_tracing, Fallback};
use mech_spectator::types::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};

struct LogListener;

impl Listener for LogListener {
    fn on_event(&mut self, event: &ClientEvent) {
        match event {
            ClientEvent::MessageReceived { code, .. } => trace!(%code, "message"),
            ClientEvent::Phase(edge) => info!(?edge, "phase edge"),
            ClientEvent::ConfigurationCommitFinished {
                response,
                error,
                description,
            } => info!(response, error, ?description, "configuration committed"),
            ClientEvent::TrackerFault(e) => warn!(error = %e, "tracker fault"),
            other => info!(event = ?other, "event"),
        }
    }

    fn on_state_changed(&mut self, session: &mut Session) {
        let snap = session.snapshot();
        debug!(
            scale = snap.scale,
            mechs = snap.mechs.len(),
            projectiles = snap.projectiles.len(),
            skipped = snap.skipped,
            "arena"
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = ClientConfig::from_env();
    init_tracing(&config, Fallback::Stderr)?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let transport = tokio::spawn(run_transport(config, tx));

    let mut spectator = Spectator::with_json(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT);
    let mut listener = LogListener;
    while let Some(ev) = rx.recv().await {
        let closed = ev == TransportEvent::Closed;
        spectator.handle_transport(ev, &mut listener);
        if closed {
            break;
        }
    }

    transport.await?
}
