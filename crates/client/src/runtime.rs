//! Runtime integration.
//!
//! Bridges a sync render loop with the async transport task.

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::config::ClientConfig;
use crate::transport::{run_transport, TransportEvent};

/// Running connection: owns the runtime that drives the transport.
pub struct Connection {
    rt: Runtime,
    rx: mpsc::UnboundedReceiver<TransportEvent>,
    task: JoinHandle<()>,
}

impl Connection {
    pub fn start(config: ClientConfig) -> Result<Self> {
        let rt = Runtime::new().context("failed to create tokio runtime")?;
        let (tx, rx) = mpsc::unbounded_channel();

        let task = rt.spawn(async move {
            if let Err(e) = run_transport(config, tx).await {
                warn!(error = %e, "transport stopped");
            }
        });

        Ok(Self { rt, rx, task })
    }

    /// Next queued event, without blocking.
    pub fn try_recv(&mut self) -> Option<TransportEvent> {
        self.rx.try_recv().ok()
    }

    /// Wait for the next event. `None` once the transport is gone and drained.
    pub fn blocking_recv(&mut self) -> Option<TransportEvent> {
        self.rx.blocking_recv()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Close the socket and stop the runtime without waiting on it.
    pub fn shutdown(self) {
        self.task.abort();
        self.rt.shutdown_background();
    }
}
