//! TCP transport task.
//!
//! Reads the socket and forwards raw chunks and lifecycle notifications, in
//! order, to a single consumer. No decoding happens here, and no reconnect:
//! once the socket closes the task ends.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use bytes::{Bytes, BytesMut};
use tokio::io::AsyncReadExt;
use tokio::net::{lookup_host, TcpStream};
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Connected(SocketAddr),
    Data(Bytes),
    /// Peer finished sending.
    End,
    /// No data within the idle timeout. The socket stays open.
    Timeout,
    Error(String),
    /// Socket is gone; always the last event.
    Closed,
}

/// Connect and pump the socket until it closes or the receiver goes away.
///
/// Every failure, including name resolution, is reported as an event before
/// `Closed`, and also returned.
pub async fn run_transport(
    config: ClientConfig,
    tx: mpsc::UnboundedSender<TransportEvent>,
) -> Result<()> {
    let addr = match resolve(&config).await {
        Ok(addr) => addr,
        Err(e) => return fail(&tx, e),
    };
    info!(%addr, "connecting");

    let mut stream = match timeout(config.connect_timeout, TcpStream::connect(addr)).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) => {
            return fail(
                &tx,
                anyhow::Error::new(e).context(format!("failed to connect to {addr}")),
            );
        }
        Err(_) => {
            let _ = tx.send(TransportEvent::Timeout);
            let _ = tx.send(TransportEvent::Closed);
            anyhow::bail!("connect to {addr} timed out after {:?}", config.connect_timeout);
        }
    };
    if let Err(e) = stream.set_nodelay(true) {
        return fail(&tx, anyhow::Error::new(e).context("failed to set TCP_NODELAY"));
    }
    info!(%addr, "connected");
    if tx.send(TransportEvent::Connected(addr)).is_err() {
        return Ok(());
    }

    let mut buf = BytesMut::with_capacity(config.read_chunk);
    let result = loop {
        buf.reserve(config.read_chunk);
        let read = match config.idle_timeout {
            Some(idle) => match timeout(idle, stream.read_buf(&mut buf)).await {
                Ok(read) => read,
                Err(_) => {
                    debug!(?idle, "connection idle");
                    if tx.send(TransportEvent::Timeout).is_err() {
                        break Ok(());
                    }
                    continue;
                }
            },
            None => stream.read_buf(&mut buf).await,
        };

        match read {
            Ok(0) => {
                info!(%addr, "server ended the connection");
                let _ = tx.send(TransportEvent::End);
                break Ok(());
            }
            Ok(n) => {
                debug!(bytes = n, "read");
                if tx.send(TransportEvent::Data(buf.split().freeze())).is_err() {
                    break Ok(());
                }
            }
            Err(e) => {
                warn!(%addr, error = %e, "connection error");
                let _ = tx.send(TransportEvent::Error(e.to_string()));
                break Err(e).context("socket read failed");
            }
        }
    };

    let _ = tx.send(TransportEvent::Closed);
    info!(%addr, "connection closed");
    result
}

async fn resolve(config: &ClientConfig) -> Result<SocketAddr> {
    lookup_host((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("invalid server address {}:{}", config.host, config.port))?
        .next()
        .with_context(|| format!("{}:{} resolved to no addresses", config.host, config.port))
}

fn fail(tx: &mpsc::UnboundedSender<TransportEvent>, e: anyhow::Error) -> Result<()> {
    let detail = format!("{e:#}");
    warn!(error = %detail, "transport setup failed");
    let _ = tx.send(TransportEvent::Error(detail));
    let _ = tx.send(TransportEvent::Closed);
    Err(e)
}
