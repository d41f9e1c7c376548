//! Tracing setup shared by the binaries.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use crate::client::{ClientConfig, LogFormat};

/// Where log lines go when no log file is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    Stderr,
    /// Drop logs. The terminal viewer owns the screen, so stderr is unusable.
    Discard,
}

/// Install the global subscriber. `RUST_LOG` overrides the default `info`
/// filter; `SPECTATOR_LOG_PATH` sends output to a file (appended).
pub fn init_tracing(config: &ClientConfig, fallback: Fallback) -> Result<()> {
    let (writer, ansi) = match (&config.log_path, fallback) {
        (Some(path), _) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {path}"))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        (None, Fallback::Stderr) => (BoxMakeWriter::new(std::io::stderr), true),
        (None, Fallback::Discard) => return Ok(()),
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi);

    match config.log_format {
        LogFormat::Json => builder.json().with_current_span(true).try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    }
    .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
    Ok(())
}
