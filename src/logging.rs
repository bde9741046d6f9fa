//! Diagnostics for the `suggest` binary.
//!
//! The terminal is in raw mode on the alternate screen while the widget runs,
//! so log lines never go to stdout or stderr. They are appended to a log file
//! when one is given and discarded otherwise. `RUST_LOG` overrides the
//! default filter.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

pub const DEFAULT_FILTER: &str = "warn";

/// Installs the global subscriber. Fails if one is already installed.
pub fn init(log_file: Option<&Path>, verbose: bool) -> io::Result<()> {
    let writer = match log_file {
        Some(path) => BoxMakeWriter::new(Mutex::new(open_log(path)?)),
        None => BoxMakeWriter::new(io::sink),
    };
    let fallback = if verbose { "debug" } else { DEFAULT_FILTER };

    tracing::subscriber::set_global_default(subscriber(env_filter(fallback), writer))
        .map_err(io::Error::other)
}

pub fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

pub fn subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer)
        .finish()
}

fn open_log(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
