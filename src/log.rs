// src/log.rs
//
// Tracing setup: one file sink under the store dir, one human sink on stderr.
// Timestamps are time since start, like `[00:00:01.234]`.
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::consts::LOG_FILE;
use crate::error::{Error, Result};

fn default_directive(verbose: bool) -> &'static str {
    if verbose { "lands_scrape=debug,info" } else { "info" }
}

/// Install the global subscriber. `RUST_LOG` wins over `verbose`.
/// Fails if a subscriber is already installed.
pub fn init(store_dir: &Path, verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    fs::create_dir_all(store_dir).map_err(|e| Error::io(store_dir, e))?;
    let path = store_dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| Error::io(&path, e))?;

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_timer(fmt::time::uptime());

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_timer(fmt::time::uptime());

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| Error::Log(e.to_string()))
}
