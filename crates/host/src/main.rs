// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tavern host daemon (tavernd)
//!
//! Restores registered modules, installs newly discovered ones, and holds
//! the state directory until signalled.
//!
//! Usage: `tavernd [CONFIG]` where CONFIG defaults to `./tavern.toml`.

use std::path::PathBuf;

use tavern_core::HandlerRegistry;
use tavern_host::{logging, version, Config, Host};
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = match std::env::args().nth(1) {
        Some(path) => PathBuf::from(path),
        None => std::env::current_dir()?.join(tavern_host::CONFIG_FILE),
    };

    let config = Config::load(&config_path)?;

    // Marker goes in before tracing so readers can find this attempt
    logging::write_startup_marker(&config)?;
    let log_guard = logging::init(&config)?;

    info!(version = version(), config = %config_path.display(), "starting tavernd");

    let host = match Host::startup(&config, HandlerRegistry::new()) {
        Ok(host) => host,
        Err(e) => {
            error!(error = %e, "failed to start host");
            drop(log_guard);
            return Err(e.into());
        }
    };

    match host.install_discovered() {
        Ok(installed) => info!(count = installed.len(), "discovered modules installed"),
        Err(e) => error!(error = %e, "installing discovered modules failed"),
    }

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    // Signal ready for a supervising process
    println!("READY");

    tokio::select! {
        _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
        _ = sigint.recv() => info!("received SIGINT, shutting down"),
    }

    host.shutdown();
    info!("tavernd stopped");
    Ok(())
}
