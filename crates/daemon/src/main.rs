// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `corvidd`: the resident runtime core's process entry point.
//!
//! Wires the four core services (service manager, channel manager, command
//! scheduler, config discovery), boots them, spawns their long-lived
//! workers, and blocks until a shutdown signal arrives.

mod logging;
mod shutdown;
mod wiring;

#[tokio::main]
async fn main() {
    logging::init();

    if corvid_core::env::backend_service().is_empty() {
        // Missing BACKEND_SERVICE logs and disables the uplink without
        // aborting the host process.
        tracing::warn!("CORVID_BACKEND_SERVICE is unset; the uplink will stay disconnected");
    }

    let runtime = wiring::wire();

    if let Err(e) = runtime.manager.boot().await {
        tracing::error!(error = %e, "boot failed, exiting");
        std::process::exit(1);
    }

    if let Err(e) = corvid_channel::spawn_health_worker(runtime.channel_manager) {
        tracing::error!(error = %e, "failed to start channel health worker");
    }
    corvid_config::spawn_poll_worker(runtime.config_service);

    tracing::info!("resident runtime core booted");
    shutdown::wait().await;

    tracing::info!("shutdown signal received, tearing down");
    runtime.manager.shutdown().await;
}
