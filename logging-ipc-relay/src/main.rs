// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Viam Logging IPC Module
//!
//! Hosts a single Logging IPC service: starts the loopback relay, keeps the
//! desktop helpers in sync and runs until interrupted.
//!
//! Environment:
//! - `LOGGING_IPC_ADDR`: relay bind address (default `127.0.0.1:17831`)
//! - `LOGGING_IPC_CONFIG`: JSON file with `shortcut_name`, `message`, `endpoint`

use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};

use logging_ipc_relay::{HostEnv, LoggingIpc, RelayConfig, TracingSink};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("logging_ipc=info".parse().unwrap())
                .add_directive("logging_ipc_relay=info".parse().unwrap()),
        )
        .init();

    // Load configuration
    let config = match RelayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid relay configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let service_config = match config.service_config() {
        Ok(service_config) => service_config,
        Err(e) => {
            error!("Invalid service configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        "Starting Viam Logging IPC v{}",
        env!("CARGO_PKG_VERSION")
    );
    info!("Relay: http://{}", config.address);
    info!("Helper endpoint: {}", service_config.endpoint());

    let sink = Arc::new(TracingSink::new("logging-ipc"));
    let env = HostEnv::system(sink).with_relay_addr(config.address);

    let service = match LoggingIpc::new("logging-ipc", service_config, env).await {
        Ok(service) => service,
        Err(e) => {
            error!("Failed to start service: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }

    info!("Shutting down");
    if let Err(e) = service.close().await {
        error!("Failed to close service: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
