// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Relay Lifecycle
//!
//! The relay is bound at most once per [`RelayState`]. The process-wide
//! instance returned by [`RelayState::global`] is what services use; the
//! first start attempt wins, and later attempts (with any address) reuse its
//! outcome, including a failed bind.
//!
//! The relay is never stopped. It serves until the process exits.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};

use tokio::net::TcpListener;
use tokio::sync::OnceCell;
use tokio::task::JoinHandle;

use crate::config::RelayAddress;
use crate::http::{create_router, HttpState};
use crate::sink::NotificationSink;

static GLOBAL_RELAY: OnceLock<Arc<RelayState>> = OnceLock::new();

/// A bound, serving relay.
#[derive(Debug)]
struct RelayHandle {
    local_addr: SocketAddr,
    _server: JoinHandle<()>,
}

/// Tracks whether the relay has been started.
#[derive(Debug, Default)]
pub struct RelayState {
    relay: OnceCell<Option<RelayHandle>>,
}

impl RelayState {
    /// Creates a state whose relay has not been started.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide relay state.
    pub fn global() -> Arc<RelayState> {
        GLOBAL_RELAY
            .get_or_init(|| Arc::new(RelayState::new()))
            .clone()
    }

    /// Binds and serves the relay on the first call; later calls are no-ops.
    ///
    /// Concurrent callers wait for the first attempt to finish. A bind failure
    /// is reported to `sink` and leaves the relay down for good. Returns the
    /// bound address, or `None` if the relay is not running.
    pub async fn ensure_started(
        &self,
        address: &RelayAddress,
        sink: Arc<dyn NotificationSink>,
    ) -> Option<SocketAddr> {
        let relay = self
            .relay
            .get_or_init(|| async {
                match bind(address, sink.clone()).await {
                    Ok(handle) => Some(handle),
                    Err(e) => {
                        sink.error(&format!(
                            "IPC server failed to listen on {}: {}",
                            address, e
                        ));
                        None
                    }
                }
            })
            .await;

        relay.as_ref().map(|handle| handle.local_addr)
    }

    /// Whether a start attempt has completed.
    pub fn is_initialized(&self) -> bool {
        self.relay.initialized()
    }

    /// Address the relay is serving on, if it is running.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.relay
            .get()
            .and_then(|relay| relay.as_ref())
            .map(|handle| handle.local_addr)
    }
}

async fn bind(
    address: &RelayAddress,
    sink: Arc<dyn NotificationSink>,
) -> std::io::Result<RelayHandle> {
    let listener = TcpListener::bind(address.socket_addr()).await?;
    let local_addr = listener.local_addr()?;
    sink.info(&format!("IPC server listening on http://{}", local_addr));

    let router = create_router(HttpState { sink: sink.clone() });
    let server = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            sink.error(&format!("IPC server error: {}", e));
        }
    });

    Ok(RelayHandle {
        local_addr,
        _server: server,
    })
}
