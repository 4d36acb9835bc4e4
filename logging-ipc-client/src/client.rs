// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Notification Client

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Serialize;
use tracing::debug;

use crate::error::ClientError;

/// Relay endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:17831/log";

/// Upper bound for one send, connect included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// JSON body posted to the relay.
#[derive(Debug, Clone, Serialize)]
pub struct NotifyPayload<'a> {
    pub msg: &'a str,
}

/// Blocking relay client.
///
/// Must not be used from inside an async runtime; helpers call it from their
/// main thread.
#[derive(Debug, Clone)]
pub struct NotifyClient {
    http: Client,
}

impl NotifyClient {
    /// Client with [`DEFAULT_TIMEOUT`].
    pub fn new() -> Result<Self, ClientError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Client whose sends give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(format!(
                "logging-ipc-client/{}",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(ClientError::Transport)?;
        Ok(NotifyClient { http })
    }

    /// Posts `{"msg": message}` to `endpoint`. Any 2xx is success.
    pub fn send(&self, endpoint: &str, message: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .post(endpoint)
            .json(&NotifyPayload { msg: message })
            .send()
            .map_err(ClientError::Transport)?;

        let status = response.status();
        if status.is_success() {
            debug!("Relay accepted message ({})", status);
            return Ok(());
        }

        let body = response.text().unwrap_or_default();
        Err(ClientError::Status {
            status,
            body: (!body.is_empty()).then_some(body),
        })
    }
}

/// Sends one message with a default client.
pub fn send(endpoint: &str, message: &str) -> Result<(), ClientError> {
    NotifyClient::new()?.send(endpoint, message)
}
