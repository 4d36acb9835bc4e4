// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Client Errors

use reqwest::StatusCode;
use thiserror::Error;

/// Why a notification was not delivered.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The relay could not be reached, or did not answer in time.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The relay answered with a non-2xx status.
    #[error("server returned {status}{}", body_suffix(.body))]
    Status {
        status: StatusCode,
        /// Response body, when the relay sent one.
        body: Option<String>,
    },
}

impl ClientError {
    /// True for connection failures and timeouts.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    /// True if the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Transport(e) if e.is_timeout())
    }

    /// Status the relay answered with, if it answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status(),
        }
    }
}

fn body_suffix(body: &Option<String>) -> String {
    match body {
        Some(body) => format!(": {}", body),
        None => String::new(),
    }
}
