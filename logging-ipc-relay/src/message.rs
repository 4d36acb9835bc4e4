// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Notify Request Decoding
//!
//! Body of `POST /notify` and `POST /log`. The text may arrive under either
//! `message` or `msg`; older helpers only send `msg`.

use serde_json::Value;

/// Logged when a request carries no usable text.
pub const EMPTY_MESSAGE: &str = "(empty message)";

/// Prefix of every relayed sink entry.
pub const SHORTCUT_PREFIX: &str = "Desktop shortcut invoked";

/// Decoded notify body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotifyRequest {
    pub message: Option<String>,
    pub msg: Option<String>,
}

impl NotifyRequest {
    /// Decodes a request body. Malformed bodies decode as empty.
    ///
    /// Each alias is read on its own, so a non-string value under one key
    /// does not discard the other. A repeated key keeps its last value.
    pub fn decode(body: &[u8]) -> Self {
        let value: Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(_) => return Self::default(),
        };
        let field = |key: &str| value.get(key).and_then(Value::as_str).map(String::from);

        NotifyRequest {
            message: field("message"),
            msg: field("msg"),
        }
    }

    /// First non-blank alias, trimmed, in the order `message`, `msg`.
    pub fn text(&self) -> Option<&str> {
        [self.message.as_deref(), self.msg.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|text| !text.is_empty())
    }

    /// Text to log, falling back to [`EMPTY_MESSAGE`].
    pub fn resolve(&self) -> &str {
        self.text().unwrap_or(EMPTY_MESSAGE)
    }

    /// Sink entry for this request.
    pub fn log_line(&self) -> String {
        format!("{}: {}", SHORTCUT_PREFIX, self.resolve())
    }
}
