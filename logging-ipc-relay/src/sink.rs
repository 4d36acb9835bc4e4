// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Notification Sinks
//!
//! Where relayed messages and service diagnostics end up.

use std::sync::{Mutex, PoisonError};

use tracing::{error, info, warn};

/// Records formatted messages.
///
/// Called concurrently from every in-flight relay request.
pub trait NotificationSink: Send + Sync {
    /// Records an informational message.
    fn info(&self, message: &str);

    /// Records a warning.
    fn warn(&self, message: &str);

    /// Records an error.
    fn error(&self, message: &str);
}

/// Sink backed by `tracing`.
#[derive(Debug, Clone)]
pub struct TracingSink {
    service: String,
}

impl TracingSink {
    /// Creates a sink tagging every event with `service`.
    pub fn new(service: impl Into<String>) -> Self {
        TracingSink {
            service: service.into(),
        }
    }
}

impl NotificationSink for TracingSink {
    fn info(&self, message: &str) {
        info!(service = %self.service, "{}", message);
    }

    fn warn(&self, message: &str) {
        warn!(service = %self.service, "{}", message);
    }

    fn error(&self, message: &str) {
        error!(service = %self.service, "{}", message);
    }
}

/// Severity of a [`SinkEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkLevel {
    Info,
    Warn,
    Error,
}

/// One message recorded by a [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkEntry {
    pub level: SinkLevel,
    pub message: String,
}

/// In-memory sink that keeps every entry in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<SinkEntry>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all entries so far.
    pub fn entries(&self) -> Vec<SinkEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Messages recorded at `level`.
    pub fn messages(&self, level: SinkLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|e| e.level == level)
            .map(|e| e.message)
            .collect()
    }

    fn push(&self, level: SinkLevel, message: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SinkEntry {
                level,
                message: message.to_string(),
            });
    }
}

impl NotificationSink for MemorySink {
    fn info(&self, message: &str) {
        self.push(SinkLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(SinkLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.push(SinkLevel::Error, message);
    }
}
