// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error Types
//!
//! Errors for configuration, OS shell integration and service commands.
//! Relay bind and decode failures are not errors here: they are logged at the
//! point of origin and never reach a caller.

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Configuration could not be parsed or is not acceptable.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Relay address is not a valid socket address.
    #[error("invalid relay address: {0}")]
    InvalidAddress(String),

    /// Relay address does not point at the loopback interface.
    #[error("relay address {0} is not a loopback address")]
    NotLoopback(SocketAddr),

    /// Endpoint is not an http(s) URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Config file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Config file is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A best-effort OS shell operation failed.
#[derive(Error, Debug)]
pub enum ShellError {
    /// The operation only exists on Windows.
    #[error("desktop shell integration is not supported on this platform")]
    Unsupported,

    /// Filesystem or process error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The shortcut command ran but reported failure.
    #[error("shortcut create failed: {status}: {output}")]
    ShortcutFailed { status: String, output: String },

    /// A helper executable to install was not found.
    #[error("helper executable not found: {}", .0.display())]
    MissingHelper(PathBuf),
}

/// A service command was rejected or failed.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The command map has no `command` key.
    #[error("missing 'command'")]
    MissingCommand,

    /// `command` is present but not a string.
    #[error("'command' must be a string")]
    CommandNotString,

    /// `command` names no known command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// The command needed the OS shell and it failed.
    #[error(transparent)]
    Shell(#[from] ShellError),
}
