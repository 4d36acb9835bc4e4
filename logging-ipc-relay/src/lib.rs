// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Viam Logging IPC Relay
//!
//! A loopback-only HTTP relay that accepts short notifications from desktop
//! helpers and records them through a [`NotificationSink`], plus the owning
//! service that keeps the helper executables, desktop shortcut and tray helper
//! in sync with its configuration.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod message;
pub mod paths;
pub mod service;
pub mod shell;
pub mod sink;

pub use config::{RelayAddress, RelayConfig, ServiceConfig};
pub use error::{ConfigError, ServiceError, ShellError};
pub use lifecycle::RelayState;
pub use message::NotifyRequest;
pub use paths::HelperLayout;
pub use service::{HostEnv, LoggingIpc};
pub use shell::{DesktopShell, LaunchSpec, PowerShellShell, ShortcutSpec};
pub use sink::{MemorySink, NotificationSink, SinkEntry, SinkLevel, TracingSink};
