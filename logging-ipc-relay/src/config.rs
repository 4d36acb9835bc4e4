// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration
//!
//! Service configuration supplied by the host, and the relay settings the
//! module binary reads from its environment.

use std::fmt;
use std::fs;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Port the relay listens on in the reference deployment.
pub const DEFAULT_RELAY_PORT: u16 = 17831;

/// Endpoint helpers post to when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:17831/log";

/// Message baked into the desktop shortcut when none is configured.
pub const DEFAULT_MESSAGE: &str = "hello from desktop shortcut";

/// Desktop shortcut label when none is configured.
pub const DEFAULT_SHORTCUT_NAME: &str = "Viam Logging IPC";

/// Environment variable overriding the relay bind address.
pub const ADDR_ENV: &str = "LOGGING_IPC_ADDR";

/// Environment variable pointing at a JSON service config file.
pub const CONFIG_ENV: &str = "LOGGING_IPC_CONFIG";

/// Loopback socket address the relay binds to and helpers target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelayAddress(SocketAddr);

impl RelayAddress {
    /// Wraps `addr`, rejecting anything that is not a loopback address.
    pub fn new(addr: SocketAddr) -> Result<Self, ConfigError> {
        if !addr.ip().is_loopback() {
            return Err(ConfigError::NotLoopback(addr));
        }
        Ok(RelayAddress(addr))
    }

    /// `127.0.0.1:<port>`. Port 0 asks the OS for a free port.
    pub fn loopback(port: u16) -> Self {
        RelayAddress(SocketAddr::from((Ipv4Addr::LOCALHOST, port)))
    }

    /// The underlying socket address.
    pub fn socket_addr(&self) -> SocketAddr {
        self.0
    }
}

impl Default for RelayAddress {
    fn default() -> Self {
        RelayAddress::loopback(DEFAULT_RELAY_PORT)
    }
}

impl FromStr for RelayAddress {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let addr: SocketAddr = s
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(s.to_string()))?;
        RelayAddress::new(addr)
    }
}

impl fmt::Display for RelayAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Configuration object handed to the service by its host.
///
/// Every field is optional; blank values mean "use the default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Label of the desktop shortcut.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcut_name: Option<String>,
    /// Message the desktop shortcut sends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Relay endpoint helpers post to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl ServiceConfig {
    /// Parses a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Checks the config. Only a configured endpoint can be wrong.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(endpoint) = non_blank(&self.endpoint) {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(ConfigError::InvalidEndpoint(endpoint.to_string()));
            }
        }
        Ok(())
    }

    /// Effective desktop shortcut label.
    pub fn shortcut_name(&self) -> &str {
        non_blank(&self.shortcut_name).unwrap_or(DEFAULT_SHORTCUT_NAME)
    }

    /// Effective shortcut message.
    pub fn message(&self) -> &str {
        non_blank(&self.message).unwrap_or(DEFAULT_MESSAGE)
    }

    /// Effective relay endpoint.
    pub fn endpoint(&self) -> &str {
        non_blank(&self.endpoint).unwrap_or(DEFAULT_ENDPOINT)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Settings for the `logging-ipc` module binary.
#[derive(Debug, Clone, Default)]
pub struct RelayConfig {
    /// Address the relay binds to.
    pub address: RelayAddress,
    /// Optional JSON file holding the [`ServiceConfig`].
    pub service_config_path: Option<PathBuf>,
}

impl RelayConfig {
    /// Reads `LOGGING_IPC_ADDR` and `LOGGING_IPC_CONFIG`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var(ADDR_ENV).ok(),
            std::env::var(CONFIG_ENV).ok(),
        )
    }

    fn from_vars(addr: Option<String>, config: Option<String>) -> Result<Self, ConfigError> {
        let address = match addr.filter(|a| !a.trim().is_empty()) {
            Some(addr) => addr.parse()?,
            None => RelayAddress::default(),
        };
        let service_config_path = config
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(RelayConfig {
            address,
            service_config_path,
        })
    }

    /// Loads the service config file, or the default config when unset.
    pub fn service_config(&self) -> Result<ServiceConfig, ConfigError> {
        match &self.service_config_path {
            Some(path) => ServiceConfig::load(path),
            None => Ok(ServiceConfig::default()),
        }
    }
}
