// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Logging IPC Service
//!
//! The object a host constructs from a [`ServiceConfig`]. Construction makes
//! sure the relay is up and, on Windows, refreshes the helpers, the desktop
//! shortcut and the tray helper. None of those steps can fail construction.
//!
//! `close` consumes the service, so it runs at most once per instance.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{json, Map, Value};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::{RelayAddress, ServiceConfig};
use crate::error::{ConfigError, ServiceError, ShellError};
use crate::lifecycle::RelayState;
use crate::message::EMPTY_MESSAGE;
use crate::paths::HelperLayout;
use crate::shell::{helper_arguments, DesktopShell, LaunchSpec, PowerShellShell, ShortcutSpec};
use crate::sink::NotificationSink;

/// Everything the service needs from its host process.
#[derive(Clone)]
pub struct HostEnv {
    pub relay: Arc<RelayState>,
    pub relay_addr: RelayAddress,
    pub sink: Arc<dyn NotificationSink>,
    pub shell: Arc<dyn DesktopShell>,
    pub layout: HelperLayout,
    /// Directory holding freshly built helpers. Defaults to the directory of
    /// the running executable.
    pub helper_source_dir: Option<PathBuf>,
    /// Whether to install helpers, create shortcuts and launch the tray.
    pub desktop_setup: bool,
}

impl HostEnv {
    /// Process-wide relay, default address, PowerShell shell and Windows
    /// folder layout. Desktop setup only runs on Windows.
    pub fn system(sink: Arc<dyn NotificationSink>) -> Self {
        HostEnv {
            relay: RelayState::global(),
            relay_addr: RelayAddress::default(),
            sink,
            shell: Arc::new(PowerShellShell),
            layout: HelperLayout::from_env(),
            helper_source_dir: None,
            desktop_setup: cfg!(windows),
        }
    }

    pub fn with_relay_addr(mut self, relay_addr: RelayAddress) -> Self {
        self.relay_addr = relay_addr;
        self
    }
}

/// A running Logging IPC service.
pub struct LoggingIpc {
    name: String,
    config: ServiceConfig,
    sink: Arc<dyn NotificationSink>,
    shell: Arc<dyn DesktopShell>,
    layout: HelperLayout,
    helper_source_dir: Option<PathBuf>,
    cancel: CancellationToken,
    tray: Option<JoinHandle<()>>,
}

impl LoggingIpc {
    /// Constructs the service.
    ///
    /// Only an invalid config is an error. Relay bind failures and desktop
    /// setup failures are logged and the service comes up without them.
    pub async fn new(
        name: impl Into<String>,
        config: ServiceConfig,
        env: HostEnv,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        env.relay
            .ensure_started(&env.relay_addr, env.sink.clone())
            .await;

        let mut service = LoggingIpc {
            name: name.into(),
            config,
            sink: env.sink,
            shell: env.shell,
            layout: env.layout,
            helper_source_dir: env.helper_source_dir,
            cancel: CancellationToken::new(),
            tray: None,
        };

        if env.desktop_setup {
            if let Err(e) = service.ensure_stable_helpers() {
                service
                    .sink
                    .error(&format!("failed to ensure stable helpers: {}", e));
            }
            if let Err(e) = service.ensure_desktop_shortcut() {
                service
                    .sink
                    .error(&format!("failed to create desktop shortcut: {}", e));
            }
            if let Err(e) = service.ensure_tray() {
                service
                    .sink
                    .error(&format!("failed to configure tray helper: {}", e));
            }
        }

        Ok(service)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Whether a tray helper launched by this service is being supervised.
    pub fn has_tray(&self) -> bool {
        self.tray.is_some()
    }

    /// Stops background work and kills the tray helper, waiting for it to
    /// exit.
    pub async fn close(mut self) -> Result<(), ServiceError> {
        self.cancel.cancel();

        if let Some(tray) = self.tray.take() {
            if let Err(e) = tray.await {
                self.sink
                    .warn(&format!("tray-helper supervisor failed: {}", e));
            }
        }
        Ok(())
    }

    /// Runs an ad-hoc command from the host.
    ///
    /// - `log`: logs `message`
    /// - `create_shortcut`: (re)creates the desktop shortcut, optionally with
    ///   its own `shortcut_name` and `message`
    pub fn do_command(&self, cmd: &Map<String, Value>) -> Result<Map<String, Value>, ServiceError> {
        let command = cmd
            .get("command")
            .ok_or(ServiceError::MissingCommand)?
            .as_str()
            .ok_or(ServiceError::CommandNotString)?;

        let response = match command {
            "log" => {
                let message = string_arg(cmd, "message").unwrap_or(EMPTY_MESSAGE);
                self.sink.info(&format!("DoCommand log: {}", message));
                json!({ "ok": true })
            }
            "create_shortcut" => {
                let name = string_arg(cmd, "shortcut_name")
                    .unwrap_or_else(|| self.config.shortcut_name());
                let message =
                    string_arg(cmd, "message").unwrap_or_else(|| self.config.message());

                let spec = self.desktop_shortcut_spec(name, message);
                self.shell.create_shortcut(&spec)?;

                json!({
                    "ok": true,
                    "shortcut": spec.path.to_string_lossy(),
                    "exe": spec.target.to_string_lossy(),
                })
            }
            other => return Err(ServiceError::UnknownCommand(other.to_string())),
        };

        match response {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }

    fn ensure_stable_helpers(&self) -> Result<(), ShellError> {
        let source_dir = match &self.helper_source_dir {
            Some(dir) => dir.clone(),
            None => {
                let exe = std::env::current_exe()?;
                exe.parent().map(PathBuf::from).unwrap_or_default()
            }
        };

        self.layout.install_helpers(&source_dir)?;
        self.sink.info(&format!(
            "Stable helpers refreshed in {}",
            self.layout.stable_dir.display()
        ));
        Ok(())
    }

    fn ensure_desktop_shortcut(&self) -> Result<(), ShellError> {
        let spec = self.desktop_shortcut_spec(self.config.shortcut_name(), self.config.message());
        self.shell.create_shortcut(&spec)
    }

    fn ensure_tray(&mut self) -> Result<(), ShellError> {
        let endpoint = self.config.endpoint();
        let tray_exe = self.layout.tray_helper();

        self.shell.create_shortcut(&ShortcutSpec {
            path: self.layout.tray_startup_shortcut(),
            target: tray_exe.clone(),
            arguments: helper_arguments(endpoint, None),
            working_dir: self.layout.stable_dir.clone(),
        })?;

        let launch = LaunchSpec {
            program: tray_exe,
            args: vec!["--endpoint".to_string(), endpoint.to_string()],
            working_dir: self.layout.stable_dir.clone(),
        };
        match self.shell.launch(&launch) {
            Ok(child) => {
                self.tray = Some(tokio::spawn(supervise_tray(
                    child,
                    self.cancel.clone(),
                    self.sink.clone(),
                )));
            }
            Err(e) => {
                self.sink
                    .warn(&format!("tray-helper did not start immediately: {}", e));
            }
        }
        Ok(())
    }

    fn desktop_shortcut_spec(&self, name: &str, message: &str) -> ShortcutSpec {
        ShortcutSpec {
            path: self.layout.desktop_shortcut(name),
            target: self.layout.desktop_helper(),
            arguments: helper_arguments(self.config.endpoint(), Some(message)),
            working_dir: self.layout.stable_dir.clone(),
        }
    }
}

impl Drop for LoggingIpc {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn string_arg<'a>(cmd: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    cmd.get(key)
        .and_then(Value::as_str)
        .filter(|v| !v.is_empty())
}

/// Owns the tray child until it exits on its own or the service is closed.
async fn supervise_tray(
    mut child: Child,
    cancel: CancellationToken,
    sink: Arc<dyn NotificationSink>,
) {
    tokio::select! {
        _ = cancel.cancelled() => {
            if let Err(e) = child.kill().await {
                sink.warn(&format!("failed to stop tray-helper: {}", e));
            }
        }
        status = child.wait() => match status {
            Ok(status) => sink.info(&format!("tray-helper exited: {}", status)),
            Err(e) => sink.warn(&format!("failed to wait for tray-helper: {}", e)),
        },
    }
}
