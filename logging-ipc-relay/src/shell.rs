// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Desktop Shell Integration
//!
//! Shortcut creation and helper launching. Both are best-effort from the
//! service's point of view: failures come back as [`ShellError`] and the
//! caller decides to log them.

use std::path::PathBuf;
#[cfg(not(windows))]
use std::process::Stdio;

use tokio::process::{Child, Command};

use crate::error::ShellError;

/// A `.lnk` shortcut to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutSpec {
    /// Where the `.lnk` file goes.
    pub path: PathBuf,
    /// Executable the shortcut launches.
    pub target: PathBuf,
    /// Argument string passed to `target`.
    pub arguments: String,
    pub working_dir: PathBuf,
}

/// A helper process to launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

/// OS shell operations the service depends on.
pub trait DesktopShell: Send + Sync {
    /// Creates or overwrites a shortcut.
    fn create_shortcut(&self, spec: &ShortcutSpec) -> Result<(), ShellError>;

    /// Starts a helper process. The child is killed if its handle is dropped.
    fn launch(&self, spec: &LaunchSpec) -> Result<Child, ShellError>;
}

/// Shell backed by PowerShell COM automation (`WScript.Shell`).
#[derive(Debug, Clone, Copy, Default)]
pub struct PowerShellShell;

impl DesktopShell for PowerShellShell {
    #[cfg(windows)]
    fn create_shortcut(&self, spec: &ShortcutSpec) -> Result<(), ShellError> {
        let output = std::process::Command::new("powershell")
            .args(["-NoProfile", "-ExecutionPolicy", "Bypass", "-Command"])
            .arg(shortcut_script(spec))
            .output()?;

        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(ShellError::ShortcutFailed {
                status: output.status.to_string(),
                output: combined.trim().to_string(),
            });
        }
        Ok(())
    }

    #[cfg(not(windows))]
    fn create_shortcut(&self, _spec: &ShortcutSpec) -> Result<(), ShellError> {
        Err(ShellError::Unsupported)
    }

    fn launch(&self, spec: &LaunchSpec) -> Result<Child, ShellError> {
        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .current_dir(&spec.working_dir)
            .kill_on_drop(true);
        detach_console(&mut command);
        Ok(command.spawn()?)
    }
}

/// Gives the helper its own console window so its menu has a terminal.
#[cfg(windows)]
fn detach_console(command: &mut Command) {
    const CREATE_NEW_CONSOLE: u32 = 0x0000_0010;
    command.creation_flags(CREATE_NEW_CONSOLE);
}

/// No console to attach to; the helper runs without a terminal.
#[cfg(not(windows))]
fn detach_console(command: &mut Command) {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
}

/// PowerShell script that writes `spec` as a `.lnk` file.
pub fn shortcut_script(spec: &ShortcutSpec) -> String {
    format!(
        "$WshShell = New-Object -ComObject WScript.Shell;\n\
         $Shortcut = $WshShell.CreateShortcut('{}');\n\
         $Shortcut.TargetPath = '{}';\n\
         $Shortcut.Arguments = '{}';\n\
         $Shortcut.WorkingDirectory = '{}';\n\
         $Shortcut.Save();",
        escape_ps_single(&spec.path.to_string_lossy()),
        escape_ps_single(&spec.target.to_string_lossy()),
        escape_ps_single(&spec.arguments),
        escape_ps_single(&spec.working_dir.to_string_lossy()),
    )
}

/// Escapes `s` for a single-quoted PowerShell string literal.
pub fn escape_ps_single(s: &str) -> String {
    s.replace('\'', "''")
}

/// Helper argument string: `--endpoint "<endpoint>"`, plus
/// `--msg "<message>"` when a message is given.
pub fn helper_arguments(endpoint: &str, message: Option<&str>) -> String {
    match message {
        Some(message) => format!(r#"--endpoint "{}" --msg "{}""#, endpoint, message),
        None => format!(r#"--endpoint "{}""#, endpoint),
    }
}
