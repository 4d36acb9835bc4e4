// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Helper Locations
//!
//! Where helper executables and shortcuts live on a Windows host. The module
//! runs as a service, so only machine-wide locations are used: the stable
//! helper directory under `%ProgramData%`, the Public Desktop and the common
//! Startup folder.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ShellError;

/// Desktop helper executable name.
pub const DESKTOP_HELPER_EXE: &str = "desktop-helper.exe";

/// Tray helper executable name.
pub const TRAY_HELPER_EXE: &str = "tray-helper.exe";

/// Startup shortcut that relaunches the tray helper at logon.
pub const TRAY_STARTUP_SHORTCUT: &str = "Viam Logging IPC Tray.lnk";

const DEFAULT_PROGRAM_DATA: &str = r"C:\ProgramData";
const DEFAULT_PUBLIC_DESKTOP: &str = r"C:\Users\Public\Desktop";

/// Resolved directories for helpers and shortcuts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperLayout {
    /// Directory the helpers are copied to, stable across module upgrades.
    pub stable_dir: PathBuf,
    /// Public Desktop.
    pub desktop_dir: PathBuf,
    /// Common Startup folder.
    pub startup_dir: PathBuf,
}

impl HelperLayout {
    /// Layout from `%ProgramData%` and `%PUBLIC%`.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var_os("ProgramData"),
            std::env::var_os("PUBLIC"),
        )
    }

    /// Layout from explicit variable values. Empty values count as unset.
    pub fn from_vars(program_data: Option<OsString>, public: Option<OsString>) -> Self {
        let program_data = program_data
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROGRAM_DATA));
        let desktop_dir = public
            .filter(|v| !v.is_empty())
            .map(|p| PathBuf::from(p).join("Desktop"))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PUBLIC_DESKTOP));

        HelperLayout {
            stable_dir: program_data.join("Viam").join("testing-windows-ipc"),
            startup_dir: program_data
                .join("Microsoft")
                .join("Windows")
                .join("Start Menu")
                .join("Programs")
                .join("Startup"),
            desktop_dir,
        }
    }

    /// Layout rooted in a single directory, for hosts without the Windows
    /// folder structure.
    pub fn rooted(root: &Path) -> Self {
        HelperLayout {
            stable_dir: root.join("helpers"),
            desktop_dir: root.join("Desktop"),
            startup_dir: root.join("Startup"),
        }
    }

    pub fn desktop_helper(&self) -> PathBuf {
        self.stable_dir.join(DESKTOP_HELPER_EXE)
    }

    pub fn tray_helper(&self) -> PathBuf {
        self.stable_dir.join(TRAY_HELPER_EXE)
    }

    /// `<desktop>\<name>.lnk`.
    pub fn desktop_shortcut(&self, name: &str) -> PathBuf {
        self.desktop_dir.join(format!("{}.lnk", name))
    }

    pub fn tray_startup_shortcut(&self) -> PathBuf {
        self.startup_dir.join(TRAY_STARTUP_SHORTCUT)
    }

    /// Copies both helpers from `source_dir` into the stable directory,
    /// replacing older copies.
    pub fn install_helpers(&self, source_dir: &Path) -> Result<(), ShellError> {
        fs::create_dir_all(&self.stable_dir)?;

        for name in [DESKTOP_HELPER_EXE, TRAY_HELPER_EXE] {
            let src = source_dir.join(name);
            if !src.is_file() {
                return Err(ShellError::MissingHelper(src));
            }
            copy_replace(&src, &self.stable_dir.join(name))?;
        }
        Ok(())
    }
}

/// Copies `src` to `dst` through a `.tmp` sibling and a rename, so `dst` is
/// never left half-written.
pub fn copy_replace(src: &Path, dst: &Path) -> io::Result<()> {
    let mut tmp = dst.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    if let Err(e) = fs::copy(src, &tmp) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    fs::rename(&tmp, dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_layout_defaults_without_env() {
        let layout = HelperLayout::from_vars(None, Some(OsString::new()));

        let program_data = PathBuf::from(r"C:\ProgramData");
        assert_eq!(
            layout.stable_dir,
            program_data.join("Viam").join("testing-windows-ipc")
        );
        assert_eq!(layout.desktop_dir, PathBuf::from(r"C:\Users\Public\Desktop"));
        assert!(layout.startup_dir.ends_with("Startup"));
    }

    #[test]
    fn test_layout_from_env_values() {
        let layout = HelperLayout::from_vars(
            Some(OsString::from("/pd")),
            Some(OsString::from("/users/public")),
        );

        assert_eq!(layout.stable_dir, PathBuf::from("/pd/Viam/testing-windows-ipc"));
        assert_eq!(layout.desktop_dir, PathBuf::from("/users/public/Desktop"));
        assert_eq!(
            layout.startup_dir,
            PathBuf::from("/pd/Microsoft/Windows/Start Menu/Programs/Startup")
        );
        assert_eq!(
            layout.desktop_shortcut("Viam Logging IPC"),
            PathBuf::from("/users/public/Desktop/Viam Logging IPC.lnk")
        );
        assert_eq!(
            layout.tray_startup_shortcut(),
            PathBuf::from("/pd/Microsoft/Windows/Start Menu/Programs/Startup/Viam Logging IPC Tray.lnk")
        );
        assert_eq!(
            layout.tray_helper(),
            PathBuf::from("/pd/Viam/testing-windows-ipc/tray-helper.exe")
        );
    }

    #[test]
    fn test_copy_replace_overwrites_and_cleans_tmp() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src.exe");
        let dst = dir.path().join("dst.exe");
        fs::write(&src, b"new").unwrap();
        fs::write(&dst, b"old").unwrap();

        copy_replace(&src, &dst).unwrap();

        assert_eq!(fs::read(&dst).unwrap(), b"new");
        assert!(!dir.path().join("dst.exe.tmp").exists());
    }

    #[test]
    fn test_install_helpers_copies_both() {
        let source = tempdir().unwrap();
        let target = tempdir().unwrap();
        fs::write(source.path().join(DESKTOP_HELPER_EXE), b"desktop").unwrap();
        fs::write(source.path().join(TRAY_HELPER_EXE), b"tray").unwrap();
        let layout = HelperLayout::rooted(target.path());

        layout.install_helpers(source.path()).unwrap();

        assert_eq!(fs::read(layout.desktop_helper()).unwrap(), b"desktop");
        assert_eq!(fs::read(layout.tray_helper()).unwrap(), b"tray");
    }

    #[test]
    fn test_install_helpers_missing_source() {
        let source = tempdir().unwrap();
        let target = tempdir().unwrap();
        fs::write(source.path().join(DESKTOP_HELPER_EXE), b"desktop").unwrap();
        let layout = HelperLayout::rooted(target.path());

        let err = layout.install_helpers(source.path()).unwrap_err();

        assert!(matches!(err, ShellError::MissingHelper(ref p) if p.ends_with(TRAY_HELPER_EXE)));
    }
}
