// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Viam Logging IPC Helpers
//!
//! Shared pieces of the `desktop-helper` and `tray-helper` binaries.

pub mod display;
pub mod send;

pub use send::{confirm_and_send, HelperArgs, Outcome, DIALOG_TITLE};
