// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Viam Logging IPC Client
//!
//! Posts a single notification to the loopback relay. Used by the desktop
//! and tray helpers; one attempt per call, bounded by a timeout.

mod client;
mod error;

pub use client::{send, NotifyClient, NotifyPayload, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
pub use error::ClientError;
