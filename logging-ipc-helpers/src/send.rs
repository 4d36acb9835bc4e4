// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Confirm-then-send flow shared by both helpers.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use dialoguer::Confirm;
use logging_ipc_client::{NotifyClient, DEFAULT_ENDPOINT};
use tracing::info;

/// Title shown above every prompt.
pub const DIALOG_TITLE: &str = "Viam Logger";

/// Options common to both helpers.
#[derive(Args, Debug, Clone)]
pub struct HelperArgs {
    /// Relay endpoint to post to
    #[arg(long, env = "LOGGING_IPC_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Send without asking for confirmation
    #[arg(long, short)]
    pub yes: bool,

    /// Seconds to wait for the relay before giving up
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,
}

impl HelperArgs {
    /// Client honouring `--timeout-secs`.
    pub fn client(&self) -> Result<NotifyClient> {
        NotifyClient::with_timeout(Duration::from_secs(self.timeout_secs))
            .context("Failed to create relay client")
    }
}

/// What happened to a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Sent,
    Declined,
}

/// Asks the user to confirm `message` (unless `--yes`), then sends it once.
pub fn confirm_and_send(client: &NotifyClient, args: &HelperArgs, message: &str) -> Result<Outcome> {
    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Send this message to Viam logs?\n\n{}\n", message))
            .default(true)
            .interact()
            .context("Failed to read confirmation")?;
        if !confirmed {
            return Ok(Outcome::Declined);
        }
    }

    client.send(&args.endpoint, message)?;
    info!(endpoint = %args.endpoint, "Message sent");
    Ok(Outcome::Sent)
}
