// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Desktop Helper
//!
//! Launched by the desktop shortcut. Confirms the configured message with
//! the user and posts it to the relay once.

use std::process::ExitCode;

use clap::Parser;

use logging_ipc_helpers::{confirm_and_send, display, HelperArgs, Outcome, DIALOG_TITLE};

#[derive(Parser, Debug)]
#[command(name = "desktop-helper")]
#[command(version, about = "Send a message to the Viam Logging IPC relay")]
struct Cli {
    #[command(flatten)]
    helper: HelperArgs,

    /// Message to send
    #[arg(long, default_value = "hello from desktop shortcut")]
    msg: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("logging_ipc_helpers=warn".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    display::title(DIALOG_TITLE);

    let result = cli
        .helper
        .client()
        .and_then(|client| confirm_and_send(&client, &cli.helper, &cli.msg));

    match result {
        Ok(Outcome::Sent) => {
            display::success("Sent.");
            ExitCode::SUCCESS
        }
        Ok(Outcome::Declined) => {
            display::info("Nothing sent.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            display::error(&format!("Failed to send: {:#}", e));
            ExitCode::FAILURE
        }
    }
}
