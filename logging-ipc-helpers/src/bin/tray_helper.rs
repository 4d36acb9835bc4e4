// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tray Helper
//!
//! Long-lived helper started at logon. Offers "Send log…" and "Quit" until
//! the user quits or the module kills it. Send failures are shown and the
//! menu comes back.
//!
//! Without a terminal there is no menu to show. The helper then stays
//! resident until it is killed.

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use console::Term;
use dialoguer::Select;
use tracing::warn;

use logging_ipc_helpers::{confirm_and_send, display, HelperArgs, Outcome, DIALOG_TITLE};

#[derive(Parser, Debug)]
#[command(name = "tray-helper")]
#[command(version, about = "Menu for sending messages to the Viam Logging IPC relay")]
struct Cli {
    #[command(flatten)]
    helper: HelperArgs,

    /// Message to send
    #[arg(long, default_value = "hello from tray")]
    msg: String,
}

const MENU: [&str; 2] = ["Send log…", "Quit"];

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("logging_ipc_helpers=warn".parse().unwrap())
                .add_directive("tray_helper=warn".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = cli.helper.client()?;

    if !has_terminal() {
        warn!("No terminal attached, tray menu disabled");
        idle();
    }

    loop {
        display::title(DIALOG_TITLE);
        let selection = Select::new()
            .with_prompt("Send a log message")
            .items(&MENU)
            .default(0)
            .interact()?;

        if selection != 0 {
            return Ok(());
        }

        match confirm_and_send(&client, &cli.helper, &cli.msg) {
            Ok(Outcome::Sent) => display::success("Sent."),
            Ok(Outcome::Declined) => {}
            Err(e) => display::error(&format!("Failed: {:#}", e)),
        }
        println!();
    }
}

/// Whether the menu can be shown. dialoguer draws on stderr and reads keys
/// from stdin.
fn has_terminal() -> bool {
    std::io::stdin().is_terminal() && Term::stderr().is_term()
}

/// Parks the process until it is killed.
fn idle() -> ! {
    loop {
        std::thread::park();
    }
}
