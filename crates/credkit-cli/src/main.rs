//! `credkit` — hash, verify and generate passwords from the command line.
//!
//! Passwords are always read from stdin, never from arguments. Logs go to
//! stderr and are filtered by `CREDKIT_LOG` (default `credkit=info`).

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

mod args;
mod commands;
mod config;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use args::Cli;
use config::Settings;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("CREDKIT_LOG").unwrap_or_else(|_| "credkit=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref());

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    match commands::run(&cli.command, &settings, &mut input, &mut output) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e:#}");
            ExitCode::from(commands::EXIT_FAILURE)
        }
    }
}
