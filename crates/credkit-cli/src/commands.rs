//! Command execution.
//!
//! Commands read from a [`BufRead`] and write to a [`Write`] so they can be
//! driven from tests without a terminal. Each returns the process exit code.

use std::io::{BufRead, Write};

use anyhow::Context;
use credkit_core::{check, generate, hash_to_string, verify};
use zeroize::Zeroizing;

use crate::args::{Command, GenerateArgs, HashArgs, VerifyArgs};
use crate::config::Settings;

/// Success, or a matching password.
pub const EXIT_OK: u8 = 0;
/// Wrong password, or a password that fails the policy.
pub const EXIT_REJECTED: u8 = 1;
/// The stored hash could not be parsed.
pub const EXIT_CORRUPTED: u8 = 2;
/// Anything else (I/O, random source, key derivation).
pub const EXIT_FAILURE: u8 = 3;

/// Run `command` and return its exit code.
///
/// # Errors
///
/// I/O failures and errors that are not part of a command's normal
/// outcomes (see [`EXIT_FAILURE`]).
pub fn run(
    command: &Command,
    settings: &Settings,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> anyhow::Result<u8> {
    match command {
        Command::Hash(args) => run_hash(args, settings, input, output),
        Command::Verify(args) => run_verify(args, input, output),
        Command::Generate(args) => run_generate(args, settings, output),
        Command::Check => run_check(settings, input, output),
    }
}

/// Read one line and strip a single `\n` or `\r\n` terminator. EOF gives an
/// empty password.
fn read_password(input: &mut impl BufRead) -> anyhow::Result<Zeroizing<String>> {
    let mut line = Zeroizing::new(String::new());
    input
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}

fn run_hash(
    args: &HashArgs,
    settings: &Settings,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> anyhow::Result<u8> {
    let password = read_password(input)?;
    if args.enforce_policy {
        if let Err(violation) = check(&password, &settings.policy) {
            tracing::info!(%violation, "password rejected by policy");
            writeln!(output, "{violation}")?;
            return Ok(EXIT_REJECTED);
        }
    }

    let params = args.apply(settings.hash);
    tracing::debug!(
        m_cost = params.m_cost,
        t_cost = params.t_cost,
        p_cost = params.p_cost,
        output_len = params.output_len,
        "hashing password"
    );
    let encoded = hash_to_string(password.as_bytes(), None, Some(&params))?;
    writeln!(output, "{encoded}")?;
    Ok(EXIT_OK)
}

fn run_verify(
    args: &VerifyArgs,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> anyhow::Result<u8> {
    let password = read_password(input)?;
    match verify(&args.encoded, password.as_bytes()) {
        Ok(true) => {
            tracing::info!("password matched");
            writeln!(output, "ok")?;
            Ok(EXIT_OK)
        }
        Ok(false) => {
            tracing::info!("password did not match");
            writeln!(output, "authentication failed")?;
            Ok(EXIT_REJECTED)
        }
        Err(e) if e.is_corrupted_record() => {
            tracing::warn!(error = %e, "stored hash is malformed");
            writeln!(output, "corrupted credential record: {e}")?;
            Ok(EXIT_CORRUPTED)
        }
        Err(e) => Err(anyhow::Error::new(e).context("verification failed")),
    }
}

fn run_generate(
    args: &GenerateArgs,
    settings: &Settings,
    output: &mut impl Write,
) -> anyhow::Result<u8> {
    let config = args.apply(settings.generator.clone());
    for _ in 0..args.count {
        let password = Zeroizing::new(generate(&config)?);
        writeln!(output, "{}", password.as_str())?;
    }
    tracing::debug!(count = args.count, length = config.length, "passwords generated");
    Ok(EXIT_OK)
}

fn run_check(
    settings: &Settings,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> anyhow::Result<u8> {
    let password = read_password(input)?;
    match check(&password, &settings.policy) {
        Ok(()) => {
            writeln!(output, "ok")?;
            Ok(EXIT_OK)
        }
        Err(violation) => {
            writeln!(output, "{violation}")?;
            Ok(EXIT_REJECTED)
        }
    }
}
