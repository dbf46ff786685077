//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use credkit_core::{Argon2idParams, GeneratorConfig};

#[derive(Parser, Debug)]
#[command(name = "credkit", version, about = "Hash, verify and generate passwords")]
pub struct Cli {
    /// Settings file (defaults to ./credkit.json).
    #[arg(long, env = "CREDKIT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Hash the password on stdin and print the encoded hash.
    Hash(HashArgs),
    /// Check the password on stdin against an encoded hash.
    Verify(VerifyArgs),
    /// Print random passwords.
    Generate(GenerateArgs),
    /// Check the password on stdin against the strength policy.
    Check,
}

#[derive(Args, Debug, Default)]
pub struct HashArgs {
    /// Memory cost in KiB.
    #[arg(long)]
    pub memory: Option<u32>,
    /// Iterations.
    #[arg(long)]
    pub iterations: Option<u32>,
    /// Lanes.
    #[arg(long)]
    pub parallelism: Option<u32>,
    /// Digest length in bytes.
    #[arg(long)]
    pub key_length: Option<usize>,
    /// Refuse passwords that fail the strength policy.
    #[arg(long)]
    pub enforce_policy: bool,
}

impl HashArgs {
    /// Layer flag overrides on top of `base`.
    pub fn apply(&self, base: Argon2idParams) -> Argon2idParams {
        Argon2idParams {
            m_cost: self.memory.unwrap_or(base.m_cost),
            t_cost: self.iterations.unwrap_or(base.t_cost),
            p_cost: self.parallelism.unwrap_or(base.p_cost),
            output_len: self.key_length.unwrap_or(base.output_len),
        }
    }
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Encoded hash, e.g. `$argon2id$v=19$m=...`.
    pub encoded: String,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Password length.
    #[arg(long)]
    pub length: Option<usize>,
    /// Number of passwords to print.
    #[arg(long, default_value_t = 1)]
    pub count: usize,
    #[arg(long)]
    pub no_uppercase: bool,
    #[arg(long)]
    pub no_lowercase: bool,
    #[arg(long)]
    pub no_digits: bool,
    #[arg(long)]
    pub no_symbols: bool,
    /// Draw only from these characters.
    #[arg(long)]
    pub charset: Option<String>,
    /// Never emit these characters.
    #[arg(long)]
    pub exclude: Option<String>,
}

impl GenerateArgs {
    /// Layer flag overrides on top of `base`.
    pub fn apply(&self, base: GeneratorConfig) -> GeneratorConfig {
        let mut config = base.with_length(self.length.unwrap_or(0));
        if self.no_uppercase {
            config = config.without_uppercase();
        }
        if self.no_lowercase {
            config = config.without_lowercase();
        }
        if self.no_digits {
            config = config.without_digits();
        }
        if self.no_symbols {
            config = config.without_symbols();
        }
        if let Some(charset) = &self.charset {
            config = config.with_custom_charset(charset.clone());
        }
        if let Some(exclude) = &self.exclude {
            config = config.with_excluded(exclude.clone());
        }
        config
    }
}
