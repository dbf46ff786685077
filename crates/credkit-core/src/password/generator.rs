//! Random password generation.
//!
//! Each character is drawn independently and uniformly from a pool built
//! from a [`GeneratorConfig`]. Randomness comes from `OsRng`.

use rand::rngs::OsRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{DIGITS, LOWERCASE, SYMBOLS, UPPERCASE};
use crate::error::CryptoError;

/// Default generated password length.
pub const DEFAULT_LENGTH: usize = 16;

/// Which characters a generated password may contain.
///
/// A non-empty `custom_charset` replaces the four class flags. Characters
/// in `exclude` are removed from whichever pool results. Duplicate
/// characters in a custom charset are kept, which weights them.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// Number of characters to generate.
    pub length: usize,
    /// Include uppercase letters (A-Z).
    pub uppercase: bool,
    /// Include lowercase letters (a-z).
    pub lowercase: bool,
    /// Include digits (0-9).
    pub digits: bool,
    /// Include symbols from [`SYMBOLS`].
    pub symbols: bool,
    /// Explicit character pool; overrides the class flags when non-empty.
    pub custom_charset: Option<String>,
    /// Characters never to emit.
    pub exclude: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            uppercase: true,
            lowercase: true,
            digits: true,
            symbols: true,
            custom_charset: None,
            exclude: None,
        }
    }
}

impl GeneratorConfig {
    /// Set the length. Zero leaves the current length in place.
    #[must_use]
    pub const fn with_length(mut self, length: usize) -> Self {
        if length > 0 {
            self.length = length;
        }
        self
    }

    /// Drop uppercase letters from the pool.
    #[must_use]
    pub const fn without_uppercase(mut self) -> Self {
        self.uppercase = false;
        self
    }

    /// Drop lowercase letters from the pool.
    #[must_use]
    pub const fn without_lowercase(mut self) -> Self {
        self.lowercase = false;
        self
    }

    /// Drop digits from the pool.
    #[must_use]
    pub const fn without_digits(mut self) -> Self {
        self.digits = false;
        self
    }

    /// Drop symbols from the pool.
    #[must_use]
    pub const fn without_symbols(mut self) -> Self {
        self.symbols = false;
        self
    }

    /// Use exactly `charset` as the pool.
    #[must_use]
    pub fn with_custom_charset(mut self, charset: impl Into<String>) -> Self {
        self.custom_charset = Some(charset.into());
        self
    }

    /// Never emit any character of `chars`.
    #[must_use]
    pub fn with_excluded(mut self, chars: impl Into<String>) -> Self {
        self.exclude = Some(chars.into());
        self
    }

    fn pool(&self) -> Vec<char> {
        let mut pool: Vec<char> = match self.custom_charset.as_deref() {
            Some(custom) if !custom.is_empty() => custom.chars().collect(),
            _ => [
                (self.uppercase, UPPERCASE),
                (self.lowercase, LOWERCASE),
                (self.digits, DIGITS),
                (self.symbols, SYMBOLS),
            ]
            .into_iter()
            .filter(|(enabled, _)| *enabled)
            .flat_map(|(_, class)| class.chars())
            .collect(),
        };
        if let Some(exclude) = self.exclude.as_deref() {
            pool.retain(|c| !exclude.contains(*c));
        }
        pool
    }
}

/// Generate a random password according to `config`.
///
/// # Errors
///
/// Returns [`CryptoError::PasswordGeneration`] if no character is left in
/// the pool (every class disabled, or everything excluded).
pub fn generate(config: &GeneratorConfig) -> Result<String, CryptoError> {
    let pool = config.pool();
    if pool.is_empty() {
        return Err(CryptoError::PasswordGeneration(
            "no characters available for password generation".to_string(),
        ));
    }

    let mut rng = OsRng;
    Ok((0..config.length)
        .map(|_| pool[rng.gen_range(0..pool.len())])
        .collect())
}

/// [`generate`], panicking on error.
///
/// # Panics
///
/// Panics if the character pool is empty.
#[must_use]
#[track_caller]
pub fn must_generate(config: &GeneratorConfig) -> String {
    match generate(config) {
        Ok(password) => password,
        Err(e) => panic!("{e}"),
    }
}
