//! Password generation and strength policy.
//!
//! - [`generator`] — random passwords from configurable character classes
//! - [`policy`] — length and character-class requirements for user-chosen passwords
//!
//! Both share the same class definitions: ASCII letters, ASCII digits, and
//! the [`SYMBOLS`] set for generation.

pub mod generator;
pub mod policy;

/// Uppercase ASCII letters.
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Lowercase ASCII letters.
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";

/// ASCII digits.
pub const DIGITS: &str = "0123456789";

/// Symbols drawn from when generating passwords with specials enabled.
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";
