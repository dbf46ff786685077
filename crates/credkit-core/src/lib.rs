//! `credkit-core` — password hashing, verification and generation.
//!
//! Pure library: no I/O, no logging, no global state. Randomness comes
//! from the OS CSPRNG only.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;

pub mod kdf;
pub mod phc;

pub mod hash;

pub mod password;

pub use error::CryptoError;
pub use hash::{hash, hash_to_string, must_verify, must_verify_str, verify, verify_str};
pub use kdf::{derive, generate_salt, Argon2idParams, DEFAULT_PARAMS, DEFAULT_SALT_LEN};
pub use password::generator::{generate, must_generate, GeneratorConfig, DEFAULT_LENGTH};
pub use password::policy::{check, CharacterClass, PolicyConfig, PolicyError};
pub use phc::{encode, EncodedHash, ALGORITHM_ID, VERSION_TAG};
