//! Argon2id key derivation.
//!
//! This module provides:
//! - [`derive`] — compute an Argon2id digest from a password, salt and [`Argon2idParams`]
//! - [`generate_salt`] — draw a fresh salt from the OS CSPRNG
//! - [`Argon2idParams`] — the four tuning knobs, recorded in every encoded hash
//!
//! # Memory floor
//!
//! Argon2 needs at least 8 KiB per lane. When the supplied `m_cost` is
//! below `8 * p_cost` the derivation runs with `8 * p_cost` instead. The
//! supplied value is what gets encoded, and verification applies the same
//! floor, so the defaults (`m=2`, `p=4`) round-trip unchanged.

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::CryptoError;

/// Length of a generated salt in bytes (128 bits).
pub const DEFAULT_SALT_LEN: usize = 16;

/// Minimum memory per lane, in KiB (2 blocks per sync point, 4 sync points).
const MIN_KIB_PER_LANE: u32 = 8;

/// Default parameters: 2 KiB requested memory, 32768 iterations, 4 lanes, 32-byte digest.
pub const DEFAULT_PARAMS: Argon2idParams = Argon2idParams {
    m_cost: 2,
    t_cost: 32 * 1024,
    p_cost: 4,
    output_len: 32,
};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Argon2id parameter set.
///
/// Fields use the `argon2` crate convention:
/// - `m_cost`: memory in KiB
/// - `t_cost`: number of iterations
/// - `p_cost`: degree of parallelism (lanes)
/// - `output_len`: digest length in bytes
///
/// Every field must be non-zero to be usable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Argon2idParams {
    /// Memory cost in kibibytes.
    pub m_cost: u32,
    /// Number of iterations (time cost).
    pub t_cost: u32,
    /// Degree of parallelism.
    pub p_cost: u32,
    /// Digest length in bytes. Not stored in encoded hashes.
    pub output_len: usize,
}

impl Default for Argon2idParams {
    fn default() -> Self {
        DEFAULT_PARAMS
    }
}

impl Argon2idParams {
    /// Override the memory cost (KiB).
    #[must_use]
    pub const fn with_m_cost(mut self, m_cost: u32) -> Self {
        self.m_cost = m_cost;
        self
    }

    /// Override the iteration count.
    #[must_use]
    pub const fn with_t_cost(mut self, t_cost: u32) -> Self {
        self.t_cost = t_cost;
        self
    }

    /// Override the lane count.
    #[must_use]
    pub const fn with_p_cost(mut self, p_cost: u32) -> Self {
        self.p_cost = p_cost;
        self
    }

    /// Override the digest length.
    #[must_use]
    pub const fn with_output_len(mut self, output_len: usize) -> Self {
        self.output_len = output_len;
        self
    }

    /// Reject parameter sets containing a zero field.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidParameters`] naming the first zero field.
    pub fn validate(&self) -> Result<(), CryptoError> {
        let zero = if self.m_cost == 0 {
            Some("m_cost")
        } else if self.t_cost == 0 {
            Some("t_cost")
        } else if self.p_cost == 0 {
            Some("p_cost")
        } else if self.output_len == 0 {
            Some("output_len")
        } else {
            None
        };
        match zero {
            Some(field) => Err(CryptoError::InvalidParameters(format!(
                "{field} must be greater than 0"
            ))),
            None => Ok(()),
        }
    }

    /// Memory cost actually handed to Argon2 (see the module docs).
    #[must_use]
    pub const fn effective_m_cost(&self) -> u32 {
        let floor = self.p_cost.saturating_mul(MIN_KIB_PER_LANE);
        if self.m_cost < floor {
            floor
        } else {
            self.m_cost
        }
    }
}

// ---------------------------------------------------------------------------
// Core KDF
// ---------------------------------------------------------------------------

/// Compute the Argon2id (v0x13) digest of `password` under `salt` and `params`.
///
/// Any password length is accepted, including empty.
///
/// # Errors
///
/// - [`CryptoError::InvalidParameters`] if a field of `params` is zero
/// - [`CryptoError::KeyDerivation`] if Argon2 rejects the inputs, e.g. a salt
///   shorter than 8 bytes or an `output_len` below 4
pub fn derive(
    password: &[u8],
    salt: &[u8],
    params: &Argon2idParams,
) -> Result<Vec<u8>, CryptoError> {
    params.validate()?;

    let argon2_params = argon2::Params::new(
        params.effective_m_cost(),
        params.t_cost,
        params.p_cost,
        Some(params.output_len),
    )
    .map_err(|e| CryptoError::KeyDerivation(format!("invalid argon2 params: {e}")))?;

    let argon2 = argon2::Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        argon2_params,
    );

    let mut output = vec![0u8; params.output_len];
    argon2
        .hash_password_into(password, salt, &mut output)
        .map_err(|e| CryptoError::KeyDerivation(format!("argon2id derivation failed: {e}")))?;
    Ok(output)
}

/// Draw a fresh [`DEFAULT_SALT_LEN`]-byte salt from the OS CSPRNG.
///
/// # Errors
///
/// Returns [`CryptoError::RandomSource`] if the OS entropy source fails.
/// There is no fallback generator.
pub fn generate_salt() -> Result<[u8; DEFAULT_SALT_LEN], CryptoError> {
    let mut salt = [0u8; DEFAULT_SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| CryptoError::RandomSource(e.to_string()))?;
    Ok(salt)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
