//! Password hashing and verification entry points.
//!
//! - [`hash`] — raw digest, optional salt and params
//! - [`hash_to_string`] — digest plus encoding; what callers store
//! - [`verify`] — parse a stored hash and check a candidate password
//! - [`must_verify`] — aborting wrapper for inputs already known to be well-formed

use zeroize::Zeroizing;

use crate::error::CryptoError;
use crate::kdf::{derive, generate_salt, Argon2idParams, DEFAULT_PARAMS};
use crate::phc::{encode, EncodedHash};

/// Constant-time byte comparison for digests.
///
/// The length check short-circuits: digest length is public, it is part of
/// the stored hash.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

/// Hash `password`, returning only the digest.
///
/// `salt` defaults to a fresh 16-byte random salt and `params` to
/// [`DEFAULT_PARAMS`]. With a random salt the digest cannot be reproduced;
/// use [`hash_to_string`] to keep the salt.
///
/// # Errors
///
/// - [`CryptoError::RandomSource`] if a salt had to be generated and the OS source failed
/// - [`CryptoError::InvalidParameters`] / [`CryptoError::KeyDerivation`] from [`derive`]
pub fn hash(
    password: &[u8],
    salt: Option<&[u8]>,
    params: Option<&Argon2idParams>,
) -> Result<Vec<u8>, CryptoError> {
    let params = params.unwrap_or(&DEFAULT_PARAMS);
    match salt {
        Some(salt) => derive(password, salt, params),
        None => derive(password, &generate_salt()?, params),
    }
}

/// Hash `password` and encode salt, parameters and digest as one string.
///
/// Defaults are the same as for [`hash`].
///
/// # Errors
///
/// Same as [`hash`].
pub fn hash_to_string(
    password: &[u8],
    salt: Option<&[u8]>,
    params: Option<&Argon2idParams>,
) -> Result<String, CryptoError> {
    let params = params.unwrap_or(&DEFAULT_PARAMS);
    let generated;
    let salt = match salt {
        Some(salt) => salt,
        None => {
            generated = generate_salt()?;
            &generated[..]
        }
    };
    let digest = derive(password, salt, params)?;
    Ok(encode(salt, &digest, params))
}

/// Check `password` against an encoded hash.
///
/// The digest is recomputed with the salt and cost parameters stored in
/// `encoded`; the digest length is taken from the stored digest.
///
/// Returns `Ok(false)` for a wrong password. Errors are reserved for
/// malformed input and primitive failures.
///
/// # Errors
///
/// Any parse error from [`EncodedHash::parse`], or
/// [`CryptoError::KeyDerivation`] if Argon2 rejects the stored salt or
/// digest length.
pub fn verify(encoded: &str, password: &[u8]) -> Result<bool, CryptoError> {
    let stored = EncodedHash::parse(encoded)?;
    let computed = Zeroizing::new(derive(password, stored.salt(), stored.params())?);
    Ok(constant_time_eq(&computed, stored.digest()))
}

/// [`verify`] for a UTF-8 password.
///
/// # Errors
///
/// Same as [`verify`].
pub fn verify_str(encoded: &str, password: &str) -> Result<bool, CryptoError> {
    verify(encoded, password.as_bytes())
}

/// [`verify`], panicking on any error.
///
/// # Panics
///
/// Panics if `encoded` is malformed or the derivation fails.
#[must_use]
#[track_caller]
pub fn must_verify(encoded: &str, password: &[u8]) -> bool {
    match verify(encoded, password) {
        Ok(matched) => matched,
        Err(e) => panic!("password hash verification failed: {e}"),
    }
}

/// [`must_verify`] for a UTF-8 password.
///
/// # Panics
///
/// Same as [`must_verify`].
#[must_use]
#[track_caller]
pub fn must_verify_str(encoded: &str, password: &str) -> bool {
    must_verify(encoded, password.as_bytes())
}
