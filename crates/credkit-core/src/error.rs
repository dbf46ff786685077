//! Error types for `credkit-core`.

use thiserror::Error;

/// Errors produced by hashing, verification and password generation.
///
/// A wrong password is never an error: [`crate::verify`] reports it as
/// `Ok(false)`.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The OS random source failed while generating a salt or password.
    #[error("random source failure: {0}")]
    RandomSource(String),

    /// The Argon2id primitive rejected its inputs (short salt, output length, memory).
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// The input is not an encoded hash at all (missing prefix, wrong field count).
    #[error("malformed hash: {0}")]
    MalformedHash(String),

    /// Algorithm tag other than `argon2id`.
    #[error("unsupported algorithm: expected argon2id, got {0:?}")]
    UnsupportedAlgorithm(String),

    /// Version tag other than `v=19`.
    #[error("unsupported version: expected v=19, got {0:?}")]
    UnsupportedVersion(String),

    /// Parameter block is not `m=<uint>,t=<uint>,p=<uint>`.
    #[error("malformed parameters: {0}")]
    MalformedParameters(String),

    /// A cost parameter is zero.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Salt or digest field is not valid unpadded standard base64.
    #[error("invalid base64 in {field} field")]
    InvalidEncoding {
        /// Which field failed to decode (`"salt"` or `"digest"`).
        field: &'static str,
    },

    /// Salt field decoded to zero bytes.
    #[error("invalid salt: cannot be empty")]
    EmptySalt,

    /// Digest field decoded to zero bytes.
    #[error("invalid digest: cannot be empty")]
    EmptyDigest,

    /// Password generation could not proceed (empty character pool).
    #[error("password generation error: {0}")]
    PasswordGeneration(String),
}

impl CryptoError {
    /// Whether this error means the stored credential string itself is bad.
    ///
    /// Callers present these as a corrupted credential record rather than
    /// as an authentication failure.
    #[must_use]
    pub const fn is_corrupted_record(&self) -> bool {
        matches!(
            self,
            Self::MalformedHash(_)
                | Self::UnsupportedAlgorithm(_)
                | Self::UnsupportedVersion(_)
                | Self::MalformedParameters(_)
                | Self::InvalidParameters(_)
                | Self::InvalidEncoding { .. }
                | Self::EmptySalt
                | Self::EmptyDigest
        )
    }
}
