//! Self-describing encoded hash strings.
//!
//! ```text
//! $argon2id$v=19$m=<m_cost>,t=<t_cost>,p=<p_cost>$<salt>$<digest>
//! ```
//!
//! Salt and digest use standard base64 without padding. The digest length
//! is not stored; decoding infers `output_len` from the decoded digest.

use std::fmt;
use std::str::FromStr;

use data_encoding::BASE64_NOPAD;

use crate::error::CryptoError;
use crate::kdf::Argon2idParams;

/// Algorithm identifier (field 1).
pub const ALGORITHM_ID: &str = "argon2id";

/// Argon2 version tag (field 2). `19` is version 0x13.
pub const VERSION_TAG: &str = "v=19";

/// Number of `$`-separated fields, counting the empty one before the leading `$`.
const FIELD_COUNT: usize = 6;

/// Format `salt`, `digest` and the cost parameters of `params` as an encoded hash.
///
/// `params.output_len` is not part of the format.
#[must_use]
pub fn encode(salt: &[u8], digest: &[u8], params: &Argon2idParams) -> String {
    format!(
        "${ALGORITHM_ID}${VERSION_TAG}$m={},t={},p={}${}${}",
        params.m_cost,
        params.t_cost,
        params.p_cost,
        BASE64_NOPAD.encode(salt),
        BASE64_NOPAD.encode(digest),
    )
}

/// A decoded hash string: parameters, salt and stored digest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedHash {
    params: Argon2idParams,
    salt: Vec<u8>,
    digest: Vec<u8>,
}

impl EncodedHash {
    /// Bundle a salt and digest with the parameters that produced them.
    ///
    /// `params.output_len` is replaced by `digest.len()`.
    #[must_use]
    pub fn new(salt: Vec<u8>, digest: Vec<u8>, params: &Argon2idParams) -> Self {
        let params = params.with_output_len(digest.len());
        Self {
            params,
            salt,
            digest,
        }
    }

    /// Parse an encoded hash string.
    ///
    /// Each stage fails with its own error kind; the first failure wins.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::MalformedHash`] — empty, no leading `$`, or not 6 fields
    /// - [`CryptoError::UnsupportedAlgorithm`] / [`CryptoError::UnsupportedVersion`]
    /// - [`CryptoError::MalformedParameters`] — cost block not `m=..,t=..,p=..`
    /// - [`CryptoError::InvalidParameters`] — a cost value is zero
    /// - [`CryptoError::InvalidEncoding`] — salt or digest is not unpadded base64
    /// - [`CryptoError::EmptySalt`] / [`CryptoError::EmptyDigest`]
    pub fn parse(encoded: &str) -> Result<Self, CryptoError> {
        if !encoded.starts_with('$') {
            return Err(CryptoError::MalformedHash(
                "must start with `$`".to_string(),
            ));
        }

        let fields: Vec<&str> = encoded.split('$').collect();
        let &[_, algorithm, version, costs, salt, digest] = fields.as_slice() else {
            return Err(CryptoError::MalformedHash(format!(
                "expected {FIELD_COUNT} fields, got {}",
                fields.len()
            )));
        };

        if algorithm != ALGORITHM_ID {
            return Err(CryptoError::UnsupportedAlgorithm(algorithm.to_string()));
        }
        if version != VERSION_TAG {
            return Err(CryptoError::UnsupportedVersion(version.to_string()));
        }

        let (m_cost, t_cost, p_cost) = parse_costs(costs)?;
        if m_cost == 0 || t_cost == 0 || p_cost == 0 {
            return Err(CryptoError::InvalidParameters(
                "m, t and p must be greater than 0".to_string(),
            ));
        }

        let salt = decode_field(salt, "salt")?;
        if salt.is_empty() {
            return Err(CryptoError::EmptySalt);
        }
        let digest = decode_field(digest, "digest")?;
        if digest.is_empty() {
            return Err(CryptoError::EmptyDigest);
        }

        let params = Argon2idParams {
            m_cost,
            t_cost,
            p_cost,
            output_len: digest.len(),
        };
        Ok(Self {
            params,
            salt,
            digest,
        })
    }

    /// Parameters, with `output_len` equal to the digest length.
    #[must_use]
    pub const fn params(&self) -> &Argon2idParams {
        &self.params
    }

    /// Decoded salt bytes.
    #[must_use]
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// Decoded digest bytes.
    #[must_use]
    pub fn digest(&self) -> &[u8] {
        &self.digest
    }
}

impl fmt::Display for EncodedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(&self.salt, &self.digest, &self.params))
    }
}

impl FromStr for EncodedHash {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parse `m=<uint>,t=<uint>,p=<uint>`, in that order and nothing else.
fn parse_costs(block: &str) -> Result<(u32, u32, u32), CryptoError> {
    let mut parts = block.split(',');
    let m_cost = parse_cost(parts.next(), "m=", block)?;
    let t_cost = parse_cost(parts.next(), "t=", block)?;
    let p_cost = parse_cost(parts.next(), "p=", block)?;
    if parts.next().is_some() {
        return Err(malformed_costs(block));
    }
    Ok((m_cost, t_cost, p_cost))
}

fn parse_cost(part: Option<&str>, key: &str, block: &str) -> Result<u32, CryptoError> {
    let digits = part
        .and_then(|p| p.strip_prefix(key))
        .ok_or_else(|| malformed_costs(block))?;
    // `u32::from_str` would also take a leading `+`.
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed_costs(block));
    }
    digits.parse().map_err(|_| malformed_costs(block))
}

fn malformed_costs(block: &str) -> CryptoError {
    CryptoError::MalformedParameters(format!("expected m=<uint>,t=<uint>,p=<uint>, got {block:?}"))
}

fn decode_field(field: &str, name: &'static str) -> Result<Vec<u8>, CryptoError> {
    BASE64_NOPAD
        .decode(field.as_bytes())
        .map_err(|_| CryptoError::InvalidEncoding { field: name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kdf::DEFAULT_PARAMS;

    const WELL_FORMED: &str = "$argon2id$v=19$m=2,t=32768,p=4$c2FsdA$aGFzaA";

    fn parse_err(s: &str) -> CryptoError {
        EncodedHash::parse(s).expect_err("parse should fail")
    }

    #[test]
    fn encode_layout_is_exact() {
        let encoded = encode(b"0123456789abcdef", &[0u8; 32], &DEFAULT_PARAMS);
        let fields: Vec<&str> = encoded.split('$').collect();
        assert_eq!(fields.len(), 6);
        assert_eq!(fields[0], "");
        assert_eq!(fields[1], "argon2id");
        assert_eq!(fields[2], "v=19");
        assert!(fields[3].starts_with("m=2,t=32768,p=4"));
        assert_eq!(fields[4], "MDEyMzQ1Njc4OWFiY2RlZg");
        assert_eq!(fields[5], "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA");
        assert!(!fields[4].contains('=') && !fields[5].contains('='));
    }

    #[test]
    fn parse_well_formed() {
        let parsed = EncodedHash::parse(WELL_FORMED).unwrap();
        assert_eq!(parsed.salt(), b"salt");
        assert_eq!(parsed.digest(), b"hash");
        assert_eq!(parsed.params().m_cost, 2);
        assert_eq!(parsed.params().t_cost, 32_768);
        assert_eq!(parsed.params().p_cost, 4);
        assert_eq!(parsed.params().output_len, 4);
    }

    #[test]
    fn display_reproduces_input() {
        let parsed: EncodedHash = WELL_FORMED.parse().unwrap();
        assert_eq!(parsed.to_string(), WELL_FORMED);
    }

    #[test]
    fn new_takes_output_len_from_digest() {
        let hash = EncodedHash::new(b"somesalt".to_vec(), vec![7u8; 48], &DEFAULT_PARAMS);
        assert_eq!(hash.params().output_len, 48);
        assert_eq!(hash.params().m_cost, DEFAULT_PARAMS.m_cost);
    }

    #[test]
    fn rejects_empty_string() {
        assert!(matches!(parse_err(""), CryptoError::MalformedHash(_)));
    }

    #[test]
    fn rejects_missing_prefix() {
        let err = parse_err("argon2id$v=19$m=2,t=32768,p=4$c2FsdA$aGFzaA");
        assert!(matches!(err, CryptoError::MalformedHash(_)));
    }

    #[test]
    fn rejects_wrong_field_count() {
        let err = parse_err("$argon2id$v=19$m=2,t=32768,p=4$c2FsdA");
        assert!(matches!(err, CryptoError::MalformedHash(ref m) if m.contains("got 5")));
        let err = parse_err("$argon2id$v=19$m=2,t=32768,p=4$c2FsdA$aGFzaA$extra");
        assert!(matches!(err, CryptoError::MalformedHash(ref m) if m.contains("got 7")));
    }

    #[test]
    fn rejects_other_algorithms() {
        let err = parse_err("$argon2i$v=19$m=2,t=32768,p=4$c2FsdA$aGFzaA");
        assert!(matches!(err, CryptoError::UnsupportedAlgorithm(ref a) if a == "argon2i"));
    }

    #[test]
    fn rejects_other_versions() {
        let err = parse_err("$argon2id$v=20$m=2,t=32768,p=4$c2FsdA$aGFzaA");
        assert!(matches!(err, CryptoError::UnsupportedVersion(ref v) if v == "v=20"));
    }

    #[test]
    fn rejects_zero_costs() {
        for costs in ["m=0,t=1,p=1", "m=1,t=0,p=1", "m=1,t=1,p=0"] {
            let err = parse_err(&format!("$argon2id$v=19${costs}$c2FsdA$aGFzaA"));
            assert!(matches!(err, CryptoError::InvalidParameters(_)), "{costs}: {err}");
        }
    }

    #[test]
    fn rejects_malformed_cost_blocks() {
        for costs in [
            "",
            "m=1,t=1",
            "t=1,m=1,p=1",
            "m=1,t=1,p=1,k=2",
            "m=+1,t=1,p=1",
            "m=-1,t=1,p=1",
            "m=,t=1,p=1",
            "m=1 ,t=1,p=1",
            "m=4294967296,t=1,p=1",
            "M=1,T=1,P=1",
        ] {
            let err = parse_err(&format!("$argon2id$v=19${costs}$c2FsdA$aGFzaA"));
            assert!(matches!(err, CryptoError::MalformedParameters(_)), "{costs:?}: {err}");
        }
    }

    #[test]
    fn rejects_empty_salt() {
        let err = parse_err("$argon2id$v=19$m=2,t=32768,p=4$$aGFzaA");
        assert!(matches!(err, CryptoError::EmptySalt));
    }

    #[test]
    fn rejects_empty_digest() {
        let err = parse_err("$argon2id$v=19$m=2,t=32768,p=4$c2FsdA$");
        assert!(matches!(err, CryptoError::EmptyDigest));
    }

    #[test]
    fn rejects_invalid_base64() {
        let err = parse_err("$argon2id$v=19$m=2,t=32768,p=4$c2Fs!A$aGFzaA");
        assert!(matches!(err, CryptoError::InvalidEncoding { field: "salt" }));
        let err = parse_err("$argon2id$v=19$m=2,t=32768,p=4$c2FsdA$aGFzaA==");
        assert!(matches!(err, CryptoError::InvalidEncoding { field: "digest" }));
    }

    #[test]
    fn algorithm_checked_before_costs() {
        let err = parse_err("$scrypt$v=19$garbage$$");
        assert!(matches!(err, CryptoError::UnsupportedAlgorithm(_)));
    }
}
