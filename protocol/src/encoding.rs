//! # Prefixed String Encoding
//!
//! The human-facing form of every binary object in the protocol is
//! `<prefix>_<base58check(payload)>`: a two-letter type prefix, an
//! underscore, and the base58-check encoding of the raw bytes. The prefix
//! makes a pasted string self-describing (`ak_` is an account, `tx_` a
//! serialized transaction, `cb_` contract bytecode), and the four-byte
//! double-SHA-256 checksum catches copy-paste corruption before any bytes
//! reach the codec.
//!
//! This module knows nothing about what the payload *means* — it converts
//! between strings and `(prefix, bytes)` pairs and nothing more.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Object prefixes
// ---------------------------------------------------------------------------

/// Serialized transaction.
pub const PREFIX_TRANSACTION: &str = "tx";

/// Account address (raw Ed25519 public key).
pub const PREFIX_ACCOUNT: &str = "ak";

/// AENS name.
pub const PREFIX_NAME: &str = "nm";

/// AENS pre-claim commitment hash.
pub const PREFIX_COMMITMENT: &str = "cm";

/// Oracle address.
pub const PREFIX_ORACLE: &str = "ok";

/// Oracle query id.
pub const PREFIX_ORACLE_QUERY: &str = "oq";

/// Contract address.
pub const PREFIX_CONTRACT: &str = "ct";

/// Contract bytecode / call data blob.
pub const PREFIX_CONTRACT_BYTEARRAY: &str = "cb";

/// State channel address.
pub const PREFIX_CHANNEL: &str = "ch";

/// Channel state hash.
pub const PREFIX_STATE: &str = "st";

/// Proof of inclusion.
pub const PREFIX_POI: &str = "pi";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while parsing a prefixed string.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// The string has no `_` separator, so no prefix can be extracted.
    #[error("'{0}' is missing the '<prefix>_' separator")]
    MissingPrefix(String),

    /// The base58-check payload failed to decode (bad alphabet or checksum).
    #[error("invalid base58check payload: {0}")]
    InvalidPayload(String),

    /// The decoded prefix is not the one the caller required.
    #[error("prefix '{got}' doesn't match expected prefix '{expected}'")]
    PrefixMismatch { expected: String, got: String },
}

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

/// Encodes raw bytes under the given object prefix.
pub fn encode(prefix: &str, payload: &[u8]) -> String {
    format!(
        "{}_{}",
        prefix,
        bs58::encode(payload).with_check().into_string()
    )
}

/// Decodes a prefixed string into its `(prefix, payload)` parts.
///
/// Validates the separator and the base58 checksum. The prefix is returned
/// as found; callers that require a specific prefix should use
/// [`decode_with_prefix`] instead.
pub fn decode(data: &str) -> Result<(String, Vec<u8>), EncodingError> {
    let (prefix, body) = data
        .split_once('_')
        .ok_or_else(|| EncodingError::MissingPrefix(data.to_string()))?;
    let payload = bs58::decode(body)
        .with_check(None)
        .into_vec()
        .map_err(|e| EncodingError::InvalidPayload(e.to_string()))?;
    Ok((prefix.to_string(), payload))
}

/// Decodes a prefixed string, requiring an exact prefix.
pub fn decode_with_prefix(expected: &str, data: &str) -> Result<Vec<u8>, EncodingError> {
    let (prefix, payload) = decode(data)?;
    if prefix != expected {
        return Err(EncodingError::PrefixMismatch {
            expected: expected.to_string(),
            got: prefix,
        });
    }
    Ok(payload)
}

/// Returns the prefix part of an encoded string without decoding the payload.
pub fn prefix_of(data: &str) -> Option<&str> {
    data.split_once('_').map(|(prefix, _)| prefix)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
