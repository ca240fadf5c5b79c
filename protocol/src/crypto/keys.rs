//! # Key Management
//!
//! Ed25519 keypair generation and serialization for Aura accounts.
//!
//! The raw 32-byte public key is the account: it is the hash carried inside
//! an `ak_` id and the key a node verifies transaction signatures against.
//! There is no separate address derivation step.
//!
//! Secret key material is never logged and never serialized implicitly —
//! exporting it requires an explicit `to_bytes()` call.

use ed25519_dalek::{
    Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey, SECRET_KEY_LENGTH,
};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::SIGNATURE_LENGTH;
use crate::encoding::{self, PREFIX_ACCOUNT};

/// Errors that can occur during key operations.
///
/// Deliberately vague about *why* something failed — error messages must not
/// leak information about key material.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid secret key bytes: wrong length or not a valid scalar")]
    InvalidSecretKey,

    #[error("invalid public key bytes: not a valid Ed25519 point")]
    InvalidPublicKey,

    #[error("invalid signature bytes: expected {SIGNATURE_LENGTH} bytes")]
    InvalidSignature,
}

// ---------------------------------------------------------------------------
// AuraKeypair
// ---------------------------------------------------------------------------

/// An Aura account keypair wrapping an Ed25519 signing key.
///
/// `AuraKeypair` intentionally does NOT implement `Serialize`/`Deserialize`.
/// Exporting a secret key is a deliberate act — use [`to_bytes`](Self::to_bytes)
/// explicitly.
pub struct AuraKeypair {
    signing_key: SigningKey,
}

impl AuraKeypair {
    /// Generates a fresh keypair from the OS cryptographic RNG.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        Self { signing_key }
    }

    /// Constructs a keypair deterministically from a 32-byte seed.
    ///
    /// In Ed25519 the 32-byte secret key *is* the seed, so this doubles as
    /// the from-raw-bytes constructor.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Reconstructs a keypair from a hex-encoded secret key.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str).map_err(|_| KeyError::InvalidSecretKey)?;
        if bytes.len() != SECRET_KEY_LENGTH {
            return Err(KeyError::InvalidSecretKey);
        }
        let mut seed = [0u8; SECRET_KEY_LENGTH];
        seed.copy_from_slice(&bytes);
        Ok(Self::from_seed(&seed))
    }

    /// Returns the public half of this keypair.
    pub fn public_key(&self) -> AuraPublicKey {
        AuraPublicKey {
            bytes: self.signing_key.verifying_key().to_bytes(),
        }
    }

    /// Returns the account address, `ak_` + base58check(public key).
    pub fn address(&self) -> String {
        self.public_key().to_address()
    }

    /// Signs a message. Ed25519 signing is deterministic: the same key and
    /// message always produce the same signature.
    pub fn sign(&self, message: &[u8]) -> AuraSignature {
        AuraSignature {
            bytes: self.signing_key.sign(message).to_bytes(),
        }
    }

    /// Verifies a signature against this keypair's public key.
    pub fn verify(&self, message: &[u8], signature: &AuraSignature) -> bool {
        self.public_key().verify(message, signature)
    }

    /// Exports the raw 32-byte secret key material. Handle with care.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }
}

impl Clone for AuraKeypair {
    fn clone(&self) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&self.signing_key.to_bytes()),
        }
    }
}

impl fmt::Debug for AuraKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secret key material, not even partially.
        write!(f, "AuraKeypair({})", self.address())
    }
}

impl PartialEq for AuraKeypair {
    fn eq(&self, other: &Self) -> bool {
        self.public_key() == other.public_key()
    }
}

impl Eq for AuraKeypair {}

// ---------------------------------------------------------------------------
// AuraPublicKey
// ---------------------------------------------------------------------------

/// The public half of an account keypair, safe to share.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuraPublicKey {
    bytes: [u8; 32],
}

impl AuraPublicKey {
    /// Wraps raw public key bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Validates and wraps a byte slice. Rejects wrong lengths and byte
    /// strings that are not valid Ed25519 points.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; 32] = slice.try_into().map_err(|_| KeyError::InvalidPublicKey)?;
        VerifyingKey::from_bytes(&bytes).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self { bytes })
    }

    /// Parses an `ak_`-prefixed account address.
    pub fn from_address(address: &str) -> Result<Self, KeyError> {
        let payload = encoding::decode_with_prefix(PREFIX_ACCOUNT, address)
            .map_err(|_| KeyError::InvalidPublicKey)?;
        Self::try_from_slice(&payload)
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Formats this key as an `ak_` account address.
    pub fn to_address(&self) -> String {
        encoding::encode(PREFIX_ACCOUNT, &self.bytes)
    }

    /// Verifies a signature against this public key.
    ///
    /// Returns a boolean rather than a `Result`: callers want a yes/no
    /// answer, and the failure mode carries no actionable detail.
    pub fn verify(&self, message: &[u8], signature: &AuraSignature) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.bytes) else {
            return false;
        };
        let dalek_sig = DalekSignature::from_bytes(&signature.bytes);
        verifying_key.verify(message, &dalek_sig).is_ok()
    }
}

impl fmt::Display for AuraPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_address())
    }
}

impl fmt::Debug for AuraPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuraPublicKey({})", self.to_address())
    }
}

// ---------------------------------------------------------------------------
// AuraSignature
// ---------------------------------------------------------------------------

/// An Ed25519 signature over a signing payload. Always exactly 64 bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct AuraSignature {
    bytes: [u8; 64],
}

impl Serialize for AuraSignature {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            serializer.serialize_bytes(&self.bytes)
        }
    }
}

impl<'de> Deserialize<'de> for AuraSignature {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            hex::decode(&s).map_err(serde::de::Error::custom)?
        } else {
            <Vec<u8>>::deserialize(deserializer)?
        };
        Self::try_from_slice(&bytes).map_err(serde::de::Error::custom)
    }
}

impl AuraSignature {
    /// Wraps a raw 64-byte signature.
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self { bytes }
    }

    /// Validates and wraps a byte slice.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; 64] = slice.try_into().map_err(|_| KeyError::InvalidSignature)?;
        Ok(Self { bytes })
    }

    /// Returns the raw signature bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Hex-encoded form, 128 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl fmt::Display for AuraSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for AuraSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = self.to_hex();
        write!(f, "AuraSignature({}...{})", &hex_str[..8], &hex_str[120..])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
