//! Cryptographic primitives backing the transaction codec.
//!
//! Only what signing a transaction requires lives here: Ed25519 keypairs,
//! public keys, and signatures. Hashing for the base58-check checksum is
//! handled inside the encoding layer.

pub mod keys;

pub use keys::{AuraKeypair, AuraPublicKey, AuraSignature, KeyError};
