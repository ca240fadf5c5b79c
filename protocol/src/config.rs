//! # Protocol Constants
//!
//! Every protocol-level magic number used by the transaction codec lives
//! here. The values are consensus-critical: a node rejects any transaction
//! whose fee was computed against different gas constants, and a wallet that
//! disagrees on a TTL default produces bytes the network has never seen.

// ---------------------------------------------------------------------------
// Network Identifiers
// ---------------------------------------------------------------------------

/// Network id prepended to the record bytes when producing the signing
/// payload for mainnet transactions.
pub const NETWORK_ID_MAINNET: &str = "aura_mainnet";

/// Network id for the public testnet.
pub const NETWORK_ID_TESTNET: &str = "aura_uat";

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Ed25519 secret key length in bytes.
pub const SIGNING_KEY_LENGTH: usize = 32;

/// Ed25519 public key length in bytes. The raw public key doubles as the
/// on-chain account hash inside an `ak_` id.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 signature length. Signature list entries on the wire are exactly
/// this long; anything else is rejected before serialization.
pub const SIGNATURE_LENGTH: usize = 64;

/// Length of the hash carried inside an id (account, name, contract, ...).
pub const ID_HASH_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Fee & Gas
// ---------------------------------------------------------------------------

/// Base gas charged once per transaction, scaled by a per-kind multiplier.
pub const BASE_GAS: u64 = 15_000;

/// Gas charged per byte of the serialized transaction.
pub const GAS_PER_BYTE: u64 = 20;

/// Minimum gas price accepted by the network, in the smallest currency unit.
pub const MIN_GAS_PRICE: u64 = 1_000_000_000;

/// Target key-block interval in minutes. Feeds the oracle TTL gas formula.
pub const KEY_BLOCK_INTERVAL: u64 = 3;

/// Default gas limit for contract calls when the caller does not supply one.
pub const DEFAULT_GAS: u64 = 25_000;

// ---------------------------------------------------------------------------
// Transaction Defaults
// ---------------------------------------------------------------------------

/// Default transaction TTL. Zero means "no expiry" on the wire.
pub const TX_TTL: u64 = 0;

/// Default oracle query fee.
pub const QUERY_FEE: u64 = 30_000;

/// Default oracle TTL, expressed as a block-count delta.
pub const ORACLE_TTL_VALUE: u64 = 500;

/// Default oracle query TTL, expressed as a block-count delta.
pub const QUERY_TTL_VALUE: u64 = 10;

/// Default oracle response TTL, expressed as a block-count delta.
pub const RESPONSE_TTL_VALUE: u64 = 10;

/// Default name TTL for AENS update records, in key blocks.
pub const NAME_TTL: u64 = 180_000;

/// Default client-side name TTL hint for AENS pointers.
pub const CLIENT_TTL: u64 = 84_600;

// ---------------------------------------------------------------------------
// VM / ABI Versions
// ---------------------------------------------------------------------------

/// No VM — records that carry a VM slot but execute nothing.
pub const VM_NO_VM: u8 = 0;

/// Current FATE virtual machine generation.
pub const VM_FATE_2: u8 = 7;

/// No ABI.
pub const ABI_NO_ABI: u8 = 0;

/// FATE calling convention.
pub const ABI_FATE: u8 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_ids_are_distinct() {
        assert_ne!(NETWORK_ID_MAINNET, NETWORK_ID_TESTNET);
    }

    #[test]
    fn fee_constants_sanity() {
        assert!(BASE_GAS > 0);
        assert!(GAS_PER_BYTE > 0);
        assert!(MIN_GAS_PRICE > GAS_PER_BYTE);
    }

    #[test]
    fn crypto_parameter_sizes() {
        assert_eq!(SIGNING_KEY_LENGTH, 32);
        assert_eq!(PUBLIC_KEY_LENGTH, 32);
        assert_eq!(SIGNATURE_LENGTH, 64);
        assert_eq!(ID_HASH_LENGTH, 32);
    }
}
