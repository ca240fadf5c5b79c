// Copyright (c) 2026 Aura Core Developers. MIT License.
// See LICENSE for details.

//! # Aura Protocol — Transaction Codec
//!
//! The transaction codec and transaction-object lifecycle for the Aura
//! blockchain: structured parameters in, consensus-exact bytes out, and the
//! mirror path from node-issued bytes back to structured, mutable, signable
//! objects.
//!
//! ## Architecture
//!
//! - **tx** — The core: schema registry, field codec, binary framer, fee
//!   calculator, and the `TxObject` state machine.
//! - **encoding** — The prefixed base58-check string form every object
//!   travels in when humans are involved.
//! - **crypto** — Ed25519 keypairs. Nothing else; this crate does not roll
//!   its own primitives.
//! - **account** — The `Signer` capability and the in-memory account.
//! - **config** — Protocol constants. Consensus-critical; edit with care.
//!
//! ## What this crate does NOT do
//!
//! No consensus validation (balances, nonces, chain state), no network
//! transport, no contract compilation, no persistence. The codec guarantees
//! wire-format correctness, not economic validity.
//!
//! ## Concurrency
//!
//! Every codec and schema operation is pure, synchronous, and
//! allocation-only. The schema table is immutable after init and safe for
//! unsynchronized reads. A `TxObject` instance is single-writer; build and
//! sign independent transactions in parallel rather than sharing one.

pub mod account;
pub mod config;
pub mod crypto;
pub mod encoding;
pub mod tx;
