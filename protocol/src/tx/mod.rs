//! # Transaction Module
//!
//! The transaction codec: schema registry, field codec, binary framer, fee
//! calculator, and the mutable transaction object that composes them.
//!
//! ## Architecture
//!
//! ```text
//! schema.rs  — (kind, version) ⇄ ordered field lists ⇄ object tags
//! fields.rs  — per-type validate/encode/decode over the Value enum
//! framing.rs — [tag, version, field…] record assembly and parsing
//! id.rs      — the tagged 33-byte reference type
//! fee.rs     — base/other gas formulas and the minimum fee
//! object.rs  — TxObject: build, parse, mutate, sign
//! error.rs   — the failure taxonomy
//! ```
//!
//! ## Flow
//!
//! Building: params → schema resolution → field validation/encoding →
//! framing → sealed object. Parsing is the mirror: bytes → header → schema
//! → field decoding → populated object. Both directions are pure and
//! deterministic; the registry is `&'static` and lock-free.

pub mod error;
pub mod fee;
pub mod fields;
pub mod framing;
pub mod id;
pub mod object;
pub mod schema;

pub use error::TxError;
pub use fee::{base_gas, min_fee, other_gas, FeeContext};
pub use fields::{CallReturnType, CtVersion, Pointer, Value};
pub use id::{Id, IdKind};
pub use object::{TxObject, TxState};
pub use schema::{resolve_for_build, resolve_for_parse, FieldType, SchemaEntry, TxKind};
