//! # The Id Type
//!
//! Wherever a transaction refers to an on-chain entity — an account, a name,
//! a commitment, an oracle, a contract, or a channel — it does so through a
//! tagged 33-byte reference: one kind byte followed by a 32-byte hash.
//!
//! The kind byte, the numeric tag and the human prefix (`ak_`, `nm_`, ...)
//! are a single fixed bijection; none of the three can be set independently.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::ID_HASH_LENGTH;
use crate::encoding;

/// Wire length of an encoded id: one tag byte plus the 32-byte hash.
pub const ID_LENGTH: usize = 1 + ID_HASH_LENGTH;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures while decoding an id.
#[derive(Debug, Error)]
pub enum IdError {
    /// The kind byte is outside the registered 1..=6 range.
    #[error("unknown id tag {0}, expected a value in 1..=6")]
    UnknownTag(u8),

    /// Fewer (or more) than the 33 required bytes.
    #[error("truncated id: expected exactly {ID_LENGTH} bytes, got {0}")]
    Truncated(usize),

    /// The human prefix maps to no id kind.
    #[error("'{0}' is not an id prefix")]
    UnknownPrefix(String),
}

// ---------------------------------------------------------------------------
// IdKind
// ---------------------------------------------------------------------------

/// The closed set of entities an id can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdKind {
    Account,
    Name,
    Commitment,
    Oracle,
    Contract,
    Channel,
}

impl IdKind {
    /// All kinds, in tag order.
    pub const ALL: [IdKind; 6] = [
        IdKind::Account,
        IdKind::Name,
        IdKind::Commitment,
        IdKind::Oracle,
        IdKind::Contract,
        IdKind::Channel,
    ];

    /// The numeric wire tag, always in 1..=6.
    pub fn tag(self) -> u8 {
        match self {
            IdKind::Account => 1,
            IdKind::Name => 2,
            IdKind::Commitment => 3,
            IdKind::Oracle => 4,
            IdKind::Contract => 5,
            IdKind::Channel => 6,
        }
    }

    /// Resolves a wire tag back to a kind.
    pub fn from_tag(tag: u8) -> Result<Self, IdError> {
        match tag {
            1 => Ok(IdKind::Account),
            2 => Ok(IdKind::Name),
            3 => Ok(IdKind::Commitment),
            4 => Ok(IdKind::Oracle),
            5 => Ok(IdKind::Contract),
            6 => Ok(IdKind::Channel),
            other => Err(IdError::UnknownTag(other)),
        }
    }

    /// The human prefix bound to this kind.
    pub fn prefix(self) -> &'static str {
        match self {
            IdKind::Account => encoding::PREFIX_ACCOUNT,
            IdKind::Name => encoding::PREFIX_NAME,
            IdKind::Commitment => encoding::PREFIX_COMMITMENT,
            IdKind::Oracle => encoding::PREFIX_ORACLE,
            IdKind::Contract => encoding::PREFIX_CONTRACT,
            IdKind::Channel => encoding::PREFIX_CHANNEL,
        }
    }

    /// Resolves a human prefix back to a kind.
    pub fn from_prefix(prefix: &str) -> Result<Self, IdError> {
        match prefix {
            "ak" => Ok(IdKind::Account),
            "nm" => Ok(IdKind::Name),
            "cm" => Ok(IdKind::Commitment),
            "ok" => Ok(IdKind::Oracle),
            "ct" => Ok(IdKind::Contract),
            "ch" => Ok(IdKind::Channel),
            other => Err(IdError::UnknownPrefix(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Id
// ---------------------------------------------------------------------------

/// A tagged 33-byte reference to an on-chain entity.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Id {
    kind: IdKind,
    hash: [u8; ID_HASH_LENGTH],
}

impl Id {
    /// Builds an id from a kind and a 32-byte hash.
    pub fn new(kind: IdKind, hash: [u8; ID_HASH_LENGTH]) -> Self {
        Self { kind, hash }
    }

    /// What kind of entity this id references.
    pub fn kind(&self) -> IdKind {
        self.kind
    }

    /// The raw 32-byte hash.
    pub fn hash(&self) -> &[u8; ID_HASH_LENGTH] {
        &self.hash
    }

    /// The human prefix for this id's kind.
    pub fn prefix(&self) -> &'static str {
        self.kind.prefix()
    }

    /// Wire form: kind tag byte followed by the hash.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(ID_LENGTH);
        out.push(self.kind.tag());
        out.extend_from_slice(&self.hash);
        out
    }

    /// Parses the 33-byte wire form.
    ///
    /// The tag byte is inspected first so that an unknown tag is reported as
    /// such even when the hash happens to be the right length.
    pub fn decode(bytes: &[u8]) -> Result<Self, IdError> {
        let &tag = bytes.first().ok_or(IdError::Truncated(0))?;
        let kind = IdKind::from_tag(tag)?;
        if bytes.len() != ID_LENGTH {
            return Err(IdError::Truncated(bytes.len()));
        }
        let mut hash = [0u8; ID_HASH_LENGTH];
        hash.copy_from_slice(&bytes[1..]);
        Ok(Self { kind, hash })
    }

    /// Parses the human string form (`ak_...`, `nm_...`, ...).
    pub fn from_encoded(data: &str) -> Result<Self, IdError> {
        let prefix =
            encoding::prefix_of(data).ok_or_else(|| IdError::UnknownPrefix(data.to_string()))?;
        let kind = IdKind::from_prefix(prefix)?;
        let payload = encoding::decode(data)
            .map_err(|_| IdError::UnknownPrefix(data.to_string()))?
            .1;
        if payload.len() != ID_HASH_LENGTH {
            return Err(IdError::Truncated(payload.len() + 1));
        }
        let mut hash = [0u8; ID_HASH_LENGTH];
        hash.copy_from_slice(&payload);
        Ok(Self { kind, hash })
    }

    /// Formats the human string form.
    pub fn to_encoded(&self) -> String {
        encoding::encode(self.kind.prefix(), &self.hash)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_encoded())
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.to_encoded())
    }
}

impl Serialize for Id {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_encoded())
        } else {
            serializer.serialize_bytes(&self.encode())
        }
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Id::from_encoded(&s).map_err(serde::de::Error::custom)
        } else {
            let bytes = <Vec<u8>>::deserialize(deserializer)?;
            Id::decode(&bytes).map_err(serde::de::Error::custom)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
