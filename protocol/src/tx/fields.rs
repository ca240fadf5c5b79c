//! # Field Codec
//!
//! One validate/encode/decode rule per [`FieldType`]. Dispatch is a match
//! over the closed enum — the type set is fixed by protocol, so there is no
//! open-ended trait object anywhere in the hot path.
//!
//! Params hold [`Value`]s. Integers are `i128` so that a negative input can
//! be *reported* as negative rather than failing an unsigned conversion
//! somewhere upstream; the wire form is the minimal big-endian byte string
//! (zero encodes as the empty string). Prefix-constrained binaries keep
//! their human-encoded form (`cb_...`) in params and their raw payload on
//! the wire.

use rlp::{DecoderError, Rlp, RlpStream};
use serde::{Deserialize, Serialize};

use crate::config::SIGNATURE_LENGTH;
use crate::encoding;

use super::error::{FieldValidationError, TxError, ValidationReason};
use super::id::Id;
use super::schema::{FieldDef, FieldType, PrefixRule};

// ---------------------------------------------------------------------------
// Auxiliary field value types
// ---------------------------------------------------------------------------

/// An AENS resolution pointer: a well-known key mapped to an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pointer {
    /// Pointer key, e.g. `account_pubkey`.
    pub key: String,
    /// The id the name resolves to under this key.
    pub id: Id,
}

/// VM and ABI version pair of a contract, packed into three wire bytes
/// `[vm, 0, abi]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CtVersion {
    pub vm_version: u8,
    pub abi_version: u8,
}

/// Outcome discriminant of a contract call result record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallReturnType {
    Ok,
    Error,
    Revert,
}

impl CallReturnType {
    fn to_byte(self) -> u8 {
        match self {
            CallReturnType::Ok => 0,
            CallReturnType::Error => 1,
            CallReturnType::Revert => 2,
        }
    }

    fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(CallReturnType::Ok),
            1 => Some(CallReturnType::Error),
            2 => Some(CallReturnType::Revert),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// A decoded field value.
///
/// The variant a field expects is determined by its [`FieldType`];
/// [`validate`] rejects mismatches before any bytes are produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// `int` / `amount` / TTL counters. Negative values never reach the
    /// wire — they exist only to be rejected with a precise diagnostic.
    Int(i128),
    /// UTF-8 string, or the human-encoded form of a prefixed binary
    /// (`cb_...`), or a hex string for `hex` fields.
    String(String),
    /// Raw opaque bytes (`rawBinary`, `payload`, unprefixed `binary`,
    /// `stateTree`).
    Bytes(Vec<u8>),
    Bool(bool),
    Id(Id),
    Ids(Vec<Id>),
    /// Ordered, duplicate-permitted signature list.
    Signatures(Vec<Vec<u8>>),
    Pointers(Vec<Pointer>),
    CtVersion(CtVersion),
    CallReturnType(CallReturnType),
    /// A complete nested framed record (`rlpBinary`), e.g. the inner
    /// transaction of a signed or paying-for wrapper.
    Rlp(Vec<u8>),
    /// A list of complete nested framed records (`rlpBinaries`).
    RlpList(Vec<Vec<u8>>),
    /// One opaque raw item, header included (`sophiaCodeTypeInfo`).
    Raw(Vec<u8>),
    /// A list of opaque raw items (`mptrees`).
    RawList(Vec<Vec<u8>>),
    /// A list of non-negative integers (`callStack`).
    IntList(Vec<i128>),
}

impl Value {
    /// Convenience constructor for unsigned integers.
    pub fn int(v: u64) -> Self {
        Value::Int(v as i128)
    }

    pub fn as_int(&self) -> Option<i128> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_rlp(&self) -> Option<&[u8]> {
        match self {
            Value::Rlp(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_signatures(&self) -> Option<&[Vec<u8>]> {
        match self {
            Value::Signatures(s) => Some(s),
            _ => None,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Bool(_) => "bool",
            Value::Id(_) => "id",
            Value::Ids(_) => "ids",
            Value::Signatures(_) => "signatures",
            Value::Pointers(_) => "pointers",
            Value::CtVersion(_) => "ctVersion",
            Value::CallReturnType(_) => "callReturnType",
            Value::Rlp(_) => "rlpBinary",
            Value::RlpList(_) => "rlpBinaries",
            Value::Raw(_) => "raw",
            Value::RawList(_) => "raw list",
            Value::IntList(_) => "int list",
        }
    }
}

impl From<Id> for Value {
    fn from(id: Id) -> Self {
        Value::Id(id)
    }
}

// ---------------------------------------------------------------------------
// Integer wire helpers
// ---------------------------------------------------------------------------

/// Minimal big-endian byte string of a non-negative integer; zero is empty.
pub(crate) fn uint_bytes(v: u128) -> Vec<u8> {
    let bytes = v.to_be_bytes();
    let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    bytes[first..].to_vec()
}

/// Inverse of [`uint_bytes`]. Rejects non-minimal encodings and values
/// wider than 128 bits.
pub(crate) fn uint_from_bytes(data: &[u8]) -> Result<i128, DecoderError> {
    if data.len() > 16 {
        return Err(DecoderError::Custom("integer wider than 128 bits"));
    }
    if data.first() == Some(&0) {
        return Err(DecoderError::Custom("non-minimal integer encoding"));
    }
    let mut v: u128 = 0;
    for &byte in data {
        v = (v << 8) | byte as u128;
    }
    i128::try_from(v).map_err(|_| DecoderError::Custom("integer overflows the supported range"))
}

fn err(field: &FieldDef, reason: ValidationReason) -> FieldValidationError {
    FieldValidationError {
        field: field.name.to_string(),
        field_type: field.field_type,
        reason,
    }
}

fn wrong_type(field: &FieldDef, expected: &'static str) -> FieldValidationError {
    err(field, ValidationReason::WrongType { expected })
}

fn wrong_shape(field: &FieldDef, message: impl Into<String>) -> FieldValidationError {
    err(field, ValidationReason::WrongShape(message.into()))
}

fn check_prefix(field: &FieldDef, prefix: &str) -> Result<(), FieldValidationError> {
    if field.prefix.allows(prefix) {
        Ok(())
    } else {
        Err(err(
            field,
            ValidationReason::PrefixMismatch {
                expected: field.prefix.describe(),
                got: prefix.to_string(),
            },
        ))
    }
}

/// The prefix a decoded binary field is re-encoded under: the first (and for
/// single-prefix rules, only) allowed prefix.
fn display_prefix(rule: &PrefixRule) -> Option<&'static str> {
    match rule {
        PrefixRule::None => None,
        PrefixRule::One(p) => Some(p),
        PrefixRule::Any(ps) => ps.first().copied(),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Checks a value against a field's type and prefix constraint.
///
/// Runs before any bytes are produced; a failed build leaves nothing behind.
pub fn validate(field: &FieldDef, value: &Value) -> Result<(), FieldValidationError> {
    match field.field_type {
        FieldType::Int | FieldType::Amount => match value {
            Value::Int(v) if *v >= 0 => Ok(()),
            Value::Int(_) => Err(err(field, ValidationReason::NegativeValue)),
            _ => Err(wrong_type(field, "non-negative integer")),
        },
        FieldType::Id => match value {
            Value::Id(id) => check_prefix(field, id.prefix()),
            _ => Err(wrong_type(field, "id")),
        },
        FieldType::Ids => match value {
            Value::Ids(ids) => {
                for id in ids {
                    check_prefix(field, id.prefix())?;
                }
                Ok(())
            }
            _ => Err(wrong_type(field, "list of ids")),
        },
        FieldType::String => match value {
            Value::String(_) => Ok(()),
            _ => Err(wrong_type(field, "string")),
        },
        FieldType::Binary => match (&field.prefix, value) {
            (PrefixRule::None, Value::Bytes(_)) => Ok(()),
            (PrefixRule::None, _) => Err(wrong_type(field, "bytes")),
            (_, Value::String(s)) => {
                let prefix = encoding::prefix_of(s)
                    .ok_or_else(|| wrong_shape(field, format!("'{s}' has no prefix")))?;
                check_prefix(field, prefix)
            }
            _ => Err(wrong_type(field, "prefixed string")),
        },
        FieldType::RawBinary | FieldType::Payload | FieldType::StateTree => match value {
            Value::Bytes(_) => Ok(()),
            _ => Err(wrong_type(field, "bytes")),
        },
        FieldType::RlpBinary => match value {
            Value::Rlp(_) => Ok(()),
            _ => Err(wrong_type(field, "nested record")),
        },
        FieldType::RlpBinaries => match value {
            Value::RlpList(_) => Ok(()),
            _ => Err(wrong_type(field, "list of nested records")),
        },
        FieldType::Bool => match value {
            Value::Bool(_) => Ok(()),
            _ => Err(wrong_type(field, "bool")),
        },
        FieldType::Hex => match value {
            Value::String(s) if s.len() % 2 == 0 && s.bytes().all(|b| b.is_ascii_hexdigit()) => {
                Ok(())
            }
            Value::String(s) => Err(wrong_shape(field, format!("'{s}' is not a hex string"))),
            _ => Err(wrong_type(field, "hex string")),
        },
        FieldType::Signatures => match value {
            Value::Signatures(sigs) => {
                for sig in sigs {
                    if sig.len() != SIGNATURE_LENGTH {
                        return Err(wrong_shape(
                            field,
                            format!(
                                "signature must be {SIGNATURE_LENGTH} bytes, got {}",
                                sig.len()
                            ),
                        ));
                    }
                }
                Ok(())
            }
            _ => Err(wrong_type(field, "list of signatures")),
        },
        FieldType::Pointers => match value {
            Value::Pointers(_) => Ok(()),
            _ => Err(wrong_shape(
                field,
                format!(
                    "value must be a list of {{key, id}} pointers, got {}",
                    value.type_name()
                ),
            )),
        },
        FieldType::CallStack => match value {
            Value::IntList(vs) => {
                if vs.iter().any(|v| *v < 0) {
                    Err(err(field, ValidationReason::NegativeValue))
                } else {
                    Ok(())
                }
            }
            _ => Err(wrong_type(field, "list of non-negative integers")),
        },
        FieldType::Mptrees => match value {
            Value::RawList(_) => Ok(()),
            _ => Err(wrong_type(field, "list of merkle subtrees")),
        },
        FieldType::CallReturnType => match value {
            Value::CallReturnType(_) => Ok(()),
            _ => Err(wrong_type(field, "call return type")),
        },
        FieldType::CtVersion => match value {
            Value::CtVersion(_) => Ok(()),
            _ => Err(wrong_shape(
                field,
                "value must carry vmVersion and abiVersion",
            )),
        },
        FieldType::SophiaCodeTypeInfo => match value {
            Value::Raw(_) => Ok(()),
            _ => Err(wrong_type(field, "type info blob")),
        },
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Appends one validated field value to the record stream.
pub fn encode(field: &FieldDef, value: &Value, stream: &mut RlpStream) -> Result<(), TxError> {
    validate(field, value)?;
    match (field.field_type, value) {
        (FieldType::Int | FieldType::Amount, Value::Int(v)) => {
            stream.append(&uint_bytes(*v as u128));
        }
        (FieldType::Id, Value::Id(id)) => {
            stream.append(&id.encode());
        }
        (FieldType::Ids, Value::Ids(ids)) => {
            stream.begin_list(ids.len());
            for id in ids {
                stream.append(&id.encode());
            }
        }
        (FieldType::String, Value::String(s)) => {
            stream.append(&s.as_bytes().to_vec());
        }
        (FieldType::Binary, Value::String(s)) => {
            let (_, payload) = encoding::decode(s)
                .map_err(|e| wrong_shape(field, e.to_string()))?;
            stream.append(&payload);
        }
        (
            FieldType::Binary | FieldType::RawBinary | FieldType::Payload | FieldType::StateTree,
            Value::Bytes(bytes),
        ) => {
            stream.append(bytes);
        }
        (FieldType::RlpBinary, Value::Rlp(bytes)) => {
            stream.append(bytes);
        }
        (FieldType::RlpBinaries, Value::RlpList(items)) => {
            stream.begin_list(items.len());
            for item in items {
                stream.append(item);
            }
        }
        (FieldType::Bool, Value::Bool(b)) => {
            stream.append(&vec![u8::from(*b)]);
        }
        (FieldType::Hex, Value::String(s)) => {
            let bytes = hex::decode(s).map_err(|e| wrong_shape(field, e.to_string()))?;
            stream.append(&bytes);
        }
        (FieldType::Signatures, Value::Signatures(sigs)) => {
            stream.begin_list(sigs.len());
            for sig in sigs {
                stream.append(sig);
            }
        }
        (FieldType::Pointers, Value::Pointers(pointers)) => {
            stream.begin_list(pointers.len());
            for pointer in pointers {
                stream.begin_list(2);
                stream.append(&pointer.key.as_bytes().to_vec());
                stream.append(&pointer.id.encode());
            }
        }
        (FieldType::CallStack, Value::IntList(vs)) => {
            stream.begin_list(vs.len());
            for v in vs {
                stream.append(&uint_bytes(*v as u128));
            }
        }
        (FieldType::Mptrees, Value::RawList(items)) => {
            stream.begin_list(items.len());
            for item in items {
                stream.append_raw(item, 1);
            }
        }
        (FieldType::CallReturnType, Value::CallReturnType(rt)) => {
            stream.append(&vec![rt.to_byte()]);
        }
        (FieldType::CtVersion, Value::CtVersion(ct)) => {
            stream.append(&vec![ct.vm_version, 0, ct.abi_version]);
        }
        (FieldType::SophiaCodeTypeInfo, Value::Raw(raw)) => {
            stream.append_raw(raw, 1);
        }
        // validate() already rejected every other combination.
        _ => return Err(wrong_type(field, "matching value variant").into()),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decodes one record item back into a [`Value`] per the field's type.
pub fn decode(field: &FieldDef, item: &Rlp<'_>) -> Result<Value, TxError> {
    match field.field_type {
        FieldType::Int | FieldType::Amount => {
            let data = item.data()?;
            Ok(Value::Int(uint_from_bytes(data)?))
        }
        FieldType::Id => {
            let id = Id::decode(item.data()?)?;
            check_prefix(field, id.prefix())?;
            Ok(Value::Id(id))
        }
        FieldType::Ids => {
            let mut ids = Vec::with_capacity(item.item_count()?);
            for sub in item.iter() {
                let id = Id::decode(sub.data()?)?;
                check_prefix(field, id.prefix())?;
                ids.push(id);
            }
            Ok(Value::Ids(ids))
        }
        FieldType::String => {
            let data = item.data()?;
            let s = String::from_utf8(data.to_vec())
                .map_err(|_| wrong_shape(field, "invalid utf-8"))?;
            Ok(Value::String(s))
        }
        FieldType::Binary => {
            let data = item.data()?;
            match display_prefix(&field.prefix) {
                Some(prefix) => Ok(Value::String(encoding::encode(prefix, data))),
                None => Ok(Value::Bytes(data.to_vec())),
            }
        }
        FieldType::RawBinary | FieldType::Payload | FieldType::StateTree => {
            Ok(Value::Bytes(item.data()?.to_vec()))
        }
        FieldType::RlpBinary => {
            let data = item.data()?;
            // The nested record must itself frame-decode; partial nested
            // garbage is rejected here, not discovered later.
            super::framing::deserialize(data)?;
            Ok(Value::Rlp(data.to_vec()))
        }
        FieldType::RlpBinaries => {
            let mut items = Vec::with_capacity(item.item_count()?);
            for sub in item.iter() {
                let data = sub.data()?;
                super::framing::deserialize(data)?;
                items.push(data.to_vec());
            }
            Ok(Value::RlpList(items))
        }
        FieldType::Bool => {
            let data = item.data()?;
            match data {
                [0] => Ok(Value::Bool(false)),
                [1] => Ok(Value::Bool(true)),
                _ => Err(wrong_shape(field, "not a boolean byte").into()),
            }
        }
        FieldType::Hex => Ok(Value::String(hex::encode(item.data()?))),
        FieldType::Signatures => {
            let mut sigs = Vec::with_capacity(item.item_count()?);
            for sub in item.iter() {
                let data = sub.data()?;
                if data.len() != SIGNATURE_LENGTH {
                    return Err(wrong_shape(
                        field,
                        format!(
                            "signature must be {SIGNATURE_LENGTH} bytes, got {}",
                            data.len()
                        ),
                    )
                    .into());
                }
                sigs.push(data.to_vec());
            }
            Ok(Value::Signatures(sigs))
        }
        FieldType::Pointers => {
            let mut pointers = Vec::with_capacity(item.item_count()?);
            for sub in item.iter() {
                if sub.item_count()? != 2 {
                    return Err(wrong_shape(field, "pointer must be a {key, id} pair").into());
                }
                let key = String::from_utf8(sub.at(0)?.data()?.to_vec())
                    .map_err(|_| wrong_shape(field, "pointer key is not utf-8"))?;
                let id = Id::decode(sub.at(1)?.data()?)?;
                pointers.push(Pointer { key, id });
            }
            Ok(Value::Pointers(pointers))
        }
        FieldType::CallStack => {
            let mut vs = Vec::with_capacity(item.item_count()?);
            for sub in item.iter() {
                vs.push(uint_from_bytes(sub.data()?)?);
            }
            Ok(Value::IntList(vs))
        }
        FieldType::Mptrees => {
            let mut items = Vec::with_capacity(item.item_count()?);
            for sub in item.iter() {
                items.push(sub.as_raw().to_vec());
            }
            Ok(Value::RawList(items))
        }
        FieldType::CallReturnType => {
            let data = item.data()?;
            let byte = match data {
                [b] => *b,
                _ => return Err(wrong_shape(field, "not a return type byte").into()),
            };
            CallReturnType::from_byte(byte)
                .map(Value::CallReturnType)
                .ok_or_else(|| wrong_shape(field, format!("unknown return type {byte}")).into())
        }
        FieldType::CtVersion => {
            let data = item.data()?;
            match data {
                [vm, 0, abi] => Ok(Value::CtVersion(CtVersion {
                    vm_version: *vm,
                    abi_version: *abi,
                })),
                _ => Err(wrong_shape(field, "ctVersion must be three bytes [vm, 0, abi]").into()),
            }
        }
        FieldType::SophiaCodeTypeInfo => Ok(Value::Raw(item.as_raw().to_vec())),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
