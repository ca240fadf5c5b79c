//! Error taxonomy for the transaction codec.
//!
//! Every failure surfaces synchronously at the offending operation, carries
//! the context needed to reproduce the diagnostic, and is never retried
//! internally — a validation failure cannot succeed without different input.
//! A record that fails to decode partway is discarded entirely; the codec
//! never returns an object with missing fields.

use thiserror::Error;

use crate::encoding::EncodingError;

use super::id::IdError;
use super::schema::FieldType;

// ---------------------------------------------------------------------------
// Schema resolution
// ---------------------------------------------------------------------------

/// Failures while resolving a schema entry.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// No schema is registered for the requested transaction kind.
    #[error("unknown transaction kind '{0}'")]
    UnknownKind(String),

    /// The decoded object tag matches no registered record family.
    #[error("unknown object tag {0}")]
    UnknownObjectTag(u64),

    /// The object tag is known but the record's version is not supported.
    #[error("unsupported version {version} for object tag {tag}")]
    UnsupportedVersion { tag: u64, version: u64 },
}

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

/// Why a field value was rejected.
#[derive(Debug, Error)]
pub enum ValidationReason {
    /// The value's variant does not match the field type.
    #[error("value is not of type {expected}")]
    WrongType { expected: &'static str },

    /// A negative number where only non-negative integers are legal.
    #[error("value must be >= 0")]
    NegativeValue,

    /// The value's human prefix is not among the allowed prefixes.
    #[error("prefix '{got}' doesn't match expected prefix '{expected}'")]
    PrefixMismatch { expected: String, got: String },

    /// The value has the right variant but the wrong internal shape.
    #[error("{0}")]
    WrongShape(String),
}

/// A field value failed validation or decoding.
#[derive(Debug, Error)]
#[error("field '{field}' ({field_type}): {reason}")]
pub struct FieldValidationError {
    /// Schema name of the offending field.
    pub field: String,
    /// The field's declared codec type.
    pub field_type: FieldType,
    /// What went wrong.
    pub reason: ValidationReason,
}

// ---------------------------------------------------------------------------
// Framing
// ---------------------------------------------------------------------------

/// The byte stream does not frame a complete, exact record.
#[derive(Debug, Error)]
pub enum FramingError {
    /// The record holds fewer fields than its schema demands.
    #[error("truncated record: schema demands {expected} fields, found {got}")]
    Truncated { expected: usize, got: usize },

    /// The record holds more fields than its schema demands.
    #[error("trailing bytes: schema demands {expected} fields, found {got}")]
    TrailingBytes { expected: usize, got: usize },

    /// The underlying length-prefixed encoding is malformed.
    #[error("malformed rlp: {0}")]
    Rlp(#[from] rlp::DecoderError),
}

// ---------------------------------------------------------------------------
// Signatures
// ---------------------------------------------------------------------------

/// Failures around attached signatures.
#[derive(Debug, Error)]
pub enum SignatureError {
    /// The signature is not a byte string of the expected length.
    #[error("invalid signature: expected {expected} bytes, got {got}")]
    InvalidEncoding { expected: usize, got: usize },

    /// Signatures were requested from an unsigned transaction.
    #[error("signature not found, transaction is not signed")]
    NotSigned,
}

// ---------------------------------------------------------------------------
// Usage
// ---------------------------------------------------------------------------

/// Caller-side misuse of the transaction object API.
#[derive(Debug, Error)]
pub enum UsageError {
    /// A required schema field is absent from the supplied params.
    #[error("transaction build error: required field '{0}' is missing")]
    MissingField(String),

    /// A props map names a field the schema does not define.
    #[error("invalid props: '{0}' is not a field of this transaction")]
    InvalidPropsShape(String),

    /// A constructor received empty input.
    #[error("empty constructor arguments: provide an encoded transaction or params")]
    EmptyConstructorArgs,
}

// ---------------------------------------------------------------------------
// Unified error
// ---------------------------------------------------------------------------

/// Any failure the transaction codec can produce.
#[derive(Debug, Error)]
pub enum TxError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Field(#[from] FieldValidationError),

    #[error(transparent)]
    Framing(#[from] FramingError),

    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    Id(#[from] IdError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

impl From<rlp::DecoderError> for TxError {
    fn from(e: rlp::DecoderError) -> Self {
        TxError::Framing(FramingError::Rlp(e))
    }
}
