//! # Binary Framer
//!
//! A wire record is the RLP list `[objectTag, version, field₁, …, fieldₙ]`:
//! the tag and version header first, then every schema field in order, each
//! item length-prefixed by the list encoding. Framing is recursive — a
//! `signedTx` record's `encodedTx` field is itself a complete framed record,
//! and decoding recurses through the field codec.
//!
//! Serialization is purely deterministic: the same `(kind, version, params)`
//! always yields the same byte string. No randomness, no padding.

use std::collections::HashMap;

use rlp::{DecoderError, Rlp, RlpStream};

use super::error::{FramingError, TxError, UsageError};
use super::fields::{self, uint_bytes, uint_from_bytes, Value};
use super::schema::{self, SchemaEntry};

/// Items the header occupies in every record list.
const HEADER_ITEMS: usize = 2;

/// Serializes a record under the given schema entry.
///
/// Every schema field must be present in `params`; defaults are the
/// transaction object's concern, not the framer's. Fails before producing
/// any bytes if a field is absent or invalid.
pub fn serialize(
    entry: &SchemaEntry,
    params: &HashMap<String, Value>,
) -> Result<Vec<u8>, TxError> {
    let mut stream = RlpStream::new_list(HEADER_ITEMS + entry.fields.len());
    stream.append(&uint_bytes(entry.object_tag as u128));
    stream.append(&uint_bytes(entry.version as u128));
    for field in entry.fields {
        let value = params
            .get(field.name)
            .ok_or_else(|| UsageError::MissingField(field.name.to_string()))?;
        fields::encode(field, value, &mut stream)?;
    }
    Ok(stream.out().to_vec())
}

/// Parses a framed record back into its schema entry and decoded params.
///
/// Reads the tag+version header, resolves the version-exact schema, then
/// decodes fields strictly in schema order. A record with missing fields,
/// surplus fields, or trailing bytes is rejected whole — never returned
/// partially populated.
pub fn deserialize(bytes: &[u8]) -> Result<(&'static SchemaEntry, HashMap<String, Value>), TxError> {
    let rlp = Rlp::new(bytes);
    if !rlp.is_list() {
        return Err(FramingError::Rlp(DecoderError::RlpExpectedToBeList).into());
    }

    // Bytes past the end of the list are garbage, not padding.
    let payload = rlp.payload_info().map_err(FramingError::Rlp)?;
    if payload.header_len + payload.value_len != bytes.len() {
        return Err(FramingError::Rlp(DecoderError::RlpIsTooBig).into());
    }

    let item_count = rlp.item_count().map_err(FramingError::Rlp)?;
    if item_count < HEADER_ITEMS {
        return Err(FramingError::Truncated {
            expected: HEADER_ITEMS,
            got: item_count,
        }
        .into());
    }

    let tag = header_int(&rlp, 0)?;
    let version = header_int(&rlp, 1)?;
    let entry = schema::resolve_for_parse(tag, version)?;

    let expected = HEADER_ITEMS + entry.fields.len();
    if item_count < expected {
        return Err(FramingError::Truncated {
            expected: entry.fields.len(),
            got: item_count - HEADER_ITEMS,
        }
        .into());
    }
    if item_count > expected {
        return Err(FramingError::TrailingBytes {
            expected: entry.fields.len(),
            got: item_count - HEADER_ITEMS,
        }
        .into());
    }

    let mut params = HashMap::with_capacity(entry.fields.len());
    for (index, field) in entry.fields.iter().enumerate() {
        let item = rlp.at(HEADER_ITEMS + index).map_err(FramingError::Rlp)?;
        let value = fields::decode(field, &item)?;
        params.insert(field.name.to_string(), value);
    }
    Ok((entry, params))
}

fn header_int(rlp: &Rlp<'_>, index: usize) -> Result<u64, TxError> {
    let value = uint_from_bytes(rlp.at(index)?.data()?)?;
    u64::try_from(value)
        .map_err(|_| FramingError::Rlp(DecoderError::Custom("header integer out of range")).into())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
