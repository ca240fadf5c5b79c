//! # Transaction Object
//!
//! The mutable, signable wrapper around one transaction: it owns the current
//! parameter set, derives the canonical record bytes on demand, and manages
//! attached signatures.
//!
//! The object moves forward through three states — `Building` while params
//! are assembled, `Sealed` once canonical bytes exist, `Signed` once at
//! least one signature is attached. Construction always ends `Sealed` or
//! `Signed`; a mutation re-seals immediately, so an inconsistent unsealed
//! object is never observable. Re-entering `Building` is not supported.
//!
//! A `TxObject` is not safe for concurrent mutation. Build and sign many
//! independent transactions in parallel instead of sharing one instance.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::config::{SIGNATURE_LENGTH, TX_TTL};
use crate::encoding::{self, PREFIX_TRANSACTION};

use super::error::{SignatureError, TxError, UsageError};
use super::fee::{self, FeeContext};
use super::fields::Value;
use super::framing;
use super::schema::{self, FieldType, SchemaEntry, TxKind};

// ---------------------------------------------------------------------------
// TxState
// ---------------------------------------------------------------------------

/// Lifecycle state of a [`TxObject`]. Transitions are strictly forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxState {
    /// Params assembled, canonical bytes not yet derived. Only ever
    /// observable from inside construction.
    Building,
    /// Canonical bytes computed and cached; no signatures.
    Sealed,
    /// At least one signature attached; the cached wire form is the
    /// `signedTx` wrapper.
    Signed,
}

// ---------------------------------------------------------------------------
// TxObject
// ---------------------------------------------------------------------------

/// One transaction's params, canonical bytes, and signatures.
#[derive(Debug, Clone)]
pub struct TxObject {
    entry: &'static SchemaEntry,
    params: HashMap<String, Value>,
    signatures: Vec<Vec<u8>>,
    /// Canonical record bytes of the transaction itself (never the signed
    /// wrapper) — this is what gets signed.
    rlp_encoded: Vec<u8>,
    /// Cached human wire string; the `signedTx` wrapper when signatures are
    /// attached, the direct record encoding otherwise.
    encoded_tx: String,
    /// Whether the fee came from the calculator rather than the caller.
    /// Default-derived fees are recomputed when the serialized size changes;
    /// caller-set fees are never touched.
    fee_is_default: bool,
    state: TxState,
}

impl TxObject {
    // -- construction -------------------------------------------------------

    /// Builds a transaction from a kind and its params, resolving the
    /// current schema version.
    ///
    /// Missing `ttl` defaults to [`TX_TTL`], a missing payload to empty
    /// bytes, and a missing `fee` to the calculator's minimum for the final
    /// serialized size. Any other absent field fails with `MissingField`
    /// before any bytes are produced. Param names outside the schema are
    /// ignored.
    pub fn from_params(kind: TxKind, params: HashMap<String, Value>) -> Result<Self, TxError> {
        let entry = schema::resolve_for_build(kind)?;
        let mut params = params;
        let mut fee_is_default = false;
        for field in entry.fields {
            if params.contains_key(field.name) {
                continue;
            }
            match (field.name, field.field_type) {
                ("fee", FieldType::Int) => fee_is_default = true,
                ("ttl", FieldType::Int) => {
                    params.insert(field.name.to_string(), Value::int(TX_TTL));
                }
                (_, FieldType::Payload) => {
                    params.insert(field.name.to_string(), Value::Bytes(vec![]));
                }
                _ => {
                    return Err(UsageError::MissingField(field.name.to_string()).into());
                }
            }
        }

        let mut tx = Self {
            entry,
            params,
            signatures: Vec::new(),
            rlp_encoded: Vec::new(),
            encoded_tx: String::new(),
            fee_is_default,
            state: TxState::Building,
        };
        tx.seal()?;
        debug!(kind = %kind, version = entry.version, size = tx.rlp_encoded.len(), "built transaction");
        Ok(tx)
    }

    /// Parses a transaction from its human wire string (`tx_...`).
    pub fn from_encoded(tx_string: &str) -> Result<Self, TxError> {
        if tx_string.is_empty() {
            return Err(UsageError::EmptyConstructorArgs.into());
        }
        let payload = encoding::decode_with_prefix(PREFIX_TRANSACTION, tx_string)?;
        Self::from_bytes(&payload)
    }

    /// Parses a transaction from raw framed bytes.
    ///
    /// A `signedTx` outer record enters `Signed` directly: its signatures
    /// are extracted and the inner record is decoded recursively. Anything
    /// else enters `Sealed`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TxError> {
        if bytes.is_empty() {
            return Err(UsageError::EmptyConstructorArgs.into());
        }
        let (entry, params) = framing::deserialize(bytes)?;

        if entry.kind == TxKind::Signed {
            let signatures = match params.get("signatures") {
                Some(Value::Signatures(sigs)) => sigs.clone(),
                _ => return Err(SignatureError::NotSigned.into()),
            };
            let inner_bytes = match params.get("encodedTx") {
                Some(Value::Rlp(inner)) => inner.clone(),
                _ => return Err(UsageError::EmptyConstructorArgs.into()),
            };
            let (inner_entry, inner_params) = framing::deserialize(&inner_bytes)?;
            debug!(
                kind = %inner_entry.kind,
                signatures = signatures.len(),
                "parsed signed transaction"
            );
            return Ok(Self {
                entry: inner_entry,
                params: inner_params,
                signatures,
                rlp_encoded: inner_bytes,
                encoded_tx: encoding::encode(PREFIX_TRANSACTION, bytes),
                // A parsed fee has no author to defend it; treat it as
                // derived so later mutations re-price the transaction.
                fee_is_default: true,
                state: TxState::Signed,
            });
        }

        debug!(kind = %entry.kind, "parsed transaction");
        Ok(Self {
            entry,
            params,
            signatures: Vec::new(),
            rlp_encoded: bytes.to_vec(),
            encoded_tx: encoding::encode(PREFIX_TRANSACTION, bytes),
            fee_is_default: true,
            state: TxState::Sealed,
        })
    }

    // -- mutation -----------------------------------------------------------

    /// Merges new values into the params and re-seals.
    ///
    /// A default-derived fee is recomputed against the new serialized size;
    /// a fee the caller set explicitly (at build time or through props)
    /// never changes. Fails with `InvalidPropsShape` if a prop names a
    /// field the schema does not define; on any failure the object is left
    /// untouched.
    pub fn set_props(&mut self, props: HashMap<String, Value>) -> Result<(), TxError> {
        for name in props.keys() {
            if !self.entry.fields.iter().any(|f| f.name == name.as_str()) {
                return Err(UsageError::InvalidPropsShape(name.clone()).into());
            }
        }

        let mut candidate = self.clone();
        if props.contains_key("fee") {
            candidate.fee_is_default = false;
        }
        for (name, value) in props {
            candidate.params.insert(name, value);
        }
        candidate.seal()?;
        *self = candidate;
        Ok(())
    }

    /// Appends a signature and re-wraps the cached wire form as `signedTx`.
    pub fn add_signature(&mut self, signature: &[u8]) -> Result<(), TxError> {
        if signature.len() != SIGNATURE_LENGTH {
            return Err(SignatureError::InvalidEncoding {
                expected: SIGNATURE_LENGTH,
                got: signature.len(),
            }
            .into());
        }
        self.signatures.push(signature.to_vec());
        self.state = TxState::Signed;
        self.refresh_encoded()?;
        debug!(kind = %self.kind(), signatures = self.signatures.len(), "attached signature");
        Ok(())
    }

    // -- accessors ----------------------------------------------------------

    /// The transaction kind.
    pub fn kind(&self) -> TxKind {
        self.entry.kind
    }

    /// The schema version the record is framed under.
    pub fn version(&self) -> u64 {
        self.entry.version
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TxState {
        self.state
    }

    /// The decoded parameter set.
    pub fn params(&self) -> &HashMap<String, Value> {
        &self.params
    }

    /// One parameter by schema name.
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    /// Canonical record bytes (the unsigned record, even when signed).
    pub fn rlp_encoded(&self) -> &[u8] {
        &self.rlp_encoded
    }

    /// The cached human wire string: the `signedTx` wrapper when signed,
    /// the direct record encoding otherwise.
    pub fn encoded_tx(&self) -> &str {
        &self.encoded_tx
    }

    /// Whether at least one signature is attached.
    pub fn is_signed(&self) -> bool {
        !self.signatures.is_empty()
    }

    /// The attached signatures.
    ///
    /// Absence of signatures is a usage error, not a silent empty list —
    /// callers rely on this to assert signedness.
    pub fn signatures(&self) -> Result<&[Vec<u8>], TxError> {
        if self.signatures.is_empty() {
            return Err(SignatureError::NotSigned.into());
        }
        Ok(&self.signatures)
    }

    /// The exact bytes the signer signs: `network_id ++ record bytes`,
    /// with no additional wrapper.
    pub fn signing_payload(&self, network_id: &str) -> Vec<u8> {
        let mut payload = Vec::with_capacity(network_id.len() + self.rlp_encoded.len());
        payload.extend_from_slice(network_id.as_bytes());
        payload.extend_from_slice(&self.rlp_encoded);
        payload
    }

    // -- internal -----------------------------------------------------------

    /// Derives canonical bytes and the cached wire string from the current
    /// params, recomputing a default fee first.
    fn seal(&mut self) -> Result<(), TxError> {
        if self.fee_is_default && self.entry.fields.iter().any(|f| f.name == "fee") {
            self.recompute_default_fee()?;
        }
        self.rlp_encoded = framing::serialize(self.entry, &self.params)?;
        self.refresh_encoded()?;
        self.state = if self.signatures.is_empty() {
            TxState::Sealed
        } else {
            TxState::Signed
        };
        Ok(())
    }

    /// Iterates the default fee to a fixpoint: the fee field's own bytes
    /// count toward the serialized size the fee is computed from, so a
    /// single pass can undershoot. Converges within a few rounds since the
    /// fee's byte width grows monotonically.
    fn recompute_default_fee(&mut self) -> Result<(), TxError> {
        let ctx = self.fee_context();
        self.params.insert("fee".to_string(), Value::int(0));
        for _ in 0..8 {
            let size = framing::serialize(self.entry, &self.params)?.len();
            let min_fee = fee::min_fee(self.entry.kind, size, &ctx);
            if self.params.get("fee").and_then(Value::as_int) == Some(min_fee as i128) {
                break;
            }
            trace!(kind = %self.entry.kind, size, min_fee, "derived default fee");
            self.params.insert("fee".to_string(), Value::int(min_fee));
        }
        Ok(())
    }

    /// The size-independent fee inputs this kind draws from its own params:
    /// oracle kinds price their TTL delta, wrapper kinds subtract the inner
    /// transaction's bytes.
    fn fee_context(&self) -> FeeContext {
        let ttl_param = match self.entry.kind {
            TxKind::OracleRegister | TxKind::OracleExtend => Some("oracleTtlValue"),
            TxKind::OracleQuery => Some("queryTtlValue"),
            TxKind::OracleResponse => Some("responseTtlValue"),
            _ => None,
        };
        let relative_ttl = ttl_param
            .and_then(|name| self.params.get(name))
            .and_then(Value::as_int)
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(0);
        let inner_tx_size = match self.entry.kind {
            TxKind::GaMeta | TxKind::PayingFor => self
                .params
                .get("tx")
                .and_then(Value::as_rlp)
                .map(<[u8]>::len)
                .unwrap_or(0),
            _ => 0,
        };
        FeeContext {
            relative_ttl,
            inner_tx_size,
        }
    }

    /// Rebuilds the cached wire string from the current record bytes and
    /// signature list.
    fn refresh_encoded(&mut self) -> Result<(), TxError> {
        if self.signatures.is_empty() {
            self.encoded_tx = encoding::encode(PREFIX_TRANSACTION, &self.rlp_encoded);
        } else {
            let signed = schema::resolve_for_build(TxKind::Signed)?;
            let mut params = HashMap::with_capacity(2);
            params.insert(
                "signatures".to_string(),
                Value::Signatures(self.signatures.clone()),
            );
            params.insert("encodedTx".to_string(), Value::Rlp(self.rlp_encoded.clone()));
            let wrapper = framing::serialize(signed, &params)?;
            self.encoded_tx = encoding::encode(PREFIX_TRANSACTION, &wrapper);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tx::error::FieldValidationError;
    use crate::tx::id::{Id, IdKind};

    fn spend_params(fee: Option<u64>) -> HashMap<String, Value> {
        let mut params = HashMap::new();
        params.insert(
            "senderId".to_string(),
            Value::Id(Id::new(IdKind::Account, [1; 32])),
        );
        params.insert(
            "recipientId".to_string(),
            Value::Id(Id::new(IdKind::Account, [2; 32])),
        );
        params.insert("amount".to_string(), Value::int(100));
        params.insert("nonce".to_string(), Value::int(1));
        if let Some(fee) = fee {
            params.insert("fee".to_string(), Value::int(fee));
        }
        params
    }

    #[test]
    fn build_seals_with_defaults() {
        let tx = TxObject::from_params(TxKind::Spend, spend_params(Some(20_000))).unwrap();
        assert_eq!(tx.state(), TxState::Sealed);
        assert!(tx.encoded_tx().starts_with("tx_"));
        assert_eq!(tx.param("ttl"), Some(&Value::int(TX_TTL)));
        assert_eq!(tx.param("payload"), Some(&Value::Bytes(vec![])));
        assert!(!tx.is_signed());
    }

    #[test]
    fn missing_required_field_reported() {
        let mut params = spend_params(Some(20_000));
        params.remove("recipientId");
        let err = TxObject::from_params(TxKind::Spend, params).unwrap_err();
        assert!(matches!(
            err,
            TxError::Usage(UsageError::MissingField(ref f)) if f == "recipientId"
        ));
    }

    #[test]
    fn invalid_field_fails_before_sealing() {
        let mut params = spend_params(Some(20_000));
        params.insert("amount".to_string(), Value::Int(-1));
        let err = TxObject::from_params(TxKind::Spend, params).unwrap_err();
        assert!(matches!(err, TxError::Field(FieldValidationError { .. })));
    }

    #[test]
    fn default_fee_matches_formula_at_final_size() {
        let tx = TxObject::from_params(TxKind::Spend, spend_params(None)).unwrap();
        let fee = tx.param("fee").and_then(Value::as_int).unwrap();
        let expected = fee::min_fee(
            TxKind::Spend,
            tx.rlp_encoded().len(),
            &FeeContext::default(),
        );
        assert_eq!(fee, expected as i128, "fee must be a fixpoint of the size");
    }

    #[test]
    fn explicit_fee_is_kept_verbatim() {
        let tx = TxObject::from_params(TxKind::Spend, spend_params(Some(123_456))).unwrap();
        assert_eq!(tx.param("fee"), Some(&Value::int(123_456)));
    }

    #[test]
    fn default_fee_recomputed_when_payload_grows() {
        let mut tx = TxObject::from_params(TxKind::Spend, spend_params(None)).unwrap();
        let fee_before = tx.param("fee").and_then(Value::as_int).unwrap();

        let mut props = HashMap::new();
        props.insert("payload".to_string(), Value::Bytes(vec![0xAA; 512]));
        tx.set_props(props).unwrap();

        let fee_after = tx.param("fee").and_then(Value::as_int).unwrap();
        assert!(fee_after > fee_before);
        let expected = fee::min_fee(
            TxKind::Spend,
            tx.rlp_encoded().len(),
            &FeeContext::default(),
        );
        assert_eq!(fee_after, expected as i128);
    }

    #[test]
    fn explicit_fee_survives_set_props() {
        let mut tx = TxObject::from_params(TxKind::Spend, spend_params(Some(99_000))).unwrap();
        let mut props = HashMap::new();
        props.insert("payload".to_string(), Value::Bytes(vec![0xAA; 512]));
        tx.set_props(props).unwrap();
        assert_eq!(tx.param("fee"), Some(&Value::int(99_000)));
    }

    #[test]
    fn set_props_rejects_unknown_fields() {
        let mut tx = TxObject::from_params(TxKind::Spend, spend_params(None)).unwrap();
        let before = tx.encoded_tx().to_string();

        let mut props = HashMap::new();
        props.insert("definitelyNotAField".to_string(), Value::int(1));
        let err = tx.set_props(props).unwrap_err();
        assert!(matches!(
            err,
            TxError::Usage(UsageError::InvalidPropsShape(_))
        ));
        // The object is untouched after a rejected mutation.
        assert_eq!(tx.encoded_tx(), before);
    }

    #[test]
    fn set_props_invalidates_cached_encoding() {
        let mut tx = TxObject::from_params(TxKind::Spend, spend_params(None)).unwrap();
        let before = tx.encoded_tx().to_string();
        let mut props = HashMap::new();
        props.insert("amount".to_string(), Value::int(10_000));
        tx.set_props(props).unwrap();
        assert_ne!(tx.encoded_tx(), before);
        assert_eq!(tx.param("amount"), Some(&Value::int(10_000)));
    }

    #[test]
    fn signatures_on_unsigned_is_a_usage_error() {
        let tx = TxObject::from_params(TxKind::Spend, spend_params(None)).unwrap();
        assert!(matches!(
            tx.signatures(),
            Err(TxError::Signature(SignatureError::NotSigned))
        ));
    }

    #[test]
    fn add_signature_wraps_and_transitions() {
        let mut tx = TxObject::from_params(TxKind::Spend, spend_params(None)).unwrap();
        let unsigned = tx.encoded_tx().to_string();

        tx.add_signature(&[9u8; 64]).unwrap();
        assert_eq!(tx.state(), TxState::Signed);
        assert!(tx.is_signed());
        assert_eq!(tx.signatures().unwrap().len(), 1);
        assert_ne!(tx.encoded_tx(), unsigned);
    }

    #[test]
    fn bad_signature_length_rejected() {
        let mut tx = TxObject::from_params(TxKind::Spend, spend_params(None)).unwrap();
        let err = tx.add_signature(&[9u8; 63]).unwrap_err();
        assert!(matches!(
            err,
            TxError::Signature(SignatureError::InvalidEncoding { expected: 64, got: 63 })
        ));
        assert!(!tx.is_signed());
    }

    #[test]
    fn wire_roundtrip_unsigned() {
        let tx = TxObject::from_params(TxKind::Spend, spend_params(None)).unwrap();
        let parsed = TxObject::from_encoded(tx.encoded_tx()).unwrap();
        assert_eq!(parsed.kind(), TxKind::Spend);
        assert_eq!(parsed.state(), TxState::Sealed);
        assert_eq!(parsed.rlp_encoded(), tx.rlp_encoded());
        assert_eq!(parsed.params(), tx.params());
    }

    #[test]
    fn wire_roundtrip_signed() {
        let mut tx = TxObject::from_params(TxKind::Spend, spend_params(None)).unwrap();
        tx.add_signature(&[9u8; 64]).unwrap();

        let parsed = TxObject::from_encoded(tx.encoded_tx()).unwrap();
        assert_eq!(parsed.state(), TxState::Signed);
        assert_eq!(parsed.kind(), TxKind::Spend);
        assert_eq!(parsed.rlp_encoded(), tx.rlp_encoded());
        assert_eq!(parsed.signatures().unwrap(), tx.signatures().unwrap());
        assert_eq!(parsed.encoded_tx(), tx.encoded_tx());
    }

    #[test]
    fn parsed_fee_is_treated_as_derived() {
        let tx = TxObject::from_params(TxKind::Spend, spend_params(Some(50_000))).unwrap();
        let mut parsed = TxObject::from_encoded(tx.encoded_tx()).unwrap();

        let mut props = HashMap::new();
        props.insert("amount".to_string(), Value::int(10_000));
        parsed.set_props(props).unwrap();

        let fee = parsed.param("fee").and_then(Value::as_int).unwrap();
        assert_ne!(fee, 50_000, "a parsed fee is re-derived on mutation");
    }

    #[test]
    fn empty_inputs_rejected() {
        assert!(matches!(
            TxObject::from_encoded(""),
            Err(TxError::Usage(UsageError::EmptyConstructorArgs))
        ));
        assert!(matches!(
            TxObject::from_bytes(&[]),
            Err(TxError::Usage(UsageError::EmptyConstructorArgs))
        ));
    }

    #[test]
    fn signing_payload_is_network_id_plus_record() {
        let tx = TxObject::from_params(TxKind::Spend, spend_params(None)).unwrap();
        let payload = tx.signing_payload("aura_mainnet");
        assert!(payload.starts_with(b"aura_mainnet"));
        assert_eq!(&payload[b"aura_mainnet".len()..], tx.rlp_encoded());
    }

    #[test]
    fn oracle_default_fee_includes_ttl_gas() {
        let mut params = HashMap::new();
        params.insert(
            "accountId".to_string(),
            Value::Id(Id::new(IdKind::Account, [1; 32])),
        );
        params.insert("nonce".to_string(), Value::int(1));
        params.insert("queryFormat".to_string(), Value::String("query".into()));
        params.insert(
            "responseFormat".to_string(),
            Value::String("response".into()),
        );
        params.insert("queryFee".to_string(), Value::int(30_000));
        params.insert("oracleTtlType".to_string(), Value::int(0));
        params.insert("oracleTtlValue".to_string(), Value::int(500));
        params.insert("abiVersion".to_string(), Value::int(0));

        let tx = TxObject::from_params(TxKind::OracleRegister, params).unwrap();
        let fee = tx.param("fee").and_then(Value::as_int).unwrap();
        let ctx = FeeContext {
            relative_ttl: 500,
            inner_tx_size: 0,
        };
        let expected = fee::min_fee(TxKind::OracleRegister, tx.rlp_encoded().len(), &ctx);
        assert_eq!(fee, expected as i128);
    }

    #[test]
    fn paying_for_charges_only_wrapper_bytes() {
        let inner = TxObject::from_params(TxKind::Spend, spend_params(None)).unwrap();
        let inner_bytes = inner.rlp_encoded().to_vec();

        let mut params = HashMap::new();
        params.insert(
            "payerId".to_string(),
            Value::Id(Id::new(IdKind::Account, [3; 32])),
        );
        params.insert("nonce".to_string(), Value::int(7));
        params.insert("tx".to_string(), Value::Rlp(inner_bytes.clone()));

        let tx = TxObject::from_params(TxKind::PayingFor, params).unwrap();
        let fee = tx.param("fee").and_then(Value::as_int).unwrap();
        let ctx = FeeContext {
            relative_ttl: 0,
            inner_tx_size: inner_bytes.len(),
        };
        let expected = fee::min_fee(TxKind::PayingFor, tx.rlp_encoded().len(), &ctx);
        assert_eq!(fee, expected as i128);
    }
}
