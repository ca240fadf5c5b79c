//! # Accounts & Signing
//!
//! The signer capability consumed by the transaction codec: something that
//! can produce an Ed25519 signature over a payload, verify one, and state
//! its own address. [`MemoryAccount`] is the in-process implementation — a
//! keypair held in memory plus the network id it signs for.
//!
//! Signing a transaction never touches the record bytes themselves: the
//! payload is `network_id ++ record bytes`, so a signature for one network
//! is worthless on another.

use thiserror::Error;
use tracing::debug;

use crate::crypto::keys::{AuraKeypair, AuraPublicKey, AuraSignature};
use crate::tx::error::TxError;
use crate::tx::object::TxObject;

/// Errors raised by account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Transaction signing requires a network id and none was configured.
    #[error("networkId is not provided")]
    MissingNetworkId,

    /// The underlying transaction operation failed.
    #[error(transparent)]
    Tx(#[from] TxError),
}

// ---------------------------------------------------------------------------
// Signer
// ---------------------------------------------------------------------------

/// The signing capability the codec consumes.
///
/// Implementations may be in-memory keypairs, hardware wallets, or remote
/// signing services; the codec only ever sees this interface.
pub trait Signer {
    /// Signs an arbitrary payload.
    fn sign(&self, message: &[u8]) -> AuraSignature;

    /// Verifies a signature against a public key.
    fn verify(&self, message: &[u8], signature: &AuraSignature, public_key: &AuraPublicKey)
        -> bool;

    /// The signer's account address (`ak_...`).
    fn address(&self) -> String;
}

// ---------------------------------------------------------------------------
// MemoryAccount
// ---------------------------------------------------------------------------

/// An account whose keypair lives in process memory.
#[derive(Debug, Clone)]
pub struct MemoryAccount {
    keypair: AuraKeypair,
    network_id: Option<String>,
}

impl MemoryAccount {
    /// Wraps a keypair with no network binding. Signing raw payloads works;
    /// signing transactions requires [`with_network_id`](Self::with_network_id).
    pub fn new(keypair: AuraKeypair) -> Self {
        Self {
            keypair,
            network_id: None,
        }
    }

    /// Wraps a keypair bound to a network.
    pub fn with_network_id(keypair: AuraKeypair, network_id: impl Into<String>) -> Self {
        Self {
            keypair,
            network_id: Some(network_id.into()),
        }
    }

    /// The account's public key.
    pub fn public_key(&self) -> AuraPublicKey {
        self.keypair.public_key()
    }

    /// Signs a transaction and attaches the signature.
    ///
    /// Computes the signing payload (`network_id ++ record bytes`), signs
    /// it, and appends the signature to the transaction — which re-wraps
    /// its cached wire form as a `signedTx` record.
    pub fn sign_transaction(&self, tx: &mut TxObject) -> Result<AuraSignature, AccountError> {
        let network_id = self
            .network_id
            .as_deref()
            .ok_or(AccountError::MissingNetworkId)?;
        let payload = tx.signing_payload(network_id);
        let signature = self.keypair.sign(&payload);
        tx.add_signature(signature.as_bytes())?;
        debug!(address = %self.address(), network_id, "signed transaction");
        Ok(signature)
    }
}

impl Signer for MemoryAccount {
    fn sign(&self, message: &[u8]) -> AuraSignature {
        self.keypair.sign(message)
    }

    fn verify(
        &self,
        message: &[u8],
        signature: &AuraSignature,
        public_key: &AuraPublicKey,
    ) -> bool {
        public_key.verify(message, signature)
    }

    fn address(&self) -> String {
        self.keypair.address()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NETWORK_ID_MAINNET;
    use crate::tx::fields::Value;
    use crate::tx::id::{Id, IdKind};
    use crate::tx::schema::TxKind;
    use std::collections::HashMap;

    fn spend_tx(account: &MemoryAccount) -> TxObject {
        let sender = Id::new(IdKind::Account, *account.public_key().as_bytes());
        let mut params = HashMap::new();
        params.insert("senderId".to_string(), Value::Id(sender.clone()));
        params.insert("recipientId".to_string(), Value::Id(sender));
        params.insert("amount".to_string(), Value::int(100));
        params.insert("nonce".to_string(), Value::int(1));
        TxObject::from_params(TxKind::Spend, params).unwrap()
    }

    #[test]
    fn sign_transaction_attaches_signature() {
        let account = MemoryAccount::with_network_id(AuraKeypair::generate(), NETWORK_ID_MAINNET);
        let mut tx = spend_tx(&account);
        assert!(!tx.is_signed());

        let signature = account.sign_transaction(&mut tx).unwrap();
        assert!(tx.is_signed());
        assert_eq!(tx.signatures().unwrap().len(), 1);
        assert_eq!(tx.signatures().unwrap()[0], signature.as_bytes());
    }

    #[test]
    fn signature_verifies_against_signing_payload() {
        let account = MemoryAccount::with_network_id(AuraKeypair::generate(), NETWORK_ID_MAINNET);
        let mut tx = spend_tx(&account);
        let signature = account.sign_transaction(&mut tx).unwrap();

        let payload = tx.signing_payload(NETWORK_ID_MAINNET);
        assert!(account.verify(&payload, &signature, &account.public_key()));

        // The same record signed for another network does not verify.
        let other = tx.signing_payload("aura_uat");
        assert!(!account.verify(&other, &signature, &account.public_key()));
    }

    #[test]
    fn signing_without_network_id_fails() {
        let account = MemoryAccount::new(AuraKeypair::generate());
        let mut tx = spend_tx(&account);
        assert!(matches!(
            account.sign_transaction(&mut tx),
            Err(AccountError::MissingNetworkId)
        ));
        assert!(!tx.is_signed());
    }

    #[test]
    fn address_is_account_prefixed() {
        let account = MemoryAccount::new(AuraKeypair::generate());
        assert!(account.address().starts_with("ak_"));
    }
}
