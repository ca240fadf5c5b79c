//! # Schema Registry
//!
//! The static table binding every `(transaction kind, version)` pair to its
//! numeric object tag and ordered field list, plus the inverse lookup used
//! during deserialization.
//!
//! The table is a closed, hand-maintained enumeration: the record set is
//! fixed by protocol and never extended at runtime. Everything here is
//! `&'static`, built at compile time, and safe to read from any number of
//! threads without synchronization.
//!
//! Field order within a schema IS the wire order. Reordering a field list is
//! a consensus break.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::SchemaError;

// ---------------------------------------------------------------------------
// Object tags
// ---------------------------------------------------------------------------

/// Numeric identifiers of record families, placed first in every wire
/// encoding.
pub mod object_tag {
    pub const ACCOUNT: u64 = 10;
    pub const SIGNED_TRANSACTION: u64 = 11;
    pub const SPEND_TRANSACTION: u64 = 12;
    pub const ORACLE_REGISTER_TRANSACTION: u64 = 22;
    pub const ORACLE_QUERY_TRANSACTION: u64 = 23;
    pub const ORACLE_RESPONSE_TRANSACTION: u64 = 24;
    pub const ORACLE_EXTEND_TRANSACTION: u64 = 25;
    pub const NAME_CLAIM_TRANSACTION: u64 = 32;
    pub const NAME_PRECLAIM_TRANSACTION: u64 = 33;
    pub const NAME_UPDATE_TRANSACTION: u64 = 34;
    pub const NAME_REVOKE_TRANSACTION: u64 = 35;
    pub const NAME_TRANSFER_TRANSACTION: u64 = 36;
    pub const CONTRACT: u64 = 40;
    pub const CONTRACT_CALL: u64 = 41;
    pub const CONTRACT_CREATE_TRANSACTION: u64 = 42;
    pub const CONTRACT_CALL_TRANSACTION: u64 = 43;
    pub const CHANNEL_CREATE: u64 = 50;
    pub const CHANNEL_DEPOSIT: u64 = 51;
    pub const CHANNEL_WITHDRAW: u64 = 52;
    pub const CHANNEL_CLOSE_MUTUAL: u64 = 53;
    pub const CHANNEL_CLOSE_SOLO: u64 = 54;
    pub const CHANNEL_SLASH: u64 = 55;
    pub const CHANNEL_SETTLE: u64 = 56;
    pub const CHANNEL_OFFCHAIN: u64 = 57;
    pub const CHANNEL: u64 = 58;
    pub const CHANNEL_SNAPSHOT_SOLO: u64 = 59;
    pub const PROOF_OF_INCLUSION: u64 = 60;
    pub const STATE_TREES: u64 = 62;
    pub const MERKLE_PATRICIA_TREE: u64 = 63;
    pub const MERKLE_PATRICIA_TREE_VALUE: u64 = 64;
    pub const SOPHIA_BYTE_CODE: u64 = 70;
    pub const GA_ATTACH: u64 = 80;
    pub const GA_META: u64 = 81;
    pub const PAYING_FOR: u64 = 82;
    pub const CHANNEL_FORCE_PROGRESS: u64 = 521;
    pub const CHANNEL_OFFCHAIN_UPDATE_TRANSFER: u64 = 570;
    pub const CHANNEL_OFFCHAIN_UPDATE_DEPOSIT: u64 = 571;
    pub const CHANNEL_OFFCHAIN_UPDATE_WITHDRAWAL: u64 = 572;
    pub const CHANNEL_OFFCHAIN_CREATE_CONTRACT: u64 = 573;
    pub const CHANNEL_OFFCHAIN_CALL_CONTRACT: u64 = 574;
    pub const CHANNEL_RECONNECT: u64 = 575;
    pub const CONTRACTS_TREE: u64 = 621;
    pub const CONTRACT_CALLS_TREE: u64 = 622;
    pub const CHANNELS_TREE: u64 = 623;
    pub const NAMESERVICE_TREE: u64 = 624;
    pub const ORACLES_TREE: u64 = 625;
    pub const ACCOUNTS_TREE: u64 = 626;
}

// ---------------------------------------------------------------------------
// TxKind
// ---------------------------------------------------------------------------

/// The closed set of record families the codec understands.
///
/// Each kind maps 1:1 to a human tag used in tooling (see
/// [`name`](TxKind::name)) and to one or more `(object tag, version)` pairs
/// in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxKind {
    Account,
    Signed,
    Spend,
    // AENS
    NamePreClaim,
    NameClaim,
    NameUpdate,
    NameTransfer,
    NameRevoke,
    // Contracts
    Contract,
    ContractCreate,
    ContractCall,
    ContractCallResult,
    // Oracles
    OracleRegister,
    OracleExtend,
    OracleQuery,
    OracleResponse,
    // State channels
    ChannelCreate,
    ChannelDeposit,
    ChannelWithdraw,
    ChannelCloseMutual,
    ChannelCloseSolo,
    ChannelSlash,
    ChannelSettle,
    ChannelForceProgress,
    ChannelOffChain,
    Channel,
    ChannelSnapshotSolo,
    ChannelOffChainUpdateTransfer,
    ChannelOffChainUpdateDeposit,
    ChannelOffChainUpdateWithdrawal,
    ChannelOffChainCreateContract,
    ChannelOffChainCallContract,
    ChannelReconnect,
    // Merkle proofs and state trees
    ProofOfInclusion,
    StateTrees,
    MerklePatriciaTree,
    MerklePatriciaTreeValue,
    ContractsTree,
    ContractCallsTree,
    ChannelsTree,
    NameserviceTree,
    OraclesTree,
    AccountsTree,
    // Generalized accounts
    GaAttach,
    GaMeta,
    PayingFor,
    SophiaByteCode,
}

impl TxKind {
    /// Every kind, for exhaustive table checks.
    pub const ALL: [TxKind; 47] = [
        TxKind::Account,
        TxKind::Signed,
        TxKind::Spend,
        TxKind::NamePreClaim,
        TxKind::NameClaim,
        TxKind::NameUpdate,
        TxKind::NameTransfer,
        TxKind::NameRevoke,
        TxKind::Contract,
        TxKind::ContractCreate,
        TxKind::ContractCall,
        TxKind::ContractCallResult,
        TxKind::OracleRegister,
        TxKind::OracleExtend,
        TxKind::OracleQuery,
        TxKind::OracleResponse,
        TxKind::ChannelCreate,
        TxKind::ChannelDeposit,
        TxKind::ChannelWithdraw,
        TxKind::ChannelCloseMutual,
        TxKind::ChannelCloseSolo,
        TxKind::ChannelSlash,
        TxKind::ChannelSettle,
        TxKind::ChannelForceProgress,
        TxKind::ChannelOffChain,
        TxKind::Channel,
        TxKind::ChannelSnapshotSolo,
        TxKind::ChannelOffChainUpdateTransfer,
        TxKind::ChannelOffChainUpdateDeposit,
        TxKind::ChannelOffChainUpdateWithdrawal,
        TxKind::ChannelOffChainCreateContract,
        TxKind::ChannelOffChainCallContract,
        TxKind::ChannelReconnect,
        TxKind::ProofOfInclusion,
        TxKind::StateTrees,
        TxKind::MerklePatriciaTree,
        TxKind::MerklePatriciaTreeValue,
        TxKind::ContractsTree,
        TxKind::ContractCallsTree,
        TxKind::ChannelsTree,
        TxKind::NameserviceTree,
        TxKind::OraclesTree,
        TxKind::AccountsTree,
        TxKind::GaAttach,
        TxKind::GaMeta,
        TxKind::PayingFor,
        TxKind::SophiaByteCode,
    ];

    /// The human tag used in tooling and APIs.
    pub fn name(self) -> &'static str {
        match self {
            TxKind::Account => "account",
            TxKind::Signed => "signedTx",
            TxKind::Spend => "spendTx",
            TxKind::NamePreClaim => "namePreClaimTx",
            TxKind::NameClaim => "nameClaimTx",
            TxKind::NameUpdate => "nameUpdateTx",
            TxKind::NameTransfer => "nameTransfer",
            TxKind::NameRevoke => "nameRevokeTx",
            TxKind::Contract => "contract",
            TxKind::ContractCreate => "contractCreateTx",
            TxKind::ContractCall => "contractCallTx",
            TxKind::ContractCallResult => "contractCallResult",
            TxKind::OracleRegister => "oracleRegister",
            TxKind::OracleExtend => "oracleExtend",
            TxKind::OracleQuery => "oracleQuery",
            TxKind::OracleResponse => "oracleResponse",
            TxKind::ChannelCreate => "channelCreate",
            TxKind::ChannelDeposit => "channelDeposit",
            TxKind::ChannelWithdraw => "channelWithdraw",
            TxKind::ChannelCloseMutual => "channelCloseMutual",
            TxKind::ChannelCloseSolo => "channelCloseSolo",
            TxKind::ChannelSlash => "channelSlash",
            TxKind::ChannelSettle => "channelSettle",
            TxKind::ChannelForceProgress => "channelForceProgress",
            TxKind::ChannelOffChain => "channelOffChain",
            TxKind::Channel => "channel",
            TxKind::ChannelSnapshotSolo => "channelSnapshotSolo",
            TxKind::ChannelOffChainUpdateTransfer => "channelOffChainUpdateTransfer",
            TxKind::ChannelOffChainUpdateDeposit => "channelOffChainUpdateDeposit",
            TxKind::ChannelOffChainUpdateWithdrawal => "channelOffChainUpdateWithdrawal",
            TxKind::ChannelOffChainCreateContract => "channelOffChainCreateContract",
            TxKind::ChannelOffChainCallContract => "channelOffChainCallContract",
            TxKind::ChannelReconnect => "channelReconnect",
            TxKind::ProofOfInclusion => "proofOfInclusion",
            TxKind::StateTrees => "stateTrees",
            TxKind::MerklePatriciaTree => "merklePatriciaTree",
            TxKind::MerklePatriciaTreeValue => "merklePatriciaTreeValue",
            TxKind::ContractsTree => "contractsTree",
            TxKind::ContractCallsTree => "contractCallsTree",
            TxKind::ChannelsTree => "channelsTree",
            TxKind::NameserviceTree => "nameserviceTree",
            TxKind::OraclesTree => "oraclesTree",
            TxKind::AccountsTree => "accountsTree",
            TxKind::GaAttach => "gaAttach",
            TxKind::GaMeta => "gaMeta",
            TxKind::PayingFor => "payingFor",
            TxKind::SophiaByteCode => "sophiaByteCode",
        }
    }

    /// Resolves a human tag back to a kind.
    pub fn from_name(name: &str) -> Result<Self, SchemaError> {
        TxKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| SchemaError::UnknownKind(name.to_string()))
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Field specifications
// ---------------------------------------------------------------------------

/// The closed set of field codec types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Int,
    Amount,
    Id,
    Ids,
    String,
    Binary,
    RawBinary,
    RlpBinary,
    RlpBinaries,
    Bool,
    Hex,
    Signatures,
    Pointers,
    CallStack,
    Mptrees,
    CallReturnType,
    CtVersion,
    SophiaCodeTypeInfo,
    Payload,
    StateTree,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::Int => "int",
            FieldType::Amount => "amount",
            FieldType::Id => "id",
            FieldType::Ids => "ids",
            FieldType::String => "string",
            FieldType::Binary => "binary",
            FieldType::RawBinary => "rawBinary",
            FieldType::RlpBinary => "rlpBinary",
            FieldType::RlpBinaries => "rlpBinaries",
            FieldType::Bool => "bool",
            FieldType::Hex => "hex",
            FieldType::Signatures => "signatures",
            FieldType::Pointers => "pointers",
            FieldType::CallStack => "callStack",
            FieldType::Mptrees => "mptrees",
            FieldType::CallReturnType => "callReturnType",
            FieldType::CtVersion => "ctVersion",
            FieldType::SophiaCodeTypeInfo => "sophiaCodeTypeInfo",
            FieldType::Payload => "payload",
            FieldType::StateTree => "stateTree",
        };
        f.write_str(name)
    }
}

/// Which human prefixes a field's value may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixRule {
    /// No prefix constraint.
    None,
    /// Exactly one acceptable prefix.
    One(&'static str),
    /// Any of a fixed set of prefixes (e.g. a recipient may be an account
    /// or a name).
    Any(&'static [&'static str]),
}

impl PrefixRule {
    /// Whether the given prefix satisfies this rule.
    pub fn allows(&self, prefix: &str) -> bool {
        match self {
            PrefixRule::None => true,
            PrefixRule::One(p) => *p == prefix,
            PrefixRule::Any(ps) => ps.contains(&prefix),
        }
    }

    /// Human rendering of the allowed set, for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            PrefixRule::None => "any".to_string(),
            PrefixRule::One(p) => (*p).to_string(),
            PrefixRule::Any(ps) => ps.join("|"),
        }
    }
}

/// One field of a record schema: wire position is the slice position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Param name, as exposed to callers.
    pub name: &'static str,
    /// Codec type.
    pub field_type: FieldType,
    /// Allowed human prefixes, where applicable.
    pub prefix: PrefixRule,
}

const fn field(name: &'static str, field_type: FieldType) -> FieldDef {
    FieldDef {
        name,
        field_type,
        prefix: PrefixRule::None,
    }
}

const fn prefixed(name: &'static str, field_type: FieldType, prefix: &'static str) -> FieldDef {
    FieldDef {
        name,
        field_type,
        prefix: PrefixRule::One(prefix),
    }
}

const fn prefixed_any(
    name: &'static str,
    field_type: FieldType,
    prefixes: &'static [&'static str],
) -> FieldDef {
    FieldDef {
        name,
        field_type,
        prefix: PrefixRule::Any(prefixes),
    }
}

// ---------------------------------------------------------------------------
// Field tables
// ---------------------------------------------------------------------------
// The object tag and version are framed by the serializer and do not appear
// in these lists.

use FieldType as F;

const ACCOUNT_2: &[FieldDef] = &[
    field("flags", F::Int),
    field("nonce", F::Int),
    field("balance", F::Int),
    prefixed_any("gaContract", F::Id, &["ct", "nm"]),
    prefixed("gaAuthFun", F::Binary, "cb"),
];

const SIGNED_1: &[FieldDef] = &[
    field("signatures", F::Signatures),
    field("encodedTx", F::RlpBinary),
];

const SPEND_1: &[FieldDef] = &[
    prefixed("senderId", F::Id, "ak"),
    prefixed_any("recipientId", F::Id, &["ak", "nm"]),
    field("amount", F::Amount),
    field("fee", F::Int),
    field("ttl", F::Int),
    field("nonce", F::Int),
    field("payload", F::Payload),
];

const NAME_PRE_CLAIM_1: &[FieldDef] = &[
    prefixed("accountId", F::Id, "ak"),
    field("nonce", F::Int),
    prefixed("commitmentId", F::Id, "cm"),
    field("fee", F::Int),
    field("ttl", F::Int),
];

const NAME_CLAIM_2: &[FieldDef] = &[
    prefixed("accountId", F::Id, "ak"),
    field("nonce", F::Int),
    prefixed("name", F::Binary, "nm"),
    field("nameSalt", F::Int),
    field("nameFee", F::Amount),
    field("fee", F::Int),
    field("ttl", F::Int),
];

const NAME_UPDATE_1: &[FieldDef] = &[
    prefixed("accountId", F::Id, "ak"),
    field("nonce", F::Int),
    prefixed("nameId", F::Id, "nm"),
    field("nameTtl", F::Int),
    field("pointers", F::Pointers),
    field("clientTtl", F::Int),
    field("fee", F::Int),
    field("ttl", F::Int),
];

const NAME_TRANSFER_1: &[FieldDef] = &[
    prefixed("accountId", F::Id, "ak"),
    field("nonce", F::Int),
    prefixed("nameId", F::Id, "nm"),
    prefixed_any("recipientId", F::Id, &["ak", "nm"]),
    field("fee", F::Int),
    field("ttl", F::Int),
];

const NAME_REVOKE_1: &[FieldDef] = &[
    prefixed("accountId", F::Id, "ak"),
    field("nonce", F::Int),
    prefixed("nameId", F::Id, "nm"),
    field("fee", F::Int),
    field("ttl", F::Int),
];

const CONTRACT_1: &[FieldDef] = &[
    prefixed("owner", F::Id, "ak"),
    field("ctVersion", F::Int),
    prefixed("code", F::Binary, "cb"),
    prefixed("log", F::Binary, "cb"),
    field("active", F::Bool),
    prefixed("referers", F::Ids, "ak"),
    field("deposit", F::Amount),
];

const CONTRACT_CREATE_1: &[FieldDef] = &[
    prefixed("ownerId", F::Id, "ak"),
    field("nonce", F::Int),
    prefixed("code", F::Binary, "cb"),
    field("ctVersion", F::CtVersion),
    field("fee", F::Int),
    field("ttl", F::Int),
    field("deposit", F::Amount),
    field("amount", F::Amount),
    field("gas", F::Int),
    field("gasPrice", F::Int),
    prefixed("callData", F::Binary, "cb"),
];

const CONTRACT_CALL_1: &[FieldDef] = &[
    prefixed("callerId", F::Id, "ak"),
    field("nonce", F::Int),
    prefixed_any("contractId", F::Id, &["ct", "nm"]),
    field("abiVersion", F::Int),
    field("fee", F::Int),
    field("ttl", F::Int),
    field("amount", F::Amount),
    field("gas", F::Int),
    field("gasPrice", F::Int),
    prefixed("callData", F::Binary, "cb"),
];

const CONTRACT_CALL_RESULT_1: &[FieldDef] = &[
    prefixed("callerId", F::Id, "ak"),
    field("callerNonce", F::Int),
    field("height", F::Int),
    prefixed("contractId", F::Id, "ct"),
    field("gasPrice", F::Int),
    field("gasUsed", F::Int),
    prefixed("returnValue", F::Binary, "cb"),
    field("returnType", F::CallReturnType),
    field("log", F::RawBinary),
];

const ORACLE_REGISTER_1: &[FieldDef] = &[
    prefixed("accountId", F::Id, "ak"),
    field("nonce", F::Int),
    field("queryFormat", F::String),
    field("responseFormat", F::String),
    field("queryFee", F::Amount),
    field("oracleTtlType", F::Int),
    field("oracleTtlValue", F::Int),
    field("fee", F::Int),
    field("ttl", F::Int),
    field("abiVersion", F::Int),
];

const ORACLE_EXTEND_1: &[FieldDef] = &[
    prefixed_any("oracleId", F::Id, &["ok", "nm"]),
    field("nonce", F::Int),
    field("oracleTtlType", F::Int),
    field("oracleTtlValue", F::Int),
    field("fee", F::Int),
    field("ttl", F::Int),
];

const ORACLE_QUERY_1: &[FieldDef] = &[
    prefixed("senderId", F::Id, "ak"),
    field("nonce", F::Int),
    prefixed_any("oracleId", F::Id, &["ok", "nm"]),
    field("query", F::String),
    field("queryFee", F::Amount),
    field("queryTtlType", F::Int),
    field("queryTtlValue", F::Int),
    field("responseTtlType", F::Int),
    field("responseTtlValue", F::Int),
    field("fee", F::Int),
    field("ttl", F::Int),
];

const ORACLE_RESPOND_1: &[FieldDef] = &[
    prefixed("oracleId", F::Id, "ok"),
    field("nonce", F::Int),
    prefixed("queryId", F::Binary, "oq"),
    field("response", F::String),
    field("responseTtlType", F::Int),
    field("responseTtlValue", F::Int),
    field("fee", F::Int),
    field("ttl", F::Int),
];

const CHANNEL_CREATE_2: &[FieldDef] = &[
    prefixed("initiator", F::Id, "ak"),
    field("initiatorAmount", F::Int),
    prefixed("responder", F::Id, "ak"),
    field("responderAmount", F::Int),
    field("channelReserve", F::Int),
    field("lockPeriod", F::Int),
    field("ttl", F::Int),
    field("fee", F::Int),
    field("initiatorDelegateIds", F::String),
    field("responderDelegateIds", F::String),
    prefixed("stateHash", F::Binary, "st"),
    field("nonce", F::Int),
];

const CHANNEL_DEPOSIT_1: &[FieldDef] = &[
    prefixed("channelId", F::Id, "ch"),
    prefixed("fromId", F::Id, "ak"),
    field("amount", F::Int),
    field("ttl", F::Int),
    field("fee", F::Int),
    prefixed("stateHash", F::Binary, "st"),
    field("round", F::Int),
    field("nonce", F::Int),
];

const CHANNEL_WITHDRAW_1: &[FieldDef] = &[
    prefixed("channelId", F::Id, "ch"),
    prefixed("toId", F::Id, "ak"),
    field("amount", F::Int),
    field("ttl", F::Int),
    field("fee", F::Int),
    prefixed("stateHash", F::Binary, "st"),
    field("round", F::Int),
    field("nonce", F::Int),
];

const CHANNEL_CLOSE_MUTUAL_1: &[FieldDef] = &[
    prefixed("channelId", F::Id, "ch"),
    prefixed("fromId", F::Id, "ak"),
    field("initiatorAmountFinal", F::Int),
    field("responderAmountFinal", F::Int),
    field("ttl", F::Int),
    field("fee", F::Int),
    field("nonce", F::Int),
];

const CHANNEL_CLOSE_SOLO_1: &[FieldDef] = &[
    prefixed("channelId", F::Id, "ch"),
    prefixed("fromId", F::Id, "ak"),
    prefixed("payload", F::Binary, "tx"),
    prefixed("poi", F::Binary, "pi"),
    field("ttl", F::Int),
    field("fee", F::Int),
    field("nonce", F::Int),
];

const CHANNEL_SLASH_1: &[FieldDef] = &[
    prefixed("channelId", F::Id, "ch"),
    prefixed("fromId", F::Id, "ak"),
    prefixed("payload", F::Binary, "tx"),
    prefixed("poi", F::Binary, "pi"),
    field("ttl", F::Int),
    field("fee", F::Int),
    field("nonce", F::Int),
];

const CHANNEL_SETTLE_1: &[FieldDef] = &[
    prefixed("channelId", F::Id, "ch"),
    prefixed("fromId", F::Id, "ak"),
    field("initiatorAmountFinal", F::Int),
    field("responderAmountFinal", F::Int),
    field("ttl", F::Int),
    field("fee", F::Int),
    field("nonce", F::Int),
];

const CHANNEL_FORCE_PROGRESS_1: &[FieldDef] = &[
    prefixed("channelId", F::Id, "ch"),
    prefixed("fromId", F::Id, "ak"),
    prefixed("payload", F::Binary, "tx"),
    field("round", F::Int),
    field("update", F::Binary),
    field("stateHash", F::Binary),
    field("offChainTrees", F::StateTree),
    field("ttl", F::Int),
    field("fee", F::Int),
    field("nonce", F::Int),
];

const CHANNEL_OFFCHAIN_2: &[FieldDef] = &[
    prefixed("channelId", F::Id, "ch"),
    field("round", F::Int),
    prefixed("stateHash", F::Binary, "st"),
];

const CHANNEL_3: &[FieldDef] = &[
    prefixed("initiator", F::Id, "ak"),
    prefixed("responder", F::Id, "ak"),
    field("channelAmount", F::Int),
    field("initiatorAmount", F::Int),
    field("responderAmount", F::Int),
    field("channelReserve", F::Int),
    field("initiatorDelegateIds", F::Ids),
    field("responderDelegateIds", F::Ids),
    field("stateHash", F::Hex),
    field("round", F::Int),
    field("soloRound", F::Int),
    field("lockPeriod", F::Int),
    field("lockedUntil", F::Int),
    prefixed("initiatorAuth", F::Binary, "cb"),
    prefixed("responderAuth", F::Binary, "cb"),
];

const CHANNEL_SNAPSHOT_SOLO_1: &[FieldDef] = &[
    prefixed("channelId", F::Id, "ch"),
    prefixed("fromId", F::Id, "ak"),
    prefixed("payload", F::Binary, "tx"),
    field("ttl", F::Int),
    field("fee", F::Int),
    field("nonce", F::Int),
];

const CHANNEL_OFFCHAIN_CREATE_CONTRACT_1: &[FieldDef] = &[
    prefixed("owner", F::Id, "ak"),
    field("ctVersion", F::Int),
    prefixed("code", F::Binary, "cb"),
    field("deposit", F::Int),
    prefixed("callData", F::Binary, "cb"),
];

const CHANNEL_OFFCHAIN_CALL_CONTRACT_1: &[FieldDef] = &[
    prefixed("caller", F::Id, "ak"),
    prefixed("contract", F::Id, "ct"),
    field("abiVersion", F::Int),
    field("amount", F::Int),
    prefixed("callData", F::Binary, "cb"),
    field("callStack", F::CallStack),
    field("gasPrice", F::Int),
    field("gasLimit", F::Int),
];

const CHANNEL_RECONNECT_1: &[FieldDef] = &[
    prefixed("channelId", F::Id, "ch"),
    field("round", F::Int),
    field("role", F::String),
    prefixed("pubkey", F::Id, "ak"),
];

const CHANNEL_OFFCHAIN_UPDATE_TRANSFER_1: &[FieldDef] = &[
    prefixed("from", F::Id, "ak"),
    prefixed("to", F::Id, "ak"),
    field("amount", F::Int),
];

const CHANNEL_OFFCHAIN_UPDATE_DEPOSIT_1: &[FieldDef] = &[
    prefixed("from", F::Id, "ak"),
    field("amount", F::Int),
];

const CHANNEL_OFFCHAIN_UPDATE_WITHDRAWAL_1: &[FieldDef] = &[
    prefixed("from", F::Id, "ak"),
    field("amount", F::Int),
];

const PROOF_OF_INCLUSION_1: &[FieldDef] = &[
    field("accounts", F::Mptrees),
    field("calls", F::Mptrees),
    field("channels", F::Mptrees),
    field("contracts", F::Mptrees),
    field("ns", F::Mptrees),
    field("oracles", F::Mptrees),
];

const STATE_TREES_1: &[FieldDef] = &[
    field("contracts", F::RlpBinary),
    field("calls", F::RlpBinary),
    field("channels", F::RlpBinary),
    field("ns", F::RlpBinary),
    field("oracles", F::RlpBinary),
    field("accounts", F::RlpBinary),
];

const MERKLE_PATRICIA_TREE_1: &[FieldDef] = &[field("values", F::RlpBinaries)];

const MERKLE_PATRICIA_TREE_VALUE_1: &[FieldDef] =
    &[field("key", F::Hex), field("value", F::RawBinary)];

const CONTRACTS_TREE_1: &[FieldDef] = &[field("contracts", F::RlpBinary)];

const CONTRACT_CALLS_TREE_1: &[FieldDef] = &[field("calls", F::RlpBinary)];

const CHANNELS_TREE_1: &[FieldDef] = &[field("channels", F::RlpBinary)];

const NAMESERVICE_TREE_1: &[FieldDef] = &[field("mtree", F::RlpBinary)];

const ORACLES_TREE_1: &[FieldDef] = &[field("otree", F::RlpBinary)];

const ACCOUNTS_TREE_1: &[FieldDef] = &[field("accounts", F::RlpBinary)];

const GA_ATTACH_1: &[FieldDef] = &[
    prefixed("ownerId", F::Id, "ak"),
    field("nonce", F::Int),
    prefixed("code", F::Binary, "cb"),
    field("authFun", F::RawBinary),
    field("ctVersion", F::CtVersion),
    field("fee", F::Int),
    field("ttl", F::Int),
    field("gas", F::Int),
    field("gasPrice", F::Int),
    prefixed("callData", F::Binary, "cb"),
];

const GA_META_2: &[FieldDef] = &[
    prefixed("gaId", F::Id, "ak"),
    prefixed("authData", F::Binary, "cb"),
    field("abiVersion", F::Int),
    field("fee", F::Int),
    field("gas", F::Int),
    field("gasPrice", F::Int),
    field("tx", F::RlpBinary),
];

const PAYING_FOR_1: &[FieldDef] = &[
    prefixed("payerId", F::Id, "ak"),
    field("nonce", F::Int),
    field("fee", F::Int),
    field("tx", F::RlpBinary),
];

const SOPHIA_BYTE_CODE_3: &[FieldDef] = &[
    field("sourceCodeHash", F::RawBinary),
    field("typeInfo", F::SophiaCodeTypeInfo),
    field("byteCode", F::RawBinary),
    field("compilerVersion", F::String),
    field("payable", F::Bool),
];

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// One `(kind, version)` entry of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaEntry {
    /// The record family.
    pub kind: TxKind,
    /// Schema revision. Old revisions remain parseable after a newer one
    /// becomes the build default.
    pub version: u64,
    /// Numeric tag placed first in the wire encoding.
    pub object_tag: u64,
    /// Ordered field list; slice order is wire order.
    pub fields: &'static [FieldDef],
}

static SCHEMAS: &[SchemaEntry] = &[
    SchemaEntry {
        kind: TxKind::Account,
        version: 2,
        object_tag: object_tag::ACCOUNT,
        fields: ACCOUNT_2,
    },
    SchemaEntry {
        kind: TxKind::Signed,
        version: 1,
        object_tag: object_tag::SIGNED_TRANSACTION,
        fields: SIGNED_1,
    },
    SchemaEntry {
        kind: TxKind::Spend,
        version: 1,
        object_tag: object_tag::SPEND_TRANSACTION,
        fields: SPEND_1,
    },
    SchemaEntry {
        kind: TxKind::NamePreClaim,
        version: 1,
        object_tag: object_tag::NAME_PRECLAIM_TRANSACTION,
        fields: NAME_PRE_CLAIM_1,
    },
    SchemaEntry {
        kind: TxKind::NameClaim,
        version: 2,
        object_tag: object_tag::NAME_CLAIM_TRANSACTION,
        fields: NAME_CLAIM_2,
    },
    SchemaEntry {
        kind: TxKind::NameUpdate,
        version: 1,
        object_tag: object_tag::NAME_UPDATE_TRANSACTION,
        fields: NAME_UPDATE_1,
    },
    SchemaEntry {
        kind: TxKind::NameTransfer,
        version: 1,
        object_tag: object_tag::NAME_TRANSFER_TRANSACTION,
        fields: NAME_TRANSFER_1,
    },
    SchemaEntry {
        kind: TxKind::NameRevoke,
        version: 1,
        object_tag: object_tag::NAME_REVOKE_TRANSACTION,
        fields: NAME_REVOKE_1,
    },
    SchemaEntry {
        kind: TxKind::Contract,
        version: 1,
        object_tag: object_tag::CONTRACT,
        fields: CONTRACT_1,
    },
    SchemaEntry {
        kind: TxKind::ContractCreate,
        version: 1,
        object_tag: object_tag::CONTRACT_CREATE_TRANSACTION,
        fields: CONTRACT_CREATE_1,
    },
    SchemaEntry {
        kind: TxKind::ContractCall,
        version: 1,
        object_tag: object_tag::CONTRACT_CALL_TRANSACTION,
        fields: CONTRACT_CALL_1,
    },
    SchemaEntry {
        kind: TxKind::ContractCallResult,
        version: 1,
        object_tag: object_tag::CONTRACT_CALL,
        fields: CONTRACT_CALL_RESULT_1,
    },
    SchemaEntry {
        kind: TxKind::OracleRegister,
        version: 1,
        object_tag: object_tag::ORACLE_REGISTER_TRANSACTION,
        fields: ORACLE_REGISTER_1,
    },
    SchemaEntry {
        kind: TxKind::OracleExtend,
        version: 1,
        object_tag: object_tag::ORACLE_EXTEND_TRANSACTION,
        fields: ORACLE_EXTEND_1,
    },
    SchemaEntry {
        kind: TxKind::OracleQuery,
        version: 1,
        object_tag: object_tag::ORACLE_QUERY_TRANSACTION,
        fields: ORACLE_QUERY_1,
    },
    SchemaEntry {
        kind: TxKind::OracleResponse,
        version: 1,
        object_tag: object_tag::ORACLE_RESPONSE_TRANSACTION,
        fields: ORACLE_RESPOND_1,
    },
    SchemaEntry {
        kind: TxKind::ChannelCreate,
        version: 2,
        object_tag: object_tag::CHANNEL_CREATE,
        fields: CHANNEL_CREATE_2,
    },
    SchemaEntry {
        kind: TxKind::ChannelDeposit,
        version: 1,
        object_tag: object_tag::CHANNEL_DEPOSIT,
        fields: CHANNEL_DEPOSIT_1,
    },
    SchemaEntry {
        kind: TxKind::ChannelWithdraw,
        version: 1,
        object_tag: object_tag::CHANNEL_WITHDRAW,
        fields: CHANNEL_WITHDRAW_1,
    },
    SchemaEntry {
        kind: TxKind::ChannelCloseMutual,
        version: 1,
        object_tag: object_tag::CHANNEL_CLOSE_MUTUAL,
        fields: CHANNEL_CLOSE_MUTUAL_1,
    },
    SchemaEntry {
        kind: TxKind::ChannelCloseSolo,
        version: 1,
        object_tag: object_tag::CHANNEL_CLOSE_SOLO,
        fields: CHANNEL_CLOSE_SOLO_1,
    },
    SchemaEntry {
        kind: TxKind::ChannelSlash,
        version: 1,
        object_tag: object_tag::CHANNEL_SLASH,
        fields: CHANNEL_SLASH_1,
    },
    SchemaEntry {
        kind: TxKind::ChannelSettle,
        version: 1,
        object_tag: object_tag::CHANNEL_SETTLE,
        fields: CHANNEL_SETTLE_1,
    },
    SchemaEntry {
        kind: TxKind::ChannelForceProgress,
        version: 1,
        object_tag: object_tag::CHANNEL_FORCE_PROGRESS,
        fields: CHANNEL_FORCE_PROGRESS_1,
    },
    SchemaEntry {
        kind: TxKind::ChannelOffChain,
        version: 2,
        object_tag: object_tag::CHANNEL_OFFCHAIN,
        fields: CHANNEL_OFFCHAIN_2,
    },
    SchemaEntry {
        kind: TxKind::Channel,
        version: 3,
        object_tag: object_tag::CHANNEL,
        fields: CHANNEL_3,
    },
    SchemaEntry {
        kind: TxKind::ChannelSnapshotSolo,
        version: 1,
        object_tag: object_tag::CHANNEL_SNAPSHOT_SOLO,
        fields: CHANNEL_SNAPSHOT_SOLO_1,
    },
    SchemaEntry {
        kind: TxKind::ChannelOffChainUpdateTransfer,
        version: 1,
        object_tag: object_tag::CHANNEL_OFFCHAIN_UPDATE_TRANSFER,
        fields: CHANNEL_OFFCHAIN_UPDATE_TRANSFER_1,
    },
    SchemaEntry {
        kind: TxKind::ChannelOffChainUpdateDeposit,
        version: 1,
        object_tag: object_tag::CHANNEL_OFFCHAIN_UPDATE_DEPOSIT,
        fields: CHANNEL_OFFCHAIN_UPDATE_DEPOSIT_1,
    },
    SchemaEntry {
        kind: TxKind::ChannelOffChainUpdateWithdrawal,
        version: 1,
        object_tag: object_tag::CHANNEL_OFFCHAIN_UPDATE_WITHDRAWAL,
        fields: CHANNEL_OFFCHAIN_UPDATE_WITHDRAWAL_1,
    },
    SchemaEntry {
        kind: TxKind::ChannelOffChainCreateContract,
        version: 1,
        object_tag: object_tag::CHANNEL_OFFCHAIN_CREATE_CONTRACT,
        fields: CHANNEL_OFFCHAIN_CREATE_CONTRACT_1,
    },
    SchemaEntry {
        kind: TxKind::ChannelOffChainCallContract,
        version: 1,
        object_tag: object_tag::CHANNEL_OFFCHAIN_CALL_CONTRACT,
        fields: CHANNEL_OFFCHAIN_CALL_CONTRACT_1,
    },
    SchemaEntry {
        kind: TxKind::ChannelReconnect,
        version: 1,
        object_tag: object_tag::CHANNEL_RECONNECT,
        fields: CHANNEL_RECONNECT_1,
    },
    SchemaEntry {
        kind: TxKind::ProofOfInclusion,
        version: 1,
        object_tag: object_tag::PROOF_OF_INCLUSION,
        fields: PROOF_OF_INCLUSION_1,
    },
    SchemaEntry {
        kind: TxKind::StateTrees,
        version: 1,
        object_tag: object_tag::STATE_TREES,
        fields: STATE_TREES_1,
    },
    SchemaEntry {
        kind: TxKind::MerklePatriciaTree,
        version: 1,
        object_tag: object_tag::MERKLE_PATRICIA_TREE,
        fields: MERKLE_PATRICIA_TREE_1,
    },
    SchemaEntry {
        kind: TxKind::MerklePatriciaTreeValue,
        version: 1,
        object_tag: object_tag::MERKLE_PATRICIA_TREE_VALUE,
        fields: MERKLE_PATRICIA_TREE_VALUE_1,
    },
    SchemaEntry {
        kind: TxKind::ContractsTree,
        version: 1,
        object_tag: object_tag::CONTRACTS_TREE,
        fields: CONTRACTS_TREE_1,
    },
    SchemaEntry {
        kind: TxKind::ContractCallsTree,
        version: 1,
        object_tag: object_tag::CONTRACT_CALLS_TREE,
        fields: CONTRACT_CALLS_TREE_1,
    },
    SchemaEntry {
        kind: TxKind::ChannelsTree,
        version: 1,
        object_tag: object_tag::CHANNELS_TREE,
        fields: CHANNELS_TREE_1,
    },
    SchemaEntry {
        kind: TxKind::NameserviceTree,
        version: 1,
        object_tag: object_tag::NAMESERVICE_TREE,
        fields: NAMESERVICE_TREE_1,
    },
    SchemaEntry {
        kind: TxKind::OraclesTree,
        version: 1,
        object_tag: object_tag::ORACLES_TREE,
        fields: ORACLES_TREE_1,
    },
    SchemaEntry {
        kind: TxKind::AccountsTree,
        version: 1,
        object_tag: object_tag::ACCOUNTS_TREE,
        fields: ACCOUNTS_TREE_1,
    },
    SchemaEntry {
        kind: TxKind::GaAttach,
        version: 1,
        object_tag: object_tag::GA_ATTACH,
        fields: GA_ATTACH_1,
    },
    SchemaEntry {
        kind: TxKind::GaMeta,
        version: 2,
        object_tag: object_tag::GA_META,
        fields: GA_META_2,
    },
    SchemaEntry {
        kind: TxKind::PayingFor,
        version: 1,
        object_tag: object_tag::PAYING_FOR,
        fields: PAYING_FOR_1,
    },
    SchemaEntry {
        kind: TxKind::SophiaByteCode,
        version: 3,
        object_tag: object_tag::SOPHIA_BYTE_CODE,
        fields: SOPHIA_BYTE_CODE_3,
    },
];

/// Resolves the entry used for BUILDING: the highest supported version of
/// the given kind.
pub fn resolve_for_build(kind: TxKind) -> Result<&'static SchemaEntry, SchemaError> {
    SCHEMAS
        .iter()
        .filter(|entry| entry.kind == kind)
        .max_by_key(|entry| entry.version)
        .ok_or_else(|| SchemaError::UnknownKind(kind.name().to_string()))
}

/// Resolves the entry used for PARSING: the version-exact match for a
/// decoded `(object tag, version)` header.
pub fn resolve_for_parse(tag: u64, version: u64) -> Result<&'static SchemaEntry, SchemaError> {
    let mut tag_seen = false;
    for entry in SCHEMAS {
        if entry.object_tag == tag {
            if entry.version == version {
                return Ok(entry);
            }
            tag_seen = true;
        }
    }
    if tag_seen {
        Err(SchemaError::UnsupportedVersion { tag, version })
    } else {
        Err(SchemaError::UnknownObjectTag(tag))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
