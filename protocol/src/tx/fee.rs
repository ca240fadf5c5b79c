//! # Fee & Gas Calculation
//!
//! Pure functions computing the minimum legal fee of a transaction from its
//! kind and serialized size. The result is expressed in gas units at the
//! network's gas-price denomination; a node drops anything cheaper.
//!
//! The fee depends on the serialized size, and the serialized fee field is
//! part of the serialized size — the transaction object resolves that cycle
//! by iterating to a fixpoint, not this module.

use crate::config::{BASE_GAS, GAS_PER_BYTE, KEY_BLOCK_INTERVAL};

use super::schema::TxKind;

/// Gas buckets granted per oracle TTL year, prorated by the relative TTL.
const ORACLE_TTL_GAS: u64 = 32_000;

/// Key blocks per year at the target block interval.
const BLOCKS_PER_YEAR: u64 = 60 * 24 * 365 / KEY_BLOCK_INTERVAL;

/// Size-independent context for [`other_gas`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FeeContext {
    /// TTL delta in key blocks; consulted for oracle kinds only.
    pub relative_ttl: u64,
    /// Serialized size of the wrapped inner transaction; consulted for
    /// gaMeta and payingFor only.
    pub inner_tx_size: usize,
}

/// The size-independent gas component: a per-kind multiplier times
/// [`BASE_GAS`].
///
/// Off-chain channel records carry no on-chain cost and price at zero;
/// payingFor is deliberately cheap (×1/5) so fee sponsorship stays viable.
pub fn base_gas(kind: TxKind) -> u64 {
    match kind {
        TxKind::ChannelForceProgress => 30 * BASE_GAS,
        TxKind::ChannelOffChain
        | TxKind::ChannelOffChainCallContract
        | TxKind::ChannelOffChainCreateContract
        | TxKind::ChannelOffChainUpdateDeposit
        | TxKind::ChannelOffChainUpdateWithdrawal
        | TxKind::ChannelOffChainUpdateTransfer => 0,
        TxKind::ContractCreate => 5 * BASE_GAS,
        TxKind::ContractCall => 12 * BASE_GAS,
        TxKind::GaAttach | TxKind::GaMeta => 5 * BASE_GAS,
        TxKind::PayingFor => BASE_GAS / 5,
        _ => BASE_GAS,
    }
}

/// The size-dependent gas component.
///
/// - Oracle kinds additionally pay for the state they occupy over their
///   TTL: `ceil(32000 · relative_ttl / blocks_per_year)`.
/// - Wrapper kinds (gaMeta, payingFor) are charged only for their own
///   bytes, not the wrapped transaction's.
pub fn other_gas(kind: TxKind, tx_size: usize, ctx: &FeeContext) -> u64 {
    let size_gas = |size: usize| size as u64 * GAS_PER_BYTE;
    match kind {
        TxKind::OracleRegister
        | TxKind::OracleExtend
        | TxKind::OracleQuery
        | TxKind::OracleResponse => {
            let ttl_gas = (ORACLE_TTL_GAS as u128 * ctx.relative_ttl as u128)
                .div_ceil(BLOCKS_PER_YEAR as u128) as u64;
            size_gas(tx_size) + ttl_gas
        }
        TxKind::GaMeta | TxKind::PayingFor => {
            size_gas(tx_size.saturating_sub(ctx.inner_tx_size))
        }
        _ => size_gas(tx_size),
    }
}

/// The minimum legal fee: `base_gas + other_gas`.
///
/// Used as the default when a caller omits an explicit fee; must be
/// recomputed whenever the serialized size changes.
pub fn min_fee(kind: TxKind, tx_size: usize, ctx: &FeeContext) -> u64 {
    base_gas(kind) + other_gas(kind, tx_size, ctx)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spend_fee_matches_literal_constants() {
        // BASE_GAS = 15000, GAS_PER_BYTE = 20, no multiplier override.
        assert_eq!(base_gas(TxKind::Spend), 15_000);
        assert_eq!(
            min_fee(TxKind::Spend, 42, &FeeContext::default()),
            15_000 + 42 * 20
        );
        assert_eq!(min_fee(TxKind::Spend, 42, &FeeContext::default()), 15_840);
    }

    #[test]
    fn base_gas_overrides() {
        assert_eq!(base_gas(TxKind::ChannelForceProgress), 30 * 15_000);
        assert_eq!(base_gas(TxKind::ContractCreate), 5 * 15_000);
        assert_eq!(base_gas(TxKind::ContractCall), 12 * 15_000);
        assert_eq!(base_gas(TxKind::GaAttach), 5 * 15_000);
        assert_eq!(base_gas(TxKind::GaMeta), 5 * 15_000);
        assert_eq!(base_gas(TxKind::PayingFor), 3_000);
        assert_eq!(base_gas(TxKind::NameClaim), 15_000);
    }

    #[test]
    fn offchain_kinds_have_zero_base_gas() {
        for kind in [
            TxKind::ChannelOffChain,
            TxKind::ChannelOffChainCallContract,
            TxKind::ChannelOffChainCreateContract,
            TxKind::ChannelOffChainUpdateDeposit,
            TxKind::ChannelOffChainUpdateWithdrawal,
            TxKind::ChannelOffChainUpdateTransfer,
        ] {
            assert_eq!(base_gas(kind), 0, "{kind}");
        }
    }

    #[test]
    fn wrapper_pays_only_for_its_own_bytes() {
        let ctx = FeeContext {
            relative_ttl: 0,
            inner_tx_size: 300,
        };
        assert_eq!(other_gas(TxKind::PayingFor, 500, &ctx), (500 - 300) * 20);
        assert_eq!(other_gas(TxKind::PayingFor, 500, &ctx), 4_000);
        assert_eq!(other_gas(TxKind::GaMeta, 500, &ctx), 4_000);
        // A non-wrapper kind ignores inner_tx_size entirely.
        assert_eq!(other_gas(TxKind::Spend, 500, &ctx), 500 * 20);
    }

    #[test]
    fn oracle_gas_scales_with_relative_ttl() {
        // blocks_per_year = 60*24*365/3 = 175200.
        assert_eq!(BLOCKS_PER_YEAR, 175_200);

        let flat = FeeContext::default();
        assert_eq!(other_gas(TxKind::OracleRegister, 100, &flat), 2_000);

        let ttl = FeeContext {
            relative_ttl: 500,
            inner_tx_size: 0,
        };
        // ceil(32000 * 500 / 175200) = ceil(91.32...) = 92.
        assert_eq!(other_gas(TxKind::OracleRegister, 100, &ttl), 2_000 + 92);

        // A full year of TTL prices exactly one bucket.
        let year = FeeContext {
            relative_ttl: BLOCKS_PER_YEAR,
            inner_tx_size: 0,
        };
        assert_eq!(other_gas(TxKind::OracleExtend, 0, &year), 32_000);
    }

    #[test]
    fn min_fee_is_base_plus_other() {
        let ctx = FeeContext::default();
        for kind in [TxKind::Spend, TxKind::ContractCall, TxKind::NameUpdate] {
            assert_eq!(
                min_fee(kind, 250, &ctx),
                base_gas(kind) + other_gas(kind, 250, &ctx)
            );
        }
    }

    #[test]
    fn fee_grows_with_size() {
        let ctx = FeeContext::default();
        assert!(min_fee(TxKind::Spend, 101, &ctx) > min_fee(TxKind::Spend, 100, &ctx));
    }
}
