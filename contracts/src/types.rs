//! Common types used across the token sale and AMM contracts.
//!
//! All ledger amounts use the native Casper precision: 9 implied decimals,
//! so one whole unit (one CSPR, one KDC) is 10^9 motes.

use odra::casper_types::{U256, U512};

/// One whole unit at native precision (10^9 motes).
pub fn unit() -> U256 {
    U256::from(10u64).pow(U256::from(9u64))
}

/// Fundraising phase.
///
/// Phases are strictly ordered; `successor` is the only legal forward step.
/// Each phase carries its own per-participant cap and token exchange rate.
#[odra::odra_type]
#[derive(Copy, PartialOrd, Ord)]
pub enum Phase {
    /// Seed round: whitelisted contributors, 1500 CSPR individual cap
    Seed,
    /// General round: 1000 CSPR individual cap
    General,
    /// Open round: no individual cap, tokens claimable
    Open,
}

impl Phase {
    /// The immediate next phase, or `None` at the terminal phase.
    pub fn successor(self) -> Option<Phase> {
        match self {
            Phase::Seed => Some(Phase::General),
            Phase::General => Some(Phase::Open),
            Phase::Open => None,
        }
    }

    /// Per-participant contribution cap, `None` = unlimited.
    pub fn individual_cap(self) -> Option<U256> {
        match self {
            Phase::Seed => Some(U256::from(1_500u64) * unit()),
            Phase::General => Some(U256::from(1_000u64) * unit()),
            Phase::Open => None,
        }
    }

    /// Tokens credited per contributed unit. Earlier phases pay better.
    pub fn exchange_rate(self) -> u64 {
        match self {
            Phase::Seed => 7,
            Phase::General => 6,
            Phase::Open => 5,
        }
    }

    pub fn all() -> [Phase; 3] {
        [Phase::Seed, Phase::General, Phase::Open]
    }
}

/// Remaining contribution room for one participant in one phase.
///
/// `None` means unlimited.
pub fn contribution_headroom(cap: Option<U256>, already_contributed: U256) -> Option<U256> {
    cap.map(|cap| cap.saturating_sub(already_contributed))
}

/// Funding ledger snapshot returned to callers.
#[odra::odra_type]
pub struct FundingStatus {
    /// Current fundraising phase
    pub current_phase: Phase,
    /// Whether contributions are currently blocked
    pub paused: bool,
    /// Cumulative contributions across all phases
    pub total_contributed: U256,
}

/// Pool reserve snapshot returned to callers.
#[odra::odra_type]
pub struct PoolInfo {
    /// Native (CSPR) reserve
    pub reserve_cspr: U256,
    /// Token (KDC) reserve
    pub reserve_token: U256,
    /// Total pool shares outstanding
    pub total_shares: U256,
}

/// Convert an attached native value (U512) into a ledger amount.
///
/// Motes map one-to-one onto ledger amounts; the conversion only rejects
/// values outside the u128 range the ledger arithmetic is bounded to.
pub fn attached_to_amount(value: U512) -> Option<U256> {
    if value > U512::from(u128::MAX) {
        return None;
    }
    Some(U256::from(value.as_u128()))
}

/// Convert a ledger amount back into motes for a native transfer (one-to-one).
pub fn amount_to_motes(amount: U256) -> Option<U512> {
    if amount > U256::from(u128::MAX) {
        return None;
    }
    Some(U512::from(amount.as_u128()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_order_is_seed_general_open() {
        assert!(Phase::Seed < Phase::General);
        assert!(Phase::General < Phase::Open);
    }

    #[test]
    fn successor_chain_terminates_at_open() {
        assert_eq!(Phase::Seed.successor(), Some(Phase::General));
        assert_eq!(Phase::General.successor(), Some(Phase::Open));
        assert_eq!(Phase::Open.successor(), None);
    }

    #[test]
    fn individual_caps_match_round_sizes() {
        assert_eq!(Phase::Seed.individual_cap(), Some(U256::from(1_500u64) * unit()));
        assert_eq!(Phase::General.individual_cap(), Some(U256::from(1_000u64) * unit()));
        assert_eq!(Phase::Open.individual_cap(), None);
    }

    #[test]
    fn exchange_rates_decay_over_phases() {
        assert!(Phase::Seed.exchange_rate() > Phase::General.exchange_rate());
        assert!(Phase::General.exchange_rate() > Phase::Open.exchange_rate());
    }

    #[test]
    fn headroom_shrinks_with_contributions() {
        let cap = Phase::Seed.individual_cap();
        let contributed = U256::from(1_400u64) * unit();

        let headroom = contribution_headroom(cap, contributed).unwrap();
        assert_eq!(headroom, U256::from(100u64) * unit());
    }

    #[test]
    fn headroom_saturates_at_zero() {
        let cap = Some(U256::from(100u64));
        let headroom = contribution_headroom(cap, U256::from(250u64)).unwrap();
        assert!(headroom.is_zero());
    }

    #[test]
    fn headroom_is_unlimited_in_open_phase() {
        assert_eq!(contribution_headroom(Phase::Open.individual_cap(), U256::MAX), None);
    }

    #[test]
    fn motes_round_trip() {
        let amount = U256::from(1_234_567u64);
        let motes = amount_to_motes(amount).unwrap();
        assert_eq!(attached_to_amount(motes), Some(amount));
    }

    #[test]
    fn oversized_attached_value_is_rejected() {
        let value = U512::from(u128::MAX) + U512::one();
        assert_eq!(attached_to_amount(value), None);
    }
}
