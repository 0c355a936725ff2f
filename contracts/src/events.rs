//! Events emitted by the sale and AMM contracts.
//!
//! The frontend consumes these through the node's event log; the contracts
//! expose no push model beyond emitting them.

use odra::casper_types::U256;
use odra::prelude::*;

use crate::types::Phase;

/// A whitelisted investor contributed to the current phase.
#[odra::event]
pub struct Contributed {
    pub contributor: Address,
    pub phase: Phase,
    pub amount: U256,
}

/// An investor was added to the whitelist.
#[odra::event]
pub struct InvestorWhiteListed {
    pub investor: Address,
}

/// The fundraising phase changed (forward move or admin override).
#[odra::event]
pub struct PhaseMoved {
    pub phase: Phase,
}

/// Accrued token entitlement was released to its owner.
#[odra::event]
pub struct TokensReleased {
    pub recipient: Address,
    pub amount: U256,
}

/// Contract ownership changed hands. `new_owner` is `None` after renounce.
#[odra::event]
pub struct OwnershipTransferred {
    pub previous_owner: Option<Address>,
    pub new_owner: Option<Address>,
}

/// Contributions were paused by the owner.
#[odra::event]
pub struct FundingPaused {}

/// Contributions were resumed by the owner.
#[odra::event]
pub struct FundingResumed {}

/// Liquidity entered the pool and shares were minted.
#[odra::event]
pub struct LiquidityDeposited {
    pub provider: Address,
    pub cspr_amount: U256,
    pub token_amount: U256,
    pub shares: U256,
}

/// Shares were burned and both reserves paid out.
#[odra::event]
pub struct LiquidityWithdrawn {
    pub provider: Address,
    pub shares: U256,
    pub cspr_amount: U256,
    pub token_amount: U256,
}

/// A directional swap executed against the reserves.
#[odra::event]
pub struct Swapped {
    pub trader: Address,
    pub cspr_in: U256,
    pub token_in: U256,
    pub cspr_out: U256,
    pub token_out: U256,
}

/// Token balance moved between accounts.
#[odra::event]
pub struct Transfer {
    pub from: Address,
    pub to: Address,
    pub amount: U256,
}

/// New token supply minted to an account.
#[odra::event]
pub struct Mint {
    pub to: Address,
    pub amount: U256,
}
