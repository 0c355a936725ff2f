//! Ico Contract
//!
//! Phased contribution ledger for the KudiCoin sale:
//! - Whitelist gating and owner-only administration
//! - Seed -> General -> Open phase state machine with per-phase individual caps
//! - Per-(investor, phase) contribution book and running totals
//! - Token entitlements accrued at the phase exchange rate, released on demand
//! - Treasury sweep and one-way liquidity seeding into the pool
//!
//! Every release path follows checks-effects-interactions: ledger state is
//! written before any external transfer.

use odra::casper_types::{runtime_args, U256};
use odra::prelude::*;
use odra::CallDef;

use crate::errors::IcoError;
use crate::events::{
    Contributed, FundingPaused, FundingResumed, InvestorWhiteListed, OwnershipTransferred,
    PhaseMoved, TokensReleased,
};
use crate::types::{amount_to_motes, attached_to_amount, contribution_headroom, FundingStatus, Phase};

/// Ico Contract
#[odra::module(events = [
    Contributed,
    FundingPaused,
    FundingResumed,
    InvestorWhiteListed,
    OwnershipTransferred,
    PhaseMoved,
    TokensReleased,
])]
pub struct Ico {
    /// Contract owner; `None` once ownership is renounced
    owner: Var<Option<Address>>,
    /// Treasury receiving swept contributions
    treasury: Var<Address>,
    /// KudiCoin token contract address
    token: Var<Address>,
    /// Whether contributions are blocked
    paused: Var<bool>,
    /// Current fundraising phase
    current_phase: Var<Phase>,
    /// Approved contributor set
    whitelist: Mapping<Address, bool>,
    /// Contributions per (investor, phase); never deleted (audit trail)
    contributions: Mapping<(Address, Phase), U256>,
    /// Cumulative contributions per phase across all investors
    phase_totals: Mapping<Phase, U256>,
    /// Cumulative contributions across all phases
    total_contributed: Var<U256>,
    /// Accrued, unreleased token entitlements
    entitlements: Mapping<Address, U256>,
}

#[odra::module]
impl Ico {
    /// Initialize the sale. The deployer becomes the owner; phase starts at Seed.
    pub fn init(&mut self, treasury: Address, token: Address) {
        let deployer = self.env().caller();
        self.owner.set(Some(deployer));
        self.treasury.set(treasury);
        self.token.set(token);
        self.paused.set(false);
        self.current_phase.set(Phase::Seed);
        self.total_contributed.set(U256::zero());

        self.env().emit_event(OwnershipTransferred {
            previous_owner: None,
            new_owner: Some(deployer),
        });
    }

    // ========== Whitelist ==========

    /// Add an investor to the whitelist (owner only).
    ///
    /// Re-adding an already whitelisted investor is a no-op, not an error.
    pub fn white_list_investor(&mut self, investor: Address) {
        self.require_owner();

        if self.is_whitelisted(investor) {
            return;
        }

        self.whitelist.set(&investor, true);
        self.env().emit_event(InvestorWhiteListed { investor });
    }

    /// Check if an investor is whitelisted
    pub fn is_whitelisted(&self, investor: Address) -> bool {
        self.whitelist.get(&investor).unwrap_or(false)
    }

    // ========== Phase Ledger ==========

    /// Advance to the immediate next phase (owner only).
    pub fn move_phase(&mut self, next_phase: Phase) {
        self.require_owner();

        let current = self.get_current_phase();
        if current.successor() != Some(next_phase) {
            self.env().revert(IcoError::InvalidPhaseTransition);
        }

        self.current_phase.set(next_phase);
        self.env().emit_event(PhaseMoved { phase: next_phase });
    }

    /// Force an arbitrary phase, including rollback (owner only).
    ///
    /// Recovery escape hatch; accumulated per-phase totals are kept.
    pub fn set_phase(&mut self, phase: Phase) {
        self.require_owner();
        self.current_phase.set(phase);
        self.env().emit_event(PhaseMoved { phase });
    }

    /// Get the current phase
    pub fn get_current_phase(&self) -> Phase {
        self.current_phase.get().unwrap_or(Phase::Seed)
    }

    /// Cumulative amount contributed during a phase across all investors
    pub fn get_phase_contribution(&self, phase: Phase) -> U256 {
        self.phase_totals.get(&phase).unwrap_or(U256::zero())
    }

    // ========== Pause ==========

    /// Pause contributions (owner only)
    pub fn pause_funding(&mut self) {
        self.require_owner();
        self.paused.set(true);
        self.env().emit_event(FundingPaused {});
    }

    /// Resume contributions (owner only)
    pub fn resume_funding(&mut self) {
        self.require_owner();
        self.paused.set(false);
        self.env().emit_event(FundingResumed {});
    }

    /// Whether contributions are currently paused
    pub fn get_funding_status(&self) -> bool {
        self.paused.get().unwrap_or(false)
    }

    // ========== Contribution Book ==========

    /// Contribute the attached CSPR to the current phase.
    #[odra(payable)]
    pub fn contribute(&mut self) {
        let contributor = self.env().caller();

        if !self.is_whitelisted(contributor) {
            self.env().revert(IcoError::NotWhitelisted);
        }
        if self.get_funding_status() {
            self.env().revert(IcoError::FundingPaused);
        }

        let amount = match attached_to_amount(self.env().attached_value()) {
            Some(amount) => amount,
            None => self.env().revert(IcoError::AmountOverflow),
        };
        if amount.is_zero() {
            self.env().revert(IcoError::ZeroAmount);
        }

        let phase = self.get_current_phase();
        let already = self.contributions.get(&(contributor, phase)).unwrap_or(U256::zero());
        if let Some(headroom) = contribution_headroom(phase.individual_cap(), already) {
            if amount > headroom {
                self.env().revert(IcoError::IndividualLimitExceeded);
            }
        }

        let entitlement = match amount.checked_mul(U256::from(phase.exchange_rate())) {
            Some(entitlement) => entitlement,
            None => self.env().revert(IcoError::AmountOverflow),
        };

        self.contributions.set(&(contributor, phase), already + amount);
        let phase_total = self.get_phase_contribution(phase);
        self.phase_totals.set(&phase, phase_total + amount);
        self.total_contributed.set(self.get_total_contributions() + amount);

        let accrued = self.entitlements.get(&contributor).unwrap_or(U256::zero());
        self.entitlements.set(&contributor, accrued + entitlement);

        self.env().emit_event(Contributed {
            contributor,
            phase,
            amount,
        });
    }

    /// Caller's cumulative contribution across all phases
    pub fn get_individual_contribution(&self) -> U256 {
        let caller = self.env().caller();
        let mut total = U256::zero();
        for phase in Phase::all() {
            total = total + self.contributions.get(&(caller, phase)).unwrap_or(U256::zero());
        }
        total
    }

    /// Total contributions across all phases and investors
    pub fn get_total_contributions(&self) -> U256 {
        self.total_contributed.get().unwrap_or(U256::zero())
    }

    /// Funding ledger snapshot
    pub fn get_funding_state(&self) -> FundingStatus {
        FundingStatus {
            current_phase: self.get_current_phase(),
            paused: self.get_funding_status(),
            total_contributed: self.get_total_contributions(),
        }
    }

    // ========== Token Release ==========

    /// Release the caller's accrued token entitlement.
    ///
    /// The entitlement is zeroed before the mint so a reentrant call cannot
    /// release twice.
    pub fn withdraw_tokens(&mut self) {
        let recipient = self.env().caller();

        let owed = self.entitlements.get(&recipient).unwrap_or(U256::zero());
        if owed.is_zero() {
            self.env().revert(IcoError::ZeroAmount);
        }

        self.entitlements.set(&recipient, U256::zero());
        self.mint_token(recipient, owed);

        self.env().emit_event(TokensReleased {
            recipient,
            amount: owed,
        });
    }

    /// Caller's accrued, unreleased token entitlement
    pub fn get_token_entitlement(&self) -> U256 {
        let caller = self.env().caller();
        self.entitlements.get(&caller).unwrap_or(U256::zero())
    }

    /// Caller's released KudiCoin balance
    pub fn get_token_balance(&self) -> U256 {
        let caller = self.env().caller();
        let token = self.token_address();
        let args = runtime_args! { "account" => caller };
        self.env().call_contract(token, CallDef::new("balance_of", false, args))
    }

    // ========== Treasury & Liquidity ==========

    /// Sweep the collected native balance to the treasury (owner only).
    ///
    /// A no-op when the balance is zero; callable any number of times.
    pub fn withdraw(&mut self) {
        self.require_owner();

        let balance = self.env().self_balance();
        if balance.is_zero() {
            return;
        }

        let treasury = match self.treasury.get() {
            Some(treasury) => treasury,
            None => self.env().revert(IcoError::InvalidConfig),
        };
        self.env().transfer_tokens(&treasury, &balance);
    }

    /// Move collected CSPR plus freshly minted KDC into the liquidity pool
    /// (owner only).
    ///
    /// The first call against an empty pool seeds the price. Later calls go
    /// through the pool's ratio check and revert when the amounts would move
    /// the price beyond its tolerance. Minted shares are held by this
    /// contract.
    pub fn move_invested_cspr_to_liquidity_pool(
        &mut self,
        pool: Address,
        cspr_amount: U256,
        token_amount: U256,
    ) {
        self.require_owner();

        if cspr_amount.is_zero() || token_amount.is_zero() {
            self.env().revert(IcoError::ZeroAmount);
        }
        let motes = match amount_to_motes(cspr_amount) {
            Some(motes) => motes,
            None => self.env().revert(IcoError::AmountOverflow),
        };
        if motes > self.env().self_balance() {
            self.env().revert(IcoError::InsufficientTokenBalance);
        }

        let ico_address = self.env().self_address();
        self.mint_token(ico_address, token_amount);

        let args = runtime_args! {
            "provider" => ico_address,
            "token_amount" => token_amount,
        };
        let deposit = CallDef::new("deposit", true, args).with_amount(motes);
        self.env().call_contract::<U256>(pool, deposit);
    }

    // ========== Ownership ==========

    /// Transfer ownership to a new owner (owner only)
    pub fn transfer_ownership(&mut self, new_owner: Address) {
        self.require_owner();

        let previous_owner = self.get_owner();
        self.owner.set(Some(new_owner));
        self.env().emit_event(OwnershipTransferred {
            previous_owner,
            new_owner: Some(new_owner),
        });
    }

    /// Renounce ownership, permanently disabling privileged entry points
    /// (owner only).
    pub fn renounce_ownership(&mut self) {
        self.require_owner();

        let previous_owner = self.get_owner();
        self.owner.set(None);
        self.env().emit_event(OwnershipTransferred {
            previous_owner,
            new_owner: None,
        });
    }

    /// Get the current owner, `None` after renounce
    pub fn get_owner(&self) -> Option<Address> {
        self.owner.get().flatten()
    }

    // ========== Internal Functions ==========

    fn require_owner(&self) {
        let caller = self.env().caller();
        if self.get_owner() != Some(caller) {
            self.env().revert(IcoError::NotAuthorized);
        }
    }

    fn token_address(&self) -> Address {
        match self.token.get() {
            Some(token) => token,
            None => self.env().revert(IcoError::InvalidConfig),
        }
    }

    fn mint_token(&mut self, to: Address, amount: U256) {
        let token = self.token_address();
        let args = runtime_args! { "to" => to, "amount" => amount };
        self.env().call_contract::<()>(token, CallDef::new("mint", true, args));
    }
}
