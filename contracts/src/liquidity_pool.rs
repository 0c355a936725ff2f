//! LiquidityPool Contract
//!
//! Constant-product market between native CSPR and KudiCoin:
//! - Reserves tracked in contract storage at native 9-decimal precision
//! - Proportional pool shares minted on deposit, burned on withdrawal
//! - Swap execution with a 1% fee skimmed into the reserves
//!
//! Mutations only accept authorized callers (the Router and the Ico), which
//! pass the acting account explicitly. Reserves and share balances are always
//! updated before any outbound transfer, and every swap re-checks that
//! `reserve_cspr * reserve_token` did not decrease.

use odra::casper_types::{runtime_args, U256};
use odra::prelude::*;
use odra::CallDef;

use crate::errors::IcoError;
use crate::events::{LiquidityDeposited, LiquidityWithdrawn, Swapped};
use crate::math;
use crate::types::{amount_to_motes, attached_to_amount, PoolInfo};

/// Swap fee in basis points (1%)
pub const SWAP_FEE_BPS: u32 = 100;

/// Maximum deviation from the reserve ratio a deposit may carry (1%)
pub const RATIO_TOLERANCE_BPS: u32 = 100;

/// LiquidityPool Contract
#[odra::module(events = [LiquidityDeposited, LiquidityWithdrawn, Swapped])]
pub struct LiquidityPool {
    /// Pool admin (registers authorized callers)
    admin: Var<Address>,
    /// KudiCoin token contract address
    token: Var<Address>,
    /// Native (CSPR) reserve
    reserve_cspr: Var<U256>,
    /// Token (KDC) reserve
    reserve_token: Var<U256>,
    /// Total pool shares outstanding
    total_shares: Var<U256>,
    /// Pool-share balances
    shares: Mapping<Address, U256>,
    /// Contracts allowed to drive mutations (Router, Ico)
    authorized_callers: Mapping<Address, bool>,
}

#[odra::module]
impl LiquidityPool {
    /// Initialize the pool
    pub fn init(&mut self, admin: Address, token: Address) {
        self.admin.set(admin);
        self.token.set(token);
        self.reserve_cspr.set(U256::zero());
        self.reserve_token.set(U256::zero());
        self.total_shares.set(U256::zero());
    }

    // ========== Liquidity ==========

    /// Deposit the attached CSPR plus `token_amount` KDC on behalf of
    /// `provider`, minting pool shares.
    ///
    /// An empty pool accepts any ratio and mints `sqrt(cspr * token)` shares;
    /// otherwise the amounts must match the reserve ratio within tolerance
    /// and the tighter proportional bound is minted.
    #[odra(payable)]
    pub fn deposit(&mut self, provider: Address, token_amount: U256) -> U256 {
        self.require_authorized();

        let cspr_amount = self.attached_amount();
        if cspr_amount.is_zero() || token_amount.is_zero() {
            self.env().revert(IcoError::ZeroAmount);
        }

        let reserve_cspr = self.get_reserve_cspr();
        let reserve_token = self.get_reserve_token();
        let total = self.get_total_shares();

        let minted = if total.is_zero() {
            let product = match cspr_amount.checked_mul(token_amount) {
                Some(product) => product,
                None => self.env().revert(IcoError::AmountOverflow),
            };
            math::integer_sqrt(product)
        } else {
            match math::ratio_within_tolerance(
                cspr_amount,
                token_amount,
                reserve_cspr,
                reserve_token,
                RATIO_TOLERANCE_BPS,
            ) {
                Some(true) => {}
                Some(false) => self.env().revert(IcoError::RatioMismatch),
                None => self.env().revert(IcoError::AmountOverflow),
            }
            match math::proportional_shares(
                total,
                cspr_amount,
                reserve_cspr,
                token_amount,
                reserve_token,
            ) {
                Some(minted) => minted,
                None => self.env().revert(IcoError::AmountOverflow),
            }
        };
        if minted.is_zero() {
            self.env().revert(IcoError::InsufficientLiquidity);
        }

        self.pull_token(provider, token_amount);

        self.reserve_cspr.set(reserve_cspr + cspr_amount);
        self.reserve_token.set(reserve_token + token_amount);
        self.total_shares.set(total + minted);
        let held = self.balance_of(provider);
        self.shares.set(&provider, held + minted);

        self.env().emit_event(LiquidityDeposited {
            provider,
            cspr_amount,
            token_amount,
            shares: minted,
        });
        minted
    }

    /// Burn `shares_to_burn` of `provider`'s shares and pay out both reserves
    /// proportionally, truncated toward zero.
    pub fn withdraw(&mut self, provider: Address, shares_to_burn: U256) -> (U256, U256) {
        self.require_authorized();

        if shares_to_burn.is_zero() {
            self.env().revert(IcoError::ZeroAmount);
        }
        let held = self.balance_of(provider);
        if held < shares_to_burn {
            self.env().revert(IcoError::InsufficientShares);
        }

        let reserve_cspr = self.get_reserve_cspr();
        let reserve_token = self.get_reserve_token();
        let total = self.get_total_shares();

        let cspr_amount = match math::proportional_amount(reserve_cspr, shares_to_burn, total) {
            Some(amount) => amount,
            None => self.env().revert(IcoError::AmountOverflow),
        };
        let token_amount = match math::proportional_amount(reserve_token, shares_to_burn, total) {
            Some(amount) => amount,
            None => self.env().revert(IcoError::AmountOverflow),
        };

        // effects before interactions
        self.shares.set(&provider, held - shares_to_burn);
        self.total_shares.set(total - shares_to_burn);
        self.reserve_cspr.set(reserve_cspr - cspr_amount);
        self.reserve_token.set(reserve_token - token_amount);

        self.push_native(provider, cspr_amount);
        self.push_token(provider, token_amount);

        self.env().emit_event(LiquidityWithdrawn {
            provider,
            shares: shares_to_burn,
            cspr_amount,
            token_amount,
        });
        (cspr_amount, token_amount)
    }

    // ========== Swaps ==========

    /// Swap the attached CSPR for KDC on behalf of `trader`.
    #[odra(payable)]
    pub fn swap_cspr_for_token(&mut self, trader: Address) -> U256 {
        self.require_authorized();

        let cspr_in = self.attached_amount();
        if cspr_in.is_zero() {
            self.env().revert(IcoError::ZeroAmount);
        }

        let reserve_cspr = self.get_reserve_cspr();
        let reserve_token = self.get_reserve_token();
        let token_out = self.quote_or_revert(cspr_in, reserve_cspr, reserve_token);

        self.apply_swap(reserve_cspr + cspr_in, reserve_token - token_out);
        self.push_token(trader, token_out);

        self.env().emit_event(Swapped {
            trader,
            cspr_in,
            token_in: U256::zero(),
            cspr_out: U256::zero(),
            token_out,
        });
        token_out
    }

    /// Swap `token_in` KDC for CSPR on behalf of `trader`.
    pub fn swap_token_for_cspr(&mut self, trader: Address, token_in: U256) -> U256 {
        self.require_authorized();

        if token_in.is_zero() {
            self.env().revert(IcoError::ZeroAmount);
        }

        let reserve_cspr = self.get_reserve_cspr();
        let reserve_token = self.get_reserve_token();
        let cspr_out = self.quote_or_revert(token_in, reserve_token, reserve_cspr);

        self.pull_token(trader, token_in);
        self.apply_swap(reserve_cspr - cspr_out, reserve_token + token_in);
        self.push_native(trader, cspr_out);

        self.env().emit_event(Swapped {
            trader,
            cspr_in: U256::zero(),
            token_in,
            cspr_out,
            token_out: U256::zero(),
        });
        cspr_out
    }

    /// Constant-product swap quote with the fee applied to `amount_in`.
    pub fn quote_swap(
        &self,
        amount_in: U256,
        reserve_in: U256,
        reserve_out: U256,
        fee_bps: u32,
    ) -> U256 {
        match math::quote_swap(amount_in, reserve_in, reserve_out, fee_bps) {
            Some(amount_out) => amount_out,
            None => self.env().revert(IcoError::InsufficientLiquidity),
        }
    }

    // ========== Views ==========

    /// Reserve and share snapshot
    pub fn get_reserves(&self) -> PoolInfo {
        PoolInfo {
            reserve_cspr: self.get_reserve_cspr(),
            reserve_token: self.get_reserve_token(),
            total_shares: self.get_total_shares(),
        }
    }

    /// Caller's pool-share balance
    pub fn get_token_balance(&self) -> U256 {
        self.balance_of(self.env().caller())
    }

    /// Pool-share balance of an account
    pub fn balance_of(&self, account: Address) -> U256 {
        self.shares.get(&account).unwrap_or(U256::zero())
    }

    /// Total pool shares outstanding
    pub fn get_total_shares(&self) -> U256 {
        self.total_shares.get().unwrap_or(U256::zero())
    }

    // ========== Admin ==========

    /// Authorize a caller contract (admin only)
    pub fn add_authorized_caller(&mut self, caller: Address) {
        self.require_admin();
        self.authorized_callers.set(&caller, true);
    }

    /// Revoke a caller contract (admin only)
    pub fn remove_authorized_caller(&mut self, caller: Address) {
        self.require_admin();
        self.authorized_callers.set(&caller, false);
    }

    /// Check if an address may drive pool mutations
    pub fn is_authorized_caller(&self, account: Address) -> bool {
        self.authorized_callers.get(&account).unwrap_or(false)
    }

    // ========== Internal Functions ==========

    fn get_reserve_cspr(&self) -> U256 {
        self.reserve_cspr.get().unwrap_or(U256::zero())
    }

    fn get_reserve_token(&self) -> U256 {
        self.reserve_token.get().unwrap_or(U256::zero())
    }

    fn attached_amount(&self) -> U256 {
        match attached_to_amount(self.env().attached_value()) {
            Some(amount) => amount,
            None => self.env().revert(IcoError::AmountOverflow),
        }
    }

    fn quote_or_revert(&self, amount_in: U256, reserve_in: U256, reserve_out: U256) -> U256 {
        let amount_out = self.quote_swap(amount_in, reserve_in, reserve_out, SWAP_FEE_BPS);
        if amount_out.is_zero() || amount_out >= reserve_out {
            self.env().revert(IcoError::InsufficientLiquidity);
        }
        amount_out
    }

    /// Write post-swap reserves, enforcing that k never decreases.
    ///
    /// Reserves are bounded by the attached-value range and the token supply
    /// cap, so the products fit U256; a genuine overflow still reverts.
    fn apply_swap(&mut self, new_reserve_cspr: U256, new_reserve_token: U256) {
        let k_before = self
            .get_reserve_cspr()
            .checked_mul(self.get_reserve_token())
            .unwrap_or_else(|| self.env().revert(IcoError::AmountOverflow));
        let k_after = new_reserve_cspr
            .checked_mul(new_reserve_token)
            .unwrap_or_else(|| self.env().revert(IcoError::AmountOverflow));
        if k_after < k_before {
            self.env().revert(IcoError::InvariantViolation);
        }

        self.reserve_cspr.set(new_reserve_cspr);
        self.reserve_token.set(new_reserve_token);
    }

    fn token_address(&self) -> Address {
        match self.token.get() {
            Some(token) => token,
            None => self.env().revert(IcoError::InvalidConfig),
        }
    }

    fn pull_token(&mut self, from: Address, amount: U256) {
        let pool = self.env().self_address();
        let args = runtime_args! { "from" => from, "to" => pool, "amount" => amount };
        let call = CallDef::new("protocol_transfer", true, args);
        self.env().call_contract::<()>(self.token_address(), call);
    }

    fn push_token(&mut self, to: Address, amount: U256) {
        let pool = self.env().self_address();
        let args = runtime_args! { "from" => pool, "to" => to, "amount" => amount };
        let call = CallDef::new("protocol_transfer", true, args);
        self.env().call_contract::<()>(self.token_address(), call);
    }

    fn push_native(&mut self, to: Address, amount: U256) {
        let motes = match amount_to_motes(amount) {
            Some(motes) => motes,
            None => self.env().revert(IcoError::AmountOverflow),
        };
        self.env().transfer_tokens(&to, &motes);
    }

    fn require_authorized(&self) {
        let caller = self.env().caller();
        if !self.is_authorized_caller(caller) {
            self.env().revert(IcoError::UnauthorizedProtocol);
        }
    }

    fn require_admin(&self) {
        let caller = self.env().caller();
        if self.admin.get() != Some(caller) {
            self.env().revert(IcoError::NotAuthorized);
        }
    }
}
