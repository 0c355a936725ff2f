//! Router contract, the user-facing entry point for the AMM.
//!
//! Validates direction and ratio, then forwards into the pool with the acting
//! account passed explicitly; the pool settles both asset legs itself.

use odra::casper_types::{runtime_args, U256, U512};
use odra::prelude::*;
use odra::CallDef;

use crate::errors::IcoError;
use crate::liquidity_pool::RATIO_TOLERANCE_BPS;
use crate::math;
use crate::types::{attached_to_amount, PoolInfo};

/// Router Contract
#[odra::module]
pub struct Router {
    /// LiquidityPool contract address
    pool: Var<Address>,
}

#[odra::module]
impl Router {
    /// Initialize the router with the pool address
    pub fn init(&mut self, pool: Address) {
        self.pool.set(pool);
    }

    /// Provide liquidity: the attached CSPR plus `token_amount` KDC.
    ///
    /// Against a non-empty pool the token amount must match what the current
    /// reserve ratio requires for the attached CSPR, within the pool's
    /// tolerance; otherwise the call fails with `RatioMismatch` before any
    /// funds move. Minted shares are credited to the caller.
    #[odra(payable)]
    pub fn add_liquidity(&mut self, token_amount: U256) -> U256 {
        let caller = self.env().caller();
        let attached = self.env().attached_value();
        let cspr_amount = self.attached_amount(attached);

        if cspr_amount.is_zero() || token_amount.is_zero() {
            self.env().revert(IcoError::ZeroAmount);
        }

        let info = self.pool_info();
        if !info.total_shares.is_zero() {
            let within = math::ratio_within_tolerance(
                cspr_amount,
                token_amount,
                info.reserve_cspr,
                info.reserve_token,
                RATIO_TOLERANCE_BPS,
            );
            match within {
                Some(true) => {}
                Some(false) => self.env().revert(IcoError::RatioMismatch),
                None => self.env().revert(IcoError::AmountOverflow),
            }
        }

        let args = runtime_args! {
            "provider" => caller,
            "token_amount" => token_amount,
        };
        let deposit = CallDef::new("deposit", true, args).with_amount(attached);
        self.env().call_contract(self.pool_address(), deposit)
    }

    /// Withdraw the caller's entire share balance; the pool pays both assets
    /// directly to the caller.
    pub fn remove_liquidity(&mut self) -> (U256, U256) {
        let caller = self.env().caller();

        let balance_args = runtime_args! { "account" => caller };
        let held: U256 = self
            .env()
            .call_contract(self.pool_address(), CallDef::new("balance_of", false, balance_args));
        if held.is_zero() {
            self.env().revert(IcoError::InsufficientShares);
        }

        let args = runtime_args! {
            "provider" => caller,
            "shares_to_burn" => held,
        };
        self.env()
            .call_contract(self.pool_address(), CallDef::new("withdraw", true, args))
    }

    /// Directional swap: exactly one of the attached CSPR and
    /// `token_amount_in` must be non-zero.
    #[odra(payable)]
    pub fn trade(&mut self, token_amount_in: U256) -> U256 {
        let caller = self.env().caller();
        let attached = self.env().attached_value();

        match (attached.is_zero(), token_amount_in.is_zero()) {
            (false, true) => {
                let args = runtime_args! { "trader" => caller };
                let swap = CallDef::new("swap_cspr_for_token", true, args).with_amount(attached);
                self.env().call_contract(self.pool_address(), swap)
            }
            (true, false) => {
                let args = runtime_args! {
                    "trader" => caller,
                    "token_in" => token_amount_in,
                };
                let swap = CallDef::new("swap_token_for_cspr", true, args);
                self.env().call_contract(self.pool_address(), swap)
            }
            _ => self.env().revert(IcoError::InvalidSwapDirection),
        }
    }

    /// Get the pool address
    pub fn get_pool(&self) -> Option<Address> {
        self.pool.get()
    }

    // ========== Internal Functions ==========

    fn pool_address(&self) -> Address {
        match self.pool.get() {
            Some(pool) => pool,
            None => self.env().revert(IcoError::InvalidConfig),
        }
    }

    fn pool_info(&self) -> PoolInfo {
        let args = runtime_args! {};
        self.env()
            .call_contract(self.pool_address(), CallDef::new("get_reserves", false, args))
    }

    fn attached_amount(&self, attached: U512) -> U256 {
        match attached_to_amount(attached) {
            Some(amount) => amount,
            None => self.env().revert(IcoError::AmountOverflow),
        }
    }
}
