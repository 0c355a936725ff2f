//! KudiCoin (KDC) Token Contract
//!
//! 9-decimal sale token with protocol-controlled minting. Only authorized
//! protocol contracts (the Ico and the LiquidityPool) can mint or move
//! balances for settlement.
//!
//! Carries the sale's treasury tax: when enabled by the admin, ordinary
//! transfers divert 2% of the amount to the treasury address. Mints and
//! protocol settlement transfers are never taxed.

use odra::casper_types::U256;
use odra::prelude::*;

use crate::errors::IcoError;
use crate::events::{Mint, Transfer};
use crate::types::unit;

/// Transfer tax in basis points (2%)
pub const TAX_BPS: u64 = 200;

/// Hard supply cap: 500,000 KDC.
pub fn max_supply() -> U256 {
    U256::from(500_000u64) * unit()
}

/// KudiCoin Token Contract
#[odra::module(events = [Transfer, Mint])]
pub struct KudiCoin {
    /// Token name
    name: Var<String>,
    /// Token symbol
    symbol: Var<String>,
    /// Decimals (9, native Casper precision)
    decimals: Var<u8>,
    /// Total supply
    total_supply: Var<U256>,
    /// Balance mapping
    balances: Mapping<Address, U256>,
    /// Allowance mapping (owner -> spender -> amount)
    allowances: Mapping<(Address, Address), U256>,
    /// Admin address (grants minters, toggles tax)
    admin: Var<Address>,
    /// Treasury address receiving the transfer tax
    treasury: Var<Address>,
    /// Whether the transfer tax is active
    tax_enabled: Var<bool>,
    /// Authorized minters (protocol contracts)
    authorized_minters: Mapping<Address, bool>,
}

#[odra::module]
impl KudiCoin {
    /// Initialize the token
    pub fn init(&mut self, admin: Address, treasury: Address) {
        self.name.set(String::from("KudiCoin"));
        self.symbol.set(String::from("KDC"));
        self.decimals.set(9);
        self.total_supply.set(U256::zero());
        self.admin.set(admin);
        self.treasury.set(treasury);
        self.tax_enabled.set(false);
    }

    // ========== Standard Token Functions ==========

    /// Get token name
    pub fn name(&self) -> String {
        self.name.get().unwrap_or_else(|| String::from("KudiCoin"))
    }

    /// Get token symbol
    pub fn symbol(&self) -> String {
        self.symbol.get().unwrap_or_else(|| String::from("KDC"))
    }

    /// Get decimals
    pub fn decimals(&self) -> u8 {
        self.decimals.get().unwrap_or(9)
    }

    /// Get total supply
    pub fn total_supply(&self) -> U256 {
        self.total_supply.get().unwrap_or(U256::zero())
    }

    /// Get balance of an account
    pub fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).unwrap_or(U256::zero())
    }

    /// Get allowance for spender
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or(U256::zero())
    }

    /// Transfer tokens to recipient (taxed when the tax is enabled)
    pub fn transfer(&mut self, recipient: Address, amount: U256) -> bool {
        let sender = self.env().caller();
        self.transfer_taxed(sender, recipient, amount);
        true
    }

    /// Approve spender to spend tokens
    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        let owner = self.env().caller();
        self.allowances.set(&(owner, spender), amount);
        true
    }

    /// Transfer tokens from owner to recipient (requires allowance)
    pub fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256) -> bool {
        let spender = self.env().caller();

        let current_allowance = self.allowance(owner, spender);
        if current_allowance < amount {
            self.env().revert(IcoError::InsufficientTokenBalance);
        }

        self.allowances.set(&(owner, spender), current_allowance - amount);
        self.transfer_taxed(owner, recipient, amount);
        true
    }

    // ========== Protocol Functions (Restricted) ==========

    /// Mint new tokens (only authorized minters)
    pub fn mint(&mut self, to: Address, amount: U256) {
        self.require_authorized_minter();

        let new_supply = self
            .total_supply()
            .checked_add(amount)
            .unwrap_or_else(|| self.env().revert(IcoError::AmountOverflow));
        if new_supply > max_supply() {
            self.env().revert(IcoError::SupplyCapExceeded);
        }

        let balance = self.balance_of(to);
        self.balances.set(&to, balance + amount);
        self.total_supply.set(new_supply);

        self.env().emit_event(Mint { to, amount });
    }

    /// Untaxed settlement transfer between accounts (only authorized minters).
    ///
    /// Used by the pool to pull swap/deposit inputs and pay out reserves.
    pub fn protocol_transfer(&mut self, from: Address, to: Address, amount: U256) {
        self.require_authorized_minter();
        self.transfer_internal(from, to, amount);
    }

    // ========== Admin Functions ==========

    /// Add an authorized minter (admin only)
    pub fn add_minter(&mut self, minter: Address) {
        self.require_admin();
        self.authorized_minters.set(&minter, true);
    }

    /// Remove an authorized minter (admin only)
    pub fn remove_minter(&mut self, minter: Address) {
        self.require_admin();
        self.authorized_minters.set(&minter, false);
    }

    /// Check if address is an authorized minter
    pub fn is_minter(&self, account: Address) -> bool {
        self.authorized_minters.get(&account).unwrap_or(false)
    }

    /// Enable or disable the 2% treasury tax (admin only)
    pub fn set_tax_enabled(&mut self, enabled: bool) {
        self.require_admin();
        self.tax_enabled.set(enabled);
    }

    /// Whether the transfer tax is active
    pub fn get_tax_enabled(&self) -> bool {
        self.tax_enabled.get().unwrap_or(false)
    }

    /// Get the treasury address
    pub fn get_treasury(&self) -> Option<Address> {
        self.treasury.get()
    }

    /// Treasury's accumulated balance (tax receipts and anything else sent there)
    pub fn get_treasury_balance(&self) -> U256 {
        match self.treasury.get() {
            Some(treasury) => self.balance_of(treasury),
            None => U256::zero(),
        }
    }

    // ========== Internal Functions ==========

    fn transfer_taxed(&mut self, from: Address, to: Address, amount: U256) {
        let tax = if self.get_tax_enabled() {
            let scaled = amount
                .checked_mul(U256::from(TAX_BPS))
                .unwrap_or_else(|| self.env().revert(IcoError::AmountOverflow));
            scaled / U256::from(crate::math::BPS_SCALE)
        } else {
            U256::zero()
        };

        if !tax.is_zero() {
            let treasury = match self.treasury.get() {
                Some(treasury) => treasury,
                None => self.env().revert(IcoError::InvalidConfig),
            };
            self.transfer_internal(from, treasury, tax);
        }
        self.transfer_internal(from, to, amount - tax);
    }

    fn transfer_internal(&mut self, from: Address, to: Address, amount: U256) {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            self.env().revert(IcoError::InsufficientTokenBalance);
        }

        self.balances.set(&from, from_balance - amount);
        let to_balance = self.balance_of(to);
        self.balances.set(&to, to_balance + amount);

        self.env().emit_event(Transfer { from, to, amount });
    }

    fn require_authorized_minter(&self) {
        let caller = self.env().caller();
        if !self.is_minter(caller) {
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
