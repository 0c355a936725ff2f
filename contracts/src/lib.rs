//! KudiCoin ICO Contracts
//!
//! Casper-native phased token sale with a constant-product liquidity market.
//!
//! ## Architecture
//!
//! - **Ico**: whitelist, phase state machine, contribution book, token
//!   entitlements, treasury sweep, liquidity seeding
//! - **KudiCoin (KDC)**: sale token with protocol-controlled minting and an
//!   admin-toggleable treasury tax
//! - **LiquidityPool**: CSPR/KDC reserves, pool shares, swap execution
//! - **Router**: user-facing add/remove liquidity and directional trades
//!
//! ## Invariants
//!
//! - Per-phase individual caps are never exceeded; totals only grow
//! - `reserve_cspr * reserve_token` never decreases across a swap
//! - Ledger state is written before any external transfer
//!   (checks-effects-interactions)

#![cfg_attr(target_arch = "wasm32", no_std)]

#[cfg(target_arch = "wasm32")]
extern crate alloc;

// Re-export odra for downstream usage
pub use odra;

// Core module declarations
pub mod errors;
pub mod events;
pub mod math;
pub mod types;

// Contract modules
pub mod ico;
pub mod liquidity_pool;
pub mod router;
pub mod token;
