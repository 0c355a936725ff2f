//! Deploy contracts to Casper livenet/testnet using Odra livenet environment.
//!
//! Usage:
//!   cargo run --bin deploy_livenet --release
//!
//! Requires .env file with:
//!   ODRA_CASPER_LIVENET_SECRET_KEY_PATH=/path/to/secret_key.pem
//!   ODRA_CASPER_LIVENET_NODE_ADDRESS=https://node.testnet.casper.network
//!   ODRA_CASPER_LIVENET_CHAIN_NAME=casper-test
//!   ODRA_CASPER_LIVENET_PAYMENT_AMOUNT=200000000000

use odra::host::Deployer;
use odra::prelude::*;

use kudi_ico_contracts::ico::{Ico, IcoInitArgs};
use kudi_ico_contracts::liquidity_pool::{LiquidityPool, LiquidityPoolInitArgs};
use kudi_ico_contracts::router::{Router, RouterInitArgs};
use kudi_ico_contracts::token::{KudiCoin, KudiCoinInitArgs};

fn main() {
    // Load environment from .env file
    dotenv::dotenv().ok();

    println!("=== KudiCoin ICO Livenet Deployment ===");
    println!();

    // Initialize Odra livenet environment
    let env = odra_casper_livenet_env::env();

    // Configure payment amount for deployments/calls (required for Casper 2.0 txs)
    let payment_amount: u64 = std::env::var("ODRA_CASPER_LIVENET_PAYMENT_AMOUNT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(200_000_000_000);
    env.set_gas(payment_amount);

    // Get deployer address; treasury defaults to the deployer
    let deployer = env.caller();
    println!("Deployer: {:?}", deployer);
    println!();

    // ==================== Phase 1: Token ====================
    println!("=== Phase 1: Deploying KudiCoin ===");
    println!();

    println!("Deploying KudiCoin...");
    let mut token = KudiCoin::deploy(
        &env,
        KudiCoinInitArgs {
            admin: deployer,
            treasury: deployer,
        },
    );
    let token_addr = token.address().clone();
    println!("KudiCoin deployed at: {:?}", token_addr);

    println!();

    // ==================== Phase 2: Pool, Router, Ico ====================
    println!("=== Phase 2: Deploying Pool, Router and Ico ===");
    println!();

    println!("Deploying LiquidityPool...");
    let mut pool = LiquidityPool::deploy(
        &env,
        LiquidityPoolInitArgs {
            admin: deployer,
            token: token_addr,
        },
    );
    let pool_addr = pool.address().clone();
    println!("LiquidityPool deployed at: {:?}", pool_addr);

    println!("Deploying Router...");
    let router = Router::deploy(&env, RouterInitArgs { pool: pool_addr });
    let router_addr = router.address().clone();
    println!("Router deployed at: {:?}", router_addr);

    println!("Deploying Ico...");
    let ico = Ico::deploy(
        &env,
        IcoInitArgs {
            treasury: deployer,
            token: token_addr,
        },
    );
    let ico_addr = ico.address().clone();
    println!("Ico deployed at: {:?}", ico_addr);

    println!();

    // ==================== Phase 3: Cross-contract Configuration ====================
    println!("=== Phase 3: Cross-contract Configuration ===");
    println!();

    // The Ico mints entitlements and seeds the pool; the pool settles
    // token legs through protocol transfers.
    println!("Authorizing Ico as token minter...");
    token.add_minter(ico_addr);
    println!("Done.");

    println!("Authorizing LiquidityPool as token minter...");
    token.add_minter(pool_addr);
    println!("Done.");

    println!("Authorizing Router on the pool...");
    pool.add_authorized_caller(router_addr);
    println!("Done.");

    println!("Authorizing Ico on the pool...");
    pool.add_authorized_caller(ico_addr);
    println!("Done.");

    println!();
    println!("=== Deployment Complete ===");
    println!();
    println!("Contract Addresses:");
    println!("  KudiCoin:       {:?}", token_addr);
    println!("  LiquidityPool:  {:?}", pool_addr);
    println!("  Router:         {:?}", router_addr);
    println!("  Ico:            {:?}", ico_addr);
}
