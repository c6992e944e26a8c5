//! # Somnia Testnet Automation
//!
//! Drives a queue of wallets through the Somnia testnet activity sequence:
//! faucet claim, PING/PONG mints, router swaps and small native sends. Wallets
//! run in a bounded worker pool provided by `core_logic`.

pub mod abi;
pub mod client;
pub mod config;
pub mod identity;
pub mod task;
pub mod tokens;
pub mod utils;
pub mod workflow;
