//! # Core Logic - Shared Utilities for Testnet Automation
//!
//! This crate provides the chain-agnostic pieces used by every chain crate:
//! the bounded worker pool, key and proxy loading, logging and pacing.
//!
//! ## Modules
//!
//! - [`config`] - Plain configuration structures shared across chains
//! - [`error`] - Typed error handling with thiserror
//! - [`traits`] - Core trait definitions
//! - [`utils`] - Utility modules (wallet, proxy, runner, logger, pacing)

pub mod config;
pub mod error;
pub mod traits;
pub(crate) mod utils;

pub use config::{ChainConfig, ProxyConfig};
pub use error::{ConfigError, CoreError, NetworkError, WalletError};
pub use traits::{Task, TaskResult, WorkflowStats};

pub use utils::{
    setup_logger, Pacer, PoolReport, ProxyManager, TokioPacer, WalletKey, WalletManager,
    WorkerRunner,
};

#[cfg(any(test, feature = "testing"))]
pub use utils::RecordingPacer;
