//! # Utilities Module
//!
//! Internal utility modules for the core-logic crate.
//! These modules are marked as `pub(crate)` to enforce API boundaries.

pub(crate) mod logger;
pub(crate) mod pacing;
pub(crate) mod proxy_manager;
pub(crate) mod runner;
pub(crate) mod wallet_manager;

// Selective exports - only public utilities
pub use logger::setup_logger;
#[cfg(any(test, feature = "testing"))]
pub use pacing::RecordingPacer;
pub use pacing::{Pacer, TokioPacer};
pub use proxy_manager::ProxyManager;
pub use runner::{PoolReport, WorkerRunner};
pub use wallet_manager::{WalletKey, WalletManager};
