use crate::client::ChainActions;
use ethers::types::TxHash;
use std::sync::Arc;

pub mod t01_claim_faucet;
pub mod t02_mint_token;
pub mod t03_swap;
pub mod t04_send_native;

pub use self::t01_claim_faucet::ClaimFaucetTask;
pub use self::t02_mint_token::MintTokenTask;
pub use self::t03_swap::SwapTask;
pub use self::t04_send_native::SendNativeTask;

pub use core_logic::traits::{Task, TaskResult};

#[derive(Clone)]
pub struct TaskContext {
    pub chain: Arc<dyn ChainActions>,
    pub tx_link_prefix: String,
}

impl TaskContext {
    pub fn new(chain: Arc<dyn ChainActions>, tx_link_prefix: impl Into<String>) -> Self {
        Self {
            chain,
            tx_link_prefix: tx_link_prefix.into(),
        }
    }

    pub fn tx_link(&self, tx_hash: &TxHash) -> String {
        format!("{}{:?}", self.tx_link_prefix, tx_hash)
    }

    pub(crate) fn confirmed(&self, message: String, tx_hash: TxHash) -> TaskResult {
        TaskResult {
            success: true,
            message: format!("{} | {}", message, self.tx_link(&tx_hash)),
            tx_hash: Some(format!("{:?}", tx_hash)),
        }
    }
}

// Trait alias
pub type SomniaTask = dyn Task<TaskContext> + Send + Sync;
