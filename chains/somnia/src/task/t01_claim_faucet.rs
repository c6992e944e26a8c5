//! Claim Faucet Task
//!
//! Requests native STT from the testnet faucet over HTTP.

use crate::task::{Task, TaskContext, TaskResult};
use crate::utils::short_address;
use anyhow::Result;
use async_trait::async_trait;

#[derive(Debug, Clone, Default)]
pub struct ClaimFaucetTask;

impl ClaimFaucetTask {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Task<TaskContext> for ClaimFaucetTask {
    fn name(&self) -> &str {
        "01_claimFaucet"
    }

    async fn run(&self, ctx: TaskContext) -> Result<TaskResult> {
        let address = ctx.chain.address();
        ctx.chain.claim_faucet().await?;

        Ok(TaskResult {
            success: true,
            message: format!("Claimed $STT for {}", short_address(&address)),
            tx_hash: None,
        })
    }
}
