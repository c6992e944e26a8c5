use crate::task::{Task, TaskContext, TaskResult};
use anyhow::Result;
use async_trait::async_trait;
use ethers::types::Address;

/// Sends a small native amount to a throwaway address.
#[derive(Debug, Clone)]
pub struct SendNativeTask {
    to: Address,
    amount: String,
    index: u32,
    total: u32,
}

impl SendNativeTask {
    pub fn new(to: Address, amount: String, index: u32, total: u32) -> Self {
        Self {
            to,
            amount,
            index,
            total,
        }
    }
}

#[async_trait]
impl Task<TaskContext> for SendNativeTask {
    fn name(&self) -> &str {
        "05_sendNative"
    }

    async fn run(&self, ctx: TaskContext) -> Result<TaskResult> {
        let tx_hash = ctx.chain.send_native(self.to, &self.amount).await?;
        Ok(ctx.confirmed(
            format!(
                "Send {}/{} {} STT to {:?}",
                self.index, self.total, self.amount, self.to
            ),
            tx_hash,
        ))
    }
}
