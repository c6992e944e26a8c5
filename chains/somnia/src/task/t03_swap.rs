use crate::task::{Task, TaskContext, TaskResult};
use crate::tokens::SwapDirection;
use anyhow::Result;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct SwapTask {
    direction: SwapDirection,
    amount: u64,
    index: u32,
    total: u32,
}

impl SwapTask {
    /// `index` is 1-based within a round of `total` swaps.
    pub fn new(direction: SwapDirection, amount: u64, index: u32, total: u32) -> Self {
        Self {
            direction,
            amount,
            index,
            total,
        }
    }
}

#[async_trait]
impl Task<TaskContext> for SwapTask {
    fn name(&self) -> &str {
        "04_swap"
    }

    async fn run(&self, ctx: TaskContext) -> Result<TaskResult> {
        let tx_hash = ctx.chain.swap(self.direction, self.amount).await?;
        Ok(ctx.confirmed(
            format!(
                "Swap {}/{} [{}] amount {}",
                self.index, self.total, self.direction, self.amount
            ),
            tx_hash,
        ))
    }
}
