use crate::task::{Task, TaskContext, TaskResult};
use crate::tokens::TestToken;
use anyhow::Result;
use async_trait::async_trait;

/// Calls `mint(self, amount)` on one of the test tokens and waits for the receipt.
#[derive(Debug, Clone)]
pub struct MintTokenTask {
    token: TestToken,
}

impl MintTokenTask {
    pub fn new(token: TestToken) -> Self {
        Self { token }
    }
}

#[async_trait]
impl Task<TaskContext> for MintTokenTask {
    fn name(&self) -> &str {
        match self.token {
            TestToken::Ping => "02_mintPing",
            TestToken::Pong => "03_mintPong",
        }
    }

    async fn run(&self, ctx: TaskContext) -> Result<TaskResult> {
        let tx_hash = ctx.chain.mint(self.token).await?;
        Ok(ctx.confirmed(format!("Minted {}", self.token), tx_hash))
    }
}
