use anyhow::Result;
use async_trait::async_trait;
use std::ops::AddAssign;

/// Step counters reported by one workflow.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowStats {
    pub success: u64,
    pub failed: u64,
}

impl WorkflowStats {
    pub fn record(&mut self, ok: bool) {
        if ok {
            self.success += 1;
        } else {
            self.failed += 1;
        }
    }

    pub fn total(&self) -> u64 {
        self.success + self.failed
    }
}

impl AddAssign for WorkflowStats {
    fn add_assign(&mut self, rhs: Self) {
        self.success += rhs.success;
        self.failed += rhs.failed;
    }
}

#[derive(Debug, Clone)]
pub struct TaskResult {
    pub success: bool,
    pub message: String,
    pub tx_hash: Option<String>,
}

#[async_trait]
pub trait Task<Ctx>: Send + Sync {
    /// Returns the name of the task
    fn name(&self) -> &str;

    /// Executes the task
    async fn run(&self, ctx: Ctx) -> Result<TaskResult>;
}
