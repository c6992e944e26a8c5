//! Per-wallet step sequence.
//!
//! A workflow owns one wallet's connection and drives it through the fixed
//! order faucet → mint PING → mint PONG → swaps → random sends. Step failures
//! are logged and counted, never propagated.

use crate::client::{ChainActions, SomniaClient};
use crate::config::SomniaConfig;
use crate::identity::{Identity, QueuedWallet};
use crate::task::{
    ClaimFaucetTask, MintTokenTask, SendNativeTask, SomniaTask, SwapTask, TaskContext,
};
use crate::tokens::TestToken;
use crate::utils::{random, short_address};
use anyhow::{Context, Result};
use core_logic::{Pacer, TokioPacer, WorkflowStats};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::Address;
use ethers::utils::format_ether;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

const MSG_LIMIT: usize = 125;

/// Delays that shape one workflow run.
#[derive(Debug, Clone, Copy)]
pub struct WorkflowTiming {
    pub step_delay: Duration,
    pub max_start_delay_secs: f64,
}

impl WorkflowTiming {
    pub fn from_config(config: &SomniaConfig) -> Self {
        Self {
            step_delay: config.step_delay(),
            max_start_delay_secs: config.max_start_delay_secs,
        }
    }
}

pub struct WalletWorkflow {
    tag: String,
    ctx: TaskContext,
    pacer: Arc<dyn Pacer>,
    rng: StdRng,
    timing: WorkflowTiming,
    used_destinations: HashSet<Address>,
    stats: WorkflowStats,
}

impl WalletWorkflow {
    pub fn new(
        tag: String,
        ctx: TaskContext,
        pacer: Arc<dyn Pacer>,
        rng: StdRng,
        timing: WorkflowTiming,
    ) -> Self {
        Self {
            tag,
            ctx,
            pacer,
            rng,
            timing,
            used_destinations: HashSet::new(),
            stats: WorkflowStats::default(),
        }
    }

    /// Runs the full sequence and returns the step counters.
    pub async fn run(mut self) -> Result<WorkflowStats> {
        let start_delay = random::start_delay(&mut self.rng, self.timing.max_start_delay_secs);
        info!(
            "{} ⏳ Starting in {:.1}s",
            self.tag,
            start_delay.as_secs_f64()
        );
        self.pacer.pause(start_delay).await;

        let address = self.ctx.chain.address();
        match self.ctx.chain.native_balance().await {
            Ok(balance) => info!(
                "{} 👛 Wallet {} running, balance {} STT",
                self.tag,
                short_address(&address),
                format_ether(balance)
            ),
            Err(e) => warn!(
                "{} 👛 Wallet {} running, balance unavailable: {:#}",
                self.tag,
                short_address(&address),
                e
            ),
        }

        self.run_step(&ClaimFaucetTask::new()).await;
        self.pacer.pause(self.timing.step_delay).await;

        self.run_step(&MintTokenTask::new(TestToken::Ping)).await;
        self.pacer.pause(self.timing.step_delay).await;

        self.run_step(&MintTokenTask::new(TestToken::Pong)).await;
        self.pacer.pause(self.timing.step_delay).await;

        self.swap_round().await;
        self.pacer.pause(self.timing.step_delay).await;

        self.send_round().await;

        info!(
            "{} ✅ Workflow complete ({} ok / {} failed)",
            self.tag, self.stats.success, self.stats.failed
        );
        Ok(self.stats)
    }

    async fn swap_round(&mut self) {
        let count = random::swap_count(&mut self.rng);
        info!("{} ⇄ Starting {} swaps", self.tag, count);

        let mut confirmed = 0;
        for i in 1..=count {
            let direction = random::swap_direction(&mut self.rng);
            let amount = random::swap_amount(&mut self.rng);
            if self
                .run_step(&SwapTask::new(direction, amount, i, count))
                .await
            {
                confirmed += 1;
            }

            let pause = random::swap_pause(&mut self.rng);
            info!(
                "{} waiting {:.1}s before next swap",
                self.tag,
                pause.as_secs_f64()
            );
            self.pacer.pause(pause).await;
        }

        info!("{} ⇄ Swaps done: {}/{} confirmed", self.tag, confirmed, count);
    }

    async fn send_round(&mut self) {
        let count = random::send_count(&mut self.rng);
        info!("{} ✈️ Sending to {} random addresses", self.tag, count);

        let mut confirmed = 0;
        for i in 1..=count {
            let to = self.fresh_destination();
            let amount = random::send_amount(&mut self.rng);
            if self
                .run_step(&SendNativeTask::new(to, amount, i, count))
                .await
            {
                confirmed += 1;
            }

            let pause = random::send_pause(&mut self.rng);
            info!(
                "{} waiting {:.1}s before next send",
                self.tag,
                pause.as_secs_f64()
            );
            self.pacer.pause(pause).await;
        }

        info!("{} ✈️ Sends done: {}/{} confirmed", self.tag, confirmed, count);
    }

    /// New random address, distinct from every destination this workflow used.
    fn fresh_destination(&mut self) -> Address {
        loop {
            let address = LocalWallet::new(&mut self.rng).address();
            if self.used_destinations.insert(address) {
                return address;
            }
        }
    }

    /// Executes one step, logs the outcome and swallows any error.
    async fn run_step(&mut self, task: &SomniaTask) -> bool {
        let start_time = Instant::now();
        let outcome = task.run(self.ctx.clone()).await;
        let duration = start_time.elapsed().as_secs_f64();

        let ok = match outcome {
            Ok(res) if res.success => {
                info!(
                    target: "task_result",
                    "{} Success [{}] {} in {:.1}s",
                    self.tag,
                    task.name(),
                    clip(&res.message),
                    duration
                );
                true
            }
            Ok(res) => {
                warn!(
                    target: "task_result",
                    "{} Failed  [{}] {} in {:.1}s",
                    self.tag,
                    task.name(),
                    clip(&res.message),
                    duration
                );
                false
            }
            Err(e) => {
                warn!(
                    target: "task_result",
                    "{} Failed  [{}] {} in {:.1}s",
                    self.tag,
                    task.name(),
                    clip(&format!("{:#}", e)),
                    duration
                );
                false
            }
        };

        self.stats.record(ok);
        ok
    }
}

fn clip(raw: &str) -> String {
    let raw = raw.replace('\n', " | ");
    if raw.chars().count() > MSG_LIMIT {
        let truncated: String = raw.chars().take(MSG_LIMIT - 3).collect();
        format!("{}...", truncated)
    } else {
        raw
    }
}

/// Entry point used by the worker pool for one queued wallet.
///
/// Errors here (bad key, unusable proxy or RPC URL) end this wallet's run only.
pub async fn run_wallet(
    worker_id: usize,
    config: Arc<SomniaConfig>,
    queued: QueuedWallet,
) -> Result<WorkflowStats> {
    let tag = format!("[WK:{:03}][P:{}]", worker_id, queued.proxy_id());

    let identity = Identity::from_key(queued.position, &queued.key)?;
    info!(
        "{} Wallet {} assigned proxy {}",
        tag,
        short_address(&identity.address()),
        queued.proxy_id()
    );

    let client = SomniaClient::connect(&config, &identity, queued.proxy.as_ref(), tag.clone())
        .context("Failed to build chain client")?;
    let ctx = TaskContext::new(Arc::new(client), config.tx_link_prefix.clone());

    WalletWorkflow::new(
        tag,
        ctx,
        Arc::new(TokioPacer),
        StdRng::from_entropy(),
        WorkflowTiming::from_config(&config),
    )
    .run()
    .await
}
