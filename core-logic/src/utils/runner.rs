use crate::error::{ConfigError, CoreError};
use crate::traits::WorkflowStats;
use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use tokio::signal;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn, Instrument};

/// Outcome counters for one pool run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PoolReport {
    /// Workflows handed a slot.
    pub started: usize,
    /// Workflows that returned `Ok`.
    pub completed: usize,
    /// Workflows that returned an error before finishing their sequence.
    pub failed: usize,
    /// Workflows that panicked or could not be joined.
    pub panicked: usize,
    /// Queue entries never dispatched because shutdown was requested.
    pub skipped: usize,
    pub totals: WorkflowStats,
}

impl PoolReport {
    pub fn finished(&self) -> usize {
        self.completed + self.failed + self.panicked
    }
}

pub struct WorkerRunner;

impl WorkerRunner {
    /// Runs the pool with Ctrl+C wired to a graceful stop: no new workflows are
    /// dispatched after the signal, running ones are left to finish.
    pub async fn run<J, F, Fut>(
        jobs: Vec<J>,
        max_workers: usize,
        launch: F,
    ) -> Result<PoolReport, CoreError>
    where
        J: Send + 'static,
        F: FnMut(usize, J) -> Fut,
        Fut: Future<Output = anyhow::Result<WorkflowStats>> + Send + 'static,
    {
        let token = CancellationToken::new();
        let cloned_token = token.clone();

        // Spawn a task to listen for Ctrl+C
        let listener = tokio::spawn(async move {
            match signal::ctrl_c().await {
                Ok(()) => {
                    info!("🛑 Received Ctrl+C. No new wallets will be started, waiting for active workers...");
                    cloned_token.cancel();
                }
                Err(err) => {
                    error!("Unable to listen for shutdown signal: {}", err);
                }
            }
        });

        let report = Self::run_pool(jobs, max_workers, token, launch).await;
        listener.abort();
        report
    }

    /// Keeps at most `max_workers` workflows running, replacing each finished
    /// one with the next queued job until the queue is drained.
    ///
    /// `launch` receives the 1-based worker id (queue position + 1) and the job,
    /// and is only called once a slot is free. Workflow errors and panics are
    /// logged and counted but never change scheduling.
    pub async fn run_pool<J, F, Fut>(
        jobs: Vec<J>,
        max_workers: usize,
        shutdown: CancellationToken,
        mut launch: F,
    ) -> Result<PoolReport, CoreError>
    where
        J: Send + 'static,
        F: FnMut(usize, J) -> Fut,
        Fut: Future<Output = anyhow::Result<WorkflowStats>> + Send + 'static,
    {
        if jobs.is_empty() {
            return Err(ConfigError::EmptyQueue {
                what: "wallet queue".to_string(),
            }
            .into());
        }
        if max_workers == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_concurrency".to_string(),
                reason: "must be at least 1".to_string(),
            }
            .into());
        }

        let total = jobs.len();
        let mut queue = jobs.into_iter().enumerate();
        let mut set = JoinSet::new();
        let mut report = PoolReport::default();

        let start_time = std::time::Instant::now();
        info!(
            "🚀 Starting worker pool: {} wallets, max {} concurrent",
            total, max_workers
        );

        loop {
            while set.len() < max_workers && !shutdown.is_cancelled() {
                let Some((index, job)) = queue.next() else {
                    break;
                };
                let worker_id = index + 1;
                let span = tracing::info_span!("worker", worker_id = format!("{:03}", worker_id));
                let workflow = launch(worker_id, job);

                set.spawn(
                    async move {
                        let outcome = AssertUnwindSafe(workflow).catch_unwind().await;
                        (worker_id, outcome)
                    }
                    .instrument(span),
                );
                report.started += 1;
            }

            let Some(joined) = set.join_next().await else {
                break;
            };

            match joined {
                Ok((id, Ok(Ok(stats)))) => {
                    report.completed += 1;
                    report.totals += stats;
                    info!(
                        target: "task_result",
                        "[WK:{:03}] Workflow finished: {} steps ok, {} steps failed",
                        id, stats.success, stats.failed
                    );
                }
                Ok((id, Ok(Err(e)))) => {
                    report.failed += 1;
                    error!(target: "task_result", "[WK:{:03}] Workflow aborted: {:#}", id, e);
                }
                Ok((id, Err(panic))) => {
                    report.panicked += 1;
                    error!(
                        target: "task_result",
                        "[WK:{:03}] Workflow panicked: {}",
                        id,
                        panic_message(panic.as_ref())
                    );
                }
                Err(e) => {
                    report.panicked += 1;
                    error!("A worker task failed to join: {:?}", e);
                }
            }
        }

        report.skipped = total - report.started;
        if report.skipped > 0 {
            warn!(
                "Shutdown requested, {} wallets were not started",
                report.skipped
            );
        }

        let total_steps = report.totals.total();
        let rate = if total_steps > 0 {
            (report.totals.success as f64 / total_steps as f64) * 100.0
        } else {
            0.0
        };

        info!(target: "task_result", "🏁 Worker pool drained.");
        info!(
            target: "task_result",
            "Total Time: {:.1}s | Wallets: {}/{} | Aborted: {} | Step Success: {} | Step Fail: {} | Success Rate: {:.2}%",
            start_time.elapsed().as_secs_f64(),
            report.completed,
            total,
            report.failed + report.panicked,
            report.totals.success,
            report.totals.failed,
            rate
        );

        Ok(report)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
