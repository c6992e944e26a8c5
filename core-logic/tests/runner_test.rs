use core_logic::{ConfigError, CoreError, WorkerRunner, WorkflowStats};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

fn ok_stats() -> WorkflowStats {
    WorkflowStats {
        success: 2,
        failed: 1,
    }
}

#[tokio::test]
async fn test_concurrency_never_exceeds_cap() {
    for (max_workers, queue_len) in [(1, 5), (3, 10), (4, 2), (8, 8)] {
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let report = WorkerRunner::run_pool(
            (0..queue_len).collect::<Vec<usize>>(),
            max_workers,
            CancellationToken::new(),
            |_, _| {
                let active = active.clone();
                let peak = peak.clone();
                async move {
                    let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    active.fetch_sub(1, Ordering::SeqCst);
                    Ok(WorkflowStats::default())
                }
            },
        )
        .await
        .unwrap();

        assert_eq!(report.started, queue_len);
        assert_eq!(report.completed, queue_len);
        assert!(peak.load(Ordering::SeqCst) <= max_workers.min(queue_len));
        assert_eq!(active.load(Ordering::SeqCst), 0);
    }
}

#[tokio::test]
async fn test_fills_all_slots() {
    let active = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    WorkerRunner::run_pool(
        vec![(); 6],
        3,
        CancellationToken::new(),
        |_, _| {
            let active = active.clone();
            let peak = peak.clone();
            async move {
                let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                active.fetch_sub(1, Ordering::SeqCst);
                Ok(WorkflowStats::default())
            }
        },
    )
    .await
    .unwrap();

    assert_eq!(peak.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_every_job_dispatched_once_in_fifo_order() {
    let launched = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::new(Mutex::new(Vec::new()));

    let jobs: Vec<String> = (0..7).map(|i| format!("wallet-{i}")).collect();
    let report = WorkerRunner::run_pool(jobs, 2, CancellationToken::new(), |worker_id, job| {
        launched.lock().unwrap().push(worker_id);
        let seen = seen.clone();
        async move {
            seen.lock().unwrap().push(job);
            Ok(WorkflowStats::default())
        }
    })
    .await
    .unwrap();

    assert_eq!(*launched.lock().unwrap(), vec![1, 2, 3, 4, 5, 6, 7]);

    let mut seen = seen.lock().unwrap().clone();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 7);
    assert_eq!(report.finished(), 7);
}

#[tokio::test]
async fn test_errors_and_panics_free_their_slot() {
    let report = WorkerRunner::run_pool(
        (0..6).collect::<Vec<u32>>(),
        1,
        CancellationToken::new(),
        |_, job| async move {
            match job % 3 {
                0 => Ok(ok_stats()),
                1 => Err(anyhow::anyhow!("rpc unreachable")),
                _ => panic!("workflow {} blew up", job),
            }
        },
    )
    .await
    .unwrap();

    assert_eq!(report.started, 6);
    assert_eq!(report.completed, 2);
    assert_eq!(report.failed, 2);
    assert_eq!(report.panicked, 2);
    assert_eq!(report.totals, WorkflowStats { success: 4, failed: 2 });
}

#[tokio::test]
async fn test_empty_queue_is_rejected() {
    let calls = AtomicUsize::new(0);
    let result = WorkerRunner::run_pool(
        Vec::<u8>::new(),
        4,
        CancellationToken::new(),
        |_, _| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(WorkflowStats::default()) }
        },
    )
    .await;

    assert!(matches!(
        result,
        Err(CoreError::Config(ConfigError::EmptyQueue { .. }))
    ));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_zero_workers_is_rejected() {
    let result = WorkerRunner::run_pool(vec![1], 0, CancellationToken::new(), |_, _| async {
        Ok(WorkflowStats::default())
    })
    .await;

    assert!(matches!(
        result,
        Err(CoreError::Config(ConfigError::InvalidValue { .. }))
    ));
}

#[tokio::test]
async fn test_stuck_workflow_does_not_block_others() {
    let (tx, mut rx) = mpsc::unbounded_channel();

    // Worker 1 never finishes; the other slot must keep cycling through the queue.
    let pool = tokio::spawn(WorkerRunner::run_pool(
        (0..5).collect::<Vec<usize>>(),
        2,
        CancellationToken::new(),
        move |worker_id, job| {
            let tx = tx.clone();
            async move {
                if job == 0 {
                    std::future::pending::<()>().await;
                }
                tx.send(worker_id).ok();
                Ok(WorkflowStats::default())
            }
        },
    ));

    let mut finished = Vec::new();
    for _ in 0..4 {
        let id = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("queue stalled behind a stuck workflow")
            .unwrap();
        finished.push(id);
    }
    finished.sort();
    assert_eq!(finished, vec![2, 3, 4, 5]);
    assert!(!pool.is_finished());
    pool.abort();
}

#[tokio::test]
async fn test_shutdown_stops_dispatch() {
    let token = CancellationToken::new();
    let started = Arc::new(AtomicUsize::new(0));

    let report = WorkerRunner::run_pool((0..10).collect::<Vec<u8>>(), 2, token.clone(), |_, _| {
        let token = token.clone();
        let started = started.clone();
        async move {
            started.fetch_add(1, Ordering::SeqCst);
            token.cancel();
            Ok(WorkflowStats::default())
        }
    })
    .await
    .unwrap();

    // The first two slots were filled before the token fired.
    assert_eq!(report.started, 2);
    assert_eq!(report.completed, 2);
    assert_eq!(report.skipped, 8);
    assert_eq!(started.load(Ordering::SeqCst), 2);
}
