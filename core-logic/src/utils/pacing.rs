use async_trait::async_trait;
use std::time::Duration;

/// Suspension point used for every deliberate delay in a workflow.
///
/// Production code sleeps on the tokio timer; tests swap in a pacer that
/// returns immediately so full workflows run in milliseconds.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

/// Pacer that never sleeps and remembers every requested pause.
#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Default)]
pub struct RecordingPacer {
    pauses: std::sync::Mutex<Vec<Duration>>,
}

#[cfg(any(test, feature = "testing"))]
impl RecordingPacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[cfg(any(test, feature = "testing"))]
#[async_trait]
impl Pacer for RecordingPacer {
    async fn pause(&self, duration: Duration) {
        if let Ok(mut pauses) = self.pauses.lock() {
            pauses.push(duration);
        }
        tokio::task::yield_now().await;
    }
}
