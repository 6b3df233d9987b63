//! Outbound request rate gate
//!
//! Serializes catalog calls to at most one per interval. The gate is passed
//! into the client as a trait object so tests can swap in [`NoopGate`].

use async_trait::async_trait;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Blocks callers until the next outbound request is allowed
#[async_trait]
pub trait RateGate: Send + Sync {
    /// Wait until the minimum interval since the previous acquire has elapsed
    async fn acquire(&self);
}

/// Interval gate enforcing a minimum spacing between requests
pub struct IntervalGate {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl IntervalGate {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval,
        }
    }

    pub fn from_millis(min_interval_ms: u64) -> Self {
        Self::new(Duration::from_millis(min_interval_ms))
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

#[async_trait]
impl RateGate for IntervalGate {
    async fn acquire(&self) {
        // Lock held across the sleep so concurrent callers queue up
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                tracing::debug!("Rate limiting: waiting {:?}", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }
}

/// Gate that never waits
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopGate;

#[async_trait]
impl RateGate for NoopGate {
    async fn acquire(&self) {}
}
