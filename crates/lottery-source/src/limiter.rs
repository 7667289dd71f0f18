//! Minimum-interval rate limiter

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::Clock;

/// Keeps outbound calls at least `min_interval` apart.
///
/// The check, the wait and the update of the last call timestamp happen while
/// holding one lock, so concurrent callers queue up instead of racing.
pub struct RateLimiter {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(None),
            clock,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until a call is allowed and record it. Returns how long it waited.
    pub async fn acquire(&self) -> Duration {
        let mut last_call = self.last_call.lock().await;

        let mut waited = Duration::ZERO;
        if let Some(previous) = *last_call {
            let elapsed = self.clock.now().saturating_duration_since(previous);
            if elapsed < self.min_interval {
                waited = self.min_interval - elapsed;
                tracing::trace!(wait_ms = waited.as_millis() as u64, "rate limited");
                self.clock.sleep(waited).await;
            }
        }

        *last_call = Some(self.clock.now());
        waited
    }
}
