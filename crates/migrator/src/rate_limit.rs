use std::time::Duration;

use tokio::time::{Instant, sleep_until};

/// Enforces a minimum interval between consecutive requests.
pub struct RateLimiter {
    interval: Duration,
    last: Option<Instant>,
}

impl RateLimiter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Waits until at least `interval` has passed since the previous call returned.
    pub async fn wait(&mut self) {
        if let Some(last) = self.last {
            sleep_until(last + self.interval).await;
        }
        self.last = Some(Instant::now());
    }
}
