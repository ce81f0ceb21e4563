//! Minimum-interval pacing for outbound requests.

use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Spaces calls to [`wait`](Self::wait) at least `min_interval` apart.
///
/// The lock is held across the sleep, so concurrent callers queue up and
/// leave one interval apart.
pub struct RateLimiter {
  last_request: Mutex<Option<Instant>>,
  min_interval: Duration,
}

impl RateLimiter {
  pub fn new(min_interval: Duration) -> Self {
    Self { last_request: Mutex::new(None), min_interval }
  }

  /// Sleep until a request may go out, then record it.
  pub async fn wait(&self) {
    let mut last = self.last_request.lock().await;

    if let Some(last_time) = *last {
      let elapsed = last_time.elapsed();
      if elapsed < self.min_interval {
        let wait_time = self.min_interval - elapsed;
        tracing::debug!(?wait_time, "rate limiting");
        tokio::time::sleep(wait_time).await;
      }
    }

    *last = Some(Instant::now());
  }
}
