//! Minimum-interval rate limiter shared by every upstream call.

use std::time::Duration;

use simgate_core::upstream::RateLimiter;
use tokio::{
  sync::Mutex,
  time::{Instant, sleep},
};

/// Guarantees at least `min_interval` between consecutive `acquire` returns.
///
/// The lock is held while waiting, so concurrent callers queue behind each
/// other and none of them can act on a stale timestamp.
#[derive(Debug)]
pub struct IntervalLimiter {
  min_interval: Duration,
  last_call:    Mutex<Option<Instant>>,
}

impl IntervalLimiter {
  pub fn new(min_interval: Duration) -> Self {
    Self { min_interval, last_call: Mutex::new(None) }
  }
}

impl RateLimiter for IntervalLimiter {
  async fn acquire(&self) {
    let mut last_call = self.last_call.lock().await;

    if let Some(previous) = *last_call {
      let elapsed = previous.elapsed();
      if elapsed < self.min_interval {
        let wait = self.min_interval - elapsed;
        tracing::debug!(?wait, "rate limiter delaying upstream call");
        sleep(wait).await;
      }
    }

    *last_call = Some(Instant::now());
  }
}
