//! Traits for the network side of the pipeline.
//!
//! Implemented by `simgate-upstream`. The HTTP layer depends on these
//! abstractions so tests can substitute canned responses and a no-op limiter.

use std::future::Future;

// ─── Rate limiting ───────────────────────────────────────────────────────────

/// Spaces out upstream calls.
///
/// `acquire` resolves once the caller may issue its request. Implementations
/// own their state and lock; one limiter is shared by all requests.
pub trait RateLimiter: Send + Sync {
  fn acquire(&self) -> impl Future<Output = ()> + Send + '_;
}

/// A limiter that never waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unlimited;

impl RateLimiter for Unlimited {
  async fn acquire(&self) {}
}

// ─── Upstream source ─────────────────────────────────────────────────────────

/// The single third-party source queries are forwarded to.
pub trait Upstream: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch the raw HTML answer for an already normalized query value.
  fn fetch<'a>(
    &'a self,
    value: &'a str,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;
}
