//! Error types for `simgate-upstream`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Upstream access is switched off by configuration.
  #[error("Upstream fetching disabled.")]
  Disabled,

  /// The upstream answered with a non-success status.
  #[error("upstream returned HTTP {status}")]
  Http { status: u16 },

  /// Connection, timeout, or body transfer failure.
  #[error("upstream unavailable: {0}")]
  Unavailable(#[source] reqwest::Error),

  #[error("failed to build HTTP client: {0}")]
  Client(#[source] reqwest::Error),
}

impl Error {
  /// Whether retrying later could plausibly succeed.
  ///
  /// Nothing retries today; callers may use this to pick a status code.
  pub fn is_transient(&self) -> bool {
    match self {
      Error::Unavailable(_) => true,
      Error::Http { status } => *status == 429 || *status >= 500,
      Error::Disabled | Error::Client(_) => false,
    }
  }
}
