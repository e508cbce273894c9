//! Error types for `simgate-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(
    "Invalid query. Use national ID / CNIC (13 digits) or mobile \
     (03XXXXXXXXX / 92XXXXXXXXXX)."
  )]
  InvalidQuery,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A failure anywhere in the classify → fetch → parse pipeline.
///
/// Parsing never fails, so only the first two stages contribute variants.
/// `Display` forwards the inner message unchanged; it becomes the `detail`
/// field of the error envelope.
#[derive(Debug, Error)]
pub enum LookupError {
  #[error(transparent)]
  Query(#[from] Error),

  #[error("{0}")]
  Upstream(#[source] Box<dyn std::error::Error + Send + Sync>),
}
