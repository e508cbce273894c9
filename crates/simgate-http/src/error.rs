//! Request-boundary errors and their JSON rendering.

use axum::http::StatusCode;
use serde::Serialize;
use simgate_core::LookupError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
  /// No usable query in the request. Carries a usage hint.
  #[error("{0}")]
  MissingQuery(&'static str),

  #[error(transparent)]
  Lookup(#[from] LookupError),
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
  pub error:     &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub detail:    Option<String>,
  pub developer: &'a str,
}

impl ApiError {
  /// Only a missing query is the client's fault; every pipeline failure is
  /// reported as a server error.
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::MissingQuery(_) => StatusCode::BAD_REQUEST,
      ApiError::Lookup(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  pub fn body<'a>(&'a self, developer: &'a str) -> ErrorBody<'a> {
    match self {
      ApiError::MissingQuery(hint) => ErrorBody { error: *hint, detail: None, developer },
      ApiError::Lookup(e) => ErrorBody {
        error: "Fetch failed",
        detail: Some(e.to_string()),
        developer,
      },
    }
  }
}

/// Startup configuration problems.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to load configuration: {0}")]
  Load(#[from] config::ConfigError),

  #[error("{key} must be a non-negative number of seconds, got {value}")]
  InvalidSeconds { key: &'static str, value: f64 },
}
