//! HTTP surface of the simgate lookup gateway.
//!
//! Exposes an axum [`Router`] backed by any [`Upstream`]. Every lookup
//! response, success or failure, is JSON carrying the developer attribution.

pub mod config;
pub mod error;
pub mod handlers;

pub use config::ServerConfig;
pub use error::{ApiError, ConfigError};

use std::sync::Arc;

use axum::{Router, routing::get};
use simgate_core::upstream::Upstream;
use tower_http::trace::TraceLayer;

use handlers::{health, home, lookup};

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<U> {
  pub upstream:  Arc<U>,
  pub developer: Arc<str>,
}

impl<U> AppState<U> {
  pub fn new(upstream: U, developer: &str) -> Self {
    Self { upstream: Arc::new(upstream), developer: Arc::from(developer) }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the gateway [`Router`].
pub fn router<U>(state: AppState<U>) -> Router
where
  U: Upstream + Clone + 'static,
{
  Router::new()
    .route("/",                   get(home::handler))
    .route("/health",             get(health::handler::<U>))
    .route("/api/lookup",         get(lookup::by_query::<U>).post(lookup::by_body::<U>))
    .route("/api/lookup/{*query}", get(lookup::by_path::<U>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
