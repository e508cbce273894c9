//! `GET /health`

use axum::{extract::State, http::StatusCode, response::Response};
use serde_json::json;
use simgate_core::upstream::Upstream;

use crate::{AppState, handlers::json_response};

pub async fn handler<U>(State(state): State<AppState<U>>) -> Response
where
  U: Upstream + Clone + 'static,
{
  json_response(
    StatusCode::OK,
    &json!({ "status": "ok", "developer": &*state.developer }),
    false,
  )
}
