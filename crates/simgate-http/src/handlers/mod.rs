pub mod health;
pub mod home;
pub mod lookup;

use axum::{
  http::{StatusCode, header},
  response::{IntoResponse, Response},
};
use serde::Serialize;

pub(super) const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";

/// `pretty=1|true|True` selects indented output.
pub(super) fn is_pretty(flag: Option<&str>) -> bool {
  matches!(flag, Some("1" | "true" | "True"))
}

/// Serialise `body` as UTF-8 JSON. Non-ASCII text is written as-is.
pub(super) fn json_response<T: Serialize>(
  status: StatusCode,
  body: &T,
  pretty: bool,
) -> Response {
  let rendered = if pretty {
    serde_json::to_string_pretty(body)
  } else {
    serde_json::to_string(body)
  };

  match rendered {
    Ok(text) => {
      (status, [(header::CONTENT_TYPE, CONTENT_TYPE_JSON)], text).into_response()
    }
    Err(e) => {
      tracing::error!("failed to serialise response: {e}");
      StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
  }
}
