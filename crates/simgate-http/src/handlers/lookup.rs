//! Lookup endpoints.
//!
//! - `GET  /api/lookup?query=<v>` (aliases `q`, `value`)
//! - `GET  /api/lookup/<v>`
//! - `POST /api/lookup` with JSON `{"query"|"number"|"value": "<v>"}`
//!
//! All three accept `pretty=1` and run the same pipeline.

use axum::{
  extract::{
    Path, Query, State,
    rejection::{BytesRejection, PathRejection, QueryRejection},
  },
  http::StatusCode,
  response::Response,
};
use bytes::Bytes;
use serde_json::Value;
use simgate_core::{LookupError, ResponseEnvelope, lookup, upstream::Upstream};

use crate::{
  AppState,
  error::ApiError,
  handlers::{is_pretty, json_response},
};

const GET_HINT: &str = "Use ?query=<mobile or cnic>";
const POST_HINT: &str = "Send JSON {\"query\":\"...\"}";

/// Keys accepted in a JSON body, in precedence order.
const BODY_KEYS: [&str; 3] = ["query", "number", "value"];

/// Query string as raw pairs, so repeated keys never fail extraction.
type RawQuery = Result<Query<Vec<(String, String)>>, QueryRejection>;

#[derive(Debug, Default)]
pub struct LookupParams {
  pub query:  Option<String>,
  pub q:      Option<String>,
  pub value:  Option<String>,
  pub pretty: Option<String>,
}

impl LookupParams {
  /// The first value of each recognised key wins; unknown keys are ignored.
  pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
    let mut params = Self::default();
    for (key, value) in pairs {
      let slot = match key.as_str() {
        "query" => &mut params.query,
        "q" => &mut params.q,
        "value" => &mut params.value,
        "pretty" => &mut params.pretty,
        _ => continue,
      };
      slot.get_or_insert(value);
    }
    params
  }

  fn from_raw(raw: RawQuery) -> Self {
    match raw {
      Ok(Query(pairs)) => Self::from_pairs(pairs),
      Err(e) => {
        tracing::debug!("ignoring unreadable query string: {e}");
        Self::default()
      }
    }
  }

  fn raw_query(&self) -> Option<&str> {
    first_present([&self.query, &self.q, &self.value])
  }

  fn pretty(&self) -> bool { is_pretty(self.pretty.as_deref()) }
}

/// First candidate that is present and non-empty.
fn first_present<const N: usize>(
  candidates: [&Option<String>; N],
) -> Option<&str> {
  candidates
    .into_iter()
    .filter_map(Option::as_deref)
    .find(|s| !s.is_empty())
}

/// The first truthy [`BODY_KEYS`] entry of a JSON object body.
///
/// Anything that is not a JSON object counts as an empty body.
fn body_query(bytes: &[u8]) -> Option<Value> {
  let Ok(Value::Object(mut fields)) = serde_json::from_slice::<Value>(bytes)
  else {
    return None;
  };
  BODY_KEYS
    .iter()
    .filter_map(|key| fields.remove(*key))
    .find(is_truthy)
}

fn is_truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
    Value::String(s) => !s.is_empty(),
    Value::Array(items) => !items.is_empty(),
    Value::Object(fields) => !fields.is_empty(),
  }
}

/// `GET /api/lookup?query=...`
pub async fn by_query<U>(
  State(state): State<AppState<U>>,
  raw: RawQuery,
) -> Response
where
  U: Upstream + Clone + 'static,
{
  let params = LookupParams::from_raw(raw);
  let result = match params.raw_query() {
    Some(raw) => run(&state, raw).await,
    None => Err(ApiError::MissingQuery(GET_HINT)),
  };
  respond(&state, result, params.pretty())
}

/// `GET /api/lookup/{*query}`
///
/// A segment that does not decode to UTF-8 is an invalid query.
pub async fn by_path<U>(
  State(state): State<AppState<U>>,
  path: Result<Path<String>, PathRejection>,
  raw: RawQuery,
) -> Response
where
  U: Upstream + Clone + 'static,
{
  let params = LookupParams::from_raw(raw);
  let result = match path {
    Ok(Path(query)) => run(&state, &query).await,
    Err(e) => {
      tracing::debug!("undecodable lookup path: {e}");
      Err(invalid_query())
    }
  };
  respond(&state, result, params.pretty())
}

/// `POST /api/lookup`
///
/// The body is read as JSON whatever the `Content-Type` says. A truthy
/// alias that is not a string fails like an invalid query.
pub async fn by_body<U>(
  State(state): State<AppState<U>>,
  raw: RawQuery,
  body: Result<Bytes, BytesRejection>,
) -> Response
where
  U: Upstream + Clone + 'static,
{
  let params = LookupParams::from_raw(raw);
  let body = body.unwrap_or_else(|e| {
    tracing::debug!("unreadable request body: {e}");
    Bytes::new()
  });
  let result = match body_query(&body) {
    Some(Value::String(raw)) => run(&state, &raw).await,
    Some(_) => Err(invalid_query()),
    None => Err(ApiError::MissingQuery(POST_HINT)),
  };
  respond(&state, result, params.pretty())
}

fn invalid_query() -> ApiError {
  let err = LookupError::Query(simgate_core::Error::InvalidQuery);
  log_failure(&err);
  err.into()
}

async fn run<U>(
  state: &AppState<U>,
  raw: &str,
) -> Result<ResponseEnvelope, ApiError>
where
  U: Upstream + Clone + 'static,
{
  match lookup(state.upstream.as_ref(), raw).await {
    Ok((query, results)) => {
      tracing::info!(kind = %query.kind(), results = results.len(), "lookup complete");
      Ok(ResponseEnvelope::new(&query, results, &state.developer))
    }
    Err(e) => {
      log_failure(&e);
      Err(e.into())
    }
  }
}

fn log_failure(err: &LookupError) {
  match err {
    LookupError::Query(e) => tracing::info!("rejected query: {e}"),
    LookupError::Upstream(e) => {
      let transient = e
        .downcast_ref::<simgate_upstream::Error>()
        .map(simgate_upstream::Error::is_transient);
      tracing::warn!(?transient, "upstream lookup failed: {e}");
    }
  }
}

fn respond<U>(
  state: &AppState<U>,
  result: Result<ResponseEnvelope, ApiError>,
  pretty: bool,
) -> Response {
  match result {
    Ok(envelope) => json_response(StatusCode::OK, &envelope, pretty),
    Err(e) => json_response(e.status(), &e.body(&state.developer), pretty),
  }
}
