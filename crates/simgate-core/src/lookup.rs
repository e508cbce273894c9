//! The classify → fetch → parse pipeline.

use crate::{
  error::LookupError,
  query::Query,
  table::{ResultSet, parse_table},
  upstream::Upstream,
};

/// Run one lookup end to end.
///
/// Each stage short-circuits on failure; there are no retries and no partial
/// results.
pub async fn lookup<U>(
  upstream: &U,
  raw: &str,
) -> Result<(Query, ResultSet), LookupError>
where
  U: Upstream,
{
  let query = Query::classify(raw)?;
  tracing::debug!(kind = %query.kind(), value = query.value(), "classified query");

  let html = upstream
    .fetch(query.value())
    .await
    .map_err(|e| LookupError::Upstream(Box::new(e)))?;

  let results = parse_table(&html);
  Ok((query, results))
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use super::*;
  use crate::{error::Error, query::QueryKind};

  #[derive(Debug, thiserror::Error)]
  #[error("upstream down")]
  struct Down;

  /// Returns canned HTML and remembers which values were requested.
  struct Canned {
    html:      Result<String, ()>,
    requested: Mutex<Vec<String>>,
  }

  impl Canned {
    fn ok(html: &str) -> Self {
      Self { html: Ok(html.to_owned()), requested: Mutex::new(Vec::new()) }
    }

    fn failing() -> Self {
      Self { html: Err(()), requested: Mutex::new(Vec::new()) }
    }
  }

  impl Upstream for Canned {
    type Error = Down;

    async fn fetch(&self, value: &str) -> Result<String, Down> {
      self.requested.lock().unwrap().push(value.to_owned());
      self.html.clone().map_err(|()| Down)
    }
  }

  #[tokio::test]
  async fn local_mobile_is_sent_normalized() {
    let upstream = Canned::ok("<p>nothing</p>");
    let (query, results) = lookup(&upstream, "03001234567").await.unwrap();

    assert_eq!(query.kind(), QueryKind::Mobile);
    assert_eq!(query.value(), "923001234567");
    assert!(results.is_empty());
    assert_eq!(*upstream.requested.lock().unwrap(), vec!["923001234567"]);
  }

  #[tokio::test]
  async fn national_id_is_sent_unchanged() {
    let upstream = Canned::ok("");
    let (query, _) = lookup(&upstream, "1234567890123").await.unwrap();

    assert_eq!(query.kind(), QueryKind::NationalId);
    assert_eq!(*upstream.requested.lock().unwrap(), vec!["1234567890123"]);
  }

  #[tokio::test]
  async fn invalid_query_never_reaches_upstream() {
    let upstream = Canned::ok("");
    let err = lookup(&upstream, "abc").await.unwrap_err();

    assert!(matches!(err, LookupError::Query(Error::InvalidQuery)));
    assert!(upstream.requested.lock().unwrap().is_empty());
  }

  #[tokio::test]
  async fn duplicate_rows_collapse_to_one_record() {
    let row = "<tr><td>923001234567</td><td>Ali</td><td>3520212345671</td><td>Lahore</td></tr>";
    let html = format!("<table class=\"api-response\"><tbody>{row}{row}</tbody></table>");
    let upstream = Canned::ok(&html);

    let (_, results) = lookup(&upstream, "923001234567").await.unwrap();
    assert_eq!(results.len(), 1);
  }

  #[tokio::test]
  async fn upstream_failure_keeps_its_message() {
    let upstream = Canned::failing();
    let err = lookup(&upstream, "923001234567").await.unwrap_err();

    assert!(matches!(err, LookupError::Upstream(_)));
    assert_eq!(err.to_string(), "upstream down");
  }
}
