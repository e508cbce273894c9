//! HTTP fetcher for the upstream lookup page.

use std::{sync::Arc, time::Duration};

use reqwest::{
  Client,
  header::{ACCEPT_LANGUAGE, REFERER},
};
use simgate_core::upstream::{RateLimiter, Upstream};

use crate::error::Error;

/// Browser user agent the upstream expects.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                              AppleWebKit/537.36 (KHTML, like Gecko) \
                              Chrome/140.0.0.0 Safari/537.36";

pub const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9";

/// Name of the form field carrying the query value.
pub const QUERY_FIELD: &str = "search_query";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Where and how to reach the upstream.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
  pub base_url: String,
  pub path:     String,
  pub timeout:  Duration,
  /// When `false`, every fetch fails with [`Error::Disabled`].
  pub enabled:  bool,
}

impl UpstreamConfig {
  pub fn new(base_url: impl Into<String>, path: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into(),
      path:     path.into(),
      timeout:  DEFAULT_TIMEOUT,
      enabled:  true,
    }
  }

  fn base(&self) -> &str { self.base_url.trim_end_matches('/') }

  /// Full URL of the lookup page.
  pub fn url(&self) -> String {
    if self.path.starts_with('/') {
      format!("{}{}", self.base(), self.path)
    } else {
      format!("{}/{}", self.base(), self.path)
    }
  }

  /// The site root, sent as `Referer`.
  pub fn referer(&self) -> String { format!("{}/", self.base()) }
}

/// Posts queries to the upstream lookup page, one limiter permit per call.
///
/// Cheap to clone; the client and limiter are shared.
#[derive(Debug)]
pub struct HttpUpstream<L> {
  client:  Client,
  limiter: Arc<L>,
  url:     String,
  referer: String,
  enabled: bool,
}

impl<L> Clone for HttpUpstream<L> {
  fn clone(&self) -> Self {
    Self {
      client:  self.client.clone(),
      limiter: Arc::clone(&self.limiter),
      url:     self.url.clone(),
      referer: self.referer.clone(),
      enabled: self.enabled,
    }
  }
}

impl<L: RateLimiter> HttpUpstream<L> {
  pub fn new(config: &UpstreamConfig, limiter: Arc<L>) -> Result<Self, Error> {
    let client = Client::builder()
      .user_agent(USER_AGENT)
      .timeout(config.timeout)
      .build()
      .map_err(Error::Client)?;

    Ok(Self {
      client,
      limiter,
      url: config.url(),
      referer: config.referer(),
      enabled: config.enabled,
    })
  }

  pub fn url(&self) -> &str { &self.url }
}

impl<L: RateLimiter> Upstream for HttpUpstream<L> {
  type Error = Error;

  async fn fetch(&self, value: &str) -> Result<String, Error> {
    if !self.enabled {
      return Err(Error::Disabled);
    }

    self.limiter.acquire().await;
    tracing::debug!(url = %self.url, "posting upstream lookup");

    let resp = self
      .client
      .post(&self.url)
      .header(REFERER, self.referer.as_str())
      .header(ACCEPT_LANGUAGE, ACCEPT_LANGUAGE_VALUE)
      .form(&[(QUERY_FIELD, value)])
      .send()
      .await
      .map_err(Error::Unavailable)?;

    let status = resp.status();
    if !status.is_success() {
      return Err(Error::Http { status: status.as_u16() });
    }

    resp.text().await.map_err(Error::Unavailable)
  }
}
