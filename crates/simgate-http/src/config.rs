//! Server configuration.
//!
//! Sources, lowest precedence first: an optional TOML file, the bare
//! environment variables listed in [`ENV_KEYS`], then `SIMGATE_*` variables.

use std::{path::Path, time::Duration};

use serde::Deserialize;
use simgate_upstream::UpstreamConfig;

use crate::error::ConfigError;

/// Unprefixed environment variables read into the configuration.
pub const ENV_KEYS: &[&str] = &[
  "PORT",
  "TARGET_BASE",
  "TARGET_PATH",
  "MIN_INTERVAL",
  "ALLOW_UPSTREAM",
  "REQUEST_TIMEOUT",
  "DEVELOPER",
];

pub const DEFAULT_DEVELOPER: &str = "Savitar";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:            String,
  #[serde(default = "default_port")]
  pub port:            u16,
  /// Scheme and host of the upstream site. Required.
  pub target_base:     String,
  #[serde(default = "default_target_path")]
  pub target_path:     String,
  /// Minimum seconds between upstream calls.
  #[serde(default = "default_min_interval")]
  pub min_interval:    f64,
  #[serde(default = "default_allow_upstream")]
  pub allow_upstream:  bool,
  /// Per-request upstream timeout in seconds.
  #[serde(default = "default_request_timeout")]
  pub request_timeout: f64,
  #[serde(default = "default_developer")]
  pub developer:       String,
}

fn default_host() -> String { "0.0.0.0".to_owned() }
fn default_port() -> u16 { 5000 }
fn default_target_path() -> String { "/".to_owned() }
fn default_min_interval() -> f64 { 1.0 }
fn default_allow_upstream() -> bool { true }
fn default_request_timeout() -> f64 { 20.0 }
fn default_developer() -> String { DEFAULT_DEVELOPER.to_owned() }

impl ServerConfig {
  /// Load from `path` (if it exists) and the process environment.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let env = std::env::vars()
      .filter(|(k, _)| ENV_KEYS.contains(&k.as_str()))
      .collect::<config::Map<_, _>>();
    Self::load_with_env(path, env)
  }

  /// Like [`ServerConfig::load`] with an explicit set of bare variables.
  pub fn load_with_env(
    path: &Path,
    env: config::Map<String, String>,
  ) -> Result<Self, ConfigError> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::default().source(Some(env)))
      .add_source(config::Environment::with_prefix("SIMGATE"))
      .build()?;
    Ok(settings.try_deserialize()?)
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn min_interval(&self) -> Result<Duration, ConfigError> {
    seconds("MIN_INTERVAL", self.min_interval)
  }

  pub fn upstream(&self) -> Result<UpstreamConfig, ConfigError> {
    let mut upstream = UpstreamConfig::new(&self.target_base, &self.target_path);
    upstream.timeout = seconds("REQUEST_TIMEOUT", self.request_timeout)?;
    upstream.enabled = self.allow_upstream;
    Ok(upstream)
  }
}

fn seconds(key: &'static str, value: f64) -> Result<Duration, ConfigError> {
  Duration::try_from_secs_f64(value)
    .map_err(|_| ConfigError::InvalidSeconds { key, value })
}
