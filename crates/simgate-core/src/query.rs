//! Query classification.
//!
//! A raw input string becomes a [`Query`] only if the whole trimmed value
//! matches one of the accepted formats:
//!
//! - national ID (CNIC): exactly 13 decimal digits, kept as-is;
//! - local mobile: `03` + 9 digits, rewritten to `923` + the same 9 digits;
//! - international mobile: `92` + 10 digits, kept as-is.

use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

static NATIONAL_ID: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[0-9]{13}$").expect("NATIONAL_ID regex is valid")
});

static LOCAL_MOBILE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^03[0-9]{9}$").expect("LOCAL_MOBILE regex is valid")
});

static MOBILE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^92[0-9]{10}$").expect("MOBILE regex is valid")
});

/// The format a query was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
  Mobile,
  NationalId,
}

impl QueryKind {
  pub fn as_str(self) -> &'static str {
    match self {
      QueryKind::Mobile => "mobile",
      QueryKind::NationalId => "national_id",
    }
  }
}

impl fmt::Display for QueryKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A validated, normalized lookup query.
///
/// Only [`Query::classify`] constructs one, so `value` always satisfies the
/// format of `kind`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
  kind:  QueryKind,
  value: String,
}

impl Query {
  /// Classify and normalize `raw`.
  pub fn classify(raw: &str) -> Result<Self> {
    let trimmed = raw.trim();

    if NATIONAL_ID.is_match(trimmed) {
      return Ok(Self {
        kind:  QueryKind::NationalId,
        value: trimmed.to_owned(),
      });
    }

    let normalized = normalize_mobile(trimmed);
    if MOBILE.is_match(&normalized) {
      return Ok(Self {
        kind:  QueryKind::Mobile,
        value: normalized,
      });
    }

    Err(Error::InvalidQuery)
  }

  pub fn kind(&self) -> QueryKind { self.kind }

  /// The normalized value sent upstream.
  pub fn value(&self) -> &str { &self.value }
}

/// Rewrite the local `03XXXXXXXXX` form to `923XXXXXXXXX`; anything else is
/// returned unchanged.
fn normalize_mobile(value: &str) -> String {
  if LOCAL_MOBILE.is_match(value) {
    format!("92{}", &value[1..])
  } else {
    value.to_owned()
  }
}
