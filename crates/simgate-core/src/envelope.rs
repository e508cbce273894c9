//! The JSON envelope returned for a successful lookup.

use serde::Serialize;

use crate::{
  query::{Query, QueryKind},
  table::{Record, ResultSet},
};

/// Response body for a completed lookup.
///
/// Build it with [`ResponseEnvelope::new`] so `results_count` always matches
/// `results`; the fields are read-only from outside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseEnvelope {
  query:         String,
  query_type:    QueryKind,
  results_count: usize,
  results:       ResultSet,
  developer:     String,
}

impl ResponseEnvelope {
  pub fn new(query: &Query, results: ResultSet, developer: &str) -> Self {
    Self {
      query:         query.value().to_owned(),
      query_type:    query.kind(),
      results_count: results.len(),
      results,
      developer:     developer.to_owned(),
    }
  }

  pub fn query(&self) -> &str { &self.query }

  pub fn query_type(&self) -> QueryKind { self.query_type }

  pub fn results_count(&self) -> usize { self.results_count }

  pub fn results(&self) -> &[Record] { &self.results }

  pub fn developer(&self) -> &str { &self.developer }
}
