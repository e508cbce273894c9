//! Core types and pipeline stages for the simgate lookup gateway.
//!
//! This crate is free of HTTP and network dependencies. It classifies raw
//! queries, parses upstream HTML into deduplicated records, and assembles the
//! JSON envelope. The network side is abstracted behind [`upstream::Upstream`]
//! and [`upstream::RateLimiter`], implemented by `simgate-upstream`.

pub mod envelope;
pub mod error;
pub mod lookup;
pub mod query;
pub mod table;
pub mod upstream;

pub use envelope::ResponseEnvelope;
pub use error::{Error, LookupError, Result};
pub use lookup::lookup;
pub use query::{Query, QueryKind};
pub use table::{Record, ResultSet, parse_table};
