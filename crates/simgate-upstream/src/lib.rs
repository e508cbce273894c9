//! Network side of simgate: the shared rate limiter and the HTTP fetcher
//! that implement the traits in [`simgate_core::upstream`].

pub mod error;
pub mod fetch;
pub mod limiter;

pub use error::Error;
pub use fetch::{HttpUpstream, UpstreamConfig};
pub use limiter::IntervalLimiter;
