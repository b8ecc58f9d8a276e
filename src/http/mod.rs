//! HTTP client with retry and rate limiting
//!
//! Wraps reqwest with the retry mechanism the rest of the adapter defers
//! to: throttled (429) and timed-out requests are re-issued with capped
//! backoff, everything else surfaces immediately. A token-bucket limiter
//! keeps request volume under the org's per-minute rate limits.

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
