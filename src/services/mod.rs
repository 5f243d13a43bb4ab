//! Service clients for the PathFinder API.
//!
//! Each service composes the HTTP transport with the response cache (and,
//! for AI-backed endpoints, the rate governor) under one fixed contract:
//! check the cache, acquire a rate slot when governed, perform the remote
//! call, store the result, return it. A failed remote call never
//! populates the cache and never refunds a rate slot already spent — the
//! slot is consumed by the attempt, not the outcome.

pub mod ai;
pub mod analytics;
pub mod http;
pub mod jobs;
pub mod kcse;
pub mod scraper;

pub use ai::AiService;
pub use analytics::AnalyticsService;
pub use http::HttpTransport;
pub use jobs::JobService;
pub use kcse::KcseService;
pub use scraper::ScraperService;

use std::future::Future;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::cache::ResponseCache;
use crate::error::{PathError, Result};
use crate::ratelimit::RateGovernor;

/// The external HTTP collaborator seam.
///
/// Services depend on this trait, not on reqwest, so tests can script the
/// remote side without a network.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// GET `path`, with query parameters taken from `query`'s top-level
    /// object fields (null fields are skipped).
    async fn get(&self, path: &str, query: &Value) -> Result<Value>;

    /// POST a JSON `body` to `path`.
    async fn post(&self, path: &str, body: &Value) -> Result<Value>;
}

/// Decode a response payload into its typed shape.
///
/// A payload that does not match the expected schema is a remote failure
/// (malformed body), not a local bug.
pub(crate) fn decode<T: DeserializeOwned>(payload: Value) -> Result<T> {
    serde_json::from_value(payload).map_err(|e| PathError::Remote {
        status: None,
        message: format!("unexpected response shape: {e}"),
    })
}

/// The shared orchestration path for cacheable operations.
///
/// `fetch` is the not-yet-polled remote call; it only runs on a cache
/// miss, after the optional governor admits the request. When the
/// parameters cannot be canonicalized the cache is skipped entirely and
/// the operation proceeds uncached.
pub(crate) async fn cached_fetch<T, P, Fut>(
    cache: &ResponseCache,
    governor: Option<&RateGovernor>,
    namespace: &str,
    operation: &str,
    params: &P,
    fetch: Fut,
) -> Result<T>
where
    T: DeserializeOwned,
    P: Serialize + Sync,
    Fut: Future<Output = Result<Value>>,
{
    let cacheable = match cache.get(namespace, operation, params) {
        Ok(Some(hit)) => return decode(hit),
        Ok(None) => true,
        Err(e) => {
            debug!(namespace, operation, "skipping cache: {}", e);
            false
        }
    };

    if let Some(governor) = governor {
        governor.acquire().await;
    }

    let payload = fetch.await?;

    if cacheable {
        if let Err(e) = cache.set(namespace, operation, params, &payload) {
            debug!(namespace, operation, "response not cached: {}", e);
        }
    }

    decode(payload)
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_mismatch_is_remote_error() {
        let err = decode::<Vec<u64>>(json!({"not": "a list"})).unwrap_err();
        match err {
            PathError::Remote { status, message } => {
                assert_eq!(status, None);
                assert!(message.contains("unexpected response shape"), "{message}");
            }
            other => panic!("expected Remote, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_passthrough_value() {
        let value: Value = decode(json!({"anything": 1})).unwrap();
        assert_eq!(value, json!({"anything": 1}));
    }
}
