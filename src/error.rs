//! Error types for the PathFinder client.
//!
//! One library-wide enum. A cache miss is NOT an error — lookups return
//! `Ok(None)` — so the variants here cover only the failures a caller can
//! actually act on: the remote API, local storage, configuration, and
//! cache key derivation.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PathError>;

/// All errors surfaced by the PathFinder client library.
#[derive(Debug, Error)]
pub enum PathError {
    /// The remote API failed: network error, timeout, non-2xx status, or a
    /// body that could not be decoded. `status` is `None` when the request
    /// never produced an HTTP response.
    #[error("remote API error: {message}")]
    Remote {
        status: Option<u16>,
        message: String,
    },

    /// Invalid or unreadable runtime configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// The local key-value store could not be read.
    #[error("storage error: {0}")]
    Storage(String),

    /// Request parameters could not be canonicalized into a cache key.
    ///
    /// Fatal for the caching step only: callers skip the cache and go
    /// straight to the remote call.
    #[error("cache key derivation failed: {0}")]
    CacheKey(String),
}

impl PathError {
    /// Build a [`PathError::Remote`] for a failure without an HTTP response
    /// (connection refused, DNS, timeout).
    pub fn network(message: impl Into<String>) -> Self {
        Self::Remote {
            status: None,
            message: message.into(),
        }
    }

    /// Build a [`PathError::Remote`] for a non-2xx response.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Remote {
            status: Some(status),
            message: message.into(),
        }
    }

    /// HTTP status associated with this error, when one exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => *status,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_display_includes_message() {
        let err = PathError::api(503, "service unavailable");
        assert_eq!(err.to_string(), "remote API error: service unavailable");
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn test_network_error_has_no_status() {
        let err = PathError::network("connection refused");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_non_remote_errors_have_no_status() {
        let err = PathError::Config("bad URL".into());
        assert_eq!(err.status(), None);
    }
}
