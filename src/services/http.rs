//! HTTP transport for the PathFinder API.
//!
//! Owns the pieces of the remote contract the services should not care
//! about: the base URL, the 10-second request timeout, the optional
//! bearer credential, and uniform error mapping. Non-2xx responses and
//! network failures both surface as [`PathError::Remote`]; the message is
//! pulled from the body's `message` or `detail` field when the server
//! sent one. The transport never retries.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::{PathError, Result};
use crate::session::SessionStore;

use super::ApiTransport;

/// reqwest-backed [`ApiTransport`].
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl HttpTransport {
    pub fn new(config: &Config, session: SessionStore) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            base_url: config.api_base_url.as_str().trim_end_matches('/').to_string(),
            session,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the bearer credential when one is stored.
    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.token() {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }

    async fn dispatch(&self, request: reqwest::RequestBuilder) -> Result<Value> {
        let response = request
            .send()
            .await
            .map_err(|e| PathError::network(format!("request failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return response.json::<Value>().await.map_err(|e| {
                PathError::api(status.as_u16(), format!("failed to parse response body: {e}"))
            });
        }

        let body = response.text().await.unwrap_or_default();
        Err(PathError::api(
            status.as_u16(),
            extract_error_message(status.as_u16(), &body),
        ))
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn get(&self, path: &str, query: &Value) -> Result<Value> {
        debug!(path, "GET request");
        let mut request = self
            .client
            .get(self.endpoint(path))
            .header("Content-Type", "application/json");
        let pairs = query_pairs(query);
        if !pairs.is_empty() {
            request = request.query(&pairs);
        }
        self.dispatch(self.apply_auth(request)).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        debug!(path, "POST request");
        let request = self
            .client
            .post(self.endpoint(path))
            .header("Content-Type", "application/json")
            .json(body);
        self.dispatch(self.apply_auth(request)).await
    }
}

/// Flatten a JSON object into query pairs. Null fields are omitted;
/// non-string scalars are rendered as their JSON text.
fn query_pairs(query: &Value) -> Vec<(String, String)> {
    match query {
        Value::Object(map) => map
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| {
                let rendered = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), rendered)
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Pull a human-readable message out of an error body.
///
/// The PathFinder API reports errors as `{"message": …}`; its FastAPI
/// ancestry also produces `{"detail": …}`. Anything else falls back to
/// the raw body, or a bare status line when the body is empty.
fn extract_error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v["message"]
                .as_str()
                .or_else(|| v["detail"].as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                format!("HTTP {status}")
            } else {
                trimmed.to_string()
            }
        })
}
