//! Job search service.
//!
//! Job listings change often and the server caches them itself, so these
//! operations are neither cached nor rate-governed on the client.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

use super::{decode, ApiTransport};

/// Filters for `GET /jobs`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JobQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_scraped: Option<bool>,
}

/// A job listing as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: u64,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub salary: Option<u64>,
    pub location: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub apply_url: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

pub struct JobService {
    transport: Arc<dyn ApiTransport>,
}

impl JobService {
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    /// List jobs matching `query`.
    pub async fn list(&self, query: &JobQuery) -> Result<Vec<Job>> {
        let query = serde_json::to_value(query).unwrap_or_default();
        let payload = self.transport.get("/jobs", &query).await?;
        decode(payload)
    }

    /// Full-text search over job titles and descriptions.
    pub async fn search(&self, q: &str) -> Result<Vec<Job>> {
        let payload = self
            .transport
            .get("/jobs/search", &serde_json::json!({ "q": q }))
            .await?;
        decode(payload)
    }

    /// Fetch a single job by id.
    pub async fn get(&self, id: u64) -> Result<Job> {
        let payload = self
            .transport
            .get(&format!("/jobs/{id}"), &Value::Null)
            .await?;
        decode(payload)
    }
}
