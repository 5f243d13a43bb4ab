//! Job scraper control service.
//!
//! The server caches scrape results for an hour itself, so nothing is
//! cached on the client — these calls exist to trigger and inspect the
//! server-side pipeline.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

use super::{decode, ApiTransport};
use super::jobs::Job;

/// Result of a scrape run or a cached-jobs read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeReport {
    pub message: String,
    pub jobs_count: u64,
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub sources: Vec<String>,
}

/// Response from `GET /scraper/scraping-status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScraperStatus {
    pub has_cached_jobs: bool,
    pub cached_jobs_count: u64,
    #[serde(default)]
    pub supported_sites: Vec<String>,
    #[serde(default)]
    pub cache_duration: Option<String>,
}

pub struct ScraperService {
    transport: Arc<dyn ApiTransport>,
}

impl ScraperService {
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    /// Kick off a scrape of up to `max_jobs` listings.
    pub async fn run(&self, max_jobs: u32) -> Result<ScrapeReport> {
        let payload = self
            .transport
            .post(
                &format!("/scraper/scrape-jobs?max_jobs={max_jobs}"),
                &serde_json::json!({}),
            )
            .await?;
        decode(payload)
    }

    /// Read the server's cached scrape results.
    pub async fn scraped_jobs(&self) -> Result<ScrapeReport> {
        let payload = self
            .transport
            .get("/scraper/scraped-jobs", &Value::Null)
            .await?;
        decode(payload)
    }

    /// Scraping pipeline status.
    pub async fn status(&self) -> Result<ScraperStatus> {
        let payload = self
            .transport
            .get("/scraper/scraping-status", &Value::Null)
            .await?;
        decode(payload)
    }
}
