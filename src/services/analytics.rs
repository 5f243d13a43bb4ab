//! Analytics service: dashboard chart data behind a 5-minute cache.
//!
//! Every operation takes the same filter set and runs through the shared
//! caching contract. `summary` fetches all four panels concurrently, the
//! way the dashboard mounts them.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::cache::{ResponseCache, ANALYTICS_NAMESPACE};
use crate::error::Result;

use super::{cached_fetch, ApiTransport};

/// Query filters shared by every analytics endpoint.
///
/// Field names follow the API's wire format (`salaryMin`, `dateRange`).
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalyticsFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "salaryMin", skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<u64>,
    #[serde(rename = "dateRange", skip_serializing_if = "Option::is_none")]
    pub date_range: Option<String>,
}

/// Monthly posting volume for the demand chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandTrend {
    pub month: String,
    pub jobs: u64,
}

/// Average salary per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryData {
    pub category: String,
    pub salary: u64,
}

/// Posting count for one skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillData {
    pub name: String,
    pub count: u64,
    #[serde(default)]
    pub trend: Option<String>,
}

/// Share of postings per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryData {
    pub name: String,
    pub count: u64,
    pub percentage: f64,
}

/// All four dashboard panels.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    pub demand: Vec<DemandTrend>,
    pub salary: Vec<SalaryData>,
    pub skills: Vec<SkillData>,
    pub categories: Vec<CategoryData>,
}

pub struct AnalyticsService {
    transport: Arc<dyn ApiTransport>,
    cache: Arc<ResponseCache>,
}

impl AnalyticsService {
    pub fn new(transport: Arc<dyn ApiTransport>, cache: Arc<ResponseCache>) -> Self {
        Self { transport, cache }
    }

    pub async fn demand_trends(&self, filters: &AnalyticsFilters) -> Result<Vec<DemandTrend>> {
        self.fetch("demand", "/analytics/demand", filters).await
    }

    pub async fn salary_data(&self, filters: &AnalyticsFilters) -> Result<Vec<SalaryData>> {
        self.fetch("salary", "/analytics/salary", filters).await
    }

    pub async fn top_skills(&self, filters: &AnalyticsFilters) -> Result<Vec<SkillData>> {
        self.fetch("skills", "/analytics/skills", filters).await
    }

    pub async fn categories(&self, filters: &AnalyticsFilters) -> Result<Vec<CategoryData>> {
        self.fetch("categories", "/analytics/categories", filters).await
    }

    /// Fetch all four panels concurrently.
    pub async fn summary(&self, filters: &AnalyticsFilters) -> Result<AnalyticsSummary> {
        let (demand, salary, skills, categories) = futures::try_join!(
            self.demand_trends(filters),
            self.salary_data(filters),
            self.top_skills(filters),
            self.categories(filters),
        )?;
        Ok(AnalyticsSummary {
            demand,
            salary,
            skills,
            categories,
        })
    }

    /// Drop every cached analytics response (explicit refresh).
    pub fn clear_cache(&self) -> usize {
        self.cache.clear(ANALYTICS_NAMESPACE)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
        filters: &AnalyticsFilters,
    ) -> Result<T> {
        let query = serde_json::to_value(filters).unwrap_or_default();
        cached_fetch(
            &self.cache,
            None,
            ANALYTICS_NAMESPACE,
            operation,
            filters,
            self.transport.get(path, &query),
        )
        .await
    }
}
