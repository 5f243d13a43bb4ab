//! KCSE career guidance service.
//!
//! Universities and courses are near-static reference data, so they sit
//! in the `kcse_` cache namespace. The AI-backed recommendation endpoint
//! shares the AI endpoint group's governor — it hits the same paid
//! backend as `/ai/*` — while plain career guidance is computed
//! server-side and goes through ungoverned.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::{ResponseCache, KCSE_NAMESPACE};
use crate::error::Result;
use crate::ratelimit::RateGovernor;

use super::{cached_fetch, decode, ApiTransport};

/// Input for the KCSE guidance endpoints.
#[derive(Debug, Clone, Default, Serialize)]
pub struct KcseRequest {
    pub cluster_points: f64,
    pub interests: Vec<String>,
    pub preferred_subjects: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<String>,
}

/// One career suggestion with admission requirements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerOption {
    pub name: String,
    pub description: String,
    pub required_points: f64,
    #[serde(default)]
    pub universities: Vec<String>,
    pub job_prospects: String,
    pub salary_range: String,
    pub match_percentage: u32,
}

/// Response from `POST /kcse/career-guidance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KcseGuidance {
    pub eligible_careers: Vec<CareerOption>,
    pub related_careers: Vec<CareerOption>,
    #[serde(default)]
    pub alternative_paths: Vec<Value>,
}

pub struct KcseService {
    transport: Arc<dyn ApiTransport>,
    cache: Arc<ResponseCache>,
    governor: Arc<RateGovernor>,
}

impl KcseService {
    pub fn new(
        transport: Arc<dyn ApiTransport>,
        cache: Arc<ResponseCache>,
        governor: Arc<RateGovernor>,
    ) -> Self {
        Self {
            transport,
            cache,
            governor,
        }
    }

    /// Cluster-point based career guidance (server-side rules, no AI).
    pub async fn career_guidance(&self, request: &KcseRequest) -> Result<KcseGuidance> {
        let body = serde_json::to_value(request).unwrap_or_default();
        let payload = self.transport.post("/kcse/career-guidance", &body).await?;
        decode(payload)
    }

    /// AI-generated course and university recommendations.
    ///
    /// Governed by the shared AI-group limiter. Free-form model output,
    /// kept opaque.
    pub async fn ai_recommendations(&self, request: &KcseRequest) -> Result<Value> {
        self.governor.acquire().await;
        let body = serde_json::to_value(request).unwrap_or_default();
        self.transport.post("/kcse/ai-recommendations", &body).await
    }

    /// University reference list (cached).
    pub async fn universities(&self) -> Result<Value> {
        cached_fetch(
            &self.cache,
            None,
            KCSE_NAMESPACE,
            "universities",
            &(),
            self.transport.get("/kcse/universities", &Value::Null),
        )
        .await
    }

    /// Course reference list with cluster point requirements (cached).
    pub async fn courses(&self) -> Result<Value> {
        cached_fetch(
            &self.cache,
            None,
            KCSE_NAMESPACE,
            "courses",
            &(),
            self.transport.get("/kcse/courses", &Value::Null),
        )
        .await
    }

    /// Drop cached KCSE reference data.
    pub fn clear_cache(&self) -> usize {
        self.cache.clear(KCSE_NAMESPACE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::RecordingTransport;
    use crate::services::AiService;
    use crate::storage::MemoryStore;
    use crate::utils::clock::ManualClock;
    use serde_json::json;
    use std::time::Duration;
    use tokio::time::Instant;

    fn cache() -> Arc<ResponseCache> {
        Arc::new(ResponseCache::new(
            Arc::new(MemoryStore::new()),
            Arc::new(ManualClock::new(0)),
        ))
    }

    #[tokio::test]
    async fn test_career_guidance_decodes_options() {
        let transport = Arc::new(RecordingTransport::always(json!({
            "eligible_careers": [{
                "name": "Software Engineering",
                "description": "Design and build software systems",
                "required_points": 42.0,
                "universities": ["UoN", "JKUAT"],
                "job_prospects": "High",
                "salary_range": "KES 80,000 - 250,000",
                "match_percentage": 88
            }],
            "related_careers": [],
            "alternative_paths": [{"name": "TVET Diploma"}]
        })));
        let service = KcseService::new(transport, cache(), Arc::new(RateGovernor::default()));

        let guidance = service
            .career_guidance(&KcseRequest {
                cluster_points: 43.5,
                interests: vec!["technology".into()],
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(guidance.eligible_careers.len(), 1);
        assert_eq!(guidance.eligible_careers[0].match_percentage, 88);
        assert_eq!(guidance.alternative_paths.len(), 1);
    }

    #[tokio::test]
    async fn test_universities_cached_across_calls() {
        let transport = Arc::new(RecordingTransport::always(json!([{"name": "UoN"}])));
        let service =
            KcseService::new(transport.clone(), cache(), Arc::new(RateGovernor::default()));

        service.universities().await.unwrap();
        service.universities().await.unwrap();
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_universities_and_courses_are_separate_entries() {
        let transport = Arc::new(RecordingTransport::always(json!([])));
        let service =
            KcseService::new(transport.clone(), cache(), Arc::new(RateGovernor::default()));

        service.universities().await.unwrap();
        service.courses().await.unwrap();
        assert_eq!(
            transport.call_labels(),
            vec!["GET /kcse/universities", "GET /kcse/courses"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_ai_recommendations_share_the_ai_group_governor() {
        // One governor across AiService and KcseService: both drain the
        // same window.
        let governor = Arc::new(RateGovernor::new(2, Duration::from_secs(60)));
        let shared_cache = cache();

        let kcse_transport = Arc::new(RecordingTransport::always(json!({"courses": []})));
        let kcse = KcseService::new(kcse_transport, shared_cache.clone(), governor.clone());

        let ai_transport = Arc::new(RecordingTransport::always(json!({"skills": []})));
        let ai = AiService::new(ai_transport, shared_cache, governor.clone());

        let request = KcseRequest::default();
        let before = Instant::now();
        kcse.ai_recommendations(&request).await.unwrap();
        ai.analyze_skills("rust").await.unwrap();
        assert_eq!(before.elapsed(), Duration::ZERO);

        // Third AI-group call, regardless of which service, waits.
        kcse.ai_recommendations(&request).await.unwrap();
        assert!(before.elapsed() >= Duration::from_secs(60));
    }

    #[tokio::test]
    async fn test_clear_cache_scopes_to_kcse_namespace() {
        let transport = Arc::new(RecordingTransport::always(json!([])));
        let service =
            KcseService::new(transport.clone(), cache(), Arc::new(RateGovernor::default()));

        service.universities().await.unwrap();
        service.courses().await.unwrap();
        assert_eq!(service.clear_cache(), 2);
        service.universities().await.unwrap();
        assert_eq!(transport.call_count(), 3);
    }
}
