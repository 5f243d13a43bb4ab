//! AI career service: recommendations, skills analysis, roadmap, market fit.
//!
//! Every operation here reaches a paid AI backend, so all of them pass
//! through one shared [`RateGovernor`] before going remote. The two
//! operations whose answers are stable for a given input (recommendations
//! and roadmaps) are additionally cached for 10 minutes; skills analysis
//! and fit prediction are always fresh.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::{ResponseCache, AI_NAMESPACE};
use crate::error::Result;
use crate::ratelimit::RateGovernor;

use super::{cached_fetch, decode, ApiTransport};

/// Input for `POST /ai/recommend`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecommendationRequest {
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    pub interests: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_role: Option<String>,
}

/// Response from `POST /ai/recommend`. The recommendation entries are
/// free-form model output, kept opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerRecommendations {
    pub recommendations: Vec<Value>,
}

/// Input for `POST /ai/roadmap`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RoadmapRequest {
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapStep {
    pub step: u32,
    pub title: String,
    pub description: String,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    pub steps: Vec<RoadmapStep>,
    pub target_role: String,
    pub timeline: String,
}

/// Input for `POST /ai/fit`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FitRequest {
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitPrediction {
    pub fit_score: u32,
    pub match_percentage: u32,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub gaps: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

pub struct AiService {
    transport: Arc<dyn ApiTransport>,
    cache: Arc<ResponseCache>,
    governor: Arc<RateGovernor>,
}

impl AiService {
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

    /// Career recommendations for a skills/interests profile.
    ///
    /// Cached: a hit returns without touching the governor.
    pub async fn recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> Result<CareerRecommendations> {
        let body = serde_json::to_value(request).unwrap_or_default();
        cached_fetch(
            &self.cache,
            Some(&self.governor),
            AI_NAMESPACE,
            "recommend",
            request,
            self.transport.post("/ai/recommend", &body),
        )
        .await
    }

    /// Extract skills from free text. Always fresh.
    pub async fn analyze_skills(&self, text: &str) -> Result<Value> {
        self.governor.acquire().await;
        self.transport
            .post("/ai/skills", &serde_json::json!({ "text": text }))
            .await
    }

    /// Generate a learning roadmap toward a target role.
    pub async fn roadmap(&self, request: &RoadmapRequest) -> Result<Roadmap> {
        let body = serde_json::to_value(request).unwrap_or_default();
        cached_fetch(
            &self.cache,
            Some(&self.governor),
            AI_NAMESPACE,
            "roadmap",
            request,
            self.transport.post("/ai/roadmap", &body),
        )
        .await
    }

    /// Predict market fit for a role. Always fresh.
    pub async fn predict_fit(&self, request: &FitRequest) -> Result<FitPrediction> {
        self.governor.acquire().await;
        let body = serde_json::to_value(request).unwrap_or_default();
        let payload = self.transport.post("/ai/fit", &body).await?;
        decode(payload)
    }

    /// Drop every cached AI response (privacy clearing).
    pub fn clear_cache(&self) -> usize {
        self.cache.clear(AI_NAMESPACE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PathError;
    use crate::services::testing::RecordingTransport;
    use crate::storage::MemoryStore;
    use crate::utils::clock::ManualClock;
    use serde_json::json;
    use std::time::Duration;
    use tokio::time::Instant;

    fn service_with(
        transport: Arc<RecordingTransport>,
        governor: Arc<RateGovernor>,
    ) -> AiService {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(0));
        AiService::new(
            transport,
            Arc::new(ResponseCache::new(store, clock)),
            governor,
        )
    }

    fn recommend_payload() -> Value {
        json!({"recommendations": [{"role": "Data Engineer", "score": 0.9}]})
    }

    #[tokio::test]
    async fn test_recommendations_cached_across_calls() {
        let transport = Arc::new(RecordingTransport::always(recommend_payload()));
        let service = service_with(transport.clone(), Arc::new(RateGovernor::default()));
        let request = RecommendationRequest {
            skills: vec!["Rust".into()],
            ..Default::default()
        };

        let first = service.recommendations(&request).await.unwrap();
        let second = service.recommendations(&request).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_hit_does_not_spend_a_rate_slot() {
        let transport = Arc::new(RecordingTransport::always(recommend_payload()));
        // One slot only: if a hit went through the governor, the second
        // call would stall for the full window.
        let governor = Arc::new(RateGovernor::new(1, Duration::from_secs(60)));
        let service = service_with(transport, governor.clone());
        let request = RecommendationRequest::default();

        service.recommendations(&request).await.unwrap();
        let before = Instant::now();
        service.recommendations(&request).await.unwrap();
        assert_eq!(before.elapsed(), Duration::ZERO);
        assert_eq!(governor.remaining(), 0, "only the miss consumed a slot");
    }

    #[tokio::test(start_paused = true)]
    async fn test_uncached_operations_spend_slots_until_window_is_full() {
        let transport = Arc::new(RecordingTransport::always(json!({"skills": []})));
        let governor = Arc::new(RateGovernor::new(2, Duration::from_secs(60)));
        let service = service_with(transport, governor);

        let before = Instant::now();
        service.analyze_skills("rust and sql").await.unwrap();
        service.analyze_skills("python").await.unwrap();
        assert_eq!(before.elapsed(), Duration::ZERO);

        // Third call overflows the window and must wait it out.
        service.analyze_skills("go").await.unwrap();
        assert!(before.elapsed() >= Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_call_does_not_refund_its_slot() {
        let transport = Arc::new(RecordingTransport::scripted(vec![
            Err(PathError::api(500, "model overloaded")),
            Ok(json!({"skills": []})),
        ]));
        let governor = Arc::new(RateGovernor::new(1, Duration::from_secs(60)));
        let service = service_with(transport, governor);

        service.analyze_skills("rust").await.unwrap_err();

        // The slot was spent by the attempt; the retry waits a full window.
        let before = Instant::now();
        service.analyze_skills("rust").await.unwrap();
        assert!(before.elapsed() >= Duration::from_secs(60));
    }

    #[tokio::test]
    async fn test_failed_recommendation_is_not_cached() {
        let transport = Arc::new(RecordingTransport::scripted(vec![
            Err(PathError::api(500, "boom")),
            Ok(recommend_payload()),
        ]));
        let service = service_with(transport.clone(), Arc::new(RateGovernor::default()));
        let request = RecommendationRequest::default();

        service.recommendations(&request).await.unwrap_err();
        let recovered = service.recommendations(&request).await.unwrap();
        assert_eq!(recovered.recommendations.len(), 1);
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_roadmap_decodes_steps() {
        let transport = Arc::new(RecordingTransport::always(json!({
            "steps": [
                {"step": 1, "title": "Learn Core Skills", "description": "Master the fundamentals", "duration": "3 months"},
                {"step": 2, "title": "Build Projects", "description": "Create portfolio projects", "duration": "2 months"}
            ],
            "target_role": "Developer",
            "timeline": "6 months"
        })));
        let service = service_with(transport, Arc::new(RateGovernor::default()));

        let roadmap = service.roadmap(&RoadmapRequest::default()).await.unwrap();
        assert_eq!(roadmap.steps.len(), 2);
        assert_eq!(roadmap.steps[0].title, "Learn Core Skills");
        assert_eq!(roadmap.target_role, "Developer");
    }

    #[tokio::test]
    async fn test_predict_fit_decodes_prediction() {
        let transport = Arc::new(RecordingTransport::always(json!({
            "fit_score": 75,
            "match_percentage": 75,
            "strengths": ["Rust"],
            "gaps": ["Cloud Computing", "DevOps"],
            "recommendations": ["Learn AWS"]
        })));
        let service = service_with(transport.clone(), Arc::new(RateGovernor::default()));

        let prediction = service
            .predict_fit(&FitRequest {
                skills: vec!["Rust".into()],
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(prediction.fit_score, 75);
        assert_eq!(prediction.gaps.len(), 2);
        assert_eq!(transport.call_labels(), vec!["POST /ai/fit"]);
    }

    #[tokio::test]
    async fn test_clear_cache_scopes_to_ai_namespace() {
        let transport = Arc::new(RecordingTransport::always(recommend_payload()));
        let service = service_with(transport.clone(), Arc::new(RateGovernor::default()));
        let request = RecommendationRequest::default();

        service.recommendations(&request).await.unwrap();
        assert_eq!(service.clear_cache(), 1);
        service.recommendations(&request).await.unwrap();
        assert_eq!(transport.call_count(), 2);
    }
}
