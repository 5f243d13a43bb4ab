//! AI career tool command handlers.

use anyhow::Result;
use serde_json::Value;

use pathfinder::services::ai::{FitRequest, RecommendationRequest, RoadmapRequest};

use super::{AiSubcommand, App};

pub(crate) async fn cmd_ai(app: &App, action: AiSubcommand) -> Result<()> {
    match action {
        AiSubcommand::Recommend {
            skills,
            experience,
            interests,
            goals,
        } => {
            let result = app
                .ai
                .recommendations(&RecommendationRequest {
                    skills,
                    experience,
                    interests,
                    goals,
                    education: None,
                    current_role: None,
                })
                .await?;
            println!("Recommendations:");
            for (i, rec) in result.recommendations.iter().enumerate() {
                println!("{}. {}", i + 1, render(rec));
            }
        }
        AiSubcommand::Skills { text } => {
            let analysis = app.ai.analyze_skills(&text).await?;
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
        AiSubcommand::Roadmap {
            skills,
            target_role,
            timeline,
        } => {
            let roadmap = app
                .ai
                .roadmap(&RoadmapRequest {
                    skills,
                    goals: None,
                    target_role,
                    timeline,
                })
                .await?;
            println!("Roadmap to {} ({})", roadmap.target_role, roadmap.timeline);
            println!("{}", "-".repeat(40));
            for step in &roadmap.steps {
                println!(
                    "{}. {} [{}]\n   {}",
                    step.step, step.title, step.duration, step.description
                );
            }
        }
        AiSubcommand::Fit { skills, target_role } => {
            let prediction = app
                .ai
                .predict_fit(&FitRequest {
                    skills,
                    experience: None,
                    target_role,
                })
                .await?;
            println!("Fit score: {}%", prediction.fit_score);
            if !prediction.strengths.is_empty() {
                println!("Strengths: {}", prediction.strengths.join(", "));
            }
            if !prediction.gaps.is_empty() {
                println!("Gaps:      {}", prediction.gaps.join(", "));
            }
            for rec in &prediction.recommendations {
                println!("  - {rec}");
            }
        }
    }
    Ok(())
}

/// Render an opaque recommendation entry on one line.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => {
            // Prefer a title-ish field; fall back to compact JSON.
            for field in ["title", "role", "name", "career"] {
                if let Some(text) = map.get(field).and_then(Value::as_str) {
                    return text.to_string();
                }
            }
            value.to_string()
        }
        other => other.to_string(),
    }
}
