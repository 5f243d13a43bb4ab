//! KCSE career guidance command handlers.

use anyhow::Result;

use pathfinder::services::kcse::{CareerOption, KcseRequest};

use super::{App, KcseSubcommand};

pub(crate) async fn cmd_kcse(app: &App, action: KcseSubcommand) -> Result<()> {
    match action {
        KcseSubcommand::Guide {
            points,
            interests,
            subjects,
            budget,
        } => {
            let guidance = app
                .kcse
                .career_guidance(&request(points, interests, subjects, budget))
                .await?;
            print_careers("Eligible careers", &guidance.eligible_careers);
            if !guidance.related_careers.is_empty() {
                println!();
                print_careers("Related careers", &guidance.related_careers);
            }
            if !guidance.alternative_paths.is_empty() {
                println!("\nAlternative paths:");
                for path in &guidance.alternative_paths {
                    println!("  - {path}");
                }
            }
        }
        KcseSubcommand::AiRecommend {
            points,
            interests,
            subjects,
            budget,
        } => {
            let recommendations = app
                .kcse
                .ai_recommendations(&request(points, interests, subjects, budget))
                .await?;
            println!("{}", serde_json::to_string_pretty(&recommendations)?);
        }
        KcseSubcommand::Universities => {
            let universities = app.kcse.universities().await?;
            println!("{}", serde_json::to_string_pretty(&universities)?);
        }
        KcseSubcommand::Courses => {
            let courses = app.kcse.courses().await?;
            println!("{}", serde_json::to_string_pretty(&courses)?);
        }
    }
    Ok(())
}

fn request(
    points: f64,
    interests: Vec<String>,
    subjects: Vec<String>,
    budget: Option<String>,
) -> KcseRequest {
    KcseRequest {
        cluster_points: points,
        interests,
        preferred_subjects: subjects,
        budget_range: budget,
    }
}

fn print_careers(heading: &str, careers: &[CareerOption]) {
    println!("{heading}");
    println!(
        "{:<28} {:>8} {:>7} {:<20}",
        "Career", "Points", "Match", "Salary range"
    );
    println!("{}", "-".repeat(66));
    for career in careers {
        println!(
            "{:<28} {:>8.1} {:>6}% {:<20}",
            career.name, career.required_points, career.match_percentage, career.salary_range,
        );
    }
}
