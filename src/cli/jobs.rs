//! Job listing and search command handlers.

use anyhow::Result;

use pathfinder::services::jobs::{Job, JobQuery};
use pathfinder::utils::format::{format_salary, truncate};

use super::{App, JobsSubcommand};

pub(crate) async fn cmd_jobs(app: &App, action: JobsSubcommand) -> Result<()> {
    match action {
        JobsSubcommand::List {
            query,
            category,
            location,
            salary_min,
        } => {
            let jobs = app
                .jobs
                .list(&JobQuery {
                    q: query,
                    category,
                    location,
                    salary_min,
                    use_scraped: None,
                })
                .await?;
            print_job_table(&jobs);
        }
        JobsSubcommand::Search { query } => {
            let jobs = app.jobs.search(&query).await?;
            print_job_table(&jobs);
        }
        JobsSubcommand::Show { id } => {
            let job = app.jobs.get(id).await?;
            print_job_detail(&job);
        }
    }
    Ok(())
}

fn print_job_table(jobs: &[Job]) {
    if jobs.is_empty() {
        println!("No jobs found.");
        return;
    }

    println!(
        "{:<6} {:<28} {:<20} {:<16} {:<12}",
        "ID", "Title", "Company", "Location", "Salary"
    );
    println!("{}", "-".repeat(84));
    for job in jobs {
        let salary = job
            .salary
            .map(format_salary)
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<6} {:<28} {:<20} {:<16} {:<12}",
            job.id,
            truncate(&job.title, 26),
            truncate(&job.company, 18),
            truncate(&job.location, 14),
            salary,
        );
    }
    println!("\n{} job(s)", jobs.len());
}

fn print_job_detail(job: &Job) {
    println!("{} at {}", job.title, job.company);
    println!("{}", "-".repeat(40));
    println!("Location:  {}", job.location);
    println!("Category:  {}", job.category);
    if let Some(salary) = job.salary {
        println!("Salary:    {}", format_salary(salary));
    }
    if !job.skills.is_empty() {
        println!("Skills:    {}", job.skills.join(", "));
    }
    if let Some(description) = &job.description {
        println!("\n{description}");
    }
    if let Some(url) = &job.apply_url {
        println!("\nApply: {url}");
    }
}
