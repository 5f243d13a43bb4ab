//! Scraper control command handlers.

use anyhow::Result;

use super::{App, ScraperSubcommand};

pub(crate) async fn cmd_scraper(app: &App, action: ScraperSubcommand) -> Result<()> {
    match action {
        ScraperSubcommand::Run { max_jobs } => {
            let report = app.scraper.run(max_jobs).await?;
            println!("{}", report.message);
            println!("Jobs: {}", report.jobs_count);
            if !report.sources.is_empty() {
                println!("Sources: {}", report.sources.join(", "));
            }
        }
        ScraperSubcommand::Jobs => {
            let report = app.scraper.scraped_jobs().await?;
            println!("{}", report.message);
            for job in &report.jobs {
                println!(
                    "  {} at {} ({})",
                    job.title,
                    job.company,
                    job.source.as_deref().unwrap_or("Unknown"),
                );
            }
        }
        ScraperSubcommand::Status => {
            let status = app.scraper.status().await?;
            println!(
                "Cached jobs: {}",
                if status.has_cached_jobs {
                    status.cached_jobs_count.to_string()
                } else {
                    "none".to_string()
                }
            );
            if !status.supported_sites.is_empty() {
                println!("Supported sites: {}", status.supported_sites.join(", "));
            }
            if let Some(duration) = &status.cache_duration {
                println!("Cache duration: {duration}");
            }
        }
    }
    Ok(())
}
