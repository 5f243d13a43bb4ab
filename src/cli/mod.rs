//! Command-line surface of the PathFinder client.
//!
//! One subcommand per dashboard page, plus maintenance commands for the
//! local cache and session. Handlers live in sibling modules; this module
//! owns the clap types and application assembly.

mod ai;
mod analytics;
mod cache;
mod jobs;
mod kcse;
mod scraper;
mod session;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use pathfinder::cache::{ResponseCache, AI_NAMESPACE, ANALYTICS_NAMESPACE, KCSE_NAMESPACE};
use pathfinder::config::Config;
use pathfinder::ratelimit::RateGovernor;
use pathfinder::services::{
    AiService, AnalyticsService, ApiTransport, HttpTransport, JobService, KcseService,
    ScraperService,
};
use pathfinder::session::SessionStore;
use pathfinder::storage::{FileStore, KeyValueStore};
use pathfinder::utils::{Clock, SystemClock};

#[derive(Parser)]
#[command(
    name = "pathfinder",
    version,
    about = "Job-market dashboard client for the PathFinder API"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Browse and search job listings
    Jobs {
        #[command(subcommand)]
        action: JobsSubcommand,
    },
    /// Market analytics: demand, salaries, skills, categories
    Analytics {
        #[command(subcommand)]
        action: AnalyticsSubcommand,
    },
    /// AI career tools (rate limited)
    Ai {
        #[command(subcommand)]
        action: AiSubcommand,
    },
    /// KCSE career guidance
    Kcse {
        #[command(subcommand)]
        action: KcseSubcommand,
    },
    /// Control the server-side job scraper
    Scraper {
        #[command(subcommand)]
        action: ScraperSubcommand,
    },
    /// Inspect or clear the local response cache
    Cache {
        #[command(subcommand)]
        action: CacheSubcommand,
    },
    /// Manage the stored session, API token, and theme
    Session {
        #[command(subcommand)]
        action: SessionSubcommand,
    },
}

#[derive(Subcommand)]
pub enum JobsSubcommand {
    /// List jobs, optionally filtered
    List {
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        salary_min: Option<u64>,
    },
    /// Full-text search over titles and descriptions
    Search { query: String },
    /// Show one job in full
    Show { id: u64 },
}

/// Filters shared by every analytics subcommand.
#[derive(Args)]
pub struct AnalyticsFilterArgs {
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub salary_min: Option<u64>,
    #[arg(long)]
    pub date_range: Option<String>,
}

#[derive(Subcommand)]
pub enum AnalyticsSubcommand {
    /// All four dashboard panels at once
    Summary {
        #[command(flatten)]
        filters: AnalyticsFilterArgs,
        /// Clear cached analytics data first
        #[arg(long)]
        refresh: bool,
    },
    /// Monthly demand trend
    Demand {
        #[command(flatten)]
        filters: AnalyticsFilterArgs,
    },
    /// Salary distribution by category
    Salary {
        #[command(flatten)]
        filters: AnalyticsFilterArgs,
    },
    /// Most requested skills
    Skills {
        #[command(flatten)]
        filters: AnalyticsFilterArgs,
    },
    /// Posting share per category
    Categories {
        #[command(flatten)]
        filters: AnalyticsFilterArgs,
    },
}

#[derive(Subcommand)]
pub enum AiSubcommand {
    /// Career recommendations for a skills/interests profile
    Recommend {
        #[arg(long, value_delimiter = ',')]
        skills: Vec<String>,
        #[arg(long)]
        experience: Option<String>,
        #[arg(long, value_delimiter = ',')]
        interests: Vec<String>,
        #[arg(long)]
        goals: Option<String>,
    },
    /// Extract skills from free text
    Skills { text: String },
    /// Generate a learning roadmap toward a role
    Roadmap {
        #[arg(long, value_delimiter = ',')]
        skills: Vec<String>,
        #[arg(long)]
        target_role: Option<String>,
        #[arg(long)]
        timeline: Option<String>,
    },
    /// Predict market fit for a role
    Fit {
        #[arg(long, value_delimiter = ',')]
        skills: Vec<String>,
        #[arg(long)]
        target_role: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum KcseSubcommand {
    /// Career guidance from cluster points and interests
    Guide {
        #[arg(long)]
        points: f64,
        #[arg(long, value_delimiter = ',')]
        interests: Vec<String>,
        #[arg(long, value_delimiter = ',')]
        subjects: Vec<String>,
        #[arg(long)]
        budget: Option<String>,
    },
    /// AI course and university recommendations (rate limited)
    AiRecommend {
        #[arg(long)]
        points: f64,
        #[arg(long, value_delimiter = ',')]
        interests: Vec<String>,
        #[arg(long, value_delimiter = ',')]
        subjects: Vec<String>,
        #[arg(long)]
        budget: Option<String>,
    },
    /// University reference list
    Universities,
    /// Course reference list with cluster point requirements
    Courses,
}

#[derive(Subcommand)]
pub enum ScraperSubcommand {
    /// Trigger a scrape run
    Run {
        #[arg(long, default_value_t = 30)]
        max_jobs: u32,
    },
    /// Show the server's cached scrape results
    Jobs,
    /// Show scraping pipeline status
    Status,
}

#[derive(Subcommand)]
pub enum CacheSubcommand {
    /// Entry counts per namespace
    Stats,
    /// Clear one namespace (analytics, ai, or kcse)
    Clear { namespace: String },
    /// Clear every namespace
    ClearAll,
}

#[derive(Subcommand)]
pub enum SessionSubcommand {
    /// Show the stored session record and theme
    Show,
    /// Store an API bearer token
    Login { token: String },
    /// Remove the stored session and token
    Logout,
    /// Set the display theme (light, dark, or toggle)
    Theme { theme: String },
}

/// Everything a command handler needs, assembled once per invocation.
pub(crate) struct App {
    pub session: SessionStore,
    pub cache: Arc<ResponseCache>,
    pub jobs: JobService,
    pub analytics: AnalyticsService,
    pub ai: AiService,
    pub kcse: KcseService,
    pub scraper: ScraperService,
}

impl App {
    fn build() -> anyhow::Result<Self> {
        let config = Config::load()?;

        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(config.storage_path()));
        let session = SessionStore::new(store.clone());
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let cache = Arc::new(
            ResponseCache::new(store, clock)
                .with_ttl(ANALYTICS_NAMESPACE, config.analytics_ttl)
                .with_ttl(AI_NAMESPACE, config.ai_ttl)
                .with_ttl(KCSE_NAMESPACE, config.kcse_ttl),
        );
        let governor = Arc::new(RateGovernor::new(config.rate_limit, config.rate_window));
        let transport: Arc<dyn ApiTransport> =
            Arc::new(HttpTransport::new(&config, session.clone()));

        Ok(Self {
            jobs: JobService::new(transport.clone()),
            analytics: AnalyticsService::new(transport.clone(), cache.clone()),
            ai: AiService::new(transport.clone(), cache.clone(), governor.clone()),
            kcse: KcseService::new(transport.clone(), cache.clone(), governor),
            scraper: ScraperService::new(transport),
            session,
            cache,
        })
    }
}

/// Parse-and-dispatch entry called from `main`.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let app = App::build()?;
    match cli.command {
        Command::Jobs { action } => jobs::cmd_jobs(&app, action).await,
        Command::Analytics { action } => analytics::cmd_analytics(&app, action).await,
        Command::Ai { action } => ai::cmd_ai(&app, action).await,
        Command::Kcse { action } => kcse::cmd_kcse(&app, action).await,
        Command::Scraper { action } => scraper::cmd_scraper(&app, action).await,
        Command::Cache { action } => cache::cmd_cache(&app, action),
        Command::Session { action } => session::cmd_session(&app, action),
    }
}
