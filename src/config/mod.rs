//! Runtime configuration: environment variables, optional config file,
//! built-in defaults.
//!
//! Resolution order for every setting: environment variable, then
//! `config.json` in the data directory, then the default. Environment
//! lookup is injected into [`Config::resolve`] so tests exercise the
//! precedence rules without touching the process environment.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::{PathError, Result};

/// Default API base when `PATHFINDER_API_URL` is unset.
const DEFAULT_API_URL: &str = "http://localhost:8000";
/// Per-request timeout owned by the HTTP client.
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_ANALYTICS_TTL_SECS: u64 = 5 * 60;
const DEFAULT_AI_TTL_SECS: u64 = 10 * 60;
const DEFAULT_KCSE_TTL_SECS: u64 = 10 * 60;
const DEFAULT_RATE_LIMIT: u32 = 5;
const DEFAULT_RATE_WINDOW_SECS: u64 = 60;

/// Optional `config.json` shape. Every field may be omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    pub api_base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub analytics_ttl_secs: Option<u64>,
    pub ai_ttl_secs: Option<u64>,
    pub kcse_ttl_secs: Option<u64>,
    pub rate_limit: Option<u32>,
    pub rate_window_secs: Option<u64>,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: Url,
    pub request_timeout: Duration,
    pub data_dir: PathBuf,
    pub analytics_ttl: Duration,
    pub ai_ttl: Duration,
    pub kcse_ttl: Duration,
    pub rate_limit: u32,
    pub rate_window: Duration,
}

impl Config {
    /// Data directory: `PATHFINDER_DATA_DIR`, else `~/.pathfinder`.
    pub fn dir() -> PathBuf {
        if let Ok(dir) = std::env::var("PATHFINDER_DATA_DIR") {
            if !dir.is_empty() {
                return PathBuf::from(dir);
            }
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".pathfinder")
    }

    /// Path of the shared key-value store file.
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join("storage.json")
    }

    /// Load configuration from the data directory and the process
    /// environment.
    ///
    /// A missing `config.json` is fine; an unparseable one is a
    /// [`PathError::Config`] so a typo never silently reverts settings to
    /// defaults.
    pub fn load() -> Result<Self> {
        let dir = Self::dir();
        let file = Self::read_file(&dir.join("config.json"))?;
        Self::resolve(file, dir, &|name| std::env::var(name).ok())
    }

    fn read_file(path: &PathBuf) -> Result<ConfigFile> {
        match std::fs::read_to_string(path) {
            Ok(data) => serde_json::from_str(&data)
                .map_err(|e| PathError::Config(format!("invalid config file {path:?}: {e}"))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
            Err(e) => Err(PathError::Config(format!(
                "failed to read config file {path:?}: {e}"
            ))),
        }
    }

    /// Merge file settings with environment overrides.
    pub fn resolve(
        file: ConfigFile,
        data_dir: PathBuf,
        env: &dyn Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let base = env("PATHFINDER_API_URL")
            .filter(|v| !v.is_empty())
            .or(file.api_base_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_base_url = Url::parse(&base)
            .map_err(|e| PathError::Config(format!("invalid API base URL {base:?}: {e}")))?;

        let timeout_secs = match env("PATHFINDER_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                PathError::Config(format!("PATHFINDER_TIMEOUT_SECS is not a number: {raw:?}"))
            })?,
            None => file.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            api_base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            data_dir,
            analytics_ttl: Duration::from_secs(
                file.analytics_ttl_secs.unwrap_or(DEFAULT_ANALYTICS_TTL_SECS),
            ),
            ai_ttl: Duration::from_secs(file.ai_ttl_secs.unwrap_or(DEFAULT_AI_TTL_SECS)),
            kcse_ttl: Duration::from_secs(file.kcse_ttl_secs.unwrap_or(DEFAULT_KCSE_TTL_SECS)),
            rate_limit: file.rate_limit.unwrap_or(DEFAULT_RATE_LIMIT),
            rate_window: Duration::from_secs(
                file.rate_window_secs.unwrap_or(DEFAULT_RATE_WINDOW_SECS),
            ),
        })
    }
}
