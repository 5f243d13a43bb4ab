//! Local cache inspection and clearing.

use anyhow::{bail, Result};

use pathfinder::cache::{AI_NAMESPACE, ANALYTICS_NAMESPACE, KCSE_NAMESPACE};

use super::{App, CacheSubcommand};

pub(crate) fn cmd_cache(app: &App, action: CacheSubcommand) -> Result<()> {
    match action {
        CacheSubcommand::Stats => {
            let stats = app.cache.stats();
            println!("{:<16} {:>8}", "Namespace", "Entries");
            println!("{}", "-".repeat(25));
            for (namespace, count) in &stats.per_namespace {
                println!("{:<16} {:>8}", namespace, count);
            }
            println!("{}", "-".repeat(25));
            println!("{:<16} {:>8}", "total", stats.total_entries);
        }
        CacheSubcommand::Clear { namespace } => {
            let prefix = resolve_namespace(&namespace)?;
            let removed = app.cache.clear(prefix);
            println!("Cleared {removed} entries from {prefix}");
        }
        CacheSubcommand::ClearAll => {
            let removed = app.cache.clear_all();
            println!("Cleared {removed} cached entries.");
        }
    }
    Ok(())
}

/// Accept both the friendly name (`ai`) and the raw prefix (`ai_`).
fn resolve_namespace(name: &str) -> Result<&'static str> {
    match name.trim_end_matches('_') {
        "analytics" => Ok(ANALYTICS_NAMESPACE),
        "ai" => Ok(AI_NAMESPACE),
        "kcse" => Ok(KCSE_NAMESPACE),
        other => bail!("unknown cache namespace {other:?} (expected analytics, ai, or kcse)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_accepts_friendly_names() {
        assert_eq!(resolve_namespace("ai").unwrap(), AI_NAMESPACE);
        assert_eq!(resolve_namespace("analytics").unwrap(), ANALYTICS_NAMESPACE);
        assert_eq!(resolve_namespace("kcse").unwrap(), KCSE_NAMESPACE);
    }

    #[test]
    fn test_resolve_accepts_raw_prefixes() {
        assert_eq!(resolve_namespace("ai_").unwrap(), AI_NAMESPACE);
        assert_eq!(resolve_namespace("analytics_").unwrap(), ANALYTICS_NAMESPACE);
    }

    #[test]
    fn test_resolve_rejects_unknown() {
        assert!(resolve_namespace("sessions").is_err());
    }
}
