// src/config.rs
//! Run configuration: feed set, freshness window, rollup trigger hours,
//! ledger path and retention. TOML with an embedded default, path
//! overridable via env, mirroring the lexicon loader.

use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_MONITOR_CONFIG_PATH: &str = "config/monitor.toml";
pub const ENV_MONITOR_CONFIG_PATH: &str = "MONITOR_CONFIG_PATH";

const EMBEDDED_CONFIG: &str = include_str!("../config/monitor.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    pub monitor: MonitorSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitorSection {
    /// Fixed institutional feed URLs.
    #[serde(default)]
    pub feeds: Vec<String>,
    /// Early-warning Google News search queries, expanded to RSS URLs.
    #[serde(default)]
    pub google_news_queries: Vec<String>,
    #[serde(default = "default_max_age_hours")]
    pub max_age_hours: u32,
    #[serde(default = "default_max_entries")]
    pub max_entries_per_feed: usize,
    /// Local hours (operational timezone) at which the rollup fires.
    #[serde(default = "default_summary_hours")]
    pub summary_hours: Vec<u32>,
    /// Operational timezone as a fixed UTC offset (Riyadh: +3, no DST).
    #[serde(default = "default_utc_offset")]
    pub utc_offset_hours: i32,
    /// Ledger retention in days; 0 keeps fingerprints forever.
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,
    /// Optional target language for best-effort alert translation
    /// (e.g. "ar"). Empty disables translation.
    #[serde(default)]
    pub target_language: String,
}

fn default_max_age_hours() -> u32 {
    72
}
fn default_max_entries() -> usize {
    40
}
fn default_summary_hours() -> Vec<u32> {
    vec![6, 18]
}
fn default_utc_offset() -> i32 {
    3
}
fn default_retention_days() -> u32 {
    30
}
fn default_state_path() -> PathBuf {
    PathBuf::from("monitor_state.json")
}

impl MonitorConfig {
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        toml::from_str(toml_str).context("parsing monitor config TOML")
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading monitor config at {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    pub fn load_default() -> anyhow::Result<Self> {
        if let Ok(p) = std::env::var(ENV_MONITOR_CONFIG_PATH) {
            return Self::from_path(&PathBuf::from(p));
        }
        let default = PathBuf::from(DEFAULT_MONITOR_CONFIG_PATH);
        if default.exists() {
            return Self::from_path(&default);
        }
        Self::from_toml_str(EMBEDDED_CONFIG)
    }

    /// All feed URLs for a run: fixed feeds plus Google News search feeds.
    pub fn feed_urls(&self) -> Vec<String> {
        let mut urls = self.monitor.feeds.clone();
        urls.extend(
            self.monitor
                .google_news_queries
                .iter()
                .map(|q| google_news_rss_url(q)),
        );
        urls
    }
}

/// Build a Google News RSS search URL. Queries in config are plain words;
/// spaces are the only characters that need escaping.
pub fn google_news_rss_url(query: &str) -> String {
    let q = query.trim().replace(' ', "%20");
    format!("https://news.google.com/rss/search?q={q}&hl=en&gl=US&ceid=US:en")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_parses() {
        let cfg = MonitorConfig::from_toml_str(EMBEDDED_CONFIG).expect("embedded config");
        assert_eq!(cfg.monitor.max_age_hours, 72);
        assert_eq!(cfg.monitor.summary_hours, vec![6, 18]);
        assert_eq!(cfg.monitor.utc_offset_hours, 3);
        assert_eq!(cfg.monitor.feeds.len(), 3);
        assert!(!cfg.monitor.google_news_queries.is_empty());
    }

    #[test]
    fn feed_urls_expand_queries() {
        let cfg = MonitorConfig::from_toml_str(
            r#"
[monitor]
feeds = ["https://example.org/a.xml"]
google_news_queries = ["radiation leak"]
"#,
        )
        .unwrap();
        let urls = cfg.feed_urls();
        assert_eq!(urls.len(), 2);
        assert!(urls[1].contains("q=radiation%20leak"));
    }

    #[test]
    fn defaults_fill_missing_fields() {
        let cfg = MonitorConfig::from_toml_str("[monitor]\n").unwrap();
        assert_eq!(cfg.monitor.max_entries_per_feed, 40);
        assert_eq!(cfg.monitor.retention_days, 30);
        assert_eq!(cfg.monitor.state_path, PathBuf::from("monitor_state.json"));
        assert!(cfg.monitor.target_language.is_empty());
    }
}
