// src/ingest/types.rs
use anyhow::Result;
use chrono::{DateTime, Utc};

/// Coarse source class derived from the feed URL. Drives trust weighting
/// and the stricter-evidence policy for aggregator items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SourceLabel {
    Iaea,
    NrcEvent,
    NrcNews,
    GoogleNews,
    GenericRss,
}

impl SourceLabel {
    pub fn from_url(url: &str) -> Self {
        if url.contains("www-news.iaea.org") {
            Self::Iaea
        } else if url.contains("nrc.gov") && url.contains("feed=event") {
            Self::NrcEvent
        } else if url.contains("nrc.gov") && url.contains("feed=news") {
            Self::NrcNews
        } else if url.contains("news.google.com") {
            Self::GoogleNews
        } else {
            Self::GenericRss
        }
    }

    /// Official regulators/agencies get higher trust in classification.
    pub fn official(self) -> bool {
        matches!(self, Self::Iaea | Self::NrcEvent | Self::NrcNews)
    }

    /// Stable display key; also the per-source component of fingerprints.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Iaea => "IAEA",
            Self::NrcEvent => "NRC (Event)",
            Self::NrcNews => "NRC (News)",
            Self::GoogleNews => "Google News",
            Self::GenericRss => "RSS",
        }
    }
}

impl std::fmt::Display for SourceLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One feed entry, immutable once read. Missing fields are recovered as
/// empty strings / `None` upstream; never fatal.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FeedItem {
    pub title: String,
    pub summary: String,
    pub link: String,
    pub guid: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub source: SourceLabel,
}

#[async_trait::async_trait]
pub trait FeedProvider: Send + Sync {
    /// Fetch the latest entries, feed-native order. Unreachable or
    /// malformed sources return `Err`; the orchestrator skips them.
    async fn fetch(&self) -> Result<Vec<FeedItem>>;
    fn label(&self) -> SourceLabel;
}
