// src/ledger.rs
//! Durable dedup state: fingerprint -> first-seen timestamp, plus the last
//! emitted rollup window key. Loaded once per run, mutated in memory, and
//! written back once at run end. A crash mid-run loses only that run's
//! additions; the affected entries are simply re-evaluated next run.

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

use crate::ingest::types::FeedItem;

/// Stable per-source event identifier: SHA-256 over label + entry identity
/// (feed GUID, else link, else title+label). Identical logical events from
/// different sources intentionally yield distinct fingerprints.
pub fn fingerprint(item: &FeedItem) -> String {
    let label = item.source.as_str();
    let identity: String = match item.guid.as_deref().filter(|g| !g.is_empty()) {
        Some(g) => g.to_string(),
        None if !item.link.is_empty() => item.link.clone(),
        None => format!("{}{}", item.title, label),
    };
    let mut hasher = Sha256::new();
    hasher.update(label.as_bytes());
    hasher.update(b"::");
    hasher.update(identity.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(64);
    for b in digest.iter() {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Ledger {
    /// fingerprint -> first-seen timestamp. BTreeMap keeps the persisted
    /// JSON stable and diffable.
    #[serde(default)]
    pub seen: BTreeMap<String, DateTime<Utc>>,
    /// Rollup window key (`%Y%m%d%H`) most recently emitted.
    #[serde(default)]
    pub last_summary_window: String,
}

impl Ledger {
    /// Load from `path`. Any read/parse failure falls back to an empty
    /// ledger: re-notifying previously-seen items beats crashing.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(ledger) => ledger,
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "ledger unparsable; starting empty");
                    Self::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                warn!(error = %e, path = %path.display(), "ledger unreadable; starting empty");
                Self::default()
            }
        }
    }

    /// Persist as pretty JSON. This is the one failure mode that merits a
    /// non-zero exit: silently losing dedup state re-notifies everything on
    /// every subsequent run.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self).context("serializing ledger")?;
        std::fs::write(path, json)
            .with_context(|| format!("writing ledger to {}", path.display()))
    }

    pub fn has_seen(&self, fp: &str) -> bool {
        self.seen.contains_key(fp)
    }

    pub fn mark_seen(&mut self, fp: String, first_seen: DateTime<Utc>) {
        self.seen.entry(fp).or_insert(first_seen);
    }

    /// Retention policy: drop fingerprints first seen more than
    /// `retention_days` ago. `0` keeps everything.
    pub fn prune(&mut self, now: DateTime<Utc>, retention_days: u32) -> usize {
        if retention_days == 0 {
            return 0;
        }
        let cutoff = now - Duration::days(i64::from(retention_days));
        let before = self.seen.len();
        self.seen.retain(|_, first_seen| *first_seen >= cutoff);
        before - self.seen.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::types::SourceLabel;
    use chrono::TimeZone;

    fn item(guid: Option<&str>, link: &str, title: &str, source: SourceLabel) -> FeedItem {
        FeedItem {
            title: title.to_string(),
            summary: String::new(),
            link: link.to_string(),
            guid: guid.map(|s| s.to_string()),
            published_at: None,
            source,
        }
    }

    #[test]
    fn fingerprint_prefers_guid_then_link_then_title() {
        let a = item(Some("g-1"), "https://x/1", "T", SourceLabel::Iaea);
        let b = item(Some("g-1"), "https://x/other", "Other title", SourceLabel::Iaea);
        assert_eq!(fingerprint(&a), fingerprint(&b), "guid dominates");

        let c = item(None, "https://x/1", "T", SourceLabel::Iaea);
        let d = item(None, "https://x/1", "Different", SourceLabel::Iaea);
        assert_eq!(fingerprint(&c), fingerprint(&d), "link dominates when no guid");

        let e = item(None, "", "Same headline", SourceLabel::Iaea);
        let f = item(None, "", "Same headline", SourceLabel::Iaea);
        assert_eq!(fingerprint(&e), fingerprint(&f));
    }

    #[test]
    fn fingerprint_is_per_source() {
        let a = item(Some("g-1"), "", "T", SourceLabel::Iaea);
        let b = item(Some("g-1"), "", "T", SourceLabel::GoogleNews);
        assert_ne!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn fingerprint_stable_across_refetch() {
        let a = item(Some("g-1"), "https://x/1", "T", SourceLabel::NrcEvent);
        assert_eq!(fingerprint(&a), fingerprint(&a.clone()));
    }

    #[test]
    fn mark_seen_keeps_first_timestamp() {
        let mut l = Ledger::default();
        let t0 = Utc.with_ymd_and_hms(2025, 8, 1, 6, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2025, 8, 2, 6, 0, 0).unwrap();
        l.mark_seen("fp".into(), t0);
        l.mark_seen("fp".into(), t1);
        assert_eq!(l.seen["fp"], t0);
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let mut l = Ledger::default();
        l.mark_seen("abc".into(), Utc.with_ymd_and_hms(2025, 8, 1, 6, 0, 0).unwrap());
        l.last_summary_window = "2025080106".into();
        l.save(&path).unwrap();
        let back = Ledger::load(&path);
        assert_eq!(back, l);
    }

    #[test]
    fn load_missing_or_corrupt_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert_eq!(Ledger::load(&missing), Ledger::default());

        let corrupt = dir.path().join("bad.json");
        std::fs::write(&corrupt, "{not json").unwrap();
        assert_eq!(Ledger::load(&corrupt), Ledger::default());
    }

    #[test]
    fn prune_drops_old_entries_only() {
        let mut l = Ledger::default();
        let now = Utc.with_ymd_and_hms(2025, 8, 31, 0, 0, 0).unwrap();
        l.mark_seen("old".into(), now - Duration::days(45));
        l.mark_seen("recent".into(), now - Duration::days(5));
        let dropped = l.prune(now, 30);
        assert_eq!(dropped, 1);
        assert!(!l.has_seen("old"));
        assert!(l.has_seen("recent"));

        // retention 0 disables pruning
        l.mark_seen("ancient".into(), now - Duration::days(400));
        assert_eq!(l.prune(now, 0), 0);
        assert!(l.has_seen("ancient"));
    }
}
