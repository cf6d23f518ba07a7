// src/run.rs
//! Run orchestrator: one full batch pass over all configured feeds.
//! Sequential and single-writer; the ledger is loaded once, mutated in
//! memory, and persisted once at the end. Per-source fetch failures skip
//! that source only; the single hard failure mode is the ledger write.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use metrics::{counter, gauge};
use tracing::{info, warn};

use crate::assess::assess;
use crate::config::MonitorConfig;
use crate::ingest::ensure_metrics_described;
use crate::ingest::rss::RssProvider;
use crate::ingest::types::{FeedProvider, SourceLabel};
use crate::ledger::{fingerprint, Ledger};
use crate::lexicon::Lexicon;
use crate::notify::Notifier;
use crate::relevance::{blob, is_relevant};
use crate::report::{render_alert, render_rollup, NotifiedItem};
use crate::rollup;
use crate::translate::Translator;

/// Floor for the "worst score seen" aggregate; matches the quiet cell of
/// the impact table.
const WORST_SCORE_FLOOR: u8 = 15;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub evaluated: usize,
    pub filtered: usize,
    pub stale: usize,
    pub already_seen: usize,
    pub suppressed: usize,
    pub notified: usize,
    pub delivery_failures: usize,
    pub worst_score: u8,
    pub rollup_sent: bool,
}

/// Build the default provider set from config: fixed institutional feeds
/// plus Google News search feeds.
pub fn providers_from_config(cfg: &MonitorConfig) -> Vec<Box<dyn FeedProvider>> {
    cfg.feed_urls()
        .into_iter()
        .map(|url| Box::new(RssProvider::from_url(url)) as Box<dyn FeedProvider>)
        .collect()
}

/// One full pass: fetch → gate → assess → dedup → notify → rollup → persist.
/// `now` is injected so the rollup cadence is testable.
pub async fn run_once(
    cfg: &MonitorConfig,
    lexicon: &Lexicon,
    providers: &[Box<dyn FeedProvider>],
    notifier: &dyn Notifier,
    translator: &dyn Translator,
    now: DateTime<Utc>,
) -> Result<RunSummary> {
    ensure_metrics_described();

    let mut ledger = Ledger::load(&cfg.monitor.state_path);
    let pruned = ledger.prune(now, cfg.monitor.retention_days);
    if pruned > 0 {
        info!(pruned, "pruned expired ledger fingerprints");
    }

    let cutoff = now - Duration::hours(i64::from(cfg.monitor.max_age_hours));
    let local_now = rollup::to_local(now, cfg.monitor.utc_offset_hours);
    let lang = cfg.monitor.target_language.trim();

    let mut summary = RunSummary {
        worst_score: WORST_SCORE_FLOOR,
        ..RunSummary::default()
    };
    let mut new_items: Vec<NotifiedItem> = Vec::new();

    for provider in providers {
        let items = match provider.fetch().await {
            Ok(items) => items,
            Err(e) => {
                // SourceUnavailable: skip this source, keep the run alive.
                warn!(error = ?e, source = %provider.label(), "feed fetch failed; skipping source");
                counter!("monitor_provider_errors_total").increment(1);
                continue;
            }
        };

        for item in items.into_iter().take(cfg.monitor.max_entries_per_feed) {
            summary.evaluated += 1;

            let b = blob(&item.title, &item.summary);
            if !is_relevant(&b, lexicon) {
                summary.filtered += 1;
                counter!("monitor_entries_filtered_total").increment(1);
                continue;
            }

            if let Some(ts) = item.published_at {
                if ts < cutoff {
                    summary.stale += 1;
                    continue;
                }
            }

            let a = assess(&b, item.source, lexicon);
            // Worst score covers every assessed entry, seen or not: the
            // rollup reflects ongoing risk, not just novelty.
            summary.worst_score = summary.worst_score.max(a.score);

            let fp = fingerprint(&item);
            if ledger.has_seen(&fp) {
                summary.already_seen += 1;
                continue;
            }
            ledger.mark_seen(fp, now);

            // Aggregator items without radiological evidence are remembered
            // (so they stop showing up) but never alerted on.
            if item.source == SourceLabel::GoogleNews && !a.evidence {
                summary.suppressed += 1;
                counter!("monitor_suppressed_total").increment(1);
                continue;
            }

            let mut text = render_alert(&item, &a, local_now);
            if !lang.is_empty() {
                text = translator.translate(&text, lang).await;
            }
            summary.notified += 1;
            counter!("monitor_notified_total").increment(1);
            if let Err(e) = notifier.send(&text).await {
                // DeliveryFailure: logged, not retried, dedup mark stays.
                summary.delivery_failures += 1;
                counter!("monitor_delivery_errors_total").increment(1);
                warn!(error = ?e, source = %item.source, "alert delivery failed");
            } else {
                new_items.push(NotifiedItem {
                    source: item.source,
                    title: item.title.clone(),
                });
            }
        }
    }

    if let Some(key) = rollup::due(local_now, &cfg.monitor.summary_hours, &ledger.last_summary_window)
    {
        // Persisting the key with the ledger guarantees at most one rollup
        // per hour slot even if delivery fails.
        ledger.last_summary_window = key;
        let mut text = render_rollup(
            summary.worst_score,
            &new_items,
            cfg.monitor.max_age_hours,
            local_now,
        );
        if !lang.is_empty() {
            text = translator.translate(&text, lang).await;
        }
        if let Err(e) = notifier.send(&text).await {
            summary.delivery_failures += 1;
            counter!("monitor_delivery_errors_total").increment(1);
            warn!(error = ?e, "rollup delivery failed");
        }
        summary.rollup_sent = true;
    }

    // PersistenceFailure on write is the one error worth a non-zero exit.
    ledger.save(&cfg.monitor.state_path)?;

    gauge!("monitor_last_run_ts").set(now.timestamp() as f64);
    gauge!("monitor_worst_score").set(f64::from(summary.worst_score));
    info!(
        evaluated = summary.evaluated,
        filtered = summary.filtered,
        stale = summary.stale,
        already_seen = summary.already_seen,
        suppressed = summary.suppressed,
        notified = summary.notified,
        delivery_failures = summary.delivery_failures,
        worst_score = summary.worst_score,
        rollup_sent = summary.rollup_sent,
        "run complete"
    );

    Ok(summary)
}
