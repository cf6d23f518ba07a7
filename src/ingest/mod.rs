// src/ingest/mod.rs
pub mod rss;
pub mod types;

use metrics::{describe_counter, describe_gauge};
use once_cell::sync::OnceCell;

/// One-time metrics registration so the monitor_* series carry descriptions
/// when a recorder is installed.
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("monitor_entries_evaluated_total", "Feed entries examined.");
        describe_counter!(
            "monitor_entries_filtered_total",
            "Entries rejected by the relevance gate."
        );
        describe_counter!("monitor_notified_total", "Alerts handed to delivery.");
        describe_counter!(
            "monitor_suppressed_total",
            "Qualifying entries marked seen but not notified."
        );
        describe_counter!("monitor_provider_errors_total", "Feed fetch/parse errors.");
        describe_counter!("monitor_delivery_errors_total", "Notification send failures.");
        describe_gauge!("monitor_last_run_ts", "Unix ts of the last completed run.");
        describe_gauge!("monitor_worst_score", "Worst risk score seen in the last run.");
    });
}

/// Clean raw feed text: decode HTML entities, strip tags, normalize quotes,
/// collapse whitespace, cap length. Casefolding happens later, in the blob.
pub fn normalize_text(s: &str) -> String {
    let mut out = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, " ").to_string();

    out = out
        .replace(['\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    static RE_WS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").trim().to_string();

    if out.chars().count() > 1500 {
        out = out.chars().take(1500).collect();
    }

    out
}
