// src/report.rs
//! Message rendering: the per-item alert and the twice-daily rollup, both
//! following the operations-room layout of the original channel.

use chrono::{DateTime, FixedOffset};

use crate::assess::{Assessment, SeverityTier};
use crate::ingest::types::{FeedItem, SourceLabel};
use crate::rollup::banding;

/// Reasons shown in a rendered message are capped to the leading ones.
const MAX_REASONS: usize = 2;
/// Headlines listed in a rollup.
const MAX_ROLLUP_ITEMS: usize = 6;

/// Headline reference kept for the rollup after an alert went out.
#[derive(Debug, Clone)]
pub struct NotifiedItem {
    pub source: SourceLabel,
    pub title: String,
}

fn tier_marker(tier: SeverityTier) -> &'static str {
    match tier {
        SeverityTier::Low => "🟢 low",
        SeverityTier::Medium => "🟠 medium",
        SeverityTier::High => "🔴 high",
    }
}

fn stamp(local_now: DateTime<FixedOffset>) -> String {
    local_now.format("%Y-%m-%d %H:%M %z").to_string()
}

pub fn render_alert(
    item: &FeedItem,
    a: &Assessment,
    local_now: DateTime<FixedOffset>,
) -> String {
    let reasons = a
        .reasons
        .iter()
        .take(MAX_REASONS)
        .cloned()
        .collect::<Vec<_>>()
        .join("; ");

    format!(
        "☢️ Radiological/nuclear alert\n\
         🕒 {ts}\n\
         ════════════════════\n\
         🌍 Rapid assessment:\n\
         • Event kind: {kind}\n\
         • Operational impact: {impact}\n\
         • Readiness: {readiness}\n\
         • Risk level: {tier} ({score}/100)\n\
         • Why: {reasons}\n\
         ════════════════════\n\
         📌 Source: {source}\n\
         📰 {title}\n\
         🔗 {link}\n",
        ts = stamp(local_now),
        kind = a.kind,
        impact = a.impact.as_str(),
        readiness = a.readiness.as_str(),
        tier = tier_marker(a.tier),
        score = a.score,
        reasons = reasons,
        source = item.source,
        title = item.title,
        link = item.link,
    )
}

pub fn render_rollup(
    worst_score: u8,
    new_items: &[NotifiedItem],
    max_age_hours: u32,
    local_now: DateTime<FixedOffset>,
) -> String {
    let (tier, impact, readiness) = banding(worst_score);

    let mut out = format!(
        "☢️ Radiological monitoring report — operations room\n\
         🕒 {ts}\n\n\
         ════════════════════\n\
         📊 Radiological risk index:\n\
         {score} / 100 — {tier}\n\n\
         ════════════════════\n\
         🌍 Operational assessment:\n\
         • Probable impact: {impact}\n\
         • Readiness: {readiness}\n\n\
         ════════════════════\n",
        ts = stamp(local_now),
        score = worst_score,
        tier = tier_marker(tier),
        impact = impact.as_str(),
        readiness = readiness.as_str(),
    );

    if new_items.is_empty() {
        out.push_str(&format!(
            "📍 Executive summary:\n\
             • No new matching signals in the last {max_age_hours} hours.\n\
             • Monitoring IAEA + NRC + early media signals.\n"
        ));
    } else {
        out.push_str("📌 Top new signals:\n");
        for it in new_items.iter().take(MAX_ROLLUP_ITEMS) {
            out.push_str(&format!("• {}: {}\n", it.source, it.title));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assess::{ImpactLabel, ReadinessLabel};
    use crate::classify::EventKind;
    use chrono::TimeZone;

    fn local_now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 8, 24, 6, 5, 0)
            .unwrap()
    }

    fn assessment() -> Assessment {
        Assessment {
            kind: EventKind::ConfirmedIncident,
            tier: SeverityTier::High,
            impact: ImpactLabel::High,
            readiness: ReadinessLabel::ImmediateEscalation,
            score: 80,
            near: true,
            evidence: true,
            official: true,
            reasons: vec![
                "high-severity phrasing (\"state of emergency\")".into(),
                "explicit radiological vocabulary (\"reactor\")".into(),
                "mentions operationally close location (\"jordan\")".into(),
                "official source".into(),
            ],
        }
    }

    #[test]
    fn alert_caps_reasons_to_two() {
        let item = FeedItem {
            title: "IAEA declares state of emergency".into(),
            summary: String::new(),
            link: "https://example.org/x".into(),
            guid: None,
            published_at: None,
            source: SourceLabel::Iaea,
        };
        let msg = render_alert(&item, &assessment(), local_now());
        assert!(msg.contains("confirmed-incident"));
        assert!(msg.contains("(80/100)"));
        assert!(msg.contains("state of emergency\"); explicit radiological"));
        assert!(!msg.contains("official source"), "third+ reasons are cut");
        assert!(msg.contains("📌 Source: IAEA"));
    }

    #[test]
    fn rollup_quiet_variant_mentions_window() {
        let msg = render_rollup(15, &[], 72, local_now());
        assert!(msg.contains("15 / 100 — 🟢 low"));
        assert!(msg.contains("last 72 hours"));
    }

    #[test]
    fn rollup_lists_at_most_six_headlines() {
        let items: Vec<NotifiedItem> = (0..8)
            .map(|i| NotifiedItem {
                source: SourceLabel::GoogleNews,
                title: format!("headline {i}"),
            })
            .collect();
        let msg = render_rollup(65, &items, 72, local_now());
        assert!(msg.contains("headline 5"));
        assert!(!msg.contains("headline 6"));
        assert!(msg.contains("🔴 high"));
    }
}
