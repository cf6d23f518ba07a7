// src/rollup.rs
//! Rollup cadence: at most one aggregate report per calendar hour slot, and
//! exactly one per configured trigger hour per day when runs are more
//! frequent than hourly. Hours are evaluated in the operational timezone
//! (fixed UTC offset; the target region has no DST).

use chrono::{DateTime, FixedOffset, Timelike, Utc};

use crate::assess::{ImpactLabel, ReadinessLabel, SeverityTier};

/// Hour-slot identifier in the operational timezone, `%Y%m%d%H`.
pub fn window_key(local_now: DateTime<FixedOffset>) -> String {
    local_now.format("%Y%m%d%H").to_string()
}

pub fn to_local(now: DateTime<Utc>, utc_offset_hours: i32) -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(utc_offset_hours * 3600)
        .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero offset"));
    now.with_timezone(&offset)
}

/// Returns the new window key when a rollup is due: current hour is a
/// trigger hour and this hour slot has not been emitted yet. The caller
/// persists the key before (or along with) sending.
pub fn due(
    local_now: DateTime<FixedOffset>,
    trigger_hours: &[u32],
    last_window_key: &str,
) -> Option<String> {
    let key = window_key(local_now);
    if trigger_hours.contains(&local_now.hour()) && last_window_key != key {
        Some(key)
    } else {
        None
    }
}

/// Map a run's worst score onto the rollup banding used in the report.
pub fn banding(worst_score: u8) -> (SeverityTier, ImpactLabel, ReadinessLabel) {
    if worst_score < 30 {
        (SeverityTier::Low, ImpactLabel::NoneExpected, ReadinessLabel::MonitorOnly)
    } else if worst_score < 60 {
        (SeverityTier::Medium, ImpactLabel::Low, ReadinessLabel::FollowUp)
    } else if worst_score < 75 {
        (SeverityTier::High, ImpactLabel::Moderate, ReadinessLabel::UrgentFollowUp)
    } else {
        (SeverityTier::High, ImpactLabel::High, ReadinessLabel::ImmediateEscalation)
    }
}
