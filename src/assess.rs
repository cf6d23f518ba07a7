// src/assess.rs
//! Severity & impact scorer. A pure function of (blob, source, lexicon):
//! same input, byte-identical output. The cascading branches of earlier
//! iterations are collapsed into two short-circuit policies plus one total
//! lookup table over (severity level, geo-proximity).

use serde::{Deserialize, Serialize};

use crate::classify::{classify_signals, EventKind, Signals};
use crate::ingest::types::SourceLabel;
use crate::lexicon::Lexicon;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    Low,
    Medium,
    High,
}

impl SeverityTier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImpactLabel {
    NoneExpected,
    Low,
    Moderate,
    High,
}

impl ImpactLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoneExpected => "none expected",
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadinessLabel {
    MonitorOnly,
    FollowUp,
    UrgentFollowUp,
    ImmediateEscalation,
}

impl ReadinessLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MonitorOnly => "monitor only",
            Self::FollowUp => "follow-up",
            Self::UrgentFollowUp => "urgent follow-up",
            Self::ImmediateEscalation => "immediate escalation",
        }
    }
}

/// Per-item operational assessment. Reasons are ordered human-readable
/// justifications; rendering caps them (see report module).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub kind: EventKind,
    pub tier: SeverityTier,
    pub impact: ImpactLabel,
    pub readiness: ReadinessLabel,
    pub score: u8,
    pub near: bool,
    pub evidence: bool,
    pub official: bool,
    pub reasons: Vec<String>,
}

/// Total lookup over (sev in 0..=2, near). Score is monotone non-decreasing
/// in both inputs.
fn impact_table(sev: u8, near: bool) -> (ImpactLabel, ReadinessLabel, u8, SeverityTier) {
    match (sev, near) {
        (0, false) => (ImpactLabel::NoneExpected, ReadinessLabel::MonitorOnly, 15, SeverityTier::Low),
        (0, true) => (ImpactLabel::Low, ReadinessLabel::FollowUp, 30, SeverityTier::Medium),
        (1, false) => (ImpactLabel::Low, ReadinessLabel::FollowUp, 40, SeverityTier::Medium),
        (1, true) => (ImpactLabel::Moderate, ReadinessLabel::UrgentFollowUp, 60, SeverityTier::High),
        (2, false) => (ImpactLabel::Moderate, ReadinessLabel::UrgentFollowUp, 65, SeverityTier::High),
        _ => (ImpactLabel::High, ReadinessLabel::ImmediateEscalation, 80, SeverityTier::High),
    }
}

pub fn assess(blob: &str, source: SourceLabel, lexicon: &Lexicon) -> Assessment {
    let s = Signals::derive(blob, source, lexicon);
    let kind = classify_signals(&s);

    // Policy A: administrative process never escalates, regardless of
    // severity or proximity matches elsewhere in the text.
    if kind == EventKind::RegulatoryNotice {
        return Assessment {
            kind,
            tier: SeverityTier::Low,
            impact: ImpactLabel::NoneExpected,
            readiness: ReadinessLabel::MonitorOnly,
            score: 10,
            near: s.near,
            evidence: false,
            official: s.official,
            reasons: vec!["regulatory/administrative phrasing without radiological evidence".into()],
        };
    }

    // Policy B: unverified aggregator text without explicit radiological
    // vocabulary is never actionable.
    if source == SourceLabel::GoogleNews && !s.evidence {
        return Assessment {
            kind,
            tier: SeverityTier::Low,
            impact: ImpactLabel::NoneExpected,
            readiness: ReadinessLabel::MonitorOnly,
            score: 15,
            near: s.near,
            evidence: false,
            official: false,
            reasons: vec!["aggregator item without explicit radiological vocabulary".into()],
        };
    }

    let mut reasons: Vec<String> = Vec::new();

    // Severity from phrase lists, high overriding medium.
    let mut sev: u8 = if s.severe {
        if let Some(p) = Lexicon::first_match(blob, &lexicon.severity_high) {
            reasons.push(format!("high-severity phrasing (\"{p}\")"));
        }
        2
    } else if s.moderate {
        if let Some(p) = Lexicon::first_match(blob, &lexicon.severity_medium) {
            reasons.push(format!("moderate-severity phrasing (\"{p}\")"));
        }
        1
    } else {
        0
    };

    // Evacuation adjustment: alone it never raises severity; with evidence
    // it guarantees at least moderate.
    if s.evacuation && !s.evidence {
        reasons.push("evacuation phrasing without radiological evidence (not escalated)".into());
    } else if s.evacuation && s.evidence && sev < 1 {
        sev = 1;
        reasons.push("evacuation alongside radiological evidence".into());
    }

    if s.evidence {
        if let Some(p) = Lexicon::first_match(blob, &lexicon.evidence) {
            reasons.push(format!("explicit radiological vocabulary (\"{p}\")"));
        }
    }
    if s.near {
        if let Some(p) = Lexicon::first_match(blob, &lexicon.near_hints) {
            reasons.push(format!("mentions operationally close location (\"{p}\")"));
        }
    }
    if s.official {
        reasons.push("official source".into());
    }
    if reasons.is_empty() {
        reasons.push("no clear severity/proximity indicators".into());
    }

    let (impact, readiness, score, tier) = impact_table(sev, s.near);

    Assessment {
        kind,
        tier,
        impact,
        readiness,
        score,
        near: s.near,
        evidence: s.evidence,
        official: s.official,
        reasons,
    }
}
