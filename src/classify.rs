// src/classify.rs
//! Event-kind classifier. Ordered first-match-wins decision list; the order
//! is the disambiguation logic and must not be rearranged: regulatory and
//! evacuation phrasing are the dominant false-positive sources, so they are
//! checked before any evidence-based promotion.

use serde::{Deserialize, Serialize};

use crate::ingest::types::SourceLabel;
use crate::lexicon::Lexicon;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    RegulatoryNotice,
    ConfirmedIncident,
    ProbableIncident,
    WeakSignal,
    SecurityNoise,
    Unclassified,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RegulatoryNotice => "regulatory-notice",
            Self::ConfirmedIncident => "confirmed-incident",
            Self::ProbableIncident => "probable-incident",
            Self::WeakSignal => "weak-signal",
            Self::SecurityNoise => "security-noise",
            Self::Unclassified => "unclassified",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signals the classifier and scorer share, computed once per blob.
#[derive(Debug, Clone, Copy)]
pub struct Signals {
    pub evidence: bool,
    pub regulatory: bool,
    pub evacuation: bool,
    pub official: bool,
    pub severe: bool,
    pub moderate: bool,
    pub near: bool,
}

impl Signals {
    pub fn derive(blob: &str, source: SourceLabel, lexicon: &Lexicon) -> Self {
        Self {
            evidence: Lexicon::contains_any(blob, &lexicon.evidence),
            regulatory: Lexicon::contains_any(blob, &lexicon.regulatory),
            evacuation: Lexicon::contains_any(blob, &lexicon.evacuation),
            official: source.official(),
            severe: Lexicon::contains_any(blob, &lexicon.severity_high),
            moderate: Lexicon::contains_any(blob, &lexicon.severity_medium),
            near: Lexicon::contains_any(blob, &lexicon.near_hints),
        }
    }
}

pub fn classify(blob: &str, source: SourceLabel, lexicon: &Lexicon) -> EventKind {
    classify_signals(&Signals::derive(blob, source, lexicon))
}

/// Radiological vocabulary ("evidence") outranks severity words alone, which
/// overlap heavily with generic disaster reporting.
pub fn classify_signals(s: &Signals) -> EventKind {
    if s.regulatory && !s.evidence {
        EventKind::RegulatoryNotice
    } else if s.evacuation && !s.evidence {
        // Evacuation without radiological cause: likely political/military.
        EventKind::SecurityNoise
    } else if s.evidence && s.official && s.severe {
        EventKind::ConfirmedIncident
    } else if s.evidence && (s.official || s.moderate) {
        EventKind::ProbableIncident
    } else if s.evidence {
        EventKind::WeakSignal
    } else {
        EventKind::Unclassified
    }
}
