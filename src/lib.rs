// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod assess;
pub mod classify;
pub mod config;
pub mod ledger;
pub mod lexicon;
pub mod relevance;
pub mod report;
pub mod rollup;
pub mod run;
pub mod translate;

// Feed retrieval and outbound delivery collaborators.
pub mod ingest;
pub mod notify;

// ---- Re-exports for stable public API ----
pub use crate::assess::{assess, Assessment, ImpactLabel, ReadinessLabel, SeverityTier};
pub use crate::classify::{classify, EventKind};
pub use crate::ingest::types::{FeedItem, FeedProvider, SourceLabel};
pub use crate::ledger::{fingerprint, Ledger};
pub use crate::lexicon::Lexicon;
pub use crate::notify::{MockNotifier, Notifier};
pub use crate::run::{run_once, RunSummary};
