// src/relevance.rs
//! Relevance gate: blob normalization plus the noise-block/keyword filter
//! that decides whether an entry is a candidate at all.

use crate::lexicon::Lexicon;

/// Single matching surface: lowercased concatenation of title and summary.
/// Empty inputs yield an empty blob; no error conditions.
pub fn blob(title: &str, summary: &str) -> String {
    let mut out = String::with_capacity(title.len() + summary.len() + 1);
    out.push_str(title);
    out.push(' ');
    out.push_str(summary);
    out.trim().to_lowercase()
}

/// Noise-block takes precedence over keyword match: an item mentioning both
/// "nuclear" and "stock market" is rejected. Precision over recall.
pub fn is_relevant(blob: &str, lexicon: &Lexicon) -> bool {
    if Lexicon::contains_any(blob, &lexicon.noise_block) {
        return false;
    }
    Lexicon::contains_any(blob, &lexicon.keywords)
}
