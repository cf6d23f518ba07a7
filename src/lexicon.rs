// src/lexicon.rs
//! Phrase tables driving the relevance gate, classifier, and scorer.
//!
//! All decision logic is data-driven: eight lists of lowercase phrases,
//! loaded from TOML (with an embedded default), matched by case-insensitive
//! substring against the blob. Bilingual (English + Arabic); Arabic has no
//! case, so lowercasing at load is sufficient normalization.

use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_LEXICON_CONFIG_PATH: &str = "config/lexicon.toml";
pub const ENV_LEXICON_CONFIG_PATH: &str = "LEXICON_CONFIG_PATH";

/// Compiled-in fallback so the binary runs with no config files present.
const EMBEDDED_LEXICON: &str = include_str!("../config/lexicon.toml");

#[derive(Debug, Clone, Deserialize)]
struct LexiconRoot {
    lexicon: Lexicon,
}

/// Static phrase sets. Pure data, no behavior beyond substring matching.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Lexicon {
    /// General radiological/nuclear vocabulary; at least one hit is
    /// required for an item to be a candidate at all.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Financial/entertainment noise; any hit rejects outright.
    #[serde(default)]
    pub noise_block: Vec<String>,
    /// Regulatory/administrative process phrasing.
    #[serde(default)]
    pub regulatory: Vec<String>,
    /// Explicit radiological vocabulary ("evidence" in the assessment).
    #[serde(default)]
    pub evidence: Vec<String>,
    #[serde(default)]
    pub severity_high: Vec<String>,
    #[serde(default)]
    pub severity_medium: Vec<String>,
    /// Evacuation/sheltering phrasing, kept separate from the severity
    /// lists so evacuation without radiological evidence never escalates.
    #[serde(default)]
    pub evacuation: Vec<String>,
    /// Countries/locations operationally close to the consuming org.
    #[serde(default)]
    pub near_hints: Vec<String>,
}

impl Lexicon {
    /// Parse from a TOML string. Phrases are lowercased at load so matching
    /// never has to casefold per-item.
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let root: LexiconRoot = toml::from_str(toml_str).context("parsing lexicon TOML")?;
        let mut lex = root.lexicon;
        for list in [
            &mut lex.keywords,
            &mut lex.noise_block,
            &mut lex.regulatory,
            &mut lex.evidence,
            &mut lex.severity_high,
            &mut lex.severity_medium,
            &mut lex.evacuation,
            &mut lex.near_hints,
        ] {
            for phrase in list.iter_mut() {
                *phrase = phrase.trim().to_lowercase();
            }
            list.retain(|p| !p.is_empty());
        }
        Ok(lex)
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading lexicon config at {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Resolve via $LEXICON_CONFIG_PATH, then config/lexicon.toml, then the
    /// embedded copy.
    pub fn load_default() -> anyhow::Result<Self> {
        if let Ok(p) = std::env::var(ENV_LEXICON_CONFIG_PATH) {
            return Self::from_path(&PathBuf::from(p));
        }
        let default = PathBuf::from(DEFAULT_LEXICON_CONFIG_PATH);
        if default.exists() {
            return Self::from_path(&default);
        }
        Self::from_toml_str(EMBEDDED_LEXICON)
    }

    /// Substring match of any phrase in `list` against an already-lowercased
    /// blob.
    pub fn contains_any(blob: &str, list: &[String]) -> bool {
        list.iter().any(|p| blob.contains(p.as_str()))
    }

    /// First matching phrase, for explainability.
    pub fn first_match<'a>(blob: &str, list: &'a [String]) -> Option<&'a str> {
        list.iter().find(|p| blob.contains(p.as_str())).map(|p| p.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_lexicon_parses_and_is_lowercased() {
        let lex = Lexicon::from_toml_str(EMBEDDED_LEXICON).expect("embedded lexicon");
        assert!(!lex.keywords.is_empty());
        assert!(!lex.severity_high.is_empty());
        for p in lex.keywords.iter().chain(&lex.noise_block) {
            assert_eq!(p, &p.to_lowercase(), "phrase not lowercased: {p}");
        }
    }

    #[test]
    fn phrases_are_trimmed_and_empties_dropped() {
        let lex = Lexicon::from_toml_str(
            r#"
[lexicon]
keywords = ["  Radiation ", "", "NUCLEAR"]
"#,
        )
        .unwrap();
        assert_eq!(lex.keywords, vec!["radiation".to_string(), "nuclear".into()]);
    }

    #[test]
    fn contains_any_is_substring_based() {
        let list = vec!["evacuat".to_string()];
        assert!(Lexicon::contains_any("residents evacuated overnight", &list));
        assert!(!Lexicon::contains_any("residents relocated overnight", &list));
    }
}
