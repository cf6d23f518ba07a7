// src/translate.rs
//! Best-effort translation collaborator. Any failure returns the source
//! text unchanged; translation never blocks or fails a run.

use async_trait::async_trait;

#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target_language` (BCP-47-ish code, e.g. "ar").
    /// Implementations must fall back to the input on any error.
    async fn translate(&self, text: &str, target_language: &str) -> String;
}

/// Default collaborator: no translation service wired, pass-through.
pub struct NoopTranslator;

#[async_trait]
impl Translator for NoopTranslator {
    async fn translate(&self, text: &str, _target_language: &str) -> String {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn noop_passes_text_through() {
        let t = NoopTranslator;
        assert_eq!(t.translate("تنبيه إشعاعي", "en").await, "تنبيه إشعاعي");
    }
}
