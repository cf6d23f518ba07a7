// src/notify/mod.rs
pub mod telegram;

use anyhow::Result;

/// Outbound message delivery. Failures are logged by the orchestrator and
/// never retried; the dedup mark stays (at-most-once semantics).
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<()>;
}

/// Buffering notifier for tests and `--dry-run`.
#[derive(Default)]
pub struct MockNotifier {
    pub sent: std::sync::Mutex<Vec<String>>,
    pub fail: bool,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            sent: std::sync::Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.sent.lock().expect("mock notifier mutex poisoned").clone()
    }
}

#[async_trait::async_trait]
impl Notifier for MockNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        if self.fail {
            anyhow::bail!("mock delivery failure");
        }
        self.sent
            .lock()
            .expect("mock notifier mutex poisoned")
            .push(text.to_string());
        Ok(())
    }
}

/// Dry-run sink: prints would-be messages to the log only.
pub struct LogNotifier;

#[async_trait::async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        tracing::info!(target: "notify", "dry-run message:\n{text}");
        Ok(())
    }
}
