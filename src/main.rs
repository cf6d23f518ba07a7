//! Radiological feed monitor — batch entrypoint.
//! One invocation performs one full pass (fetch → classify/score → dedup →
//! alert → rollup) and exits; scheduling is external (cron or similar).

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use radiation_alert_monitor::config::MonitorConfig;
use radiation_alert_monitor::lexicon::Lexicon;
use radiation_alert_monitor::notify::{telegram::TelegramNotifier, LogNotifier, Notifier};
use radiation_alert_monitor::run::{providers_from_config, run_once};
use radiation_alert_monitor::translate::NoopTranslator;

#[derive(Debug, Parser)]
#[command(name = "radiation-alert-monitor", about = "Rule-based radiological feed monitor")]
struct Args {
    /// Monitor config path (defaults to $MONITOR_CONFIG_PATH, then
    /// config/monitor.toml, then the embedded copy).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Lexicon config path (same fallback chain as --config).
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// Ledger state path, overriding the config value.
    #[arg(long)]
    state: Option<PathBuf>,

    /// Log would-be alerts instead of sending them to Telegram.
    #[arg(long)]
    dry_run: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(p) => MonitorConfig::from_path(p)?,
        None => MonitorConfig::load_default()?,
    };
    if let Some(state) = args.state {
        cfg.monitor.state_path = state;
    }

    let lexicon = match &args.lexicon {
        Some(p) => Lexicon::from_path(p)?,
        None => Lexicon::load_default()?,
    };

    let notifier: Box<dyn Notifier> = if args.dry_run {
        Box::new(LogNotifier)
    } else {
        Box::new(TelegramNotifier::from_env()?)
    };

    let providers = providers_from_config(&cfg);
    let summary = run_once(
        &cfg,
        &lexicon,
        &providers,
        notifier.as_ref(),
        &NoopTranslator,
        chrono::Utc::now(),
    )
    .await?;

    tracing::info!(
        notified = summary.notified,
        worst_score = summary.worst_score,
        "monitor run finished"
    );
    Ok(())
}
