//! One-shot check cycle: fetch, compare against the cache, deliver.
//!
//! This is the path a cron job or CI schedule invokes. Fetch faults degrade
//! to per-line statuses inside the report; only configuration, cache and
//! delivery problems surface as errors.

use crate::cache::StatusCache;
use crate::checker::TransitChecker;
use crate::config::Config;
use crate::error::{CheckError, ConfigError, DeliveryError};
use crate::lines;
use crate::notify::{format_report, Notifier, TelegramNotifier};
use crate::status::CheckResult;

/// Options for one check cycle.
#[derive(Debug, Default)]
pub struct CheckOptions {
    /// Line ids to check; empty falls back to the configured list, then to
    /// every registered line.
    pub lines: Vec<String>,
    /// Suppress the notification when nothing changed since the last run.
    pub changes_only: bool,
    /// Print the report to stdout instead of delivering it.
    pub dry_run: bool,
}

/// Run one check cycle and deliver the report.
pub async fn run(config: &Config, options: &CheckOptions) -> Result<(), CheckError> {
    let ids = requested_lines(config, options)?;

    let checker = TransitChecker::new(config)?;
    tracing::info!(lines = ids.len(), "running check cycle");
    let result = checker.check_lines(&ids).await;

    let cache = StatusCache::new(config.cache_path.clone());
    if options.changes_only && !has_changes(&cache, &result) {
        tracing::info!("no status changes since last run, skipping notification");
        return Ok(());
    }

    if options.dry_run {
        println!("{}", format_report(&result));
        return Ok(());
    }

    let chat_id = config.chat_id.ok_or_else(|| {
        ConfigError::MissingField("chat_id is required for check delivery".to_string())
    })?;
    let notifier = TelegramNotifier::new(&config.bot_token, chat_id);
    deliver_report(&notifier, &result).await?;
    tracing::info!("report delivered");

    // Recorded only after a successful delivery so a failed send is retried
    // by the next scheduled run.
    if options.changes_only {
        cache.record(&result)?;
    }

    Ok(())
}

/// Resolve which lines this cycle covers, validating explicit requests.
fn requested_lines(config: &Config, options: &CheckOptions) -> Result<Vec<String>, CheckError> {
    let ids = if !options.lines.is_empty() {
        options.lines.clone()
    } else if !config.monitored_lines.is_empty() {
        config.monitored_lines.clone()
    } else {
        lines::all_ids()
    };

    for id in &ids {
        if lines::find(id).is_none() {
            return Err(CheckError::UnknownLine(id.clone()));
        }
    }

    Ok(ids)
}

/// True when any line's summary differs from what the cache last saw.
fn has_changes(cache: &StatusCache, result: &CheckResult) -> bool {
    result
        .statuses
        .iter()
        .any(|status| cache.changed(status.line.id, &status.summary()))
}

/// Format the cycle and push it through the notifier.
async fn deliver_report(notifier: &dyn Notifier, result: &CheckResult) -> Result<(), DeliveryError> {
    let message = format_report(result);
    notifier.deliver(&message).await
}
