//! Fetches the status page and classifies every requested line.

use crate::config::Config;
use crate::error::FetchError;
use crate::extract::ExtractRules;
use crate::lines::{self, LineInfo};
use crate::status::{CheckResult, LineStatus};
use chrono::Local;
use std::time::Duration;

/// Runs one fetch-and-classify cycle against the status page.
pub struct TransitChecker {
    client: reqwest::Client,
    status_url: String,
    rules: ExtractRules,
}

impl TransitChecker {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            status_url: config.status_url.clone(),
            rules: ExtractRules::with_window(config.lookahead_window),
        })
    }

    /// Run one check cycle over the requested line ids.
    ///
    /// Never fails: a fetch fault turns into a `FetchError` status for every
    /// requested line. The page is fetched once and every line is classified
    /// against the same snapshot so one report is internally consistent.
    pub async fn check_lines(&self, ids: &[String]) -> CheckResult {
        let requested = resolve(ids);

        let html = match self.fetch_page().await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!("status page fetch failed: {e}");
                return CheckResult::fetch_failure(&requested, &e.to_string());
            }
        };

        snapshot_statuses(&html, &requested, &self.rules)
    }

    /// Check every registered line.
    pub async fn check_all(&self) -> CheckResult {
        self.check_lines(&lines::all_ids()).await
    }

    async fn fetch_page(&self) -> Result<String, FetchError> {
        let response = self.client.get(&self.status_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

/// Map requested ids onto registry entries, preserving request order.
/// Unknown ids are skipped; the interactive surface validates them first.
fn resolve(ids: &[String]) -> Vec<&'static LineInfo> {
    let mut requested = Vec::with_capacity(ids.len());
    for id in ids {
        match lines::find(id) {
            Some(line) => requested.push(line),
            None => tracing::warn!("skipping unknown line id {id:?}"),
        }
    }
    requested
}

/// Classify each requested line against one HTML snapshot.
fn snapshot_statuses(
    html: &str,
    requested: &[&'static LineInfo],
    rules: &ExtractRules,
) -> CheckResult {
    let statuses: Vec<LineStatus> = requested
        .iter()
        .map(|line| rules.extract(html, line))
        .collect();

    CheckResult {
        statuses,
        checked_at: Local::now(),
    }
}
