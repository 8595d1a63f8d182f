//! Status data model produced by a check cycle.

use crate::lines::LineInfo;
use chrono::{DateTime, Local};

/// Operational condition of a line at check time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Normal,
    Closed,
    Slow,
    Stopped,
    Unknown,
    NotFound,
    FetchError,
}

impl StatusCode {
    /// Short Portuguese label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            StatusCode::Normal => "Operação Normal",
            StatusCode::Closed => "Operação Encerrada",
            StatusCode::Slow => "Velocidade Reduzida",
            StatusCode::Stopped => "Paralisada",
            StatusCode::Unknown => "Status desconhecido",
            StatusCode::NotFound => "Linha não encontrada na página",
            StatusCode::FetchError => "Erro na consulta",
        }
    }

    /// Report emoji for this status.
    pub fn emoji(self) -> &'static str {
        match self {
            StatusCode::Normal => "✅",
            StatusCode::Closed => "🌙",
            StatusCode::Slow => "⚠️",
            StatusCode::Stopped => "🛑",
            StatusCode::Unknown | StatusCode::NotFound => "❓",
            StatusCode::FetchError => "❌",
        }
    }
}

/// Classified status for one line in one check cycle.
#[derive(Debug, Clone)]
pub struct LineStatus {
    pub line: &'static LineInfo,
    pub status: StatusCode,
    /// Extra context: the matched keyword phrase, or the fetch error
    /// description. Empty when the status label says it all.
    pub detail: String,
    /// False only when the page fetch itself failed; extraction misses
    /// still count as successful checks with degraded information.
    pub success: bool,
}

impl LineStatus {
    /// Status classified from a fetched page.
    pub fn found(line: &'static LineInfo, status: StatusCode, detail: String) -> Self {
        Self {
            line,
            status,
            detail,
            success: true,
        }
    }

    /// Status for a cycle whose page fetch failed.
    pub fn fetch_error(line: &'static LineInfo, detail: &str) -> Self {
        Self {
            line,
            status: StatusCode::FetchError,
            detail: detail.to_string(),
            success: false,
        }
    }

    /// Unformatted one-line summary, stable across cycles with equal status.
    pub fn summary(&self) -> String {
        if self.detail.is_empty() || self.detail == self.status.label() {
            self.status.label().to_string()
        } else {
            format!("{} ({})", self.status.label(), self.detail)
        }
    }
}

/// One check cycle over a set of lines, in request order.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub statuses: Vec<LineStatus>,
    pub checked_at: DateTime<Local>,
}

impl CheckResult {
    /// Result for a cycle whose page fetch failed outright: every requested
    /// line is reported as a fetch error carrying the same description.
    pub fn fetch_failure(lines: &[&'static LineInfo], detail: &str) -> Self {
        Self {
            statuses: lines
                .iter()
                .map(|line| LineStatus::fetch_error(line, detail))
                .collect(),
            checked_at: Local::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lines;

    #[test]
    fn test_summary_without_detail() {
        let status = LineStatus::found(lines::find("1").unwrap(), StatusCode::Normal, String::new());
        assert_eq!(status.summary(), "Operação Normal");
    }

    #[test]
    fn test_summary_skips_redundant_detail() {
        let status = LineStatus::found(
            lines::find("1").unwrap(),
            StatusCode::Normal,
            "Operação Normal".to_string(),
        );
        assert_eq!(status.summary(), "Operação Normal");
    }

    #[test]
    fn test_summary_with_detail() {
        let status = LineStatus::fetch_error(lines::find("1").unwrap(), "timed out");
        assert_eq!(status.summary(), "Erro na consulta (timed out)");
        assert!(!status.success);
    }

    #[test]
    fn test_fetch_failure_covers_every_requested_line() {
        let requested = vec![lines::find("2").unwrap(), lines::find("15").unwrap()];
        let result = CheckResult::fetch_failure(&requested, "connection refused");

        assert_eq!(result.statuses.len(), 2);
        for status in &result.statuses {
            assert_eq!(status.status, StatusCode::FetchError);
            assert_eq!(status.detail, "connection refused");
            assert!(!status.success);
        }
        assert_eq!(result.statuses[0].line.id, "2");
        assert_eq!(result.statuses[1].line.id, "15");
    }
}
