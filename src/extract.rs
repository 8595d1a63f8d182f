//! Substring heuristics for pulling a line's status out of the page HTML.
//!
//! This is deliberately not a parser. The status page has no structured API,
//! so the line name is located as a literal substring and a fixed window of
//! text after it is scanned for known keyword phrases. False positives from
//! unrelated text and phrases cut off by the window boundary are accepted
//! limitations.

use crate::lines::LineInfo;
use crate::status::{LineStatus, StatusCode};

/// Default number of bytes scanned after a name match.
pub const DEFAULT_LOOKAHEAD_WINDOW: usize = 600;

/// Keyword phrases in match priority order.
const DEFAULT_KEYWORDS: &[(&str, StatusCode)] = &[
    ("Operação Normal", StatusCode::Normal),
    ("Operação Encerrada", StatusCode::Closed),
    ("Velocidade Reduzida", StatusCode::Slow),
    ("Paralisada", StatusCode::Stopped),
];

/// Tunable parameters for the status heuristic.
///
/// The window size and keyword table are tuned against one specific site's
/// markup, so they are carried as data rather than hard-coded.
#[derive(Debug, Clone)]
pub struct ExtractRules {
    pub lookahead_window: usize,
    pub keywords: Vec<(String, StatusCode)>,
}

impl Default for ExtractRules {
    fn default() -> Self {
        Self {
            lookahead_window: DEFAULT_LOOKAHEAD_WINDOW,
            keywords: DEFAULT_KEYWORDS
                .iter()
                .map(|(phrase, code)| (phrase.to_string(), *code))
                .collect(),
        }
    }
}

impl ExtractRules {
    /// Default rules with a custom lookahead window.
    pub fn with_window(lookahead_window: usize) -> Self {
        Self {
            lookahead_window,
            ..Self::default()
        }
    }

    /// Classify a line's status from the raw page HTML.
    ///
    /// The first name variant found anywhere in the page wins; the window of
    /// text after that match is scanned for keywords in priority order.
    pub fn extract(&self, html: &str, line: &'static LineInfo) -> LineStatus {
        let Some(start) = first_name_match(html, line) else {
            return LineStatus::found(line, StatusCode::NotFound, String::new());
        };

        let window = window_after(html, start, self.lookahead_window);
        for (phrase, code) in &self.keywords {
            if window.contains(phrase.as_str()) {
                return LineStatus::found(line, *code, phrase.clone());
            }
        }

        LineStatus::found(line, StatusCode::Unknown, String::new())
    }
}

/// Byte position right after the first matching name variant.
fn first_name_match(html: &str, line: &LineInfo) -> Option<usize> {
    for variant in line.name_variants() {
        if let Some(pos) = html.find(&variant) {
            return Some(pos + variant.len());
        }
    }
    None
}

/// Slice up to `len` bytes after `start`, backing off to a char boundary.
fn window_after(html: &str, start: usize, len: usize) -> &str {
    let mut end = start.saturating_add(len).min(html.len());
    while !html.is_char_boundary(end) {
        end -= 1;
    }
    &html[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lines;

    fn extract(html: &str, id: &str) -> LineStatus {
        ExtractRules::default().extract(html, lines::find(id).unwrap())
    }

    #[test]
    fn test_normal_status_within_window() {
        let html = "<div class=\"linha\">Linha 2-Verde</div><span>Operação Normal</span>";
        let status = extract(html, "2");
        assert_eq!(status.status, StatusCode::Normal);
        assert!(status.success);
    }

    #[test]
    fn test_each_keyword_maps_to_its_status() {
        let cases = [
            ("Operação Normal", StatusCode::Normal),
            ("Operação Encerrada", StatusCode::Closed),
            ("Velocidade Reduzida", StatusCode::Slow),
            ("Paralisada", StatusCode::Stopped),
        ];
        for (phrase, expected) in cases {
            let html = format!("<li>Linha 4-Amarela <b>{phrase}</b></li>");
            let status = extract(&html, "4");
            assert_eq!(status.status, expected, "phrase {phrase:?}");
            assert_eq!(status.detail, phrase);
        }
    }

    #[test]
    fn test_name_with_unrelated_text_is_unknown() {
        let html = "<p>Linha 2-Verde terá novas estações em 2026.</p>";
        let status = extract(html, "2");
        assert_eq!(status.status, StatusCode::Unknown);
        assert!(status.success);
    }

    #[test]
    fn test_name_absent_is_not_found() {
        let html = "<p>Nenhuma informação disponível.</p>";
        let status = extract(html, "2");
        assert_eq!(status.status, StatusCode::NotFound);
    }

    #[test]
    fn test_keyword_outside_window_is_unknown() {
        let filler = "x".repeat(DEFAULT_LOOKAHEAD_WINDOW + 100);
        let html = format!("Linha 2-Verde {filler} Operação Normal");
        assert_eq!(extract(&html, "2").status, StatusCode::Unknown);

        // A wider window reaches the phrase.
        let rules = ExtractRules::with_window(DEFAULT_LOOKAHEAD_WINDOW + 200);
        let status = rules.extract(&html, lines::find("2").unwrap());
        assert_eq!(status.status, StatusCode::Normal);
    }

    #[test]
    fn test_keyword_priority_order() {
        // Both phrases in the window: the higher-priority one wins even
        // though it appears later in the text.
        let html = "Linha 2-Verde Paralisada ... Operação Normal";
        assert_eq!(extract(html, "2").status, StatusCode::Normal);
    }

    #[test]
    fn test_spaced_name_variant_matches() {
        let html = "<td>Linha 2 - Verde</td><td>Velocidade Reduzida</td>";
        assert_eq!(extract(html, "2").status, StatusCode::Slow);
    }

    #[test]
    fn test_alias_variant_matches() {
        let html = "<td>Monotrilho</td><td>Paralisada</td>";
        assert_eq!(extract(html, "15").status, StatusCode::Stopped);
    }

    #[test]
    fn test_window_respects_multibyte_boundary() {
        // Window end lands mid-character without panicking.
        let html = format!("Linha 2-Verde {}", "ã".repeat(DEFAULT_LOOKAHEAD_WINDOW));
        assert_eq!(extract(&html, "2").status, StatusCode::Unknown);
    }
}
