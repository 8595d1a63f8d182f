//! Report formatting and Telegram delivery.

use crate::error::DeliveryError;
use crate::lines::Operator;
use crate::status::{CheckResult, LineStatus};
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId, LinkPreviewOptions, ParseMode};

/// Telegram caps sendMessage text at 4096 characters.
pub const MAX_MESSAGE_LEN: usize = 4096;

const TRUNCATION_MARKER: &str = "… (mensagem truncada)";

/// Escape special characters for Telegram MarkdownV2 format.
pub fn escape_markdown(text: &str) -> String {
    let special_chars = [
        '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
    ];
    let mut result = String::with_capacity(text.len() * 2);

    for c in text.chars() {
        if special_chars.contains(&c) {
            result.push('\\');
        }
        result.push(c);
    }

    result
}

/// Render a check cycle as a MarkdownV2 report, lines grouped by operator.
///
/// Pure: same result in, same text out. The output respects the Telegram
/// length cap.
pub fn format_report(result: &CheckResult) -> String {
    let timestamp = result.checked_at.format("%d/%m/%Y %H:%M").to_string();
    let mut rows = vec![format!(
        "🚇 *Status das Linhas \\- {}*",
        escape_markdown(&timestamp)
    )];

    // Operators in first-seen request order.
    let mut operators: Vec<Operator> = Vec::new();
    for status in &result.statuses {
        if !operators.contains(&status.line.operator) {
            operators.push(status.line.operator);
        }
    }

    for operator in operators {
        rows.push(String::new());
        rows.push(format!("*{}*", escape_markdown(operator.name())));
        for status in result
            .statuses
            .iter()
            .filter(|s| s.line.operator == operator)
        {
            rows.push(format_line(status));
        }
    }

    truncate_message(&rows.join("\n"))
}

fn format_line(status: &LineStatus) -> String {
    format!(
        "{}: {} {}",
        escape_markdown(status.line.display_name),
        status.status.emoji(),
        escape_markdown(&status.summary())
    )
}

/// Enforce the Telegram message length cap, keeping a visible marker.
pub fn truncate_message(text: &str) -> String {
    if text.chars().count() <= MAX_MESSAGE_LEN {
        return text.to_string();
    }

    let keep = MAX_MESSAGE_LEN - TRUNCATION_MARKER.chars().count() - 1;
    let truncated: String = text.chars().take(keep).collect();
    format!("{truncated}\n{TRUNCATION_MARKER}")
}

/// Delivery target for formatted reports.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Push one message to the destination. No retry on failure.
    async fn deliver(&self, text: &str) -> Result<(), DeliveryError>;
}

/// Sends reports to a fixed Telegram chat.
pub struct TelegramNotifier {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramNotifier {
    pub fn new(bot_token: &str, chat_id: ChatId) -> Self {
        Self {
            bot: Bot::new(bot_token),
            chat_id,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn deliver(&self, text: &str) -> Result<(), DeliveryError> {
        self.bot
            .send_message(self.chat_id, text)
            .parse_mode(ParseMode::MarkdownV2)
            .link_preview_options(LinkPreviewOptions {
                is_disabled: true,
                url: None,
                prefer_small_media: false,
                prefer_large_media: false,
                show_above_text: false,
            })
            .await?;
        Ok(())
    }
}
