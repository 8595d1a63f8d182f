//! Long-running Telegram bot for /start, /linha, /todas commands.
//!
//! Stateless between commands: each one runs its own fetch cycle and replies
//! to the chat it came from, so concurrent commands never share mutable
//! state.

use crate::checker::TransitChecker;
use crate::config::Config;
use crate::lines;
use crate::notify::{escape_markdown, format_report};
use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::utils::command::BotCommands;

/// Available bot commands.
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Comandos disponíveis:")]
pub enum Command {
    #[command(description = "Mostra a ajuda e as linhas monitoradas")]
    Start,
    #[command(description = "Consulta o status de uma linha")]
    Linha(String),
    #[command(description = "Consulta o status de todas as linhas")]
    Todas,
    #[command(description = "Consulta o status de todas as linhas")]
    Todos,
}

/// Static help text listing the known lines.
fn help_text() -> String {
    let mut rows = vec![
        "🚇 *Metrô Alerta*".to_string(),
        String::new(),
        "Envie /linha seguido do número para consultar uma linha,".to_string(),
        "por exemplo /linha 4\\. Envie /todas para o quadro completo\\.".to_string(),
        String::new(),
        "Linhas monitoradas:".to_string(),
    ];

    for line in lines::all() {
        rows.push(format!(
            "{} \\- {} \\({}\\)",
            line.id,
            escape_markdown(line.display_name),
            escape_markdown(line.operator.name())
        ));
    }

    rows.join("\n")
}

/// Reply for a line id that is not in the registry.
fn invalid_line_reply(id: &str) -> String {
    let known: Vec<&str> = lines::all().iter().map(|line| line.id).collect();
    format!(
        "❓ Identificador inválido: `{}`\nLinhas conhecidas: {}",
        escape_markdown(id),
        escape_markdown(&known.join(", "))
    )
}

/// Handle the /start command.
async fn start_handler(bot: Bot, msg: Message) -> ResponseResult<()> {
    bot.send_message(msg.chat.id, help_text())
        .parse_mode(ParseMode::MarkdownV2)
        .await?;

    Ok(())
}

/// Handle the /linha command.
async fn linha_handler(
    bot: Bot,
    msg: Message,
    checker: &TransitChecker,
    arg: &str,
) -> ResponseResult<()> {
    let id = arg.trim();

    if id.is_empty() {
        bot.send_message(
            msg.chat.id,
            "Informe o número da linha, por exemplo /linha 4\\.",
        )
        .parse_mode(ParseMode::MarkdownV2)
        .await?;
        return Ok(());
    }

    if lines::find(id).is_none() {
        bot.send_message(msg.chat.id, invalid_line_reply(id))
            .parse_mode(ParseMode::MarkdownV2)
            .await?;
        return Ok(());
    }

    let result = checker.check_lines(&[id.to_string()]).await;
    bot.send_message(msg.chat.id, format_report(&result))
        .parse_mode(ParseMode::MarkdownV2)
        .await?;

    Ok(())
}

/// Handle the /todas and /todos commands.
async fn todas_handler(bot: Bot, msg: Message, checker: &TransitChecker) -> ResponseResult<()> {
    let result = checker.check_all().await;
    bot.send_message(msg.chat.id, format_report(&result))
        .parse_mode(ParseMode::MarkdownV2)
        .await?;

    Ok(())
}

/// Main entry point for the bot.
pub async fn run(config: Config) -> Result<()> {
    let checker = Arc::new(TransitChecker::new(&config)?);
    let bot = Bot::new(&config.bot_token);

    tracing::info!("Starting Metrô Alerta bot...");

    let handler = Update::filter_message()
        .filter_command::<Command>()
        .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
            let checker = checker.clone();
            async move {
                match cmd {
                    Command::Start => start_handler(bot, msg).await,
                    Command::Linha(arg) => linha_handler(bot, msg, &checker, &arg).await,
                    Command::Todas | Command::Todos => todas_handler(bot, msg, &checker).await,
                }
            }
        });

    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
