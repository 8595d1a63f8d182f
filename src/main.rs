//! São Paulo transit status monitor - CLI entry point.
//!
//! Provides subcommands for one-shot checks, the interactive Telegram bot,
//! and configuration inspection.

mod bot;
mod cache;
mod check_handler;
mod checker;
mod cli;
mod config;
mod error;
mod extract;
mod lines;
mod notify;
mod status;

use anyhow::{Context, Result};
use check_handler::CheckOptions;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let Cli {
        config: config_path,
        command,
    } = Cli::parse();

    match command {
        Commands::Check {
            lines,
            changes_only,
            dry_run,
        } => {
            let config = Config::load(config_path).context("Failed to load configuration")?;
            let options = CheckOptions {
                lines,
                changes_only,
                dry_run,
            };
            check_handler::run(&config, &options)
                .await
                .context("Failed to run check cycle")?;
        }
        Commands::Bot => {
            let config = Config::load(config_path).context("Failed to load configuration")?;
            bot::run(config).await.context("Failed to run Telegram bot")?;
        }
        Commands::Status => {
            print_status(config_path);
        }
    }

    Ok(())
}

/// Print configuration status.
fn print_status(config_path: Option<PathBuf>) {
    println!("📊 Metrô Alerta Status\n");

    match Config::load(config_path) {
        Ok(config) => {
            println!("✅ Configuration: Found");
            println!("   Status page: {}", config.status_url);
            println!("   Fetch timeout: {}s", config.fetch_timeout_secs);
            println!("   Lookahead window: {} bytes", config.lookahead_window);

            let monitored = if config.monitored_lines.is_empty() {
                "all".to_string()
            } else {
                config.monitored_lines.join(", ")
            };
            println!("   Monitored lines: {}", monitored);
            println!();
            println!("📱 Telegram:");
            match config.chat_id {
                Some(chat_id) => println!("   Destination chat: {}", chat_id),
                None => println!("   Destination chat: Not configured (bot replies only)"),
            }
        }
        Err(e) => {
            println!("❌ Configuration: Not found or invalid");
            println!("   Error: {}", e);
            println!();
            println!("Create config at ~/.config/metro-alerta/config.json:");
            println!(r#"  {{"bot_token": "...", "chat_id": "..."}}"#);
        }
    }
}
