//! Configuration loading.
//!
//! Reads a JSON file at `~/.config/metro-alerta/config.json`, falling back to
//! environment variables (`TELEGRAM_BOT_TOKEN`, `TELEGRAM_CHAT_ID`,
//! `METRO_STATUS_URL`). A `.env` file next to the config is honored.
//!
//! The resulting `Config` is built once at startup and passed into each
//! component; nothing reads the environment after that.

use crate::error::ConfigError;
use crate::extract::DEFAULT_LOOKAHEAD_WINDOW;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use teloxide::types::ChatId;

/// Default configuration file path.
pub fn default_config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// Default last-seen status cache path.
pub fn default_cache_path() -> PathBuf {
    config_dir().join("last_status.json")
}

/// Get the metro-alerta config directory path.
fn config_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("metro-alerta"))
        .unwrap_or_else(|| PathBuf::from(".metro-alerta"))
}

/// Chat ID that can be either string or integer in JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ChatIdValue {
    String(String),
    Integer(i64),
}

impl ChatIdValue {
    fn to_chat_id(&self) -> Result<ChatId, ConfigError> {
        match self {
            ChatIdValue::String(s) => s.parse::<i64>().map(ChatId).map_err(|_| {
                ConfigError::MissingField("chat_id must be a valid integer".to_string())
            }),
            ChatIdValue::Integer(i) => Ok(ChatId(*i)),
        }
    }
}

/// JSON configuration file structure.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    bot_token: String,
    #[serde(default)]
    chat_id: Option<ChatIdValue>,
    #[serde(default = "default_status_url")]
    status_url: String,
    #[serde(default = "default_user_agent")]
    user_agent: String,
    #[serde(default = "default_fetch_timeout_secs")]
    fetch_timeout_secs: u64,
    #[serde(default = "default_lookahead_window")]
    lookahead_window: usize,
    #[serde(default)]
    lines: Vec<String>,
    #[serde(default)]
    cache_path: Option<PathBuf>,
}

fn default_status_url() -> String {
    "https://www.metro.sp.gov.br/".to_string()
}

fn default_user_agent() -> String {
    format!("metro-alerta/{}", env!("CARGO_PKG_VERSION"))
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

fn default_lookahead_window() -> usize {
    DEFAULT_LOOKAHEAD_WINDOW
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot token
    pub bot_token: String,
    /// Destination chat for one-shot reports; the interactive bot replies to
    /// whichever chat the command came from
    pub chat_id: Option<ChatId>,
    /// Transit status page URL
    pub status_url: String,
    /// User-agent header sent with the page fetch
    pub user_agent: String,
    /// Total fetch timeout in seconds
    pub fetch_timeout_secs: u64,
    /// Bytes scanned after a line name match
    pub lookahead_window: usize,
    /// Line ids checked by default; empty means every registered line
    pub monitored_lines: Vec<String>,
    /// Last-seen status cache location
    pub cache_path: PathBuf,
}

impl Config {
    /// Load configuration from a JSON file, falling back to environment
    /// variables.
    ///
    /// Search order:
    /// 1. Provided config_path (if any; missing file is an error)
    /// 2. `~/.config/metro-alerta/config.json`
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::from_json(&path);
        }

        let default_path = default_config_path();
        if default_path.exists() {
            return Self::from_json(&default_path);
        }

        Self::from_env()
    }

    /// Load configuration from a JSON file.
    pub fn from_json(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let file: ConfigFile = serde_json::from_str(&content)?;

        if file.bot_token.is_empty() {
            return Err(ConfigError::MissingField("bot_token".to_string()));
        }

        let chat_id = file.chat_id.map(|v| v.to_chat_id()).transpose()?;

        Ok(Self {
            bot_token: file.bot_token,
            chat_id,
            status_url: file.status_url,
            user_agent: file.user_agent,
            fetch_timeout_secs: file.fetch_timeout_secs,
            lookahead_window: file.lookahead_window,
            monitored_lines: file.lines,
            cache_path: file.cache_path.unwrap_or_else(default_cache_path),
        })
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env next to the config file (silently ignore if not found)
        let _ = dotenvy::from_path(config_dir().join(".env"));

        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| ConfigError::MissingEnvVar("TELEGRAM_BOT_TOKEN".to_string()))?;

        let chat_id = match env::var("TELEGRAM_CHAT_ID") {
            Ok(value) => Some(value.parse::<i64>().map(ChatId).map_err(|_| {
                ConfigError::MissingField("TELEGRAM_CHAT_ID must be a valid integer".to_string())
            })?),
            Err(_) => None,
        };

        let status_url = env::var("METRO_STATUS_URL").unwrap_or_else(|_| default_status_url());

        Ok(Self {
            bot_token: token,
            chat_id,
            status_url,
            user_agent: default_user_agent(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            lookahead_window: default_lookahead_window(),
            monitored_lines: Vec::new(),
            cache_path: default_cache_path(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_with_string_chat_id() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        fs::write(
            &config_path,
            r#"{"bot_token":"test_token","chat_id":"123456"}"#,
        )
        .unwrap();

        let config = Config::from_json(&config_path).unwrap();
        assert_eq!(config.bot_token, "test_token");
        assert_eq!(config.chat_id, Some(ChatId(123456)));
        assert_eq!(config.fetch_timeout_secs, 30); // Default
        assert_eq!(config.lookahead_window, DEFAULT_LOOKAHEAD_WINDOW);
        assert!(config.monitored_lines.is_empty());
    }

    #[test]
    fn test_config_with_int_chat_id() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        fs::write(&config_path, r#"{"bot_token":"test_token","chat_id":123456}"#).unwrap();

        let config = Config::from_json(&config_path).unwrap();
        assert_eq!(config.chat_id, Some(ChatId(123456)));
    }

    #[test]
    fn test_config_without_chat_id() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        fs::write(&config_path, r#"{"bot_token":"test_token"}"#).unwrap();

        let config = Config::from_json(&config_path).unwrap();
        assert_eq!(config.chat_id, None);
    }

    #[test]
    fn test_config_missing_token() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        fs::write(&config_path, r#"{"chat_id":"123456"}"#).unwrap();

        let result = Config::from_json(&config_path);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_empty_token_rejected() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        fs::write(&config_path, r#"{"bot_token":""}"#).unwrap();

        let result = Config::from_json(&config_path);
        assert!(matches!(result, Err(ConfigError::MissingField(_))));
    }

    #[test]
    fn test_config_with_overrides() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        fs::write(
            &config_path,
            r#"{
                "bot_token": "token123",
                "chat_id": 111222,
                "status_url": "https://example.org/status",
                "user_agent": "custom-agent/2.0",
                "fetch_timeout_secs": 10,
                "lookahead_window": 800,
                "lines": ["2", "4", "15"],
                "cache_path": "/tmp/cache.json"
            }"#,
        )
        .unwrap();

        let config = Config::from_json(&config_path).unwrap();
        assert_eq!(config.status_url, "https://example.org/status");
        assert_eq!(config.user_agent, "custom-agent/2.0");
        assert_eq!(config.fetch_timeout_secs, 10);
        assert_eq!(config.lookahead_window, 800);
        assert_eq!(config.monitored_lines, vec!["2", "4", "15"]);
        assert_eq!(config.cache_path, PathBuf::from("/tmp/cache.json"));
    }

    #[test]
    fn test_config_invalid_chat_id_string() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        fs::write(
            &config_path,
            r#"{"bot_token":"test_token","chat_id":"not-a-number"}"#,
        )
        .unwrap();

        let result = Config::from_json(&config_path);
        assert!(matches!(result, Err(ConfigError::MissingField(_))));
    }

    #[test]
    fn test_config_file_not_found() {
        let result = Config::from_json(Path::new("/nonexistent/path.json"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_with_explicit_missing_path_fails() {
        let result = Config::load(Some(PathBuf::from("/nonexistent/path.json")));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }
}
