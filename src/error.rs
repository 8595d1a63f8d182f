//! Error types for the application.

use std::path::PathBuf;
use thiserror::Error;

/// Errors related to configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// Errors raised while fetching the status page.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Status page returned HTTP {0}")]
    BadStatus(u16),
}

/// Errors raised while delivering a message to Telegram.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),
}

/// Errors related to the last-seen status cache.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to read cache: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON in cache: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Errors from the one-shot check cycle.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Unknown line identifier: {0}")]
    UnknownLine(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}
