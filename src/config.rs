//! # Bot Configuration Module
//!
//! Runtime settings read from the environment (a `.env` file is loaded by the
//! binary before this runs). Only the bot token is required.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::ConfigError;

// Constants for bot configuration
pub const TOKEN_VAR: &str = "BOT_TOKEN";
pub const LEGACY_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
pub const IMAGES_DIR_VAR: &str = "IMAGES_DIR";
pub const REQUEST_TIMEOUT_VAR: &str = "REQUEST_TIMEOUT_SECS";
pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";

pub const DEFAULT_IMAGES_DIR: &str = "images";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 600;

/// Telegram limit for photo captions, in characters
pub const MAX_CAPTION_CHARS: usize = 1024;

/// Telegram limit for media group size
pub const MAX_MEDIA_GROUP_ITEMS: usize = 10;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Configuration structure for the bot process
#[derive(Clone)]
pub struct BotConfig {
    /// Telegram bot token
    pub token: String,
    /// Root directory of the image tree
    pub images_dir: PathBuf,
    /// Upper bound for each Telegram API call
    pub request_timeout: Duration,
    /// Log output format
    pub log_format: LogFormat,
}

impl BotConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = non_empty(TOKEN_VAR)
            .or_else(|| non_empty(LEGACY_TOKEN_VAR))
            .ok_or(ConfigError::MissingToken)?;

        let images_dir = non_empty(IMAGES_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(default_images_dir);

        let request_timeout = match non_empty(REQUEST_TIMEOUT_VAR) {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if (1..=MAX_REQUEST_TIMEOUT_SECS).contains(&secs) => {
                    Duration::from_secs(secs)
                }
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: REQUEST_TIMEOUT_VAR.to_string(),
                        value,
                    })
                }
            },
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        let log_format = match non_empty(LOG_FORMAT_VAR) {
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "text" => LogFormat::Text,
                "json" => LogFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: LOG_FORMAT_VAR.to_string(),
                        value,
                    })
                }
            },
            None => LogFormat::default(),
        };

        Ok(Self {
            token: token.trim().to_string(),
            images_dir,
            request_timeout,
            log_format,
        })
    }
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .field("images_dir", &self.images_dir)
            .field("request_timeout", &self.request_timeout)
            .field("log_format", &self.log_format)
            .finish()
    }
}

/// `images/` next to the executable, or `./images` when that is absent
pub fn default_images_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_IMAGES_DIR)))
        .filter(|dir| dir.is_dir())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGES_DIR))
}
