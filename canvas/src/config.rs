//! Engine configuration handed over by the host page as JSON.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use serde::Deserialize;

use crate::consts::DEFAULT_CANVAS_PX;
use crate::save::SavePolicy;

pub const DEFAULT_API_BASE: &str = "/api";
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY_MS: u32 = 2000;
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid engine config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("canvas size must be non-zero (got {width}x{height})")]
    ZeroCanvas { width: u32, height: u32 },
    #[error("unknown log level '{0}' (expected error, warn, info, debug or trace)")]
    UnknownLogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Initial canvas width in px.
    pub width: u32,
    /// Initial canvas height in px.
    pub height: u32,
    /// Base URL of the poster API, without a trailing `/`.
    pub api_base: String,
    /// Rate-limit retries per save.
    pub max_retries: u32,
    /// Fixed wait between rate-limit retries.
    pub retry_delay_ms: u32,
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_PX,
            height: DEFAULT_CANVAS_PX,
            api_base: DEFAULT_API_BASE.to_owned(),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
        }
    }
}

impl EngineConfig {
    /// Build typed config from the host's JSON.
    ///
    /// Every field is optional:
    /// - `width`, `height`: default 800
    /// - `api_base`: default `/api`
    /// - `max_retries`: default 3
    /// - `retry_delay_ms`: default 2000
    /// - `log_level`: `error|warn|info|debug|trace`, default `info`
    ///
    /// Blank input yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for malformed JSON, a zero-sized canvas, or an
    /// unknown log level.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if raw.trim().is_empty() { Self::default() } else { serde_json::from_str(raw)? };
        if config.width == 0 || config.height == 0 {
            return Err(ConfigError::ZeroCanvas { width: config.width, height: config.height });
        }
        config.api_base = config.api_base.trim_end_matches('/').to_owned();
        config.level()?;
        Ok(config)
    }

    /// The configured log level.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownLogLevel`] if the name is not recognised.
    pub fn level(&self) -> Result<log::Level, ConfigError> {
        self.log_level
            .trim()
            .parse::<log::Level>()
            .map_err(|_| ConfigError::UnknownLogLevel(self.log_level.clone()))
    }

    /// Retry policy for the save flow.
    #[must_use]
    pub fn save_policy(&self) -> SavePolicy {
        SavePolicy {
            max_retries: self.max_retries,
            retry_delay: Duration::from_millis(u64::from(self.retry_delay_ms)),
        }
    }
}
