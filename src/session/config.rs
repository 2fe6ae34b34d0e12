/*!
 * Tomography Configuration
 * Defaults, builder-style overrides, and environment loading
 */

use crate::core::errors::{TomographyError, TomographyResult};
use crate::core::limits::{
    DEFAULT_DESCRIPTION_WIDTH, DEFAULT_LIVENESS_POLL, DEFAULT_PROMPT_PREFIX,
    DEFAULT_UNIVERSE_CAPACITY, ENV_CAPACITY, ENV_DESCRIPTION_WIDTH, ENV_ENABLED, ENV_POLL_MS,
    ENV_PROMPT,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TomographyConfig {
    /// Snapshot on every stop
    pub enabled: bool,
    /// Maximum live universes before FIFO eviction
    pub capacity: usize,
    /// Characters of source location kept in descriptions
    pub description_width: usize,
    /// Prompt label before the universe index
    pub prompt_prefix: String,
    /// Liveness re-check period while waiting on a jump target
    pub liveness_poll: Duration,
}

impl Default for TomographyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: DEFAULT_UNIVERSE_CAPACITY,
            description_width: DEFAULT_DESCRIPTION_WIDTH,
            prompt_prefix: DEFAULT_PROMPT_PREFIX.to_string(),
            liveness_poll: DEFAULT_LIVENESS_POLL,
        }
    }
}

impl TomographyConfig {
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_description_width(mut self, width: usize) -> Self {
        self.description_width = width;
        self
    }

    #[must_use]
    pub fn with_prompt_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prompt_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_liveness_poll(mut self, poll: Duration) -> Self {
        self.liveness_poll = poll;
        self
    }

    pub fn validate(&self) -> TomographyResult<()> {
        if self.capacity == 0 {
            return Err(TomographyError::InvalidConfig(
                "capacity must be at least 1".to_string(),
            ));
        }
        if self.description_width == 0 {
            return Err(TomographyError::InvalidConfig(
                "description width must be at least 1".to_string(),
            ));
        }
        if self.liveness_poll.is_zero() {
            return Err(TomographyError::InvalidConfig(
                "liveness poll interval must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Load overrides from `TOMOGRAPHY_*` environment variables
    pub fn from_env() -> TomographyResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load overrides from any key/value source
    pub fn from_lookup<F>(lookup: F) -> TomographyResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_ENABLED) {
            config.enabled = parse_flag(ENV_ENABLED, &value)?;
        }
        if let Some(value) = lookup(ENV_CAPACITY) {
            config.capacity = parse_number(ENV_CAPACITY, &value)?;
        }
        if let Some(value) = lookup(ENV_DESCRIPTION_WIDTH) {
            config.description_width = parse_number(ENV_DESCRIPTION_WIDTH, &value)?;
        }
        if let Some(value) = lookup(ENV_PROMPT) {
            config.prompt_prefix = value;
        }
        if let Some(value) = lookup(ENV_POLL_MS) {
            config.liveness_poll = Duration::from_millis(parse_number(ENV_POLL_MS, &value)?);
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_flag(key: &str, value: &str) -> TomographyResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        other => Err(TomographyError::InvalidConfig(format!(
            "{key}: expected a boolean, got '{other}'"
        ))),
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> TomographyResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| TomographyError::InvalidConfig(format!("{key}: expected a number, got '{value}'")))
}
