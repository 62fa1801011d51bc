//! Configuration loading for the Tally TUI.
//!
//! All fields are required unless explicitly marked optional. No defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tally_core::{CacheConfig, FetchConfig, LatencyConfig, RetryConfig, TallyError, User};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TuiConfig {
    pub tick_rate_ms: u64,
    pub log_path: PathBuf,
    /// Rows from the end of a list at which the next batch is requested.
    pub load_more_threshold: usize,
    pub user: UserConfig,
    pub fetch: FetchSection,
    pub latency: LatencySection,
    pub failures: FailureSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserConfig {
    pub id: String,
    pub display_name: String,
    pub premium: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FetchSection {
    /// Omit to fetch whole lists in one request.
    pub page_size: Option<usize>,
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub backoff_multiplier: f64,
    pub cache_validity_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LatencySection {
    pub friends_ms: u64,
    pub cards_ms: u64,
    pub transfers_ms: u64,
}

/// Deterministic simulated failures: each source fails every N-th call.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FailureSection {
    pub friends_every: Option<u64>,
    pub cards_every: Option<u64>,
    pub transfers_every: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration file path (use --config or TALLY_TUI_CONFIG)")]
    MissingConfigPath,
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
    #[error(transparent)]
    Fetch(#[from] TallyError),
}

impl TuiConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path_from_args().or_else(config_path_from_env);
        let path = path.ok_or(ConfigError::MissingConfigPath)?;
        let config = Self::from_path(&path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "tick_rate_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.log_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "log_path",
                reason: "must not be empty".to_string(),
            });
        }
        if self.user.id.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "user.id",
                reason: "must not be empty".to_string(),
            });
        }
        if self.user.display_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "user.display_name",
                reason: "must not be empty".to_string(),
            });
        }
        self.fetch_config().validate()?;
        Ok(())
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn session_user(&self) -> User {
        User::new(
            self.user.id.as_str(),
            self.user.display_name.as_str(),
            self.user.premium,
        )
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            retry: RetryConfig {
                max_retries: self.fetch.max_retries,
                initial_backoff: Duration::from_millis(self.fetch.initial_backoff_ms),
                max_backoff: Duration::from_millis(self.fetch.max_backoff_ms),
                backoff_multiplier: self.fetch.backoff_multiplier,
            },
            cache: CacheConfig {
                validity_window: Duration::from_millis(self.fetch.cache_validity_ms),
            },
            latency: LatencyConfig {
                friends: Duration::from_millis(self.latency.friends_ms),
                cards: Duration::from_millis(self.latency.cards_ms),
                transfers: Duration::from_millis(self.latency.transfers_ms),
            },
            page_size: self.fetch.page_size,
        }
    }
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var("TALLY_TUI_CONFIG").ok().map(PathBuf::from)
}

fn config_path_from_args() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}
