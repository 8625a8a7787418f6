use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct LifeOsConfig {
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
    pub streak: StreakConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
    pub busy_timeout_ms: u64,
    /// Upper bound on a single storage call made through the async service.
    pub call_timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StreakConfig {
    /// How many days back `compute_streak` walks before giving up.
    pub lookback_days: u32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_lifeos_dir()
            .join("lifeos.db")
            .to_string_lossy()
            .into_owned();
        Self {
            db_path,
            busy_timeout_ms: 5000,
            call_timeout_ms: 10_000,
        }
    }
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            lookback_days: crate::streak::DEFAULT_LOOKBACK_DAYS,
        }
    }
}

impl StorageConfig {
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }
}

/// Returns `~/.lifeos/`, or `./.lifeos/` when no home directory is known.
pub fn default_lifeos_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".lifeos")
}

/// Returns the default config file path: `~/.lifeos/config.toml`
pub fn default_config_path() -> PathBuf {
    default_lifeos_dir().join("config.toml")
}

impl LifeOsConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            LifeOsConfig::default()
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply environment variable overrides (LIFEOS_DB, LIFEOS_LOG_LEVEL,
    /// LIFEOS_CALL_TIMEOUT_MS, LIFEOS_STREAK_LOOKBACK).
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("LIFEOS_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("LIFEOS_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("LIFEOS_CALL_TIMEOUT_MS") {
            self.storage.call_timeout_ms = val
                .parse()
                .with_context(|| format!("LIFEOS_CALL_TIMEOUT_MS is not a number: {val}"))?;
        }
        if let Ok(val) = std::env::var("LIFEOS_STREAK_LOOKBACK") {
            self.streak.lookback_days = val
                .parse()
                .with_context(|| format!("LIFEOS_STREAK_LOOKBACK is not a number: {val}"))?;
        }
        Ok(())
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
