//! Design engine configuration (`vitrine.toml`)

use crate::business::BusinessType;
use crate::error::ConfigError;
use crate::locale::Locale;
use crate::logger::DEFAULT_LOG_CAPACITY;
use crate::recovery::{RecoveryStrategy, DEFAULT_STRATEGIES};
use crate::storage::DEFAULT_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Config file name looked up in a project directory
pub const CONFIG_FILE_NAME: &str = "vitrine.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DesignConfig {
    #[serde(default)]
    pub design: DesignSection,
    #[serde(default)]
    pub log: LogSection,
    #[serde(default)]
    pub notifications: NotificationSection,
    #[serde(default)]
    pub recovery: RecoverySection,
}

/// URL, storage and default design settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DesignSection {
    /// Design used when nothing else resolves
    #[serde(default)]
    pub default: BusinessType,
    /// Query parameter carrying the design key
    #[serde(default = "default_query_param")]
    pub query_param: String,
    /// Storage key of the persisted preference
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Where "reset to default" navigates
    #[serde(default = "default_home_path")]
    pub home_path: String,
}

fn default_query_param() -> String {
    "design".to_string()
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_home_path() -> String {
    "/".to_string()
}

impl Default for DesignSection {
    fn default() -> Self {
        Self {
            default: BusinessType::DEFAULT,
            query_param: default_query_param(),
            storage_key: default_storage_key(),
            home_path: default_home_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LogSection {
    /// Ring buffer capacity
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_capacity() -> usize {
    DEFAULT_LOG_CAPACITY
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NotificationSection {
    /// Auto-hide delay in milliseconds
    #[serde(default = "default_auto_hide_ms")]
    pub auto_hide_ms: u64,
    #[serde(default)]
    pub locale: Locale,
}

fn default_auto_hide_ms() -> u64 {
    5000
}

impl Default for NotificationSection {
    fn default() -> Self {
        Self {
            auto_hide_ms: default_auto_hide_ms(),
            locale: Locale::default(),
        }
    }
}

impl NotificationSection {
    pub fn auto_hide(&self) -> Duration {
        Duration::from_millis(self.auto_hide_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RecoverySection {
    /// Strategy order tried when the URL does not carry a valid design
    #[serde(default = "default_strategies")]
    pub strategies: Vec<RecoveryStrategy>,
}

fn default_strategies() -> Vec<RecoveryStrategy> {
    DEFAULT_STRATEGIES.to_vec()
}

impl Default for RecoverySection {
    fn default() -> Self {
        Self {
            strategies: default_strategies(),
        }
    }
}

impl DesignConfig {
    /// Load from a file, or from `vitrine.toml` inside a directory
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config_path = if path.is_dir() {
            path.join(CONFIG_FILE_NAME)
        } else {
            path.to_path_buf()
        };

        let content = fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
            path: config_path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: config_path.display().to_string(),
                source,
            },
            other => other,
        })
    }

    /// Parse and validate TOML content
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: DesignConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: "<inline>".to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.design.query_param.is_empty() {
            return Err(ConfigError::Invalid("design.query_param is empty".into()));
        }
        if self.design.storage_key.is_empty() {
            return Err(ConfigError::Invalid("design.storage_key is empty".into()));
        }
        if !self.design.home_path.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "design.home_path must start with '/': {:?}",
                self.design.home_path
            )));
        }
        if self.log.capacity == 0 {
            return Err(ConfigError::Invalid("log.capacity must be at least 1".into()));
        }
        Ok(())
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
