use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CURRENT_CONFIG_VERSION: u32 = 1;

/// Environment binding that overrides the configured API root.
pub const ROOT_PATH_ENV: &str = "ZABBIX_HTTPAPI_ROOT";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginSettings {
    #[serde(default = "default_config_version")]
    pub config_version: u32,
    /// Base path prefix for every request issued by the plugin.
    #[serde(default = "default_root_path")]
    pub root_path: String,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            config_version: default_config_version(),
            root_path: default_root_path(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("settings validation failed: {0}")]
    Validation(ValidationError),
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("unsupported config_version {found}, expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("root_path must not be empty")]
    EmptyRootPath,
    #[error("root_path must start with '/', got {0:?}")]
    RelativeRootPath(String),
}

impl PluginSettings {
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load_from_str(&contents)
    }

    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        let settings: PluginSettings = toml::from_str(contents)?;
        settings.validate().map_err(ConfigError::Validation)?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.config_version != CURRENT_CONFIG_VERSION {
            return Err(ValidationError::UnsupportedVersion {
                found: self.config_version,
                expected: CURRENT_CONFIG_VERSION,
            });
        }
        if self.root_path.is_empty() {
            return Err(ValidationError::EmptyRootPath);
        }
        if !self.root_path.starts_with('/') {
            return Err(ValidationError::RelativeRootPath(self.root_path.clone()));
        }
        Ok(())
    }

    /// Effective API root: the environment binding wins over the configured
    /// value.
    pub fn resolved_root_path(&self) -> String {
        self.root_path_with(|name| std::env::var(name).ok())
    }

    /// Same resolution with an injected environment lookup.
    pub fn root_path_with(&self, lookup: impl Fn(&str) -> Option<String>) -> String {
        lookup(ROOT_PATH_ENV).unwrap_or_else(|| self.root_path.clone())
    }
}

fn default_config_version() -> u32 {
    CURRENT_CONFIG_VERSION
}

fn default_root_path() -> String {
    "/api_jsonrpc.php".to_string()
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}
