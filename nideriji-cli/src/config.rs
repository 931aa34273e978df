use nideriji_core::{DEFAULT_SERVER_URL, DEFAULT_USER_AGENT};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Account credentials
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AccountConfig {
    /// Login email
    pub email: Option<String>,
    /// Login password; prompted for when absent
    #[serde(skip_serializing)]
    pub password: Option<String>,
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// API root, e.g. "https://nideriji.cn/api"
    pub server_url: ConfigValue<String>,
    /// Client identification sent with every request
    pub user_agent: ConfigValue<String>,
    /// Fixed Origin header, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// Connect timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
    pub account: AccountConfig,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    server_url: Option<String>,
    user_agent: Option<String>,
    origin: Option<String>,
    timeout_secs: Option<u64>,
    account: Option<AccountConfig>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Start with defaults
        let mut server_url =
            ConfigValue::new(DEFAULT_SERVER_URL.to_string(), ConfigSource::Default);
        let mut user_agent =
            ConfigValue::new(DEFAULT_USER_AGENT.to_string(), ConfigSource::Default);
        let mut origin = None;
        let mut timeout_secs = None;
        let mut config_file = None;
        let mut account = AccountConfig::default();

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(url) = file_config.server_url {
                server_url = ConfigValue::new(url, ConfigSource::File);
            }
            if let Some(agent) = file_config.user_agent {
                user_agent = ConfigValue::new(agent, ConfigSource::File);
            }
            origin = file_config.origin;
            timeout_secs = file_config.timeout_secs;
            if let Some(account_config) = file_config.account {
                account = account_config;
            }
        }

        // Apply environment variable overrides
        if let Ok(url) = std::env::var("NIDERIJI_SERVER_URL") {
            server_url = ConfigValue::new(url, ConfigSource::Environment);
        }
        if let Ok(agent) = std::env::var("NIDERIJI_USER_AGENT") {
            user_agent = ConfigValue::new(agent, ConfigSource::Environment);
        }
        if let Ok(value) = std::env::var("NIDERIJI_ORIGIN") {
            origin = Some(value);
        }
        if let Ok(email) = std::env::var("NIDERIJI_EMAIL") {
            account.email = Some(email);
        }
        if let Ok(password) = std::env::var("NIDERIJI_PASSWORD") {
            account.password = Some(password);
        }

        Ok(Self {
            server_url,
            user_agent,
            origin,
            timeout_secs,
            config_file,
            account,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/nideriji/
    /// - macOS: ~/Library/Application Support/nideriji/
    /// - Windows: %APPDATA%/nideriji/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nideriji")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
