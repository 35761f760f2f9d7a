//! Configuration management for pluto using the prefer crate.
//!
//! A config file is discovered by prefer (or given explicitly), parsed with
//! serde by extension, then overridden by `PLUTO_*` environment variables
//! and finally by command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::client::ClientConfig;
use crate::models::{DEFAULT_NUM_TOPICS, DEFAULT_SUMMARY_SENTENCES};
use crate::services::DEFAULT_PROGRESS_INTERVAL;

/// Environment variable overriding `api_url`.
pub const ENV_API_URL: &str = "PLUTO_API_URL";
/// Environment variable overriding `development`.
pub const ENV_DEV: &str = "PLUTO_DEV";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config {path}: {message}")]
    Parse {
        path: PathBuf,
        format: &'static str,
        message: String,
    },

    #[error("Invalid value for {name}: {value:?} (expected 1, 0, true or false)")]
    InvalidEnv { name: &'static str, value: String },
}

/// Default analysis parameters used when the CLI does not give them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_topics: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_sentences: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_bow: Option<bool>,
}

impl AnalysisDefaults {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the analysis service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    /// Show demo data when the service is unreachable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub development: Option<bool>,
    /// Cadence of the simulated progress, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_interval_ms: Option<u64>,
    /// Connect timeout in seconds. Unset means none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_secs: Option<u64>,
    /// User agent string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "AnalysisDefaults::is_default")]
    pub defaults: AnalysisDefaults,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer for discovery.
    /// Missing or unreadable files fall back to defaults.
    pub async fn load() -> Self {
        match prefer::load("pluto").await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::warn!("Ignoring config file: {}", e);
                            Self::default()
                        }
                    }
                } else {
                    Self::default()
                }
            }
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    /// JSON, TOML and YAML are picked by file extension; JSON otherwise.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let parse_error = |format: &'static str, message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            format,
            message,
        };

        let mut config: Config = match ext {
            "toml" => toml::from_str(&contents).map_err(|e| parse_error("TOML", e.to_string()))?,
            "yaml" | "yml" => {
                serde_yaml::from_str(&contents).map_err(|e| parse_error("YAML", e.to_string()))?
            }
            _ => serde_json::from_str(&contents).map_err(|e| parse_error("JSON", e.to_string()))?,
        };

        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Apply `PLUTO_*` overrides read through `lookup`.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|s| !s.trim().is_empty()) {
            self.api_url = Some(url);
        }
        if let Some(value) = lookup(ENV_DEV) {
            self.development = Some(parse_flag(ENV_DEV, &value)?);
        }
        Ok(self)
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            name,
            value: value.to_string(),
        }),
    }
}

/// Resolved settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_url: String,
    pub development: bool,
    pub progress_interval: Duration,
    pub connect_timeout: Option<Duration>,
    pub user_agent: Option<String>,
    pub num_topics: u32,
    pub summary_sentences: u32,
    pub use_bow: bool,
    /// Config file the settings came from, if any.
    pub config_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Settings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_url: config.api_url.clone().unwrap_or_default(),
            development: config.development.unwrap_or(cfg!(debug_assertions)),
            progress_interval: config
                .progress_interval_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_PROGRESS_INTERVAL),
            connect_timeout: config.connect_timeout_secs.map(Duration::from_secs),
            user_agent: config.user_agent.clone(),
            num_topics: config.defaults.num_topics.unwrap_or(DEFAULT_NUM_TOPICS),
            summary_sentences: config
                .defaults
                .summary_sentences
                .unwrap_or(DEFAULT_SUMMARY_SENTENCES),
            use_bow: config.defaults.use_bow.unwrap_or(false),
            config_path: config.source_path.clone(),
        }
    }

    /// Client configuration derived from these settings.
    pub fn client_config(&self) -> ClientConfig {
        let mut client = ClientConfig::default()
            .with_base_url(&self.api_url)
            .with_development(self.development);
        client.connect_timeout = self.connect_timeout;
        if let Some(ref agent) = self.user_agent {
            client.user_agent = agent.clone();
        }
        client
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
    /// Service URL from the command line; wins over file and environment.
    pub api_url: Option<String>,
}

/// Load settings: config file, then environment, then command-line options.
///
/// An explicit config path that cannot be read is an error; a discovered
/// one that cannot be read is skipped.
pub async fn load_settings_with_options(
    options: LoadOptions,
) -> Result<(Settings, Config), ConfigError> {
    let config = match options.config_path {
        Some(ref path) => {
            let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
            Config::load_from_path(Path::new(&expanded)).await?
        }
        None => Config::load().await,
    };

    if let Some(ref path) = config.source_path {
        tracing::debug!("Loaded config from {}", path.display());
    }

    let config = config.with_env_overrides(|name| std::env::var(name).ok())?;
    let mut settings = Settings::from_config(&config);
    if let Some(url) = options.api_url {
        settings.api_url = url;
    }

    Ok((settings, config))
}
