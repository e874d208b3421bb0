//! Application configuration.
//!
//! Stored as TOML. The news API key may also come from the `NEWS_API_KEY`
//! environment variable, which wins over the file. Nothing here changes after
//! startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::{TickerList, DEFAULT_TICKERS};

/// Environment variable holding the news provider key.
pub const NEWS_API_KEY_ENV: &str = "NEWS_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// News search settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NewsConfig {
    /// Secret; prefer the environment variable over committing it to disk.
    pub api_key: Option<String>,
    pub endpoint: String,
    pub language: String,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: "https://newsapi.org/v2/everything".into(),
            language: "en".into(),
        }
    }
}

/// Market data settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MarketConfig {
    pub endpoint: String,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://query2.finance.yahoo.com/v8/finance/chart".into(),
        }
    }
}

/// HTTP client settings shared by both live providers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Ticker allow-list, in tie-break order.
    pub tickers: Vec<String>,
    pub news: NewsConfig,
    pub market: MarketConfig,
    pub http: HttpConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tickers: DEFAULT_TICKERS.iter().map(|s| s.to_string()).collect(),
            news: NewsConfig::default(),
            market: MarketConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse a config from a TOML string. Missing sections take defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit path must exist. Without one, the default location is used
    /// if present, otherwise built-in defaults. Environment overrides are
    /// applied last.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.apply_env();
        Ok(config)
    }

    /// `<config_dir>/stocksent/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("stocksent").join("config.toml"))
    }

    /// Apply `NEWS_API_KEY` when it is set and non-empty.
    pub fn apply_env(&mut self) {
        self.apply_api_key(std::env::var(NEWS_API_KEY_ENV).ok());
    }

    fn apply_api_key(&mut self, key: Option<String>) {
        if let Some(key) = key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
            self.news.api_key = Some(key);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tickers.is_empty() {
            return Err(ConfigError::Invalid("ticker allow-list is empty".into()));
        }
        let mut seen: Vec<String> = Vec::with_capacity(self.tickers.len());
        for t in &self.tickers {
            let norm = t.trim().to_uppercase();
            if norm.is_empty() {
                return Err(ConfigError::Invalid("blank ticker in allow-list".into()));
            }
            if seen.contains(&norm) {
                return Err(ConfigError::Invalid(format!("duplicate ticker '{norm}'")));
            }
            seen.push(norm);
        }
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Invalid("http.timeout_secs must be > 0".into()));
        }
        Ok(())
    }

    pub fn has_api_key(&self) -> bool {
        self.news
            .api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    pub fn ticker_list(&self) -> TickerList {
        TickerList::new(&self.tickers)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the config to `path`, creating parent directories.
    pub fn write_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, self.to_toml()?).map_err(io_err)
    }
}
