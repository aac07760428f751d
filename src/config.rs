use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use crate::constants::{endpoint, server};
use crate::error::ConfigError;
use crate::stoploss::StoplossQueryParams;

#[derive(Clone, Debug, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout; unset leaves the transport default
    pub timeout_secs: Option<u64>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub defaults: StoplossQueryParams,
    #[serde(default)]
    pub server: ServerConfig,
}

fn default_base_url() -> String {
    endpoint::DEFAULT_BASE_URL.to_string()
}

fn default_bind_addr() -> String {
    server::DEFAULT_BIND_ADDR.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl AppConfig {
    /// Load from `$STOPLOSS_CONFIG` (or `config.yaml`), falling back to
    /// defaults when the file does not exist, then apply env overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var(server::CONFIG_PATH_ENV)
            .unwrap_or_else(|_| server::DEFAULT_CONFIG_PATH.to_string());

        let config = if Path::new(&path).exists() {
            info!("Reading configuration from {}", path);
            Self::load_from(&path)?
        } else {
            warn!("⚠️ {} not found - using built-in defaults", path);
            Self::default()
        };

        let config = config.with_overrides(
            env::var(server::BASE_URL_ENV).ok(),
            env::var(server::BIND_ADDR_ENV).ok(),
        );
        config.validate()?;
        Ok(config)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        // Strip BOM if present
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Environment values win over file values when set and non-empty.
    pub fn with_overrides(mut self, base_url: Option<String>, bind_addr: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url;
        }
        if let Some(addr) = bind_addr.filter(|v| !v.trim().is_empty()) {
            self.server.bind_addr = addr;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.api.base_url).map_err(|e| {
            ConfigError::Invalid(format!("api.base_url '{}': {}", self.api.base_url, e))
        })?;

        if self.server.bind_addr.trim().is_empty() {
            return Err(ConfigError::Invalid("server.bind_addr is empty".to_string()));
        }
        if self.api.timeout_secs == Some(0) {
            return Err(ConfigError::Invalid("api.timeout_secs must be positive".to_string()));
        }
        Ok(())
    }
}
