//! Client configuration.
//!
//! Settings come from an optional TOML file, with the API key and
//! sub-domain overridable through environment variables so the secret does
//! not have to live on disk.

pub mod file;

pub use file::ClientConfig;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chargify_core::{DomainTemplate, RequestTranslator};
use thiserror::Error;

use crate::builder::Chargify;
use crate::credentials::Credentials;
use crate::executor::HttpExecutor;
use crate::transport::ReqwestTransport;

/// Environment variable overriding [`ClientConfig::api_key`].
pub const API_KEY_ENV: &str = "CHARGIFY_API_KEY";

/// Environment variable overriding [`ClientConfig::subdomain`].
pub const SUBDOMAIN_ENV: &str = "CHARGIFY_SUBDOMAIN";

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("no API key configured (set CHARGIFY_API_KEY or `api_key`)")]
    MissingApiKey,

    #[error("no sub-domain configured (set CHARGIFY_SUBDOMAIN or `subdomain`)")]
    MissingSubdomain,

    #[error("failed to build HTTP client: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Configuration loader that handles the complete loading process.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Load from `config_path`, then apply environment overrides.
    pub fn new(config_path: impl AsRef<Path>) -> Self {
        Self {
            config_path: Some(config_path.as_ref().to_path_buf()),
        }
    }

    /// Load from environment variables only.
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Load and validate the configuration.
    pub fn load(&self) -> Result<ClientConfig, ConfigError> {
        self.load_with(|name| std::env::var(name).ok())
    }

    /// Like [`load`](Self::load) with a custom variable lookup.
    pub fn load_with(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<ClientConfig, ConfigError> {
        let mut config = match &self.config_path {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                let config: ClientConfig = toml::from_str(&content)?;
                tracing::debug!("Configuration loaded from {:?}", path);
                config
            }
            None => ClientConfig::new("", ""),
        };

        if let Some(api_key) = env(API_KEY_ENV).filter(|v| !v.is_empty()) {
            config.api_key = api_key;
        }
        if let Some(subdomain) = env(SUBDOMAIN_ENV).filter(|v| !v.is_empty()) {
            config.subdomain = subdomain;
        }

        config.validate()?;
        Ok(config)
    }
}

impl ClientConfig {
    /// Check required fields and parse the domain template.
    pub fn validate(&self) -> Result<DomainTemplate, ConfigError> {
        if self.api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.subdomain.is_empty() && self.domain.contains("{subdomain}") {
            return Err(ConfigError::MissingSubdomain);
        }
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::ValidationError(
                "timeout_secs must be greater than zero".to_owned(),
            ));
        }
        DomainTemplate::parse(self.domain.as_str()).map_err(|e| {
            ConfigError::ValidationError(format!("invalid domain {:?}: {e}", self.domain))
        })
    }

    /// Build a client backed by a `reqwest` transport.
    pub fn into_client(self) -> Result<Chargify, ConfigError> {
        let domain = self.validate()?;

        let mut http = reqwest::Client::builder();
        if let Some(secs) = self.timeout_secs {
            http = http.timeout(Duration::from_secs(secs));
        }
        let transport = ReqwestTransport::new().with_http_client(http.build()?);

        let executor = HttpExecutor::new(Arc::new(transport)).with_user_agent(self.user_agent);
        let credentials = Credentials::new(self.api_key, self.subdomain);

        Ok(Chargify::with_executor(credentials, executor)
            .with_translator(RequestTranslator::default().with_domain(domain)))
    }
}
