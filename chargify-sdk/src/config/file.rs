//! TOML file configuration structures.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::executor::DEFAULT_USER_AGENT;

/// Client configuration as read from a TOML file.
///
/// ```toml
/// api_key = "..."
/// subdomain = "acme"
/// domain = "https://{subdomain}.chargify.com/"
/// timeout_secs = 30
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API key; may be left out of the file and supplied through
    /// `CHARGIFY_API_KEY`.
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub subdomain: String,
    /// Base URL template; `{subdomain}` is replaced with [`Self::subdomain`].
    #[serde(default = "default_domain")]
    pub domain: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Whole-request timeout applied to the HTTP client.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_domain() -> String {
    "https://{subdomain}.chargify.com/".to_owned()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_owned()
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>, subdomain: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            subdomain: subdomain.into(),
            domain: default_domain(),
            user_agent: default_user_agent(),
            timeout_secs: None,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("subdomain", &self.subdomain)
            .field("domain", &self.domain)
            .field("user_agent", &self.user_agent)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
