//! Public configuration for the weave client.
//!
//! This module provides a stable public API for configuring the client.
//! The internal connection settings are resolved from it.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::HttpResult;
use crate::models::ConnectionConfig;

/// Environment variable holding the database cluster URL.
pub const ENV_CLUSTER_URL: &str = "WEAVIATE_URL";
/// Environment variable holding the database API key.
pub const ENV_API_KEY: &str = "WEAVIATE_API_KEY";
/// Environment variable overriding the GFL service host.
pub const ENV_GFL_HOST: &str = "WEAVE_GFL_HOST";
/// Environment variable overriding the agents service host.
pub const ENV_AGENTS_HOST: &str = "WEAVE_AGENTS_HOST";

pub const DEFAULT_CLUSTER_URL: &str = "http://localhost:8080";
pub const DEFAULT_GFL_HOST: &str = "https://gfl.labs.weaviate.io";
pub const DEFAULT_AGENTS_HOST: &str = "https://api.agents.weaviate.io";

/// Configuration for the weave client.
///
/// Use the builder pattern methods to customize the client configuration.
///
/// # Example
///
/// ```
/// use weave_http::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new()
///     .with_cluster_url("https://my-cluster.weaviate.cloud")
///     .with_api_key("secret")
///     .with_timeout(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the database cluster
    pub(crate) cluster_url: String,
    /// API key sent as a bearer token
    pub(crate) api_key: Option<String>,
    /// Base URL of the GFL service
    pub(crate) gfl_host: String,
    /// Base URL of the agents service
    pub(crate) agents_host: String,
    /// Headers forwarded with every database call (e.g. vectorizer keys)
    pub(crate) additional_headers: BTreeMap<String, String>,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout
    pub(crate) timeout: Duration,
    /// Maximum number of retry attempts for transient errors
    pub(crate) max_retries: u8,
    /// Base delay for exponential backoff
    pub(crate) retry_base_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            cluster_url: DEFAULT_CLUSTER_URL.to_string(),
            api_key: None,
            gfl_host: DEFAULT_GFL_HOST.to_string(),
            agents_host: DEFAULT_AGENTS_HOST.to_string(),
            additional_headers: BTreeMap::new(),
            user_agent: concat!("weave-http/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_base_delay: Duration::from_millis(500),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration from the process environment.
    ///
    /// Unset variables keep their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Configuration from an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();
        if let Some(url) = non_empty(ENV_CLUSTER_URL) {
            config.cluster_url = url;
        }
        config.api_key = non_empty(ENV_API_KEY);
        if let Some(host) = non_empty(ENV_GFL_HOST) {
            config.gfl_host = host;
        }
        if let Some(host) = non_empty(ENV_AGENTS_HOST) {
            config.agents_host = host;
        }
        config
    }

    /// Set the database cluster URL.
    ///
    /// Defaults to `http://localhost:8080`.
    #[must_use]
    pub fn with_cluster_url(mut self, url: impl Into<String>) -> Self {
        self.cluster_url = url.into();
        self
    }

    /// Set the API key used to authenticate against the cluster.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set an optional API key.
    #[must_use]
    pub fn with_optional_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key;
        self
    }

    /// Set the GFL service host.
    #[must_use]
    pub fn with_gfl_host(mut self, host: impl Into<String>) -> Self {
        self.gfl_host = host.into();
        self
    }

    /// Set the agents service host.
    #[must_use]
    pub fn with_agents_host(mut self, host: impl Into<String>) -> Self {
        self.agents_host = host.into();
        self
    }

    /// Forward an extra header with every database call.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_headers.insert(name.into(), value.into());
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds. Agent calls use their own, longer timeouts.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of retry attempts for transient errors.
    ///
    /// Defaults to 3 retries. Only idempotent requests are retried.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the base delay for exponential backoff retries.
    ///
    /// Defaults to 500ms.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    /// Parse and validate into the internal connection settings.
    pub(crate) fn resolve(&self) -> HttpResult<ConnectionConfig> {
        Ok(ConnectionConfig {
            cluster_url: url::Url::parse(&self.cluster_url)?,
            api_key: self.api_key.clone(),
            gfl_host: url::Url::parse(&self.gfl_host)?,
            agents_host: url::Url::parse(&self.agents_host)?,
            additional_headers: self.additional_headers.clone(),
            user_agent: self.user_agent.clone(),
            timeout: self.timeout,
            max_retries: self.max_retries,
            #[allow(clippy::cast_possible_truncation)] // Duration milliseconds won't exceed u64 in practice
            retry_base_delay_ms: self.retry_base_delay.as_millis() as u64,
        })
    }
}
