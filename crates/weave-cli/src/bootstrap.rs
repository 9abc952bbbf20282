//! CLI bootstrap - the composition root.
//!
//! This module is the only place where the HTTP client is configured for
//! the CLI. Command handlers receive facades built from the context.

use std::time::Duration;

use weave_core::{Gfl, OperationStep, QueryAgent, Tenants, TransformationAgent};
use weave_http::{ClientConfig, WeaveClient};

use crate::error::CliError;
use crate::parser::Cli;

/// Connection settings taken from flags and the environment.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub gfl_host: Option<String>,
    pub agents_host: Option<String>,
    pub headers: Vec<(String, String)>,
    pub timeout: Option<Duration>,
}

impl CliConfig {
    /// Settings from parsed arguments; clap already applied the environment.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            url: cli.url.clone(),
            api_key: cli.api_key.clone(),
            gfl_host: cli.gfl_host.clone(),
            agents_host: cli.agents_host.clone(),
            headers: cli.headers.clone(),
            timeout: cli.timeout_secs.map(Duration::from_secs),
        }
    }

    /// Client configuration with unset values left at their defaults.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new().with_optional_api_key(self.api_key.clone());
        if let Some(url) = &self.url {
            config = config.with_cluster_url(url);
        }
        if let Some(host) = &self.gfl_host {
            config = config.with_gfl_host(host);
        }
        if let Some(host) = &self.agents_host {
            config = config.with_agents_host(host);
        }
        for (name, value) in &self.headers {
            config = config.with_header(name, value);
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        config
    }
}

/// Composed context handed to command handlers.
#[derive(Debug, Clone)]
pub struct CliContext {
    client: WeaveClient,
}

impl CliContext {
    pub fn tenants(&self, collection: &str) -> Tenants {
        self.client.collection(collection).tenants()
    }

    pub fn gfl(&self, collection: &str) -> Gfl {
        self.client.collection(collection).gfl()
    }

    pub fn query_agent(&self, collections: Vec<String>) -> QueryAgent {
        self.client.query_agent(collections)
    }

    pub fn transformation_agent(
        &self,
        collection: &str,
        step: OperationStep,
    ) -> TransformationAgent {
        self.client.transformation_agent(collection, [step])
    }
}

/// Build the CLI context.
pub fn bootstrap(config: &CliConfig) -> Result<CliContext, CliError> {
    tracing::debug!(url = ?config.url, "Connecting");
    let client = WeaveClient::new(&config.client_config())?;
    Ok(CliContext { client })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_config_from_cli() {
        let cli = Cli::parse_from([
            "weave",
            "--url",
            "https://cluster.example",
            "--timeout",
            "10",
        ]);
        let config = CliConfig::from_cli(&cli);
        assert_eq!(config.url.as_deref(), Some("https://cluster.example"));
        assert_eq!(config.timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_config_forwards_headers_and_agents_host() {
        let cli = Cli::parse_from([
            "weave",
            "--agents-host",
            "https://agents.example",
            "--header",
            "X-OpenAI-Api-Key=sk-test",
        ]);
        let config = CliConfig::from_cli(&cli);
        assert_eq!(config.agents_host.as_deref(), Some("https://agents.example"));
        assert_eq!(
            config.headers,
            [("X-OpenAI-Api-Key".to_string(), "sk-test".to_string())]
        );
        assert!(bootstrap(&config).is_ok());
    }

    #[test]
    fn test_bootstrap_defaults() {
        assert!(bootstrap(&CliConfig::default()).is_ok());
    }

    #[test]
    fn test_bootstrap_bad_url() {
        let config = CliConfig {
            url: Some("not a url".to_string()),
            ..CliConfig::default()
        };
        let err = bootstrap(&config).unwrap_err();
        assert_eq!(err.exit_code(), 78);
    }
}
