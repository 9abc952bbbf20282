//! Internal connection settings and wire envelopes.
//!
//! These types are internal to `weave-http`. External consumers use the
//! domain types defined in `weave-core`.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

// ============================================================================
// Configuration (used internally, see config.rs for public config)
// ============================================================================

/// Resolved connection settings.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub cluster_url: Url,
    pub api_key: Option<String>,
    pub gfl_host: Url,
    pub agents_host: Url,
    pub additional_headers: BTreeMap<String, String>,
    pub user_agent: String,
    pub timeout: Duration,
    pub max_retries: u8,
    pub retry_base_delay_ms: u64,
}

impl ConnectionConfig {
    /// Cluster URL as the GFL and agents services expect to receive it:
    /// no trailing slash and no explicit default HTTPS port.
    pub fn cluster_url_for_services(&self) -> String {
        let mut url = self.cluster_url.clone();
        if url.scheme() == "https" && url.port() == Some(443) {
            // Only fails for URLs that cannot carry a port
            let _ = url.set_port(None);
        }
        url.as_str().trim_end_matches('/').to_string()
    }

    /// The API key, or an empty string for anonymous clusters.
    pub fn api_key_or_empty(&self) -> &str {
        self.api_key.as_deref().unwrap_or("")
    }
}

// ============================================================================
// Wire Envelopes
// ============================================================================

/// Cluster coordinates the GFL service uses to reach the database.
#[derive(Debug, Serialize)]
pub struct ClusterCredentials<'a> {
    pub url: String,
    pub key: &'a str,
}

/// A GFL payload with cluster credentials attached.
#[derive(Debug, Serialize)]
pub struct WithCredentials<'a, T: Serialize> {
    #[serde(flatten)]
    pub request: &'a T,
    pub weaviate: ClusterCredentials<'a>,
}

/// An agents payload with the forwarded database headers attached.
#[derive(Debug, Serialize)]
pub struct WithHeaders<'a, T: Serialize> {
    #[serde(flatten)]
    pub request: &'a T,
    pub headers: &'a BTreeMap<String, String>,
}

/// Body returned when the agents service starts a workflow.
#[derive(Debug, Deserialize)]
pub struct WorkflowStarted {
    pub workflow_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use serde_json::json;

    #[test]
    fn test_cluster_url_for_services() {
        let config = ClientConfig::new()
            .with_cluster_url("https://cluster.example:443/")
            .resolve()
            .unwrap();
        // The url crate already drops the scheme's default port
        assert_eq!(config.cluster_url_for_services(), "https://cluster.example");

        let config = ClientConfig::new()
            .with_cluster_url("http://localhost:8080")
            .resolve()
            .unwrap();
        assert_eq!(config.cluster_url_for_services(), "http://localhost:8080");
    }

    #[test]
    fn test_cluster_url_for_services_keeps_other_ports() {
        let cases = [
            ("https://cluster.example:4430", "https://cluster.example:4430"),
            ("http://10.0.0.1:44300/base", "http://10.0.0.1:44300/base"),
            ("http://cluster.example:443", "http://cluster.example:443"),
            ("https://cluster.example/base/", "https://cluster.example/base"),
        ];
        for (input, expected) in cases {
            let config = ClientConfig::new()
                .with_cluster_url(input)
                .resolve()
                .unwrap();
            assert_eq!(config.cluster_url_for_services(), expected, "{input}");
        }
    }

    #[test]
    fn test_with_credentials_flattens() {
        let request = json!({"collection": "Article", "instruction": "Summarize"});
        let body = WithCredentials {
            request: &request,
            weaviate: ClusterCredentials {
                url: "http://localhost:8080".to_string(),
                key: "secret",
            },
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "collection": "Article",
                "instruction": "Summarize",
                "weaviate": {"url": "http://localhost:8080", "key": "secret"}
            })
        );
    }

    #[test]
    fn test_api_key_or_empty() {
        let config = ClientConfig::new().resolve().unwrap();
        assert_eq!(config.api_key_or_empty(), "");
    }
}
