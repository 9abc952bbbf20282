//! HTTP client for the cluster REST API, the GFL service and the agents.
//!
//! The raw operations live in the submodules and return [`HttpResult`];
//! the port implementations in `port.rs` map them onto the core traits.

mod agents;
mod gfl;
mod tenants;

use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{HttpError, HttpResult};
use crate::http::{HttpBackend, HttpReply, HttpRequest, Method, ReqwestBackend};
use crate::models::{ClusterCredentials, ConnectionConfig};

// ============================================================================
// Type Aliases
// ============================================================================

/// Default client using the reqwest HTTP backend.
pub type DefaultRestClient = RestClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the remote services, generic over the HTTP backend.
///
/// Use `DefaultRestClient` for production code; tests inject a fake backend.
pub struct RestClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) config: ConnectionConfig,
}

impl DefaultRestClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &ClientConfig) -> HttpResult<Self> {
        let config = config.resolve()?;
        let backend = ReqwestBackend::new(&config)?;
        Ok(Self { backend, config })
    }
}

impl<B: HttpBackend> RestClient<B> {
    /// Create a new client with a custom backend.
    #[cfg(test)]
    pub(crate) const fn with_backend(config: ConnectionConfig, backend: B) -> Self {
        Self { backend, config }
    }

    /// A request to the database cluster, authenticated with the bearer token
    /// and carrying the configured extra headers.
    pub(crate) fn cluster_request(&self, method: Method, url: Url) -> HttpRequest {
        let mut request = HttpRequest::new(method, url);
        if let Some(key) = &self.config.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }
        for (name, value) in &self.config.additional_headers {
            request = request.header(name.as_str(), value.as_str());
        }
        request
    }

    /// Credentials the GFL service uses to reach the cluster.
    pub(crate) fn credentials(&self) -> ClusterCredentials<'_> {
        ClusterCredentials {
            url: self.config.cluster_url_for_services(),
            key: self.config.api_key_or_empty(),
        }
    }
}

/// Decode a reply body that the endpoint always returns.
pub(crate) fn decode<T: DeserializeOwned>(reply: HttpReply) -> HttpResult<T> {
    let body = reply.body.ok_or_else(|| HttpError::InvalidResponse {
        message: format!("expected a JSON body with status {}", reply.status),
    })?;
    Ok(serde_json::from_value(body)?)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::http::testing::FakeBackend;
    use serde_json::json;

    pub fn test_config() -> ConnectionConfig {
        ClientConfig::new()
            .with_api_key("secret")
            .with_header("X-OpenAI-Api-Key", "sk-test")
            .resolve()
            .unwrap()
    }

    pub fn header<'a>(request: &'a HttpRequest, name: &str) -> Option<&'a str> {
        request
            .headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_default_client_creation() {
        assert!(DefaultRestClient::new(&ClientConfig::new()).is_ok());
    }

    #[test]
    fn test_default_client_rejects_bad_url() {
        let config = ClientConfig::new().with_gfl_host("::");
        assert!(DefaultRestClient::new(&config).is_err());
    }

    #[test]
    fn test_cluster_request_headers() {
        let client = RestClient::with_backend(test_config(), FakeBackend::new());
        let url = Url::parse("http://localhost:8080/v1/meta").unwrap();
        let request = client.cluster_request(Method::Get, url);

        assert_eq!(header(&request, "Authorization"), Some("Bearer secret"));
        assert_eq!(header(&request, "X-OpenAI-Api-Key"), Some("sk-test"));
    }

    #[test]
    fn test_anonymous_cluster_request() {
        let config = ClientConfig::new().resolve().unwrap();
        let client = RestClient::with_backend(config, FakeBackend::new());
        let url = Url::parse("http://localhost:8080/v1/meta").unwrap();
        let request = client.cluster_request(Method::Get, url);

        assert!(header(&request, "Authorization").is_none());
    }

    #[test]
    fn test_decode_requires_body() {
        let reply = HttpReply {
            status: 200,
            body: None,
        };
        assert!(matches!(
            decode::<Vec<String>>(reply),
            Err(HttpError::InvalidResponse { .. })
        ));

        let reply = HttpReply {
            status: 200,
            body: Some(json!(["a"])),
        };
        assert_eq!(decode::<Vec<String>>(reply).unwrap(), vec!["a"]);
    }
}
