//! HTTP backend abstraction.
//!
//! Every remote call goes through [`HttpBackend::send`], which takes a fully
//! described request and returns the decoded JSON body. The production
//! implementation uses reqwest with retry logic for transient errors; tests
//! inject a fake that replays canned replies and records what was sent.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::error::{HttpError, HttpResult};
use crate::models::ConnectionConfig;

// ============================================================================
// Requests and Replies
// ============================================================================

/// HTTP methods used by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
}

impl Method {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Whether repeating the request cannot change the outcome.
    ///
    /// Only these are retried; a retried POST could start a second workflow.
    pub const fn is_idempotent(self) -> bool {
        !matches!(self, Self::Post)
    }

    const fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Head => reqwest::Method::HEAD,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request, described independently of the HTTP library.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    /// Headers on top of the backend's defaults
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Overrides the backend's default timeout
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub const fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body: None,
            timeout: None,
        }
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A successful reply.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    /// Decoded JSON body; `None` when the body was empty
    pub body: Option<Value>,
}

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that exchange JSON with a server.
///
/// This abstraction allows for dependency injection of HTTP clients,
/// making it easy to test code that depends on HTTP requests.
///
/// Non-success statuses are returned as `HttpError::ApiRequestFailed`.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Send a request and decode the reply body.
    async fn send(&self, request: HttpRequest) -> HttpResult<HttpReply>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest with retry logic.
///
/// Implements exponential backoff for transient server errors (5xx)
/// and network errors, for idempotent methods only.
pub struct ReqwestBackend {
    client: reqwest::Client,
    max_retries: u8,
    retry_base_delay_ms: u64,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &ConnectionConfig) -> HttpResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            retry_base_delay_ms: config.retry_base_delay_ms,
        })
    }

    fn build_request(&self, request: &HttpRequest) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(request.method.to_reqwest(), request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        builder
    }

    /// Send a request with automatic retry for transient errors.
    async fn send_with_retry(&self, request: &HttpRequest) -> HttpResult<reqwest::Response> {
        let max_retries = if request.method.is_idempotent() {
            self.max_retries
        } else {
            0
        };
        let mut last_error: Option<HttpError> = None;

        for attempt in 0..=max_retries {
            if attempt > 0 {
                let delay = backoff_delay(self.retry_base_delay_ms, attempt);
                tracing::warn!(
                    method = %request.method,
                    url = %request.url,
                    attempt,
                    ?delay,
                    "Retrying request"
                );
                tokio::time::sleep(delay).await;
            }

            match self.build_request(request).send().await {
                Ok(response) => {
                    let status = response.status();
                    tracing::debug!(
                        method = %request.method,
                        url = %request.url,
                        status = status.as_u16(),
                        "Request completed"
                    );
                    if status.is_success() {
                        return Ok(response);
                    }

                    // 5xx errors are retryable (server-side issues)
                    if status.is_server_error() && attempt < max_retries {
                        last_error = Some(HttpError::ApiRequestFailed {
                            method: request.method.as_str(),
                            status: status.as_u16(),
                            url: request.url.to_string(),
                            body: String::new(),
                        });
                        continue;
                    }

                    // 4xx errors or final attempt - fail immediately
                    let body = response.text().await.unwrap_or_default();
                    if status.as_u16() == 422 {
                        tracing::warn!(url = %request.url, %body, "Request rejected as unprocessable");
                    }
                    return Err(HttpError::ApiRequestFailed {
                        method: request.method.as_str(),
                        status: status.as_u16(),
                        url: request.url.to_string(),
                        body,
                    });
                }
                Err(e) => {
                    // Network errors are retryable
                    if attempt < max_retries {
                        last_error = Some(e.into());
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }

        Err(last_error.unwrap_or_else(|| HttpError::InvalidResponse {
            message: "Unknown error during request".to_string(),
        }))
    }
}

/// Delay before retry `attempt` (1-based): the base delay doubled per
/// earlier retry, saturating instead of overflowing.
fn backoff_delay(base_ms: u64, attempt: u8) -> Duration {
    let factor = 2u64
        .checked_pow(u32::from(attempt.saturating_sub(1)))
        .unwrap_or(u64::MAX);
    Duration::from_millis(base_ms.saturating_mul(factor))
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn send(&self, request: HttpRequest) -> HttpResult<HttpReply> {
        let response = self.send_with_retry(&request).await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            None
        } else {
            Some(serde_json::from_slice(&bytes)?)
        };
        Ok(HttpReply { status, body })
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Canned reply for the fake backend.
    #[derive(Clone)]
    pub struct CannedResponse {
        pub status: u16,
        pub json: Option<Value>,
    }

    impl CannedResponse {
        pub const fn ok(json: Value) -> Self {
            Self {
                status: 200,
                json: Some(json),
            }
        }

        pub const fn empty() -> Self {
            Self {
                status: 200,
                json: None,
            }
        }

        pub const fn status(status: u16) -> Self {
            Self { status, json: None }
        }
    }

    /// A fake HTTP backend that returns canned replies and records requests.
    ///
    /// Replies are matched by method and a URL substring, first match wins.
    pub struct FakeBackend {
        responses: Vec<(Method, String, CannedResponse)>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self {
                responses: Vec::new(),
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Add a canned reply for a method and URL pattern.
        pub fn with_response(
            mut self,
            method: Method,
            url_contains: &str,
            response: CannedResponse,
        ) -> Self {
            self.responses
                .push((method, url_contains.to_string(), response));
            self
        }

        /// Requests sent so far, oldest first.
        pub fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }

        /// The most recent request.
        pub fn last_request(&self) -> HttpRequest {
            self.requests().pop().expect("no request was sent")
        }
    }

    impl Default for FakeBackend {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl HttpBackend for FakeBackend {
        async fn send(&self, request: HttpRequest) -> HttpResult<HttpReply> {
            self.requests.lock().unwrap().push(request.clone());

            let canned = self
                .responses
                .iter()
                .find(|(method, pattern, _)| {
                    *method == request.method && request.url.as_str().contains(pattern.as_str())
                })
                .map(|(_, _, response)| response.clone())
                .unwrap_or_else(|| CannedResponse::status(404));

            if (200..300).contains(&canned.status) {
                Ok(HttpReply {
                    status: canned.status,
                    body: canned.json,
                })
            } else {
                Err(HttpError::ApiRequestFailed {
                    method: request.method.as_str(),
                    status: canned.status,
                    url: request.url.to_string(),
                    body: canned.json.map(|v| v.to_string()).unwrap_or_default(),
                })
            }
        }
    }
}
