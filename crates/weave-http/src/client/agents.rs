//! Calls to the hosted agents service.

use std::time::Duration;

use weave_core::domain::{QueryAgentRequest, QueryAgentResponse, TransformationRequest};

use crate::error::{HttpError, HttpResult};
use crate::http::{HttpBackend, HttpRequest, Method};
use crate::models::{WithHeaders, WorkflowStarted};
use crate::url::agents_url;

use super::{RestClient, decode};

/// Query agent runs search and aggregate before answering.
const QUERY_TIMEOUT: Duration = Duration::from_secs(60);
const TRANSFORMATION_TIMEOUT: Duration = Duration::from_secs(40);

impl<B: HttpBackend> RestClient<B> {
    /// A request to the agents service, which authenticates with the raw
    /// cluster key and is told which cluster to act on.
    fn agents_request(&self, path: &[&str]) -> HttpResult<HttpRequest> {
        let url = agents_url(&self.config, path)?;
        Ok(HttpRequest::new(Method::Post, url)
            .header("Authorization", self.config.api_key_or_empty())
            .header(
                "X-Weaviate-Cluster-Url",
                self.config.cluster_url_for_services(),
            ))
    }

    pub(crate) async fn run_query_agent(
        &self,
        request: &QueryAgentRequest,
    ) -> HttpResult<QueryAgentResponse> {
        let body = serde_json::to_value(WithHeaders {
            request,
            headers: &self.config.additional_headers,
        })?;
        let request = self
            .agents_request(&["agent", "query"])?
            .json(body)
            .timeout(QUERY_TIMEOUT);
        decode(self.backend.send(request).await?)
    }

    /// Submit one transformation step; append steps go to `create`, update
    /// steps to `update`.
    pub(crate) async fn post_transformation(
        &self,
        request: &TransformationRequest,
    ) -> HttpResult<String> {
        let action = if request.is_append() { "create" } else { "update" };
        let body = serde_json::to_value(WithHeaders {
            request,
            headers: &self.config.additional_headers,
        })?;
        let http_request = self
            .agents_request(&["transformation", action])?
            .json(body)
            .timeout(TRANSFORMATION_TIMEOUT);

        let started: WorkflowStarted = decode(self.backend.send(http_request).await?)?;
        started.workflow_id.ok_or_else(|| HttpError::InvalidResponse {
            message: "transformation response has no workflow_id".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{header, test_config};
    use crate::http::testing::{CannedResponse, FakeBackend};
    use serde_json::json;
    use weave_core::domain::QUERY_AGENT_LIMIT;
    use weave_core::{DataType, OperationStep};

    #[tokio::test]
    async fn test_query_agent_request_shape() {
        let backend = FakeBackend::new().with_response(
            Method::Post,
            "/agent/query",
            CannedResponse::ok(json!({
                "original_query": "What is trending?",
                "collection_names": ["Article"],
                "final_answer": "Rust",
                "is_partial_answer": false
            })),
        );
        let client = RestClient::with_backend(test_config(), backend);

        let request = QueryAgentRequest {
            query: "What is trending?".to_string(),
            collection_names: vec!["Article".to_string()],
            collection_view_properties: None,
            limit: QUERY_AGENT_LIMIT,
            tenant: None,
            previous_response: None,
        };
        let response = client.run_query_agent(&request).await.unwrap();
        assert_eq!(response.final_answer, "Rust");

        let sent = client.backend.last_request();
        assert_eq!(header(&sent, "Authorization"), Some("secret"));
        assert_eq!(
            header(&sent, "X-Weaviate-Cluster-Url"),
            Some("http://localhost:8080")
        );
        assert_eq!(sent.timeout, Some(QUERY_TIMEOUT));

        let body = sent.body.unwrap();
        assert_eq!(body["limit"], 20);
        assert_eq!(body["tenant"], json!(null));
        assert_eq!(body["headers"], json!({"X-OpenAI-Api-Key": "sk-test"}));
    }

    #[tokio::test]
    async fn test_query_agent_error_keeps_body() {
        let backend = FakeBackend::new().with_response(
            Method::Post,
            "/agent/query",
            CannedResponse {
                status: 500,
                json: Some(json!({"detail": "boom"})),
            },
        );
        let client = RestClient::with_backend(test_config(), backend);

        let request = QueryAgentRequest {
            query: "q".to_string(),
            collection_names: vec!["Article".to_string()],
            collection_view_properties: None,
            limit: QUERY_AGENT_LIMIT,
            tenant: None,
            previous_response: None,
        };
        let err = client.run_query_agent(&request).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(err.to_string().contains("boom"));
    }

    #[tokio::test]
    async fn test_transformation_routing() {
        let backend = FakeBackend::new()
            .with_response(
                Method::Post,
                "/transformation/create",
                CannedResponse::ok(json!({"workflow_id": "tf-create"})),
            )
            .with_response(
                Method::Post,
                "/transformation/update",
                CannedResponse::ok(json!({"workflow_id": "tf-update"})),
            );
        let client = RestClient::with_backend(test_config(), backend);

        let append = OperationStep::append("summary", DataType::Text, ["body"], "Summarize")
            .to_request("Article")
            .unwrap();
        let update = OperationStep::update("title", ["title"], "Title case")
            .to_request("Article")
            .unwrap();

        assert_eq!(client.post_transformation(&append).await.unwrap(), "tf-create");
        assert_eq!(client.post_transformation(&update).await.unwrap(), "tf-update");

        let requests = client.backend.requests();
        assert_eq!(
            requests[0].body.as_ref().unwrap()["on_properties"],
            json!([{"name": "summary", "data_type": "text"}])
        );
        assert_eq!(
            requests[1].body.as_ref().unwrap()["on_properties"],
            json!(["title"])
        );
        for sent in &requests {
            assert_eq!(
                sent.body.as_ref().unwrap()["headers"],
                json!({"X-OpenAI-Api-Key": "sk-test"})
            );
        }
        assert_eq!(requests[1].timeout, Some(TRANSFORMATION_TIMEOUT));
    }

    #[tokio::test]
    async fn test_transformation_without_workflow_id() {
        let backend = FakeBackend::new().with_response(
            Method::Post,
            "/transformation/create",
            CannedResponse::ok(json!({})),
        );
        let client = RestClient::with_backend(test_config(), backend);

        let append = OperationStep::append("summary", DataType::Text, ["body"], "Summarize")
            .to_request("Article")
            .unwrap();
        assert!(matches!(
            client.post_transformation(&append).await,
            Err(HttpError::InvalidResponse { .. })
        ));
    }
}
