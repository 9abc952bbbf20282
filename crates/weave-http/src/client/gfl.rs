//! Calls to the Generative Function Layer service.
//!
//! The service reaches the cluster on the caller's behalf, so every POST
//! carries the cluster URL and key in its body rather than in headers.

use serde::Serialize;
use weave_core::domain::{
    GflDeleteRequest, GflQueryRequest, GflQueryResponse, GflResponse, GflStatusResponse,
    GflWriteRequest,
};

use crate::error::HttpResult;
use crate::http::{HttpBackend, HttpRequest, Method};
use crate::models::WithCredentials;
use crate::url::{gfl_status_url, gfl_url};

use super::{RestClient, decode};

impl<B: HttpBackend> RestClient<B> {
    /// POST a payload with credentials attached to `/gfls/{action}`.
    async fn post_gfl<T, R>(&self, action: &str, request: &T) -> HttpResult<R>
    where
        T: Serialize + Sync,
        R: serde::de::DeserializeOwned,
    {
        let url = gfl_url(&self.config, action)?;
        let body = serde_json::to_value(WithCredentials {
            request,
            weaviate: self.credentials(),
        })?;
        let reply = self
            .backend
            .send(HttpRequest::new(Method::Post, url).json(body))
            .await?;
        decode(reply)
    }

    pub(crate) async fn gfl_create(&self, request: &GflWriteRequest) -> HttpResult<GflResponse> {
        self.post_gfl("create", request).await
    }

    pub(crate) async fn gfl_update(&self, request: &GflWriteRequest) -> HttpResult<GflResponse> {
        self.post_gfl("update", request).await
    }

    pub(crate) async fn gfl_delete(&self, request: &GflDeleteRequest) -> HttpResult<GflResponse> {
        self.post_gfl("delete", request).await
    }

    pub(crate) async fn gfl_query(
        &self,
        request: &GflQueryRequest,
    ) -> HttpResult<GflQueryResponse> {
        self.post_gfl("query", request).await
    }

    pub(crate) async fn gfl_status(&self, workflow_id: &str) -> HttpResult<GflStatusResponse> {
        let url = gfl_status_url(&self.config, workflow_id)?;
        let reply = self
            .backend
            .send(HttpRequest::new(Method::Get, url))
            .await?;
        decode(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{header, test_config};
    use crate::http::testing::{CannedResponse, FakeBackend};
    use serde_json::json;
    use weave_core::domain::{NewProperty, PropertyTargets, WorkflowState};
    use weave_core::DataType;

    fn write_request(on_properties: PropertyTargets) -> GflWriteRequest {
        GflWriteRequest {
            uuids: None,
            collection: "Article".to_string(),
            instruction: "Summarize the body".to_string(),
            on_properties,
            view_properties: vec!["body".to_string()],
            headers: None,
            tenant: None,
            model: "gpt-4o".to_string(),
            api_key_for_model: None,
        }
    }

    #[tokio::test]
    async fn test_create_body_carries_credentials() {
        let backend = FakeBackend::new().with_response(
            Method::Post,
            "/gfls/create",
            CannedResponse::ok(json!({"workflow_id": "wf-1"})),
        );
        let client = RestClient::with_backend(test_config(), backend);

        let request = write_request(PropertyTargets::New(vec![NewProperty {
            name: "summary".to_string(),
            data_type: DataType::Text,
        }]));
        let response = client.gfl_create(&request).await.unwrap();
        assert_eq!(response.workflow_id.as_deref(), Some("wf-1"));

        let sent = client.backend.last_request();
        // Credentials travel in the body only
        assert!(header(&sent, "Authorization").is_none());
        assert_eq!(
            sent.body.unwrap(),
            json!({
                "uuids": null,
                "collection": "Article",
                "instruction": "Summarize the body",
                "on_properties": [{"name": "summary", "data_type": "text"}],
                "view_properties": ["body"],
                "headers": null,
                "tenant": null,
                "model": "gpt-4o",
                "api_key_for_model": null,
                "weaviate": {"url": "http://localhost:8080", "key": "secret"}
            })
        );
    }

    #[tokio::test]
    async fn test_update_targets_existing_names() {
        let backend = FakeBackend::new().with_response(
            Method::Post,
            "/gfls/update",
            CannedResponse::ok(json!({"workflow_id": "wf-2", "operation_name": "summary"})),
        );
        let client = RestClient::with_backend(test_config(), backend);

        let request = write_request(PropertyTargets::Existing(vec!["summary".to_string()]));
        let response = client.gfl_update(&request).await.unwrap();
        assert_eq!(response.operation_name.as_deref(), Some("summary"));

        let body = client.backend.last_request().body.unwrap();
        assert_eq!(body["on_properties"], json!(["summary"]));
    }

    #[tokio::test]
    async fn test_query_passes_zero_call_budget() {
        let backend = FakeBackend::new().with_response(
            Method::Post,
            "/gfls/query",
            CannedResponse::ok(json!({"final_answer": "42", "collection_names": ["Article"]})),
        );
        let client = RestClient::with_backend(test_config(), backend);

        let request = GflQueryRequest {
            query: "How many?".to_string(),
            collections: vec!["Article".to_string()],
            tenant: None,
            functions: None,
            call_budget: 0,
            lm_provider: "openai".to_string(),
            model_name: "gpt-4o".to_string(),
            api_key: None,
            description: None,
        };
        let response = client.gfl_query(&request).await.unwrap();
        assert_eq!(response.final_answer.as_deref(), Some("42"));

        let body = client.backend.last_request().body.unwrap();
        assert_eq!(body["call_budget"], 0);
        assert_eq!(body["weaviate"]["key"], "secret");
    }

    #[tokio::test]
    async fn test_status() {
        let backend = FakeBackend::new().with_response(
            Method::Get,
            "/gfls/status/wf-1",
            CannedResponse::ok(json!({"workflow_id": "wf-1", "status": "completed"})),
        );
        let client = RestClient::with_backend(test_config(), backend);

        let status = client.gfl_status("wf-1").await.unwrap();
        assert_eq!(status.status, WorkflowState::Completed);
        assert!(status.is_terminal());
    }
}
