//! Query and transformation agents.

use std::sync::Arc;

use crate::domain::{
    DependentOperationStep, QUERY_AGENT_LIMIT, QueryAgentRequest, QueryAgentResponse,
    TransformationResponse,
};
use crate::ports::{AgentsPort, ClientError, ClientResult};

/// Agent answering natural-language questions over a fixed set of collections.
#[derive(Clone)]
pub struct QueryAgent {
    port: Arc<dyn AgentsPort>,
    collections: Vec<String>,
    tenant: Option<String>,
}

impl QueryAgent {
    pub fn new<I, S>(port: Arc<dyn AgentsPort>, collections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            port,
            collections: collections.into_iter().map(Into::into).collect(),
            tenant: None,
        }
    }

    /// Scope every run to a tenant.
    #[must_use]
    pub fn with_tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = Some(tenant.into());
        self
    }

    pub fn collections(&self) -> &[String] {
        &self.collections
    }

    /// Run a query.
    ///
    /// Pass a previous response as `context` to ask a follow-up question.
    pub async fn run(
        &self,
        query: impl Into<String>,
        view_properties: Option<Vec<String>>,
        context: Option<&QueryAgentResponse>,
    ) -> ClientResult<QueryAgentResponse> {
        let query = query.into();
        if query.trim().is_empty() {
            return Err(ClientError::validation("query must not be empty"));
        }
        if self.collections.is_empty() {
            return Err(ClientError::validation(
                "query agent needs at least one collection",
            ));
        }

        let request = QueryAgentRequest {
            query,
            collection_names: self.collections.clone(),
            collection_view_properties: view_properties,
            limit: QUERY_AGENT_LIMIT,
            tenant: self.tenant.clone(),
            previous_response: context.cloned(),
        };
        self.port.run_query(&request).await
    }
}

impl std::fmt::Debug for QueryAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryAgent")
            .field("collections", &self.collections)
            .field("tenant", &self.tenant)
            .finish_non_exhaustive()
    }
}

/// Agent applying an ordered list of property transformations to a collection.
#[derive(Clone)]
pub struct TransformationAgent {
    port: Arc<dyn AgentsPort>,
    collection: String,
    operations: Vec<DependentOperationStep>,
}

impl TransformationAgent {
    /// Configure an agent for `collection`.
    ///
    /// Accepts plain steps or steps with dependencies.
    pub fn configure<I, O>(port: Arc<dyn AgentsPort>, collection: impl Into<String>, operations: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<DependentOperationStep>,
    {
        Self {
            port,
            collection: collection.into(),
            operations: operations.into_iter().map(Into::into).collect(),
        }
    }

    pub fn operations(&self) -> &[DependentOperationStep] {
        &self.operations
    }

    /// Submit every operation, in order.
    ///
    /// Every step is validated before the first one is submitted. Stops at the
    /// first failed submission; steps already submitted keep running.
    pub async fn update_all(&self) -> ClientResult<Vec<TransformationResponse>> {
        let requests = self
            .operations
            .iter()
            .map(|step| step.operation.to_request(&self.collection))
            .collect::<ClientResult<Vec<_>>>()?;

        let mut responses = Vec::with_capacity(requests.len());
        for (step, request) in self.operations.iter().zip(&requests) {
            let workflow_id = self.port.submit_transformation(request).await?;
            tracing::info!(
                collection = %self.collection,
                property = step.operation.property_name(),
                %workflow_id,
                "Submitted transformation"
            );
            responses.push(TransformationResponse {
                operation_name: step.operation.property_name().to_string(),
                workflow_id,
            });
        }
        Ok(responses)
    }
}

impl std::fmt::Debug for TransformationAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformationAgent")
            .field("collection", &self.collection)
            .field("operations", &self.operations)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DataType, OperationStep};
    use crate::testing::RecordingAgents;

    #[tokio::test]
    async fn test_query_agent_request() {
        let port = Arc::new(RecordingAgents::new());
        let agent = QueryAgent::new(port.clone(), ["Article", "Author"]);

        let first = agent.run("Who wrote the most?", None, None).await.unwrap();
        agent
            .run(
                "And the least?",
                Some(vec!["name".to_string()]),
                Some(&first),
            )
            .await
            .unwrap();

        let queries = port.queries();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].collection_names, vec!["Article", "Author"]);
        assert_eq!(queries[0].limit, 20);
        assert!(queries[0].previous_response.is_none());
        assert_eq!(
            queries[1].previous_response.as_ref().unwrap().original_query,
            "Who wrote the most?"
        );
        assert_eq!(
            queries[1].collection_view_properties,
            Some(vec!["name".to_string()])
        );
    }

    #[tokio::test]
    async fn test_query_agent_rejects_empty_query() {
        let port = Arc::new(RecordingAgents::new());
        let agent = QueryAgent::new(port.clone(), ["Article"]);
        assert!(agent.run("   ", None, None).await.is_err());
        assert!(port.queries().is_empty());
    }

    #[tokio::test]
    async fn test_update_all_runs_in_order() {
        let port = Arc::new(RecordingAgents::new());
        let summary = OperationStep::append("summary", DataType::Text, ["body"], "Summarize");
        let agent = TransformationAgent::configure(
            port.clone(),
            "Article",
            vec![
                DependentOperationStep::from(summary.clone()),
                DependentOperationStep::new(
                    OperationStep::update("title", ["title", "summary"], "Sharpen the title"),
                    vec![summary],
                ),
            ],
        );

        let responses = agent.update_all().await.unwrap();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].operation_name, "summary");
        assert_eq!(responses[0].workflow_id, "tf-1");
        assert_eq!(responses[1].operation_name, "title");

        let sent = port.transformations();
        assert!(sent[0].is_append());
        assert!(!sent[1].is_append());
    }

    #[tokio::test]
    async fn test_update_all_validates_before_submitting() {
        let port = Arc::new(RecordingAgents::new());
        let agent = TransformationAgent::configure(
            port.clone(),
            "Article",
            [
                OperationStep::append("summary", DataType::Text, ["body"], "Summarize"),
                OperationStep::update("title", ["title"], ""),
            ],
        );

        assert!(agent.update_all().await.is_err());
        assert!(port.transformations().is_empty());
    }
}
