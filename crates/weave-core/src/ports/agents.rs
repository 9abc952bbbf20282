//! Agents service port trait.

use async_trait::async_trait;

use super::error::ClientResult;
use crate::domain::{QueryAgentRequest, QueryAgentResponse, TransformationRequest};

/// Port trait for the hosted agents service.
#[async_trait]
pub trait AgentsPort: Send + Sync {
    /// Run the query agent.
    async fn run_query(&self, request: &QueryAgentRequest) -> ClientResult<QueryAgentResponse>;

    /// Submit one transformation step, returning its workflow id.
    async fn submit_transformation(&self, request: &TransformationRequest)
    -> ClientResult<String>;
}
