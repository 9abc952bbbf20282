//! Generative Function Layer port trait.

use async_trait::async_trait;

use super::error::ClientResult;
use crate::domain::{
    GflDeleteRequest, GflQueryRequest, GflQueryResponse, GflResponse, GflStatusResponse,
    GflWriteRequest,
};

/// Port trait for the GFL service.
///
/// # Design
///
/// - Requests arrive fully defaulted; the port applies no defaults
/// - Cluster credentials are the implementation's concern
/// - Mutating calls start a workflow and return immediately
#[async_trait]
pub trait GflPort: Send + Sync {
    /// Create and populate a new property.
    async fn create(&self, request: &GflWriteRequest) -> ClientResult<GflResponse>;

    /// Regenerate existing properties.
    async fn update(&self, request: &GflWriteRequest) -> ClientResult<GflResponse>;

    /// Delete the objects an instruction selects.
    async fn delete_objects(&self, request: &GflDeleteRequest) -> ClientResult<GflResponse>;

    /// Run a structured natural-language query.
    async fn query(&self, request: &GflQueryRequest) -> ClientResult<GflQueryResponse>;

    /// Poll a workflow.
    ///
    /// Returns `ClientError::NotFound` for unknown workflow ids.
    async fn status(&self, workflow_id: &str) -> ClientResult<GflStatusResponse>;
}
