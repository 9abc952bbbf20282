//! GFL facade - LM-generated property content, agent queries and workflow polling.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::domain::{
    DataType, GflDefaults, GflDeleteRequest, GflQueryOptions, GflQueryRequest, GflQueryResponse,
    GflResponse, GflStatusResponse, GflWriteOptions, GflWriteRequest, NewProperty,
    PropertyTargets,
};
use crate::ports::{ClientError, ClientResult, GflPort};

/// Generative Function Layer operations on a single collection.
///
/// Optional parameters left unset are filled from [`GflDefaults`] before the
/// request reaches the port.
#[derive(Clone)]
pub struct Gfl {
    port: Arc<dyn GflPort>,
    collection: String,
    defaults: GflDefaults,
}

impl Gfl {
    /// Create a facade for `collection` with the standard defaults.
    pub fn new(port: Arc<dyn GflPort>, collection: impl Into<String>) -> Self {
        Self::with_defaults(port, collection, GflDefaults::default())
    }

    /// Create a facade with custom defaults.
    pub fn with_defaults(
        port: Arc<dyn GflPort>,
        collection: impl Into<String>,
        defaults: GflDefaults,
    ) -> Self {
        Self {
            port,
            collection: collection.into(),
            defaults,
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub const fn defaults(&self) -> &GflDefaults {
        &self.defaults
    }

    /// Define a new property whose values the LM generates from
    /// `view_properties` following `instruction`.
    pub async fn create<I, S>(
        &self,
        property_name: impl Into<String>,
        data_type: DataType,
        view_properties: I,
        instruction: impl Into<String>,
        options: GflWriteOptions,
    ) -> ClientResult<GflResponse>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let targets = PropertyTargets::New(vec![NewProperty {
            name: property_name.into(),
            data_type,
        }]);
        let request = self.write_request(targets, view_properties, instruction, options);
        request.validate()?;

        let response = self.port.create(&request).await?;
        tracing::info!(
            collection = %self.collection,
            workflow_id = ?response.workflow_id,
            "Started GFL create"
        );
        Ok(response)
    }

    /// Regenerate the values of existing `on_properties`.
    pub async fn update<I, S, P, Q>(
        &self,
        instruction: impl Into<String>,
        view_properties: I,
        on_properties: P,
        options: GflWriteOptions,
    ) -> ClientResult<GflResponse>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        P: IntoIterator<Item = Q>,
        Q: Into<String>,
    {
        let targets = PropertyTargets::Existing(on_properties.into_iter().map(Into::into).collect());
        let request = self.write_request(targets, view_properties, instruction, options);
        request.validate()?;

        let response = self.port.update(&request).await?;
        tracing::info!(
            collection = %self.collection,
            workflow_id = ?response.workflow_id,
            "Started GFL update"
        );
        Ok(response)
    }

    /// Ask the LM agent a structured question.
    ///
    /// `call_budget` caps the agent's tool invocations and is passed through
    /// unchanged, zero included.
    pub async fn query(
        &self,
        query: impl Into<String>,
        options: GflQueryOptions,
    ) -> ClientResult<GflQueryResponse> {
        let query = query.into();
        if query.trim().is_empty() {
            return Err(ClientError::validation("query must not be empty"));
        }
        let collections = options
            .collections
            .unwrap_or_else(|| vec![self.collection.clone()]);
        if collections.is_empty() {
            return Err(ClientError::validation("at least one collection is required"));
        }

        let request = GflQueryRequest {
            query,
            collections,
            tenant: options.tenant,
            functions: options.functions,
            call_budget: options.call_budget.unwrap_or(self.defaults.call_budget),
            lm_provider: options
                .lm_provider
                .unwrap_or_else(|| self.defaults.lm_provider.clone()),
            model_name: options
                .model_name
                .unwrap_or_else(|| self.defaults.model_name.clone()),
            api_key: options.api_key,
            description: options.description,
        };
        tracing::debug!(
            collections = ?request.collections,
            call_budget = request.call_budget,
            "Running GFL query"
        );
        self.port.query(&request).await
    }

    /// Delete the objects `instruction` selects.
    pub async fn delete_object<I, S>(
        &self,
        instruction: impl Into<String>,
        view_properties: I,
    ) -> ClientResult<GflResponse>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let request = GflDeleteRequest {
            collection: self.collection.clone(),
            instruction: instruction.into(),
            view_properties: view_properties.into_iter().map(Into::into).collect(),
        };
        if request.instruction.trim().is_empty() {
            return Err(ClientError::validation("instruction must not be empty"));
        }

        let response = self.port.delete_objects(&request).await?;
        tracing::info!(
            collection = %self.collection,
            workflow_id = ?response.workflow_id,
            "Started GFL delete"
        );
        Ok(response)
    }

    /// Poll a workflow once.
    pub async fn status(&self, workflow_id: &str) -> ClientResult<GflStatusResponse> {
        if workflow_id.trim().is_empty() {
            return Err(ClientError::validation("workflow id must not be empty"));
        }
        self.port.status(workflow_id).await
    }

    /// Poll a workflow until it reaches a terminal state.
    ///
    /// Returns the terminal status, including failed ones. Fails with
    /// `ClientError::Timeout` once `timeout` has elapsed.
    pub async fn wait_for_completion(
        &self,
        workflow_id: &str,
        poll_interval: Duration,
        timeout: Duration,
    ) -> ClientResult<GflStatusResponse> {
        let deadline = Instant::now() + timeout;
        loop {
            let status = self.status(workflow_id).await?;
            if status.is_terminal() {
                return Ok(status);
            }
            tracing::debug!(workflow_id, state = %status.status, "Workflow still running");

            if Instant::now() + poll_interval > deadline {
                return Err(ClientError::Timeout {
                    workflow_id: workflow_id.to_string(),
                });
            }
            tokio::time::sleep(poll_interval).await;
        }
    }

    fn write_request<I, S>(
        &self,
        on_properties: PropertyTargets,
        view_properties: I,
        instruction: impl Into<String>,
        options: GflWriteOptions,
    ) -> GflWriteRequest
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        GflWriteRequest {
            uuids: options.uuids,
            collection: self.collection.clone(),
            instruction: instruction.into(),
            on_properties,
            view_properties: view_properties.into_iter().map(Into::into).collect(),
            headers: options.headers,
            tenant: options.tenant,
            model: options.model.unwrap_or_else(|| self.defaults.model.clone()),
            api_key_for_model: options.api_key_for_model,
        }
    }
}

impl std::fmt::Debug for Gfl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gfl")
            .field("collection", &self.collection)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}
