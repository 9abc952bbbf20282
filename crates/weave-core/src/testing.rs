//! In-memory port implementations for tests.
//!
//! These fakes model the server-side semantics the facades rely on
//! (unique tenant names, not-found on update, workflows that progress on
//! each poll) and record what they were asked to do.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::json;

use crate::domain::{
    GflDeleteRequest, GflQueryRequest, GflQueryResponse, GflResponse, GflStatusResponse,
    GflWriteRequest, QueryAgentRequest, QueryAgentResponse, Tenant, TenantCreate, TenantUpdate,
    TransformationRequest, WorkflowState,
};
use crate::ports::{AgentsPort, ClientError, ClientResult, GflPort, TenantsPort};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Tenants
// ============================================================================

/// Tenant store keyed by collection, then tenant name.
#[derive(Debug, Default)]
pub struct InMemoryTenants {
    collections: Mutex<BTreeMap<String, BTreeMap<String, Tenant>>>,
    requests: AtomicU64,
}

impl InMemoryTenants {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of port calls served so far.
    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::SeqCst)
    }

    fn count(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl TenantsPort for InMemoryTenants {
    async fn list(&self, collection: &str) -> ClientResult<Vec<Tenant>> {
        self.count();
        Ok(lock(&self.collections)
            .get(collection)
            .map(|tenants| tenants.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn get(&self, collection: &str, name: &str) -> ClientResult<Tenant> {
        self.count();
        lock(&self.collections)
            .get(collection)
            .and_then(|tenants| tenants.get(name).cloned())
            .ok_or_else(|| ClientError::not_found(format!("tenant '{name}'")))
    }

    async fn exists(&self, collection: &str, name: &str) -> ClientResult<bool> {
        self.count();
        Ok(lock(&self.collections)
            .get(collection)
            .is_some_and(|tenants| tenants.contains_key(name)))
    }

    async fn create(&self, collection: &str, tenants: &[TenantCreate]) -> ClientResult<()> {
        self.count();
        let mut collections = lock(&self.collections);
        let store = collections.entry(collection.to_string()).or_default();
        if let Some(dup) = tenants.iter().find(|t| store.contains_key(&t.name)) {
            return Err(ClientError::validation(format!(
                "tenant '{}' already exists",
                dup.name
            )));
        }
        for tenant in tenants {
            store.insert(
                tenant.name.clone(),
                Tenant::new(&tenant.name, tenant.activity_status.unwrap_or_default()),
            );
        }
        Ok(())
    }

    async fn update(&self, collection: &str, tenants: &[TenantUpdate]) -> ClientResult<()> {
        self.count();
        let mut collections = lock(&self.collections);
        let store = collections.entry(collection.to_string()).or_default();
        if let Some(missing) = tenants.iter().find(|t| !store.contains_key(&t.name)) {
            return Err(ClientError::not_found(format!("tenant '{}'", missing.name)));
        }
        for update in tenants {
            if let Some(tenant) = store.get_mut(&update.name) {
                tenant.activity_status = update.activity_status;
            }
        }
        Ok(())
    }

    async fn remove(&self, collection: &str, names: &[String]) -> ClientResult<()> {
        self.count();
        if let Some(store) = lock(&self.collections).get_mut(collection) {
            for name in names {
                store.remove(name);
            }
        }
        Ok(())
    }
}

// ============================================================================
// GFL
// ============================================================================

/// A call received by [`ScriptedGfl`].
#[derive(Debug, Clone, PartialEq)]
pub enum GflCall {
    Create(GflWriteRequest),
    Update(GflWriteRequest),
    Delete(GflDeleteRequest),
    Query(GflQueryRequest),
    Status(String),
}

/// GFL fake whose workflows advance one state per status poll:
/// pending, running, then completed.
#[derive(Debug, Default)]
pub struct ScriptedGfl {
    calls: Mutex<Vec<GflCall>>,
    workflows: Mutex<BTreeMap<String, WorkflowState>>,
    next_id: AtomicU64,
}

impl ScriptedGfl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls received so far, oldest first.
    pub fn calls(&self) -> Vec<GflCall> {
        lock(&self.calls).clone()
    }

    /// Pin a workflow to a state; it stops advancing once terminal.
    pub fn set_state(&self, workflow_id: &str, state: WorkflowState) {
        lock(&self.workflows).insert(workflow_id.to_string(), state);
    }

    fn record(&self, call: GflCall) {
        lock(&self.calls).push(call);
    }

    fn start_workflow(&self, operation: &str) -> GflResponse {
        let id = format!("wf-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        lock(&self.workflows).insert(id.clone(), WorkflowState::Pending);
        GflResponse {
            workflow_id: Some(id),
            operation_name: Some(operation.to_string()),
            ..GflResponse::default()
        }
    }
}

#[async_trait]
impl GflPort for ScriptedGfl {
    async fn create(&self, request: &GflWriteRequest) -> ClientResult<GflResponse> {
        self.record(GflCall::Create(request.clone()));
        Ok(self.start_workflow(&request.on_properties.names().join(",")))
    }

    async fn update(&self, request: &GflWriteRequest) -> ClientResult<GflResponse> {
        self.record(GflCall::Update(request.clone()));
        Ok(self.start_workflow(&request.on_properties.names().join(",")))
    }

    async fn delete_objects(&self, request: &GflDeleteRequest) -> ClientResult<GflResponse> {
        self.record(GflCall::Delete(request.clone()));
        Ok(self.start_workflow("delete"))
    }

    async fn query(&self, request: &GflQueryRequest) -> ClientResult<GflQueryResponse> {
        self.record(GflCall::Query(request.clone()));
        let mut response = GflQueryResponse {
            original_query: Some(request.query.clone()),
            final_answer: Some(format!("answer to: {}", request.query)),
            collection_names: request.collections.clone(),
            ..GflQueryResponse::default()
        };
        response
            .extra
            .insert("tool_calls".to_string(), json!(0));
        Ok(response)
    }

    async fn status(&self, workflow_id: &str) -> ClientResult<GflStatusResponse> {
        self.record(GflCall::Status(workflow_id.to_string()));
        let mut workflows = lock(&self.workflows);
        let state = workflows
            .get_mut(workflow_id)
            .ok_or_else(|| ClientError::not_found(format!("workflow '{workflow_id}'")))?;
        let current = state.clone();
        *state = match current {
            WorkflowState::Pending => WorkflowState::Running,
            WorkflowState::Running => WorkflowState::Completed,
            ref other => other.clone(),
        };
        Ok(GflStatusResponse {
            workflow_id: workflow_id.to_string(),
            status: current,
            ..GflStatusResponse::default()
        })
    }
}

// ============================================================================
// Agents
// ============================================================================

/// Agents fake recording every request it receives.
#[derive(Debug, Default)]
pub struct RecordingAgents {
    queries: Mutex<Vec<QueryAgentRequest>>,
    transformations: Mutex<Vec<TransformationRequest>>,
}

impl RecordingAgents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queries(&self) -> Vec<QueryAgentRequest> {
        lock(&self.queries).clone()
    }

    pub fn transformations(&self) -> Vec<TransformationRequest> {
        lock(&self.transformations).clone()
    }
}

#[async_trait]
impl AgentsPort for RecordingAgents {
    async fn run_query(&self, request: &QueryAgentRequest) -> ClientResult<QueryAgentResponse> {
        lock(&self.queries).push(request.clone());
        Ok(QueryAgentResponse {
            original_query: request.query.clone(),
            collection_names: request.collection_names.clone(),
            final_answer: format!("answer to: {}", request.query),
            has_search_answer: true,
            ..QueryAgentResponse::default()
        })
    }

    async fn submit_transformation(
        &self,
        request: &TransformationRequest,
    ) -> ClientResult<String> {
        let mut transformations = lock(&self.transformations);
        transformations.push(request.clone());
        Ok(format!("tf-{}", transformations.len()))
    }
}
