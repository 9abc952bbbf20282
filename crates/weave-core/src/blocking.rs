//! Blocking execution adapter.
//!
//! The async facades are the canonical implementation. [`Blocking`] drives
//! them on a tokio runtime so callers without one can use the same methods
//! synchronously.
//!
//! Calling a blocking method from inside an async runtime panics, as
//! `Runtime::block_on` does.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::{Builder, Runtime};

use crate::domain::{
    DataType, GflQueryOptions, GflQueryResponse, GflResponse, GflStatusResponse,
    GflWriteOptions, QueryAgentResponse, Tenant, TenantCreate, TenantRef, TenantUpdate,
    TransformationResponse,
};
use crate::ports::{ClientError, ClientResult};
use crate::services::{Gfl, QueryAgent, Tenants, TransformationAgent};

/// A facade paired with the runtime that drives it.
#[derive(Debug, Clone)]
pub struct Blocking<T> {
    inner: T,
    runtime: Arc<Runtime>,
}

impl<T> Blocking<T> {
    /// Wrap `inner` with a fresh single-threaded runtime.
    pub fn new(inner: T) -> ClientResult<Self> {
        Ok(Self::with_runtime(inner, new_runtime()?))
    }

    /// Wrap `inner` with a shared runtime.
    pub const fn with_runtime(inner: T, runtime: Arc<Runtime>) -> Self {
        Self { inner, runtime }
    }

    /// The wrapped async facade.
    pub const fn inner(&self) -> &T {
        &self.inner
    }

    /// The runtime driving the facade, for sharing with other adapters.
    pub fn runtime(&self) -> Arc<Runtime> {
        Arc::clone(&self.runtime)
    }

    fn run<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

/// Build the runtime blocking adapters use by default.
pub fn new_runtime() -> ClientResult<Arc<Runtime>> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map(Arc::new)
        .map_err(|e| ClientError::Configuration {
            message: format!("failed to start runtime: {e}"),
        })
}

impl Blocking<Tenants> {
    pub fn create<I>(&self, tenants: I) -> ClientResult<()>
    where
        I: IntoIterator,
        I::Item: Into<TenantCreate>,
    {
        self.run(self.inner.create(tenants))
    }

    pub fn remove<I>(&self, tenants: I) -> ClientResult<()>
    where
        I: IntoIterator,
        I::Item: TenantRef,
    {
        self.run(self.inner.remove(tenants))
    }

    pub fn get(&self) -> ClientResult<BTreeMap<String, Tenant>> {
        self.run(self.inner.get())
    }

    pub fn get_by_names<I>(&self, tenants: I) -> ClientResult<BTreeMap<String, Tenant>>
    where
        I: IntoIterator,
        I::Item: TenantRef,
    {
        self.run(self.inner.get_by_names(tenants))
    }

    pub fn get_by_name(&self, tenant: impl TenantRef) -> ClientResult<Option<Tenant>> {
        self.run(self.inner.get_by_name(tenant))
    }

    pub fn update<I>(&self, tenants: I) -> ClientResult<()>
    where
        I: IntoIterator,
        I::Item: Into<TenantUpdate>,
    {
        self.run(self.inner.update(tenants))
    }

    pub fn exists(&self, tenant: impl TenantRef) -> ClientResult<bool> {
        self.run(self.inner.exists(tenant))
    }
}

impl Blocking<Gfl> {
    pub fn create<I, S>(
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
        self.run(self.inner.create(
            property_name,
            data_type,
            view_properties,
            instruction,
            options,
        ))
    }

    pub fn update<I, S, P, Q>(
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
        self.run(
            self.inner
                .update(instruction, view_properties, on_properties, options),
        )
    }

    pub fn query(
        &self,
        query: impl Into<String>,
        options: GflQueryOptions,
    ) -> ClientResult<GflQueryResponse> {
        self.run(self.inner.query(query, options))
    }

    pub fn delete_object<I, S>(
        &self,
        instruction: impl Into<String>,
        view_properties: I,
    ) -> ClientResult<GflResponse>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.run(self.inner.delete_object(instruction, view_properties))
    }

    pub fn status(&self, workflow_id: &str) -> ClientResult<GflStatusResponse> {
        self.run(self.inner.status(workflow_id))
    }

    pub fn wait_for_completion(
        &self,
        workflow_id: &str,
        poll_interval: Duration,
        timeout: Duration,
    ) -> ClientResult<GflStatusResponse> {
        self.run(
            self.inner
                .wait_for_completion(workflow_id, poll_interval, timeout),
        )
    }
}

impl Blocking<QueryAgent> {
    pub fn run_query(
        &self,
        query: impl Into<String>,
        view_properties: Option<Vec<String>>,
        context: Option<&QueryAgentResponse>,
    ) -> ClientResult<QueryAgentResponse> {
        self.run(self.inner.run(query, view_properties, context))
    }
}

impl Blocking<TransformationAgent> {
    pub fn update_all(&self) -> ClientResult<Vec<TransformationResponse>> {
        self.run(self.inner.update_all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WorkflowState;
    use crate::testing::{InMemoryTenants, ScriptedGfl};

    #[test]
    fn test_blocking_tenants_mirror_async() {
        let tenants = Blocking::new(Tenants::new(Arc::new(InMemoryTenants::new()), "Article"))
            .unwrap();

        tenants.create(["a", "b"]).unwrap();
        assert!(tenants.exists("a").unwrap());
        assert_eq!(tenants.get().unwrap().len(), 2);

        tenants.remove(["a"]).unwrap();
        assert!(!tenants.exists("a").unwrap());
        assert!(tenants.get_by_name("a").unwrap().is_none());
        assert_eq!(tenants.get_by_names(["a", "b"]).unwrap().len(), 1);
    }

    #[test]
    fn test_blocking_gfl_shares_runtime() {
        let runtime = new_runtime().unwrap();
        let gfl = Blocking::with_runtime(
            Gfl::new(Arc::new(ScriptedGfl::new()), "Article"),
            Arc::clone(&runtime),
        );
        assert!(Arc::ptr_eq(&gfl.runtime(), &runtime));

        let response = gfl
            .create(
                "summary",
                DataType::Text,
                ["title", "body"],
                "Summarize the article",
                GflWriteOptions::new(),
            )
            .unwrap();
        let status = gfl
            .wait_for_completion(
                response.workflow_id.as_deref().unwrap(),
                Duration::from_millis(1),
                Duration::from_secs(5),
            )
            .unwrap();
        assert_eq!(status.status, WorkflowState::Completed);
    }
}
