//! Client entry point.
//!
//! [`WeaveClient`] owns one HTTP client and hands out facades bound to a
//! collection. All facades share the same connection pool.

use std::fmt;
use std::sync::Arc;

use weave_core::ports::{AgentsPort, ClientError, ClientResult, GflPort, TenantsPort};
use weave_core::{
    Blocking, DependentOperationStep, Gfl, GflDefaults, QueryAgent, Tenants, TransformationAgent,
};

use crate::client::{DefaultRestClient, RestClient};
use crate::config::ClientConfig;
use crate::http::HttpBackend;

/// Connected client for one cluster.
///
/// # Example
///
/// ```no_run
/// use weave_http::{ClientConfig, WeaveClient};
///
/// # async fn run() -> weave_core::ClientResult<()> {
/// let client = WeaveClient::new(&ClientConfig::from_env())?;
/// let tenants = client.collection("Article").tenants();
/// tenants.create(["tenantA", "tenantB"]).await?;
/// assert!(tenants.exists("tenantA").await?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct WeaveClient {
    tenants: Arc<dyn TenantsPort>,
    gfl: Arc<dyn GflPort>,
    agents: Arc<dyn AgentsPort>,
}

impl WeaveClient {
    /// Connect with the given configuration.
    ///
    /// No request is made until a facade is used.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = DefaultRestClient::new(config).map_err(|e| ClientError::Configuration {
            message: e.to_string(),
        })?;
        Ok(Self::from_rest_client(client))
    }

    /// Connect with configuration read from the environment.
    pub fn from_env() -> ClientResult<Self> {
        Self::new(&ClientConfig::from_env())
    }

    fn from_rest_client<B: HttpBackend + 'static>(client: RestClient<B>) -> Self {
        let client = Arc::new(client);
        Self {
            tenants: client.clone(),
            gfl: client.clone(),
            agents: client,
        }
    }

    /// Create a client over a custom backend.
    #[cfg(test)]
    pub(crate) fn with_backend<B: HttpBackend + 'static>(
        config: crate::models::ConnectionConfig,
        backend: B,
    ) -> Self {
        Self::from_rest_client(RestClient::with_backend(config, backend))
    }

    /// Handle on one collection.
    pub fn collection(&self, name: impl Into<String>) -> CollectionHandle {
        CollectionHandle {
            name: name.into(),
            tenants: Arc::clone(&self.tenants),
            gfl: Arc::clone(&self.gfl),
        }
    }

    /// Query agent over one or more collections.
    pub fn query_agent<I, S>(&self, collections: I) -> QueryAgent
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        QueryAgent::new(Arc::clone(&self.agents), collections)
    }

    /// Transformation agent applying `operations` to a collection, in order.
    pub fn transformation_agent<I, O>(
        &self,
        collection: impl Into<String>,
        operations: I,
    ) -> TransformationAgent
    where
        I: IntoIterator<Item = O>,
        O: Into<DependentOperationStep>,
    {
        TransformationAgent::configure(Arc::clone(&self.agents), collection, operations)
    }
}

impl fmt::Debug for WeaveClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeaveClient").finish_non_exhaustive()
    }
}

/// Facades bound to one collection.
#[derive(Clone)]
pub struct CollectionHandle {
    name: String,
    tenants: Arc<dyn TenantsPort>,
    gfl: Arc<dyn GflPort>,
}

impl CollectionHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tenant management for this collection.
    pub fn tenants(&self) -> Tenants {
        Tenants::new(Arc::clone(&self.tenants), self.name.clone())
    }

    /// GFL operations with the standard defaults.
    pub fn gfl(&self) -> Gfl {
        self.gfl_with_defaults(GflDefaults::default())
    }

    /// GFL operations with custom defaults.
    pub fn gfl_with_defaults(&self, defaults: GflDefaults) -> Gfl {
        Gfl::with_defaults(Arc::clone(&self.gfl), self.name.clone(), defaults)
    }

    /// Tenant management for synchronous callers.
    pub fn blocking_tenants(&self) -> ClientResult<Blocking<Tenants>> {
        Blocking::new(self.tenants())
    }

    /// GFL operations for synchronous callers.
    pub fn blocking_gfl(&self) -> ClientResult<Blocking<Gfl>> {
        Blocking::new(self.gfl())
    }
}

impl fmt::Debug for CollectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionHandle")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
