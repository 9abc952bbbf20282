//! Tenants facade - tenant CRUD for one collection.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::domain::tenant::validate_name;
use crate::domain::{Tenant, TenantCreate, TenantRef, TenantUpdate};
use crate::ports::{ClientResult, TenantsPort};

/// Tenant management for a single collection.
///
/// This is a thin facade over the injected `TenantsPort`: it normalizes
/// "one or many" inputs, validates them locally and turns the contractually
/// absent lookups into `None`/`false`. Every other error propagates unchanged.
#[derive(Clone)]
pub struct Tenants {
    port: Arc<dyn TenantsPort>,
    collection: String,
}

impl Tenants {
    /// Create a facade for `collection`.
    pub fn new(port: Arc<dyn TenantsPort>, collection: impl Into<String>) -> Self {
        Self {
            port,
            collection: collection.into(),
        }
    }

    /// Name of the collection this facade manages.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Create one or more tenants.
    ///
    /// Accepts names or full descriptors, e.g. `create(["a", "b"])`.
    pub async fn create<I>(&self, tenants: I) -> ClientResult<()>
    where
        I: IntoIterator,
        I::Item: Into<TenantCreate>,
    {
        let tenants: Vec<TenantCreate> = tenants.into_iter().map(Into::into).collect();
        if tenants.is_empty() {
            return Ok(());
        }
        for tenant in &tenants {
            tenant.validate()?;
        }
        self.port.create(&self.collection, &tenants).await?;
        tracing::info!(
            collection = %self.collection,
            count = tenants.len(),
            "Created tenants"
        );
        Ok(())
    }

    /// Remove one or more tenants, given by name or by descriptor.
    pub async fn remove<I>(&self, tenants: I) -> ClientResult<()>
    where
        I: IntoIterator,
        I::Item: TenantRef,
    {
        let names = collect_names(tenants)?;
        if names.is_empty() {
            return Ok(());
        }
        self.port.remove(&self.collection, &names).await?;
        tracing::info!(
            collection = %self.collection,
            count = names.len(),
            "Removed tenants"
        );
        Ok(())
    }

    /// All tenants of the collection, keyed by name.
    pub async fn get(&self) -> ClientResult<BTreeMap<String, Tenant>> {
        let tenants = self.port.list(&self.collection).await?;
        Ok(tenants
            .into_iter()
            .map(|tenant| (tenant.name.clone(), tenant))
            .collect())
    }

    /// The named tenants that exist, keyed by name.
    ///
    /// Names without a matching tenant are simply absent from the result.
    pub async fn get_by_names<I>(&self, tenants: I) -> ClientResult<BTreeMap<String, Tenant>>
    where
        I: IntoIterator,
        I::Item: TenantRef,
    {
        let wanted: BTreeSet<String> = collect_names(tenants)?.into_iter().collect();
        if wanted.is_empty() {
            return Ok(BTreeMap::new());
        }
        let mut all = self.get().await?;
        all.retain(|name, _| wanted.contains(name));
        Ok(all)
    }

    /// A single tenant, or `None` when it does not exist.
    pub async fn get_by_name(&self, tenant: impl TenantRef) -> ClientResult<Option<Tenant>> {
        let name = tenant.tenant_name();
        validate_name(name)?;
        match self.port.get(&self.collection, name).await {
            Ok(tenant) => Ok(Some(tenant)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Update one or more existing tenants.
    ///
    /// Fails with `ClientError::NotFound` when a tenant does not exist.
    pub async fn update<I>(&self, tenants: I) -> ClientResult<()>
    where
        I: IntoIterator,
        I::Item: Into<TenantUpdate>,
    {
        let tenants: Vec<TenantUpdate> = tenants.into_iter().map(Into::into).collect();
        if tenants.is_empty() {
            return Ok(());
        }
        for tenant in &tenants {
            tenant.validate()?;
        }
        self.port.update(&self.collection, &tenants).await?;
        tracing::info!(
            collection = %self.collection,
            count = tenants.len(),
            "Updated tenants"
        );
        Ok(())
    }

    /// Whether a tenant exists.
    pub async fn exists(&self, tenant: impl TenantRef) -> ClientResult<bool> {
        let name = tenant.tenant_name();
        validate_name(name)?;
        self.port.exists(&self.collection, name).await
    }
}

impl std::fmt::Debug for Tenants {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tenants")
            .field("collection", &self.collection)
            .finish_non_exhaustive()
    }
}

fn collect_names<I>(tenants: I) -> ClientResult<Vec<String>>
where
    I: IntoIterator,
    I::Item: TenantRef,
{
    tenants
        .into_iter()
        .map(|t| {
            let name = t.tenant_name();
            validate_name(name).map(|()| name.to_string())
        })
        .collect()
}
