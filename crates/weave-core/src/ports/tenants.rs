//! Tenant management port trait.

use async_trait::async_trait;

use super::error::ClientResult;
use crate::domain::{Tenant, TenantCreate, TenantUpdate};

/// Port trait for tenant management on a collection.
///
/// The implementation lives in `weave-http`.
#[async_trait]
pub trait TenantsPort: Send + Sync {
    /// List every tenant of `collection`.
    async fn list(&self, collection: &str) -> ClientResult<Vec<Tenant>>;

    /// Fetch a single tenant.
    ///
    /// Returns `ClientError::NotFound` when the tenant does not exist.
    async fn get(&self, collection: &str, name: &str) -> ClientResult<Tenant>;

    /// Check whether a tenant exists.
    async fn exists(&self, collection: &str, name: &str) -> ClientResult<bool>;

    /// Create tenants.
    async fn create(&self, collection: &str, tenants: &[TenantCreate]) -> ClientResult<()>;

    /// Update existing tenants.
    ///
    /// Returns `ClientError::NotFound` when a referenced tenant does not exist.
    async fn update(&self, collection: &str, tenants: &[TenantUpdate]) -> ClientResult<()>;

    /// Remove tenants by name.
    async fn remove(&self, collection: &str, names: &[String]) -> ClientResult<()>;
}
