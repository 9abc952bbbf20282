//! Tenant operations against the cluster schema API.

use serde_json::Value;
use weave_core::{Tenant, TenantCreate, TenantUpdate};

use crate::error::{HttpError, HttpResult};
use crate::http::{HttpBackend, Method};
use crate::url::{tenant_url, tenants_url};

use super::{RestClient, decode};

impl<B: HttpBackend> RestClient<B> {
    /// List every tenant of a collection.
    pub(crate) async fn list_tenants(&self, collection: &str) -> HttpResult<Vec<Tenant>> {
        let url = tenants_url(&self.config, collection)?;
        let reply = self
            .backend
            .send(self.cluster_request(Method::Get, url))
            .await?;
        // Collections without tenants answer with an empty body on some versions
        if reply.body.is_none() {
            return Ok(Vec::new());
        }
        decode(reply)
    }

    /// Fetch one tenant.
    pub(crate) async fn get_tenant(&self, collection: &str, name: &str) -> HttpResult<Tenant> {
        let url = tenant_url(&self.config, collection, name)?;
        let reply = self
            .backend
            .send(self.cluster_request(Method::Get, url))
            .await?;
        decode(reply)
    }

    /// Check a tenant with a HEAD request; 404 means absent.
    pub(crate) async fn tenant_exists(&self, collection: &str, name: &str) -> HttpResult<bool> {
        let url = tenant_url(&self.config, collection, name)?;
        match self
            .backend
            .send(self.cluster_request(Method::Head, url))
            .await
        {
            Ok(_) => Ok(true),
            Err(HttpError::ApiRequestFailed { status: 404, .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub(crate) async fn create_tenants(
        &self,
        collection: &str,
        tenants: &[TenantCreate],
    ) -> HttpResult<()> {
        let url = tenants_url(&self.config, collection)?;
        let body = serde_json::to_value(tenants)?;
        self.backend
            .send(self.cluster_request(Method::Post, url).json(body))
            .await?;
        Ok(())
    }

    pub(crate) async fn update_tenants(
        &self,
        collection: &str,
        tenants: &[TenantUpdate],
    ) -> HttpResult<()> {
        let url = tenants_url(&self.config, collection)?;
        let body = serde_json::to_value(tenants)?;
        self.backend
            .send(self.cluster_request(Method::Put, url).json(body))
            .await?;
        Ok(())
    }

    pub(crate) async fn remove_tenants(&self, collection: &str, names: &[String]) -> HttpResult<()> {
        let url = tenants_url(&self.config, collection)?;
        let body = Value::from(names.to_vec());
        self.backend
            .send(self.cluster_request(Method::Delete, url).json(body))
            .await?;
        Ok(())
    }
}
